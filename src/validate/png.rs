//! PNG: IHDR placement and declared dimensions.

use tracing::warn;

use crate::bytes::{bytes_at, read_u32_be, tail};
use crate::format::Format;
use crate::limits::max_dimensions;
use crate::result::{ValidationError, ValidationResult};

/// Signature (8) + chunk length (4) + "IHDR" (4) + width (4) + height (4).
const MIN_LEN: usize = 24;

pub fn validate_png(data: &[u8]) -> ValidationResult {
    let size = data.len() as u64;

    if data.len() < MIN_LEN {
        return ValidationResult::invalid(
            ValidationError::corrupted(
                Format::Png,
                "PNG file is too small to be valid. The file may be corrupted.",
            ),
            Some(Format::Png),
            size,
        );
    }

    if !bytes_at(data, 12, b"IHDR") {
        return ValidationResult::invalid(
            ValidationError::corrupted(
                Format::Png,
                "Invalid PNG file structure. Missing required IHDR chunk.",
            ),
            Some(Format::Png),
            size,
        );
    }

    let width = read_u32_be(data, 16).unwrap_or_default();
    let height = read_u32_be(data, 20).unwrap_or_default();
    let max = max_dimensions(Format::Png);
    if !max.fits(width, height) {
        return ValidationResult::invalid(
            ValidationError::DimensionsExceeded {
                format: Format::Png,
                width,
                height,
                max_width: max.width,
                max_height: max.height,
            },
            Some(Format::Png),
            size,
        );
    }

    // IEND chunk: length (4) + "IEND" (4) + CRC (4) at the very end.
    let mut warnings = Vec::new();
    if !bytes_at(tail(data, 12), 4, b"IEND") {
        warn!("PNG file may be truncated (missing IEND chunk)");
        warnings.push("PNG file may be truncated (missing IEND chunk)".to_string());
    }

    ValidationResult::valid(Format::Png, size).with_warnings(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut v = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        v.extend_from_slice(&13u32.to_be_bytes());
        v.extend_from_slice(b"IHDR");
        v.extend_from_slice(&width.to_be_bytes());
        v.extend_from_slice(&height.to_be_bytes());
        v.extend_from_slice(&[8, 6, 0, 0, 0]);
        v.extend_from_slice(&[0; 4]);
        v.extend_from_slice(&[0, 0, 0, 0]);
        v.extend_from_slice(b"IEND");
        v.extend_from_slice(&[0xAE, 0x42, 0x60, 0x82]);
        v
    }

    #[test]
    fn complete_png() {
        let r = validate_png(&png(640, 480));
        assert!(r.is_valid);
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn dimension_limit_is_inclusive() {
        assert!(validate_png(&png(10_000, 10_000)).is_valid);
        let r = validate_png(&png(10_001, 10));
        assert!(!r.is_valid);
        assert_eq!(
            r.error_message().as_deref(),
            Some("PNG dimensions (10001x10) exceed maximum allowed dimensions (10000x10000). Please use a smaller image.")
        );
    }

    #[test]
    fn truncated_png_warns() {
        let mut v = png(1, 1);
        v.truncate(v.len() - 12);
        let r = validate_png(&v);
        assert!(r.is_valid);
        assert_eq!(r.warnings.len(), 1);
    }
}
