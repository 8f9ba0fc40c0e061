//! JPEG: end-of-image marker (advisory only).

use tracing::warn;

use crate::format::Format;
use crate::result::{ValidationError, ValidationResult};

const EOI: [u8; 2] = [0xFF, 0xD9];

pub fn validate_jpeg(data: &[u8]) -> ValidationResult {
    let size = data.len() as u64;

    if data.len() < 2 {
        return ValidationResult::invalid(
            ValidationError::corrupted(Format::Jpg, "JPEG file is too small to be valid."),
            Some(Format::Jpg),
            size,
        );
    }

    // Some encoders pad after EOI or omit it; not fatal.
    let mut warnings = Vec::new();
    if !data.ends_with(&EOI) {
        warn!("JPEG file may be truncated (missing end marker)");
        warnings.push("JPEG file may be truncated (missing end marker)".to_string());
    }

    ValidationResult::valid(Format::Jpg, size).with_warnings(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_eoi_is_a_warning() {
        let r = validate_jpeg(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]);
        assert!(r.is_valid);
        assert_eq!(r.warnings.len(), 1);
    }

    #[test]
    fn with_eoi() {
        let r = validate_jpeg(&[0xFF, 0xD8, 0xFF, 0xE0, 0xFF, 0xD9]);
        assert!(r.is_valid);
        assert!(r.warnings.is_empty());
    }
}
