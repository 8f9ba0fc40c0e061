//! GIF: logical screen dimensions.

use tracing::warn;

use crate::bytes::read_u16_le;
use crate::format::Format;
use crate::limits::max_dimensions;
use crate::result::{ValidationError, ValidationResult};

/// Header (6) + logical screen descriptor (7).
const MIN_LEN: usize = 13;
const TRAILER: u8 = 0x3B;

pub fn validate_gif(data: &[u8]) -> ValidationResult {
    let size = data.len() as u64;

    if data.len() < MIN_LEN {
        return ValidationResult::invalid(
            ValidationError::corrupted(Format::Gif, "GIF file is too small to be valid."),
            Some(Format::Gif),
            size,
        );
    }

    let width = u32::from(read_u16_le(data, 6).unwrap_or_default());
    let height = u32::from(read_u16_le(data, 8).unwrap_or_default());
    let max = max_dimensions(Format::Gif);
    if !max.fits(width, height) {
        return ValidationResult::invalid(
            ValidationError::DimensionsExceeded {
                format: Format::Gif,
                width,
                height,
                max_width: max.width,
                max_height: max.height,
            },
            Some(Format::Gif),
            size,
        );
    }

    let mut warnings = Vec::new();
    if data.last() != Some(&TRAILER) {
        warn!("GIF may be missing trailer byte");
        warnings.push("GIF may be missing trailer byte".to_string());
    }

    ValidationResult::valid(Format::Gif, size).with_warnings(warnings)
}
