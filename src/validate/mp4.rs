//! MP4: leading `ftyp` box.

use crate::bytes::bytes_at;
use crate::format::Format;
use crate::result::{ValidationError, ValidationResult};

pub fn validate_mp4(data: &[u8]) -> ValidationResult {
    let size = data.len() as u64;

    if data.len() < 12 {
        return ValidationResult::invalid(
            ValidationError::corrupted(Format::Mp4, "MP4 file is too small to be valid."),
            Some(Format::Mp4),
            size,
        );
    }

    if !bytes_at(data, 4, b"ftyp") {
        return ValidationResult::invalid(
            ValidationError::corrupted(
                Format::Mp4,
                "Invalid MP4 file structure. Missing required ftyp box.",
            ),
            Some(Format::Mp4),
            size,
        );
    }

    ValidationResult::valid(Format::Mp4, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ftyp_box() {
        assert!(validate_mp4(b"\0\0\0\x18ftypisom\0\0\0\0").is_valid);
        assert!(!validate_mp4(b"\0\0\0\x18moovisom\0\0\0\0").is_valid);
        assert!(!validate_mp4(b"\0\0\0\x18ftyp").is_valid);
    }
}
