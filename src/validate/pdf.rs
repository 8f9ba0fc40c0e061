//! PDF: version header near the start, `%%EOF` near the end.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

use crate::bytes::{contains, head, tail};
use crate::format::Format;
use crate::result::{ValidationError, ValidationResult};

const HEADER_WINDOW: usize = 1024;
const TRAILER_WINDOW: usize = 1024;

static VERSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"%PDF-\d\.\d").expect("valid regex"));

/// Version string such as `"1.7"` from the header window.
pub fn pdf_version(data: &[u8]) -> Option<String> {
    VERSION
        .find(head(data, HEADER_WINDOW))
        .map(|m| String::from_utf8_lossy(&m.as_bytes()[5..]).into_owned())
}

pub fn validate_pdf(data: &[u8]) -> ValidationResult {
    let size = data.len() as u64;

    if !VERSION.is_match(head(data, HEADER_WINDOW)) {
        return ValidationResult::invalid(
            ValidationError::corrupted(Format::Pdf, "Invalid PDF file. Missing PDF version header."),
            Some(Format::Pdf),
            size,
        );
    }

    if !contains(tail(data, TRAILER_WINDOW), b"%%EOF") {
        return ValidationResult::invalid(
            ValidationError::corrupted(
                Format::Pdf,
                "PDF file may be truncated or corrupted (missing EOF marker).",
            ),
            Some(Format::Pdf),
            size,
        );
    }

    ValidationResult::valid(Format::Pdf, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_pdf() {
        let doc = b"%PDF-1.7\n1 0 obj\n<<>>\nendobj\ntrailer\n<<>>\n%%EOF\n";
        assert!(validate_pdf(doc).is_valid);
        assert_eq!(pdf_version(doc).as_deref(), Some("1.7"));
    }

    #[test]
    fn eof_must_be_near_the_end() {
        let mut doc = b"%PDF-1.4\n%%EOF\n".to_vec();
        doc.extend(std::iter::repeat(b' ').take(2048));
        let r = validate_pdf(&doc);
        assert!(!r.is_valid);
        assert_eq!(
            r.error_message().as_deref(),
            Some("PDF file may be truncated or corrupted (missing EOF marker).")
        );
    }

    #[test]
    fn malformed_version() {
        assert!(!validate_pdf(b"%PDF-x\n%%EOF").is_valid);
    }
}
