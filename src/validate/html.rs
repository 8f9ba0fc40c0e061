//! HTML: some markup present, no alert/eval script payloads, 10 MiB cap.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};

use crate::format::Format;
use crate::result::{ValidationError, ValidationResult};

pub const MAX_HTML_SIZE: u64 = 10 * 1024 * 1024;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

static SCRIPT_PAYLOADS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?is)<script[^>]*>.*?alert\s*\(",
        r"(?is)<script[^>]*>.*?eval\s*\(",
        r"(?is)javascript:.*?eval\s*\(",
    ])
    .expect("valid regex set")
});

pub fn validate_html(data: &[u8]) -> ValidationResult {
    let size = data.len() as u64;
    let content = String::from_utf8_lossy(data);

    if !TAG.is_match(&content) {
        return ValidationResult::invalid(
            ValidationError::corrupted(
                Format::Html,
                "Invalid HTML file. The file must contain HTML markup.",
            ),
            Some(Format::Html),
            size,
        );
    }

    if SCRIPT_PAYLOADS.is_match(&content) {
        return ValidationResult::invalid(
            ValidationError::DangerousContent {
                format: Format::Html,
                reason: "HTML file contains potentially dangerous JavaScript. Please remove any alert() or eval() calls.".to_string(),
            },
            Some(Format::Html),
            size,
        );
    }

    if size > MAX_HTML_SIZE {
        return ValidationResult::invalid(
            ValidationError::SizeExceeded {
                format: Format::Html,
                size,
                limit: MAX_HTML_SIZE,
            },
            Some(Format::Html),
            size,
        );
    }

    ValidationResult::valid(Format::Html, size)
}
