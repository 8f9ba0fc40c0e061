//! SVG: active-content blocklist and root element presence.

use once_cell::sync::Lazy;
use regex::RegexSet;

use crate::format::Format;
use crate::result::{ValidationError, ValidationResult};

const DANGEROUS_PATTERNS: &[&str] = &[
    r"(?i)<script[\s>]",
    r"(?i)on\w+\s*=",
    r"(?i)javascript:",
    r"(?i)<iframe",
    r"(?i)<embed",
    r"(?i)<object",
    r"(?i)<form",
    r"(?i)<link",
];

static DANGEROUS: Lazy<RegexSet> =
    Lazy::new(|| RegexSet::new(DANGEROUS_PATTERNS).expect("valid regex set"));
static SVG_ELEMENT: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"(?i)<svg[^>]*>").expect("valid regex"));

/// Patterns from the blocklist that occur in `content`.
pub fn dangerous_matches(content: &str) -> Vec<&'static str> {
    DANGEROUS
        .matches(content)
        .into_iter()
        .map(|i| DANGEROUS_PATTERNS[i])
        .collect()
}

/// `security_checks = false` skips the blocklist; structure is always checked.
pub fn validate_svg(data: &[u8], security_checks: bool) -> ValidationResult {
    let size = data.len() as u64;
    let content = String::from_utf8_lossy(data);

    if security_checks && DANGEROUS.is_match(&content) {
        return ValidationResult::invalid(
            ValidationError::DangerousContent {
                format: Format::Svg,
                reason: "SVG file contains potentially dangerous content. Scripts, event handlers, and external references are not allowed.".to_string(),
            },
            Some(Format::Svg),
            size,
        );
    }

    if !SVG_ELEMENT.is_match(&content) {
        return ValidationResult::invalid(
            ValidationError::corrupted(
                Format::Svg,
                "Invalid SVG file structure. The file must contain a valid <svg> element.",
            ),
            Some(Format::Svg),
            size,
        );
    }

    ValidationResult::valid(Format::Svg, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_svg() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10"/></svg>"#;
        assert!(validate_svg(svg, true).is_valid);
    }

    #[test]
    fn event_handler_rejected() {
        let svg = br#"<svg><rect onclick="x()"/></svg>"#;
        let r = validate_svg(svg, true);
        assert!(!r.is_valid);
        assert_eq!(r.error.as_ref().map(|e| e.code()), Some("SECURITY_VIOLATION"));
        assert_eq!(dangerous_matches(&String::from_utf8_lossy(svg)), vec![r"(?i)on\w+\s*="]);
    }

    #[test]
    fn checks_can_be_disabled() {
        let svg = b"<svg><script>alert(1)</script></svg>";
        assert!(!validate_svg(svg, true).is_valid);
        assert!(validate_svg(svg, false).is_valid);
    }

    #[test]
    fn missing_root_element() {
        let r = validate_svg(b"<?xml version=\"1.0\"?><g/>", true);
        assert!(!r.is_valid);
        assert_eq!(r.error.as_ref().map(|e| e.code()), Some("CORRUPTED_FILE"));
    }
}
