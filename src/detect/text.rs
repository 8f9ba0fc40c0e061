//! Text-content sniffing for formats identified by markup or keywords.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::bytes::head;
use crate::detect::illustrator::is_illustrator;
use crate::format::Format;

/// Bytes decoded for text sniffing.
pub const TEXT_WINDOW: usize = 1000;

static SVG_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<svg[^>]*>").expect("valid regex"));
static HTML_DOCTYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<!DOCTYPE\s+html").expect("valid regex"));
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<html[^>]*>").expect("valid regex"));

/// Leading window decoded as UTF-8, invalid sequences replaced.
pub fn text_window(data: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(head(data, TEXT_WINDOW))
}

/// Classify the leading window as markup / PostScript / PDF / DXF / ASCII STL.
pub fn sniff(data: &[u8]) -> Option<Format> {
    let text = text_window(data);

    if SVG_TAG.is_match(&text) || (text.contains("<?xml") && text.contains("svg")) {
        return Some(Format::Svg);
    }

    if HTML_DOCTYPE.is_match(&text) || HTML_TAG.is_match(&text) {
        return Some(Format::Html);
    }

    if text.starts_with("%!PS") || text.starts_with("%%") {
        return Some(if is_illustrator(data) {
            Format::Ai
        } else {
            Format::Eps
        });
    }

    // %PDF not at offset 0 (BOM, whitespace or a mail header in front of it).
    if text.contains("%PDF") {
        return Some(if is_illustrator(data) {
            Format::Ai
        } else {
            Format::Pdf
        });
    }

    if text.contains("0\nSECTION") || text.contains("0\r\nSECTION") || text.starts_with("  0\nSECTION") {
        return Some(Format::Dxf);
    }

    if is_ascii_stl(&text) {
        return Some(Format::Stl);
    }

    None
}

fn is_ascii_stl(text: &str) -> bool {
    let starts_with_solid = text
        .get(..5)
        .is_some_and(|s| s.eq_ignore_ascii_case("solid"));
    starts_with_solid && (text.contains("facet normal") || text.contains("vertex"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_prolog_svg() {
        let doc = b"<?xml version=\"1.0\"?>\n<!-- an svg drawing -->";
        assert_eq!(sniff(doc), Some(Format::Svg));
    }

    #[test]
    fn uppercase_doctype() {
        assert_eq!(sniff(b"<!DOCTYPE HTML>\n<p>hi</p>"), Some(Format::Html));
    }

    #[test]
    fn postscript_and_illustrator_postscript() {
        assert_eq!(sniff(b"%!PS-Adobe-3.0 EPSF-3.0\n"), Some(Format::Eps));
        assert_eq!(
            sniff(b"%!PS-Adobe-3.0\n%%Creator: Adobe Illustrator(R) 8.0\n"),
            Some(Format::Ai)
        );
    }

    #[test]
    fn dxf_section() {
        assert_eq!(sniff(b"  0\nSECTION\n  2\nHEADER\n"), Some(Format::Dxf));
        assert_eq!(sniff(b"999\r\ncomment\r\n0\r\nSECTION\r\n"), Some(Format::Dxf));
    }

    #[test]
    fn ascii_stl() {
        let doc = b"SOLID cube\n  facet normal 0 0 1\n    outer loop\n";
        assert_eq!(sniff(doc), Some(Format::Stl));
        assert_eq!(sniff(b"solid but nothing else"), None);
    }
}
