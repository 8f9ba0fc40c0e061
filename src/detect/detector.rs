//! Signature → text → structure dispatch.

use tracing::debug;

use super::{illustrator, structural, text};
use crate::format::Format;
use crate::signature::match_signature;

/// Which pass identified the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Method {
    Signature,
    Text,
    Structure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Detection {
    pub format: Format,
    pub method: Method,
    /// Illustrator marker that turned a PDF / PostScript match into `ai`.
    pub illustrator_marker: Option<&'static str>,
}

/// Detect a format and report how it was found.
pub fn detect(data: &[u8]) -> Option<Detection> {
    if data.is_empty() {
        return None;
    }

    if let Some(format) = match_signature(data) {
        if format == Format::Pdf {
            if let Some(marker) = illustrator::find_marker(data) {
                debug!(marker, "PDF signature with Illustrator marker, classifying as ai");
                return Some(Detection {
                    format: Format::Ai,
                    method: Method::Signature,
                    illustrator_marker: Some(marker),
                });
            }
        }
        return Some(Detection {
            format,
            method: Method::Signature,
            illustrator_marker: None,
        });
    }

    if let Some(format) = text::sniff(data) {
        let illustrator_marker = if format == Format::Ai {
            illustrator::find_marker(data)
        } else {
            None
        };
        return Some(Detection {
            format,
            method: Method::Text,
            illustrator_marker,
        });
    }

    if let Some(format) = structural::probe(data) {
        return Some(Detection {
            format,
            method: Method::Structure,
            illustrator_marker: None,
        });
    }

    debug!(
        "no format matched, first bytes: {:02X?}",
        &data[..data.len().min(8)]
    );
    None
}

/// Detect format from content alone (no name or MIME type needed).
#[inline]
pub fn detect_format(data: &[u8]) -> Option<Format> {
    detect(data).map(|d| d.format)
}

/// Buffer starts with a PDF header (possibly an Illustrator document).
#[inline]
pub fn has_pdf_header(data: &[u8]) -> bool {
    data.starts_with(b"%PDF-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_unknown() {
        assert_eq!(detect_format(&[]), None);
    }

    #[test]
    fn illustrator_pdf_reports_marker() {
        let d = detect(b"%PDF-1.6\n%%AI8_CreatorVersion: 24.0\n").unwrap();
        assert_eq!(d.format, Format::Ai);
        assert_eq!(d.method, Method::Signature);
        assert!(d.illustrator_marker.is_some());
    }

    #[test]
    fn signatures_beat_text() {
        // PNG bytes followed by markup still detect as PNG.
        let mut v = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        v.extend_from_slice(b"<svg></svg>");
        assert_eq!(detect_format(&v), Some(Format::Png));
    }
}
