//! Adobe Illustrator markers inside PDF / PostScript documents.
//!
//! Illustrator saves `.ai` files as PDF (modern) or PostScript (legacy) with a
//! private payload, so the leading signature alone says `pdf` or `eps`. The
//! creator / producer comments near the top of the file are what give it away.

use crate::bytes::{contains, head};

/// How far into the document markers are searched.
pub const MARKER_WINDOW: usize = 2048;

#[derive(Debug, Clone, Copy)]
enum Marker {
    /// Exact byte sequence.
    Literal(&'static [u8]),
    /// ASCII case-insensitive sequence.
    AnyCase(&'static [u8]),
    /// Both sequences somewhere in the window.
    Pair(&'static [u8], &'static [u8]),
}

impl Marker {
    fn hit(self, window: &[u8]) -> bool {
        match self {
            Marker::Literal(needle) => contains(window, needle),
            Marker::AnyCase(needle) => window
                .windows(needle.len())
                .any(|w| w.eq_ignore_ascii_case(needle)),
            Marker::Pair(a, b) => contains(window, a) && contains(window, b),
        }
    }
}

/// Any hit classifies the document as Illustrator.
const MARKERS: &[(&str, Marker)] = &[
    ("creator comment", Marker::Literal(b"%%Creator: Adobe Illustrator")),
    ("AI comment", Marker::Literal(b"%%AI")),
    ("creator entry", Marker::Literal(b"/Creator (Adobe Illustrator)")),
    ("creator entry", Marker::Literal(b"/Creator(Adobe Illustrator)")),
    ("for comment", Marker::Literal(b"%%For: (Adobe Illustrator)")),
    ("AI8 private data", Marker::Literal(b"AI8_")),
    ("AI9 private data", Marker::Literal(b"AI9_")),
    ("title with .ai", Marker::Pair(b"%%Title:", b".ai")),
    ("producer entry", Marker::Pair(b"/Producer", b"Illustrator")),
    ("application name", Marker::AnyCase(b"adobe illustrator")),
];

/// Name of the first Illustrator marker found in the leading window, if any.
pub fn find_marker(data: &[u8]) -> Option<&'static str> {
    let window = head(data, MARKER_WINDOW);
    MARKERS
        .iter()
        .find(|(_, marker)| marker.hit(window))
        .map(|(name, _)| *name)
}

#[inline]
pub fn is_illustrator(data: &[u8]) -> bool {
    find_marker(data).is_some()
}
