//! Format tags and their MIME / extension mapping.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

/// Every format the validator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Format {
    Png,
    Jpg,
    Gif,
    Webp,
    Bmp,
    Svg,
    Pdf,
    Ico,
    Tiff,
    Eps,
    Ai,
    Dxf,
    Stl,
    Avif,
    Cdr,
    Mp4,
    Html,
    Ttf,
    Emf,
    Wmf,
}

/// MIME type → format. The first entry for a format is its canonical MIME type.
const MIME_TYPES: &[(&str, Format)] = &[
    ("image/png", Format::Png),
    ("image/jpeg", Format::Jpg),
    ("image/jpg", Format::Jpg),
    ("image/gif", Format::Gif),
    ("image/webp", Format::Webp),
    ("image/bmp", Format::Bmp),
    ("image/svg+xml", Format::Svg),
    ("application/pdf", Format::Pdf),
    ("image/x-icon", Format::Ico),
    ("image/tiff", Format::Tiff),
    ("application/postscript", Format::Eps),
    ("application/illustrator", Format::Ai),
    ("application/x-illustrator", Format::Ai),
    ("application/dxf", Format::Dxf),
    ("model/stl", Format::Stl),
    ("image/avif", Format::Avif),
    ("application/x-coreldraw", Format::Cdr),
    ("video/mp4", Format::Mp4),
    ("text/html", Format::Html),
    ("font/ttf", Format::Ttf),
    ("application/x-font-ttf", Format::Ttf),
    ("font/truetype", Format::Ttf),
    ("image/x-emf", Format::Emf),
    ("application/x-emf", Format::Emf),
    ("image/x-wmf", Format::Wmf),
    ("application/x-wmf", Format::Wmf),
];

impl Format {
    pub const ALL: [Format; 20] = [
        Format::Png,
        Format::Jpg,
        Format::Gif,
        Format::Webp,
        Format::Bmp,
        Format::Svg,
        Format::Pdf,
        Format::Ico,
        Format::Tiff,
        Format::Eps,
        Format::Ai,
        Format::Dxf,
        Format::Stl,
        Format::Avif,
        Format::Cdr,
        Format::Mp4,
        Format::Html,
        Format::Ttf,
        Format::Emf,
        Format::Wmf,
    ];

    /// Lowercase tag, which is also the preferred file extension.
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Jpg => "jpg",
            Format::Gif => "gif",
            Format::Webp => "webp",
            Format::Bmp => "bmp",
            Format::Svg => "svg",
            Format::Pdf => "pdf",
            Format::Ico => "ico",
            Format::Tiff => "tiff",
            Format::Eps => "eps",
            Format::Ai => "ai",
            Format::Dxf => "dxf",
            Format::Stl => "stl",
            Format::Avif => "avif",
            Format::Cdr => "cdr",
            Format::Mp4 => "mp4",
            Format::Html => "html",
            Format::Ttf => "ttf",
            Format::Emf => "emf",
            Format::Wmf => "wmf",
        }
    }

    /// Short label for display (e.g. "PNG", "TTF/OTF").
    pub fn label(self) -> &'static str {
        match self {
            Format::Png => "PNG",
            Format::Jpg => "JPEG",
            Format::Gif => "GIF",
            Format::Webp => "WebP",
            Format::Bmp => "BMP",
            Format::Svg => "SVG",
            Format::Pdf => "PDF",
            Format::Ico => "ICO",
            Format::Tiff => "TIFF",
            Format::Eps => "EPS",
            Format::Ai => "AI",
            Format::Dxf => "DXF",
            Format::Stl => "STL",
            Format::Avif => "AVIF",
            Format::Cdr => "CDR",
            Format::Mp4 => "MP4",
            Format::Html => "HTML",
            Format::Ttf => "TTF/OTF",
            Format::Emf => "EMF",
            Format::Wmf => "WMF",
        }
    }

    /// Canonical MIME type; every format has at least one entry in the table.
    pub fn mime_type(self) -> &'static str {
        MIME_TYPES
            .iter()
            .find(|(_, f)| *f == self)
            .map(|(m, _)| *m)
            .unwrap_or("application/octet-stream")
    }

    /// Look up a declared MIME type (case-insensitive, parameters like `; charset=` ignored).
    pub fn from_mime(mime: &str) -> Option<Format> {
        let essence = mime.split(';').next().unwrap_or("").trim();
        MIME_TYPES
            .iter()
            .find(|(m, _)| m.eq_ignore_ascii_case(essence))
            .map(|(_, f)| *f)
    }

    /// Look up a bare extension such as `"PNG"` or `"jpeg"` (no leading dot).
    pub fn from_extension(ext: &str) -> Option<Format> {
        let ext = ext.trim_start_matches('.');
        if ext.eq_ignore_ascii_case("jpeg") {
            return Some(Format::Jpg);
        }
        Format::ALL
            .iter()
            .copied()
            .find(|f| f.as_str().eq_ignore_ascii_case(ext))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::from_extension(s.trim()).ok_or_else(|| Error::UnknownFormat(s.to_string()))
    }
}

/// Same rules as [`FromStr`]: any case, `jpeg` accepted for `jpg`.
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Format {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}

/// Small ordered set of formats used as an allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FormatSet(Vec<Format>);

impl FormatSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// All 20 formats.
    pub fn all() -> Self {
        Self(Format::ALL.to_vec())
    }

    pub fn insert(&mut self, format: Format) {
        if !self.0.contains(&format) {
            self.0.push(format);
        }
    }

    pub fn contains(&self, format: Format) -> bool {
        self.0.contains(&format)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Format> + '_ {
        self.0.iter().copied()
    }

    /// Comma-separated tags in insertion order, e.g. `"png, jpg"`.
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parse a comma-separated list such as `"png,jpeg, svg"`.
    pub fn parse_list(list: &str) -> Result<Self, Error> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl FromIterator<Format> for FormatSet {
    fn from_iter<I: IntoIterator<Item = Format>>(iter: I) -> Self {
        let mut set = FormatSet::new();
        for f in iter {
            set.insert(f);
        }
        set
    }
}

impl<const N: usize> From<[Format; N]> for FormatSet {
    fn from(formats: [Format; N]) -> Self {
        formats.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_lookup_is_case_insensitive() {
        assert_eq!(Format::from_mime("IMAGE/PNG"), Some(Format::Png));
        assert_eq!(Format::from_mime("text/html; charset=utf-8"), Some(Format::Html));
        assert_eq!(Format::from_mime("application/zip"), None);
    }

    #[test]
    fn canonical_mime_is_first_entry() {
        assert_eq!(Format::Jpg.mime_type(), "image/jpeg");
        assert_eq!(Format::Ttf.mime_type(), "font/ttf");
        for f in Format::ALL {
            assert_ne!(f.mime_type(), "application/octet-stream", "{f} has no MIME type");
        }
    }

    #[test]
    fn jpeg_alias_parses() {
        assert_eq!("jpeg".parse::<Format>().unwrap(), Format::Jpg);
        assert_eq!("JPG".parse::<Format>().unwrap(), Format::Jpg);
        assert!("zip".parse::<Format>().is_err());
    }

    #[test]
    fn set_parse_dedups() {
        let set = FormatSet::parse_list("png, jpeg,jpg ,,svg").unwrap();
        assert_eq!(set.joined(), "png, jpg, svg");
    }
}
