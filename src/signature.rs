//! Leading-byte signatures, checked in declaration order.

use crate::bytes::bytes_at;
use crate::format::Format;

/// Signatures for one format plus an optional check on bytes past the prefix.
pub struct SignatureEntry {
    pub format: Format,
    pub signatures: &'static [&'static [u8]],
    secondary: Option<fn(&[u8]) -> bool>,
}

impl SignatureEntry {
    /// True when `data` starts with one of the signatures and passes the secondary check.
    pub fn matches(&self, data: &[u8]) -> bool {
        self.signatures.iter().any(|sig| data.starts_with(sig))
            && self.secondary.map_or(true, |check| check(data))
    }
}

/// RIFF containers carry their form type at 8..12.
fn riff_is_webp(data: &[u8]) -> bool {
    bytes_at(data, 8, b"WEBP")
}

/// `ftyp` boxes with an AVIF major brand belong to the structural AVIF check.
fn ftyp_is_not_avif(data: &[u8]) -> bool {
    !(bytes_at(data, 8, b"avif") || bytes_at(data, 8, b"avis"))
}

/// The table order is the primary tie-break between formats.
pub static SIGNATURES: &[SignatureEntry] = &[
    SignatureEntry {
        format: Format::Png,
        signatures: &[&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]],
        secondary: None,
    },
    SignatureEntry {
        format: Format::Jpg,
        signatures: &[
            &[0xFF, 0xD8, 0xFF, 0xE0], // JFIF
            &[0xFF, 0xD8, 0xFF, 0xE1], // EXIF
            &[0xFF, 0xD8, 0xFF, 0xE2], // ICC
            &[0xFF, 0xD8, 0xFF, 0xE8], // SPIFF
        ],
        secondary: None,
    },
    SignatureEntry {
        format: Format::Gif,
        signatures: &[b"GIF87a", b"GIF89a"],
        secondary: None,
    },
    SignatureEntry {
        format: Format::Webp,
        signatures: &[b"RIFF"],
        secondary: Some(riff_is_webp),
    },
    SignatureEntry {
        format: Format::Bmp,
        signatures: &[b"BM"],
        secondary: None,
    },
    SignatureEntry {
        format: Format::Pdf,
        signatures: &[b"%PDF-"],
        secondary: None,
    },
    SignatureEntry {
        format: Format::Ico,
        signatures: &[&[0x00, 0x00, 0x01, 0x00]],
        secondary: None,
    },
    SignatureEntry {
        format: Format::Tiff,
        signatures: &[b"II*\0", b"MM\0*"],
        secondary: None,
    },
    SignatureEntry {
        format: Format::Mp4,
        signatures: &[
            &[0x00, 0x00, 0x00, 0x18, b'f', b't', b'y', b'p'],
            &[0x00, 0x00, 0x00, 0x1C, b'f', b't', b'y', b'p'],
        ],
        secondary: Some(ftyp_is_not_avif),
    },
    SignatureEntry {
        format: Format::Ttf,
        signatures: &[&[0x00, 0x01, 0x00, 0x00], b"true", b"OTTO"],
        secondary: None,
    },
];

/// First entry whose signature matches, in table order.
pub fn match_signature(data: &[u8]) -> Option<Format> {
    SIGNATURES
        .iter()
        .find(|entry| entry.matches(data))
        .map(|entry| entry.format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_signatures_detect_their_format() {
        for entry in SIGNATURES {
            for sig in entry.signatures {
                let mut buf = sig.to_vec();
                buf.resize(32, 0);
                if entry.format == Format::Webp {
                    buf[8..12].copy_from_slice(b"WEBP");
                }
                assert_eq!(match_signature(&buf), Some(entry.format), "{:02X?}", sig);
            }
        }
    }

    #[test]
    fn riff_without_webp_is_unmatched() {
        let mut buf = b"RIFF\0\0\0\0WAVE".to_vec();
        buf.resize(16, 0);
        assert_eq!(match_signature(&buf), None);
    }

    #[test]
    fn avif_brand_skips_mp4() {
        let buf = [0, 0, 0, 0x1C, b'f', b't', b'y', b'p', b'a', b'v', b'i', b'f'];
        assert_eq!(match_signature(&buf), None);
    }
}
