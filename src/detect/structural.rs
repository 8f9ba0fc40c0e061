//! Field-level probes for formats without a fixed leading magic number.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::bytes::{bytes_at, read_u16_le, read_u32_be, read_u32_le};
use crate::detect::text::text_window;
use crate::format::Format;

/// SFNT versions accepted for TrueType / OpenType / collections.
const SFNT_VERSIONS: [u32; 5] = [
    0x0001_0000, // TrueType
    0x4F54_544F, // 'OTTO'
    0x7472_7565, // 'true'
    0x7479_7031, // 'typ1'
    0x7474_6366, // 'ttcf'
];

const EMR_HEADER: u32 = 0x0000_0001;
/// " EMF" read little-endian.
const ENHMETA_SIGNATURE: u32 = 0x464D_4520;
const EMF_MIN_HEADER: u32 = 88;

const WMF_PLACEABLE_KEY: u32 = 0x9AC6_CDD7;
const WMF_HEADER_WORDS: u16 = 9;
const WMF_MIN_LEN: usize = 22;

const STL_HEADER_LEN: usize = 80;
const STL_TRIANGLE_LEN: u64 = 50;
const STL_MAX_TRIANGLES: u32 = 10_000_000;

static HEAD_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<head[\s>]").expect("valid regex"));
static BODY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<body[\s>]").expect("valid regex"));

/// Run the probes in order; first conclusive one wins.
pub fn probe(data: &[u8]) -> Option<Format> {
    if is_sfnt(data) {
        return Some(Format::Ttf);
    }
    if is_emf(data) {
        return Some(Format::Emf);
    }
    if is_wmf(data) {
        return Some(Format::Wmf);
    }
    if is_cdr(data) {
        return Some(Format::Cdr);
    }
    if is_avif(data) {
        return Some(Format::Avif);
    }
    if is_binary_stl(data) {
        return Some(Format::Stl);
    }
    if has_head_and_body(data) {
        return Some(Format::Html);
    }
    None
}

pub fn is_sfnt(data: &[u8]) -> bool {
    data.len() >= 12 && read_u32_be(data, 0).is_some_and(|v| SFNT_VERSIONS.contains(&v))
}

/// EMR_HEADER record with a plausible header size and the ENHMETA signature.
pub fn is_emf(data: &[u8]) -> bool {
    if data.len() < EMF_MIN_HEADER as usize {
        return false;
    }
    let (Some(record_type), Some(header_size), Some(signature)) = (
        read_u32_le(data, 0),
        read_u32_le(data, 4),
        read_u32_le(data, 40),
    ) else {
        return false;
    };
    record_type == EMR_HEADER
        && header_size >= EMF_MIN_HEADER
        && header_size as usize <= data.len()
        && signature == ENHMETA_SIGNATURE
}

/// Placeable (Aldus) header, or a bare METAHEADER in memory / on disk.
pub fn is_wmf(data: &[u8]) -> bool {
    if data.len() < WMF_MIN_LEN {
        return false;
    }
    if read_u32_le(data, 0) == Some(WMF_PLACEABLE_KEY) {
        return true;
    }
    matches!(
        (read_u16_le(data, 0), read_u16_le(data, 2)),
        (Some(1 | 2), Some(WMF_HEADER_WORDS))
    )
}

/// CorelDRAW: RIFF form type `CDR` followed by a version character.
pub fn is_cdr(data: &[u8]) -> bool {
    bytes_at(data, 0, b"RIFF")
        && data
            .get(8..11)
            .is_some_and(|form| form.eq_ignore_ascii_case(b"CDR"))
}

/// `ftyp` box whose major brand is AVIF, box size at 0..4.
pub fn is_avif(data: &[u8]) -> bool {
    data.len() >= 12
        && bytes_at(data, 4, b"ftyp")
        && (bytes_at(data, 8, b"avif") || bytes_at(data, 8, b"avis"))
}

/// 80-byte header, triangle count, then 50 bytes per triangle.
pub fn is_binary_stl(data: &[u8]) -> bool {
    if data.len() < STL_HEADER_LEN + 4 {
        return false;
    }
    let Some(triangles) = read_u32_le(data, STL_HEADER_LEN) else {
        return false;
    };
    if triangles == 0 || triangles >= STL_MAX_TRIANGLES {
        return false;
    }
    let expected = (STL_HEADER_LEN as u64 + 4) + u64::from(triangles) * STL_TRIANGLE_LEN;
    data.len() as u64 >= expected.min(1000)
}

fn has_head_and_body(data: &[u8]) -> bool {
    let text = text_window(data);
    HEAD_TAG.is_match(&text) && BODY_TAG.is_match(&text)
}
