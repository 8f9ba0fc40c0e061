//! TTF/OTF: SFNT version, table count, and table directory bounds.

use tracing::warn;

use crate::bytes::{read_u16_be, read_u32_be};
use crate::format::Format;
use crate::result::{ValidationError, ValidationResult};

/// TrueType outlines.
pub const TTF_VERSION_1: u32 = 0x0001_0000;
/// Apple 'true'.
pub const TTF_VERSION_TRUE: u32 = 0x7472_7565;
/// OpenType with CFF outlines.
pub const OTF_VERSION_OTTO: u32 = 0x4F54_544F;
/// TrueType collection header.
pub const TTC_TAG: u32 = 0x7474_6366;

const VALID_VERSIONS: [u32; 4] = [TTF_VERSION_1, TTF_VERSION_TRUE, OTF_VERSION_OTTO, TTC_TAG];

/// Offset table (12) then 16-byte table records.
const OFFSET_TABLE_LEN: usize = 12;
const TABLE_ENTRY_LEN: usize = 16;
const MAX_TABLES: u16 = 100;

/// One table record (tag, offset, length).
#[derive(Debug, Clone, Copy)]
pub struct TtfTable {
    pub tag: [u8; 4],
    pub offset: u32,
    pub length: u32,
}

impl TtfTable {
    pub fn tag_str(&self) -> String {
        String::from_utf8_lossy(&self.tag).into_owned()
    }

    /// Table lies entirely inside a buffer of `len` bytes.
    pub fn within(&self, len: usize) -> bool {
        (self.offset as usize)
            .checked_add(self.length as usize)
            .is_some_and(|end| end <= len)
    }
}

/// Table records present in the buffer (a truncated directory yields fewer).
pub fn table_directory(data: &[u8], num_tables: u16) -> Vec<TtfTable> {
    let mut tables = Vec::with_capacity(num_tables as usize);
    for i in 0..num_tables as usize {
        let off = OFFSET_TABLE_LEN + i * TABLE_ENTRY_LEN;
        let (Some(tag), Some(offset), Some(length)) = (
            data.get(off..off + 4),
            read_u32_be(data, off + 8),
            read_u32_be(data, off + 12),
        ) else {
            break;
        };
        tables.push(TtfTable {
            tag: [tag[0], tag[1], tag[2], tag[3]],
            offset,
            length,
        });
    }
    tables
}

fn invalid(reason: &str, size: u64) -> ValidationResult {
    ValidationResult::invalid(
        ValidationError::corrupted(Format::Ttf, reason),
        Some(Format::Ttf),
        size,
    )
}

pub fn validate_ttf(data: &[u8]) -> ValidationResult {
    let size = data.len() as u64;

    if data.len() < OFFSET_TABLE_LEN {
        return invalid(
            "Invalid font file. The file is too small to be a valid TTF/OTF font.",
            size,
        );
    }

    let version = read_u32_be(data, 0).unwrap_or_default();
    if !VALID_VERSIONS.contains(&version) {
        return invalid(
            "Invalid font file format. The file must be a valid TrueType (TTF) or OpenType (OTF) font.",
            size,
        );
    }

    let Some(num_tables) = read_u16_be(data, 4) else {
        return invalid(
            "Invalid font file. Unable to read font table information.",
            size,
        );
    };
    if num_tables == 0 || num_tables > MAX_TABLES {
        return invalid(
            "Invalid font file structure. The font table count is invalid.",
            size,
        );
    }

    let mut warnings = Vec::new();
    // Collections store font offsets here, not table records.
    if version != TTC_TAG {
        let tables = table_directory(data, num_tables);
        if tables.len() < num_tables as usize {
            warnings.push(format!(
                "font table directory truncated ({} of {} records present)",
                tables.len(),
                num_tables
            ));
        }
        for table in tables.iter().filter(|t| !t.within(data.len())) {
            warnings.push(format!(
                "font table '{}' extends past end of file",
                table.tag_str()
            ));
        }
    }
    for w in &warnings {
        warn!("{}", w);
    }

    ValidationResult::valid(Format::Ttf, size).with_warnings(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font(num_tables: u16) -> Vec<u8> {
        let mut v = vec![0u8; 256];
        v[0..4].copy_from_slice(&TTF_VERSION_1.to_be_bytes());
        v[4..6].copy_from_slice(&num_tables.to_be_bytes());
        v
    }

    #[test]
    fn well_formed_directory() {
        let mut v = font(1);
        v[12..16].copy_from_slice(b"head");
        v[20..24].copy_from_slice(&32u32.to_be_bytes());
        v[24..28].copy_from_slice(&54u32.to_be_bytes());
        let r = validate_ttf(&v);
        assert!(r.is_valid);
        assert!(r.warnings.is_empty(), "{:?}", r.warnings);
    }

    #[test]
    fn table_past_end_warns() {
        let mut v = font(1);
        v[12..16].copy_from_slice(b"glyf");
        v[20..24].copy_from_slice(&200u32.to_be_bytes());
        v[24..28].copy_from_slice(&4096u32.to_be_bytes());
        let r = validate_ttf(&v);
        assert!(r.is_valid);
        assert!(r.warnings.iter().any(|w| w.contains("'glyf'")));
    }

    #[test]
    fn zero_tables_rejected() {
        let r = validate_ttf(&font(0));
        assert!(!r.is_valid);
        assert_eq!(
            r.error_message().as_deref(),
            Some("Invalid font file structure. The font table count is invalid.")
        );
    }

    #[test]
    fn too_many_tables_rejected() {
        assert!(!validate_ttf(&font(101)).is_valid);
        assert!(validate_ttf(&font(100)).is_valid);
    }

    #[test]
    fn typ1_is_not_accepted_here() {
        let mut v = font(3);
        v[0..4].copy_from_slice(b"typ1");
        assert!(!validate_ttf(&v).is_valid);
    }
}
