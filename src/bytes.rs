//! Bounds-checked integer reads and substring search over raw buffers.

use memchr::memmem;

#[inline]
pub(crate) fn read_u16_be(data: &[u8], offset: usize) -> Option<u16> {
    let b = data.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_be_bytes([b[0], b[1]]))
}

#[inline]
pub(crate) fn read_u16_le(data: &[u8], offset: usize) -> Option<u16> {
    let b = data.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_le_bytes([b[0], b[1]]))
}

#[inline]
pub(crate) fn read_u32_be(data: &[u8], offset: usize) -> Option<u32> {
    let b = data.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

#[inline]
pub(crate) fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let b = data.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

/// `data[range] == expected`, false when out of bounds.
#[inline]
pub(crate) fn bytes_at(data: &[u8], offset: usize, expected: &[u8]) -> bool {
    offset
        .checked_add(expected.len())
        .and_then(|end| data.get(offset..end))
        .is_some_and(|b| b == expected)
}

#[inline]
pub(crate) fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    memmem::find(haystack, needle).is_some()
}

/// First `n` bytes (or all of them).
#[inline]
pub(crate) fn head(data: &[u8], n: usize) -> &[u8] {
    &data[..data.len().min(n)]
}

/// Last `n` bytes (or all of them).
#[inline]
pub(crate) fn tail(data: &[u8], n: usize) -> &[u8] {
    &data[data.len().saturating_sub(n)..]
}
