//! # Padded Message Layout
//!
//! Writes a message into the arena in SHA-256 padded form:
//!
//! ```text
//! base_offset
//! │ data (len bytes) │ 0x80 │ 0x00 ... 0x00 │ be_u64(len * 8) │
//! └──────────────── block_count * 64 bytes ──────────────────┘
//! ```
//!
//! The total is the smallest multiple of 64 that is at least `len + 9`.
//!
//! ## Invariants
//!
//! - Growth, when needed, happens before the first byte is written. A refused
//!   growth leaves the previous arena contents untouched.
//! - The zero run between the marker and the length field is written
//!   explicitly on every call. A shorter message written after a longer one
//!   at the same base offset must not inherit its bytes.
//! - Nothing below `reserved_scratch_bytes` is written.

use wsh_core::{
    mem_pages, msg_blocks, HashError, BLOCK_SIZE, END_OF_DATA_MARKER, LENGTH_FIELD_SIZE,
    PADDING_OVERHEAD,
};

use crate::arena::MemoryArena;

/// Length of the padded form of a `data_len`-byte message.
pub fn padded_len(data_len: usize) -> Option<usize> {
    let needed = data_len.checked_add(PADDING_OVERHEAD)?;
    msg_blocks(needed).checked_mul(BLOCK_SIZE)
}

/// Write `data` and its SHA-256 padding at `base_offset`, growing the arena
/// if the padded message runs past its end. Returns the number of 64-byte
/// blocks written.
pub fn write_padded_message(
    arena: &mut MemoryArena,
    base_offset: usize,
    reserved_scratch_bytes: usize,
    data: &[u8],
) -> Result<u32, HashError> {
    if base_offset < reserved_scratch_bytes {
        return Err(HashError::InvalidLayout(format!(
            "message base {base_offset:#x} overlaps the reserved scratch region ending at {reserved_scratch_bytes:#x}"
        )));
    }

    let too_large = || HashError::MessageTooLarge(data.len());
    let total_len = padded_len(data.len()).ok_or_else(too_large)?;
    let block_count = u32::try_from(total_len / BLOCK_SIZE).map_err(|_| too_large())?;
    let bit_len = u64::try_from(data.len())
        .ok()
        .and_then(|len| len.checked_mul(8))
        .ok_or_else(too_large)?;
    let end = base_offset.checked_add(total_len).ok_or_else(too_large)?;

    if end > arena.capacity() {
        let shortfall = end - arena.capacity();
        let pages = mem_pages(shortfall);
        tracing::debug!(
            message_len = data.len(),
            shortfall,
            pages,
            "padded message exceeds arena, growing"
        );
        arena.grow_by(pages)?;
    }

    let marker_offset = base_offset + data.len();
    let length_offset = end - LENGTH_FIELD_SIZE;

    arena.write_bytes(base_offset, data)?;
    arena.write_bytes(marker_offset, &[END_OF_DATA_MARKER])?;
    arena.zero_fill(marker_offset + 1, length_offset - (marker_offset + 1))?;
    arena.write_u64_be(length_offset, bit_len)?;

    Ok(block_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wsh_core::{MESSAGE_BASE_OFFSET, PAGE_SIZE, RESERVED_SCRATCH_BYTES};

    fn layout(arena: &mut MemoryArena, data: &[u8]) -> Result<u32, HashError> {
        write_padded_message(arena, MESSAGE_BASE_OFFSET, RESERVED_SCRATCH_BYTES, data)
    }

    fn padded<'a>(arena: &'a MemoryArena, blocks: u32) -> &'a [u8] {
        arena
            .view(MESSAGE_BASE_OFFSET, blocks as usize * BLOCK_SIZE)
            .unwrap()
    }

    #[test]
    fn empty_message_is_one_block() {
        let mut arena = MemoryArena::new(2).unwrap();
        let blocks = layout(&mut arena, b"").unwrap();
        assert_eq!(blocks, 1);
        let msg = padded(&arena, blocks);
        assert_eq!(msg[0], 0x80);
        assert!(msg[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn abc_matches_reference_padding() {
        let mut arena = MemoryArena::new(2).unwrap();
        let blocks = layout(&mut arena, b"abc").unwrap();
        assert_eq!(blocks, 1);
        let msg = padded(&arena, blocks);
        assert_eq!(&msg[..4], &[b'a', b'b', b'c', 0x80]);
        assert!(msg[4..56].iter().all(|&b| b == 0));
        assert_eq!(&msg[56..], &24u64.to_be_bytes());
    }

    #[test]
    fn fifty_five_bytes_fit_one_block() {
        let mut arena = MemoryArena::new(2).unwrap();
        let blocks = layout(&mut arena, &[0x61; 55]).unwrap();
        assert_eq!(blocks, 1);
        let msg = padded(&arena, blocks);
        assert_eq!(msg[55], 0x80);
        assert_eq!(&msg[56..], &440u64.to_be_bytes());
    }

    #[test]
    fn fifty_six_bytes_need_two_blocks() {
        let mut arena = MemoryArena::new(2).unwrap();
        let blocks = layout(&mut arena, &[0x61; 56]).unwrap();
        assert_eq!(blocks, 2);
        let msg = padded(&arena, blocks);
        assert_eq!(msg[56], 0x80);
        assert!(msg[57..120].iter().all(|&b| b == 0));
        assert_eq!(&msg[120..], &448u64.to_be_bytes());
    }

    #[test]
    fn scratch_region_is_untouched() {
        let mut arena = MemoryArena::new(2).unwrap();
        arena.write_bytes(0, &[0xaa; 32]).unwrap();
        layout(&mut arena, b"hello").unwrap();
        assert_eq!(arena.view(0, 32).unwrap(), &[0xaa; 32]);
        assert!(arena
            .view(32, RESERVED_SCRATCH_BYTES - 32)
            .unwrap()
            .iter()
            .all(|&b| b == 0));
    }

    #[test]
    fn exactly_full_message_page_does_not_grow() {
        let mut arena = MemoryArena::new(2).unwrap();
        let blocks = layout(&mut arena, &vec![1u8; PAGE_SIZE - 9]).unwrap();
        assert_eq!(blocks as usize, PAGE_SIZE / BLOCK_SIZE);
        assert_eq!(arena.pages(), 2);
    }

    #[test]
    fn one_byte_over_grows_by_one_page() {
        let mut arena = MemoryArena::new(2).unwrap();
        let blocks = layout(&mut arena, &vec![1u8; PAGE_SIZE - 8]).unwrap();
        assert_eq!(blocks as usize, PAGE_SIZE / BLOCK_SIZE + 1);
        assert_eq!(arena.pages(), 3);
    }

    #[test]
    fn growth_is_sized_to_shortfall() {
        let mut arena = MemoryArena::new(2).unwrap();
        layout(&mut arena, &vec![1u8; 3 * PAGE_SIZE]).unwrap();
        // 3 pages of data + 9 bytes needs 4 message pages; 1 already exists.
        assert_eq!(arena.pages(), 5);
        // A smaller message afterwards reuses the grown capacity.
        layout(&mut arena, &vec![1u8; 2 * PAGE_SIZE]).unwrap();
        assert_eq!(arena.pages(), 5);
    }

    #[test]
    fn shorter_message_after_longer_has_clean_padding() {
        let mut arena = MemoryArena::new(2).unwrap();
        layout(&mut arena, &[0xff; 200]).unwrap();
        let blocks = layout(&mut arena, b"abc").unwrap();
        assert_eq!(blocks, 1);
        let msg = padded(&arena, blocks);
        assert_eq!(msg[3], 0x80);
        assert!(msg[4..56].iter().all(|&b| b == 0));
        assert_eq!(&msg[56..], &24u64.to_be_bytes());
    }

    #[test]
    fn refused_growth_writes_nothing() {
        let mut arena = MemoryArena::with_limit(2, 2).unwrap();
        layout(&mut arena, b"previous").unwrap();
        let err = layout(&mut arena, &vec![7u8; PAGE_SIZE]).unwrap_err();
        assert!(matches!(err, HashError::Allocation { .. }));
        assert_eq!(arena.view(MESSAGE_BASE_OFFSET, 9).unwrap(), b"previous\x80");
    }

    #[test]
    fn base_below_scratch_is_rejected() {
        let mut arena = MemoryArena::new(2).unwrap();
        let err = write_padded_message(&mut arena, 0x100, RESERVED_SCRATCH_BYTES, b"x").unwrap_err();
        assert!(matches!(err, HashError::InvalidLayout(_)));
    }

    #[test]
    fn higher_base_offset_still_grows_enough() {
        let mut arena = MemoryArena::new(2).unwrap();
        let base = MESSAGE_BASE_OFFSET + 0x8000;
        let blocks = write_padded_message(&mut arena, base, RESERVED_SCRATCH_BYTES, &[3u8; 0x8000]).unwrap();
        assert_eq!(blocks as usize, (0x8000 + 64) / 64);
        assert_eq!(arena.pages(), 3);
    }

    #[test]
    fn padded_len_values() {
        assert_eq!(padded_len(0), Some(64));
        assert_eq!(padded_len(55), Some(64));
        assert_eq!(padded_len(56), Some(128));
        assert_eq!(padded_len(usize::MAX), None);
    }
}
