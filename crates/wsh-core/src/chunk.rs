//! # Chunk Arithmetic
//!
//! Ceiling division of a quantity into fixed-size chunks. The same rule sizes
//! arena growth (chunks of `PAGE_SIZE`) and counts message blocks (chunks of
//! `BLOCK_SIZE`). A zero chunk size is unrepresentable.

use std::num::NonZeroUsize;

use crate::layout::{BLOCK_SIZE, PAGE_SIZE};

/// Minimal number of `chunk_size` chunks covering `quantity`.
pub const fn chunks_of(chunk_size: NonZeroUsize, quantity: usize) -> usize {
    let size = chunk_size.get();
    quantity / size + (quantity % size != 0) as usize
}

/// Pages needed to hold `bytes`.
pub const fn mem_pages(bytes: usize) -> usize {
    // PAGE_SIZE is a non-zero literal.
    match NonZeroUsize::new(PAGE_SIZE) {
        Some(size) => chunks_of(size, bytes),
        None => unreachable!(),
    }
}

/// 64-byte message blocks needed to hold `bytes`.
pub const fn msg_blocks(bytes: usize) -> usize {
    match NonZeroUsize::new(BLOCK_SIZE) {
        Some(size) => chunks_of(size, bytes),
        None => unreachable!(),
    }
}
