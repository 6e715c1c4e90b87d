//! # Memory Arena
//!
//! An owned, page-granular byte buffer standing in for the engine's linear
//! memory.
//!
//! ## Invariants
//!
//! - `capacity() == pages() * PAGE_SIZE` at all times.
//! - Capacity never shrinks. New pages are zero-filled.
//! - A failed `grow_by` leaves the arena exactly as it was.
//! - 32-bit words are stored little-endian, the native word order of
//!   WebAssembly linear memory. Reads return the raw words the engine wrote.

use wsh_core::{HashError, MIN_PAGES, PAGE_SIZE, WASM32_MAX_PAGES};

/// Growable linear memory shared between the host and a digest engine.
#[derive(Debug, Clone)]
pub struct MemoryArena {
    bytes: Vec<u8>,
    max_pages: usize,
}

impl MemoryArena {
    /// Allocate `initial_pages` zeroed pages, limited to the 32-bit
    /// WebAssembly maximum.
    pub fn new(initial_pages: usize) -> Result<Self, HashError> {
        Self::with_limit(initial_pages, WASM32_MAX_PAGES)
    }

    /// Allocate `initial_pages` zeroed pages with an explicit growth limit.
    pub fn with_limit(initial_pages: usize, max_pages: usize) -> Result<Self, HashError> {
        if initial_pages < MIN_PAGES {
            return Err(HashError::InvalidLayout(format!(
                "arena needs at least {MIN_PAGES} pages, got {initial_pages}"
            )));
        }
        if initial_pages > max_pages {
            return Err(HashError::InvalidLayout(format!(
                "initial pages {initial_pages} exceed the page limit {max_pages}"
            )));
        }

        let mut arena = Self {
            bytes: Vec::new(),
            max_pages,
        };
        arena.grow_by(initial_pages)?;
        Ok(arena)
    }

    /// Current size in pages.
    pub fn pages(&self) -> usize {
        self.bytes.len() / PAGE_SIZE
    }

    /// Page limit this arena refuses to grow past.
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// Current size in bytes.
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Extend by `additional_pages` zeroed pages. Returns the previous page
    /// count, mirroring `memory.grow`.
    pub fn grow_by(&mut self, additional_pages: usize) -> Result<usize, HashError> {
        let current_pages = self.pages();
        if additional_pages == 0 {
            return Ok(current_pages);
        }

        let refused = || HashError::Allocation {
            current_pages,
            requested_pages: additional_pages,
            max_pages: self.max_pages,
        };

        let new_pages = current_pages
            .checked_add(additional_pages)
            .filter(|&pages| pages <= self.max_pages)
            .ok_or_else(refused)?;
        let additional_bytes = additional_pages
            .checked_mul(PAGE_SIZE)
            .ok_or_else(refused)?;

        if let Err(e) = self.bytes.try_reserve_exact(additional_bytes) {
            tracing::warn!(current_pages, additional_pages, error = %e, "arena growth refused by allocator");
            return Err(refused());
        }
        self.bytes.resize(new_pages * PAGE_SIZE, 0);

        tracing::debug!(from = current_pages, to = new_pages, "grew memory arena");
        Ok(current_pages)
    }

    /// Copy `bytes` into the arena at `offset`.
    pub fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> Result<(), HashError> {
        self.view_mut(offset, bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    /// Zero `len` bytes starting at `offset`.
    pub fn zero_fill(&mut self, offset: usize, len: usize) -> Result<(), HashError> {
        self.view_mut(offset, len)?.fill(0);
        Ok(())
    }

    /// Write `value` as 8 big-endian bytes at `offset`.
    pub fn write_u64_be(&mut self, offset: usize, value: u64) -> Result<(), HashError> {
        self.write_bytes(offset, &value.to_be_bytes())
    }

    /// Read `count` consecutive 32-bit words starting at word index
    /// `word_index` (byte offset `word_index * 4`).
    pub fn read_u32_words(&self, word_index: usize, count: usize) -> Result<Vec<u32>, HashError> {
        let (offset, len) = word_span(word_index, count, self.capacity())?;
        let words = self
            .view(offset, len)?
            .chunks_exact(4)
            .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
            .collect();
        Ok(words)
    }

    /// Store `words` consecutively starting at word index `word_index`.
    pub fn write_u32_words(&mut self, word_index: usize, words: &[u32]) -> Result<(), HashError> {
        let (offset, len) = word_span(word_index, words.len(), self.capacity())?;
        let view = self.view_mut(offset, len)?;
        for (slot, word) in view.chunks_exact_mut(4).zip(words) {
            slot.copy_from_slice(&word.to_le_bytes());
        }
        Ok(())
    }

    /// Checked read-only view of `len` bytes at `offset`.
    pub fn view(&self, offset: usize, len: usize) -> Result<&[u8], HashError> {
        let end = self.checked_end(offset, len)?;
        Ok(&self.bytes[offset..end])
    }

    /// Checked mutable view of `len` bytes at `offset`.
    pub fn view_mut(&mut self, offset: usize, len: usize) -> Result<&mut [u8], HashError> {
        let end = self.checked_end(offset, len)?;
        Ok(&mut self.bytes[offset..end])
    }

    /// The whole arena, for engines that mirror it into their own memory.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn checked_end(&self, offset: usize, len: usize) -> Result<usize, HashError> {
        offset
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(HashError::OutOfBounds {
                offset,
                len,
                capacity: self.bytes.len(),
            })
    }
}

fn word_span(word_index: usize, count: usize, capacity: usize) -> Result<(usize, usize), HashError> {
    let out_of_bounds = || HashError::OutOfBounds {
        offset: word_index.saturating_mul(4),
        len: count.saturating_mul(4),
        capacity,
    };
    let offset = word_index.checked_mul(4).ok_or_else(out_of_bounds)?;
    let len = count.checked_mul(4).ok_or_else(out_of_bounds)?;
    Ok((offset, len))
}
