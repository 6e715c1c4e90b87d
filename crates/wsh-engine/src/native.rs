//! # Native Digest Engine
//!
//! Runs the SHA-256 compression function in-process over the padded blocks
//! already laid out in the arena, then stores the final state the way the
//! WebAssembly engine does: eight `u32` words in memory-native order inside
//! the scratch page.

use sha2::digest::generic_array::GenericArray;
use wsh_arena::MemoryArena;
use wsh_core::{HashError, BLOCK_SIZE, MESSAGE_BASE_OFFSET};

use crate::engine::DigestEngine;

/// Scratch offset where the native engine leaves the digest words.
pub const NATIVE_DIGEST_OFFSET: u32 = 0x0000_0100;

/// SHA-256 initial hash values (FIPS 180-4 §5.3.3).
const SHA256_IV: [u32; 8] = [
    0x6a09_e667, 0xbb67_ae85, 0x3c6e_f372, 0xa54f_f53a, 0x510e_527f, 0x9b05_688c, 0x1f83_d9ab,
    0x5be0_cd19,
];

/// In-process engine honouring the arena memory contract.
#[derive(Debug, Default, Clone)]
pub struct NativeEngine;

impl NativeEngine {
    /// Create a native engine.
    pub fn new() -> Self {
        Self
    }
}

impl DigestEngine for NativeEngine {
    fn compute_digest(&mut self, arena: &mut MemoryArena, block_count: u32) -> Result<u32, HashError> {
        if block_count == 0 {
            return Err(HashError::Engine("block count must be at least 1".into()));
        }
        let len = (block_count as usize)
            .checked_mul(BLOCK_SIZE)
            .ok_or_else(|| HashError::Engine(format!("block count {block_count} overflows")))?;

        let mut state = SHA256_IV;
        for block in arena.view(MESSAGE_BASE_OFFSET, len)?.chunks_exact(BLOCK_SIZE) {
            sha2::compress256(&mut state, std::slice::from_ref(GenericArray::from_slice(block)));
        }

        arena.write_u32_words(NATIVE_DIGEST_OFFSET as usize / 4, &state)?;
        Ok(NATIVE_DIGEST_OFFSET)
    }

    fn engine_name(&self) -> &str {
        "native"
    }
}
