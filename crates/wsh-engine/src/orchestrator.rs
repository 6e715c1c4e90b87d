//! # Hash Orchestrator
//!
//! Runs one complete hash cycle per call:
//!
//! ```text
//! Idle → Writing (padded message into arena)
//!      → Computing (engine, returns digest offset)
//!      → Reading (8 words at offset / 4)
//!      → Idle (hex string to caller)
//! ```
//!
//! The orchestrator owns its arena and engine. Arena growth persists across
//! calls; nothing else does.

use wsh_arena::{write_padded_message, MemoryArena};
use wsh_core::{HashError, DIGEST_WORDS, MESSAGE_BASE_OFFSET, MIN_PAGES, RESERVED_SCRATCH_BYTES};

use crate::config::EngineConfig;
use crate::digest::WordDigest;
use crate::engine::{create_engine, DigestEngine};

/// Owns one arena and one digest engine and hashes byte strings through them.
pub struct HashOrchestrator<E = Box<dyn DigestEngine>> {
    engine: E,
    arena: MemoryArena,
}

impl HashOrchestrator {
    /// Build the engine and arena described by `config`.
    pub fn from_config(config: &EngineConfig) -> Result<Self, HashError> {
        config.validate()?;
        let engine = create_engine(config)?;
        tracing::info!(
            engine = engine.engine_name(),
            initial_pages = config.initial_pages,
            max_pages = config.max_pages,
            "digest engine ready"
        );
        Self::new(engine, config.build_arena()?)
    }
}

impl<E: DigestEngine> HashOrchestrator<E> {
    /// Pair an engine with an arena of at least `MIN_PAGES` pages.
    pub fn new(engine: E, arena: MemoryArena) -> Result<Self, HashError> {
        if arena.pages() < MIN_PAGES {
            return Err(HashError::InvalidLayout(format!(
                "arena needs at least {MIN_PAGES} pages, got {}",
                arena.pages()
            )));
        }
        Ok(Self { engine, arena })
    }

    /// Hash `data` and return the 64-character lowercase hex digest.
    pub fn hash(&mut self, data: &[u8]) -> Result<String, HashError> {
        Ok(self.digest(data)?.to_hex())
    }

    /// Hash `data` and return the digest words.
    pub fn digest(&mut self, data: &[u8]) -> Result<WordDigest, HashError> {
        Ok(self.digest_with_block_count(data)?.0)
    }

    /// Hash `data` and return the digest words together with the number of
    /// 64-byte blocks handed to the engine.
    pub fn digest_with_block_count(&mut self, data: &[u8]) -> Result<(WordDigest, u32), HashError> {
        let block_count =
            write_padded_message(&mut self.arena, MESSAGE_BASE_OFFSET, RESERVED_SCRATCH_BYTES, data)?;

        let digest_offset = self.engine.compute_digest(&mut self.arena, block_count)?;
        if digest_offset % 4 != 0 {
            return Err(HashError::Alignment(digest_offset));
        }
        let word_offset = digest_offset as usize / 4;

        let words = self.arena.read_u32_words(word_offset, DIGEST_WORDS)?;
        let mut out = [0u32; DIGEST_WORDS];
        out.copy_from_slice(&words);

        tracing::debug!(
            engine = self.engine.engine_name(),
            message_len = data.len(),
            block_count,
            digest_offset,
            "hash cycle complete"
        );
        Ok((WordDigest::from_words(out), block_count))
    }

    /// The arena, for inspection between calls.
    pub fn arena(&self) -> &MemoryArena {
        &self.arena
    }

    /// The engine driving this orchestrator.
    pub fn engine(&self) -> &E {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::NativeEngine;
    use wsh_core::PAGE_SIZE;

    const EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    const ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    fn native() -> HashOrchestrator<NativeEngine> {
        HashOrchestrator::new(NativeEngine::new(), MemoryArena::new(2).unwrap()).unwrap()
    }

    /// Engine that reports a fixed offset without computing anything.
    struct FixedOffset(u32);

    impl DigestEngine for FixedOffset {
        fn compute_digest(&mut self, _arena: &mut MemoryArena, _blocks: u32) -> Result<u32, HashError> {
            Ok(self.0)
        }

        fn engine_name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn empty_input_vector() {
        assert_eq!(native().hash(b"").unwrap(), EMPTY);
    }

    #[test]
    fn abc_vector() {
        assert_eq!(native().hash(b"abc").unwrap(), ABC);
    }

    #[test]
    fn two_block_vector() {
        let input = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";
        assert_eq!(
            native().hash(input).unwrap(),
            "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"
        );
    }

    #[test]
    fn reused_arena_grows_once() {
        let mut orch = native();
        orch.hash(&vec![b'a'; 2 * PAGE_SIZE]).unwrap();
        let grown = orch.arena().pages();
        assert!(grown > 2);

        orch.hash(&vec![b'a'; 2 * PAGE_SIZE + 100]).unwrap();
        assert_eq!(orch.arena().pages(), grown);
    }

    #[test]
    fn increasing_inputs_never_out_of_bounds() {
        let mut orch = native();
        for len in [0usize, 55, 56, PAGE_SIZE - 9, PAGE_SIZE - 8, 3 * PAGE_SIZE] {
            let result = orch.hash(&vec![0x5a; len]);
            assert!(result.is_ok(), "len {len}: {:?}", result.err());
        }
    }

    #[test]
    fn repeat_after_longer_input_is_stable() {
        let mut orch = native();
        let first = orch.hash(b"abc").unwrap();
        orch.hash(&[0xff; 300]).unwrap();
        assert_eq!(orch.hash(b"abc").unwrap(), first);
    }

    #[test]
    fn misaligned_offset_is_alignment_error() {
        let mut orch = HashOrchestrator::new(FixedOffset(0x102), MemoryArena::new(2).unwrap()).unwrap();
        assert!(matches!(orch.hash(b"x"), Err(HashError::Alignment(0x102))));
    }

    #[test]
    fn offset_past_arena_is_out_of_bounds() {
        let mut orch = HashOrchestrator::new(FixedOffset(0xffff_fff0), MemoryArena::new(2).unwrap()).unwrap();
        assert!(matches!(orch.hash(b"x"), Err(HashError::OutOfBounds { .. })));
    }

    #[test]
    fn growth_refusal_surfaces_and_arena_stays_usable() {
        let arena = MemoryArena::with_limit(2, 2).unwrap();
        let mut orch = HashOrchestrator::new(NativeEngine::new(), arena).unwrap();
        assert!(matches!(
            orch.hash(&vec![0u8; PAGE_SIZE]),
            Err(HashError::Allocation { .. })
        ));
        assert_eq!(orch.hash(b"abc").unwrap(), ABC);
    }

    #[test]
    fn from_default_config_uses_native() {
        let mut orch = HashOrchestrator::from_config(&EngineConfig::default()).unwrap();
        assert_eq!(orch.engine().engine_name(), "native");
        assert_eq!(orch.hash(b"").unwrap(), EMPTY);
    }

    #[test]
    fn digest_words_match_hex() {
        let digest = native().digest(b"abc").unwrap();
        assert_eq!(digest.words()[0], 0xba78_16bf);
        assert_eq!(digest.to_hex(), ABC);
    }

    #[test]
    fn block_count_is_what_the_engine_received() {
        /// Engine that writes the block count it was given into scratch.
        struct EchoBlocks;

        impl DigestEngine for EchoBlocks {
            fn compute_digest(&mut self, arena: &mut MemoryArena, blocks: u32) -> Result<u32, HashError> {
                arena.write_u32_words(0, &[blocks])?;
                Ok(0)
            }

            fn engine_name(&self) -> &str {
                "echo"
            }
        }

        let mut orch = HashOrchestrator::new(EchoBlocks, MemoryArena::new(2).unwrap()).unwrap();
        for (len, expected) in [(0usize, 1u32), (55, 1), (56, 2), (PAGE_SIZE, 1025)] {
            let (digest, blocks) = orch.digest_with_block_count(&vec![0u8; len]).unwrap();
            assert_eq!(blocks, expected, "len {len}");
            assert_eq!(digest.words()[0], blocks);
        }
    }
}
