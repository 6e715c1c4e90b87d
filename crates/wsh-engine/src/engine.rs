//! # Digest Engine Trait
//!
//! The opaque capability behind `compute_digest(block_count) -> offset`.
//! The padded message sits at `MESSAGE_BASE_OFFSET` in the arena; the engine
//! may use the scratch page below it freely and reports where it left the
//! digest.

use wsh_arena::MemoryArena;
use wsh_core::HashError;

use crate::config::{EngineConfig, EngineKind};
use crate::native::NativeEngine;

/// A SHA-256 compression engine operating on a shared arena.
pub trait DigestEngine: Send {
    /// Hash `block_count` padded blocks starting at `MESSAGE_BASE_OFFSET` and
    /// return the byte offset of the 8-word digest.
    fn compute_digest(&mut self, arena: &mut MemoryArena, block_count: u32) -> Result<u32, HashError>;

    /// Human-readable engine name (for diagnostics/logging).
    fn engine_name(&self) -> &str;
}

impl<E: DigestEngine + ?Sized> DigestEngine for Box<E> {
    fn compute_digest(&mut self, arena: &mut MemoryArena, block_count: u32) -> Result<u32, HashError> {
        (**self).compute_digest(arena, block_count)
    }

    fn engine_name(&self) -> &str {
        (**self).engine_name()
    }
}

/// Build the engine selected by `config`.
///
/// Selecting `wasm` in a build without the `wasm` feature fails with
/// `EngineLoad` rather than silently falling back to the native engine.
pub fn create_engine(config: &EngineConfig) -> Result<Box<dyn DigestEngine>, HashError> {
    match config.engine {
        EngineKind::Native => Ok(Box::new(NativeEngine::new())),
        #[cfg(feature = "wasm")]
        EngineKind::Wasm => Ok(Box::new(crate::wasm::WasmEngine::load(config)?)),
        #[cfg(not(feature = "wasm"))]
        EngineKind::Wasm => Err(HashError::EngineLoad(
            "wasm engine requested but this build lacks the `wasm` feature".into(),
        )),
    }
}
