//! # Error Types
//!
//! Every failure in the hash cycle is a deterministic function of its inputs,
//! so none of these are retried. They propagate to the caller of `hash`.
//!
//! - `Allocation`: arena growth refused. Raised before any byte of the
//!   message is written, so the arena stays usable.
//! - `OutOfBounds`: an arithmetic defect in layout or chunk math.
//! - `Alignment`: host/engine contract mismatch on the digest offset.
//! - `EngineLoad`: startup failure; no orchestrator is built.

use thiserror::Error;

/// Error type shared by the arena, layout, engine, and orchestrator.
#[derive(Error, Debug)]
pub enum HashError {
    /// Arena growth rejected by the page limit or the allocator.
    #[error("arena allocation failed: cannot grow {current_pages} pages by {requested_pages} (limit {max_pages})")]
    Allocation {
        /// Pages held before the request.
        current_pages: usize,
        /// Pages requested on top of `current_pages`.
        requested_pages: usize,
        /// Configured page limit.
        max_pages: usize,
    },

    /// An access reaches past the end of the arena.
    #[error("arena access out of bounds: offset {offset:#x} + {len} bytes exceeds capacity {capacity:#x}")]
    OutOfBounds {
        /// First byte of the access.
        offset: usize,
        /// Length of the access in bytes.
        len: usize,
        /// Arena capacity at the time of the access.
        capacity: usize,
    },

    /// The engine returned a digest offset that is not word aligned.
    #[error("digest offset {0:#x} is not aligned to a 32-bit word")]
    Alignment(u32),

    /// The digest engine could not be loaded or instantiated.
    #[error("failed to load digest engine: {0}")]
    EngineLoad(String),

    /// The digest engine failed while computing.
    #[error("digest engine error: {0}")]
    Engine(String),

    /// Arena or offset configuration violates the layout contract.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// The message does not fit the block count or bit-length fields.
    #[error("message of {0} bytes is too large to hash")]
    MessageTooLarge(usize),

    /// Configuration could not be read or contains invalid values.
    #[error("configuration error: {0}")]
    Config(String),
}
