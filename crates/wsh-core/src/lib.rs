//! # wsh-core — Foundational Types for Arena-Hosted SHA-256
//!
//! This crate is the leaf of the workspace DAG. It holds the pieces every
//! other crate agrees on:
//!
//! - **Layout constants** shared bit-for-bit with the digest engine binary
//!   (page size, message base offset, end-of-data marker).
//! - **Chunk arithmetic** (`chunks_of`) used for both page growth sizing and
//!   512-bit block counting.
//! - **Hex rendering** of fixed-width words.
//! - **`HashError`**, the single error type crossing crate boundaries.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `wsh-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod chunk;
pub mod error;
pub mod hex;
pub mod layout;

// Re-export primary types for ergonomic imports.
pub use chunk::{chunks_of, mem_pages, msg_blocks};
pub use error::HashError;
pub use hex::{to_hex, to_hex_prefixed, word_to_hex};
pub use layout::{
    BLOCK_SIZE, DIGEST_WORDS, END_OF_DATA_MARKER, LENGTH_FIELD_SIZE, MESSAGE_BASE_OFFSET,
    MIN_PAGES, PADDING_OVERHEAD, PAGE_SIZE, RESERVED_SCRATCH_BYTES, WASM32_MAX_PAGES,
};
