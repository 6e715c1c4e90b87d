//! # wsh-arena — Linear Memory and Message Layout
//!
//! - **`MemoryArena`**: the byte buffer the digest engine treats as its
//!   linear memory. Page-granular, zero-filled, grow-only, and bounds
//!   checked on every access.
//! - **`write_padded_message`**: places a message into the arena with the
//!   SHA-256 end marker, zero fill, and big-endian bit length, growing the
//!   arena first when the padded message would not fit.
//!
//! ## Crate Policy
//!
//! - Depends only on `wsh-core` internally.
//! - No `unsafe` code. Every view is an explicit offset and length checked
//!   against the current capacity.

pub mod arena;
pub mod message;

pub use arena::MemoryArena;
pub use message::{padded_len, write_padded_message};
