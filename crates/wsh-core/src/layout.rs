//! # Memory Layout Contract
//!
//! Constants shared between the host and the digest engine. These values are
//! baked into the engine binary; changing any of them on one side only
//! silently corrupts every digest.
//!
//! ```text
//! 0x0000_0000 ┌──────────────────────────────┐
//!             │ engine scratch (digest, ...) │  RESERVED_SCRATCH_BYTES
//! 0x0001_0000 ├──────────────────────────────┤
//!             │ message ++ 0x80 ++ 0..0      │
//!             │ ... ++ be_u64(bit length)    │  block_count × BLOCK_SIZE
//!             └──────────────────────────────┘
//! ```

/// Size of one linear memory page.
pub const PAGE_SIZE: usize = 64 * 1024;

/// Smallest arena the engine accepts: one scratch page plus one message page.
pub const MIN_PAGES: usize = 2;

/// Upper bound on pages for a 32-bit WebAssembly memory (4 GiB).
pub const WASM32_MAX_PAGES: usize = 65_536;

/// Start of the message region.
pub const MESSAGE_BASE_OFFSET: usize = 0x0001_0000;

/// Bytes below `MESSAGE_BASE_OFFSET` owned by the engine.
pub const RESERVED_SCRATCH_BYTES: usize = PAGE_SIZE;

/// Byte written immediately after the message data.
pub const END_OF_DATA_MARKER: u8 = 0x80;

/// One SHA-256 message block (512 bits).
pub const BLOCK_SIZE: usize = 64;

/// Width of the trailing big-endian bit-length field.
pub const LENGTH_FIELD_SIZE: usize = 8;

/// Marker byte plus length field.
pub const PADDING_OVERHEAD: usize = 1 + LENGTH_FIELD_SIZE;

/// Number of 32-bit words in a SHA-256 digest.
pub const DIGEST_WORDS: usize = 8;

const _: () = assert!(MESSAGE_BASE_OFFSET >= RESERVED_SCRATCH_BYTES);
const _: () = assert!(PAGE_SIZE % BLOCK_SIZE == 0);
