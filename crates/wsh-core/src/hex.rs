//! # Fixed-Width Hex Rendering
//!
//! Renders unsigned integers as lowercase hex, zero-padded to the full width
//! of the integer type (`bit_width / 4` characters). Values must fit in
//! `bit_width` bits; wider values are not truncated and render longer.

/// Render `value` as `bit_width / 4` lowercase hex characters.
pub fn to_hex(bit_width: u32, value: u64) -> String {
    debug_assert!(bit_width % 4 == 0 && bit_width <= 64);
    format!("{value:0width$x}", width = (bit_width / 4) as usize)
}

/// Render `value` like [`to_hex`] with a leading `0x`.
pub fn to_hex_prefixed(bit_width: u32, value: u64) -> String {
    format!("0x{}", to_hex(bit_width, value))
}

/// Render a 32-bit word as exactly eight hex characters.
pub fn word_to_hex(word: u32) -> String {
    to_hex(32, u64::from(word))
}
