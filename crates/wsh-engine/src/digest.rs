//! # Word Digest
//!
//! The 8-word SHA-256 result as read back from the arena.

use serde::{Serialize, Serializer};
use wsh_core::{word_to_hex, DIGEST_WORDS};

/// A SHA-256 digest held as the eight 32-bit words the engine produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordDigest {
    words: [u32; DIGEST_WORDS],
}

impl WordDigest {
    /// Wrap digest words in engine order.
    pub fn from_words(words: [u32; DIGEST_WORDS]) -> Self {
        Self { words }
    }

    /// The digest words in engine order.
    pub fn words(&self) -> &[u32; DIGEST_WORDS] {
        &self.words
    }

    /// 64 lowercase hex characters, word by word.
    pub fn to_hex(&self) -> String {
        self.words.iter().map(|&w| word_to_hex(w)).collect()
    }

    /// The conventional 32-byte SHA-256 output (each word big-endian).
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (chunk, word) in out.chunks_exact_mut(4).zip(&self.words) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }
}

impl std::fmt::Display for WordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for WordDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABC: [u32; 8] = [
        0xba78_16bf, 0x8f01_cfea, 0x4141_40de, 0x5dae_2223, 0xb003_61a3, 0x9617_7a9c, 0xb410_ff61,
        0xf200_15ad,
    ];

    #[test]
    fn hex_is_word_concatenation() {
        let digest = WordDigest::from_words(ABC);
        assert_eq!(
            digest.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(digest.to_string(), digest.to_hex());
    }

    #[test]
    fn small_words_are_zero_padded() {
        let digest = WordDigest::from_words([1, 0, 0, 0, 0, 0, 0, 0xf]);
        let hex = digest.to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("00000001"));
        assert!(hex.ends_with("0000000f"));
    }

    #[test]
    fn bytes_are_big_endian_words() {
        let bytes = WordDigest::from_words(ABC).to_bytes();
        assert_eq!(&bytes[..4], &[0xba, 0x78, 0x16, 0xbf]);
        assert_eq!(&bytes[28..], &[0xf2, 0x00, 0x15, 0xad]);
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&WordDigest::from_words(ABC)).unwrap();
        assert_eq!(json, "\"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad\"");
    }
}
