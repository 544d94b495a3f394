//! Bitboard used as a visited set keyed by packed cell index

use super::MAX_BOARD_SIZE;

const WORDS: usize = (MAX_BOARD_SIZE * MAX_BOARD_SIZE + 63) / 64;

/// Fixed-size bit set over packed `row * size + col` indices.
/// Uses 4 x u64 to cover a 16x16 board without heap allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bitboard {
    bits: [u64; WORDS],
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: [0; WORDS] }
    }

    /// Set a bit, returning `true` if it was previously clear
    #[inline]
    pub fn insert(&mut self, idx: usize) -> bool {
        let was_set = self.get(idx);
        self.bits[idx / 64] |= 1u64 << (idx % 64);
        !was_set
    }

    /// Check if bit is set
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        (self.bits[idx / 64] >> (idx % 64)) & 1 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_reports_novelty() {
        let mut bb = Bitboard::new();
        assert!(bb.insert(17));
        assert!(!bb.insert(17));
        assert!(bb.get(17));
        assert!(!bb.get(18));
    }

    #[test]
    fn test_bits_span_words() {
        let mut bb = Bitboard::new();
        for idx in [0, 63, 64, 130, 255] {
            assert!(bb.insert(idx));
        }
        assert!(bb.get(64));
        assert!(bb.get(255));
        assert!(!bb.get(65));
        assert!(!bb.get(129));
    }
}
