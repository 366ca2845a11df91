use std::sync::LazyLock;

use crate::prelude::*;

pub static ZOBRIST: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::new);

#[derive(Debug)]
pub struct ZobristKeys {
    /// For each side, on each square
    pub discs: [[u64; NUM_SQUARES]; NUM_SIDES],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self {
            discs: [[0; NUM_SQUARES]; NUM_SIDES],
        }
    }
}

impl ZobristKeys {
    pub fn new() -> Self {
        let mut rng = Prng::init(1070373321345817214);
        let mut keys = Self::default();

        for side in Side::SIDES {
            for square in 0..NUM_SQUARES {
                keys.discs[side.index()][square] = rng.rand();
            }
        }

        keys
    }
}

pub fn calculate_hash(board: &Board) -> u64 {
    let mut hash = 0;

    Side::SIDES.iter().for_each(|side| {
        let mut discs = board.discs(*side);
        while let Some(sq) = discs.pop_lsb() {
            hash ^= ZOBRIST.discs[side.index()][sq as usize];
        }
    });

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_distinct() {
        let mut all: Vec<u64> = ZOBRIST.discs.iter().flatten().copied().collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), NUM_SIDES * NUM_SQUARES);
    }

    #[test]
    fn different_hash() {
        let board = Board::new();
        let moved = board.apply(Side::Black, 12).unwrap();

        assert_ne!(calculate_hash(&board), calculate_hash(&moved));
        assert_eq!(calculate_hash(&moved), calculate_hash(&board.apply(Side::Black, 12).unwrap()));
    }
}
