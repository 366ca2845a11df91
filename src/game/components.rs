use std::fmt::Display;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use crate::consts::*;
use crate::game::GameError;

#[derive(Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct BitBoard(pub u64);

impl BitBoard {
    pub const EMPTY: BitBoard = BitBoard(0);
    pub const FULL: BitBoard = BitBoard((1u64 << NUM_SQUARES) - 1);

    #[inline(always)]
    pub const fn contains(&self, sq: Square) -> bool {
        self.0 & (1u64 << sq.0) != 0
    }

    #[inline(always)]
    pub fn set(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.0;
    }

    #[inline(always)]
    pub const fn any(&self) -> bool {
        self.0 != 0
    }

    #[inline(always)]
    pub const fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Index of the least significant set bit
    pub const fn lsb(&self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as u8)
        }
    }

    /// Clears and returns the least significant set bit
    pub fn pop_lsb(&mut self) -> Option<u8> {
        let lsb = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(lsb)
    }
}

impl BitOr for BitBoard {
    type Output = BitBoard;

    fn bitor(self, rhs: Self) -> Self::Output {
        BitBoard(self.0 | rhs.0)
    }
}

impl BitOrAssign for BitBoard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for BitBoard {
    type Output = BitBoard;

    fn bitand(self, rhs: Self) -> Self::Output {
        BitBoard(self.0 & rhs.0)
    }
}

impl Not for BitBoard {
    type Output = BitBoard;

    fn not(self) -> Self::Output {
        BitBoard(!self.0 & Self::FULL.0)
    }
}

/// Row-major square index, `0` is the top-left corner.
#[derive(Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct Square(pub u8);

/// Maps the move numbering used by the benchmark game to row-major squares.
/// Numbers `0..4` are the fixed center squares, `4..36` the outer squares
/// in row-major order.
#[rustfmt::skip]
const CUT_TO_SQUARE: [u8; NUM_SQUARES] = [
    14, 15, 20, 21,
     0,  1,  2,  3,  4,  5,
     6,  7,  8,  9, 10, 11,
    12, 13, 16, 17,
    18, 19, 22, 23,
    24, 25, 26, 27, 28, 29,
    30, 31, 32, 33, 34, 35,
];

impl Square {
    /// Square at `(row, col)`, `None` when off the board
    #[inline]
    pub fn at(row: i8, col: i8) -> Option<Self> {
        let dim = BOARD_DIM as i8;
        if (0..dim).contains(&row) && (0..dim).contains(&col) {
            Some(Self((row * dim + col) as u8))
        } else {
            None
        }
    }

    pub fn from_cut(pos: u8) -> Result<Self, GameError> {
        CUT_TO_SQUARE
            .get(pos as usize)
            .map(|&sq| Self(sq))
            .ok_or(GameError::OutOfRange(pos))
    }

    pub fn cut(&self) -> u8 {
        CUT_TO_SQUARE
            .iter()
            .position(|&sq| sq == self.0)
            .map(|p| p as u8)
            .unwrap_or(PASS)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub const fn row(&self) -> i8 {
        (self.0 as usize / BOARD_DIM) as i8
    }

    pub const fn col(&self) -> i8 {
        (self.0 as usize % BOARD_DIM) as i8
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = (b'a' + self.col() as u8) as char;
        write!(f, "{}{}", file, self.row() + 1)
    }
}

#[derive(Debug, Default, Hash, PartialEq, Eq, Clone, Copy)]
pub enum Side {
    #[default]
    Black,
    White,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Side::Black => write!(f, "Black"),
            Side::White => write!(f, "White"),
        }
    }
}

impl Not for Side {
    type Output = Side;

    fn not(self) -> Self::Output {
        self.flip()
    }
}

impl Side {
    pub const SIDES: [Side; 2] = [Side::Black, Side::White];

    pub const fn flip(&self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    pub const fn index(&self) -> usize {
        match self {
            Side::Black => 0,
            Side::White => 1,
        }
    }

    /// Black is the maximizing side
    pub const fn from_maximizing(maximizing: bool) -> Self {
        if maximizing { Side::Black } else { Side::White }
    }

    pub const fn from_color(color: i32) -> Self {
        Self::from_maximizing(color == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cut_numbering_is_a_permutation() {
        let mut seen = BitBoard::EMPTY;
        for pos in 0..NUM_SQUARES as u8 {
            let sq = Square::from_cut(pos).unwrap();
            assert!(!seen.contains(sq), "square {sq} mapped twice");
            seen.set(sq);
            assert_eq!(sq.cut(), pos);
        }
        assert_eq!(seen, BitBoard::FULL);
        assert!(Square::from_cut(PASS).is_err());
    }

    #[test]
    fn center_squares() {
        assert_eq!(Square::from_cut(0).unwrap(), Square(14));
        assert_eq!(Square::from_cut(3).unwrap(), Square(21));
        assert_eq!(format!("{}", Square(0)), "a1");
        assert_eq!(format!("{}", Square(35)), "f6");
    }

    #[test]
    fn pop_lsb_drains() {
        let mut bb = BitBoard(0b1010);
        assert_eq!(bb.pop_lsb(), Some(1));
        assert_eq!(bb.pop_lsb(), Some(3));
        assert_eq!(bb.pop_lsb(), None);
    }

    #[test]
    fn side_orientation() {
        assert_eq!(Side::from_color(1), Side::Black);
        assert_eq!(Side::from_color(-1), Side::White);
        assert_eq!(!Side::White, Side::Black);
    }
}
