//! 6x6 Othello with the four center squares fixed at the start.
//!
//! Moves use the benchmark game's numbering (see [`Square::from_cut`]):
//! `0..4` are the center squares, `4..36` the rest, [`PASS`] is a pass.

use std::fmt::Display;

use crate::game::zobrist::calculate_hash;
use crate::prelude::*;

/// Principal variation of the benchmark game, black moves first.
/// Black passes at ply 30. Final score is 16-20.
#[rustfmt::skip]
pub const PV: [u8; 33] = [
    12, 21, 26, 13, 22, 18,  7,  6,  5, 27, 33, 23, 17, 11, 19, 15,
    14, 31, 20, 32, 30, 10, 25, 24, 34, 28, 16,  4, 29, 35, PASS, 8, 9,
];

const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub struct Board {
    black: BitBoard,
    white: BitBoard,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Starting position: center squares 1 and 2 black, 0 and 3 white.
    pub fn new() -> Self {
        let mut black = BitBoard::EMPTY;
        let mut white = BitBoard::EMPTY;
        for (pos, side) in [
            (0, Side::White),
            (1, Side::Black),
            (2, Side::Black),
            (3, Side::White),
        ] {
            let sq = Square(CENTER_SQUARES[pos]);
            match side {
                Side::Black => black.set(sq),
                Side::White => white.set(sq),
            }
        }
        Self { black, white }
    }

    #[inline(always)]
    pub fn discs(&self, side: Side) -> BitBoard {
        match side {
            Side::Black => self.black,
            Side::White => self.white,
        }
    }

    #[inline(always)]
    pub fn occupied(&self) -> BitBoard {
        self.black | self.white
    }

    pub fn is_full(&self) -> bool {
        self.occupied() == BitBoard::FULL
    }

    pub fn piece_at(&self, sq: Square) -> Option<Side> {
        if self.black.contains(sq) {
            Some(Side::Black)
        } else if self.white.contains(sq) {
            Some(Side::White)
        } else {
            None
        }
    }

    /// Discs of the opponent that `side` would flip by playing `sq`.
    /// Empty when the move is illegal.
    pub fn flips(&self, side: Side, sq: Square) -> BitBoard {
        if self.occupied().contains(sq) {
            return BitBoard::EMPTY;
        }

        let own = self.discs(side);
        let opp = self.discs(side.flip());
        let mut flips = BitBoard::EMPTY;

        for (dr, dc) in DIRECTIONS {
            let mut line = BitBoard::EMPTY;
            let (mut row, mut col) = (sq.row() + dr, sq.col() + dc);
            let end = loop {
                match Square::at(row, col) {
                    Some(s) if opp.contains(s) => {
                        line.set(s);
                        row += dr;
                        col += dc;
                    }
                    other => break other,
                }
            };
            if line.any() && end.is_some_and(|s| own.contains(s)) {
                flips |= line;
            }
        }
        flips
    }

    pub fn is_legal(&self, side: Side, pos: u8) -> bool {
        Square::from_cut(pos).is_ok_and(|sq| self.flips(side, sq).any())
    }

    /// Legal move numbers for `side`, in ascending order. Never contains a pass.
    pub fn legal_moves(&self, side: Side) -> Vec<u8> {
        (NUM_CENTER as u8..NUM_SQUARES as u8)
            .filter(|&pos| self.is_legal(side, pos))
            .collect()
    }

    pub fn can_move(&self, side: Side) -> bool {
        (NUM_CENTER as u8..NUM_SQUARES as u8).any(|pos| self.is_legal(side, pos))
    }

    /// Position after `side` plays `pos`.
    pub fn apply(&self, side: Side, pos: u8) -> Result<Board, GameError> {
        let black = side == Side::Black;
        if pos == PASS {
            if self.can_move(side) {
                return Err(GameError::IllegalPass { black });
            }
            return Ok(*self);
        }

        let sq = Square::from_cut(pos)?;
        let flips = self.flips(side, sq);
        if !flips.any() {
            return Err(GameError::IllegalMove { pos, black });
        }

        Ok(self.place(side, sq, flips))
    }

    fn place(&self, side: Side, sq: Square, flips: BitBoard) -> Board {
        let mut own = self.discs(side) | flips;
        own.set(sq);
        let opp = self.discs(side.flip()) & !flips;
        match side {
            Side::Black => Board {
                black: own,
                white: opp,
            },
            Side::White => Board {
                black: opp,
                white: own,
            },
        }
    }
}

impl GameState for Board {
    fn terminal(&self) -> bool {
        self.is_full() || (!self.can_move(Side::Black) && !self.can_move(Side::White))
    }

    fn value(&self) -> i32 {
        self.black.count() as i32 - self.white.count() as i32
    }

    fn successors(&self, maximizing: bool) -> Vec<Self> {
        let side = Side::from_maximizing(maximizing);
        let children: Vec<Board> = (NUM_CENTER as u8..NUM_SQUARES as u8)
            .filter_map(|pos| {
                let sq = Square::from_cut(pos).ok()?;
                let flips = self.flips(side, sq);
                flips.any().then(|| self.place(side, sq, flips))
            })
            .collect();

        if children.is_empty() && !self.terminal() {
            // Forced pass
            return vec![*self];
        }
        children
    }

    fn position_hash(&self) -> u64 {
        calculate_hash(self)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  ")?;
        for col in 0..BOARD_DIM {
            write!(f, " {}", (b'a' + col as u8) as char)?;
        }
        writeln!(f)?;
        for row in 0..BOARD_DIM {
            write!(f, "{:>2}", row + 1)?;
            for col in 0..BOARD_DIM {
                let sq = Square((row * BOARD_DIM + col) as u8);
                let c = match self.piece_at(sq) {
                    Some(Side::Black) => 'x',
                    Some(Side::White) => 'o',
                    None => '.',
                };
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "black: {}, white: {}",
            self.black.count(),
            self.white.count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position() {
        let board = Board::new();
        assert_eq!(board.discs(Side::Black).count(), 2);
        assert_eq!(board.discs(Side::White).count(), 2);
        assert_eq!(board.value(), 0);
        assert!(!board.terminal());
        assert_eq!(board.legal_moves(Side::Black), vec![12, 17, 22, 27]);
        assert_eq!(board.successors(true).len(), 4);
    }

    #[test]
    fn move_flips_bracketed_disc() {
        let board = Board::new().apply(Side::Black, 12).unwrap();
        assert_eq!(board.discs(Side::Black).count(), 4);
        assert_eq!(board.discs(Side::White).count(), 1);
        assert_eq!(board.value(), 3);
        assert_eq!(
            board.piece_at(Square::from_cut(0).unwrap()),
            Some(Side::Black)
        );
    }

    #[test]
    fn illegal_moves_are_rejected() {
        let board = Board::new();
        assert_eq!(
            board.apply(Side::Black, 4),
            Err(GameError::IllegalMove {
                pos: 4,
                black: true
            })
        );
        // Occupied center square
        assert!(board.apply(Side::Black, 1).is_err());
        assert_eq!(
            board.apply(Side::Black, PASS),
            Err(GameError::IllegalPass { black: true })
        );
        assert_eq!(board.apply(Side::White, 40), Err(GameError::OutOfRange(40)));
    }

    #[test]
    fn successors_follow_move_order() {
        let board = Board::new();
        let expected: Vec<Board> = board
            .legal_moves(Side::Black)
            .into_iter()
            .map(|pos| board.apply(Side::Black, pos).unwrap())
            .collect();
        assert_eq!(board.successors(true), expected);
    }

    #[test]
    fn replays_principal_variation() {
        let mut board = Board::new();
        for (ply, &pos) in PV.iter().enumerate() {
            let side = if ply % 2 == 0 { Side::Black } else { Side::White };
            assert!(!board.terminal(), "game ended early at ply {ply}");
            if pos == PASS {
                assert!(!board.can_move(side));
                // A forced pass is the only successor
                assert_eq!(board.successors(side == Side::Black), vec![board]);
            }
            board = board
                .apply(side, pos)
                .unwrap_or_else(|e| panic!("ply {ply}: {e}"));
        }
        assert!(board.is_full());
        assert!(board.terminal());
        assert_eq!(board.discs(Side::Black).count(), 16);
        assert_eq!(board.discs(Side::White).count(), 20);
        assert_eq!(board.value(), -4);
        assert!(board.successors(true).is_empty());
    }

    #[test]
    fn display_board() {
        let out = "   a b c d e f
 1 . . . . . .
 2 . . . . . .
 3 . . o x . .
 4 . . x o . .
 5 . . . . . .
 6 . . . . . .
black: 2, white: 2";
        assert_eq!(format!("{}", Board::new()), out);
    }
}
