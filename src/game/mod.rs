//! Game capability consumed by the searches, and the 6x6 Othello that
//! implements it.

use std::fmt::{Debug, Display};

pub mod components;
pub mod othello;
pub mod zobrist;

/// Two-player, zero-sum, perfect-information game position.
///
/// Search code only ever sees positions through this trait.
pub trait GameState: Clone + Debug {
    /// True when the game is over.
    fn terminal(&self) -> bool;

    /// Static evaluation oriented to one fixed reference side, independent
    /// of whose turn it is.
    fn value(&self) -> i32;

    /// Positions reachable by the maximizing (`true`) or minimizing side.
    ///
    /// A non-terminal position must yield at least one successor for the
    /// side to move. A forced pass is a successor.
    fn successors(&self, maximizing: bool) -> Vec<Self>;

    /// Fingerprint used by the transposition table.
    fn position_hash(&self) -> u64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Move number outside `0..=36`
    OutOfRange(u8),
    /// Move does not flip anything, or the square is taken
    IllegalMove { pos: u8, black: bool },
    /// Passing while a move is available
    IllegalPass { black: bool },
}

impl Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = |black: bool| if black { "black" } else { "white" };
        match self {
            GameError::OutOfRange(pos) => write!(f, "move {pos} is out of range"),
            GameError::IllegalMove { pos, black } => {
                write!(f, "illegal move {pos} for {}", side(*black))
            }
            GameError::IllegalPass { black } => {
                write!(f, "{} cannot pass while a move is available", side(*black))
            }
        }
    }
}

impl std::error::Error for GameError {}
