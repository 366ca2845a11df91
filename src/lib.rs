pub mod cli;
pub mod game;
pub mod prelude;
pub mod search;
pub mod utils;

pub use utils::log::init;

pub mod consts {
    use crate::prelude::*;

    pub const NUM_SIDES: usize = Side::SIDES.len();
    pub const BOARD_DIM: usize = 6;
    pub const NUM_SQUARES: usize = BOARD_DIM * BOARD_DIM;
    pub const NUM_CENTER: usize = 4;

    /// Row-major squares of the center, in move-number order
    pub const CENTER_SQUARES: [u8; NUM_CENTER] = [14, 15, 20, 21];

    /// Move number of a pass
    pub const PASS: u8 = NUM_SQUARES as u8;

    /// Ply limit used by the benchmark
    pub const DEFAULT_DEPTH: u16 = 20;
    pub const DEFAULT_HASH_MB: usize = 16;

    /// Unbounded search window, negatable without overflow
    pub const SCORE_MIN: i32 = i32::MIN + 1;
    pub const SCORE_MAX: i32 = i32::MAX;
}
