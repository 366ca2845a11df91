pub use crate::consts::*;
pub use crate::game::{
    self, GameError, GameState,
    components::{BitBoard, Side, Square},
    othello::{Board, PV},
    zobrist::ZOBRIST,
};
pub use crate::search::{
    self, Algorithm, Color, SearchResult, SearchStats, SearchWindow, Searcher,
    common::SearchConfig,
};
pub use crate::utils::{self, log::*, prng::*, pv_runner::*};
pub use miette::{self, Context, IntoDiagnostic, Result};
pub use std::fmt::Display;
pub use std::str::FromStr;
pub use tracing::{Level, debug, error, info, trace, warn};
