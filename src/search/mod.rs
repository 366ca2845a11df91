//! Depth-limited adversarial searches over any [`GameState`]:
//! - Negamax (no pruning, the reference value)
//! - Negamax with fail-soft alpha-beta pruning
//! - Scout, driven by a boolean boundary test
//! - NegaScout (principal variation search)

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::trace_span;

use crate::prelude::*;
use crate::search::tt::TranspositionTable;

pub mod alpha_beta;
pub mod boundary;
pub mod common;
pub mod negamax;
pub mod negascout;
pub mod scout;
pub mod tt;


pub use common::{SearchResult, SearchStats, SearchWindow};

/// Search orientation: `+1` when the maximizing side moves, `-1` otherwise.
/// Flips sign at every ply.
pub type Color = i32;

pub const MAX_COLOR: Color = 1;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    #[default]
    Negamax = 1,
    AlphaBeta = 2,
    Scout = 3,
    #[serde(rename = "negascout")]
    NegaScout = 4,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Negamax,
        Algorithm::AlphaBeta,
        Algorithm::Scout,
        Algorithm::NegaScout,
    ];

    /// Whether the returned score is relative to the side to move.
    /// Scout scores are relative to the fixed reference side.
    pub const fn is_color_oriented(&self) -> bool {
        !matches!(self, Algorithm::Scout)
    }

    /// Whether the transposition table can be engaged
    pub const fn uses_tt(&self) -> bool {
        matches!(self, Algorithm::AlphaBeta | Algorithm::NegaScout)
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Algorithm::Negamax => "Negamax (minmax version)",
            Algorithm::AlphaBeta => "Negamax (alpha-beta version)",
            Algorithm::Scout => "Scout",
            Algorithm::NegaScout => "Negascout",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "negamax" | "minmax" => Ok(Algorithm::Negamax),
            "2" | "alpha-beta" | "alphabeta" | "ab" => Ok(Algorithm::AlphaBeta),
            "3" | "scout" => Ok(Algorithm::Scout),
            "4" | "negascout" | "pvs" => Ok(Algorithm::NegaScout),
            other => Err(format!(
                "unknown algorithm '{other}', expected 1-4 or negamax|alpha-beta|scout|negascout"
            )),
        }
    }
}

/// Runs searches and keeps the node accounting of the last one.
#[derive(Debug, Default)]
pub struct Searcher {
    stats: SearchStats,
    tt: Option<TranspositionTable>,
    tt_min_depth: u16,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Searcher with a transposition table of `size_mb`.
    /// Falls back to no table if it cannot be allocated.
    pub fn with_tt(mut self, size_mb: usize, min_depth: u16) -> Self {
        match TranspositionTable::new(size_mb) {
            Ok(tt) => {
                debug!("Transposition table: {} entries", tt.len());
                self.tt = Some(tt);
                self.tt_min_depth = min_depth;
            }
            Err(e) => {
                warn!("Transposition table disabled: {e:?}");
                self.tt = None;
            }
        }
        self
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        let searcher = Self::new();
        if config.use_tt {
            searcher.with_tt(config.hash_size_mb, config.tt_min_depth)
        } else {
            searcher
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn has_tt(&self) -> bool {
        self.tt.is_some()
    }

    /// Forgets every stored entry, if a table is engaged
    pub fn clear_tt(&mut self) {
        if let Some(tt) = self.tt.as_mut() {
            tt.clear();
        }
    }

    /// Runs `algorithm` on `state` with the unbounded window where one applies.
    pub fn run<S: GameState>(
        &mut self,
        algorithm: Algorithm,
        state: &S,
        depth: u16,
        color: Color,
    ) -> SearchResult {
        let span = trace_span!("search_root", %algorithm, depth, color);
        let _guard = span.enter();

        let start_time = Instant::now();
        let score = match algorithm {
            Algorithm::Negamax => self.negamax(state, depth, color),
            Algorithm::AlphaBeta => self.alpha_beta(state, depth, SearchWindow::FULL, color),
            Algorithm::Scout => self.scout(state, depth, color),
            Algorithm::NegaScout => self.negascout(state, depth, SearchWindow::FULL, color),
        };
        let time_taken = start_time.elapsed();

        self.stats.log_summary();
        if let Some(tt) = self.tt.as_ref() {
            debug!("TT hashfull: {}/1000", tt.hash_full());
        }
        SearchResult {
            algorithm,
            depth,
            color,
            score,
            stats: self.stats,
            time_taken,
        }
    }

    /// Resets the counters, once per top-level call
    #[inline]
    fn begin(&mut self) {
        self.stats = SearchStats::new();
    }
}

/// Successors of a non-terminal `state` for the side `color`.
///
/// Panics when there are none: a non-terminal position without successors
/// has no value.
#[inline]
fn children<S: GameState>(state: &S, color: Color) -> Vec<S> {
    let children = state.successors(color == MAX_COLOR);
    if children.is_empty() {
        error!("Non-terminal state without successors: {state:?}, color {color}");
        panic!("non-terminal state has no successors for color {color}");
    }
    children
}

/// Leaf test shared by every search
#[inline(always)]
fn is_leaf<S: GameState>(state: &S, depth: u16) -> bool {
    depth == 0 || state.terminal()
}

#[cfg(test)]
mod algorithm_tests {
    use super::*;

    #[test]
    fn parse_algorithm() {
        assert_eq!("1".parse::<Algorithm>(), Ok(Algorithm::Negamax));
        assert_eq!("2".parse::<Algorithm>(), Ok(Algorithm::AlphaBeta));
        assert_eq!("Scout".parse::<Algorithm>(), Ok(Algorithm::Scout));
        assert_eq!("negascout".parse::<Algorithm>(), Ok(Algorithm::NegaScout));
        assert!("5".parse::<Algorithm>().is_err());
        assert!("".parse::<Algorithm>().is_err());
    }

    #[test]
    fn algorithm_names() {
        assert_eq!(Algorithm::NegaScout.to_string(), "Negascout");
        assert_eq!(Algorithm::AlphaBeta as u8, 2);
        assert!(!Algorithm::Scout.is_color_oriented());
        assert!(Algorithm::Negamax.is_color_oriented());
    }

    #[test]
    fn missing_tt_is_not_fatal() {
        let searcher = Searcher::new().with_tt(0, 2);
        assert!(!searcher.has_tt());
    }
}
