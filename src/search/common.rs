use std::{fs, ops::Add, path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::debug_span;

use crate::prelude::*;

/// Node accounting for one top-level search
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Internal nodes whose children loop ran to exhaustion or cutoff
    pub expanded: u64,
    /// Children examined, counted before recursing into each
    pub generated: u64,

    // Transposition table stats
    pub tt_probes: u64, // TT probe attempts
    pub tt_hits: u64,   // TT probes that ended the node early
}

impl Add for SearchStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            expanded: self.expanded + rhs.expanded,
            generated: self.generated + rhs.generated,
            tt_probes: self.tt_probes + rhs.tt_probes,
            tt_hits: self.tt_hits + rhs.tt_hits,
        }
    }
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn percent(numerator: u64, denominator: u64) -> f64 {
        if denominator == 0 {
            0.0
        } else {
            100.0 * numerator as f64 / denominator as f64
        }
    }

    /// Average number of children examined per expanded node
    pub fn branching_factor(&self) -> f64 {
        if self.expanded == 0 {
            0.0
        } else {
            self.generated as f64 / self.expanded as f64
        }
    }

    pub fn log_summary(&self) {
        let _span = debug_span!("search_stats").entered();
        debug!(
            "NODES expanded={} generated={} branching={:.2}",
            self.expanded,
            self.generated,
            self.branching_factor()
        );
        if self.tt_probes > 0 {
            debug!(
                "  - TT Hits:          {:>9} ({:>6.2}% of probes)",
                self.tt_hits,
                Self::percent(self.tt_hits, self.tt_probes)
            );
        }
    }
}

/// Search window `(alpha, beta)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub alpha: i32,
    pub beta: i32,
}

impl Default for SearchWindow {
    fn default() -> Self {
        Self::FULL
    }
}

impl SearchWindow {
    pub const FULL: SearchWindow = SearchWindow {
        alpha: SCORE_MIN,
        beta: SCORE_MAX,
    };

    /// Bounds below [`SCORE_MIN`] are raised to it, so the window can
    /// always be negated.
    pub const fn new(alpha: i32, beta: i32) -> Self {
        Self { alpha, beta }.clamped()
    }

    /// This window with both bounds raised to at least [`SCORE_MIN`].
    /// `i32::MIN` has no negation.
    pub const fn clamped(self) -> Self {
        Self {
            alpha: if self.alpha < SCORE_MIN { SCORE_MIN } else { self.alpha },
            beta: if self.beta < SCORE_MIN { SCORE_MIN } else { self.beta },
        }
    }

    /// Width-one window just above `alpha`
    pub const fn null(alpha: i32) -> Self {
        Self {
            alpha,
            beta: alpha + 1,
        }
    }
}

/// Configuration for a benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    pub depth: u16,
    pub use_tt: bool,
    pub hash_size_mb: usize,
    /// Entries searched shallower than this are not stored
    pub tt_min_depth: u16,
    pub emit_info: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Negamax,
            depth: DEFAULT_DEPTH,
            use_tt: false,
            hash_size_mb: DEFAULT_HASH_MB,
            tt_min_depth: 2,
            emit_info: true,
        }
    }
}

impl SearchConfig {
    /// Save to TOML File
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> miette::Result<()> {
        let toml_string = toml::to_string_pretty(self).into_diagnostic()?;
        fs::write(path, toml_string).into_diagnostic()?;
        Ok(())
    }

    /// Load from a TOML File
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> miette::Result<Self> {
        let file_content = fs::read_to_string(path).into_diagnostic()?;
        let config: Self = toml::from_str(&file_content).into_diagnostic()?;
        Ok(config)
    }
}

/// Result of one top-level search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub algorithm: Algorithm,
    pub depth: u16,
    pub color: Color,
    /// Score as returned by the algorithm, in its own orientation
    pub score: i32,
    pub stats: SearchStats,
    pub time_taken: Duration,
}

impl SearchResult {
    /// Score from the fixed reference side's point of view
    pub fn value(&self) -> i32 {
        if self.algorithm.is_color_oriented() {
            self.color * self.score
        } else {
            self.score
        }
    }

    /// Generated nodes per second
    pub fn nps(&self) -> f64 {
        let secs = self.time_taken.as_secs_f64();
        if secs > 0.0 {
            self.stats.generated as f64 / secs
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_toml_round_trip() {
        let config = SearchConfig {
            algorithm: Algorithm::NegaScout,
            depth: 8,
            use_tt: true,
            ..Default::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("algorithm = \"negascout\""));
        let parsed: SearchConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn config_missing_fields_use_defaults() {
        let parsed: SearchConfig = toml::from_str("depth = 6\nalgorithm = \"scout\"").unwrap();
        assert_eq!(parsed.depth, 6);
        assert_eq!(parsed.algorithm, Algorithm::Scout);
        assert!(!parsed.use_tt);
        assert_eq!(parsed.hash_size_mb, DEFAULT_HASH_MB);
    }

    #[test]
    fn config_file_round_trip() {
        let path = std::env::temp_dir().join(format!("scoutbench_cfg_{}.toml", std::process::id()));
        let config = SearchConfig {
            algorithm: Algorithm::AlphaBeta,
            tt_min_depth: 4,
            ..Default::default()
        };
        config.save_to_file(&path).unwrap();
        let loaded = SearchConfig::load_from_file(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn window_bounds_are_negatable() {
        let widest = SearchWindow::new(i32::MIN, i32::MAX);
        assert_eq!(widest, SearchWindow::FULL);
        assert_eq!(-widest.alpha, SCORE_MAX);

        let raw = SearchWindow {
            alpha: i32::MIN,
            beta: i32::MIN,
        };
        assert_eq!(raw.clamped(), SearchWindow::new(SCORE_MIN, SCORE_MIN));
        assert_eq!(SearchWindow::new(-3, 4), SearchWindow { alpha: -3, beta: 4 });
        assert_eq!(SearchWindow::null(7), SearchWindow::new(7, 8));
    }

    #[test]
    fn stats_add() {
        let a = SearchStats {
            expanded: 2,
            generated: 5,
            ..Default::default()
        };
        let b = SearchStats {
            expanded: 1,
            generated: 3,
            tt_probes: 4,
            tt_hits: 1,
        };
        let sum = a + b;
        assert_eq!(sum.expanded, 3);
        assert_eq!(sum.generated, 8);
        assert_eq!(sum.tt_probes, 4);
        assert!((a.branching_factor() - 2.5).abs() < f64::EPSILON);
    }
}
