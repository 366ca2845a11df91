use std::time::Duration;

use crate::prelude::*;

#[cfg(feature = "parallel")]
use {
    indicatif::{ProgressBar, ProgressStyle},
    rayon::prelude::*,
};

/// Replays `moves` from the initial position, black first.
///
/// Returns `moves.len() + 1` boards ordered from the end of the game
/// backwards: index 0 is the final position and the last index is the
/// initial one.
pub fn principal_variation(moves: &[u8]) -> miette::Result<Vec<Board>> {
    let npv = moves.len();
    let mut pv = vec![Board::new(); npv + 1];
    let mut state = Board::new();

    for (i, &pos) in moves.iter().enumerate() {
        let side = if i % 2 == 0 { Side::Black } else { Side::White };
        pv[npv - i] = state;
        state = state
            .apply(side, pos)
            .into_diagnostic()
            .with_context(|| format!("Replaying ply {} of the principal variation", i + 1))?;
    }
    pv[0] = state;

    Ok(pv)
}

/// Side to move at `pv[i]`, as a color: 1 on odd indices, -1 on even ones
#[inline]
pub const fn color_for_index(i: usize) -> Color {
    if i % 2 == 1 { 1 } else { -1 }
}

/// One line of a PV run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PvReport {
    /// Number printed in front of the line, counting down to 1
    pub ply: usize,
    pub mover: Side,
    /// Value from black's point of view
    pub value: i32,
    pub expanded: u64,
    pub generated: u64,
    pub time_taken: Duration,
}

impl PvReport {
    pub fn new(ply: usize, result: &SearchResult) -> Self {
        Self {
            ply,
            mover: Side::from_color(result.color),
            value: result.value(),
            expanded: result.stats.expanded,
            generated: result.stats.generated,
            time_taken: result.time_taken,
        }
    }

    pub fn seconds(&self) -> f64 {
        self.time_taken.as_secs_f64()
    }

    pub fn generated_per_second(&self) -> f64 {
        let secs = self.seconds();
        if secs > 0.0 {
            self.generated as f64 / secs
        } else {
            0.0
        }
    }
}

impl Display for PvReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}. {} moves: value={}, #expanded={}, #generated={}, seconds={:.6}, #generated/second={:.0}",
            self.ply,
            self.mover,
            self.value,
            self.expanded,
            self.generated,
            self.seconds(),
            self.generated_per_second()
        )
    }
}

/// Header naming the algorithm and whether a table is engaged
pub fn run_header(algorithm: Algorithm, use_tt: bool) -> String {
    format!(
        "Algorithm: {algorithm}{}",
        if use_tt { " w/ transposition table" } else { "" }
    )
}

/// Solves the principal-variation positions from the end of the game
/// backwards with `config.algorithm`.
///
/// `max_positions` limits the run to the first positions (the cheapest
/// ones). Lines are printed as they complete when `config.emit_info` is set.
pub fn run_pv(config: &SearchConfig, max_positions: Option<usize>) -> miette::Result<Vec<PvReport>> {
    let pv = principal_variation(&PV)?;
    let npv = PV.len();
    let count = max_positions.map_or(pv.len(), |n| n.min(pv.len()));

    let mut searcher = Searcher::from_config(config);
    if config.use_tt && !searcher.has_tt() {
        warn!("Continuing without a transposition table");
    }

    if config.emit_info {
        println!("Extracting principal variation (PV) with {npv} plays ... done!");
        println!("{}", run_header(config.algorithm, searcher.has_tt()));
        println!("Moving along PV:");
    }

    let mut reports = Vec::with_capacity(count);
    for (i, board) in pv.iter().take(count).enumerate() {
        searcher.clear_tt();
        let color = color_for_index(i);
        let result = searcher.run(config.algorithm, board, config.depth, color);
        let report = PvReport::new(npv + 1 - i, &result);

        debug!("position {i}: {report}");
        if config.emit_info {
            println!("{report}");
        }
        reports.push(report);
    }

    Ok(reports)
}

/// Outcome of cross-checking every algorithm against Negamax
#[derive(Debug, Default, Clone)]
pub struct VerifySummary {
    pub positions: usize,
    pub checks: usize,
    /// `(position, algorithm, expected, found)` for each disagreement
    pub mismatches: Vec<(usize, Algorithm, i32, i32)>,
}

impl VerifySummary {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Checks that every algorithm agrees with Negamax on the first
/// `positions` PV positions at `depth`.
///
/// Errors when any value differs, the summary is returned otherwise.
pub fn verify(depth: u16, positions: usize, use_tt: bool) -> miette::Result<VerifySummary> {
    let pv = principal_variation(&PV)?;
    let indices: Vec<usize> = (0..positions.min(pv.len())).collect();

    let check_position = |&i: &usize| -> Vec<(usize, Algorithm, i32, i32)> {
        let board = &pv[i];
        let color = color_for_index(i);
        let mut plain = Searcher::new();
        let mut cached = if use_tt {
            Searcher::new().with_tt(DEFAULT_HASH_MB, SearchConfig::default().tt_min_depth)
        } else {
            Searcher::new()
        };

        let expected = plain.run(Algorithm::Negamax, board, depth, color).value();
        Algorithm::ALL
            .iter()
            .skip(1)
            .filter_map(|&algorithm| {
                let searcher = if algorithm.uses_tt() { &mut cached } else { &mut plain };
                searcher.clear_tt();
                let found = searcher.run(algorithm, board, depth, color).value();
                (found != expected).then_some((i, algorithm, expected, found))
            })
            .collect()
    };

    #[cfg(feature = "parallel")]
    let mismatches: Vec<_> = {
        let pb = ProgressBar::new(indices.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
                .into_diagnostic()?
                .progress_chars("#>-"),
        );
        let found = indices
            .par_iter()
            .map(|i| {
                let result = check_position(i);
                pb.inc(1);
                result
            })
            .flatten()
            .collect();
        pb.finish_with_message("Done");
        found
    };

    #[cfg(not(feature = "parallel"))]
    let mismatches: Vec<_> = indices.iter().flat_map(check_position).collect();

    let summary = VerifySummary {
        positions: indices.len(),
        checks: indices.len() * (Algorithm::ALL.len() - 1),
        mismatches,
    };

    for (i, algorithm, expected, found) in &summary.mismatches {
        error!("position {i}: {algorithm} found {found}, Negamax found {expected}");
    }
    miette::ensure!(
        summary.passed(),
        "{} of {} checks disagree with Negamax at depth {depth}",
        summary.mismatches.len(),
        summary.checks
    );

    info!(
        "Verified {} positions ({} checks) at depth {depth}",
        summary.positions, summary.checks
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pv_is_ordered_backwards() {
        let pv = principal_variation(&PV).unwrap();
        assert_eq!(pv.len(), PV.len() + 1);
        assert_eq!(pv[PV.len()], Board::new());
        assert!(pv[0].terminal());
        assert_eq!(pv[0].value(), -4);
        // pv[npv - 1] is the position after black's first move
        assert_eq!(pv[PV.len() - 1], Board::new().apply(Side::Black, PV[0]).unwrap());
    }

    #[test]
    fn illegal_pv_is_reported() {
        // 4 is a corner, never legal on the first move
        let err = principal_variation(&[4]).unwrap_err();
        assert!(format!("{err:?}").contains("ply 1"));
    }

    #[test]
    fn colors_alternate() {
        assert_eq!(color_for_index(0), -1);
        assert_eq!(color_for_index(1), 1);
        assert_eq!(color_for_index(32), -1);
    }

    #[test]
    fn report_line_format() {
        let report = PvReport {
            ply: 34,
            mover: Side::White,
            value: -4,
            expanded: 0,
            generated: 0,
            time_taken: Duration::ZERO,
        };
        assert_eq!(
            report.to_string(),
            "34. White moves: value=-4, #expanded=0, #generated=0, seconds=0.000000, #generated/second=0"
        );
    }

    #[test]
    fn header_names_the_table() {
        assert_eq!(
            run_header(Algorithm::Scout, false),
            "Algorithm: Scout"
        );
        assert_eq!(
            run_header(Algorithm::NegaScout, true),
            "Algorithm: Negascout w/ transposition table"
        );
    }

    #[test]
    fn run_pv_end_of_game() {
        let config = SearchConfig {
            algorithm: Algorithm::AlphaBeta,
            emit_info: false,
            use_tt: true,
            hash_size_mb: 1,
            ..Default::default()
        };
        let reports = run_pv(&config, Some(8)).unwrap();
        assert_eq!(reports.len(), 8);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.value, -4);
            assert_eq!(report.ply, PV.len() + 1 - i);
            assert_eq!(report.mover, Side::from_color(color_for_index(i)));
        }
        // The final position is terminal, nothing gets searched
        assert_eq!(reports[0].generated, 0);
    }

    #[test]
    fn verify_shallow() {
        let summary = verify(3, 6, true).unwrap();
        assert!(summary.passed());
        assert_eq!(summary.positions, 6);
        assert_eq!(summary.checks, 18);
    }
}
