//! Negamax with fail-soft alpha-beta pruning.
//!
//! The score returned for a node may fall outside the window it was
//! searched with. Callers (and the transposition table) rely on that.

use std::cmp::max;

use crate::prelude::*;
use crate::search::tt::Probe;
use crate::search::{children, is_leaf};

impl Searcher {
    /// Color-oriented value of `state` searched over `window`.
    /// With [`SearchWindow::FULL`] this equals [`Searcher::negamax`].
    pub fn alpha_beta<S: GameState>(
        &mut self,
        state: &S,
        depth: u16,
        window: SearchWindow,
        color: Color,
    ) -> i32 {
        self.begin();
        let window = window.clamped();
        self.alpha_beta_node(state, depth, window.alpha, window.beta, color)
    }

    fn alpha_beta_node<S: GameState>(
        &mut self,
        state: &S,
        depth: u16,
        alpha: i32,
        beta: i32,
        color: Color,
    ) -> i32 {
        if is_leaf(state, depth) {
            return color * state.value();
        }

        let (mut alpha, beta) = match self.tt_probe(state, depth, color, alpha, beta) {
            Probe::Cutoff(score) => return score,
            Probe::Window(alpha, beta) => (alpha, beta),
        };
        let original_alpha = alpha;

        let mut score = SCORE_MIN;
        for child in children(state, color) {
            self.stats.generated += 1;

            let val = -self.alpha_beta_node(&child, depth - 1, -beta, -alpha, -color);
            score = max(score, val);
            alpha = max(alpha, val);

            if alpha >= beta {
                // Beta cutoff, remaining siblings are skipped
                break;
            }
        }

        self.stats.expanded += 1;
        self.tt_store(state, depth, color, score, original_alpha, beta);
        score
    }
}
