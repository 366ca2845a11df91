//! NegaScout (principal variation search) in negamax form.
//!
//! The first child gets the full window, later children a null window
//! around alpha. A probe that lands strictly inside `(alpha, beta)` did not
//! settle the value and the child is searched again over `(score, beta)`.

use std::cmp::max;

use crate::prelude::*;
use crate::search::tt::Probe;
use crate::search::{children, is_leaf};

impl Searcher {
    /// Color-oriented value of `state` searched over `window`.
    /// With [`SearchWindow::FULL`] this equals [`Searcher::negamax`].
    pub fn negascout<S: GameState>(
        &mut self,
        state: &S,
        depth: u16,
        window: SearchWindow,
        color: Color,
    ) -> i32 {
        self.begin();
        let window = window.clamped();
        self.negascout_node(state, depth, window.alpha, window.beta, color)
    }

    fn negascout_node<S: GameState>(
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
        let mut first = true;

        for child in children(state, color) {
            self.stats.generated += 1;

            let score = if first {
                first = false;
                -self.negascout_node(&child, depth - 1, -beta, -alpha, -color)
            } else {
                let probe = -self.negascout_node(&child, depth - 1, -alpha - 1, -alpha, -color);
                if alpha < probe && probe < beta {
                    -self.negascout_node(&child, depth - 1, -beta, -probe, -color)
                } else {
                    probe
                }
            };

            alpha = max(alpha, score);
            if alpha >= beta {
                break;
            }
        }

        self.stats.expanded += 1;
        self.tt_store(state, depth, color, alpha, original_alpha, beta);
        alpha
    }
}
