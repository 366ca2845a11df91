//! Full-width negamax, the reference every other search must agree with.

use crate::prelude::*;
use crate::search::{children, is_leaf};

impl Searcher {
    /// Color-oriented value of `state` searched `depth` plies deep.
    pub fn negamax<S: GameState>(&mut self, state: &S, depth: u16, color: Color) -> i32 {
        self.begin();
        self.negamax_node(state, depth, color)
    }

    fn negamax_node<S: GameState>(&mut self, state: &S, depth: u16, color: Color) -> i32 {
        if is_leaf(state, depth) {
            return color * state.value();
        }

        let mut score = SCORE_MIN;
        for child in children(state, color) {
            self.stats.generated += 1;
            score = score.max(-self.negamax_node(&child, depth - 1, -color));
        }

        self.stats.expanded += 1;
        score
    }
}
