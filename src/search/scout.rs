//! Scout: the first child is valued exactly, every later child is first
//! probed with the boundary test and only re-searched when the probe says
//! it can improve the running best.

use crate::prelude::*;
use crate::search::boundary::Condition;
use crate::search::{MAX_COLOR, children, is_leaf};

impl Searcher {
    /// Value of `state` from the fixed reference side, `depth` plies deep.
    /// Equals `color * negamax(state, depth, color)`.
    pub fn scout<S: GameState>(&mut self, state: &S, depth: u16, color: Color) -> i32 {
        self.begin();
        self.scout_node(state, depth, color)
    }

    fn scout_node<S: GameState>(&mut self, state: &S, depth: u16, color: Color) -> i32 {
        if is_leaf(state, depth) {
            return state.value();
        }

        let is_max = color == MAX_COLOR;
        let mut score = 0;
        let mut first = true;

        for child in children(state, color) {
            self.stats.generated += 1;

            if first {
                first = false;
                score = self.scout_node(&child, depth - 1, -color);
                continue;
            }

            let improves = if is_max {
                self.test_node(&child, depth - 1, -color, score, Condition::Greater)
            } else {
                !self.test_node(&child, depth - 1, -color, score, Condition::GreaterOrEqual)
            };

            if improves {
                score = self.scout_node(&child, depth - 1, -color);
            }
        }

        self.stats.expanded += 1;
        score
    }
}
