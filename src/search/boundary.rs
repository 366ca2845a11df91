//! Boundary test: does a subtree's value exceed (or reach) a bound?
//!
//! Values are read from the fixed reference side, the same orientation
//! Scout works in. A maximizing node succeeds on its first succeeding
//! child, a minimizing node fails on its first failing child.

use crate::prelude::*;
use crate::search::{MAX_COLOR, children, is_leaf};

/// Comparison applied against the bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// `value > bound`
    Greater,
    /// `value >= bound`
    GreaterOrEqual,
}

impl Condition {
    pub const fn from_strict(strict: bool) -> Self {
        if strict {
            Condition::Greater
        } else {
            Condition::GreaterOrEqual
        }
    }

    #[inline(always)]
    pub const fn holds(&self, value: i32, bound: i32) -> bool {
        match self {
            Condition::Greater => value > bound,
            Condition::GreaterOrEqual => value >= bound,
        }
    }
}

impl Searcher {
    /// Whether the value of `state` searched `depth` plies deep is `> bound`
    /// (`strict`) or `>= bound`.
    pub fn boundary_test<S: GameState>(
        &mut self,
        state: &S,
        depth: u16,
        color: Color,
        bound: i32,
        strict: bool,
    ) -> bool {
        self.begin();
        self.test_node(state, depth, color, bound, Condition::from_strict(strict))
    }

    pub(crate) fn test_node<S: GameState>(
        &mut self,
        state: &S,
        depth: u16,
        color: Color,
        bound: i32,
        cond: Condition,
    ) -> bool {
        if is_leaf(state, depth) {
            return cond.holds(state.value(), bound);
        }

        let is_max = color == MAX_COLOR;
        // Exhausting the children fails a max node and passes a min node
        let mut result = !is_max;

        for child in children(state, color) {
            self.stats.generated += 1;

            let child_result = self.test_node(&child, depth - 1, -color, bound, cond);
            if is_max && child_result {
                result = true;
                break;
            }
            if !is_max && !child_result {
                result = false;
                break;
            }
        }

        self.stats.expanded += 1;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_holds() {
        assert!(Condition::Greater.holds(3, 2));
        assert!(!Condition::Greater.holds(3, 3));
        assert!(Condition::GreaterOrEqual.holds(3, 3));
        assert!(!Condition::GreaterOrEqual.holds(2, 3));
        assert_eq!(Condition::from_strict(true), Condition::Greater);
    }

    #[test]
    fn leaf_compares_directly() {
        let board = Board::new().apply(Side::Black, 12).unwrap();
        let mut searcher = Searcher::new();
        for color in [1, -1] {
            assert!(searcher.boundary_test(&board, 0, color, 2, true));
            assert!(!searcher.boundary_test(&board, 0, color, 3, true));
            assert!(searcher.boundary_test(&board, 0, color, 3, false));
            assert_eq!(searcher.stats(), SearchStats::default());
        }
    }
}
