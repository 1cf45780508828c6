//! The uniform zero evaluator: `h(n) = 0` for every position.
//!
//! Useless for play strength, but it makes the search fully deterministic and
//! is the baseline for testing the search infrastructure (any decisive score
//! it returns comes from lookahead alone).

use crate::evaluation::Value;
use crate::game::state::Game;

pub(crate) fn defender_advantage(_game: &Game) -> Value {
    0
}
