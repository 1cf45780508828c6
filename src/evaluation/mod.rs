//! This module implements "static" evaluation, i.e. predicting the relative
//! value of a given position without [`crate::search`].
//!
//! Evaluators are side-to-move-relative: positive values favor the player
//! about to move, which lets the search negate scores uniformly.

use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use anyhow::bail;

use crate::game::core::Player;
use crate::game::state::Game;

pub(crate) mod material;
pub(crate) mod positional;
pub(crate) mod trivial;

/// Raw evaluator output. Thin `i32` alias for ergonomics: scores are stored
/// and compared in the innermost search loop.
pub type Value = i32;

/// The static evaluators a computer player can be configured with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Heuristic {
    /// Constant zero; turns the search into blind lookahead for decisive
    /// lines. Deterministic and great for testing the search machinery.
    Trivial,
    /// Weighted unit-count differential.
    Material,
    /// Material weighted by health, plus pressure of attacker units on the
    /// defender's AI.
    Positional,
}

impl Heuristic {
    /// Evaluates the position from the perspective of the side to move.
    #[must_use]
    pub fn evaluate(self, game: &Game) -> Value {
        let advantage = match self {
            Self::Trivial => trivial::defender_advantage(game),
            Self::Material => material::defender_advantage(game),
            Self::Positional => positional::defender_advantage(game),
        };
        match game.to_move() {
            Player::Defender => advantage,
            Player::Attacker => -advantage,
        }
    }
}

impl FromStr for Heuristic {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "trivial" => Ok(Self::Trivial),
            "material" => Ok(Self::Material),
            "positional" => Ok(Self::Positional),
            _ => bail!("unknown heuristic: {s} (expected trivial|material|positional)"),
        }
    }
}

/// The score of a searched line: either a heuristic estimate or a decisive
/// "win in N plies" result.
///
/// A compact `i32` representation is used in both cases:
/// `(INFINITY - WIN_RANGE, INFINITY]` is reserved for wins (and its mirror
/// for losses), everything in between is heuristic. The bound matches the
/// sentinel the heuristics must stay inside of.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score {
    value: Value,
}

impl Score {
    pub(crate) const INFINITY: Self = Self {
        value: 2_000_000_000,
    };
    /// Lower bound of any search window.
    pub const MIN: Self = Self {
        value: -Self::INFINITY.value,
    };
    /// Upper bound of any search window.
    pub const MAX: Self = Self::INFINITY;

    /// `(INFINITY - WIN_RANGE, INFINITY]` and its negative mirror are
    /// reserved for decisive scores; heuristic values must stay inside
    /// `[-INFINITY + WIN_RANGE, INFINITY - WIN_RANGE]`.
    const WIN_RANGE: Value = 1000;

    /// Wraps a heuristic estimate.
    ///
    /// # Panics
    ///
    /// Panics if the value falls inside the reserved decisive band.
    #[must_use]
    pub fn heuristic(value: Value) -> Self {
        assert!(value.abs() <= Self::INFINITY.value - Self::WIN_RANGE);
        Self { value }
    }

    /// A win for the side to move in `plies` half-moves. Nearer wins compare
    /// greater, so the search naturally prefers the fastest kill.
    #[must_use]
    pub fn win_in(plies: u8) -> Self {
        Self {
            value: Self::INFINITY.value - Value::from(plies),
        }
    }

    /// Whether this is a decisive (win/loss) score rather than an estimate.
    #[must_use]
    pub fn is_decisive(self) -> bool {
        self.value.abs() > Self::INFINITY.value - Self::WIN_RANGE
    }

    /// Plies until the win (positive) or the loss (negative).
    ///
    /// # Panics
    ///
    /// Panics if the score is not decisive.
    #[must_use]
    pub fn plies(self) -> i16 {
        assert!(self.is_decisive());
        let plies = (Self::INFINITY.value - self.value.abs()) as i16;
        if self.value > 0 {
            plies
        } else {
            -plies
        }
    }
}

impl Neg for Score {
    type Output = Self;

    /// Mirrors the score to the other player's perspective.
    fn neg(self) -> Self::Output {
        Self { value: -self.value }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_decisive() {
            if self.value > 0 {
                write!(f, "win in {}", self.plies())
            } else {
                write!(f, "loss in {}", -self.plies())
            }
        } else {
            write!(f, "{}", self.value)
        }
    }
}
