//! Configuration options for a game session.

use std::str::FromStr;

use anyhow::bail;

use crate::evaluation::Heuristic;
use crate::game::core::Player;

/// Who controls each side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum GameType {
    AttackerVsDefender,
    AttackerVsComp,
    CompVsDefender,
    CompVsComp,
}

impl GameType {
    /// Human-readable mode name, shown in the welcome banner.
    #[must_use]
    pub const fn mode_name(self) -> &'static str {
        match self {
            Self::AttackerVsDefender => "Human (A) vs. Human (D)",
            Self::AttackerVsComp => "Human (A) vs. Computer (D)",
            Self::CompVsDefender => "Computer (A) vs. Human (D)",
            Self::CompVsComp => "Computer (A) vs. Computer (D)",
        }
    }

    /// Whether the given side is controlled by a human.
    #[must_use]
    pub const fn human_plays(self, player: Player) -> bool {
        match self {
            Self::AttackerVsDefender => true,
            Self::AttackerVsComp => matches!(player, Player::Attacker),
            Self::CompVsDefender => matches!(player, Player::Defender),
            Self::CompVsComp => false,
        }
    }
}

impl FromStr for GameType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "manual" => Ok(Self::AttackerVsDefender),
            "attacker" => Ok(Self::AttackerVsComp),
            "defender" => Ok(Self::CompVsDefender),
            "auto" => Ok(Self::CompVsComp),
            _ => bail!("unknown game type: {s} (expected auto|attacker|defender|manual)"),
        }
    }
}

/// Session configuration: board size, turn limit, who plays whom, and the
/// knobs of the computer players.
#[derive(Clone, Debug)]
pub struct Options {
    /// Board dimension; the board is always square.
    pub dim: u8,
    /// Deepest iteration of the iterative-deepening search.
    pub max_depth: u8,
    /// First iteration of the iterative-deepening search. It always runs to
    /// completion, so a suggestion exists even under a tight time budget.
    pub min_depth: u8,
    /// Wall-clock budget per suggestion, in seconds. `None` removes the
    /// limit.
    pub max_time: Option<f64>,
    #[allow(missing_docs)]
    pub game_type: GameType,
    /// Prune with alpha-beta; turning this off falls back to plain minimax
    /// (mostly useful for comparing the two).
    pub alpha_beta: bool,
    /// Turn limit after which the defender wins by default.
    pub max_turns: Option<u16>,
    /// Shuffle root moves so equally scored suggestions vary between
    /// sessions.
    pub randomize_moves: bool,
    /// Static evaluator used by the computer players.
    pub heuristic: Heuristic,
    /// Base URL of the game broker used to exchange moves with a remote
    /// opponent.
    pub broker: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dim: 5,
            max_depth: 4,
            min_depth: 2,
            max_time: Some(5.0),
            game_type: GameType::AttackerVsDefender,
            alpha_beta: true,
            max_turns: Some(100),
            randomize_moves: true,
            heuristic: Heuristic::Material,
            broker: None,
        }
    }
}
