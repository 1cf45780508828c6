//! Provides a very basic implementation of evaluation based on material
//! advantage, counting units with fixed per-kind weights.
//!
//! While not very subtle, this evaluation function is great for testing
//! search and other infrastructure, because it is stable (the weights are
//! fixed), easy to understand and deterministic. The AI unit is weighted
//! overwhelmingly: losing it loses the game, so no amount of other material
//! compensates.

use crate::evaluation::Value;
use crate::game::core::Player;
use crate::game::state::Game;
use crate::game::unit::UnitKind;

const AI_VALUE: Value = 9999;
const TECH_VALUE: Value = 3;
const VIRUS_VALUE: Value = 3;
const PROGRAM_VALUE: Value = 3;
const FIREWALL_VALUE: Value = 3;

pub(crate) const fn unit_value(kind: UnitKind) -> Value {
    match kind {
        UnitKind::Ai => AI_VALUE,
        UnitKind::Tech => TECH_VALUE,
        UnitKind::Virus => VIRUS_VALUE,
        UnitKind::Program => PROGRAM_VALUE,
        UnitKind::Firewall => FIREWALL_VALUE,
    }
}

pub(crate) fn defender_advantage(game: &Game) -> Value {
    let mut advantage = 0;
    for (_, unit) in game.board().units() {
        let value = unit_value(unit.kind);
        match unit.player {
            Player::Defender => advantage += value,
            Player::Attacker => advantage -= value,
        }
    }
    advantage
}
