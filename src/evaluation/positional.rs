//! Positional evaluation: health-weighted material plus attacker pressure.
//!
//! Material alone cannot tell a cornered attack from a stalled one: until a
//! unit actually dies every position scores the same. This evaluator scales
//! unit values by remaining health (wounded units are worth less) and adds a
//! pressure term for how close the attacker's units have crept to the
//! defender's AI. The attacker only wins by reaching that AI before the turn
//! limit, so proximity is initiative.

use crate::evaluation::{material, Value};
use crate::game::core::{Coord, Player};
use crate::game::state::Game;
use crate::game::unit::UnitKind;

/// Per-step weight of the pressure term. Small enough that pressure never
/// outweighs a unit kill.
const PRESSURE_WEIGHT: Value = 1;

fn manhattan(a: Coord, b: Coord) -> Value {
    Value::from((a.row - b.row).abs()) + Value::from((a.col - b.col).abs())
}

pub(crate) fn defender_advantage(game: &Game) -> Value {
    let mut advantage = 0;
    let mut defender_ai = None;
    for (coord, unit) in game.board().units() {
        let value = material::unit_value(unit.kind) * Value::from(unit.health);
        match unit.player {
            Player::Defender => {
                advantage += value;
                if unit.kind == UnitKind::Ai {
                    defender_ai = Some(coord);
                }
            },
            Player::Attacker => advantage -= value,
        }
    }

    // Pressure: every step an attacker unit is closer to the defender's AI
    // counts against the defender. With no AI on the board the game is
    // already decided and the term is moot.
    if let Some(ai) = defender_ai {
        let reach = Value::from(game.board().dim()) * 2;
        for (coord, _) in game.board().player_units(Player::Attacker) {
            advantage -= PRESSURE_WEIGHT * (reach - manhattan(coord, ai));
        }
    }
    advantage
}
