//! Fully-specified game state and the rules that mutate it.
//!
//! [`Game`] is the single source of truth during a session: it owns the board,
//! tracks whose turn it is and how many turns have been played, and knows
//! whether either side has already lost its AI. Action classification
//! ([`Game::classify`]) is pure and returns structured data; presentation of
//! accepted and rejected moves happens at the engine layer.

use std::fmt;

use crate::game::board::Board;
use crate::game::core::{Action, Coord, CoordPair, IllegalMove, MoveList, Player};
use crate::game::unit::UnitKind;

/// State of the wargame: board, side to move, turn counters and the
/// win-condition flags.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Player,
    turns_played: u16,
    max_turns: Option<u16>,
    attacker_has_ai: bool,
    defender_has_ai: bool,
}

/// What actually happened when a move was applied. Carries the structured
/// facts (actual damage dealt after caps, repair amounts) and renders the
/// session narration via [`fmt::Display`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A unit stepped onto an empty cell.
    Moved {
        #[allow(missing_docs)]
        player: Player,
        #[allow(missing_docs)]
        kind: UnitKind,
        #[allow(missing_docs)]
        mv: CoordPair,
    },
    /// A unit struck an enemy; combat damage is always mutual.
    Attacked {
        #[allow(missing_docs)]
        player: Player,
        #[allow(missing_docs)]
        kind: UnitKind,
        #[allow(missing_docs)]
        target: UnitKind,
        #[allow(missing_docs)]
        mv: CoordPair,
        /// Damage dealt to the target, after the no-overkill cap.
        dealt: u8,
        /// Retaliation damage taken by the acting unit.
        taken: u8,
    },
    /// A support unit restored an ally's health.
    Repaired {
        #[allow(missing_docs)]
        player: Player,
        #[allow(missing_docs)]
        kind: UnitKind,
        #[allow(missing_docs)]
        target: UnitKind,
        #[allow(missing_docs)]
        mv: CoordPair,
        #[allow(missing_docs)]
        amount: u8,
    },
    /// A unit blew itself up, damaging its whole 3×3 neighborhood.
    SelfDestructed {
        #[allow(missing_docs)]
        player: Player,
        #[allow(missing_docs)]
        kind: UnitKind,
        #[allow(missing_docs)]
        at: Coord,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moved { player, kind, mv } => write!(
                f,
                "{player}'s {kind} moves from {} to {}.",
                mv.src, mv.dst
            ),
            Self::Attacked {
                player,
                kind,
                target,
                mv,
                dealt,
                taken,
            } => write!(
                f,
                "{player}'s {kind} at {} attacks the {target} at {}! \
                 ({dealt} damage dealt, {taken} damage taken as retaliation)",
                mv.src, mv.dst
            ),
            Self::Repaired {
                player,
                kind,
                target,
                mv,
                amount,
            } => write!(
                f,
                "{player}'s {kind} at {} repairs their {target} ally at {}! \
                 ({amount} damage repaired)",
                mv.src, mv.dst
            ),
            Self::SelfDestructed { player, kind, at } => write!(
                f,
                "{player}'s {kind} at {at} explodes in a fiery blast!! \
                 (2 damage to all nearby units)"
            ),
        }
    }
}

impl Game {
    /// Creates a game with the standard initial deployment. The attacker
    /// moves first.
    #[must_use]
    pub fn new(dim: u8, max_turns: Option<u16>) -> Self {
        Self {
            board: Board::starting(dim),
            to_move: Player::Attacker,
            turns_played: 0,
            max_turns,
            attacker_has_ai: true,
            defender_has_ai: true,
        }
    }

    /// Creates a game from an explicit unit placement. Used by tests, benches
    /// and fuzz targets to reach positions that would take many turns to set
    /// up through play.
    #[must_use]
    pub fn from_setup(
        dim: u8,
        max_turns: Option<u16>,
        to_move: Player,
        units: impl IntoIterator<Item = (Coord, crate::game::unit::Unit)>,
    ) -> Self {
        let mut board = Board::empty(dim);
        for (coord, unit) in units {
            board.place(coord, unit);
        }
        let has_ai = |player| {
            board
                .player_units(player)
                .any(|(_, unit)| unit.kind == UnitKind::Ai)
        };
        Self {
            attacker_has_ai: has_ai(Player::Attacker),
            defender_has_ai: has_ai(Player::Defender),
            board,
            to_move,
            turns_played: 0,
            max_turns,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The player about to move.
    #[must_use]
    pub const fn to_move(&self) -> Player {
        self.to_move
    }

    /// The number of turns (plies) played so far.
    #[must_use]
    pub const fn turns_played(&self) -> u16 {
        self.turns_played
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn max_turns(&self) -> Option<u16> {
        self.max_turns
    }

    /// Classifies the action a move expresses, without mutating anything.
    ///
    /// The checks mirror the rulebook order: coordinate validity, unit
    /// presence and ownership, self-destruction, cardinal adjacency, and
    /// finally the destination-dependent rules (movement restrictions for
    /// slow units, attack/repair target validity).
    ///
    /// # Errors
    ///
    /// Returns the first [`IllegalMove`] rule the move violates.
    pub fn classify(&self, mv: CoordPair) -> Result<Action, IllegalMove> {
        if !self.board.contains(mv.src) || !self.board.contains(mv.dst) {
            return Err(IllegalMove::OffBoard);
        }
        let actor = self.board.get(mv.src).ok_or(IllegalMove::EmptySource)?;
        if actor.player != self.to_move {
            return Err(IllegalMove::NotYourUnit);
        }
        if mv.is_self() {
            return Ok(Action::SelfDestruct);
        }
        if !mv.is_cardinal_step() {
            return Err(IllegalMove::NotCardinal);
        }

        let Some(target) = self.board.get(mv.dst) else {
            // Plain movement. Units without free movement can only advance
            // and are pinned while engaged; attack, repair and self-destruct
            // stay available to them.
            if !actor.moves_freely() {
                let (dr, dc) = mv.delta();
                match actor.player {
                    Player::Defender if dr < 0 || dc < 0 => {
                        return Err(IllegalMove::DefenderRetreat)
                    },
                    Player::Attacker if dr > 0 || dc > 0 => {
                        return Err(IllegalMove::AttackerRetreat)
                    },
                    _ => {},
                }
                for adjacent in mv.src.adjacent() {
                    if self
                        .board
                        .get(adjacent)
                        .is_some_and(|unit| unit.player != actor.player)
                    {
                        return Err(IllegalMove::Engaged);
                    }
                }
            }
            return Ok(Action::Move);
        };

        if target.player != self.to_move {
            return Ok(Action::Attack);
        }
        if actor.repair_for(*target) > 0 {
            return Ok(Action::Repair);
        }
        Err(IllegalMove::Unrecognized)
    }

    /// Classifies and applies a move in one step.
    ///
    /// # Errors
    ///
    /// Returns the rule the move violates; the game is left untouched.
    pub fn try_move(&mut self, mv: CoordPair) -> Result<Outcome, IllegalMove> {
        let action = self.classify(mv)?;
        Ok(self.apply(mv, action))
    }

    /// Applies a move whose action was produced by [`Game::classify`] for the
    /// current state. The search uses this entry point to skip
    /// re-classification of already validated candidates.
    ///
    /// # Panics
    ///
    /// May panic if the `(mv, action)` pair does not come from
    /// [`Game::classify`] on this exact state.
    pub fn apply(&mut self, mv: CoordPair, action: Action) -> Outcome {
        match action {
            Action::Move => {
                let Some(actor) = self.board.take(mv.src) else {
                    unreachable!("classified move has a unit on the source cell")
                };
                self.board.place(mv.dst, actor);
                Outcome::Moved {
                    player: actor.player,
                    kind: actor.kind,
                    mv,
                }
            },
            Action::SelfDestruct => {
                let Some(actor) = self.board.take(mv.dst) else {
                    unreachable!("classified move has a unit on the source cell")
                };
                if actor.kind == UnitKind::Ai {
                    self.clear_ai_flag(actor.player);
                }
                for cell in mv.dst.neighborhood() {
                    self.damage_cell(cell, 2);
                }
                Outcome::SelfDestructed {
                    player: actor.player,
                    kind: actor.kind,
                    at: mv.dst,
                }
            },
            Action::Attack => {
                let (Some(actor), Some(target)) =
                    (self.board.get(mv.src).copied(), self.board.get(mv.dst).copied())
                else {
                    unreachable!("classified attack has units on both cells")
                };
                // Both amounts are computed from pre-combat healths: the
                // target retaliates even when the blow kills it.
                let dealt = actor.damage_to(target);
                let taken = target.damage_to(actor);
                self.damage_cell(mv.dst, dealt);
                self.damage_cell(mv.src, taken);
                Outcome::Attacked {
                    player: actor.player,
                    kind: actor.kind,
                    target: target.kind,
                    mv,
                    dealt,
                    taken,
                }
            },
            Action::Repair => {
                let (Some(actor), Some(target)) =
                    (self.board.get(mv.src).copied(), self.board.get(mv.dst).copied())
                else {
                    unreachable!("classified repair has units on both cells")
                };
                let amount = actor.repair_for(target);
                if let Some(target) = self.board.get_mut(mv.dst) {
                    target.restore(amount);
                }
                Outcome::Repaired {
                    player: actor.player,
                    kind: actor.kind,
                    target: target.kind,
                    mv,
                    amount,
                }
            },
        }
    }

    /// Damages the unit on the cell (if any) and removes it when it dies.
    fn damage_cell(&mut self, coord: Coord, amount: u8) {
        let Some(unit) = self.board.get_mut(coord) else {
            return;
        };
        unit.apply_damage(amount);
        if !unit.is_alive() {
            let Some(dead) = self.board.take(coord) else {
                unreachable!("the cell was just inspected")
            };
            if dead.kind == UnitKind::Ai {
                self.clear_ai_flag(dead.player);
            }
        }
    }

    fn clear_ai_flag(&mut self, player: Player) {
        match player {
            Player::Attacker => self.attacker_has_ai = false,
            Player::Defender => self.defender_has_ai = false,
        }
    }

    /// Passes the turn to the opponent.
    pub fn advance_turn(&mut self) {
        self.to_move = self.to_move.opponent();
        self.turns_played += 1;
    }

    /// Generates all legal moves for the side to move, in stable board order:
    /// for every unit the 4 cardinal steps (up/left/down/right) are probed
    /// first, self-destruction last.
    #[must_use]
    pub fn move_candidates(&self) -> MoveList {
        let mut candidates = MoveList::new();
        for (src, _) in self.board.player_units(self.to_move) {
            for dst in src.adjacent() {
                let mv = CoordPair::new(src, dst);
                if let Ok(action) = self.classify(mv) {
                    candidates.push((mv, action));
                }
            }
            let detonate = CoordPair::new(src, src);
            if let Ok(action) = self.classify(detonate) {
                candidates.push((detonate, action));
            }
        }
        candidates
    }

    /// Lazily yields every position reachable in one move, together with the
    /// move that produces it. Successors have the move applied *and* the turn
    /// advanced, so turn-limited wins are visible to the search.
    pub fn successors(&self) -> impl Iterator<Item = (Self, CoordPair)> + '_ {
        self.move_candidates().into_iter().map(|(mv, action)| {
            let mut next = self.clone();
            let _ = next.apply(mv, action);
            next.advance_turn();
            (next, mv)
        })
    }

    /// Whether the game is over and who won.
    ///
    /// The defender wins by outlasting the turn limit or by destroying the
    /// attacker's AI (including mutual destruction); the attacker only wins
    /// by destroying the defender's AI while keeping its own.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        if let Some(max_turns) = self.max_turns {
            if self.turns_played >= max_turns {
                return Some(Player::Defender);
            }
        }
        if !self.attacker_has_ai {
            return Some(Player::Defender);
        }
        if !self.defender_has_ai {
            return Some(Player::Attacker);
        }
        None
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.winner().is_some()
    }
}

impl fmt::Display for Game {
    /// Pretty text representation of the game, as shown between turns:
    /// header, column labels and one row per board rank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Next player: {}", self.to_move)?;
        match self.max_turns {
            Some(max_turns) => {
                writeln!(f, "Turns played: {}/{max_turns}", self.turns_played)?;
            },
            None => writeln!(f, "Turns played: {}", self.turns_played)?,
        }
        writeln!(f)?;
        write!(f, "   ")?;
        for col in 0..self.board.dim() as i8 {
            write!(f, "{:^3} ", Coord::new(0, col).col_label())?;
        }
        writeln!(f)?;
        for row in 0..self.board.dim() as i8 {
            write!(f, "{}: ", Coord::new(row, 0).row_label())?;
            for col in 0..self.board.dim() as i8 {
                match self.board.get(Coord::new(row, col)) {
                    Some(unit) => write!(f, "{unit} ")?,
                    None => write!(f, " .  ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::game::unit::Unit;

    #[test]
    fn attacker_moves_first() {
        let game = Game::new(5, Some(100));
        assert_eq!(game.to_move(), Player::Attacker);
        assert_eq!(game.turns_played(), 0);
        assert!(game.winner().is_none());
    }

    #[test]
    fn starting_render() {
        let expected = "Next player: Attacker\n\
                        Turns played: 0/100\n\
                        \n\
                        \x20   0   1   2   3   4  \n\
                        A: dA9 dT9 dF9  .   .  \n\
                        B: dT9 dP9  .   .   .  \n\
                        C: dF9  .   .   .  aP9 \n\
                        D:  .   .   .  aF9 aV9 \n\
                        E:  .   .  aP9 aV9 aA9 \n";
        assert_eq!(Game::new(5, Some(100)).to_string(), expected);
    }

    #[test]
    fn turn_alternation() {
        let mut game = Game::new(5, Some(100));
        game.advance_turn();
        assert_eq!(game.to_move(), Player::Defender);
        assert_eq!(game.turns_played(), 1);
        game.advance_turn();
        assert_eq!(game.to_move(), Player::Attacker);
    }

    #[test]
    fn every_candidate_is_legal_and_reapplies() {
        let game = Game::new(5, Some(100));
        let candidates = game.move_candidates();
        assert!(!candidates.is_empty());
        for (mv, action) in candidates {
            assert_eq!(game.classify(mv), Ok(action));
        }
    }

    #[test]
    fn successors_advance_the_turn() {
        let game = Game::new(5, Some(100));
        for (next, _) in game.successors() {
            assert_eq!(next.to_move(), Player::Defender);
            assert_eq!(next.turns_played(), 1);
        }
    }

    #[test]
    fn turn_limit_defaults_to_defender_win() {
        let mut game = Game::new(5, Some(2));
        game.advance_turn();
        assert!(game.winner().is_none());
        game.advance_turn();
        assert_eq!(game.winner(), Some(Player::Defender));
    }

    #[test]
    fn mutual_ai_destruction_favors_the_defender() {
        let units = [
            (
                Coord::new(0, 0),
                Unit {
                    health: 2,
                    ..Unit::new(Player::Defender, UnitKind::Ai)
                },
            ),
            (
                Coord::new(0, 1),
                Unit {
                    health: 2,
                    ..Unit::new(Player::Attacker, UnitKind::Ai)
                },
            ),
        ];
        let mut game = Game::from_setup(5, Some(100), Player::Attacker, units);
        let outcome = game.try_move(CoordPair::from_quad(0, 1, 0, 1)).unwrap();
        assert!(matches!(outcome, Outcome::SelfDestructed { .. }));
        assert_eq!(game.winner(), Some(Player::Defender));
    }
}
