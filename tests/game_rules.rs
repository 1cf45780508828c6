use ai_wargame::game::core::{Action, Coord, CoordPair, IllegalMove, Player};
use ai_wargame::game::state::{Game, Outcome};
use ai_wargame::game::unit::{Unit, UnitKind, MAX_HEALTH};
use pretty_assertions::assert_eq;

fn unit(player: Player, kind: UnitKind) -> Unit {
    Unit::new(player, kind)
}

fn wounded(player: Player, kind: UnitKind, health: u8) -> Unit {
    Unit { health, ..Unit::new(player, kind) }
}

/// Both AIs far apart plus whatever the test places in between.
fn skirmish(
    to_move: Player,
    extra: impl IntoIterator<Item = (Coord, Unit)>,
) -> Game {
    let mut units = vec![
        (Coord::new(0, 0), unit(Player::Defender, UnitKind::Ai)),
        (Coord::new(4, 4), unit(Player::Attacker, UnitKind::Ai)),
    ];
    units.extend(extra);
    Game::from_setup(5, Some(100), to_move, units)
}

#[test]
fn classification_order() {
    let game = Game::new(5, Some(100));

    // Off-board coordinates are rejected before anything else.
    assert_eq!(
        game.classify(CoordPair::from_quad(0, 0, -1, 0)),
        Err(IllegalMove::OffBoard)
    );
    assert_eq!(
        game.classify(CoordPair::from_quad(7, 7, 7, 7)),
        Err(IllegalMove::OffBoard)
    );
    // An empty source cell has nothing to move.
    assert_eq!(
        game.classify(CoordPair::from_quad(2, 2, 2, 3)),
        Err(IllegalMove::EmptySource)
    );
    // The attacker moves first and cannot touch defender units.
    assert_eq!(
        game.classify(CoordPair::from_quad(0, 0, 0, 1)),
        Err(IllegalMove::NotYourUnit)
    );
    // Diagonal steps are never legal.
    assert_eq!(
        game.classify(CoordPair::from_quad(3, 3, 2, 2)),
        Err(IllegalMove::NotCardinal)
    );
    // Two-cell jumps neither.
    assert_eq!(
        game.classify(CoordPair::from_quad(2, 4, 0, 4)),
        Err(IllegalMove::NotCardinal)
    );
}

#[test]
fn slow_units_cannot_retreat() {
    let game = skirmish(
        Player::Attacker,
        [(Coord::new(2, 2), unit(Player::Attacker, UnitKind::Program))],
    );
    assert_eq!(
        game.classify(CoordPair::from_quad(2, 2, 3, 2)),
        Err(IllegalMove::AttackerRetreat)
    );
    assert_eq!(
        game.classify(CoordPair::from_quad(2, 2, 2, 3)),
        Err(IllegalMove::AttackerRetreat)
    );
    assert_eq!(
        game.classify(CoordPair::from_quad(2, 2, 1, 2)),
        Ok(Action::Move)
    );

    let game = skirmish(
        Player::Defender,
        [(Coord::new(2, 2), unit(Player::Defender, UnitKind::Firewall))],
    );
    assert_eq!(
        game.classify(CoordPair::from_quad(2, 2, 1, 2)),
        Err(IllegalMove::DefenderRetreat)
    );
    assert_eq!(
        game.classify(CoordPair::from_quad(2, 2, 3, 2)),
        Ok(Action::Move)
    );
}

#[test]
fn fast_units_move_freely() {
    let game = skirmish(
        Player::Attacker,
        [
            (Coord::new(2, 2), unit(Player::Attacker, UnitKind::Virus)),
            (Coord::new(1, 2), unit(Player::Defender, UnitKind::Program)),
        ],
    );
    // Retreating and disengaging at once: legal for a virus.
    assert_eq!(
        game.classify(CoordPair::from_quad(2, 2, 3, 2)),
        Ok(Action::Move)
    );
}

#[test]
fn engaged_units_are_pinned_but_not_disarmed() {
    let game = skirmish(
        Player::Attacker,
        [
            (Coord::new(2, 2), unit(Player::Attacker, UnitKind::Program)),
            (Coord::new(1, 2), unit(Player::Defender, UnitKind::Program)),
        ],
    );
    // Moving away (even forward) is denied while engaged...
    assert_eq!(
        game.classify(CoordPair::from_quad(2, 2, 2, 1)),
        Err(IllegalMove::Engaged)
    );
    // ...but attacking and self-destructing stay available.
    assert_eq!(
        game.classify(CoordPair::from_quad(2, 2, 1, 2)),
        Ok(Action::Attack)
    );
    assert_eq!(
        game.classify(CoordPair::from_quad(2, 2, 2, 2)),
        Ok(Action::SelfDestruct)
    );
}

#[test]
fn combat_is_mutual() {
    let mut game = skirmish(
        Player::Attacker,
        [
            (Coord::new(2, 2), unit(Player::Attacker, UnitKind::Virus)),
            (Coord::new(1, 2), unit(Player::Defender, UnitKind::Tech)),
        ],
    );
    let outcome = game.try_move(CoordPair::from_quad(2, 2, 1, 2)).unwrap();
    assert_eq!(
        outcome,
        Outcome::Attacked {
            player: Player::Attacker,
            kind: UnitKind::Virus,
            target: UnitKind::Tech,
            mv: CoordPair::from_quad(2, 2, 1, 2),
            dealt: 6,
            taken: 6,
        }
    );
    assert_eq!(game.board().get(Coord::new(1, 2)).unwrap().health, 3);
    assert_eq!(game.board().get(Coord::new(2, 2)).unwrap().health, 3);
}

#[test]
fn overkill_is_capped_and_the_dead_retaliate() {
    let mut game = skirmish(
        Player::Attacker,
        [
            (Coord::new(2, 2), unit(Player::Attacker, UnitKind::Virus)),
            (
                Coord::new(1, 2),
                wounded(Player::Defender, UnitKind::Tech, 2),
            ),
        ],
    );
    let outcome = game.try_move(CoordPair::from_quad(2, 2, 1, 2)).unwrap();
    let Outcome::Attacked { dealt, taken, .. } = outcome else {
        panic!("expected an attack, got {outcome:?}");
    };
    // 6 table damage capped to the 2 health the tech had left; the dying
    // tech still retaliates with its full 6.
    assert_eq!(dealt, 2);
    assert_eq!(taken, 6);
    assert!(game.board().get(Coord::new(1, 2)).is_none());
    assert_eq!(game.board().get(Coord::new(2, 2)).unwrap().health, 3);
}

#[test]
fn repair_restores_capped_health() {
    let mut game = skirmish(
        Player::Defender,
        [
            (Coord::new(2, 2), unit(Player::Defender, UnitKind::Tech)),
            (
                Coord::new(1, 2),
                wounded(Player::Defender, UnitKind::Program, 8),
            ),
        ],
    );
    let outcome = game.try_move(CoordPair::from_quad(2, 2, 1, 2)).unwrap();
    assert_eq!(
        outcome,
        Outcome::Repaired {
            player: Player::Defender,
            kind: UnitKind::Tech,
            target: UnitKind::Program,
            mv: CoordPair::from_quad(2, 2, 1, 2),
            amount: 1,
        }
    );
    assert_eq!(
        game.board().get(Coord::new(1, 2)).unwrap().health,
        MAX_HEALTH
    );
}

#[test]
fn pointless_repairs_are_rejected() {
    // Full-health ally: nothing to repair.
    let game = skirmish(
        Player::Defender,
        [
            (Coord::new(2, 2), unit(Player::Defender, UnitKind::Tech)),
            (Coord::new(1, 2), unit(Player::Defender, UnitKind::Program)),
        ],
    );
    assert_eq!(
        game.classify(CoordPair::from_quad(2, 2, 1, 2)),
        Err(IllegalMove::Unrecognized)
    );

    // A virus cannot repair anything, wounded or not.
    let game = skirmish(
        Player::Attacker,
        [
            (Coord::new(2, 2), unit(Player::Attacker, UnitKind::Virus)),
            (
                Coord::new(1, 2),
                wounded(Player::Attacker, UnitKind::Program, 1),
            ),
        ],
    );
    assert_eq!(
        game.classify(CoordPair::from_quad(2, 2, 1, 2)),
        Err(IllegalMove::Unrecognized)
    );
}

#[test]
fn self_destruct_damages_the_whole_neighborhood() {
    let mut game = skirmish(
        Player::Attacker,
        [
            (Coord::new(2, 2), unit(Player::Attacker, UnitKind::Program)),
            (Coord::new(1, 1), unit(Player::Defender, UnitKind::Program)),
            (Coord::new(1, 2), unit(Player::Defender, UnitKind::Firewall)),
            (Coord::new(3, 3), unit(Player::Attacker, UnitKind::Virus)),
            (Coord::new(2, 4), unit(Player::Defender, UnitKind::Tech)),
        ],
    );
    let outcome = game.try_move(CoordPair::from_quad(2, 2, 2, 2)).unwrap();
    assert_eq!(
        outcome,
        Outcome::SelfDestructed {
            player: Player::Attacker,
            kind: UnitKind::Program,
            at: Coord::new(2, 2),
        }
    );
    // The exploding unit is gone and every neighbor (friend or foe) took 2.
    assert!(game.board().get(Coord::new(2, 2)).is_none());
    assert_eq!(game.board().get(Coord::new(1, 1)).unwrap().health, 7);
    assert_eq!(game.board().get(Coord::new(1, 2)).unwrap().health, 7);
    assert_eq!(game.board().get(Coord::new(3, 3)).unwrap().health, 7);
    // Outside the 3×3 blast: untouched.
    assert_eq!(
        game.board().get(Coord::new(2, 4)).unwrap().health,
        MAX_HEALTH
    );
}

#[test]
fn killing_the_defender_ai_wins_the_game() {
    let mut game = Game::from_setup(
        5,
        Some(100),
        Player::Attacker,
        [
            (Coord::new(0, 0), wounded(Player::Defender, UnitKind::Ai, 9)),
            (Coord::new(0, 1), unit(Player::Attacker, UnitKind::Virus)),
            (Coord::new(4, 4), unit(Player::Attacker, UnitKind::Ai)),
        ],
    );
    assert!(game.winner().is_none());
    let _ = game.try_move(CoordPair::from_quad(0, 1, 0, 0)).unwrap();
    game.advance_turn();
    assert_eq!(game.winner(), Some(Player::Attacker));
    assert!(game.is_finished());
}

#[test]
fn starting_position_has_twelve_attacker_candidates() {
    // Every unit can self-destruct; only the two programs and the firewall
    // have empty cells to step into.
    let game = Game::new(5, Some(100));
    let candidates = game.move_candidates();
    assert_eq!(candidates.len(), 12);
    assert_eq!(
        candidates
            .iter()
            .filter(|(_, action)| *action == Action::SelfDestruct)
            .count(),
        6
    );
    assert_eq!(
        candidates
            .iter()
            .filter(|(_, action)| *action == Action::Move)
            .count(),
        6
    );
}

#[test]
fn move_narrations() {
    let mut game = Game::new(5, Some(100));
    let outcome = game.try_move(CoordPair::from_quad(2, 4, 1, 4)).unwrap();
    assert_eq!(
        outcome.to_string(),
        "Attacker's Program moves from C4 to B4."
    );

    let mut game = skirmish(
        Player::Attacker,
        [
            (Coord::new(2, 2), unit(Player::Attacker, UnitKind::Virus)),
            (Coord::new(1, 2), unit(Player::Defender, UnitKind::Tech)),
        ],
    );
    let outcome = game.try_move(CoordPair::from_quad(2, 2, 1, 2)).unwrap();
    assert_eq!(
        outcome.to_string(),
        "Attacker's Virus at C2 attacks the Tech at B2! \
         (6 damage dealt, 6 damage taken as retaliation)"
    );

    let mut game = skirmish(
        Player::Attacker,
        [(Coord::new(2, 2), unit(Player::Attacker, UnitKind::Virus))],
    );
    let outcome = game.try_move(CoordPair::from_quad(2, 2, 2, 2)).unwrap();
    assert_eq!(
        outcome.to_string(),
        "Attacker's Virus at C2 explodes in a fiery blast!! \
         (2 damage to all nearby units)"
    );
}
