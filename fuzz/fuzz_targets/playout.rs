#![no_main]
use ai_wargame::game::state::Game;
use ai_wargame::game::unit::MAX_HEALTH;
use libfuzzer_sys::fuzz_target;

// Interprets the input as a move-picking script and checks the board
// invariants after every applied move: no dead or overhealed units, and a
// decided game stays decided.
fuzz_target!(|data: &[u8]| {
    let mut game = Game::new(5, Some(100));
    for &byte in data {
        if game.winner().is_some() {
            break;
        }
        let candidates = game.move_candidates();
        assert!(!candidates.is_empty(), "undecided games always have moves");
        let (mv, action) = candidates[usize::from(byte) % candidates.len()];
        let _ = game.apply(mv, action);
        game.advance_turn();

        for (_, unit) in game.board().units() {
            assert!(unit.is_alive());
            assert!(unit.health <= MAX_HEALTH);
        }
    }
});
