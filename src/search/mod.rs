//! Adversarial search for the computer players.
//!
//! Successor generation is integrated into the recursion: positions are
//! cloned, mutated and discarded on the way down instead of materializing a
//! game tree up front. The driver runs iterative deepening between
//! [`crate::game::options::Options::min_depth`] and
//! [`crate::game::options::Options::max_depth`] under a wall-clock budget.

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;

use crate::evaluation::Score;
use crate::game::core::CoordPair;
use crate::game::options::Options;
use crate::game::state::Game;

mod minimax;
mod state;

pub use state::Stats;
use state::Context;

/// Search depth in plies.
pub type Depth = u8;

/// The outcome of a move suggestion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Score of the principal move from the searching player's perspective.
    pub score: Score,
    /// The suggested move; `None` only when the position has no legal moves
    /// (the game is already decided).
    pub best_move: Option<CoordPair>,
    /// The deepest fully completed iteration.
    pub depth: Depth,
}

/// Searches for the best move of the side to move.
///
/// Iterations that the time budget interrupts are discarded wholesale: a
/// half-explored depth can prefer a move refuted by the unexplored half. The
/// first iteration ignores the deadline so that a suggestion always exists.
/// Evaluation counts and elapsed time are accumulated into `stats`.
#[must_use]
pub fn suggest_move(game: &Game, options: &Options, stats: &mut Stats) -> SearchResult {
    let start = Instant::now();
    let deadline = options
        .max_time
        .map(|seconds| start + Duration::from_secs_f64(seconds));

    let mut root_moves = game.move_candidates();
    if options.randomize_moves {
        root_moves.shuffle(&mut rand::thread_rng());
    }

    let max_depth = options.max_depth.max(1);
    let min_depth = options.min_depth.clamp(1, max_depth);

    let mut best = None;
    for depth in min_depth..=max_depth {
        let iteration_deadline = if depth == min_depth { None } else { deadline };
        let mut context = Context::new(options, iteration_deadline, stats);

        let mut iteration_best: Option<(Score, CoordPair)> = None;
        let mut alpha = Score::MIN;
        for &(mv, action) in &root_moves {
            let mut next = game.clone();
            let _ = next.apply(mv, action);
            next.advance_turn();
            let score = -minimax::negamax(&mut context, &next, depth - 1, 1, Score::MIN, -alpha);
            if context.aborted() {
                break;
            }
            if iteration_best.map_or(true, |(best_score, _)| score > best_score) {
                iteration_best = Some((score, mv));
            }
            if options.alpha_beta && score > alpha {
                alpha = score;
            }
        }

        if context.aborted() {
            break;
        }
        if let Some((score, mv)) = iteration_best {
            best = Some(SearchResult {
                score,
                best_move: Some(mv),
                depth,
            });
            // A decisive line does not get better with more depth.
            if score.is_decisive() {
                break;
            }
        }
    }

    stats.add_time(start.elapsed());
    best.unwrap_or(SearchResult {
        score: Score::heuristic(0),
        best_move: None,
        depth: 0,
    })
}

/// A uniformly random legal move; the fallback policy when searching is not
/// wanted.
#[must_use]
pub fn random_move(game: &Game) -> Option<CoordPair> {
    game.move_candidates()
        .choose(&mut rand::thread_rng())
        .map(|&(mv, _)| mv)
}
