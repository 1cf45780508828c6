//! Implementation of [Minimax] with the [Negamax] formulation and optional
//! [Alpha-Beta pruning].
//!
//! Successors are generated lazily inside the recursion; nothing is retained
//! between siblings except the running window.
//!
//! [Minimax]: https://en.wikipedia.org/wiki/Minimax
//! [Negamax]: https://en.wikipedia.org/wiki/Negamax
//! [Alpha-Beta pruning]: https://en.wikipedia.org/wiki/Alpha%E2%80%93beta_pruning

use crate::evaluation::Score;
use crate::game::state::Game;
use crate::search::state::Context;
use crate::search::Depth;

/// Scores the position from the perspective of its side to move.
///
/// Decisive scores are distance-adjusted ([`Score::win_in`]) so that a
/// faster win (or a slower loss) always compares better. When pruning is
/// disabled the window is simply never narrowed and the recursion visits
/// every node, which is exactly plain minimax.
pub(super) fn negamax(
    context: &mut Context<'_>,
    game: &Game,
    depth: Depth,
    ply: Depth,
    mut alpha: Score,
    beta: Score,
) -> Score {
    if let Some(winner) = game.winner() {
        return if winner == game.to_move() {
            Score::win_in(ply)
        } else {
            -Score::win_in(ply)
        };
    }
    if depth == 0 {
        return Score::heuristic(context.evaluate(game, ply));
    }
    if context.deadline_exceeded() {
        // The driver discards the aborted iteration; evaluate statically to
        // unwind quickly.
        return Score::heuristic(context.evaluate(game, ply));
    }

    // An undecided position always has at least one successor: the side to
    // move still owns its AI, and self-destruction is always legal.
    let mut best = Score::MIN;
    for (next, _) in game.successors() {
        let score = -negamax(context, &next, depth - 1, ply + 1, -beta, -alpha);
        if score > best {
            best = score;
        }
        if context.alpha_beta {
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }
        if context.aborted() {
            break;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::game::options::Options;
    use crate::search::Stats;

    #[test]
    fn depth_zero_is_a_static_evaluation() {
        let options = Options {
            heuristic: crate::evaluation::Heuristic::Material,
            ..Options::default()
        };
        let mut stats = Stats::new();
        let mut context = Context::new(&options, None, &mut stats);
        let game = Game::new(5, Some(100));
        assert_eq!(
            negamax(&mut context, &game, 0, 0, Score::MIN, Score::MAX),
            Score::heuristic(0)
        );
        assert_eq!(stats.total_evaluations(), 1);
    }

    #[test]
    fn lookahead_keeps_the_balanced_score() {
        // From the starting position no single exchange changes material:
        // with the material evaluator a 2-ply search still scores 0.
        let options = Options {
            randomize_moves: false,
            ..Options::default()
        };
        let mut stats = Stats::new();
        let mut context = Context::new(&options, None, &mut stats);
        let game = Game::new(5, Some(100));
        assert_eq!(
            negamax(&mut context, &game, 2, 0, Score::MIN, Score::MAX),
            Score::heuristic(0)
        );
        assert!(stats.total_evaluations() > 0);
    }
}
