//! The engine puts all pieces together and runs the interactive session. It
//! reads human moves from the input stream, queries [`crate::search`] for
//! computer moves, narrates everything to the output stream and exchanges
//! moves with a remote [`broker::Broker`] when one is configured.
//!
//! [`Engine::run`] is the "main loop": it renders the board between turns,
//! dispatches the side to move to a human, computer or broker handler and
//! stops as soon as a winner is known.

use std::io::{BufRead, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::bail;
use itertools::Itertools;
use log::warn;

use crate::game::core::CoordPair;
use crate::game::options::Options;
use crate::game::state::Game;
use crate::search::{self, SearchResult, Stats};

pub mod broker;
pub mod trace;

use broker::Broker;

/// Pause between broker polls while waiting for the remote move.
const BROKER_RETRY: Duration = Duration::from_millis(100);

/// The engine connects everything together: game state, session options,
/// search statistics and the I/O streams.
///
/// The streams are generic so that tests can drive a whole session from
/// buffers; in the binary they are stdin and a [`trace::Tee`] over stdout.
pub struct Engine<R, W> {
    game: Game,
    options: Options,
    stats: Stats,
    broker: Option<Broker>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Engine<R, W> {
    /// Creates an engine for a fresh game with the provided I/O.
    #[must_use]
    pub fn new(options: Options, input: R, output: W) -> Self {
        Self {
            game: Game::new(options.dim, options.max_turns),
            broker: options.broker.clone().map(Broker::new),
            options,
            stats: Stats::new(),
            input,
            output,
        }
    }

    /// The game being played. Mostly useful for inspecting the final state
    /// after [`Engine::run`] returns.
    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Plays the session to its end: a winner, a closed input stream, or a
    /// computer player without a move.
    ///
    /// # Errors
    ///
    /// Returns an error when writing to the output stream fails or when a
    /// computer player cannot produce a move.
    pub fn run(&mut self) -> anyhow::Result<()> {
        writeln!(
            self.output,
            "Welcome to AI Wargame. Destroy the enemy AI to win!"
        )?;
        writeln!(
            self.output,
            "The current gamemode is set to {}.",
            self.options.game_type.mode_name()
        )?;
        if let Some(max_turns) = self.options.max_turns {
            writeln!(
                self.output,
                "After {max_turns} turns, the Defender will win by default!"
            )?;
        }

        loop {
            writeln!(self.output)?;
            write!(self.output, "{}", self.game)?;
            if let Some(winner) = self.game.winner() {
                writeln!(
                    self.output,
                    "{winner} wins in {} turn(s)!",
                    self.game.turns_played()
                )?;
                break;
            }

            if self.options.game_type.human_plays(self.game.to_move()) {
                if self.broker.is_some() {
                    self.broker_turn()?;
                } else if !self.human_turn()? {
                    writeln!(self.output, "Input stream closed: ending the session.")?;
                    break;
                }
            } else {
                let Some(mv) = self.computer_turn()? else {
                    bail!("computer doesn't know what to do");
                };
                if let Some(broker) = &self.broker {
                    broker.post_move(mv, self.game.turns_played());
                }
            }
        }
        self.output.flush()?;
        Ok(())
    }

    /// Prompts until the human enters a legal move, then applies it. Returns
    /// `false` when the input stream is exhausted.
    fn human_turn(&mut self) -> anyhow::Result<bool> {
        loop {
            write!(
                self.output,
                "Player {}, enter your move: ",
                self.game.to_move()
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(false);
            }
            let Ok(mv) = CoordPair::try_from(line.as_str()) else {
                writeln!(self.output, "Invalid coordinates! Try again.")?;
                continue;
            };
            match self.game.try_move(mv) {
                Ok(outcome) => {
                    writeln!(self.output, "Player {}: {outcome}", self.game.to_move())?;
                    self.game.advance_turn();
                    return Ok(true);
                },
                Err(reason) => {
                    writeln!(self.output, "{reason}")?;
                    writeln!(self.output, "The move is not valid! Try again.")?;
                },
            }
        }
    }

    /// Polls the broker until the opponent's move for the next turn arrives,
    /// then applies it.
    fn broker_turn(&mut self) -> anyhow::Result<()> {
        writeln!(
            self.output,
            "Getting next move with auto-retry from game broker..."
        )?;
        loop {
            if let Some(broker) = &self.broker {
                if let Some(mv) = broker.get_move(self.game.turns_played() + 1) {
                    match self.game.try_move(mv) {
                        Ok(outcome) => {
                            writeln!(self.output, "Broker {}: {outcome}", self.game.to_move())?;
                            self.game.advance_turn();
                            return Ok(());
                        },
                        Err(reason) => warn!("broker sent an illegal move {mv}: {reason}"),
                    }
                }
            }
            thread::sleep(BROKER_RETRY);
        }
    }

    /// Searches for the best move and applies it. Returns `None` when there
    /// is nothing to play.
    fn computer_turn(&mut self) -> anyhow::Result<Option<CoordPair>> {
        let start = Instant::now();
        let result = search::suggest_move(&self.game, &self.options, &mut self.stats);
        let elapsed = start.elapsed();
        let Some(mv) = result.best_move else {
            return Ok(None);
        };
        self.report_search(&result, elapsed)?;
        match self.game.try_move(mv) {
            Ok(outcome) => {
                writeln!(self.output, "Computer {}: {outcome}", self.game.to_move())?;
                self.game.advance_turn();
                Ok(Some(mv))
            },
            Err(reason) => {
                // The search only proposes classified candidates; reaching
                // this is an engine defect, not a user mistake.
                writeln!(self.output, "ERROR: AI suggesting invalid move!")?;
                writeln!(self.output, "{reason}")?;
                Ok(None)
            },
        }
    }

    /// The diagnostic block printed after every computer move.
    fn report_search(&mut self, result: &SearchResult, elapsed: Duration) -> anyhow::Result<()> {
        writeln!(self.output, "Heuristic score: {}", result.score)?;
        writeln!(self.output, "Search depth: {}", result.depth)?;
        let per_depth = self
            .stats
            .per_depth()
            .iter()
            .map(|(ply, count)| format!("{ply}:{count}"))
            .join(" ");
        writeln!(self.output, "Evals per depth: {per_depth}")?;
        let seconds = self.stats.total_time().as_secs_f64();
        if seconds > 0.0 {
            writeln!(
                self.output,
                "Eval perf.: {:.1}k/s",
                self.stats.total_evaluations() as f64 / seconds / 1000.0
            )?;
        }
        writeln!(self.output, "Elapsed time: {:.1}s", elapsed.as_secs_f64())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::options::GameType;

    fn session_output(options: Options, script: &str) -> String {
        let mut output = Vec::new();
        let mut engine = Engine::new(options, script.as_bytes(), &mut output);
        engine.run().expect("session should end cleanly");
        String::from_utf8(output).expect("session output should be valid UTF-8")
    }

    #[test]
    fn scripted_manual_session() {
        let options = Options {
            game_type: GameType::AttackerVsDefender,
            ..Options::default()
        };
        // One legal attacker move, then the input closes.
        let output = session_output(options, "C4 C3\n");
        assert!(output.contains("Welcome to AI Wargame."));
        assert!(output.contains("Player Attacker: Attacker's Program moves from C4 to C3."));
        assert!(output.contains("Input stream closed: ending the session."));
    }

    #[test]
    fn rejected_input_is_explained() {
        let options = Options {
            game_type: GameType::AttackerVsDefender,
            ..Options::default()
        };
        // Garbage, an off-board move, a pointless repair, then a legal move.
        let output = session_output(options, "##\nZ9 Z8\nE2 E3\nE2 D2\n");
        assert!(output.contains("Invalid coordinates! Try again."));
        assert!(output.contains("Specified coordinate does not exist!"));
        assert!(output.contains("Action was not recognized."));
        assert!(output.contains("The move is not valid! Try again."));
        assert!(output.contains("Player Attacker: Attacker's Program moves from E2 to D2."));
    }

    #[test]
    fn computer_session_runs_to_the_turn_limit() {
        let options = Options {
            game_type: GameType::CompVsComp,
            max_depth: 2,
            min_depth: 1,
            max_time: Some(1.0),
            max_turns: Some(4),
            randomize_moves: false,
            ..Options::default()
        };
        let output = session_output(options, "");
        assert!(output.contains("Heuristic score:"));
        assert!(output.contains("wins in"));
    }
}
