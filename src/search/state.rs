//! Bookkeeping shared by all nodes of one search.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::evaluation::{Heuristic, Value};
use crate::game::options::Options;
use crate::game::state::Game;
use crate::search::Depth;

/// Cumulative search statistics over a whole session, reported after every
/// suggestion.
#[derive(Clone, Debug, Default)]
pub struct Stats {
    evaluations_per_depth: BTreeMap<Depth, u64>,
    total_time: Duration,
}

impl Stats {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Static evaluations performed so far, keyed by the ply they happened
    /// at. Sorted by construction.
    #[must_use]
    pub const fn per_depth(&self) -> &BTreeMap<Depth, u64> {
        &self.evaluations_per_depth
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn total_evaluations(&self) -> u64 {
        self.evaluations_per_depth.values().sum()
    }

    /// Total wall-clock time spent searching.
    #[must_use]
    pub const fn total_time(&self) -> Duration {
        self.total_time
    }

    pub(super) fn record_evaluation(&mut self, ply: Depth) {
        *self.evaluations_per_depth.entry(ply).or_insert(0) += 1;
    }

    pub(super) fn add_time(&mut self, elapsed: Duration) {
        self.total_time += elapsed;
    }
}

/// Per-search context threaded through the recursion: which evaluator to
/// call, whether to prune, when to give up.
pub(super) struct Context<'a> {
    heuristic: Heuristic,
    pub(super) alpha_beta: bool,
    deadline: Option<Instant>,
    stats: &'a mut Stats,
    aborted: bool,
}

impl<'a> Context<'a> {
    pub(super) fn new(
        options: &Options,
        deadline: Option<Instant>,
        stats: &'a mut Stats,
    ) -> Self {
        Self {
            heuristic: options.heuristic,
            alpha_beta: options.alpha_beta,
            deadline,
            stats,
            aborted: false,
        }
    }

    /// Runs the static evaluator and records it in the statistics.
    pub(super) fn evaluate(&mut self, game: &Game, ply: Depth) -> Value {
        self.stats.record_evaluation(ply);
        self.heuristic.evaluate(game)
    }

    /// Checks the wall-clock budget. Once exceeded the search stays aborted:
    /// the driver discards the whole iteration.
    pub(super) fn deadline_exceeded(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            self.aborted = true;
        }
        self.aborted
    }

    pub(super) const fn aborted(&self) -> bool {
        self.aborted
    }
}
