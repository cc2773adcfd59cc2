use crate::Move;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for the solver.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Pause inserted after every board mutation (apply and revert), for
    /// step-by-step visualization. `None` runs at full speed.
    pub step_delay: Option<Duration>,
    /// Whether to retain the move sequence of a found solution. Turning
    /// this off skips materializing the path for headless runs.
    pub record_path: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            step_delay: None,
            record_path: true,
        }
    }
}

/// Outcome of one solve call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    /// Whether a one-peg end state was reached.
    pub solved: bool,
    /// The move sequence from the start position to the one-peg state, in
    /// application order. Present only when `solved` and path recording
    /// was enabled.
    pub path: Option<Vec<Move>>,
    /// Total number of search nodes entered, regardless of outcome.
    pub visited: u64,
}

impl SolveReport {
    /// The solution moves, or an empty slice when there are none.
    pub fn moves(&self) -> &[Move] {
        self.path.as_deref().unwrap_or_default()
    }
}

/// Hooks into the search, polled and notified at fixed points.
///
/// `should_stop` is polled at node entry and before committing to each
/// candidate move; returning `true` unwinds the search immediately with an
/// unsolved report. The notification hooks run synchronously, so an
/// observer that does slow work naturally back-pressures the search.
pub trait SearchObserver {
    /// Cooperative cancellation poll.
    fn should_stop(&mut self) -> bool {
        false
    }

    /// Called once per node entered, after the visited counter increments.
    fn on_visit(&mut self, visited: u64) {
        let _ = visited;
    }

    /// Called immediately after a move is applied to the search board.
    fn on_apply(&mut self, mv: Move, depth: usize) {
        let _ = (mv, depth);
    }

    /// Called immediately after a move is reverted off the search board.
    fn on_revert(&mut self, mv: Move, depth: usize) {
        let _ = (mv, depth);
    }
}

/// Observer that ignores every notification and never cancels.
pub struct NullObserver;

impl SearchObserver for NullObserver {}

/// Shared cancellation flag, for stopping an in-flight search from another
/// thread. Cloning yields a handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// A fresh, unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. The search stops at its next poll point.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl SearchObserver for StopFlag {
    fn should_stop(&mut self) -> bool {
        self.is_stopped()
    }
}
