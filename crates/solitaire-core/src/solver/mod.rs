//! Backtracking peg-solitaire solver.
//!
//! Depth-first search over jump sequences with duplicate-state pruning,
//! cooperative cancellation, and step callbacks for visualization. The
//! search owns a private clone of the board; the caller's board is never
//! touched.

mod backtrack;
mod types;

use crate::board::Board;
use backtrack::Search;

pub use types::{NullObserver, SearchObserver, SolveReport, SolverConfig, StopFlag};

/// The solver. Holds configuration only; all search state is per-call.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Create a solver with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with custom configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Search for a move sequence that reduces the board to a single peg.
    pub fn solve(&self, board: &Board) -> SolveReport {
        self.solve_observed(board, &mut NullObserver)
    }

    /// Like [`Solver::solve`], with an observer hooked into the search for
    /// cancellation and step-by-step visualization.
    pub fn solve_observed(
        &self,
        board: &Board,
        observer: &mut dyn SearchObserver,
    ) -> SolveReport {
        Search::new(board, &self.config, observer).run()
    }

    /// Whether the board is solvable at all, without materializing a path.
    pub fn is_solvable(&self, board: &Board) -> bool {
        let config = SolverConfig {
            record_path: false,
            ..self.config.clone()
        };
        let mut observer = NullObserver;
        Search::new(board, &config, &mut observer).run().solved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Move;

    fn board(text: &str) -> Board {
        Board::from_string(text).unwrap()
    }

    /// Observer that records every callback into flat logs.
    #[derive(Default)]
    struct Recorder {
        visits: Vec<u64>,
        applied: Vec<(Move, usize)>,
        reverted: Vec<(Move, usize)>,
    }

    impl SearchObserver for Recorder {
        fn on_visit(&mut self, visited: u64) {
            self.visits.push(visited);
        }
        fn on_apply(&mut self, mv: Move, depth: usize) {
            self.applied.push((mv, depth));
        }
        fn on_revert(&mut self, mv: Move, depth: usize) {
            self.reverted.push((mv, depth));
        }
    }

    #[test]
    fn test_single_peg_is_already_solved() {
        let b = board("o..\n###\n###");
        let report = Solver::new().solve(&b);
        assert!(report.solved);
        assert_eq!(report.path, Some(vec![]));
        assert_eq!(report.visited, 1);
    }

    #[test]
    fn test_zero_pegs_is_not_solved() {
        // The terminal test is exactly one peg; an empty board never
        // satisfies it.
        let b = board("...\n...\n...");
        let report = Solver::new().solve(&b);
        assert!(!report.solved);
        assert_eq!(report.path, None);
        assert_eq!(report.visited, 1);
    }

    #[test]
    fn test_solves_single_jump_board() {
        let b = board("oo.\n###\n###");
        let report = Solver::new().solve(&b);
        assert!(report.solved);
        assert_eq!(report.visited, 2);
        assert_eq!(report.moves(), &[Move { from: 0, mid: 1, to: 2 }]);
    }

    #[test]
    fn test_stuck_board_is_unsolved() {
        // Two pegs with a gap between them too wide to jump.
        let b = board("o.o\n###\n###");
        let report = Solver::new().solve(&b);
        assert!(!report.solved);
        assert_eq!(report.path, None);
        assert_eq!(report.visited, 1);
    }

    #[test]
    fn test_record_path_off_omits_path() {
        let config = SolverConfig {
            record_path: false,
            ..SolverConfig::default()
        };
        let b = board("oo.\n###\n###");
        let report = Solver::with_config(config).solve(&b);
        assert!(report.solved);
        assert_eq!(report.path, None);
    }

    #[test]
    fn test_duplicate_states_are_pruned() {
        // The two jumps available at the root commute, so both root
        // branches converge on the same three-peg state (and deeper, the
        // same two-peg state). With pruning the second arrivals are cut
        // at entry without expanding their moves, for exactly ten nodes;
        // re-expanding them would push the count past that.
        let b = board("oo.#\n##o#\noo.#\n##.#");
        let report = Solver::new().solve(&b);
        assert!(!report.solved);
        assert_eq!(report.visited, 10);
    }

    #[test]
    fn test_caller_board_is_untouched() {
        let b = Board::english_cross();
        let snapshot = b.clone();
        let _ = Solver::new().solve(&b);
        assert_eq!(b, snapshot);
    }

    #[test]
    fn test_visit_counts_are_sequential() {
        let b = board("oo.#\n##o#\noo.#\n##.#");
        let mut recorder = Recorder::default();
        let report = Solver::new().solve_observed(&b, &mut recorder);
        let expected: Vec<u64> = (1..=report.visited).collect();
        assert_eq!(recorder.visits, expected);
        // Every failing branch balances applies with reverts.
        assert_eq!(recorder.applied.len(), recorder.reverted.len());
    }

    #[test]
    fn test_callbacks_carry_the_full_mutation_stream() {
        // An observer replaying apply/revert on its own replica ends up
        // holding the solved position.
        struct Replica(Board);
        impl SearchObserver for Replica {
            fn on_apply(&mut self, mv: Move, _depth: usize) {
                self.0.apply(mv);
            }
            fn on_revert(&mut self, mv: Move, _depth: usize) {
                self.0.revert(mv);
            }
        }

        let b = board("oo.\n###\n###");
        let mut replica = Replica(b.clone());
        let report = Solver::new().solve_observed(&b, &mut replica);
        assert!(report.solved);
        assert_eq!(replica.0.peg_count(), 1);
    }

    #[test]
    fn test_cancel_before_entry() {
        struct Cancelled;
        impl SearchObserver for Cancelled {
            fn should_stop(&mut self) -> bool {
                true
            }
        }

        let b = Board::english_cross();
        let snapshot = b.clone();
        let report = Solver::new().solve_observed(&b, &mut Cancelled);
        assert!(!report.solved);
        // The poll runs before the entry node is counted.
        assert_eq!(report.visited, 0);
        assert_eq!(report.path, None);
        assert_eq!(b, snapshot);
    }

    #[test]
    fn test_cancel_mid_search() {
        struct StopAfter(u64);
        impl SearchObserver for StopAfter {
            fn should_stop(&mut self) -> bool {
                self.0 == 0
            }
            fn on_visit(&mut self, _visited: u64) {
                self.0 -= 1;
            }
        }

        let b = Board::english_cross();
        let report = Solver::new().solve_observed(&b, &mut StopAfter(3));
        assert!(!report.solved);
        assert_eq!(report.visited, 3);
    }

    #[test]
    fn test_stop_flag_cancels() {
        let flag = StopFlag::new();
        flag.stop();
        let b = Board::english_cross();
        let report = Solver::new().solve_observed(&b, &mut flag.clone());
        assert!(!report.solved);
        assert_eq!(report.visited, 0);
    }

    #[test]
    fn test_solves_english_cross() {
        let b = Board::english_cross();
        let report = Solver::new().solve(&b);
        assert!(report.solved);
        assert!(report.visited >= 1);

        // One capture per move: 32 pegs down to 1.
        let path = report.path.as_ref().unwrap();
        assert_eq!(path.len(), 31);

        // The path replays cleanly from the start position.
        let mut replay = Board::english_cross();
        for &mv in path {
            assert!(replay.is_move_allowed(mv.from, mv.to));
            replay.apply(mv);
        }
        assert_eq!(replay.peg_count(), 1);
    }

    #[test]
    fn test_is_solvable_matches_solve() {
        let solver = Solver::new();
        assert!(solver.is_solvable(&board("oo.\n###\n###")));
        assert!(!solver.is_solvable(&board("o.o\n###\n###")));
    }
}
