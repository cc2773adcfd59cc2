//! The recursive depth-first search.
//!
//! One `Search` owns a private clone of the caller's board and mutates it in
//! place across the recursion, relying on exact apply/revert symmetry: every
//! move applied on a failing branch is reverted before the next sibling, so
//! backtracking costs O(1) per move, never a board copy per frame.

use super::types::{SearchObserver, SolveReport, SolverConfig};
use crate::board::{Board, Fingerprint, Move};
use std::collections::HashSet;
use std::thread;

pub(super) struct Search<'a> {
    board: Board,
    seen: HashSet<Fingerprint>,
    path: Vec<Move>,
    visited: u64,
    config: &'a SolverConfig,
    observer: &'a mut dyn SearchObserver,
}

impl<'a> Search<'a> {
    pub(super) fn new(
        board: &Board,
        config: &'a SolverConfig,
        observer: &'a mut dyn SearchObserver,
    ) -> Self {
        Self {
            board: board.clone(),
            seen: HashSet::new(),
            path: Vec::new(),
            visited: 0,
            config,
            observer,
        }
    }

    pub(super) fn run(mut self) -> SolveReport {
        let solved = self.dfs(0);
        let path = (solved && self.config.record_path).then_some(self.path);
        SolveReport {
            solved,
            path,
            visited: self.visited,
        }
    }

    fn dfs(&mut self, depth: usize) -> bool {
        if self.observer.should_stop() {
            return false;
        }
        self.visited += 1;
        self.observer.on_visit(self.visited);

        // Success before the duplicate check: a terminal state is always
        // recognized, even one structurally equal to a memoized failure.
        if self.board.peg_count() == 1 {
            return true;
        }
        if !self.seen.insert(self.board.fingerprint()) {
            return false;
        }

        for mv in self.board.legal_moves() {
            if self.observer.should_stop() {
                return false;
            }
            self.board.apply(mv);
            self.observer.on_apply(mv, depth);
            if self.config.record_path {
                self.path.push(mv);
            }
            self.pace();
            if self.dfs(depth + 1) {
                // Leave the applied move in place: the boards up the call
                // stack hold the solution-so-far, and `path` is the full
                // move sequence.
                return true;
            }
            self.observer.on_revert(mv, depth);
            if self.config.record_path {
                self.path.pop();
            }
            self.board.revert(mv);
            self.pace();
        }
        false
    }

    fn pace(&self) {
        if let Some(delay) = self.config.step_delay {
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }
    }
}
