//! Peg-solitaire engine.
//!
//! The board model lives in [`board`]: a square grid of blocked/empty/peg
//! cells, legal-jump enumeration, and in-place move application with exact
//! reversal. The [`solver`] runs a depth-first backtracking search with
//! duplicate-state pruning over that model, exposing cancellation and
//! step-callback hooks for a front end to drive visualization.

pub mod board;
pub mod solver;

pub use board::{Board, BoardError, Cell, Fingerprint, Move};
pub use solver::{
    NullObserver, SearchObserver, SolveReport, Solver, SolverConfig, StopFlag,
};
