//! Basic example of using the solitaire engine.

use solitaire_core::{Board, SearchObserver, Solver};

/// Prints every ten-thousandth visit, the sampling left to the caller.
struct Progress;

impl SearchObserver for Progress {
    fn on_visit(&mut self, visited: u64) {
        if visited % 10_000 == 0 {
            println!("... {visited} states visited");
        }
    }
}

fn main() {
    // The classic 33-hole cross with the center empty.
    let board = Board::english_cross();
    println!("Start position ({} pegs):\n{}", board.peg_count(), board);

    println!("Solving...");
    let solver = Solver::new();
    let report = solver.solve_observed(&board, &mut Progress);

    println!("solved: {}, states visited: {}", report.solved, report.visited);
    for (i, mv) in report.moves().iter().enumerate() {
        let (fr, fc) = board.row_col(mv.from);
        let (tr, tc) = board.row_col(mv.to);
        println!("{:2}. ({fr},{fc}) -> ({tr},{tc})", i + 1);
    }

    // Boards also parse from text.
    let small = Board::from_string("oo.\n###\n###").unwrap();
    println!("\nSingle-jump board solvable: {}", solver.is_solvable(&small));
}
