mod render;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use solitaire_core::{Board, Move, SearchObserver, SolveReport, Solver, SolverConfig};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

/// Backtracking peg-solitaire solver.
#[derive(Parser)]
#[command(name = "solitaire", version, about)]
struct Args {
    /// Board file, plain text (#/./o) or .json; the classic English cross
    /// when omitted
    board: Option<PathBuf>,

    /// Pause after every board mutation, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 0)]
    step_delay: u64,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Print a progress line every N visited states
    #[arg(long, value_name = "N")]
    progress: Option<u64>,

    /// Skip recording the solution path
    #[arg(long)]
    no_path: bool,

    /// Render the search live in the terminal (q or Esc cancels)
    #[arg(long)]
    watch: bool,
}

/// Observer wired from the command line: deadline polling, sampled
/// progress output, and the live watch view. The watch view replays
/// apply/revert onto its own replica of the board.
struct RunObserver {
    replica: Board,
    deadline: Option<Instant>,
    progress: Option<u64>,
    watch: bool,
    visited: u64,
    cancelled: bool,
    timed_out: bool,
}

impl RunObserver {
    fn new(board: &Board, args: &Args) -> Self {
        Self {
            replica: board.clone(),
            deadline: args
                .timeout
                .map(|secs| Instant::now() + Duration::from_secs(secs)),
            progress: args.progress,
            watch: args.watch,
            visited: 0,
            cancelled: false,
            timed_out: false,
        }
    }

    fn redraw(&mut self, depth: usize) {
        if self.watch {
            let _ = render::draw(&mut io::stdout(), &self.replica, self.visited, depth);
        }
    }
}

impl SearchObserver for RunObserver {
    fn should_stop(&mut self) -> bool {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.timed_out = true;
                return true;
            }
        }
        if self.watch && render::cancel_requested() {
            self.cancelled = true;
        }
        self.cancelled
    }

    fn on_visit(&mut self, visited: u64) {
        self.visited = visited;
        if let Some(every) = self.progress {
            if !self.watch && every > 0 && visited % every == 0 {
                println!("... {visited} states visited");
            }
        }
    }

    fn on_apply(&mut self, mv: Move, depth: usize) {
        self.replica.apply(mv);
        self.redraw(depth);
    }

    fn on_revert(&mut self, mv: Move, depth: usize) {
        self.replica.revert(mv);
        self.redraw(depth);
    }
}

fn load_board(path: &Path) -> Result<Board, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let board = if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
        serde_json::from_str(&text).map_err(|e| format!("{}: {e}", path.display()))?
    } else {
        Board::from_string(&text).map_err(|e| format!("{}: {e}", path.display()))?
    };
    Ok(board)
}

fn run_watched(solver: &Solver, board: &Board, observer: &mut RunObserver) -> io::Result<SolveReport> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let report = solver.solve_observed(board, observer);

    execute!(stdout, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(report)
}

fn outcome_line(report: &SolveReport, observer: &RunObserver) -> String {
    if report.solved {
        // With path recording off a solved run has no move list to count.
        match &report.path {
            Some(path) => format!("Solved in {} moves.", path.len()),
            None => "Solved.".to_string(),
        }
    } else if observer.timed_out {
        "Timed out.".to_string()
    } else if observer.cancelled {
        "Cancelled.".to_string()
    } else {
        "No solution from this position.".to_string()
    }
}

fn print_report(board: &Board, report: &SolveReport, observer: &RunObserver, elapsed: Duration) {
    println!("{}", outcome_line(report, observer));
    println!("States visited: {} ({:.2?})", report.visited, elapsed);

    for (i, mv) in report.moves().iter().enumerate() {
        let (fr, fc) = board.row_col(mv.from);
        let (mr, mc) = board.row_col(mv.mid);
        let (tr, tc) = board.row_col(mv.to);
        println!("{:3}. ({fr},{fc}) over ({mr},{mc}) -> ({tr},{tc})", i + 1);
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let board = match &args.board {
        Some(path) => match load_board(path) {
            Ok(board) => board,
            Err(message) => {
                eprintln!("Error: {message}");
                return ExitCode::from(2);
            }
        },
        None => Board::english_cross(),
    };

    println!("Start position ({} pegs):", board.peg_count());
    print!("{board}");
    io::stdout().flush().ok();

    let config = SolverConfig {
        step_delay: (args.step_delay > 0).then(|| Duration::from_millis(args.step_delay)),
        record_path: !args.no_path,
    };
    let solver = Solver::with_config(config);
    let mut observer = RunObserver::new(&board, &args);

    let started = Instant::now();
    let report = if args.watch {
        match run_watched(&solver, &board, &mut observer) {
            Ok(report) => report,
            Err(e) => {
                let _ = disable_raw_mode();
                eprintln!("Error: {e}");
                return ExitCode::from(2);
            }
        }
    } else {
        solver.solve_observed(&board, &mut observer)
    };

    print_report(&board, &report, &observer, started.elapsed());
    if report.solved {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observer() -> RunObserver {
        let args = Args {
            board: None,
            step_delay: 0,
            timeout: None,
            progress: None,
            no_path: true,
            watch: false,
        };
        RunObserver::new(&Board::english_cross(), &args)
    }

    #[test]
    fn test_outcome_line_without_recorded_path() {
        let report = SolveReport {
            solved: true,
            path: None,
            visited: 7,
        };
        assert_eq!(outcome_line(&report, &observer()), "Solved.");
    }

    #[test]
    fn test_outcome_line_with_recorded_path() {
        let report = SolveReport {
            solved: true,
            path: Some(vec![Move { from: 0, mid: 1, to: 2 }]),
            visited: 2,
        };
        assert_eq!(outcome_line(&report, &observer()), "Solved in 1 moves.");

        let unsolved = SolveReport {
            solved: false,
            path: None,
            visited: 1,
        };
        assert_eq!(
            outcome_line(&unsolved, &observer()),
            "No solution from this position."
        );
    }

    #[test]
    fn test_load_text_board() {
        let dir = std::env::temp_dir();
        let path = dir.join("solitaire-cli-test-board.txt");
        std::fs::write(&path, "oo.\n###\n###\n").unwrap();
        let board = load_board(&path).unwrap();
        assert_eq!(board.size(), 3);
        assert_eq!(board.peg_count(), 2);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_json_board() {
        let dir = std::env::temp_dir();
        let path = dir.join("solitaire-cli-test-board.json");
        let json = serde_json::to_string(&Board::english_cross()).unwrap();
        std::fs::write(&path, json).unwrap();
        let board = load_board(&path).unwrap();
        assert_eq!(board.peg_count(), 32);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_rejects_bad_board() {
        let dir = std::env::temp_dir();
        let path = dir.join("solitaire-cli-test-bad.txt");
        // Five cells cannot form a square grid.
        std::fs::write(&path, "oo.o.\n").unwrap();
        assert!(load_board(&path).is_err());
        std::fs::write(&path, "oo?\n").unwrap();
        assert!(load_board(&path).is_err());
        std::fs::remove_file(&path).ok();
    }
}
