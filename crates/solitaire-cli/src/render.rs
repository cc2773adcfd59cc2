//! Terminal rendering for watch mode.

use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{Clear, ClearType},
};
use solitaire_core::{Board, Cell};
use std::io::{self, Write};
use std::time::Duration;

/// Redraw the board at the top of the screen. Runs in raw mode, so lines
/// need explicit carriage returns.
pub fn draw(stdout: &mut io::Stdout, board: &Board, visited: u64, depth: usize) -> io::Result<()> {
    execute!(stdout, MoveTo(0, 0), Clear(ClearType::FromCursorDown))?;
    write!(
        stdout,
        "visited {visited}  depth {depth}  pegs {}  (q to cancel)\r\n\r\n",
        board.peg_count()
    )?;
    for row in 0..board.size() {
        for col in 0..board.size() {
            let symbol = match board.cell(board.index(row, col)) {
                Cell::Blocked => ' ',
                Cell::Empty => '.',
                Cell::Peg => 'o',
            };
            write!(stdout, "{symbol} ")?;
        }
        write!(stdout, "\r\n")?;
    }
    stdout.flush()
}

/// Whether a cancel key (q, Esc, or Ctrl+C) is pending.
pub fn cancel_requested() -> bool {
    while let Ok(true) = event::poll(Duration::ZERO) {
        if let Ok(Event::Key(key)) = event::read() {
            let ctrl_c =
                key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
            if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return true;
            }
        }
    }
    false
}
