//! Board and move model.
//!
//! A board is a row-major `size * size` grid of cells. Moves are orthogonal
//! jumps: a peg leaps over an adjacent peg into the empty hole two cells
//! away, capturing the jumped peg.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single board cell.
///
/// `Blocked` cells are outside the playable shape and can never hold a peg,
/// so the "never occupied while unplayable" invariant holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Not part of the board shape.
    Blocked,
    /// A playable hole with no peg in it.
    Empty,
    /// A playable hole holding a peg.
    Peg,
}

impl Cell {
    /// Build a cell from the playable/occupied boolean pair of the external
    /// interface. An unplayable cell is `Blocked` regardless of `occupied`.
    pub fn new(playable: bool, occupied: bool) -> Self {
        match (playable, occupied) {
            (false, _) => Cell::Blocked,
            (true, false) => Cell::Empty,
            (true, true) => Cell::Peg,
        }
    }

    /// Whether the cell is part of the board shape.
    pub fn is_playable(self) -> bool {
        self != Cell::Blocked
    }

    /// Whether the cell currently holds a peg.
    pub fn has_peg(self) -> bool {
        self == Cell::Peg
    }

    fn to_char(self) -> char {
        match self {
            Cell::Blocked => '#',
            Cell::Empty => '.',
            Cell::Peg => 'o',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Cell::Blocked),
            '.' => Some(Cell::Empty),
            'o' => Some(Cell::Peg),
            _ => None,
        }
    }
}

/// A single jump: the peg at `from` leaps over the peg at `mid` into the
/// empty hole at `to`. All three are linear board indices; `mid` is the
/// midpoint of `from` and `to` along a shared row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: usize,
    pub mid: usize,
    pub to: usize,
}

/// Errors from board construction and parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The cell count does not equal `size * size`.
    SizeMismatch { size: usize, cells: usize },
    /// The cell count of a parsed board is not a perfect square.
    NotSquare(usize),
    /// An unrecognized symbol in a board string.
    UnknownSymbol(char),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::SizeMismatch { size, cells } => {
                write!(f, "expected {size}x{size} = {} cells, got {cells}", size * size)
            }
            BoardError::NotSquare(cells) => {
                write!(f, "{cells} cells do not form a square board")
            }
            BoardError::UnknownSymbol(c) => write!(f, "unknown board symbol {c:?}"),
        }
    }
}

impl std::error::Error for BoardError {}

/// Packed board fingerprint: two bits per cell, 32 cells per word, in
/// row-major order over the three-way alphabet blocked/empty/peg. Boards
/// with equal fingerprints are identical cell-for-cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(Box<[u64]>);

/// A square peg-solitaire board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr", into = "BoardRepr")]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

/// Probe offsets in the pinned order: right, left, down, up.
const PROBES: [(isize, isize); 4] = [(0, 2), (0, -2), (2, 0), (-2, 0)];

impl Board {
    /// An all-playable, all-empty board, the starting point for editing.
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Build a board from a flat row-major cell vector.
    pub fn from_cells(size: usize, cells: Vec<Cell>) -> Result<Self, BoardError> {
        if cells.len() != size * size {
            return Err(BoardError::SizeMismatch {
                size,
                cells: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }

    /// Parse a board from its text form (`#` blocked, `.` empty hole, `o`
    /// peg). Whitespace is ignored; the side length is inferred from the
    /// cell count, which must be a perfect square.
    pub fn from_string(text: &str) -> Result<Self, BoardError> {
        let mut cells = Vec::new();
        for c in text.chars() {
            if c.is_whitespace() {
                continue;
            }
            cells.push(Cell::from_char(c).ok_or(BoardError::UnknownSymbol(c))?);
        }
        let size = (0..).find(|n| n * n >= cells.len()).unwrap_or(0);
        if size * size != cells.len() {
            return Err(BoardError::NotSquare(cells.len()));
        }
        Ok(Self { size, cells })
    }

    /// The classic English 33-hole cross: a 7x7 grid with the 2x2 corners
    /// blocked, every hole pegged except the center.
    pub fn english_cross() -> Self {
        let size = 7;
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let playable = (2..=4).contains(&row) || (2..=4).contains(&col);
                cells.push(if playable { Cell::Peg } else { Cell::Blocked });
            }
        }
        let mut board = Self { size, cells };
        let center = board.center();
        board.cells[center] = Cell::Empty;
        board
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total cell count (`size * size`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the board has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell at a linear index.
    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// The linear index of the central cell.
    pub fn center(&self) -> usize {
        (self.size / 2) * self.size + self.size / 2
    }

    /// Split a linear index into `(row, col)`.
    pub fn row_col(&self, index: usize) -> (usize, usize) {
        (index / self.size, index % self.size)
    }

    /// Combine `(row, col)` into a linear index.
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Number of pegs on the board.
    pub fn peg_count(&self) -> usize {
        self.cells.iter().filter(|c| c.has_peg()).count()
    }

    // ==================== Editing ====================

    /// Flip a cell between blocked and playable. Making a cell unplayable
    /// drops any peg in it, keeping the occupancy invariant intact.
    pub fn toggle_playable(&mut self, index: usize) {
        self.cells[index] = if self.cells[index].is_playable() {
            Cell::Blocked
        } else {
            Cell::Empty
        };
    }

    /// Place or remove a peg. Blocked cells are left untouched.
    pub fn set_peg(&mut self, index: usize, occupied: bool) {
        if self.cells[index].is_playable() {
            self.cells[index] = if occupied { Cell::Peg } else { Cell::Empty };
        }
    }

    /// Fill every hole with a peg, then empty the center (when playable):
    /// the standard starting position for the current shape.
    pub fn reset_for_play(&mut self) {
        for cell in &mut self.cells {
            if cell.is_playable() {
                *cell = Cell::Peg;
            }
        }
        let center = self.center();
        self.set_peg(center, false);
    }

    // ==================== Moves ====================

    /// Enumerate every legal jump on the current board.
    ///
    /// Sources are scanned in row-major order and probed right, left, down,
    /// up. The order is pinned: the solver commits to the first successful
    /// branch, so reordering changes which solution is found.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        let size = self.size as isize;
        for from in 0..self.cells.len() {
            if !self.cells[from].has_peg() {
                continue;
            }
            let row = (from / self.size) as isize;
            let col = (from % self.size) as isize;
            for (dr, dc) in PROBES {
                let (r, c) = (row + dr, col + dc);
                // Per-axis bounds check: a horizontal probe that falls off
                // the row must not wrap into the next one.
                if r < 0 || c < 0 || r >= size || c >= size {
                    continue;
                }
                let to = (r * size + c) as usize;
                if self.cells[to] != Cell::Empty {
                    continue;
                }
                let mid = (((row + r) / 2) * size + (col + c) / 2) as usize;
                if self.cells[mid].has_peg() {
                    moves.push(Move { from, mid, to });
                }
            }
        }
        moves
    }

    /// The legal jump from `from` to `to`, if there is one: the cells must
    /// share a row or column exactly two apart (no wrapping), `from` must
    /// hold a peg, the midpoint a peg, and `to` must be an empty hole.
    pub fn move_between(&self, from: usize, to: usize) -> Option<Move> {
        if from >= self.cells.len() || to >= self.cells.len() {
            return None;
        }
        let (fr, fc) = self.row_col(from);
        let (tr, tc) = self.row_col(to);
        let horizontal = fr == tr && fc.abs_diff(tc) == 2;
        let vertical = fc == tc && fr.abs_diff(tr) == 2;
        if !horizontal && !vertical {
            return None;
        }
        let mid = self.index((fr + tr) / 2, (fc + tc) / 2);
        let legal = self.cells[from].has_peg()
            && self.cells[mid].has_peg()
            && self.cells[to] == Cell::Empty;
        legal.then_some(Move { from, mid, to })
    }

    /// Whether a jump from `from` to `to` is currently legal.
    pub fn is_move_allowed(&self, from: usize, to: usize) -> bool {
        self.move_between(from, to).is_some()
    }

    /// Execute a jump in place. The move must be legal on the current
    /// board; the solver guarantees this by only applying moves it just
    /// generated.
    pub fn apply(&mut self, mv: Move) {
        debug_assert!(self.cells[mv.from].has_peg());
        debug_assert!(self.cells[mv.mid].has_peg());
        debug_assert!(self.cells[mv.to] == Cell::Empty);
        self.cells[mv.from] = Cell::Empty;
        self.cells[mv.mid] = Cell::Empty;
        self.cells[mv.to] = Cell::Peg;
    }

    /// Undo a jump applied by [`Board::apply`]. Applying then reverting the
    /// same move is an identity transform.
    pub fn revert(&mut self, mv: Move) {
        debug_assert!(self.cells[mv.to].has_peg());
        self.cells[mv.from] = Cell::Peg;
        self.cells[mv.mid] = Cell::Peg;
        self.cells[mv.to] = Cell::Empty;
    }

    /// Canonical memoization key for the current cell states.
    pub fn fingerprint(&self) -> Fingerprint {
        let words = self.cells.len().div_ceil(32);
        let mut packed = vec![0u64; words];
        for (i, cell) in self.cells.iter().enumerate() {
            packed[i / 32] |= (*cell as u64) << ((i % 32) * 2);
        }
        Fingerprint(packed.into_boxed_slice())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Wire form of a board; conversion re-validates the size contract so a
/// malformed serialized board is rejected at the boundary.
#[derive(Serialize, Deserialize)]
struct BoardRepr {
    size: usize,
    cells: Vec<Cell>,
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        Self {
            size: board.size,
            cells: board.cells,
        }
    }
}

impl TryFrom<BoardRepr> for Board {
    type Error = BoardError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        Board::from_cells(repr.size, repr.cells)
    }
}
