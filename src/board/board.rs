//! Board structure with an undo log

use std::fmt;
use std::ops::{Deref, DerefMut};

use super::{Cell, Player, Pos, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::BoardError;

/// Record of a placed move, kept for undo and last-move queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub pos: Pos,
    pub player: Player,
}

/// Square game board.
///
/// Cells are stored row-major. Moves only ever turn an Empty cell into a
/// taken one; clearing happens through `undo`, which is reserved for search
/// backtracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    history: Vec<MoveRecord>,
}

impl Board {
    /// Create an empty board, rejecting sizes outside
    /// `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        check_size(size)?;
        Ok(Self::empty(size))
    }

    /// The default 6x6 board
    pub fn standard() -> Self {
        Self::empty(DEFAULT_BOARD_SIZE)
    }

    fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
            history: Vec::with_capacity(size * size),
        }
    }

    /// Build a board from a row-major host snapshot.
    ///
    /// The snapshot carries no move order, so `last_move` is `None`.
    pub fn from_cells(size: usize, cells: Vec<Cell>) -> Result<Self, BoardError> {
        check_size(size)?;
        if cells.len() != size * size {
            return Err(BoardError::DimensionMismatch {
                expected: size * size,
                actual: cells.len(),
            });
        }
        Ok(Self {
            size,
            cells,
            history: Vec::with_capacity(size * size),
        })
    }

    /// Build a board from a grid of rows; every row must have `rows.len()` cells.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Result<Self, BoardError> {
        let size = rows.len();
        check_size(size)?;
        if rows.iter().any(|row| row.len() != size) {
            return Err(BoardError::DimensionMismatch {
                expected: size * size,
                actual: rows.iter().map(Vec::len).sum(),
            });
        }
        Self::from_cells(size, rows.concat())
    }

    /// Parse a text diagram: one line per row, `.` or `_` for Empty,
    /// `X`/`A` for player A and `O`/`B` for player B. Whitespace inside a
    /// line and blank lines are ignored.
    pub fn parse(diagram: &str) -> Result<Self, BoardError> {
        let mut rows = Vec::new();
        for line in diagram.lines() {
            let mut row = Vec::new();
            for ch in line.chars().filter(|c| !c.is_whitespace()) {
                row.push(match ch {
                    '.' | '_' => Cell::Empty,
                    'X' | 'x' | 'A' | 'a' => Cell::Taken(Player::A),
                    'O' | 'o' | 'B' | 'b' => Cell::Taken(Player::B),
                    other => return Err(BoardError::UnknownCell(other)),
                });
            }
            if !row.is_empty() {
                rows.push(row);
            }
        }
        Self::from_rows(&rows)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get cell at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Cell {
        self.cells[pos.to_index(self.size)]
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos).is_empty()
    }

    #[inline]
    pub fn owner(&self, pos: Pos) -> Option<Player> {
        self.get(pos).owner()
    }

    /// Place a stone for `player`.
    ///
    /// Returns `false` without touching the board when the cell is out of
    /// bounds or already taken.
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> bool {
        if row >= self.size || col >= self.size {
            return false;
        }
        let pos = Pos::new(row as u8, col as u8);
        self.place_at(pos, player)
    }

    /// Same as [`Board::place`] for an already-built `Pos`.
    pub fn place_at(&mut self, pos: Pos, player: Player) -> bool {
        if pos.row as usize >= self.size || pos.col as usize >= self.size {
            return false;
        }
        let idx = pos.to_index(self.size);
        if !self.cells[idx].is_empty() {
            return false;
        }
        self.cells[idx] = Cell::Taken(player);
        self.history.push(MoveRecord { pos, player });
        true
    }

    /// Clear a cell placed during search. Not part of the host-facing API.
    pub(crate) fn undo(&mut self, row: usize, col: usize) {
        let pos = Pos::new(row as u8, col as u8);
        self.cells[pos.to_index(self.size)] = Cell::Empty;
        if let Some(i) = self.history.iter().rposition(|rec| rec.pos == pos) {
            self.history.remove(i);
        }
    }

    /// Place a stone and hand back a guard that undoes it when dropped.
    ///
    /// Returns `None` (and leaves the board untouched) if the move is illegal.
    pub(crate) fn play(&mut self, pos: Pos, player: Player) -> Option<Placed<'_>> {
        if self.place_at(pos, player) {
            Some(Placed { board: self, pos })
        } else {
            None
        }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Empty cells in row-major order
    pub fn empty_positions(&self) -> Vec<Pos> {
        self.positions().filter(|&p| self.is_empty(p)).collect()
    }

    /// Cells owned by `player` in row-major order
    pub fn stones(&self, player: Player) -> impl Iterator<Item = Pos> + '_ {
        self.positions().filter(move |&p| self.get(p).is(player))
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let size = self.size;
        (0..size * size).map(move |idx| Pos::from_index(idx, size))
    }

    /// Independent copy with no shared state
    #[inline]
    pub fn snapshot(&self) -> Board {
        self.clone()
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    /// Fraction of cells taken, in `[0, 1]`
    pub fn fill_ratio(&self) -> f64 {
        self.stone_count() as f64 / self.cells.len() as f64
    }

    /// Center cell; for even sizes this is the lower-right of the middle four
    #[inline]
    pub fn center(&self) -> Pos {
        let mid = (self.size / 2) as u8;
        Pos::new(mid, mid)
    }

    /// Most recent move still on the board, if the board was built by moves
    #[inline]
    pub fn last_move(&self) -> Option<MoveRecord> {
        self.history.last().copied()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for c in 0..self.size {
            write!(f, " {:x}", c)?;
        }
        writeln!(f)?;
        for r in 0..self.size {
            write!(f, "{:x} ", r)?;
            for c in 0..self.size {
                let ch = match self.get(Pos::new(r as u8, c as u8)) {
                    Cell::Empty => '.',
                    Cell::Taken(p) => p.symbol(),
                };
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn check_size(size: usize) -> Result<(), BoardError> {
    if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(BoardError::InvalidSize {
            size,
            min: MIN_BOARD_SIZE,
            max: MAX_BOARD_SIZE,
        })
    }
}

/// A move placed for the lifetime of the guard.
///
/// Dereferences to the board so recursive search can keep working on it;
/// dropping the guard clears the cell again.
pub struct Placed<'a> {
    board: &'a mut Board,
    pos: Pos,
}

impl Placed<'_> {
    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl Deref for Placed<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placed<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placed<'_> {
    fn drop(&mut self) {
        self.board.undo(self.pos.row as usize, self.pos.col as usize);
    }
}
