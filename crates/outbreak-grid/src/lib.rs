//! Grid primitives for the outbreak simulation: cell coordinates, a binary
//! occupancy grid, and the FIFO frontier driving breadth-first traversal.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

/// Errors raised by occupancy grid construction and mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be non-zero")]
    ZeroDimension,
    #[error("cell ({row}, {col}) lies outside a {height}x{width} grid")]
    OutOfBounds {
        row: u32,
        col: u32,
        height: u32,
        width: u32,
    },
}

/// Errors raised by the traversal frontier.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrontierError {
    #[error("dequeue from an empty frontier")]
    Empty,
}

/// Location of a single grid cell in row/column coordinates.
///
/// Row 0 is the top of the grid and column 0 its left edge.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl Cell {
    /// Construct a new cell coordinate.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Occupancy of one grid cell.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Empty,
    Full,
}

/// Neighbor list returned by the enumeration helpers. Stack-allocated; the
/// inline capacity covers the eight-connected case.
pub type Neighbors = SmallVec<[Cell; 8]>;

/// 2D occupancy grid separating passable cells from obstacles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OccupancyGrid {
    height: u32,
    width: u32,
    cells: Vec<CellState>,
}

impl OccupancyGrid {
    /// Construct a grid of `height * width` cells, all initially empty.
    pub fn new(height: u32, width: u32) -> Result<Self, GridError> {
        if height == 0 || width == 0 {
            return Err(GridError::ZeroDimension);
        }
        Ok(Self {
            height,
            width,
            cells: vec![CellState::Empty; (height as usize) * (width as usize)],
        })
    }

    /// A fresh all-empty grid with the same dimensions, for traversal scratch.
    #[must_use]
    pub fn blank(&self) -> Self {
        Self {
            height: self.height,
            width: self.width,
            cells: vec![CellState::Empty; self.cells.len()],
        }
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Total number of cells.
    #[must_use]
    pub const fn area(&self) -> u32 {
        self.height * self.width
    }

    /// Flat row-major view of the cell states.
    #[must_use]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Returns the flat index for `(row, col)` without bounds checks.
    #[inline]
    fn offset(&self, row: u32, col: u32) -> usize {
        (row as usize) * (self.width as usize) + (col as usize)
    }

    /// Whether `cell` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// State of a specific cell, or `None` outside the grid.
    #[must_use]
    pub fn state(&self, cell: Cell) -> Option<CellState> {
        if self.contains(cell) {
            Some(self.cells[self.offset(cell.row, cell.col)])
        } else {
            None
        }
    }

    /// Whether `cell` is inside the grid and passable. Out-of-bounds cells
    /// read as not empty.
    #[must_use]
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.state(cell) == Some(CellState::Empty)
    }

    /// Whether `cell` is inside the grid and an obstacle.
    #[must_use]
    pub fn is_full(&self, cell: Cell) -> bool {
        self.state(cell) == Some(CellState::Full)
    }

    /// Mark `cell` as an obstacle.
    pub fn set_full(&mut self, cell: Cell) -> Result<(), GridError> {
        self.set(cell, CellState::Full)
    }

    /// Mark `cell` as passable.
    pub fn set_empty(&mut self, cell: Cell) -> Result<(), GridError> {
        self.set(cell, CellState::Empty)
    }

    fn set(&mut self, cell: Cell, state: CellState) -> Result<(), GridError> {
        if !self.contains(cell) {
            return Err(GridError::OutOfBounds {
                row: cell.row,
                col: cell.col,
                height: self.height,
                width: self.width,
            });
        }
        let idx = self.offset(cell.row, cell.col);
        self.cells[idx] = state;
        Ok(())
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
    }

    /// In-bounds orthogonal neighbors of `cell`, enumerated in the fixed
    /// order up, down, left, right. Neighbors falling outside the grid are
    /// omitted.
    #[must_use]
    pub fn four_neighbors(&self, cell: Cell) -> Neighbors {
        let Cell { row, col } = cell;
        let mut out = Neighbors::new();
        if row > 0 {
            out.push(Cell::new(row - 1, col));
        }
        if row + 1 < self.height {
            out.push(Cell::new(row + 1, col));
        }
        if col > 0 {
            out.push(Cell::new(row, col - 1));
        }
        if col + 1 < self.width {
            out.push(Cell::new(row, col + 1));
        }
        out
    }

    /// In-bounds orthogonal neighbors followed by the in-bounds diagonals,
    /// the latter enumerated up-left, up-right, down-left, down-right.
    #[must_use]
    pub fn eight_neighbors(&self, cell: Cell) -> Neighbors {
        let Cell { row, col } = cell;
        let mut out = self.four_neighbors(cell);
        if row > 0 && col > 0 {
            out.push(Cell::new(row - 1, col - 1));
        }
        if row > 0 && col + 1 < self.width {
            out.push(Cell::new(row - 1, col + 1));
        }
        if row + 1 < self.height && col > 0 {
            out.push(Cell::new(row + 1, col - 1));
        }
        if row + 1 < self.height && col + 1 < self.width {
            out.push(Cell::new(row + 1, col + 1));
        }
        out
    }
}

/// FIFO queue of cells awaiting breadth-first expansion.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    cells: VecDeque<Cell>,
}

impl Frontier {
    /// Construct an empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: VecDeque::new(),
        }
    }

    /// Append `cell` to the back of the queue.
    pub fn enqueue(&mut self, cell: Cell) {
        self.cells.push_back(cell);
    }

    /// Remove and return the oldest queued cell.
    pub fn dequeue(&mut self) -> Result<Cell, FrontierError> {
        self.cells.pop_front().ok_or(FrontierError::Empty)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Head-to-tail view of the queued cells without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

impl Extend<Cell> for Frontier {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

impl FromIterator<Cell> for Frontier {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
