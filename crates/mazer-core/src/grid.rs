//! The [`Grid`] type — owned rectangular storage of maze [`Cell`]s.
//!
//! A `Grid` is parsed once from text rows, then mutated in place through
//! `&mut` access by a single solve. Bounds-checked [`get`](Grid::get) /
//! [`set`](Grid::set) form the access contract; [`at`](Grid::at) is the
//! bounds-tolerant read used for neighbor admission tests.

use thiserror::Error;

use crate::cell::{Alphabet, Cell};
use crate::geom::Point;

/// Error from a bounds-checked access or a [`find`](Grid::find) query.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Access outside `[0, width) × [0, height)`.
    #[error("position ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    /// No cell matched a [`find`](Grid::find) query.
    #[error("no cell matches the query")]
    NotFound,
}

/// Error constructing a [`Grid`] from input rows.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The input has no rows, or an empty first row.
    #[error("maze is empty")]
    Empty,
    /// A row's length differs from the first row's.
    #[error("row {row} is {found} cells wide, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The start or finish marker does not appear anywhere.
    #[error("maze has no '{0}' marker")]
    MissingMarker(char),
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A rectangular grid of maze [`Cell`]s with owned storage.
///
/// `width` and `height` are fixed at construction, as are the located
/// [`start`](Grid::start) and [`finish`](Grid::finish) points.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    width: i32,
    height: i32,
    start: Point,
    finish: Point,
}

impl Grid {
    /// Parse a maze from equal-length character rows.
    ///
    /// Fails on empty input, on rows of unequal length, and when either
    /// marker is absent. If a marker appears more than once, the first one
    /// in row-major order wins; later duplicates keep their marker cell and
    /// block movement like walls.
    pub fn parse<S: AsRef<str>>(rows: &[S], alphabet: &Alphabet) -> Result<Self, ParseError> {
        let first = rows.first().ok_or(ParseError::Empty)?;
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(ParseError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(ParseError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            cells.extend(row.chars().map(|ch| alphabet.classify(ch)));
        }

        let mut grid = Self {
            cells,
            width: width as i32,
            height: rows.len() as i32,
            start: Point::ZERO,
            finish: Point::ZERO,
        };
        grid.start = grid
            .find(|c| c == Cell::Start)
            .map_err(|_| ParseError::MissingMarker(alphabet.start))?;
        grid.finish = grid
            .find(|c| c == Cell::Finish)
            .map_err(|_| ParseError::MissingMarker(alphabet.finish))?;
        log::debug!(
            "parsed {}x{} maze, start {}, finish {}",
            grid.width,
            grid.height,
            grid.start,
            grid.finish
        );
        Ok(grid)
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size as a `Point` (width = x, height = y).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// The start point located at construction.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// The finish point located at construction.
    #[inline]
    pub fn finish(&self) -> Point {
        self.finish
    }

    /// Whether `p` is inside the grid bounds. No side effects.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some((p.y * self.width + p.x) as usize)
        } else {
            None
        }
    }

    #[inline]
    fn out_of_bounds(&self, p: Point) -> GridError {
        GridError::OutOfBounds {
            x: p.x,
            y: p.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Read the cell at `p`.
    pub fn get(&self, p: Point) -> Result<Cell, GridError> {
        self.index(p)
            .map(|i| self.cells[i])
            .ok_or_else(|| self.out_of_bounds(p))
    }

    /// Overwrite the cell at `p` unconditionally.
    pub fn set(&mut self, p: Point, cell: Cell) -> Result<(), GridError> {
        match self.index(p) {
            Some(i) => {
                self.cells[i] = cell;
                Ok(())
            }
            None => Err(self.out_of_bounds(p)),
        }
    }

    /// Read the cell at `p`, or `None` if `p` is outside bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<Cell> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Find the first cell matching `pred`, scanning row-major
    /// (y ascending, then x ascending).
    pub fn find(&self, pred: impl Fn(Cell) -> bool) -> Result<Point, GridError> {
        self.iter()
            .find(|&(_, c)| pred(c))
            .map(|(p, _)| p)
            .ok_or(GridError::NotFound)
    }

    /// Row-major iterator over `(Point, Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(i, &c)| {
            let p = Point::new(i as i32 % self.width, i as i32 / self.width);
            (p, c)
        })
    }
}
