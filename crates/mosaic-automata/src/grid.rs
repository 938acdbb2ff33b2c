//! Owned cell buffers.
//!
//! A [`CellGrid`] is a row-major `Vec` whose lifetime is exactly that of the
//! automaton holding it. [`DoubleBuffer`] pairs two grids with a flag naming
//! the current one, so an update reads one generation and writes the other.

use mosaic_panel::Torus;

use crate::{Error, Result};

/// A row-major 2-D buffer of cell states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> CellGrid<T> {
    /// Allocate a grid filled with `T::default()`.
    ///
    /// Allocation failure is reported instead of aborting.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyCanvas);
        }
        let len = width
            .checked_mul(height)
            .ok_or(Error::Allocation { cells: usize::MAX })?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| Error::Allocation { cells: len })?;
        cells.resize(len, T::default());

        Ok(Self { width, height, cells })
    }

    /// Reset every cell to `T::default()`.
    pub fn clear(&mut self) {
        self.fill(T::default());
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }
}

impl<T: Copy> CellGrid<T> {
    /// Grid width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Wrapped view of the grid's dimensions.
    pub fn torus(&self) -> Torus {
        Torus::new(self.width, self.height)
    }

    /// Row-major index.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Cell value.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.cells[self.index(x, y)]
    }

    /// Overwrite a cell.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let i = self.index(x, y);
        self.cells[i] = value;
    }

    /// Cell value with both coordinates wrapped.
    #[inline]
    pub fn get_wrapped(&self, x: usize, y: usize, dx: isize, dy: isize) -> T {
        let (nx, ny) = self.torus().offset(x, y, dx, dy);
        self.get(nx, ny)
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// All cells, mutable.
    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// One row.
    pub fn row(&self, y: usize) -> &[T] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// One row, mutable.
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let w = self.width;
        &mut self.cells[y * w..(y + 1) * w]
    }

    /// Number of cells matching a predicate.
    pub fn count<F: Fn(&T) -> bool>(&self, pred: F) -> usize {
        self.cells.iter().filter(|c| pred(c)).count()
    }

    /// Move every row down by one (the last row falls off, row 0 keeps its value).
    pub fn scroll_down(&mut self) {
        let w = self.width;
        let len = self.cells.len();
        self.cells.copy_within(0..len - w, w);
    }

    /// Move every row up by one (row 0 falls off, the last row keeps its value).
    pub fn scroll_up(&mut self) {
        let w = self.width;
        let len = self.cells.len();
        self.cells.copy_within(w..len, 0);
    }
}

/// Two grids of the same size: the current generation and the one being built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoubleBuffer<T> {
    grids: [CellGrid<T>; 2],
    current: usize,
}

impl<T: Copy + Default> DoubleBuffer<T> {
    /// Allocate both generations.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            grids: [CellGrid::new(width, height)?, CellGrid::new(width, height)?],
            current: 0,
        })
    }

    /// Clear both generations.
    pub fn clear(&mut self) {
        self.grids[0].clear();
        self.grids[1].clear();
    }
}

impl<T: Copy> DoubleBuffer<T> {
    /// Grid width.
    pub fn width(&self) -> usize {
        self.grids[0].width()
    }

    /// Grid height.
    pub fn height(&self) -> usize {
        self.grids[0].height()
    }

    /// The current generation.
    pub fn current(&self) -> &CellGrid<T> {
        &self.grids[self.current]
    }

    /// The current generation, for seeding and pattern injection.
    pub fn current_mut(&mut self) -> &mut CellGrid<T> {
        &mut self.grids[self.current]
    }

    /// The generation before the current one (valid after a [`swap`](Self::swap)).
    pub fn previous(&self) -> &CellGrid<T> {
        &self.grids[1 - self.current]
    }

    /// Read the current generation while writing the next one.
    pub fn split(&mut self) -> (&CellGrid<T>, &mut CellGrid<T>) {
        let [a, b] = &mut self.grids;
        if self.current == 0 {
            (&*a, b)
        } else {
            (&*b, a)
        }
    }

    /// Make the generation just written current.
    pub fn swap(&mut self) {
        self.current = 1 - self.current;
    }
}
