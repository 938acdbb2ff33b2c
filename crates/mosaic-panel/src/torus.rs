//! Toroidal neighborhoods.
//!
//! Every grid the automata run on wraps at its edges, so a cell on the left
//! border sees the right border as its neighbor. Neighbor coordinates are
//! the Euclidean remainder of `coord + delta` by the dimension, so a delta
//! may exceed the grid size (a radius-3 neighborhood on a 2-wide grid).

/// Largest Moore neighborhood radius any automaton uses.
pub const MAX_RADIUS: usize = 3;

/// The eight Moore-neighborhood offsets (dx, dy), row by row.
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A wrapped `width × height` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Torus {
    width: usize,
    height: usize,
}

impl Torus {
    /// Create a torus. Both dimensions must be non-zero.
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Grid width.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Whether the grid has no cells.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wrap `coord + delta` into `0..dimension`.
    #[inline]
    pub fn wrap(coord: usize, delta: isize, dimension: usize) -> usize {
        (coord as isize + delta).rem_euclid(dimension as isize) as usize
    }

    /// Row-major index of a cell.
    #[inline]
    pub const fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Neighbor of `(x, y)` at offset `(dx, dy)`, wrapped.
    #[inline]
    pub fn offset(&self, x: usize, y: usize, dx: isize, dy: isize) -> (usize, usize) {
        (Self::wrap(x, dx, self.width), Self::wrap(y, dy, self.height))
    }

    /// The eight wrapped Moore neighbors of a cell.
    pub fn neighbors8(&self, x: usize, y: usize) -> [(usize, usize); 8] {
        MOORE_OFFSETS.map(|(dx, dy)| self.offset(x, y, dx, dy))
    }

    /// Row-major indices of the eight wrapped Moore neighbors.
    #[inline]
    pub fn neighbor_indices(&self, x: usize, y: usize) -> [usize; 8] {
        MOORE_OFFSETS.map(|(dx, dy)| {
            let (nx, ny) = self.offset(x, y, dx, dy);
            self.index(nx, ny)
        })
    }

    /// Wrapped Moore neighbors within `radius` (the cell itself excluded).
    ///
    /// `radius` is clamped to [`MAX_RADIUS`].
    pub fn moore(&self, x: usize, y: usize, radius: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let r = radius.min(MAX_RADIUS) as isize;
        (-r..=r)
            .flat_map(move |dy| (-r..=r).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(move |(dx, dy)| self.offset(x, y, dx, dy))
    }

    /// Count Moore neighbors within `radius` whose index satisfies a predicate.
    pub fn count_matching<F>(&self, x: usize, y: usize, radius: usize, mut matches: F) -> usize
    where
        F: FnMut(usize) -> bool,
    {
        self.moore(x, y, radius)
            .filter(|&(nx, ny)| matches(self.index(nx, ny)))
            .count()
    }

    /// Number of cells in a Moore neighborhood of `radius`, excluding the center.
    pub const fn neighborhood_size(radius: usize) -> usize {
        let side = 2 * radius + 1;
        side * side - 1
    }
}
