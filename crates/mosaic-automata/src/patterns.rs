//! Known Life patterns, stamped onto toroidal grids.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::CellGrid;

/// A small named Life pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    Block,
    Beehive,
    Loaf,
    Boat,
    Blinker,
    Toad,
    Beacon,
    Pulsar,
    Glider,
    Lwss,
    GosperGun,
}

impl Pattern {
    /// Patterns that never change under B3/S23.
    pub const STILL_LIFES: [Self; 4] = [Self::Block, Self::Beehive, Self::Loaf, Self::Boat];

    /// Period-2 and period-3 oscillators.
    pub const OSCILLATORS: [Self; 4] = [Self::Blinker, Self::Toad, Self::Beacon, Self::Pulsar];

    /// Patterns that travel.
    pub const SPACESHIPS: [Self; 2] = [Self::Glider, Self::Lwss];

    /// Every pattern.
    pub const ALL: [Self; 11] = [
        Self::Block,
        Self::Beehive,
        Self::Loaf,
        Self::Boat,
        Self::Blinker,
        Self::Toad,
        Self::Beacon,
        Self::Pulsar,
        Self::Glider,
        Self::Lwss,
        Self::GosperGun,
    ];

    fn rows(&self) -> &'static [&'static str] {
        match self {
            Self::Block => &["OO", "OO"],
            Self::Beehive => &[".OO.", "O..O", ".OO."],
            Self::Loaf => &[".OO.", "O..O", ".O.O", "..O."],
            Self::Boat => &["OO.", "O.O", ".O."],
            Self::Blinker => &["OOO"],
            Self::Toad => &[".OOO", "OOO."],
            Self::Beacon => &["OO..", "OO..", "..OO", "..OO"],
            Self::Pulsar => &[
                "..OOO...OOO..",
                ".............",
                "O....O.O....O",
                "O....O.O....O",
                "O....O.O....O",
                "..OOO...OOO..",
                ".............",
                "..OOO...OOO..",
                "O....O.O....O",
                "O....O.O....O",
                "O....O.O....O",
                ".............",
                "..OOO...OOO..",
            ],
            Self::Glider => &[".O.", "..O", "OOO"],
            Self::Lwss => &[".O..O", "O....", "O...O", "OOOO."],
            Self::GosperGun => &[
                "........................O...........",
                "......................O.O...........",
                "............OO......OO............OO",
                "...........O...O....OO............OO",
                "OO........O.....O...OO..............",
                "OO........O...O.OO....O.O...........",
                "..........O.....O.......O...........",
                "...........O...O....................",
                "............OO......................",
            ],
        }
    }

    /// Bounding box `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        let rows = self.rows();
        (rows[0].len(), rows.len())
    }

    /// Live cells as `(dx, dy)` offsets from the top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        self.rows().iter().enumerate().flat_map(|(dy, row)| {
            row.bytes()
                .enumerate()
                .filter(|&(_, c)| c == b'O')
                .map(move |(dx, _)| (dx, dy))
        })
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells().count()
    }

    /// Set the pattern's live cells at `(x, y)`, wrapping at the edges.
    pub fn stamp<T: Copy>(&self, grid: &mut CellGrid<T>, x: usize, y: usize, alive: T) {
        let torus = grid.torus();
        for (dx, dy) in self.cells() {
            let (nx, ny) = torus.offset(x, y, dx as isize, dy as isize);
            grid.set(nx, ny, alive);
        }
    }

    /// Clear the pattern's bounding box plus a one-cell margin, then stamp it.
    pub fn clear_and_stamp<T: Copy>(
        &self,
        grid: &mut CellGrid<T>,
        x: usize,
        y: usize,
        dead: T,
        alive: T,
    ) {
        let torus = grid.torus();
        let (w, h) = self.size();
        for dy in -1..=h as isize {
            for dx in -1..=w as isize {
                let (nx, ny) = torus.offset(x, y, dx, dy);
                grid.set(nx, ny, dead);
            }
        }
        self.stamp(grid, x, y, alive);
    }

    /// Stamp a random pattern from `set` at a random position that fits.
    ///
    /// Returns the chosen pattern, or `None` if none fits the grid.
    pub fn inject_random<T: Copy, R: Rng + ?Sized>(
        set: &[Self],
        grid: &mut CellGrid<T>,
        dead: T,
        alive: T,
        rng: &mut R,
    ) -> Option<Self> {
        let fitting: Vec<Self> = set
            .iter()
            .copied()
            .filter(|p| {
                let (w, h) = p.size();
                w + 2 <= grid.width() && h + 2 <= grid.height()
            })
            .collect();
        let pattern = *fitting.choose(rng)?;
        let x = rng.gen_range(0..grid.width());
        let y = rng.gen_range(0..grid.height());
        pattern.clear_and_stamp(grid, x, y, dead, alive);
        Some(pattern)
    }

    /// Lowercase name for logs.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Beehive => "beehive",
            Self::Loaf => "loaf",
            Self::Boat => "boat",
            Self::Blinker => "blinker",
            Self::Toad => "toad",
            Self::Beacon => "beacon",
            Self::Pulsar => "pulsar",
            Self::Glider => "glider",
            Self::Lwss => "lwss",
            Self::GosperGun => "gosper gun",
        }
    }
}
