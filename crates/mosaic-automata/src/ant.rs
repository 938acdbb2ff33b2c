//! Langton's Ant with several walkers sharing one grid.

use rand::Rng;

use crate::canvas::Canvas;
use crate::display::Display;
use crate::grid::DoubleBuffer;
use crate::{Result, Rgb};

/// Most walkers a grid carries.
pub const MAX_ANTS: usize = 8;

/// Walker count range used by [`LangtonsAnt::random`].
pub const RANDOM_ANTS: std::ops::RangeInclusive<usize> = 1..=5;

/// Walker colors, assigned by index.
pub const ANT_COLORS: [Rgb; 6] = [Rgb::RED, Rgb::GREEN, Rgb::BLUE, Rgb::YELLOW, Rgb::MAGENTA, Rgb::CYAN];

const TRAIL: Rgb = Rgb::gray(160);

/// Compass heading, clockwise from up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    Up,
    Right,
    Down,
    Left,
}

impl Heading {
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    pub const fn turn_right(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    pub const fn turn_left(self) -> Self {
        match self {
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
            Self::Right => Self::Up,
        }
    }

    /// Step `(dx, dy)` in screen coordinates.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

/// One walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ant {
    pub x: usize,
    pub y: usize,
    pub heading: Heading,
    pub color: Rgb,
}

/// Binary grid plus up to [`MAX_ANTS`] walkers.
#[derive(Debug, Clone)]
pub struct LangtonsAnt {
    cells: DoubleBuffer<u8>,
    ants: Vec<Ant>,
    count: usize,
}

impl LangtonsAnt {
    /// Allocate a grid for `count` walkers (clamped to `1..=MAX_ANTS`).
    pub fn new(width: usize, height: usize, count: usize) -> Result<Self> {
        let count = count.clamp(1, MAX_ANTS);
        Ok(Self {
            cells: DoubleBuffer::new(width, height)?,
            ants: Vec::with_capacity(count),
            count,
        })
    }

    /// Allocate with a random walker count.
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Self> {
        Self::new(width, height, rng.gen_range(RANDOM_ANTS))
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    /// Replace the walkers (truncated to [`MAX_ANTS`]).
    pub fn set_ants(&mut self, ants: &[Ant]) {
        self.ants.clear();
        self.ants.extend_from_slice(&ants[..ants.len().min(MAX_ANTS)]);
        self.count = self.ants.len().max(1);
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.cells.current().get(x, y) != 0
    }

    /// Number of set cells.
    pub fn population(&self) -> usize {
        self.cells.current().count(|&c| c != 0)
    }

    /// Clear the grid and place walkers at random.
    pub fn init<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cells.clear();
        let (w, h) = (self.cells.width(), self.cells.height());
        self.ants = (0..self.count)
            .map(|i| Ant {
                x: rng.gen_range(0..w),
                y: rng.gen_range(0..h),
                heading: Heading::ALL[rng.gen_range(0..4)],
                color: ANT_COLORS[i % ANT_COLORS.len()],
            })
            .collect();
    }

    /// Move every walker once.
    ///
    /// All walkers read the previous generation. A cell visited by an odd
    /// number of walkers flips, so walker order does not matter.
    pub fn update<R: Rng + ?Sized>(&mut self, _rng: &mut R) {
        let (cur, next) = self.cells.split();
        next.cells_mut().copy_from_slice(cur.cells());
        let torus = cur.torus();

        for ant in &mut self.ants {
            let was_set = cur.get(ant.x, ant.y) != 0;
            let i = torus.index(ant.x, ant.y);
            next.cells_mut()[i] ^= 1;

            ant.heading = if was_set { ant.heading.turn_left() } else { ant.heading.turn_right() };
            let (dx, dy) = ant.heading.delta();
            (ant.x, ant.y) = torus.offset(ant.x, ant.y, dx, dy);
        }
        self.cells.swap();
    }

    pub fn render<D: Display + ?Sized>(&self, canvas: &mut Canvas<'_, D>) {
        let cur = self.cells.current();
        canvas.draw_region(cur.width(), cur.height(), |x, y| {
            if cur.get(x, y) != 0 {
                TRAIL
            } else {
                Rgb::BLACK
            }
        });
        for ant in &self.ants {
            canvas.put_clipped(ant.x as i32, ant.y as i32, ant.color);
        }
    }

    pub fn name(&self) -> String {
        format!("Langton's Ant ({})", self.count)
    }

    pub fn cells_in_domain(&self) -> bool {
        let (w, h) = (self.cells.width(), self.cells.height());
        self.ants.len() <= MAX_ANTS
            && self.ants.iter().all(|a| a.x < w && a.y < h)
            && self.cells.current().cells().iter().all(|&c| c <= 1)
    }
}
