//! Brian's Brain: a three-state excitable medium.

use rand::Rng;
use tracing::debug;

use crate::canvas::Canvas;
use crate::display::Display;
use crate::grid::DoubleBuffer;
use crate::{Result, Rgb};

/// Hue step between restarts (golden ratio conjugate).
const HUE_STEP: f32 = 0.618_034;

/// Cell state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BrainCell {
    #[default]
    Off = 0,
    On = 1,
    Dying = 2,
}

impl BrainCell {
    /// Next state given the number of `On` neighbors.
    #[inline]
    pub const fn next(self, on_neighbors: usize) -> Self {
        match self {
            Self::On => Self::Dying,
            Self::Dying => Self::Off,
            Self::Off if on_neighbors == 2 => Self::On,
            Self::Off => Self::Off,
        }
    }
}

/// Brian's Brain on a torus.
#[derive(Debug, Clone)]
pub struct Brain {
    cells: DoubleBuffer<BrainCell>,
    hue: f32,
    restarts: u32,
}

impl Brain {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            cells: DoubleBuffer::new(width, height)?,
            hue: 0.0,
            restarts: 0,
        })
    }

    pub fn get(&self, x: usize, y: usize) -> BrainCell {
        self.cells.current().get(x, y)
    }

    pub fn set(&mut self, x: usize, y: usize, cell: BrainCell) {
        self.cells.current_mut().set(x, y, cell);
    }

    /// Number of cells in `state`.
    pub fn count(&self, state: BrainCell) -> usize {
        self.cells.current().count(|&c| c == state)
    }

    /// Seed about 30% of cells on and rotate the hue.
    pub fn init<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cells.clear();
        for c in self.cells.current_mut().cells_mut() {
            if rng.gen_bool(0.3) {
                *c = BrainCell::On;
            }
        }
        if self.restarts == 0 {
            self.hue = rng.gen();
        } else {
            self.hue = (self.hue + HUE_STEP).fract();
        }
        self.restarts += 1;
    }

    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        {
            let (cur, next) = self.cells.split();
            let torus = cur.torus();
            let cells = cur.cells();
            for y in 0..torus.height() {
                for x in 0..torus.width() {
                    let on = torus
                        .neighbor_indices(x, y)
                        .iter()
                        .filter(|&&i| cells[i] == BrainCell::On)
                        .count();
                    next.set(x, y, cells[torus.index(x, y)].next(on));
                }
            }
        }
        self.cells.swap();

        if self.count(BrainCell::On) == 0 && self.count(BrainCell::Dying) == 0 {
            debug!("brain went quiet, reseeding");
            self.init(rng);
        }
    }

    /// Colors for `On` and `Dying` cells.
    pub fn colors(&self) -> (Rgb, Rgb) {
        (Rgb::hsv(self.hue, 0.25, 1.0), Rgb::hsv(self.hue + 0.5, 0.9, 0.35))
    }

    pub fn render<D: Display + ?Sized>(&self, canvas: &mut Canvas<'_, D>) {
        let (on, dying) = self.colors();
        let cur = self.cells.current();
        canvas.draw_region(cur.width(), cur.height(), |x, y| match cur.get(x, y) {
            BrainCell::Off => Rgb::BLACK,
            BrainCell::On => on,
            BrainCell::Dying => dying,
        });
    }

    pub fn name(&self) -> String {
        "Brian's Brain".to_string()
    }

    /// Always true: the enum cannot hold another state.
    pub fn cells_in_domain(&self) -> bool {
        true
    }
}
