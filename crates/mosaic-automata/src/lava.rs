//! Lava: an elementary crust feeding a Life-like magma above it.
//!
//! The canvas is split at a boundary row. Below it the crust is an
//! elementary automaton history that scrolls down as the boundary row is
//! recomputed each generation. Above it the magma runs Conway's rule with
//! cell age and ember heat; live boundary cells bubble new cells up into
//! the magma's bottom row.

use rand::Rng;
use tracing::debug;

use crate::canvas::Canvas;
use crate::display::Display;
use crate::grid::{CellGrid, DoubleBuffer};
use crate::patterns::Pattern;
use crate::rules::{ElementaryRule, LifeRule};
use crate::{Error, Result, Rgb};

/// Heat of a live cell; dead cells cool by one per generation.
pub const EMBER_STEPS: u8 = 6;

/// Generations between pattern injections.
pub const INJECT_EVERY: u64 = 90;

/// Smallest canvas height with room for all three regions.
pub const MIN_HEIGHT: usize = 6;

const DEFAULT_BUBBLE_CHANCE: f64 = 0.15;
const MAGMA_DENSITY: f64 = 0.2;

/// One magma cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Magma {
    pub alive: bool,
    /// Generations survived
    pub age: u8,
    /// Remaining glow, `EMBER_STEPS` while alive
    pub heat: u8,
}

impl Magma {
    pub const DEAD: Self = Self { alive: false, age: 0, heat: 0 };
    pub const FRESH: Self = Self { alive: true, age: 0, heat: EMBER_STEPS };

    /// Next state given the number of live neighbors.
    pub fn next(self, rule: LifeRule, n: u8) -> Self {
        match (self.alive, rule.next(self.alive, n)) {
            (true, true) => Self { age: self.age.saturating_add(1), ..self },
            (false, true) => Self::FRESH,
            (true, false) => Self { alive: false, age: 0, heat: EMBER_STEPS - 1 },
            (false, false) => Self { heat: self.heat.saturating_sub(1), ..self },
        }
    }
}

/// Composite crust-and-magma automaton.
#[derive(Debug, Clone)]
pub struct Lava {
    rule: ElementaryRule,
    magma: DoubleBuffer<Magma>,
    /// Row 0 is the boundary row, the rest is the crust history.
    crust: CellGrid<u8>,
    bubble_chance: f64,
    generation: u64,
}

impl Lava {
    pub fn new(width: usize, height: usize, rule: ElementaryRule) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyCanvas);
        }
        if height < MIN_HEIGHT {
            return Err(Error::CanvasTooSmall { width, height, min_height: MIN_HEIGHT });
        }
        let crust_rows = (height / 4).max(1) + 1;
        Ok(Self {
            rule,
            magma: DoubleBuffer::new(width, height - crust_rows)?,
            crust: CellGrid::new(width, crust_rows)?,
            bubble_chance: DEFAULT_BUBBLE_CHANCE,
            generation: 0,
        })
    }

    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Self> {
        Self::new(width, height, ElementaryRule::choose(&ElementaryRule::INTERESTING, rng))
    }

    /// Probability that a live boundary cell spawns magma above it.
    pub fn with_bubble_chance(mut self, chance: f64) -> Self {
        self.bubble_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Canvas row holding the boundary.
    pub fn boundary_row(&self) -> usize {
        self.magma.height()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn magma(&self, x: usize, y: usize) -> Magma {
        self.magma.current().get(x, y)
    }

    pub fn set_magma(&mut self, x: usize, y: usize, cell: Magma) {
        self.magma.current_mut().set(x, y, cell);
    }

    /// Crust row `y`, with row 0 being the boundary.
    pub fn crust_row(&self, y: usize) -> &[u8] {
        self.crust.row(y)
    }

    pub fn magma_population(&self) -> usize {
        self.magma.current().count(|c| c.alive)
    }

    /// Kill all magma.
    pub fn clear_magma(&mut self) {
        self.magma.clear();
    }

    pub fn init<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.generation = 0;
        self.crust.clear();
        crate::elementary::seed_runs(self.crust.row_mut(0), rng);

        self.magma.clear();
        let grid = self.magma.current_mut();
        for c in grid.cells_mut() {
            if rng.gen_bool(MAGMA_DENSITY) {
                *c = Magma::FRESH;
            }
        }
        Pattern::inject_random(&Pattern::OSCILLATORS, grid, Magma::DEAD, Magma::FRESH, rng);
    }

    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.generation += 1;

        // Crust: scroll the history down, then recompute the boundary.
        self.crust.scroll_down();
        let w = self.crust.width();
        {
            let (boundary, rest) = self.crust.cells_mut().split_at_mut(w);
            self.rule.evolve(&rest[..w], boundary);
        }

        // Magma: one Life generation.
        {
            let (cur, next) = self.magma.split();
            let torus = cur.torus();
            let cells = cur.cells();
            for y in 0..torus.height() {
                for x in 0..torus.width() {
                    let n = torus
                        .neighbor_indices(x, y)
                        .iter()
                        .filter(|&&i| cells[i].alive)
                        .count() as u8;
                    next.set(x, y, cells[torus.index(x, y)].next(LifeRule::CONWAY, n));
                }
            }
        }
        self.magma.swap();

        // Bubbles rise from live boundary cells.
        let top = self.magma.height() - 1;
        for x in 0..w {
            if self.crust.get(x, 0) != 0 && rng.gen_bool(self.bubble_chance) {
                self.magma.current_mut().set(x, top, Magma::FRESH);
            }
        }

        if self.generation % INJECT_EVERY == 0 {
            let mut set = Vec::with_capacity(8);
            set.extend_from_slice(&Pattern::STILL_LIFES);
            set.extend_from_slice(&Pattern::OSCILLATORS);
            let injected = Pattern::inject_random(&set, self.magma.current_mut(), Magma::DEAD, Magma::FRESH, rng);
            debug!(generation = self.generation, ?injected, "lava injection");
        }
    }

    pub fn render<D: Display + ?Sized>(&self, canvas: &mut Canvas<'_, D>) {
        const YOUNG: Rgb = Rgb::new(255, 230, 90);
        const OLD: Rgb = Rgb::new(230, 60, 0);
        const EMBER: Rgb = Rgb::new(200, 20, 0);
        const GLOW: Rgb = Rgb::new(255, 140, 0);
        const ROCK: Rgb = Rgb::new(120, 40, 10);

        let magma = self.magma.current();
        let top = magma.height();
        let depth = self.crust.height().max(2) - 1;
        canvas.draw_region(magma.width(), top + self.crust.height(), |x, y| {
            if y < top {
                let c = magma.get(x, y);
                if c.alive {
                    YOUNG.lerp(OLD, c.age as f32 / 24.0)
                } else if c.heat > 0 {
                    EMBER.scale(c.heat as f32 / EMBER_STEPS as f32 * 0.6)
                } else {
                    Rgb::BLACK
                }
            } else {
                let row = y - top;
                match (row, self.crust.get(x, row)) {
                    (0, 0) => Rgb::new(60, 0, 0),
                    (0, _) => GLOW,
                    (_, 0) => Rgb::BLACK,
                    _ => ROCK.scale(1.0 - 0.6 * (row - 1) as f32 / depth as f32),
                }
            }
        });
    }

    pub fn name(&self) -> String {
        format!("Lava ({})", self.rule)
    }

    pub fn cells_in_domain(&self) -> bool {
        self.crust.cells().iter().all(|&c| c <= 1)
            && self
                .magma
                .current()
                .cells()
                .iter()
                .all(|c| c.heat <= EMBER_STEPS && (!c.alive || c.heat == EMBER_STEPS))
    }
}
