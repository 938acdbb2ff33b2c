//! Life-like automata on a torus.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::canvas::Canvas;
use crate::display::Display;
use crate::grid::DoubleBuffer;
use crate::patterns::Pattern;
use crate::rules::LifeRule;
use crate::{Result, Rgb};

/// Generations with an unchanged population before a pattern is injected.
pub const STILLNESS_LIMIT: u32 = 150;

/// Share of live cells in a random seed.
pub const DEFAULT_DENSITY: f64 = 0.25;

/// Patterns scattered over an empty board when seeding from the library.
const SEED_PATTERNS: [Pattern; 7] = [
    Pattern::Glider,
    Pattern::Lwss,
    Pattern::GosperGun,
    Pattern::Beehive,
    Pattern::Block,
    Pattern::Loaf,
    Pattern::Boat,
];

/// A Life-like automaton with birth/survival masks.
#[derive(Debug, Clone)]
pub struct Life {
    rule: LifeRule,
    cells: DoubleBuffer<u8>,
    density: f64,
    hue: f32,
    last_population: usize,
    still_for: u32,
}

impl Life {
    /// Allocate both generations.
    pub fn new(width: usize, height: usize, rule: LifeRule) -> Result<Self> {
        Ok(Self {
            rule,
            cells: DoubleBuffer::new(width, height)?,
            density: DEFAULT_DENSITY,
            hue: 0.3,
            last_population: 0,
            still_for: 0,
        })
    }

    /// Conway's rule most of the time, otherwise a random named variant.
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Self> {
        let rule = if rng.gen_bool(0.6) {
            LifeRule::CONWAY
        } else {
            LifeRule::PRESETS
                .choose(rng)
                .map(|(_, r)| *r)
                .unwrap_or_default()
        };
        Self::new(width, height, rule)
    }

    /// Share of live cells when seeding randomly.
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density.clamp(0.0, 1.0);
        self
    }

    pub fn rule(&self) -> LifeRule {
        self.rule
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    /// Whether a cell of the current generation is alive.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cells.current().get(x, y) != 0
    }

    /// Set a cell of the current generation.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        self.cells.current_mut().set(x, y, alive as u8);
    }

    /// Stamp a pattern into the current generation.
    pub fn stamp(&mut self, pattern: Pattern, x: usize, y: usize) {
        pattern.stamp(self.cells.current_mut(), x, y, 1);
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.last_population = 0;
        self.still_for = 0;
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.current().count(|&c| c != 0)
    }

    /// Seed randomly or from the pattern library, then add an oscillator.
    pub fn init<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.clear();
        self.hue = rng.gen();

        let grid = self.cells.current_mut();
        if rng.gen_bool(0.6) {
            let density = self.density;
            grid.cells_mut().iter_mut().for_each(|c| *c = rng.gen_bool(density) as u8);
        } else {
            let count = rng.gen_range(3..=6);
            for _ in 0..count {
                Pattern::inject_random(&SEED_PATTERNS, grid, 0, 1, rng);
            }
        }
        // Grids too small for any library oscillator get a wrapped blinker.
        let oscillator = Pattern::inject_random(&Pattern::OSCILLATORS, grid, 0, 1, rng).unwrap_or_else(|| {
            let (x, y) = (rng.gen_range(0..grid.width()), rng.gen_range(0..grid.height()));
            Pattern::Blinker.stamp(grid, x, y, 1);
            Pattern::Blinker
        });

        self.last_population = self.population();
        debug!(rule = %self.rule, population = self.last_population, ?oscillator, "life seeded");
    }

    /// Advance one generation.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let rule = self.rule;
        {
            let (cur, next) = self.cells.split();
            let torus = cur.torus();
            let cells = cur.cells();
            for y in 0..torus.height() {
                for x in 0..torus.width() {
                    let n: u8 = torus.neighbor_indices(x, y).iter().map(|&i| cells[i]).sum();
                    let alive = cells[torus.index(x, y)] != 0;
                    next.set(x, y, rule.next(alive, n) as u8);
                }
            }
        }
        self.cells.swap();

        let population = self.population();
        if population == 0 {
            debug!(rule = %rule, "life died out, reseeding");
            self.init(rng);
            return;
        }

        if population == self.last_population {
            self.still_for += 1;
        } else {
            self.still_for = 0;
        }
        self.last_population = population;

        if self.still_for >= STILLNESS_LIMIT {
            let injected = Pattern::inject_random(&Pattern::SPACESHIPS, self.cells.current_mut(), 0, 1, rng);
            debug!(?injected, "life stagnant, injecting pattern");
            self.still_for = 0;
        }
    }

    pub fn render<D: Display + ?Sized>(&self, canvas: &mut Canvas<'_, D>) {
        let newborn = Rgb::hsv(self.hue, 0.2, 1.0);
        let survivor = Rgb::hsv(self.hue, 0.85, 0.85);
        let cur = self.cells.current();
        let prev = self.cells.previous();
        canvas.draw_region(cur.width(), cur.height(), |x, y| match (cur.get(x, y), prev.get(x, y)) {
            (0, _) => Rgb::BLACK,
            (_, 0) => newborn,
            _ => survivor,
        });
    }

    pub fn name(&self) -> String {
        match self.rule.preset_name() {
            Some(name) => name.to_string(),
            None => format!("Life {}", self.rule),
        }
    }

    pub fn cells_in_domain(&self) -> bool {
        self.cells.current().cells().iter().all(|&c| c <= 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FrameBuffer;
    use mosaic_panel::{PanelGeometry, PanelMapper};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn live_cells(life: &Life) -> Vec<(usize, usize)> {
        let mut v = Vec::new();
        for y in 0..life.height() {
            for x in 0..life.width() {
                if life.is_alive(x, y) {
                    v.push((x, y));
                }
            }
        }
        v
    }

    fn board(w: usize, h: usize) -> Life {
        let mut life = Life::new(w, h, LifeRule::CONWAY).unwrap();
        life.clear();
        life
    }

    #[test]
    fn tiny_grids_still_get_an_oscillator() {
        let mut rng = StdRng::seed_from_u64(11);
        for (w, h) in [(4, 2), (2, 2), (1, 1), (3, 1)] {
            let mut life = Life::new(w, h, LifeRule::CONWAY).unwrap();
            for _ in 0..20 {
                life.init(&mut rng);
                assert!(life.population() > 0, "{w}x{h} seeded empty");
            }
        }
    }

    #[test]
    fn blinker_has_period_two() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut life = board(8, 8);
        life.stamp(Pattern::Blinker, 2, 3);
        let start = live_cells(&life);
        assert_eq!(start, vec![(2, 3), (3, 3), (4, 3)]);

        life.update(&mut rng);
        assert_eq!(live_cells(&life), vec![(3, 2), (3, 3), (3, 4)]);

        life.update(&mut rng);
        assert_eq!(live_cells(&life), start);
    }

    #[test]
    fn block_is_stable() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut life = board(6, 6);
        life.stamp(Pattern::Block, 2, 2);
        let start = live_cells(&life);
        for _ in 0..10 {
            life.update(&mut rng);
            assert_eq!(live_cells(&life), start);
        }
    }

    #[test]
    fn glider_moves_diagonally() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut life = board(12, 12);
        life.stamp(Pattern::Glider, 2, 2);
        let start = live_cells(&life);
        for _ in 0..4 {
            life.update(&mut rng);
        }
        let mut moved: Vec<_> = start.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
        moved.sort_by_key(|&(x, y)| (y, x));
        assert_eq!(live_cells(&life), moved);
    }

    #[test]
    fn glider_wraps_around_edges() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut life = board(8, 8);
        life.stamp(Pattern::Glider, 0, 0);
        // 32 generations move the glider 8 cells, back to where it started.
        let start = live_cells(&life);
        for _ in 0..32 {
            life.update(&mut rng);
        }
        assert_eq!(live_cells(&life), start);
    }

    #[test]
    fn empty_board_reseeds() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut life = board(32, 32);
        life.set(5, 5, true);
        life.update(&mut rng);
        assert!(life.population() > 0);
        assert!(life.cells_in_domain());
    }

    #[test]
    fn init_always_has_life() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut life = Life::new(40, 40, LifeRule::HIGH_LIFE).unwrap();
        for _ in 0..20 {
            life.init(&mut rng);
            assert!(life.population() >= 3);
        }
    }

    #[test]
    fn render_marks_newborns() {
        let mut rng = StdRng::seed_from_u64(7);
        let mapper = PanelMapper::identity(PanelGeometry::new(8, 8, 1, 1)).unwrap();
        let mut fb = FrameBuffer::new(8, 8);
        let mut life = board(8, 8);
        life.stamp(Pattern::Blinker, 2, 3);
        life.update(&mut rng);
        {
            let mut canvas = Canvas::new(&mut fb, &mapper);
            life.render(&mut canvas);
            canvas.present();
        }
        // The center survives, the two vertical ends are new.
        assert_eq!(fb.lit_pixels(), 3);
        assert_ne!(fb.pixel(3, 3), fb.pixel(3, 2));
        assert_eq!(fb.pixel(3, 2), fb.pixel(3, 4));
    }

    #[test]
    fn names() {
        assert_eq!(board(4, 4).name(), "Conway's Life");
        let custom = Life::new(4, 4, LifeRule::parse("B1/S1")).unwrap();
        assert_eq!(custom.name(), "Life B1/S1");
    }
}
