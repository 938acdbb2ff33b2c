//! N-state cyclic automaton.
//!
//! A cell in state `s` advances to `(s + skip) mod N` when enough of its
//! Moore neighbors already hold that state. From noise this organizes into
//! spirals and traveling waves.

use std::f32::consts::TAU;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use mosaic_panel::{Torus, MAX_RADIUS};

use crate::canvas::Canvas;
use crate::color::PaletteScheme;
use crate::display::Display;
use crate::grid::DoubleBuffer;
use crate::{Result, Rgb};

/// Smallest state count.
pub const MIN_STATES: u8 = 3;

/// Largest state count.
pub const MAX_STATES: u8 = 24;

/// How many neighbors in the target state trigger an advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Threshold {
    /// Same count for every state
    Fixed(u8),
    /// Count rises linearly from `low` (state 0) to `high` (state N-1)
    Variable { low: u8, high: u8 },
}

impl Threshold {
    /// Threshold for a cell currently in `state`.
    pub fn for_state(&self, state: u8, states: u8) -> usize {
        match *self {
            Self::Fixed(t) => t as usize,
            Self::Variable { low, high } => {
                let span = states.saturating_sub(1).max(1) as usize;
                let (low, high) = (low as usize, high as usize);
                low + (high.saturating_sub(low) * state as usize + span / 2) / span
            }
        }
    }

    fn clamped(self, max: u8) -> Self {
        match self {
            Self::Fixed(t) => Self::Fixed(t.clamp(1, max)),
            Self::Variable { low, high } => {
                let low = low.clamp(1, max);
                Self::Variable { low, high: high.clamp(low, max) }
            }
        }
    }
}

impl std::fmt::Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(t) => write!(f, "{}", t),
            Self::Variable { low, high } => write!(f, "{}..{}", low, high),
        }
    }
}

/// Initial layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CyclicSeed {
    /// Independent uniform states
    Uniform,
    /// Noisy concentric rings around the center
    Radial,
    /// Square blocks of one state each
    Quadrants,
    /// Vertical stripes
    Stripes,
    /// States follow the angle around the center
    Spiral,
}

impl CyclicSeed {
    pub const ALL: [Self; 5] = [Self::Uniform, Self::Radial, Self::Quadrants, Self::Stripes, Self::Spiral];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Radial => "radial",
            Self::Quadrants => "quadrants",
            Self::Stripes => "stripes",
            Self::Spiral => "spiral",
        }
    }
}

/// Tunable parameters of a cyclic run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclicParams {
    pub states: u8,
    pub threshold: Threshold,
    pub radius: usize,
    pub skip: u8,
    pub palette: PaletteScheme,
}

impl Default for CyclicParams {
    fn default() -> Self {
        Self {
            states: 16,
            threshold: Threshold::Fixed(3),
            radius: 1,
            skip: 1,
            palette: PaletteScheme::Rainbow,
        }
    }
}

impl CyclicParams {
    /// Draw a visually pleasing parameter set.
    ///
    /// Larger neighborhoods need proportionally higher thresholds, and few
    /// states with a skip above one tend to freeze, so skip stays at one
    /// unless there are plenty of states.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let radius = *[1usize, 1, 1, 2, 2, 3].choose(rng).unwrap_or(&1);
        let states = match radius {
            1 => rng.gen_range(8..=16),
            2 => rng.gen_range(4..=12),
            _ => rng.gen_range(3..=6),
        };
        let base = match radius {
            1 => rng.gen_range(1..=3),
            2 => rng.gen_range(4..=8),
            _ => rng.gen_range(9..=14),
        };
        let threshold = if rng.gen_bool(0.3) {
            Threshold::Variable {
                low: base,
                high: base + rng.gen_range(1..=3),
            }
        } else {
            Threshold::Fixed(base)
        };
        let skip = if states >= 12 && rng.gen_bool(0.2) { 2 } else { 1 };
        let palette = *PaletteScheme::ALL.choose(rng).unwrap_or(&PaletteScheme::Rainbow);

        Self { states, threshold, radius, skip, palette }.normalized()
    }

    /// Clamp every field into its valid range.
    pub fn normalized(self) -> Self {
        let states = self.states.clamp(MIN_STATES, MAX_STATES);
        let radius = self.radius.clamp(1, MAX_RADIUS);
        let max_threshold = Torus::neighborhood_size(radius).min(u8::MAX as usize) as u8;
        Self {
            states,
            threshold: self.threshold.clamped(max_threshold),
            radius,
            skip: self.skip.clamp(1, states - 1),
            palette: self.palette,
        }
    }

    /// Shrink the radius so the neighborhood never wraps onto itself on a
    /// `width × height` grid, then normalize.
    pub fn fitted(self, width: usize, height: usize) -> Self {
        let limit = (width.min(height).saturating_sub(1) / 2).max(1);
        Self {
            radius: self.radius.min(limit),
            ..self
        }
        .normalized()
    }
}

/// Cyclic automaton over `0..N` states.
#[derive(Debug, Clone)]
pub struct Cyclic {
    params: CyclicParams,
    cells: DoubleBuffer<u8>,
    palette: Vec<Rgb>,
    seed: Option<CyclicSeed>,
}

impl Cyclic {
    pub fn new(width: usize, height: usize, params: CyclicParams) -> Result<Self> {
        let params = params.fitted(width, height);
        Ok(Self {
            params,
            cells: DoubleBuffer::new(width, height)?,
            palette: params.palette.generate(params.states as usize),
            seed: None,
        })
    }

    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Self> {
        Self::new(width, height, CyclicParams::random(rng))
    }

    /// Always start from `seed`.
    pub fn with_seed(mut self, seed: CyclicSeed) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn params(&self) -> &CyclicParams {
        &self.params
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells.current().get(x, y)
    }

    /// Set a cell (state taken modulo N).
    pub fn set(&mut self, x: usize, y: usize, state: u8) {
        let n = self.params.states;
        self.cells.current_mut().set(x, y, state % n);
    }

    pub fn cells(&self) -> &[u8] {
        self.cells.current().cells()
    }

    /// Regenerate the palette and lay out a seed.
    pub fn init<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.palette = self.params.palette.generate(self.params.states as usize);
        self.cells.clear();

        let seed = match self.seed {
            Some(seed) => seed,
            None => *CyclicSeed::ALL.choose(rng).unwrap_or(&CyclicSeed::Uniform),
        };
        let n = self.params.states as u32;
        let grid = self.cells.current_mut();
        let (w, h) = (grid.width(), grid.height());
        let (cx, cy) = (w as f32 / 2.0, h as f32 / 2.0);
        let max_dist = (cx * cx + cy * cy).sqrt().max(1.0);
        let block = rng.gen_range(4..=12usize);
        let offsets: Vec<u32> = (0..w.div_ceil(block) * h.div_ceil(block))
            .map(|_| rng.gen_range(0..n))
            .collect();

        for y in 0..h {
            for x in 0..w {
                let (dx, dy) = (x as f32 - cx, y as f32 - cy);
                let state = match seed {
                    CyclicSeed::Uniform => rng.gen_range(0..n),
                    CyclicSeed::Radial => {
                        let ring = (dx * dx + dy * dy).sqrt() / max_dist * n as f32 * 2.0;
                        ring as u32 + rng.gen_range(0..2)
                    }
                    CyclicSeed::Quadrants => offsets[(y / block) * w.div_ceil(block) + x / block],
                    CyclicSeed::Stripes => (x / block) as u32 + rng.gen_range(0..2),
                    CyclicSeed::Spiral => {
                        let angle = dy.atan2(dx).rem_euclid(TAU) / TAU;
                        let dist = (dx * dx + dy * dy).sqrt() / 6.0;
                        (angle * n as f32 + dist) as u32
                    }
                };
                grid.set(x, y, (state % n) as u8);
            }
        }

        debug!(
            states = self.params.states,
            threshold = %self.params.threshold,
            radius = self.params.radius,
            skip = self.params.skip,
            palette = self.params.palette.label(),
            seed = seed.label(),
            "cyclic seeded"
        );
    }

    pub fn update<R: Rng + ?Sized>(&mut self, _rng: &mut R) {
        let CyclicParams { states, threshold, radius, skip, .. } = self.params;
        {
            let (cur, next) = self.cells.split();
            let torus = cur.torus();
            let cells = cur.cells();
            for y in 0..torus.height() {
                for x in 0..torus.width() {
                    let state = cells[torus.index(x, y)];
                    let target = (state + skip) % states;
                    let needed = threshold.for_state(state, states);
                    let count = torus.count_matching(x, y, radius, |i| cells[i] == target);
                    next.set(x, y, if count >= needed { target } else { state });
                }
            }
        }
        self.cells.swap();
    }

    pub fn render<D: Display + ?Sized>(&self, canvas: &mut Canvas<'_, D>) {
        let cur = self.cells.current();
        canvas.draw_region(cur.width(), cur.height(), |x, y| {
            self.palette.get(cur.get(x, y) as usize).copied().unwrap_or(Rgb::BLACK)
        });
    }

    pub fn name(&self) -> String {
        format!("Cyclic ({} states)", self.params.states)
    }

    pub fn cells_in_domain(&self) -> bool {
        self.cells().iter().all(|&c| c < self.params.states)
    }
}
