//! One-dimensional elementary automaton, drawn as a growing history.
//!
//! Row 0 holds the seed; each update computes the next row from the one
//! above it. When the history reaches the bottom of the canvas the automaton
//! restarts from a fresh seed, optionally with a new rule.

use rand::Rng;
use tracing::debug;

use crate::canvas::Canvas;
use crate::display::Display;
use crate::grid::CellGrid;
use crate::rules::ElementaryRule;
use crate::{Result, Rgb};

/// How the top row is seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedPattern {
    /// One live cell in the middle
    Single,
    /// Each cell live with probability 1/2
    Random,
    /// 1010...
    Alternating,
    /// Dense traffic in the middle half, sparse outside
    DensityBand,
}

impl SeedPattern {
    /// Write the seed into `row`.
    pub fn apply<R: Rng + ?Sized>(&self, row: &mut [u8], rng: &mut R) {
        let w = row.len();
        match self {
            Self::Single => {
                row.fill(0);
                if w > 0 {
                    row[w / 2] = 1;
                }
            }
            Self::Random => row.iter_mut().for_each(|c| *c = rng.gen_range(0..2)),
            Self::Alternating => row.iter_mut().enumerate().for_each(|(x, c)| *c = (x % 2 == 0) as u8),
            Self::DensityBand => {
                for (x, c) in row.iter_mut().enumerate() {
                    let density = if x >= w / 4 && x < w - w / 4 { 0.65 } else { 0.2 };
                    *c = rng.gen_bool(density) as u8;
                }
            }
        }
    }
}

/// Fill `row` with runs of equal cells, 1 to 8 cells long.
///
/// Neighboring cells are correlated, which gives the composite bands
/// larger structures than an independent coin flip per cell.
pub fn seed_runs<R: Rng + ?Sized>(row: &mut [u8], rng: &mut R) {
    let mut x = 0;
    while x < row.len() {
        let value = rng.gen_bool(0.45) as u8;
        let run = rng.gen_range(1..=8).min(row.len() - x);
        row[x..x + run].fill(value);
        x += run;
    }
}

/// Elementary cellular automaton with a scrolling-free history display.
#[derive(Debug, Clone)]
pub struct Elementary {
    rule: ElementaryRule,
    cells: CellGrid<u8>,
    row: usize,
    seed: Option<SeedPattern>,
    reroll: bool,
    color: Rgb,
}

impl Elementary {
    /// Allocate a history buffer for `rule`.
    pub fn new(width: usize, height: usize, rule: ElementaryRule) -> Result<Self> {
        Ok(Self {
            rule,
            cells: CellGrid::new(width, height)?,
            row: 0,
            seed: None,
            reroll: true,
            color: Rgb::WHITE,
        })
    }

    /// Allocate with a rule drawn from [`ElementaryRule::INTERESTING`].
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Self> {
        Self::new(width, height, ElementaryRule::choose(&ElementaryRule::INTERESTING, rng))
    }

    /// Always seed with `seed` instead of picking one per restart.
    pub fn with_seed(mut self, seed: SeedPattern) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Whether a restart picks a new rule.
    pub fn with_reroll(mut self, reroll: bool) -> Self {
        self.reroll = reroll;
        self
    }

    pub fn rule(&self) -> ElementaryRule {
        self.rule
    }

    /// Index of the newest computed row.
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn cells(&self) -> &CellGrid<u8> {
        &self.cells
    }

    /// Clear the history and seed row 0.
    pub fn init<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cells.clear();
        self.row = 0;

        let seed = self.seed.unwrap_or_else(|| {
            if self.rule == ElementaryRule::TRAFFIC {
                SeedPattern::DensityBand
            } else {
                match rng.gen_range(0..10) {
                    0..=2 => SeedPattern::Random,
                    3 => SeedPattern::Alternating,
                    _ => SeedPattern::Single,
                }
            }
        });
        seed.apply(self.cells.row_mut(0), rng);
        self.color = Rgb::hsv(self.rule.0 as f32 / 256.0, 0.35, 1.0);
    }

    /// Compute the next row, or restart once the canvas is full.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.row + 1 >= self.cells.height() {
            if self.reroll {
                self.rule = ElementaryRule::choose(&ElementaryRule::INTERESTING, rng);
            }
            debug!(rule = self.rule.0, "elementary restart");
            self.init(rng);
            return;
        }

        self.row += 1;
        let w = self.cells.width();
        let (above, below) = self.cells.cells_mut().split_at_mut(self.row * w);
        self.rule.evolve(&above[(self.row - 1) * w..], &mut below[..w]);
    }

    pub fn render<D: Display + ?Sized>(&self, canvas: &mut Canvas<'_, D>) {
        canvas.draw_region(self.cells.width(), self.cells.height(), |x, y| {
            if y <= self.row && self.cells.get(x, y) != 0 {
                self.color
            } else {
                Rgb::BLACK
            }
        });
    }

    pub fn name(&self) -> String {
        self.rule.to_string()
    }

    /// Every cell is 0 or 1 and nothing below the newest row is set.
    pub fn cells_in_domain(&self) -> bool {
        let w = self.cells.width();
        self.cells
            .cells()
            .iter()
            .enumerate()
            .all(|(i, &c)| c <= 1 && (c == 0 || i / w <= self.row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FrameBuffer;
    use mosaic_panel::{PanelGeometry, PanelMapper};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rule_90_draws_sierpinski() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut ca = Elementary::new(64, 32, ElementaryRule(90))
            .unwrap()
            .with_seed(SeedPattern::Single)
            .with_reroll(false);
        ca.init(&mut rng);
        for _ in 0..31 {
            ca.update(&mut rng);
        }
        assert_eq!(ca.row(), 31);

        let center = 32i64;
        for k in 0..32i64 {
            for x in 0..64i64 {
                let d = x - center;
                let expected = d.abs() <= k && (k + d) % 2 == 0 && {
                    let m = (k + d) / 2;
                    m & !k == 0
                };
                assert_eq!(ca.cells().get(x as usize, k as usize) == 1, expected, "row {} col {}", k, x);
            }
        }
    }

    #[test]
    fn restarts_at_bottom() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut ca = Elementary::new(16, 4, ElementaryRule(30)).unwrap().with_reroll(false);
        ca.init(&mut rng);
        for _ in 0..3 {
            ca.update(&mut rng);
        }
        assert_eq!(ca.row(), 3);
        ca.update(&mut rng);
        assert_eq!(ca.row(), 0);
        assert_eq!(ca.rule(), ElementaryRule(30));
        assert!(ca.cells_in_domain());
    }

    #[test]
    fn reroll_stays_in_curated_set() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ca = Elementary::new(8, 2, ElementaryRule(30)).unwrap();
        ca.init(&mut rng);
        for _ in 0..40 {
            ca.update(&mut rng);
            assert!(ElementaryRule::INTERESTING.contains(&ca.rule().0));
        }
    }

    #[test]
    fn traffic_rule_uses_density_band() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut ca = Elementary::new(400, 4, ElementaryRule::TRAFFIC).unwrap();
        ca.init(&mut rng);
        let row = ca.cells().row(0);
        let middle = row[100..300].iter().filter(|&&c| c == 1).count();
        let edges = row[..100].iter().chain(&row[300..]).filter(|&&c| c == 1).count();
        assert!(middle > edges);
    }

    #[test]
    fn seed_runs_fill_whole_row() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut row = [9u8; 37];
        seed_runs(&mut row, &mut rng);
        assert!(row.iter().all(|&c| c <= 1));
    }

    #[test]
    fn render_shows_only_computed_rows() {
        let mut rng = StdRng::seed_from_u64(6);
        let mapper = PanelMapper::identity(PanelGeometry::new(8, 4, 1, 1)).unwrap();
        let mut fb = FrameBuffer::new(8, 4);
        let mut ca = Elementary::new(8, 4, ElementaryRule(30))
            .unwrap()
            .with_seed(SeedPattern::Single);
        ca.init(&mut rng);
        {
            let mut canvas = Canvas::new(&mut fb, &mapper);
            ca.render(&mut canvas);
            canvas.present();
        }
        assert_eq!(fb.lit_pixels(), 1);
        assert_eq!(ca.name(), "Rule 30");
    }
}
