//! Order and chaos: two elementary bands colliding in a Life field.
//!
//! The top band runs a mirror-symmetric elementary rule growing down from
//! row 0, the bottom band a chaotic rule growing up from the last row. Once
//! a band fills its rows it scrolls, keeping its newest row next to the
//! middle field. Each band's newest row feeds live cells into the facing
//! edge of the middle field, where a Life rule tracks which side every cell
//! descends from.
//!
//! The middle field wraps horizontally and is clipped at its top and bottom
//! edges, which belong to the bands.

use std::ops::Range;

use rand::Rng;

use crate::canvas::Canvas;
use crate::display::Display;
use crate::elementary::seed_runs;
use crate::grid::{CellGrid, DoubleBuffer};
use crate::rules::{ElementaryRule, LifeRule};
use crate::{Error, Result, Rgb};

/// Smallest canvas height with room for both bands and the field.
pub const MIN_HEIGHT: usize = 9;

const DEFAULT_FEED_CHANCE: f64 = 0.3;

/// Which band a middle cell descends from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Origin {
    #[default]
    None,
    Top,
    Bottom,
    Both,
}

impl Origin {
    const fn bits(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Top => 1,
            Self::Bottom => 2,
            Self::Both => 3,
        }
    }

    const fn from_bits(bits: u8) -> Self {
        match bits & 3 {
            0 => Self::None,
            1 => Self::Top,
            2 => Self::Bottom,
            _ => Self::Both,
        }
    }

    /// Union of two lineages.
    pub const fn merge(self, other: Self) -> Self {
        Self::from_bits(self.bits() | other.bits())
    }
}

/// A middle-field cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tagged {
    pub alive: bool,
    pub origin: Origin,
    /// Set when the live neighbors that produced this cell came from both bands.
    pub collision: bool,
}

impl Tagged {
    pub const fn seeded(origin: Origin) -> Self {
        Self { alive: true, origin, collision: false }
    }
}

/// An elementary band that grows to its height, then scrolls.
#[derive(Debug, Clone)]
struct Band {
    rule: ElementaryRule,
    rows: CellGrid<u8>,
    filled: usize,
}

impl Band {
    fn new(width: usize, height: usize, rule: ElementaryRule) -> Result<Self> {
        Ok(Self { rule, rows: CellGrid::new(width, height)?, filled: 0 })
    }

    fn seed<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.rows.clear();
        seed_runs(self.rows.row_mut(0), rng);
        self.filled = 1;
    }

    fn advance(&mut self) {
        let h = self.rows.height();
        let target = if self.filled < h {
            self.filled += 1;
            self.filled - 1
        } else {
            self.rows.scroll_up();
            h - 1
        };
        let w = self.rows.width();
        let (older, newer) = self.rows.cells_mut().split_at_mut(target * w);
        self.rule.evolve(&older[(target - 1) * w..], &mut newer[..w]);
    }

    fn newest(&self) -> &[u8] {
        self.rows.row(self.filled - 1)
    }

    /// Cell at storage row `r`, or 0 for rows not yet grown.
    fn get(&self, x: usize, r: usize) -> u8 {
        if r < self.filled {
            self.rows.get(x, r)
        } else {
            0
        }
    }
}

/// Composite two-band automaton.
#[derive(Debug, Clone)]
pub struct OrderChaos {
    top: Band,
    /// Storage row 0 is the last canvas row.
    bottom: Band,
    middle: DoubleBuffer<Tagged>,
    feed_chance: f64,
}

impl OrderChaos {
    pub fn new(width: usize, height: usize, order: ElementaryRule, chaos: ElementaryRule) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyCanvas);
        }
        if height < MIN_HEIGHT {
            return Err(Error::CanvasTooSmall { width, height, min_height: MIN_HEIGHT });
        }
        let band = (height / 4).max(2);
        Ok(Self {
            top: Band::new(width, band, order)?,
            bottom: Band::new(width, band, chaos)?,
            middle: DoubleBuffer::new(width, height - 2 * band)?,
            feed_chance: DEFAULT_FEED_CHANCE,
        })
    }

    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Self> {
        let order = ElementaryRule::choose(&ElementaryRule::SYMMETRIC, rng);
        let chaos = ElementaryRule::choose(&ElementaryRule::CHAOTIC, rng);
        Self::new(width, height, order, chaos)
    }

    /// Probability that a live newest-row band cell seeds the field.
    pub fn with_feed_chance(mut self, chance: f64) -> Self {
        self.feed_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Canvas rows covered by the middle field.
    pub fn middle_rows(&self) -> Range<usize> {
        let start = self.top.rows.height();
        start..start + self.middle.height()
    }

    pub fn middle_cell(&self, x: usize, y: usize) -> Tagged {
        self.middle.current().get(x, y)
    }

    pub fn set_middle(&mut self, x: usize, y: usize, cell: Tagged) {
        self.middle.current_mut().set(x, y, cell);
    }

    pub fn clear_middle(&mut self) {
        self.middle.clear();
    }

    pub fn middle_population(&self) -> usize {
        self.middle.current().count(|c| c.alive)
    }

    /// Newest row of the top band.
    pub fn top_front(&self) -> &[u8] {
        self.top.newest()
    }

    /// Newest row of the bottom band.
    pub fn bottom_front(&self) -> &[u8] {
        self.bottom.newest()
    }

    pub fn init<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.top.seed(rng);
        self.bottom.seed(rng);
        self.middle.clear();
    }

    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.top.advance();
        self.bottom.advance();
        self.step_middle();
        self.feed(rng);
    }

    fn step_middle(&mut self) {
        let rule = LifeRule::CONWAY;
        let (cur, next) = self.middle.split();
        let (w, h) = (cur.width(), cur.height());
        for y in 0..h {
            for x in 0..w {
                let mut n = 0u8;
                let mut seen = Origin::None;
                // Lineages of neighbors descended from exactly one band.
                let mut pure = 0u8;
                for dy in -1isize..=1 {
                    let ny = y as isize + dy;
                    if ny < 0 || ny >= h as isize {
                        continue;
                    }
                    for dx in -1isize..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let c = cur.get_wrapped(x, ny as usize, dx, 0);
                        if c.alive {
                            n += 1;
                            seen = seen.merge(c.origin);
                            if matches!(c.origin, Origin::Top | Origin::Bottom) {
                                pure |= c.origin.bits();
                            }
                        }
                    }
                }

                let here = cur.get(x, y);
                let cell = if rule.next(here.alive, n) {
                    Tagged {
                        alive: true,
                        origin: if seen == Origin::None { here.origin } else { seen },
                        collision: pure == Origin::Both.bits(),
                    }
                } else {
                    Tagged::default()
                };
                next.set(x, y, cell);
            }
        }
        self.middle.swap();
    }

    fn feed<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let last = self.middle.height() - 1;
        let grid = self.middle.current_mut();
        for x in 0..grid.width() {
            if self.top.newest()[x] != 0 && rng.gen_bool(self.feed_chance) {
                grid.set(x, 0, Tagged::seeded(Origin::Top));
            }
            if self.bottom.newest()[x] != 0 && rng.gen_bool(self.feed_chance) {
                grid.set(x, last, Tagged::seeded(Origin::Bottom));
            }
        }
    }

    pub fn render<D: Display + ?Sized>(&self, canvas: &mut Canvas<'_, D>) {
        const ORDER: Rgb = Rgb::new(70, 140, 255);
        const CHAOS: Rgb = Rgb::new(255, 90, 40);
        const MIXED: Rgb = Rgb::new(200, 80, 255);

        let band = self.top.rows.height();
        let middle = self.middle.current();
        let height = 2 * band + middle.height();
        canvas.draw_region(middle.width(), height, |x, y| {
            if y < band {
                if self.top.get(x, y) != 0 { ORDER.scale(0.35) } else { Rgb::BLACK }
            } else if y >= band + middle.height() {
                if self.bottom.get(x, height - 1 - y) != 0 { CHAOS.scale(0.35) } else { Rgb::BLACK }
            } else {
                let c = middle.get(x, y - band);
                match (c.alive, c.collision, c.origin) {
                    (false, _, _) => Rgb::BLACK,
                    (true, true, _) => Rgb::WHITE,
                    (true, false, Origin::Top) => ORDER,
                    (true, false, Origin::Bottom) => CHAOS,
                    (true, false, Origin::Both) => MIXED,
                    (true, false, Origin::None) => Rgb::gray(128),
                }
            }
        });
    }

    pub fn name(&self) -> String {
        format!("Order & Chaos ({} / {})", self.top.rule.0, self.bottom.rule.0)
    }

    pub fn cells_in_domain(&self) -> bool {
        let band_ok = |b: &Band| b.rows.cells().iter().all(|&c| c <= 1) && (1..=b.rows.height()).contains(&b.filled);
        band_ok(&self.top)
            && band_ok(&self.bottom)
            && self
                .middle
                .current()
                .cells()
                .iter()
                .all(|c| c.alive || *c == Tagged::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FrameBuffer;
    use mosaic_panel::{PanelGeometry, PanelMapper};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quiet(width: usize, height: usize) -> OrderChaos {
        OrderChaos::new(width, height, ElementaryRule(90), ElementaryRule(30))
            .unwrap()
            .with_feed_chance(0.0)
    }

    #[test]
    fn origins_merge() {
        assert_eq!(Origin::Top.merge(Origin::Bottom), Origin::Both);
        assert_eq!(Origin::None.merge(Origin::Top), Origin::Top);
        assert_eq!(Origin::Both.merge(Origin::None), Origin::Both);
    }

    #[test]
    fn layout() {
        let oc = quiet(16, 9);
        assert_eq!(oc.middle_rows(), 2..7);
        assert!(matches!(
            OrderChaos::new(16, 8, ElementaryRule(90), ElementaryRule(30)),
            Err(Error::CanvasTooSmall { min_height: MIN_HEIGHT, .. })
        ));
    }

    #[test]
    fn bands_grow_then_scroll() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut oc = quiet(32, 16);
        oc.init(&mut rng);
        // Four rows per band: three growth steps fill it.
        let mut fronts = vec![oc.top_front().to_vec()];
        for _ in 0..6 {
            oc.update(&mut rng);
            fronts.push(oc.top_front().to_vec());
        }
        for pair in fronts.windows(2) {
            let mut expected = vec![0; 32];
            ElementaryRule(90).evolve(&pair[0], &mut expected);
            assert_eq!(pair[1], expected);
        }
        assert_eq!(oc.top.filled, 4);
        assert!(oc.cells_in_domain());
    }

    #[test]
    fn collision_is_marked() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut oc = quiet(16, 24);
        oc.init(&mut rng);
        oc.set_middle(2, 4, Tagged::seeded(Origin::Top));
        oc.set_middle(3, 4, Tagged::seeded(Origin::Top));
        oc.set_middle(4, 4, Tagged::seeded(Origin::Bottom));
        oc.update(&mut rng);

        let born = oc.middle_cell(3, 3);
        assert!(born.alive);
        assert_eq!(born.origin, Origin::Both);
        assert!(born.collision);

        let survivor = oc.middle_cell(3, 4);
        assert!(survivor.alive);
        assert!(survivor.collision);
    }

    #[test]
    fn mixed_lineage_without_fresh_contact_is_not_a_collision() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut oc = quiet(16, 24);
        oc.init(&mut rng);
        for x in 2..5 {
            oc.set_middle(x, 4, Tagged::seeded(Origin::Both));
        }
        oc.update(&mut rng);

        let born = oc.middle_cell(3, 3);
        assert!(born.alive);
        assert_eq!(born.origin, Origin::Both);
        assert!(!born.collision);

        // A pure band cell joining mixed ones is still no clash of bands.
        let mut oc = quiet(16, 24);
        oc.init(&mut rng);
        oc.set_middle(2, 4, Tagged::seeded(Origin::Both));
        oc.set_middle(3, 4, Tagged::seeded(Origin::Both));
        oc.set_middle(4, 4, Tagged::seeded(Origin::Top));
        oc.update(&mut rng);
        let born = oc.middle_cell(3, 3);
        assert!(born.alive);
        assert_eq!(born.origin, Origin::Both);
        assert!(!born.collision);
    }

    #[test]
    fn single_origin_is_inherited() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut oc = quiet(16, 24);
        oc.init(&mut rng);
        for x in 5..8 {
            oc.set_middle(x, 6, Tagged::seeded(Origin::Bottom));
        }
        oc.update(&mut rng);
        let c = oc.middle_cell(6, 5);
        assert!(c.alive);
        assert_eq!(c.origin, Origin::Bottom);
        assert!(!c.collision);
    }

    #[test]
    fn middle_is_clipped_vertically() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut oc = quiet(8, 12);
        oc.init(&mut rng);
        let last = oc.middle_rows().len() - 1;
        // A blinker lying on the top edge cannot reach through to the bottom edge.
        for x in 2..5 {
            oc.set_middle(x, 0, Tagged::seeded(Origin::Top));
        }
        oc.update(&mut rng);
        assert!(!oc.middle_cell(3, last).alive);
    }

    #[test]
    fn fronts_feed_the_field() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut oc = OrderChaos::new(32, 16, ElementaryRule(90), ElementaryRule(30))
            .unwrap()
            .with_feed_chance(1.0);
        oc.init(&mut rng);
        oc.update(&mut rng);
        let last = oc.middle_rows().len() - 1;
        for x in 0..32 {
            if oc.top_front()[x] != 0 {
                assert_eq!(oc.middle_cell(x, 0), Tagged::seeded(Origin::Top));
            }
            if oc.bottom_front()[x] != 0 {
                assert_eq!(oc.middle_cell(x, last), Tagged::seeded(Origin::Bottom));
            }
        }
    }

    #[test]
    fn render_does_not_touch_state() {
        let mut rng = StdRng::seed_from_u64(6);
        let mapper = PanelMapper::identity(PanelGeometry::new(16, 16, 1, 1)).unwrap();
        let mut fb = FrameBuffer::new(16, 16);
        let mut oc = OrderChaos::random(16, 16, &mut rng).unwrap();
        oc.init(&mut rng);
        for _ in 0..10 {
            oc.update(&mut rng);
        }
        let population = oc.middle_population();
        {
            let mut canvas = Canvas::new(&mut fb, &mapper);
            oc.render(&mut canvas);
            canvas.present();
        }
        assert_eq!(oc.middle_population(), population);
        assert!(oc.name().starts_with("Order & Chaos"));
    }
}
