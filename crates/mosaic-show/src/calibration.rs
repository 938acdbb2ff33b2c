//! Calibration test patterns.
//!
//! Static and animated patterns drawn through the panel mapper, used to
//! check panel order, rotation and seams on a fresh installation.

use std::time::Duration;

use tracing::info;

use mosaic_automata::{Canvas, Display, Rgb};
use mosaic_panel::PanelMapper;

/// Colors given to logical panels 0, 1, 2, 3 (repeating).
pub const PANEL_COLORS: [Rgb; 4] = [Rgb::RED, Rgb::GREEN, Rgb::BLUE, Rgb::YELLOW];

/// Full-screen colors of the color cycle.
pub const CYCLE_COLORS: [Rgb; 7] = [
    Rgb::RED,
    Rgb::GREEN,
    Rgb::BLUE,
    Rgb::YELLOW,
    Rgb::CYAN,
    Rgb::MAGENTA,
    Rgb::WHITE,
];

const GRID_SPACING: u16 = 8;
const GRID_COLOR: Rgb = Rgb::gray(64);
const RIPPLE_PERIOD: u32 = 16;

/// One calibration pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestPattern {
    /// Each logical panel filled with its own color
    PanelIdentification,
    /// White panel outlines with one dot per panel number
    PanelBorders,
    /// Gray 8-pixel grid with green panel seams
    Grid,
    /// Diagonal plus center cross spanning all panels
    CrossLines,
    /// Full-screen solid colors
    ColorCycle,
    /// Animated rings colored by angle
    Ripple,
}

impl TestPattern {
    /// Order the calibration sequence runs in.
    pub const SEQUENCE: [Self; 6] = [
        Self::PanelIdentification,
        Self::PanelBorders,
        Self::Grid,
        Self::CrossLines,
        Self::ColorCycle,
        Self::Ripple,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::PanelIdentification => "panel identification",
            Self::PanelBorders => "panel borders",
            Self::Grid => "grid",
            Self::CrossLines => "cross lines",
            Self::ColorCycle => "color cycle",
            Self::Ripple => "ripple",
        }
    }

    /// Frames this pattern occupies when static patterns are held for `hold`.
    pub fn frames(&self, hold: u32) -> u32 {
        let hold = hold.max(1);
        match self {
            Self::ColorCycle => CYCLE_COLORS.len() as u32 * Self::cycle_step(hold),
            Self::Ripple => hold.max(RIPPLE_PERIOD),
            _ => hold,
        }
    }

    fn cycle_step(hold: u32) -> u32 {
        (hold / 4).max(1)
    }

    /// Draw frame `frame` of this pattern (not presented).
    pub fn draw<D: Display + ?Sized>(&self, frame: u32, hold: u32, canvas: &mut Canvas<'_, D>) {
        let geometry = *canvas.mapper().geometry();
        let (pw, ph) = (geometry.panel_width, geometry.panel_height);
        let (w, h) = (canvas.width(), canvas.height());

        match self {
            Self::PanelIdentification => {
                let columns = geometry.columns as usize;
                canvas.draw_cells(|x, y| {
                    let panel = (y / ph as usize) * columns + x / pw as usize;
                    PANEL_COLORS[panel % PANEL_COLORS.len()]
                });
            }
            Self::PanelBorders => {
                canvas.fill(Rgb::BLACK);
                for panel in 0..geometry.panel_count() {
                    let ox = (panel % geometry.columns as usize) as u16 * pw;
                    let oy = (panel / geometry.columns as usize) as u16 * ph;
                    for i in 0..pw {
                        canvas.put(ox + i, oy, Rgb::WHITE);
                        canvas.put(ox + i, oy + ph - 1, Rgb::WHITE);
                    }
                    for i in 0..ph {
                        canvas.put(ox, oy + i, Rgb::WHITE);
                        canvas.put(ox + pw - 1, oy + i, Rgb::WHITE);
                    }
                    // panel + 1 dots along the middle row, left to right
                    let cy = (oy + ph / 2) as i32;
                    for dot in 0..=panel as i32 {
                        let cx = (ox + 3) as i32 + dot * 3;
                        for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                            if cx + dx < (ox + pw - 1) as i32 {
                                canvas.put_clipped(cx + dx, cy + dy, PANEL_COLORS[panel % PANEL_COLORS.len()]);
                            }
                        }
                    }
                }
            }
            Self::Grid => {
                canvas.draw_cells(|x, y| {
                    let (x, y) = (x as u16, y as u16);
                    if is_seam(x, pw, w) || is_seam(y, ph, h) {
                        Rgb::GREEN
                    } else if x % GRID_SPACING == 0 || y % GRID_SPACING == 0 {
                        GRID_COLOR
                    } else {
                        Rgb::BLACK
                    }
                });
            }
            Self::CrossLines => {
                canvas.fill(Rgb::BLACK);
                for x in 0..w {
                    let y = (x as u32 * h as u32 / w as u32) as u16;
                    canvas.put(x, y, Rgb::WHITE);
                }
                for x in 0..w {
                    canvas.put(x, h / 2, Rgb::RED);
                }
                for y in 0..h {
                    canvas.put(w / 2, y, Rgb::GREEN);
                }
            }
            Self::ColorCycle => {
                let index = (frame / Self::cycle_step(hold.max(1))) as usize % CYCLE_COLORS.len();
                canvas.fill(CYCLE_COLORS[index]);
            }
            Self::Ripple => {
                let (cx, cy) = (w as f32 / 2.0, h as f32 / 2.0);
                canvas.draw_cells(|x, y| {
                    let dx = x as f32 - cx;
                    let dy = y as f32 - cy;
                    let distance = (dx * dx + dy * dy).sqrt() as u32;
                    if (distance + frame) % RIPPLE_PERIOD < RIPPLE_PERIOD / 2 {
                        let angle = dy.atan2(dx) / std::f32::consts::TAU;
                        Rgb::hue(angle.rem_euclid(1.0))
                    } else {
                        Rgb::BLACK
                    }
                });
            }
        }
    }
}

/// Whether coordinate `c` lies on either side of an interior panel seam.
fn is_seam(c: u16, panel_size: u16, extent: u16) -> bool {
    let at_start = c % panel_size == 0 && c > 0;
    let at_end = (c + 1) % panel_size == 0 && c + 1 < extent;
    at_start || at_end
}

/// Play the full calibration sequence, presenting one frame per interval.
pub async fn run_calibration<D: Display + ?Sized>(
    display: &mut D,
    mapper: &PanelMapper,
    hold: u32,
    frame_interval: Duration,
) -> u64 {
    let mut presented = 0;
    for pattern in TestPattern::SEQUENCE {
        let frames = pattern.frames(hold);
        info!(pattern = pattern.label(), frames, "calibration pattern");
        for frame in 0..frames {
            {
                let mut canvas = Canvas::new(display, mapper);
                pattern.draw(frame, hold, &mut canvas);
                canvas.present();
            }
            presented += 1;
            tokio::time::sleep(frame_interval).await;
        }
    }
    info!(frames = presented, "calibration finished");
    presented
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_automata::{FrameBuffer, PackedColor};
    use mosaic_panel::PanelGeometry;

    fn packed(c: Rgb) -> PackedColor {
        mosaic_automata::pack_rgb565(c.r, c.g, c.b)
    }

    fn draw(pattern: TestPattern, frame: u32, mapper: &PanelMapper) -> FrameBuffer {
        let mut fb = FrameBuffer::new(mapper.width(), mapper.height());
        let mut canvas = Canvas::new(&mut fb, mapper);
        pattern.draw(frame, 8, &mut canvas);
        canvas.present();
        fb
    }

    /// Color at a logical pixel after mapping.
    fn logical(fb: &FrameBuffer, mapper: &PanelMapper, x: u16, y: u16) -> PackedColor {
        let p = mapper.map(x, y);
        fb.pixel(p.x, p.y).unwrap()
    }

    #[test]
    fn panels_identify_by_logical_position() {
        let mapper = PanelMapper::quad_180(8, 8).unwrap();
        let fb = draw(TestPattern::PanelIdentification, 0, &mapper);
        assert_eq!(logical(&fb, &mapper, 0, 0), packed(Rgb::RED));
        assert_eq!(logical(&fb, &mapper, 15, 0), packed(Rgb::GREEN));
        assert_eq!(logical(&fb, &mapper, 0, 15), packed(Rgb::BLUE));
        assert_eq!(logical(&fb, &mapper, 8, 8), packed(Rgb::YELLOW));
        // Logical panel 0 lives at chain position 1, the top-right of the chain.
        assert_eq!(fb.pixel(8, 0), Some(packed(Rgb::RED)));
    }

    #[test]
    fn borders_outline_every_panel() {
        let mapper = PanelMapper::identity(PanelGeometry::new(16, 16, 2, 1)).unwrap();
        let fb = draw(TestPattern::PanelBorders, 0, &mapper);
        for i in 0..16 {
            assert_eq!(fb.pixel(i, 0), Some(packed(Rgb::WHITE)));
            assert_eq!(fb.pixel(16 + i, 15), Some(packed(Rgb::WHITE)));
            assert_eq!(fb.pixel(0, i), Some(packed(Rgb::WHITE)));
            assert_eq!(fb.pixel(31, i), Some(packed(Rgb::WHITE)));
        }
        // One dot on panel 0, two on panel 1.
        assert_eq!(fb.pixel(3, 8), Some(packed(Rgb::RED)));
        assert_eq!(fb.pixel(6, 8), Some(0));
        assert_eq!(fb.pixel(16 + 6, 8), Some(packed(Rgb::GREEN)));
        assert_eq!(fb.pixel(8, 4), Some(0));
    }

    #[test]
    fn grid_marks_seams_in_green() {
        let mapper = PanelMapper::identity(PanelGeometry::new(16, 16, 2, 2)).unwrap();
        let fb = draw(TestPattern::Grid, 0, &mapper);
        assert_eq!(fb.pixel(15, 3), Some(packed(Rgb::GREEN)));
        assert_eq!(fb.pixel(16, 3), Some(packed(Rgb::GREEN)));
        assert_eq!(fb.pixel(3, 15), Some(packed(Rgb::GREEN)));
        assert_eq!(fb.pixel(8, 3), Some(packed(GRID_COLOR)));
        assert_eq!(fb.pixel(0, 3), Some(packed(GRID_COLOR)));
        assert_eq!(fb.pixel(3, 3), Some(0));
        // The outer edge is not a seam.
        assert_eq!(fb.pixel(31, 3), Some(0));
    }

    #[test]
    fn cross_lines_span_the_canvas() {
        let mapper = PanelMapper::identity(PanelGeometry::new(16, 16, 2, 2)).unwrap();
        let fb = draw(TestPattern::CrossLines, 0, &mapper);
        assert_eq!(fb.pixel(5, 5), Some(packed(Rgb::WHITE)));
        assert_eq!(fb.pixel(3, 16), Some(packed(Rgb::RED)));
        assert_eq!(fb.pixel(16, 3), Some(packed(Rgb::GREEN)));
        assert_eq!(fb.pixel(3, 20), Some(0));
    }

    #[test]
    fn color_cycle_advances_by_step() {
        let mapper = PanelMapper::identity(PanelGeometry::new(8, 8, 1, 1)).unwrap();
        // hold 8 gives two frames per color
        assert_eq!(TestPattern::ColorCycle.frames(8), 14);
        assert_eq!(draw(TestPattern::ColorCycle, 0, &mapper).pixel(0, 0), Some(packed(Rgb::RED)));
        assert_eq!(draw(TestPattern::ColorCycle, 1, &mapper).pixel(0, 0), Some(packed(Rgb::RED)));
        assert_eq!(draw(TestPattern::ColorCycle, 2, &mapper).pixel(7, 7), Some(packed(Rgb::GREEN)));
        assert_eq!(draw(TestPattern::ColorCycle, 13, &mapper).pixel(3, 3), Some(packed(Rgb::WHITE)));
    }

    #[test]
    fn ripple_moves_between_frames() {
        let mapper = PanelMapper::identity(PanelGeometry::new(16, 16, 2, 2)).unwrap();
        let a = draw(TestPattern::Ripple, 0, &mapper);
        let b = draw(TestPattern::Ripple, 8, &mapper);
        assert!(a.lit_pixels() > 0);
        // Half a period later every ring has flipped.
        for y in 0..32 {
            for x in 0..32 {
                let lit_a = a.pixel(x, y) != Some(0);
                let lit_b = b.pixel(x, y) != Some(0);
                if lit_a {
                    assert!(!lit_b, "({x}, {y}) lit in both frames");
                }
            }
        }
    }

    #[test]
    fn sequence_presents_every_frame() {
        let mapper = PanelMapper::quad_180(8, 8).unwrap();
        let mut fb = FrameBuffer::new(16, 16);
        let presented = tokio_test::block_on(run_calibration(&mut fb, &mapper, 4, Duration::ZERO));
        let expected: u32 = TestPattern::SEQUENCE.iter().map(|p| p.frames(4)).sum();
        assert_eq!(presented, expected as u64);
        assert_eq!(fb.presents(), expected as u64);
    }
}
