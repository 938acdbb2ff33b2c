//! End-to-end checks: config to mapper to automata to frame buffer.

use std::collections::HashSet;
use std::time::Duration;

use mosaic_automata::{pack_rgb565, AutomatonKind, Canvas, Display, FrameBuffer, Rgb};
use mosaic_panel::{PanelConfig, PanelGeometry, PanelMapper, PanelOffset, PhysicalLayout, Rotation};
use mosaic_show::{FrameLoop, LoopOptions, NoOverlay, Scheduler, ShowConfig, TestPattern};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Paint each logical pixel a unique color and check every physical pixel
/// received exactly one of them.
fn assert_bijective(mapper: &PanelMapper) {
    let (pw, ph) = mapper.physical_extent();
    let mut fb = FrameBuffer::new(pw, ph);
    {
        let mut canvas = Canvas::new(&mut fb, mapper);
        canvas.draw_cells(|x, y| {
            let id = (y * mapper.width() as usize + x) as u16;
            // Nonzero so untouched pixels stay distinguishable.
            Rgb::new((id >> 8) as u8 | 0x80, (id & 0xFF) as u8, 0)
        });
        canvas.present();
    }

    let mut seen = HashSet::new();
    for y in 0..mapper.height() {
        for x in 0..mapper.width() {
            let p = mapper.map(x, y);
            assert!(p.x < pw && p.y < ph, "({x}, {y}) maps outside to {p}");
            assert!(seen.insert(p), "({x}, {y}) collides at {p}");
        }
    }
    assert_eq!(seen.len(), mapper.geometry().pixel_count());
    assert_eq!(fb.lit_pixels(), seen.len());
}

#[test]
fn installation_table_is_a_bijection() {
    assert_bijective(&PanelMapper::quad_180(64, 64).unwrap());
    assert_bijective(&ShowConfig::default().mapper().unwrap());
}

#[test]
fn mixed_rotations_and_offsets_are_bijections() {
    let geometry = PanelGeometry::new(16, 16, 3, 1);
    let panels = [
        PanelConfig::new(0, 2, Rotation::Deg90),
        PanelConfig::new(1, 0, Rotation::Deg270),
        PanelConfig::new(2, 1, Rotation::Deg180),
    ];
    assert_bijective(&PanelMapper::new(geometry, &panels, PhysicalLayout::Chain).unwrap());

    // L-shaped chain: two panels across, one below the first.
    let layout = PhysicalLayout::OffsetTable {
        offsets: vec![
            PanelOffset { physical_position: 0, x: 0, y: 0 },
            PanelOffset { physical_position: 1, x: 16, y: 0 },
            PanelOffset { physical_position: 2, x: 0, y: 16 },
        ],
    };
    let mapper = PanelMapper::new(geometry, &panels, layout).unwrap();
    assert_eq!(mapper.physical_extent(), (32, 32));
    assert_bijective(&mapper);
}

#[test]
fn calibration_colors_land_on_the_right_physical_panel() {
    let mapper = PanelMapper::quad_180(8, 8).unwrap();
    let mut fb = FrameBuffer::new(16, 16);
    {
        let mut canvas = Canvas::new(&mut fb, &mapper);
        TestPattern::PanelIdentification.draw(0, 1, &mut canvas);
        canvas.present();
    }
    // Chain positions 0..3 hold logical panels 2, 0, 1, 3.
    assert_eq!(fb.pixel(0, 0), Some(pack_rgb565(0, 0, 255)));
    assert_eq!(fb.pixel(8, 0), Some(pack_rgb565(255, 0, 0)));
    assert_eq!(fb.pixel(0, 8), Some(pack_rgb565(0, 255, 0)));
    assert_eq!(fb.pixel(8, 8), Some(pack_rgb565(255, 255, 0)));
}

fn run_seeded(seed: u64, frames: u64) -> (Vec<u16>, String) {
    let config = ShowConfig {
        geometry: PanelGeometry::new(16, 16, 2, 2),
        seed: Some(seed),
        run_secs: 3600,
        max_frames: Some(frames),
        ..ShowConfig::default()
    };
    let mapper = config.mapper().unwrap();
    let mut fb = FrameBuffer::new(mapper.width(), mapper.height());
    let mut scheduler = Scheduler::from_config(&config).unwrap();
    let mut options = LoopOptions::from_config(&config);
    options.frame_interval = Duration::ZERO;
    let mut frame_loop = FrameLoop::new(options, NoOverlay);
    let mut rng = config.rng();

    tokio_test::block_on(frame_loop.run(&mut scheduler, &mut fb, &mapper, &mut rng));

    assert_eq!(frame_loop.stats().frames, frames);
    assert_eq!(fb.presents(), frames - 1);
    (fb.front().to_vec(), scheduler.current().unwrap().name())
}

#[test]
fn seeded_shows_are_reproducible() {
    let (a, name_a) = run_seeded(77, 25);
    let (b, name_b) = run_seeded(77, 25);
    assert_eq!(name_a, name_b);
    assert_eq!(a, b);
}

#[test]
fn every_kind_runs_through_the_frame_loop() {
    let mapper = PanelMapper::quad_180(16, 16).unwrap();
    for kind in AutomatonKind::ALL {
        let mut rng = StdRng::seed_from_u64(kind as u64);
        let mut fb = FrameBuffer::new(32, 32);
        let mut scheduler = Scheduler::new(32, 32, &[kind], Duration::from_secs(3600)).unwrap();
        let options = LoopOptions {
            frame_interval: Duration::ZERO,
            title_frames: 0,
            max_frames: Some(40),
            stats_every: 0,
        };
        let mut frame_loop = FrameLoop::new(options, NoOverlay);
        tokio_test::block_on(frame_loop.run(&mut scheduler, &mut fb, &mapper, &mut rng));

        let current = scheduler.current().unwrap();
        assert_eq!(current.kind(), kind);
        assert_eq!(current.frames(), 39);
        assert!(current.cells_in_domain(), "{kind}");
        assert_eq!(fb.presents(), 39);
        assert_eq!(fb.width(), 32);
    }
}
