//! Benchmarks for panel mapping
//!
//! Measures performance of:
//! - Single pixel mapping for each rotation
//! - Mapping a full canvas (one frame's worth of pixel writes)
//! - Toroidal neighbor computation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mosaic_panel::{PanelConfig, PanelGeometry, PanelMapper, PhysicalLayout, Rotation, Torus};

/// Benchmark one pixel through each rotation
fn bench_map_pixel(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_pixel");
    let geometry = PanelGeometry::default();

    for rotation in Rotation::ALL {
        let panels: Vec<_> = (0..4u8).map(|p| PanelConfig::new(p, 3 - p, rotation)).collect();
        let mapper = PanelMapper::new(geometry, &panels, PhysicalLayout::Chain).unwrap();
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::from_parameter(rotation.degrees()),
            &mapper,
            |b, m| b.iter(|| m.map(black_box(70), black_box(100))),
        );
    }
    group.finish();
}

/// Benchmark mapping every pixel of the canvas
fn bench_map_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_frame");

    for &size in &[32u16, 64] {
        let mapper = PanelMapper::quad_180(size, size).unwrap();
        let pixels = mapper.geometry().pixel_count() as u64;
        group.throughput(Throughput::Elements(pixels));
        group.bench_with_input(BenchmarkId::new("quad_180", size), &mapper, |b, m| {
            b.iter(|| {
                let mut acc = 0u32;
                for y in 0..m.height() {
                    for x in 0..m.width() {
                        let p = m.map(x, y);
                        acc = acc.wrapping_add(p.x as u32 ^ p.y as u32);
                    }
                }
                black_box(acc)
            })
        });
    }
    group.finish();
}

/// Benchmark toroidal neighbor lookups
fn bench_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("torus_neighbors");
    let torus = Torus::new(128, 128);

    group.bench_function("neighbors8_corner", |b| {
        b.iter(|| torus.neighbors8(black_box(0), black_box(0)))
    });
    for radius in 1..=3 {
        group.bench_with_input(BenchmarkId::new("moore", radius), &radius, |b, &r| {
            b.iter(|| torus.count_matching(black_box(64), black_box(64), r, |i| i % 3 == 0))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_map_pixel, bench_map_frame, bench_neighbors);
criterion_main!(benches);
