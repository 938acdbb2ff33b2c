//! Benchmarks for automaton generations
//!
//! Measures performance of:
//! - One generation of each 2-D automaton on the reference canvas
//! - Rendering a frame through the quad panel mapper
//! - Life-like rule evaluation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mosaic_automata::{Automaton, AutomatonKind, Canvas, FrameBuffer, LifeRule};
use mosaic_panel::PanelMapper;
use rand::rngs::StdRng;
use rand::SeedableRng;

const SIZE: usize = 128;

/// Benchmark one update of every 2-D kind
fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    group.throughput(Throughput::Elements((SIZE * SIZE) as u64));

    let kinds = [
        AutomatonKind::Life,
        AutomatonKind::Brain,
        AutomatonKind::Ant,
        AutomatonKind::Cyclic,
        AutomatonKind::Lava,
        AutomatonKind::OrderChaos,
    ];
    for kind in kinds {
        let mut rng = StdRng::seed_from_u64(42);
        let mut automaton = Automaton::create(kind, SIZE, SIZE, &mut rng).unwrap();
        automaton.init(&mut rng);
        group.bench_function(BenchmarkId::from_parameter(kind.label()), |b| {
            b.iter(|| automaton.update(black_box(&mut rng)))
        });
    }
    group.finish();
}

/// Benchmark rendering one frame through the panel mapper
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let mapper = PanelMapper::quad_180(64, 64).unwrap();
    let mut fb = FrameBuffer::new(128, 128);
    group.throughput(Throughput::Elements((SIZE * SIZE) as u64));

    for kind in [AutomatonKind::Life, AutomatonKind::Cyclic] {
        let mut rng = StdRng::seed_from_u64(7);
        let mut automaton = Automaton::create(kind, SIZE, SIZE, &mut rng).unwrap();
        automaton.init(&mut rng);
        group.bench_function(BenchmarkId::from_parameter(kind.label()), |b| {
            b.iter(|| {
                let mut canvas = Canvas::new(&mut fb, &mapper);
                automaton.render(&mut canvas);
                canvas.present();
            })
        });
    }
    group.finish();
}

/// Benchmark rule lookup over all neighbor counts
fn bench_life_rule(c: &mut Criterion) {
    let rule = LifeRule::parse("B3678/S34678");
    c.bench_function("life_rule_next", |b| {
        b.iter(|| {
            let mut born = 0u32;
            for n in 0..=8u8 {
                born += rule.next(black_box(false), n) as u32;
                born += rule.next(black_box(true), n) as u32;
            }
            black_box(born)
        })
    });
}

criterion_group!(benches, bench_update, bench_render, bench_life_rule);
criterion_main!(benches);
