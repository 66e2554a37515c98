#![allow(missing_docs)]
//! Benchmarks for the physics tick.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use cinder_core::block;
use cinder_core::{Level, Physics, WorldEvents};
use cinder_utils::Dimensions;
use cinder_utils::random::legacy_random::LegacyRandom;

const SEED: u64 = 12345;

/// Builds a level with stone below `surface` and grass on top of it.
fn create_level(dims: Dimensions, surface: usize) -> Level {
    let mut blocks = vec![block::AIR; dims.volume()];
    for y in 0..surface.min(dims.height) {
        let fill = if y + 1 == surface {
            block::GRASS
        } else {
            block::STONE
        };
        let layer = y * dims.one_y();
        blocks[layer..layer + dims.one_y()].fill(fill);
    }
    let mut level = Level::new();
    level.load(dims, blocks).expect("bench level");
    level
}

fn bench_random_ticker(c: &mut Criterion) {
    let events = WorldEvents::new();

    c.bench_function("tick_256x64x256", |b| {
        let level = create_level(Dimensions::new(256, 64, 256), 32);
        let mut physics = Physics::with_random(level, &events, true, LegacyRandom::from_seed(SEED));
        b.iter(|| {
            physics.tick();
            black_box(physics.tick_count());
        });
    });

    let mut group = c.benchmark_group("tick_by_size");
    for size in [64, 128, 256, 512] {
        group.bench_with_input(BenchmarkId::new("flat", size), &size, |b, &size| {
            let dims = Dimensions::new(size, 64, size);
            let level = create_level(dims, 32);
            let mut physics =
                Physics::with_random(level, &events, true, LegacyRandom::from_seed(SEED));
            b.iter(|| physics.tick());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_random_ticker);
criterion_main!(benches);
