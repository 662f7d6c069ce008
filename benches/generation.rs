use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use delvegrid::config::{DungeonConfig, PlacementMode};
use delvegrid::world::generation::generate_layout;
use delvegrid::{DungeonGenerator, InstanceArena};

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for size in [40, 80, 160] {
        let mut config = DungeonConfig::default();
        config.layout.width = size;
        config.layout.height = size;

        group.bench_with_input(BenchmarkId::from_parameter(size), &config, |b, config| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| generate_layout(&mut rng, black_box(&config.layout)))
        });
    }
    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for mode in [PlacementMode::Enumerate, PlacementMode::RandomRetry] {
        let mut config = DungeonConfig {
            seed: Some(1),
            ..DungeonConfig::default()
        };
        config.placement.mode = mode;

        group.bench_function(format!("{:?}", mode), |b| {
            let mut generator = DungeonGenerator::new(config.clone(), InstanceArena::new())
                .expect("bench config is valid");
            b.iter(|| generator.generate())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout, bench_generate);
criterion_main!(benches);
