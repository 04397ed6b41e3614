use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use minestake_core::*;
use std::hint::black_box;

fn board_gen(c: &mut Criterion) {
    let mut group = c.benchmark_group("board_gen");
    for strategy in [PlacementStrategy::Rejection, PlacementStrategy::PartialShuffle] {
        for mines in [1, 5, 12, 24] {
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), mines),
                &mines,
                |b, &mines| {
                    let mut seed = 0u64;
                    b.iter(|| {
                        seed = seed.wrapping_add(1);
                        black_box(RandomLayoutGenerator::new(seed, strategy).generate(mines))
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, board_gen);
criterion_main!(benches);
