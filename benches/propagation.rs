use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use minescout::{board::Board, engine::Engine};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Plays one deterministic game to completion and returns the number of
/// observations ingested.
fn play_game(height: u32, width: u32, mines: u32, seed: u64) -> usize {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let board = Board::random(height, width, mines, &mut rng).unwrap();
    let mut engine = Engine::with_seed(height, width, seed);
    let mut observations = 0;

    loop {
        let cell = match engine.make_safe_move().or_else(|| engine.make_random_move()) {
            Some(cell) => cell,
            None => break,
        };
        if board.is_mine(cell) {
            break;
        }
        engine
            .add_observation(cell, board.nearby_mines(cell))
            .unwrap();
        observations += 1;
    }
    observations
}

fn full_game_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Full Games");

    for &(height, width, mines) in [(8u32, 8u32, 8u32), (16, 16, 40)].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{} mines={}", height, width, mines)),
            &(height, width, mines),
            |b, &(height, width, mines)| {
                b.iter(|| {
                    let observations =
                        play_game(black_box(height), black_box(width), black_box(mines), 42);
                    black_box(observations);
                });
            },
        );
    }
    group.finish();
}

fn single_observation_benchmark(c: &mut Criterion) {
    c.bench_function("zero-count observation on 16x16", |b| {
        b.iter(|| {
            let mut engine = Engine::with_seed(16, 16, 42);
            engine
                .add_observation(black_box(minescout::engine::cell::Cell::new(8, 8)), 0)
                .unwrap();
            assert_eq!(engine.safe_cells().len(), 9);
        });
    });
}

criterion_group!(benches, full_game_benchmark, single_observation_benchmark);
criterion_main!(benches);
