#[macro_use]
extern crate bencher;
extern crate laptop_advisor;
extern crate rand;
extern crate rand_pcg;

use bencher::Bencher;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use laptop_advisor::knn::{CosineIndex, NeighborSearch};

benchmark_group!(benches, bench_top5_of_2k, bench_top50_of_2k, bench_top5_of_20k);
benchmark_main!(benches);

const DIMENSIONALITY: usize = 120;

fn random_matrix(rng: &mut Pcg64, rows: usize) -> Vec<Vec<f64>> {
    (0..rows)
        .map(|_| {
            (0..DIMENSIONALITY)
                .map(|_| rng.gen_range(-3.0..3.0))
                .collect()
        })
        .collect()
}

fn bench_query(bench: &mut Bencher, rows: usize, k: usize) {
    let mut rng = Pcg64::seed_from_u64(42);
    let index = CosineIndex::build(random_matrix(&mut rng, rows)).unwrap();
    let query: Vec<f64> = (0..DIMENSIONALITY)
        .map(|_| rng.gen_range(-3.0..3.0))
        .collect();

    bench.iter(|| {
        bencher::black_box(index.find_neighbors(&query, k).unwrap());
    });
}

fn bench_top5_of_2k(bench: &mut Bencher) {
    bench_query(bench, 2_000, 5);
}

fn bench_top50_of_2k(bench: &mut Bencher) {
    bench_query(bench, 2_000, 50);
}

fn bench_top5_of_20k(bench: &mut Bencher) {
    bench_query(bench, 20_000, 5);
}
