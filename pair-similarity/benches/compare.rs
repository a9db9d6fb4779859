use std::sync::Arc;
use std::time::Duration;

use rand::{thread_rng, Rng};

use criterion::{
    criterion_group, criterion_main, measurement::WallTime, BenchmarkGroup, Criterion, SamplingMode,
};

use pair_similarity::{Algorithm, Similarity, SimilarityOptions};

const SAMPLE_SIZE: usize = 10;
const WARM_UP_TIME: Duration = Duration::from_secs(3);
const MEASURE_TIME: Duration = Duration::from_secs(5);

const TEXT_LENGTHS: [usize; 3] = [100, 1000, 10000];
const SET_SIZES: [usize; 3] = [10, 100, 1000];
const ALGORITHMS: [Algorithm; 3] = [Algorithm::Jaccard, Algorithm::MinHash, Algorithm::Lsh];

fn criterion_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("strings");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP_TIME);
    group.measurement_time(MEASURE_TIME);
    group.sampling_mode(SamplingMode::Flat);

    let mut rng = thread_rng();
    let mut pairs = Vec::with_capacity(TEXT_LENGTHS.len());
    for &len in &TEXT_LENGTHS {
        let a: String = (0..len).map(|_| rng.gen_range('a'..='h')).collect();
        // Mutates one tenth of the characters.
        let b: String = a
            .chars()
            .map(|c| if rng.gen_ratio(1, 10) { 'z' } else { c })
            .collect();
        pairs.push((a, b));
    }

    add_string_benches(&mut group, &pairs);
}

fn criterion_sets(c: &mut Criterion) {
    let mut group = c.benchmark_group("sets");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP_TIME);
    group.measurement_time(MEASURE_TIME);
    group.sampling_mode(SamplingMode::Flat);

    let mut rng = thread_rng();
    let mut pairs = Vec::with_capacity(SET_SIZES.len());
    for &size in &SET_SIZES {
        let bound = size as i64 * 2;
        let a: Vec<i64> = (0..size).map(|_| rng.gen_range(0..bound)).collect();
        let b: Vec<i64> = (0..size).map(|_| rng.gen_range(0..bound)).collect();
        pairs.push((a, b));
    }

    add_set_benches(&mut group, &pairs);
}

fn add_string_benches(group: &mut BenchmarkGroup<WallTime>, pairs: &[(String, String)]) {
    let pool = Arc::new(rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap());
    for algorithm in ALGORITHMS {
        let options = SimilarityOptions::new().with_shingle_length(3);
        let similarity = Similarity::new(algorithm, options)
            .unwrap()
            .with_pool(pool.clone());
        for (a, b) in pairs {
            group.bench_function(format!("{algorithm}/{}", a.len()), |bench| {
                bench.iter(|| {
                    if similarity.of_strings(a, b).unwrap() > 1. {
                        panic!();
                    }
                });
            });
        }
    }
}

fn add_set_benches(group: &mut BenchmarkGroup<WallTime>, pairs: &[(Vec<i64>, Vec<i64>)]) {
    let pool = Arc::new(rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap());
    for algorithm in ALGORITHMS {
        let options = SimilarityOptions::new().with_seed(42);
        let similarity = Similarity::new(algorithm, options)
            .unwrap()
            .with_pool(pool.clone());
        for (a, b) in pairs {
            group.bench_function(format!("{algorithm}/{}", a.len()), |bench| {
                bench.iter(|| {
                    if similarity.of_sets(a, b).unwrap() > 1. {
                        panic!();
                    }
                });
            });
        }
    }
}

criterion_group!(benches, criterion_strings, criterion_sets);
criterion_main!(benches);
