use criterion::{criterion_group, criterion_main, Criterion};
use histones::prelude::*;
use histones::test_utilities::{random_archive, random_sequence_table};

const CELL_TYPES: usize = 10;
const GENES: usize = 2_000;
const BINS: usize = 100;
const SEQUENCE_LEN: usize = 1_000;

fn bench_load(c: &mut Criterion) {
    // create the benchmark group
    let mut group = c.benchmark_group("load");

    // create the test data
    let archive = random_archive(CELL_TYPES, GENES, BINS);
    let table = random_sequence_table(GENES, SEQUENCE_LEN);
    let cache_dir = tempfile::tempdir().unwrap();
    let write = CacheOptions::new("train").write_to(cache_dir.path());
    CachedDataset::new(archive.path(), &write).unwrap();

    // configure the sample size for the group
    group.sample_size(10);

    group.bench_function("archive", |b| {
        b.iter(|| {
            let dataset = CachedDataset::new(archive.path(), &CacheOptions::default()).unwrap();
            dataset.len()
        });
    });

    group.bench_function("cache", |b| {
        let read = CacheOptions::new("train").read_from(cache_dir.path());
        b.iter(|| {
            let dataset = CachedDataset::new(archive.path(), &read).unwrap();
            dataset.len()
        });
    });

    group.bench_function("sequence_get", |b| {
        let dataset = SequenceDataset::new(archive.path(), table.path()).unwrap();
        b.iter(|| {
            dataset
                .iter()
                .map(|record| record.unwrap().features.len())
                .sum::<usize>()
        });
    });
}

criterion_group!(benches, bench_load);
criterion_main!(benches);
