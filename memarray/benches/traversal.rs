use criterion::{black_box, criterion_group, criterion_main, Criterion};
use memarray::{AccessPattern, FileSink, FileSource};
use rand::{rngs::StdRng, Rng, SeedableRng};

const SAMPLES: usize = 1 << 20;

fn bench_traversal(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench.bin");

    let mut sink = FileSink::<u64>::open(&path, SAMPLES).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    for slot in sink.iter_mut() {
        *slot = rng.gen();
    }
    sink.close().unwrap();

    c.bench_function("sequential_scan", |b| {
        let source = FileSource::<u64>::open(&path, AccessPattern::Sequential).unwrap();
        b.iter(|| {
            let mut sum = 0u64;
            for value in &source {
                sum = sum.wrapping_add(*value);
            }
            black_box(sum)
        })
    });

    c.bench_function("random_lookup", |b| {
        let source = FileSource::<u64>::open(&path, AccessPattern::Random).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| {
            let index = rng.gen_range(0..SAMPLES);
            black_box(source[index])
        })
    });
}

criterion_group!(benches, bench_traversal);
criterion_main!(benches);
