//! Raw draw throughput per algorithm, plus the façade's range mapping.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use plugrand::{Algorithm, PluggablePrng, SeedSource};

const BENCH_SEED: &str = "BenchmarkSeed2024";

const CONFIGS: [(&str, Algorithm, SeedSource); 8] = [
    ("alea", Algorithm::Alea, SeedSource::AleaMash),
    ("mulberry32", Algorithm::Mulberry32, SeedSource::Xmur3),
    ("sfc32", Algorithm::Sfc32, SeedSource::Xmur3),
    ("pcg32", Algorithm::Pcg32, SeedSource::Pcg64Mix),
    ("pcg32_limbs", Algorithm::Pcg32Limbs, SeedSource::Pcg64Mix),
    ("pcg32_wide", Algorithm::Pcg32Wide, SeedSource::Pcg64Mix),
    ("ironwellons32", Algorithm::IronWellons32, SeedSource::Xmur3),
    ("wellons_triple32", Algorithm::WellonsTriple32, SeedSource::Xmur3),
];

/// One raw 32-bit draw per iteration, for every algorithm. The three
/// Pcg32 strategies produce identical output, so this is where their
/// cost difference shows.
fn bench_raw_draws(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_u32");
    group.throughput(Throughput::Bytes(4));
    for (name, algorithm, source) in CONFIGS {
        let mut prng = PluggablePrng::with_seed_source(algorithm, BENCH_SEED, source).unwrap();
        group.bench_function(name, |b| b.iter(|| black_box(prng.random_u32())));
    }
    group.finish();
}

/// The bounded-integer and float paths on one fast backend, to expose
/// the mapping overhead on top of the raw draw.
fn bench_mapping(c: &mut Criterion) {
    let mut prng =
        PluggablePrng::with_seed_source(Algorithm::Mulberry32, BENCH_SEED, SeedSource::Xmur3)
            .unwrap();

    let mut group = c.benchmark_group("mapping");
    group.bench_function("integer_narrow", |b| {
        b.iter(|| black_box(prng.random_integer(black_box((1, 6))).unwrap()));
    });
    group.bench_function("integer_wide", |b| {
        b.iter(|| black_box(prng.random_integer(black_box((0, 1_i64 << 40))).unwrap()));
    });
    group.bench_function("float64", |b| {
        b.iter(|| black_box(prng.random_float64(())));
    });
    group.bench_function("bytes_64", |b| {
        b.iter(|| black_box(prng.random_bytes(64)));
    });
    group.finish();
}

/// Seeding cost per derivation, dominated by the per-character folds.
fn bench_seeding(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    for (name, algorithm, source) in [
        ("mulberry32_xmur3", Algorithm::Mulberry32, SeedSource::Xmur3),
        ("pcg32_pcg64mix", Algorithm::Pcg32, SeedSource::Pcg64Mix),
        ("alea_mash", Algorithm::Alea, SeedSource::AleaMash),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                PluggablePrng::with_seed_source(
                    black_box(algorithm),
                    black_box(BENCH_SEED),
                    black_box(source),
                )
                .unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_raw_draws, bench_mapping, bench_seeding);
criterion_main!(benches);
