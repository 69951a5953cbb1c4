use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fixed_tables::config::{BiquadConfig, FftVariant, FirConfig};
use fixed_tables::fft::TwiddleTable;
use fixed_tables::filter::{BiquadFilter, FirFilter, S16, S32};

fn lowpass_taps(count: usize) -> Vec<f64> {
    let center = (count - 1) as f64 / 2.0;
    (0..count)
        .map(|i| {
            let x = (i as f64 - center) * 0.25;
            if x == 0.0 { 1.0 } else { (std::f64::consts::PI * x).sin() / (std::f64::consts::PI * x) }
        })
        .collect()
}

fn bench_twiddle_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("twiddle_table");
    for max_log2_n in [8, 10, 12] {
        for variant in [FftVariant::Dit, FftVariant::Dif] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", variant), max_log2_n),
                &max_log2_n,
                |b, &max_log2_n| b.iter(|| TwiddleTable::build(black_box(max_log2_n), variant)),
            );
        }
    }
    group.finish();
}

fn bench_fir_derivation(c: &mut Criterion) {
    let taps = lowpass_taps(256);
    let config = FirConfig::default();

    c.bench_function("fir s32 256 taps", |b| {
        b.iter(|| FirFilter::<S32>::derive(black_box(&taps), &config))
    });
    c.bench_function("fir s16 256 taps", |b| {
        b.iter(|| FirFilter::<S16>::derive(black_box(&taps), &config))
    });
}

fn bench_biquad_derivation(c: &mut Criterion) {
    let sections = vec![[0.2, 0.4, 0.2, 0.9, -0.5]; 64];
    let config = BiquadConfig::default();

    c.bench_function("biquad 64 sections", |b| {
        b.iter(|| BiquadFilter::derive(black_box(&sections), &config))
    });
}

criterion_group!(benches, bench_twiddle_tables, bench_fir_derivation, bench_biquad_derivation);
criterion_main!(benches);
