//! Criterion benchmarks for rondo-core primitives
//!
//! Run with: cargo bench -p rondo-core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rondo_core::{AdEnvelope, Oscillator, StateVariableFilter, Waveform, saturate};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[1, 48, 256, 1024];

fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("Oscillator");
    for (name, waveform) in [
        ("Sine", Waveform::Sine),
        ("Saw", Waveform::Saw),
        ("Triangle", Waveform::Triangle),
    ] {
        for &block_size in BLOCK_SIZES {
            let mut osc = Oscillator::new(SAMPLE_RATE);
            osc.set_waveform(waveform);
            osc.set_frequency(65.4);
            group.bench_with_input(BenchmarkId::new(name, block_size), &block_size, |b, &n| {
                b.iter(|| {
                    let mut sum = 0.0f32;
                    for _ in 0..n {
                        sum += osc.advance();
                    }
                    black_box(sum)
                })
            });
        }
    }
    group.finish();
}

fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("AdEnvelope");
    for curve in [0.0f32, -7.0] {
        let mut env = AdEnvelope::new(SAMPLE_RATE);
        env.set_curve(curve);
        group.bench_function(BenchmarkId::new("curve", curve), |b| {
            b.iter(|| {
                env.trigger();
                let mut sum = 0.0f32;
                for _ in 0..256 {
                    sum += env.advance();
                }
                black_box(sum)
            })
        });
    }
    group.finish();
}

fn bench_three_band_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("ThreeBand");
    let mut bands = [80.0f32, 1000.0, 12000.0].map(|f| {
        let mut svf = StateVariableFilter::new(SAMPLE_RATE);
        svf.set_frequency(f);
        svf.set_resonance(0.2);
        svf
    });
    group.bench_function("split_recombine_saturate", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for i in 0..256 {
                let x = black_box(i as f32 / 256.0 - 0.5);
                let y: f32 = bands.iter_mut().map(|svf| svf.process(x).band).sum();
                acc += saturate(y);
            }
            black_box(acc)
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_oscillator,
    bench_envelope,
    bench_three_band_split
);
criterion_main!(benches);
