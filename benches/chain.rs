use criterion::{Criterion, criterion_group, criterion_main};
use rustmaster::loudness::meter;
use rustmaster::master::{MasteringParams, chain};
use std::f32::consts::PI;
use std::hint::black_box;

const SAMPLE_RATE: u32 = 48_000;

fn sine_stereo(seconds: f32) -> (Vec<f32>, Vec<f32>) {
    let len = (seconds * SAMPLE_RATE as f32) as usize;
    let left: Vec<f32> = (0..len)
        .map(|i| 0.7 * (2.0 * PI * 440.0 * i as f32 / SAMPLE_RATE as f32).sin())
        .collect();
    let right = left.clone();
    (left, right)
}

fn bench_stereo_chain(c: &mut Criterion) {
    let (left, right) = sine_stereo(1.0);
    let params = MasteringParams::default();

    c.bench_function("stereo chain 1s", |b| {
        let mut work_left = vec![0.0f32; left.len()];
        let mut work_right = vec![0.0f32; right.len()];
        b.iter(|| {
            work_left.copy_from_slice(&left);
            work_right.copy_from_slice(&right);
            chain::process_stereo(
                black_box(&mut work_left),
                black_box(&mut work_right),
                SAMPLE_RATE,
                &params,
            )
            .unwrap();
        });
    });
}

fn bench_loudness_meter(c: &mut Criterion) {
    let (left, right) = sine_stereo(10.0);

    c.bench_function("loudness meter 10s", |b| {
        b.iter(|| black_box(meter::measure(black_box(&left), black_box(&right), SAMPLE_RATE)));
    });
}

criterion_group!(benches, bench_stereo_chain, bench_loudness_meter);
criterion_main!(benches);
