//! Shaping Benchmarks
//!
//! Measures per-sample cost of the default pipeline and of the windowed
//! filters at various depths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lamco_cursor_shaper::config::Config;
use lamco_cursor_shaper::geometry::Point;
use lamco_cursor_shaper::shaper::{ShapeContext, Transform};
use lamco_cursor_shaper::transforms::{JitterTransform, SmoothTransform, VectorSmoothTransform};

const SAMPLES: usize = 1000;

/// Steady diagonal sweep across the sensor
fn straight_trajectory(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| Point::new(-300.0 + i as f64 * 0.5, -200.0 + i as f64 * 0.3))
        .collect()
}

/// Small alternating offsets around a fixed point (tremor)
fn tremor_trajectory(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            Point::new(10.0 + sign * 1.5, 20.0 - sign * 0.8)
        })
        .collect()
}

/// Circle sampled at one degree steps
fn circle_trajectory(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let t = (i as f64).to_radians();
            Point::new(100.0 * t.cos(), 100.0 * t.sin())
        })
        .collect()
}

/// Benchmark the default pipeline over typical input shapes
fn bench_default_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("default_pipeline");
    group.throughput(Throughput::Elements(SAMPLES as u64));

    let trajectories = [
        ("straight", straight_trajectory(SAMPLES)),
        ("tremor", tremor_trajectory(SAMPLES)),
        ("circle", circle_trajectory(SAMPLES)),
    ];

    for (name, samples) in &trajectories {
        group.bench_with_input(BenchmarkId::new("shape", name), samples, |b, samples| {
            let config = Config::default_config();
            b.iter(|| {
                let mut shaper = config.build_shaper().expect("default config builds");
                for &p in samples {
                    black_box(shaper.shape(black_box(p)));
                }
            })
        });
    }

    group.finish();
}

/// Benchmark jitter classification at various direction window depths
fn bench_jitter_depths(c: &mut Criterion) {
    let mut group = c.benchmark_group("jitter_depth");
    let samples = tremor_trajectory(SAMPLES);
    group.throughput(Throughput::Elements(SAMPLES as u64));

    for depth in [10usize, 50, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut jitter = JitterTransform::new(0.2)
                    .expect("valid threshold")
                    .with_sample_depth(depth);
                let mut ctx = ShapeContext::default();
                for &p in &samples {
                    ctx.previous_point = ctx.current_point;
                    ctx.current_point = jitter.transform(black_box(p), &mut ctx);
                }
                black_box(ctx.current_point)
            })
        });
    }

    group.finish();
}

/// Benchmark point and path smoothing windows
fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("smoothing");
    let samples = circle_trajectory(SAMPLES);
    group.throughput(Throughput::Elements(SAMPLES as u64));

    for depth in [3usize, 50] {
        group.bench_with_input(BenchmarkId::new("point", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut smooth = SmoothTransform::new(depth);
                for &p in &samples {
                    black_box(smooth.smooth(black_box(p)));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("path", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut path = VectorSmoothTransform::new(depth);
                let mut previous = Point::ZERO;
                for &p in &samples {
                    previous = path.smooth(black_box(p), previous);
                }
                black_box(previous)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_default_pipeline,
    bench_jitter_depths,
    bench_smoothing
);
criterion_main!(benches);
