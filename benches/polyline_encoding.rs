//! Benchmarks for response rendering
//!
//! This benchmark measures:
//! - Polyline encoding with and without elevation
//! - JSON path rendering

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use route_orchestrator::config::OrchestratorConfig;
use route_orchestrator::format::{encode_polyline, render_json, OutputOptions};
use route_orchestrator::types::{PathPoint, ResponsePath};

fn create_points(n: usize) -> Vec<PathPoint> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            PathPoint::new(52.5 + t * 0.3, 13.4 + (t * 12.0).sin() * 0.05).with_ele(30.0 + t * 10.0)
        })
        .collect()
}

fn bench_polyline(c: &mut Criterion) {
    let mut group = c.benchmark_group("polyline_encoding");

    for n in [10usize, 1_000, 10_000] {
        let points = create_points(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("2d", n), &points, |b, pts| {
            b.iter(|| encode_polyline(black_box(pts), false, 1e5))
        });
        group.bench_with_input(BenchmarkId::new("3d", n), &points, |b, pts| {
            b.iter(|| encode_polyline(black_box(pts), true, 1e5))
        });
    }

    group.finish();
}

fn bench_json_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("json_rendering");

    let config = OrchestratorConfig::default();
    let path = ResponsePath {
        distance: 35_000.0,
        time: 2_400_000,
        weight: 3_500.0,
        points: create_points(2_000),
        ..Default::default()
    };
    let paths = vec![path];
    let debug = serde_json::Map::new();

    let encoded = OutputOptions::default();
    let geojson = OutputOptions {
        points_encoded: false,
        ..Default::default()
    };

    group.bench_function("encoded", |b| {
        b.iter(|| render_json(black_box(&paths), &debug, &encoded, &config, 3).to_string())
    });
    group.bench_function("geojson", |b| {
        b.iter(|| render_json(black_box(&paths), &debug, &geojson, &config, 3).to_string())
    });

    group.finish();
}

criterion_group!(benches, bench_polyline, bench_json_rendering);
criterion_main!(benches);
