use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use stl_quote::mesh_ops::compute_metrics;
use stl_quote::parser::parse_stl;
use stl_quote::writer::{write_ascii_stl, write_binary_stl};
use stl_quote::{MaterialTable, ModelData, PrintSettings, TriangleMesh};

/// Generate a height-field mesh with the given number of triangles
fn generate_mesh(triangles: usize) -> TriangleMesh {
    let mut mesh = TriangleMesh::with_capacity(triangles);
    let columns = 100;

    for i in 0..triangles / 2 {
        let x = (i % columns) as f32;
        let y = (i / columns) as f32;
        let z = ((x * 0.1).sin() + (y * 0.1).cos()) * 5.0;
        let a = [x, y, z];
        let b = [x + 1.0, y, z];
        let c = [x + 1.0, y + 1.0, z + 0.5];
        let d = [x, y + 1.0, z + 0.5];
        mesh.push_triangle([0.0, 0.0, 1.0], [a, b, c]);
        mesh.push_triangle([0.0, 0.0, 1.0], [a, c, d]);
    }

    mesh
}

fn binary_bytes(triangles: usize) -> Vec<u8> {
    let mut bytes = Vec::new();
    write_binary_stl(&generate_mesh(triangles), &mut bytes).unwrap();
    bytes
}

fn ascii_bytes(triangles: usize) -> Vec<u8> {
    let mut bytes = Vec::new();
    write_ascii_stl(&generate_mesh(triangles), "bench", &mut bytes).unwrap();
    bytes
}

fn bench_parse_binary(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_binary");

    for &triangles in &[1_000, 10_000, 100_000] {
        let bytes = binary_bytes(triangles);
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("triangles", triangles),
            &bytes,
            |b, bytes| b.iter(|| black_box(parse_stl(bytes).unwrap())),
        );
    }

    group.finish();
}

fn bench_parse_ascii(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_ascii");
    group.sample_size(20); // ASCII is an order of magnitude slower

    for &triangles in &[1_000, 10_000, 100_000] {
        let bytes = ascii_bytes(triangles);
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("triangles", triangles),
            &bytes,
            |b, bytes| b.iter(|| black_box(parse_stl(bytes).unwrap())),
        );
    }

    group.finish();
}

fn bench_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics");

    for &triangles in &[10_000, 100_000] {
        let mesh = generate_mesh(triangles);
        group.bench_with_input(
            BenchmarkId::new("triangles", triangles),
            &mesh,
            |b, mesh| b.iter(|| black_box(compute_metrics(mesh))),
        );
    }

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let bytes = binary_bytes(50_000);
    let settings = PrintSettings::default();
    let table = MaterialTable::reference();

    c.bench_function("decode_measure_estimate_50k", |b| {
        b.iter(|| {
            let mesh = parse_stl(&bytes).unwrap();
            let model = ModelData::from_mesh("bench.stl", bytes.len() as u64, &mesh);
            black_box(model.estimate(&settings, &table))
        })
    });
}

criterion_group!(
    benches,
    bench_parse_binary,
    bench_parse_ascii,
    bench_metrics,
    bench_full_pipeline
);
criterion_main!(benches);
