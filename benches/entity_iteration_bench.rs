use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use mesh_entities::prelude::*;

fn bench_whole_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("whole_mesh");

    for &n in &[16usize, 64] {
        let mesh = unit_square(n, n, CellType::Triangle).expect("valid square mesh");
        mesh.init(1);

        group.bench_with_input(BenchmarkId::new("cells", n), &n, |b, _| {
            b.iter(|| {
                let sum: usize = mesh.cells().iter().map(|c| c.index()).sum();
                black_box(sum);
            });
        });

        group.bench_with_input(BenchmarkId::new("edges", n), &n, |b, _| {
            b.iter(|| {
                let sum: usize = mesh.entities::<Edge>().iter().map(|e| e.index()).sum();
                black_box(sum);
            });
        });
    }
    group.finish();
}

fn bench_incidence(c: &mut Criterion) {
    let mut group = c.benchmark_group("incidence");

    for &n in &[4usize, 8] {
        let mesh = unit_cube(n, n, n, CellType::Tetrahedron).expect("valid cube mesh");
        mesh.init_connectivity(3, 1);
        mesh.init_connectivity(0, 3);

        group.bench_with_input(BenchmarkId::new("cell_edges", n), &n, |b, _| {
            b.iter(|| {
                let mut sum = 0usize;
                for cell in mesh.cells() {
                    for edge in cell.entities::<Edge>() {
                        sum += edge.index();
                    }
                }
                black_box(sum);
            });
        });

        group.bench_with_input(BenchmarkId::new("vertex_cells", n), &n, |b, _| {
            b.iter(|| {
                let mut sum = 0usize;
                for vertex in mesh.vertices() {
                    sum += vertex.entities::<Cell>().len();
                }
                black_box(sum);
            });
        });
    }
    group.finish();
}

fn bench_lazy_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("lazy_compute");

    for &n in &[4usize, 8] {
        group.bench_with_input(BenchmarkId::new("faces_to_edges", n), &n, |b, &n| {
            b.iter(|| {
                let mesh = unit_cube(n, n, n, CellType::Tetrahedron).expect("valid cube mesh");
                black_box(mesh.init_connectivity(2, 1).num_connections());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_whole_mesh, bench_incidence, bench_lazy_compute);
criterion_main!(benches);
