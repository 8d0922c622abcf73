//! Criterion benchmarks for mesh construction and splitting.
//! Focus sizes: outlines with n in {8, 32, 128, 512} vertices.
//! Results: by default under target/criterion; to store elsewhere, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p plat

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use plat::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn outline(n: usize, seed: u64) -> Vec<Vec2<f64>> {
    let cfg = RadialCfg {
        vertex_count: VertexCount::Fixed(n),
        ..RadialCfg::default()
    };
    draw_polygon_radial(cfg, ReplayToken { seed, index: 0 })
}

/// Grow a fresh mesh by `k` splits, always bisecting two distinct edges of a
/// random face. Rejected or collinear picks recur on the next loop turn.
fn split_repeatedly(mesh: &mut Mesh, k: usize, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut done = 0;
    while done < k {
        let face = FaceId(rng.gen_range(0..mesh.num_faces()));
        let edges: Vec<EdgeId> = mesh
            .boundary_hedges(face)
            .map(|h| mesh.hedge(h).edge)
            .collect();
        let i = rng.gen_range(0..edges.len());
        let j = (i + 1 + rng.gen_range(0..edges.len() - 1)) % edges.len();
        let (s1, t1) = mesh.edge_endpoints(edges[i]);
        let (s2, t2) = mesh.edge_endpoints(edges[j]);
        let (a, b) = (mesh.pos(s1), mesh.pos(t1));
        let (c, d) = (mesh.pos(s2), mesh.pos(t2));
        let p = midpoint(midpoint(a, b), midpoint(c, d));
        // An edge collinear with the bisection segment would carve a
        // zero-area face; skip such picks.
        if parallelogram_area(p - a, b - a).abs() <= 1e-9
            || parallelogram_area(p - c, d - c).abs() <= 1e-9
        {
            continue;
        }
        if mesh.split_face(edges[i], edges[j]).is_ok() {
            done += 1;
        }
    }
}

fn bench_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh");
    for &n in &[8usize, 32, 128, 512] {
        group.bench_with_input(BenchmarkId::new("from_points", n), &n, |b, &n| {
            b.iter_batched(
                || outline(n, 43),
                |pts| {
                    let _mesh = Mesh::from_points(&pts).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("split_face_x16", n), &n, |b, &n| {
            b.iter_batched(
                || Mesh::from_points(&outline(n, 44)).unwrap(),
                |mut mesh| {
                    split_repeatedly(&mut mesh, 16, 45);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("check_invariants", n), &n, |b, &n| {
            let mut mesh = Mesh::from_points(&outline(n, 46)).unwrap();
            split_repeatedly(&mut mesh, 16, 47);
            b.iter(|| mesh.check_invariants().unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_mesh);
criterion_main!(benches);
