//! Tests for building, splitting, and querying the subdivision.

use super::*;
use crate::geom::{cycle_signed_area, midpoint, parallelogram_area};
use crate::sample::{draw_polygon_radial, RadialCfg, ReplayToken, VertexCount};
use crate::Vec2;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn pt(x: f64, y: f64) -> Vec2<f64> {
    Vec2::new(x, y)
}

/// Clockwise unit-ish square; edge 0 is the left side, edge 2 the right.
fn square() -> Mesh {
    Mesh::from_points(&[pt(0.0, 0.0), pt(0.0, 2.0), pt(2.0, 2.0), pt(2.0, 0.0)]).unwrap()
}

fn boundary_points(mesh: &Mesh, f: FaceId) -> Vec<Vec2<f64>> {
    mesh.boundary_vertices(f).map(|v| mesh.pos(v)).collect()
}

/// Equality of closed vertex cycles up to rotation of the starting point.
fn assert_cyclic_eq(actual: &[Vec2<f64>], expected: &[Vec2<f64>]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "cycle lengths differ: {actual:?} vs {expected:?}"
    );
    let n = expected.len();
    let matches = (0..n)
        .any(|shift| (0..n).all(|i| (actual[(i + shift) % n] - expected[i]).norm() < 1e-12));
    assert!(matches, "cycles differ beyond rotation: {actual:?} vs {expected:?}");
}

#[test]
fn triangle_builds_sound() {
    let outline = [pt(0.0, 0.0), pt(0.0, 1.0), pt(1.0, 0.0)];
    let mesh = Mesh::from_points(&outline).unwrap();
    assert_eq!(mesh.num_vertices(), 3);
    assert_eq!(mesh.num_faces(), 1);
    assert_eq!(mesh.num_edges(), 3);
    assert_eq!(mesh.num_hedges(), 6);
    assert_eq!(mesh.check_invariants(), Ok(()));
    assert_cyclic_eq(&boundary_points(&mesh, FaceId(0)), &outline);
}

#[test]
fn builder_preserves_outline_order_and_tags_exterior() {
    let mesh = square();
    for i in 0..4 {
        let (s, e) = mesh.edge_endpoints(EdgeId(i));
        assert_eq!((s, e), (VertexId(i), VertexId((i + 1) % 4)));
        let primary = mesh.edge(EdgeId(i)).hedge;
        assert_eq!(mesh.hedge(primary).face, Some(FaceId(0)));
        let twin = mesh.hedge(primary).twin;
        assert_eq!(mesh.hedge(twin).face, None);
    }
}

#[test]
fn builder_rejects_bad_outlines() {
    assert_eq!(
        Mesh::from_points(&[pt(0.0, 0.0), pt(1.0, 0.0)]).unwrap_err(),
        MeshError::TooFewPoints(2)
    );
    assert_eq!(
        Mesh::from_points(&[pt(0.0, 0.0), pt(0.0, 1.0), pt(0.0, 1.0), pt(1.0, 0.0)]).unwrap_err(),
        MeshError::DuplicatePoint(1)
    );
    // Closing pair duplicated: last point equals the first.
    assert_eq!(
        Mesh::from_points(&[pt(0.0, 0.0), pt(0.0, 1.0), pt(1.0, 0.0), pt(0.0, 0.0)]).unwrap_err(),
        MeshError::DuplicatePoint(3)
    );
    // Counterclockwise triangle.
    let err = Mesh::from_points(&[pt(0.0, 0.0), pt(1.0, 0.0), pt(0.0, 1.0)]);
    assert!(matches!(err, Err(MeshError::NotClockwise(a)) if a > 0.0));
}

#[test]
fn split_square_into_two_rectangles() {
    let mut mesh = square();
    let split = mesh.split_face(EdgeId(0), EdgeId(2)).unwrap();

    assert_eq!(mesh.num_vertices(), 6);
    assert_eq!(mesh.num_faces(), 2);
    assert_eq!(mesh.num_edges(), 7);
    assert_eq!(mesh.num_hedges(), 14);
    assert_eq!(mesh.check_invariants(), Ok(()));

    assert!((mesh.pos(split.mid1) - pt(0.0, 1.0)).norm() < 1e-12);
    assert!((mesh.pos(split.mid2) - pt(2.0, 1.0)).norm() < 1e-12);
    assert_eq!(split.kept, FaceId(0));
    assert_eq!(split.created, FaceId(1));

    // Lower rectangle keeps the split face's identity, upper is new.
    assert_cyclic_eq(
        &boundary_points(&mesh, split.kept),
        &[pt(0.0, 0.0), pt(0.0, 1.0), pt(2.0, 1.0), pt(2.0, 0.0)],
    );
    assert_cyclic_eq(
        &boundary_points(&mesh, split.created),
        &[pt(0.0, 1.0), pt(0.0, 2.0), pt(2.0, 2.0), pt(2.0, 1.0)],
    );

    assert!(mesh.face_contains(split.kept, pt(1.0, 0.5)));
    assert!(!mesh.face_contains(split.created, pt(1.0, 0.5)));
    assert!(mesh.face_contains(split.created, pt(1.0, 1.5)));
    assert!(!mesh.face_contains(split.kept, pt(1.0, 1.5)));
    // On the bridge and outside: in neither face.
    assert!(!mesh.face_contains(split.kept, pt(1.0, 1.0)));
    assert!(!mesh.face_contains(split.created, pt(1.0, 1.0)));
    assert!(!mesh.face_contains(split.kept, pt(3.0, 1.0)));
    assert!(!mesh.face_contains(split.created, pt(3.0, 1.0)));
}

#[test]
fn split_receipt_names_fresh_records() {
    let mut mesh = square();
    let split = mesh.split_face(EdgeId(0), EdgeId(2)).unwrap();

    assert_eq!(split.mid1, VertexId(4));
    assert_eq!(split.mid2, VertexId(5));
    assert_eq!(split.created, FaceId(1));
    assert_eq!(split.bridge, EdgeId(4));
    assert_eq!(split.outer1, EdgeId(5));
    assert_eq!(split.outer2, EdgeId(6));

    assert_eq!(mesh.edge_endpoints(split.bridge), (split.mid1, split.mid2));
    // Outer halves run away from the kept corner: M->B and C->N.
    assert_eq!(mesh.edge_endpoints(split.outer1), (split.mid1, VertexId(1)));
    assert_eq!(mesh.edge_endpoints(split.outer2), (VertexId(2), split.mid2));
    // The bisected edges keep their ids as the inner halves A->M and N->D.
    assert_eq!(mesh.edge_endpoints(EdgeId(0)), (VertexId(0), split.mid1));
    assert_eq!(mesh.edge_endpoints(EdgeId(2)), (split.mid2, VertexId(3)));

    // Both faces re-anchor onto the bridge.
    for face in [split.kept, split.created] {
        let anchor = mesh.face_anchor(face).unwrap();
        assert_eq!(mesh.hedge(anchor).edge, split.bridge);
    }
}

#[test]
fn split_where_second_edge_follows_first() {
    // Left and top edge share the corner (0,2): the chain between the outer
    // halves is empty and the new face is a triangle.
    let mut mesh = square();
    let split = mesh.split_face(EdgeId(0), EdgeId(1)).unwrap();
    assert_eq!(mesh.check_invariants(), Ok(()));
    assert_cyclic_eq(
        &boundary_points(&mesh, split.kept),
        &[
            pt(0.0, 0.0),
            pt(0.0, 1.0),
            pt(1.0, 2.0),
            pt(2.0, 2.0),
            pt(2.0, 0.0),
        ],
    );
    assert_cyclic_eq(
        &boundary_points(&mesh, split.created),
        &[pt(1.0, 2.0), pt(0.0, 1.0), pt(0.0, 2.0)],
    );
}

#[test]
fn split_where_first_edge_follows_second() {
    // Left and bottom edge share the corner (0,0): the kept face shrinks to
    // a triangle and the chain lands in the new face.
    let mut mesh = square();
    let split = mesh.split_face(EdgeId(0), EdgeId(3)).unwrap();
    assert_eq!(mesh.check_invariants(), Ok(()));
    assert_cyclic_eq(
        &boundary_points(&mesh, split.kept),
        &[pt(0.0, 0.0), pt(0.0, 1.0), pt(1.0, 0.0)],
    );
    assert_cyclic_eq(
        &boundary_points(&mesh, split.created),
        &[
            pt(1.0, 0.0),
            pt(0.0, 1.0),
            pt(0.0, 2.0),
            pt(2.0, 2.0),
            pt(2.0, 0.0),
        ],
    );
}

#[test]
fn split_rejections_leave_mesh_untouched() {
    let mut mesh = square();
    let before = format!("{mesh}");

    assert_eq!(
        mesh.split_face(EdgeId(0), EdgeId(0)),
        Err(MeshError::IdenticalEdges(EdgeId(0)))
    );
    assert_eq!(
        mesh.split_face(EdgeId(0), EdgeId(99)),
        Err(MeshError::UnknownEdge(EdgeId(99)))
    );
    assert_eq!(format!("{mesh}"), before);

    // Edges of two different faces cannot split anything.
    mesh.split_face(EdgeId(0), EdgeId(2)).unwrap();
    let before = format!("{mesh}");
    assert_eq!(
        mesh.split_face(EdgeId(3), EdgeId(1)),
        Err(MeshError::NoCommonFace(EdgeId(3), EdgeId(1)))
    );
    assert_eq!(format!("{mesh}"), before);
}

#[test]
fn boundary_walk_is_idempotent() {
    let mut mesh = square();
    mesh.split_face(EdgeId(0), EdgeId(2)).unwrap();
    for f in 0..mesh.num_faces() {
        let first: Vec<_> = mesh.boundary_vertices(FaceId(f)).collect();
        let second: Vec<_> = mesh.boundary_vertices(FaceId(f)).collect();
        assert_eq!(first, second);
        assert!(first.len() >= 3);
    }
}

#[test]
fn face_contains_is_strict() {
    let mesh = square();
    let f = FaceId(0);
    assert!(mesh.face_contains(f, pt(1.0, 1.0)));
    assert!(!mesh.face_contains(f, pt(0.0, 0.0)), "corner");
    assert!(!mesh.face_contains(f, pt(0.0, 1.0)), "edge midpoint");
    assert!(!mesh.face_contains(f, pt(-1.0, 1.0)), "outside");
}

#[test]
fn faces_stay_clockwise_across_splits() {
    let mut mesh = square();
    mesh.split_face(EdgeId(0), EdgeId(2)).unwrap();
    mesh.split_face(EdgeId(0), EdgeId(4)).unwrap();
    for f in 0..mesh.num_faces() {
        let cycle = boundary_points(&mesh, FaceId(f));
        assert!(cycle_signed_area(&cycle) < 0.0, "face {f}: {cycle:?}");
    }
}

#[test]
fn dump_lists_every_record() {
    let mesh = square();
    let dump = format!("{mesh}");
    assert!(dump.contains("vertices: 4"));
    assert!(dump.contains("faces: 1"));
    assert!(dump.contains("edges: 4"));
    assert!(dump.contains("ext"));
}

/// True when neither edge is collinear with the segment joining the two edge
/// midpoints. Such a pick puts the representative point on the edge's own
/// carrier line; the splitter resolves it toward the far side rather than
/// rejecting it, and it can carve a zero-area face out of a neighbor.
fn off_bisection_line(mesh: &Mesh, e1: EdgeId, e2: EdgeId) -> bool {
    let endpoints = |e: EdgeId| {
        let (s, t) = mesh.edge_endpoints(e);
        (mesh.pos(s), mesh.pos(t))
    };
    let (a, b) = endpoints(e1);
    let (c, d) = endpoints(e2);
    let p = midpoint(midpoint(a, b), midpoint(c, d));
    // Tolerance absorbs round-off from the chained midpoint halvings.
    parallelogram_area(p - a, b - a).abs() > 1e-9
        && parallelogram_area(p - c, d - c).abs() > 1e-9
}

/// Drive a mesh through a seeded sequence of split attempts, checking the
/// invariants and the growth accounting after every attempt. Rejected
/// attempts must not change the counts; picks with an edge collinear with
/// the bisection segment are skipped.
fn run_split_sequence(seed: u64, attempts: usize) {
    let cfg = RadialCfg {
        vertex_count: VertexCount::Uniform { min: 4, max: 12 },
        ..RadialCfg::default()
    };
    let outline = draw_polygon_radial(cfg, ReplayToken { seed, index: 0 });
    let n = outline.len();
    let mut mesh = Mesh::from_points(&outline).unwrap();
    let mut rng = StdRng::seed_from_u64(seed ^ 0xd1f3);

    let mut done = 0;
    for _ in 0..attempts {
        let face = FaceId(rng.gen_range(0..mesh.num_faces()));
        let edges: Vec<EdgeId> = mesh
            .boundary_hedges(face)
            .map(|h| mesh.hedge(h).edge)
            .collect();
        let i = rng.gen_range(0..edges.len());
        let j = (i + 1 + rng.gen_range(0..edges.len() - 1)) % edges.len();
        if off_bisection_line(&mesh, edges[i], edges[j])
            && mesh.split_face(edges[i], edges[j]).is_ok()
        {
            done += 1;
        }
        mesh.check_invariants().unwrap();
        assert_eq!(mesh.num_vertices(), n + 2 * done);
        assert_eq!(mesh.num_faces(), 1 + done);
        assert_eq!(mesh.num_edges(), n + 3 * done);
    }
    // The first attempt bisects two distinct edges of a strictly convex
    // polygon, which always succeeds.
    assert!(done >= 1, "no split succeeded in {attempts} attempts");
}

#[test]
fn seeded_split_sequence_holds_invariants() {
    run_split_sequence(2024, 24);
}

#[test]
fn collinear_bridge_half_picks_are_skipped() {
    // Replays a sequence whose fourth pick is the pair of collinear halves
    // left behind by an earlier split of a bridge edge. The driver must skip
    // that pick; splitting it would carve a zero-area face out of the
    // neighboring face.
    run_split_sequence(856144533109793292, 5);
}

proptest! {
    #[test]
    fn random_split_sequences_hold_invariants(seed in any::<u64>(), attempts in 1usize..12) {
        run_split_sequence(seed, attempts);
    }
}
