//! Subdivision walkthrough on a small polygon.
//!
//! Purpose
//! - Show the whole lifecycle in one place: build a clockwise polygon mesh,
//!   split it twice (including a split of a face created by an earlier
//!   split), and read back faces, boundaries, and containment.
//!
//! Run with: cargo run -p plat --example subdivide

use plat::prelude::*;

fn main() {
    let outline = [
        Vec2::new(0.0, 0.0),
        Vec2::new(0.0, 4.0),
        Vec2::new(4.0, 4.0),
        Vec2::new(4.0, 0.0),
    ];
    let mut mesh = Mesh::from_points(&outline).expect("outline is simple and clockwise");
    println!("initial mesh:\n{mesh}");

    // Bisect the left and right side: horizontal bridge at y=2.
    let first = mesh
        .split_face(EdgeId(0), EdgeId(2))
        .expect("left and right side bound the face");
    println!(
        "first split: kept {:?}, created {:?}, bridge {:?}",
        first.kept, first.created, first.bridge
    );

    // Split the face the first split created, using the outer halves it left
    // on the upper boundary: horizontal bridge at y=3.
    let second = mesh
        .split_face(first.outer1, first.outer2)
        .expect("outer halves bound the created face");
    println!(
        "second split: kept {:?}, created {:?}, bridge {:?}",
        second.kept, second.created, second.bridge
    );

    mesh.check_invariants().expect("mesh is structurally sound");

    for (f, _) in mesh.faces() {
        let cycle: Vec<String> = mesh
            .boundary_vertices(f)
            .map(|v| {
                let p = mesh.pos(v);
                format!("({}, {})", p.x, p.y)
            })
            .collect();
        println!("{f:?} boundary: {}", cycle.join(" -> "));
    }

    for point in [Vec2::new(2.0, 1.0), Vec2::new(2.0, 2.5), Vec2::new(2.0, 3.5)] {
        let home = mesh
            .faces()
            .find(|&(f, _)| mesh.face_contains(f, point))
            .map(|(f, _)| f);
        println!("point ({}, {}) lies in {home:?}", point.x, point.y);
    }

    println!("final mesh:\n{mesh}");
}
