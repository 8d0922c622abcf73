//! Construction of the initial one-face subdivision.
//!
//! Purpose
//! - Turn a clockwise simple polygon outline into a mesh with one bounded
//!   face, its boundary cycle, and the mirrored exterior cycle.
//!
//! Why this design
//! - All input checks run before the first allocation, so a rejected outline
//!   produces an error and no partially-built mesh.

use crate::geom::cycle_signed_area;
use crate::Vec2;

use super::store::Mesh;
use super::types::MeshError;

impl Mesh {
    /// Build a subdivision whose single bounded face is the given polygon.
    ///
    /// `points` lists the outline vertices in clockwise order, without
    /// repeating the first point at the end; edge `i` of the result runs
    /// from `points[i]` to `points[(i + 1) % n]`.
    ///
    /// # Errors
    ///
    /// [`MeshError::TooFewPoints`] for fewer than three points,
    /// [`MeshError::DuplicatePoint`] if two consecutive points (including
    /// the closing pair) coincide, and [`MeshError::NotClockwise`] if the
    /// outline's signed area is not negative.
    pub fn from_points(points: &[Vec2<f64>]) -> Result<Self, MeshError> {
        let n = points.len();
        if n < 3 {
            return Err(MeshError::TooFewPoints(n));
        }
        for i in 0..n {
            if points[i] == points[(i + 1) % n] {
                return Err(MeshError::DuplicatePoint(i));
            }
        }
        let area = cycle_signed_area(points);
        if area >= 0.0 {
            return Err(MeshError::NotClockwise(area));
        }

        let mut mesh = Mesh::new();
        let vertices: Vec<_> = points.iter().map(|&p| mesh.add_vertex(p)).collect();
        let face = mesh.add_face();
        let edges: Vec<_> = (0..n)
            .map(|i| mesh.add_edge(vertices[i], vertices[(i + 1) % n], Some(face), None))
            .collect();

        // Interior cycle follows the outline order; the exterior cycle runs
        // over the twins in the reverse order so that both are closed.
        for i in 0..n {
            let cur = mesh.edge(edges[i]).hedge;
            let fwd = mesh.edge(edges[(i + 1) % n]).hedge;
            let back = mesh.edge(edges[(i + n - 1) % n]).hedge;
            mesh.hedge_mut(cur).next = fwd;
            mesh.hedge_mut(cur).prev = back;
            let twin = mesh.hedge(cur).twin;
            mesh.hedge_mut(twin).next = mesh.hedge(back).twin;
            mesh.hedge_mut(twin).prev = mesh.hedge(fwd).twin;
        }
        mesh.face_mut(face).anchor = Some(mesh.edge(edges[0]).hedge);

        debug_assert_eq!(mesh.num_hedges(), 2 * n);
        Ok(mesh)
    }
}
