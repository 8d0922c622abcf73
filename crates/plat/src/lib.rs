//! Planar polygon subdivision: half-edge mesh, face splitting, containment.
//!
//! The crate keeps one clockwise polygon as a doubly-connected edge list and
//! grows it by bisection splits: pick two edges of a face, bisect both, and
//! bridge the midpoints, turning one face into two. `geom` holds the scalar
//! predicates, `mesh` the structure and its operations, `sample` a seeded
//! polygon generator for tests and benches.
//!
//! API Policy
//! - Identifiers are plain indices and the arenas are append-only; anything
//!   handed out stays valid for the life of the mesh.
//! - Mutating operations are transactional: they validate first, and on
//!   error the mesh is untouched.

pub mod geom;
pub mod mesh;
pub mod sample;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Convenience re-exports: callers mostly want the mesh and its ids.
pub use mesh::{EdgeId, FaceId, FaceSplit, HedgeId, Mesh, MeshError, VertexId};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::{cw_side, cycle_signed_area, midpoint, parallelogram_area};
    pub use crate::mesh::{
        Edge, EdgeId, Face, FaceId, FaceSplit, Hedge, HedgeId, Mesh, MeshError, Vertex, VertexId,
    };
    pub use crate::sample::{draw_polygon_radial, RadialCfg, ReplayToken, VertexCount};
    pub use nalgebra::Vector2 as Vec2;
}
