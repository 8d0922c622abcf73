//! Planar subdivision as a doubly-connected edge list.
//!
//! Purpose
//! - Store a polygon subdivided into faces, with every edge carried by a
//!   twin pair of directed half-edges, and grow it by repeated face splits.
//! - Answer the traversal and containment queries consumers aggregate over:
//!   boundary cycles per face, directed endpoints per edge, point-in-face.
//!
//! Why this design
//! - Arena vectors plus index newtypes: the structure is densely cyclic, so
//!   records refer to each other by id and relinking is plain field stores.
//! - The unbounded exterior is not a face record; half-edges facing it carry
//!   `None`, and the exterior cycle exists only as those linked half-edges.
//! - Mutations validate first and only then write, so every error leaves the
//!   mesh exactly as it was.
//!
//! Code cross-refs: `geom::{cw_side,midpoint,cycle_signed_area}` for all
//! coordinate arithmetic; `sample` for the polygon generator the tests and
//! benches feed through [`Mesh::from_points`].

mod build;
mod check;
mod split;
mod store;
mod types;

pub use split::FaceSplit;
pub use store::{BoundaryHedges, Mesh};
pub use types::{Edge, EdgeId, Face, FaceId, Hedge, HedgeId, MeshError, Vertex, VertexId};

#[cfg(test)]
mod tests;
