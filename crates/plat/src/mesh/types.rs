//! Entity records and identifier types for the subdivision.
//!
//! Identifiers are plain indices into the per-kind arenas owned by
//! [`Mesh`](super::Mesh); they are dense, zero-based, handed out in creation
//! order, and never invalidated (the mesh only grows).

use thiserror::Error;

use crate::Vec2;

/// Identifier of a vertex record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexId(pub usize);

/// Identifier of a bounded face record. The unbounded exterior region has no
/// record; half-edges facing it carry `None` instead of a `FaceId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceId(pub usize);

/// Identifier of an edge record (a twin pair of half-edges).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId(pub usize);

/// Identifier of a single directed half-edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HedgeId(pub usize);

/// A point of the subdivision. Positions never move once created; splitting
/// inserts fresh vertices instead of displacing existing ones.
#[derive(Clone, Copy, Debug)]
pub struct Vertex {
    pub pos: Vec2<f64>,
}

/// A bounded face, represented by one arbitrary half-edge of its boundary
/// cycle. `anchor` is `None` only between `add_face` and the wiring performed
/// by the builder or splitter.
#[derive(Clone, Copy, Debug)]
pub struct Face {
    pub anchor: Option<HedgeId>,
}

/// An edge owning a twin pair of half-edges. `hedge` names the primary side;
/// re-pointing it to the twin flips which side is primary without changing
/// the edge's identity.
#[derive(Clone, Copy, Debug)]
pub struct Edge {
    pub hedge: HedgeId,
}

/// One directed side of an edge, bounding exactly one region.
///
/// `next`/`prev` run along the boundary cycle of `face` (`None` face means
/// the exterior cycle). Freshly created half-edges are self-linked until the
/// caller wires them into a cycle.
#[derive(Clone, Copy, Debug)]
pub struct Hedge {
    pub start: VertexId,
    pub end: VertexId,
    pub face: Option<FaceId>,
    pub edge: EdgeId,
    pub next: HedgeId,
    pub prev: HedgeId,
    pub twin: HedgeId,
}

/// Rejected requests and integrity violations.
///
/// Operations validate before mutating: when a `MeshError` comes back from
/// `from_points` or `split_face`, the mesh is exactly as it was before the
/// call.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MeshError {
    #[error("polygon needs at least 3 points, got {0}")]
    TooFewPoints(usize),
    #[error("polygon repeats a point at input position {0}")]
    DuplicatePoint(usize),
    #[error("polygon winding is not clockwise (shoelace sum {0})")]
    NotClockwise(f64),
    #[error("edge {0:?} does not exist")]
    UnknownEdge(EdgeId),
    #[error("cannot split a face by bisecting {0:?} twice")]
    IdenticalEdges(EdgeId),
    #[error("{0:?} and {1:?} do not bound a common face toward the bisection segment")]
    NoCommonFace(EdgeId, EdgeId),
    #[error("twin links of {0:?} are not symmetric")]
    BrokenTwin(HedgeId),
    #[error("next/prev links at {0:?} do not agree")]
    BrokenLink(HedgeId),
    #[error("boundary cycle through {0:?} does not close")]
    UnclosedCycle(HedgeId),
    #[error("{hedge:?} lies on the boundary cycle of {face:?} but is labeled {found:?}")]
    ForeignHedge {
        hedge: HedgeId,
        /// `None` is the exterior cycle.
        face: Option<FaceId>,
        found: Option<FaceId>,
    },
    #[error("no boundary cycle reaches {0:?}")]
    UnreachedHedge(HedgeId),
    #[error("{0:?} has no anchor half-edge")]
    MissingAnchor(FaceId),
    #[error("anchor of {0:?} is not on its own boundary cycle")]
    StrayAnchor(FaceId),
    #[error(
        "Euler relation violated: {vertices} vertices + {faces} faces + 1 exterior != {edges} edges + 2"
    )]
    EulerViolation {
        vertices: usize,
        faces: usize,
        edges: usize,
    },
    #[error("boundary cycle of {0:?} is not clockwise")]
    FaceNotClockwise(FaceId),
    #[error("exterior cycle is not counterclockwise")]
    ExteriorNotCounterclockwise,
    #[error("expected one exterior cycle, found {0}")]
    FragmentedExterior(usize),
}
