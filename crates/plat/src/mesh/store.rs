//! Arena storage and read access for the subdivision.
//!
//! Purpose
//! - Own the vertex / face / edge / half-edge records in per-kind `Vec`
//!   arenas addressed by the index types from `types`.
//! - Offer the three primitive growth operations (`add_vertex`, `add_face`,
//!   `add_edge`) plus the traversal and classification queries everything
//!   else is written against.
//!
//! Why this design
//! - Indices instead of references keep the cyclic next/prev/twin structure
//!   trivially representable and stable across `Vec` growth; relinking is a
//!   plain field store, never a re-allocation concern.

use std::fmt;

use crate::geom::cw_side;
use crate::Vec2;

use super::types::{Edge, EdgeId, Face, FaceId, Hedge, HedgeId, Vertex, VertexId};

/// A planar subdivision held as a doubly-connected edge list.
///
/// The arenas are append-only: every operation adds records, nothing removes
/// them, so any identifier ever handed out stays valid for the life of the
/// mesh. Mutating operations live in the builder and splitter modules; this
/// module only grows and reads.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    edges: Vec<Edge>,
    hedges: Vec<Hedge>,
}

impl Mesh {
    /// Empty subdivision with no vertices, faces, or edges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vertex and return its identifier.
    pub fn add_vertex(&mut self, pos: Vec2<f64>) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex { pos });
        id
    }

    /// Append a face with no anchor yet; the caller wires one in once the
    /// boundary cycle exists.
    pub fn add_face(&mut self) -> FaceId {
        let id = FaceId(self.faces.len());
        self.faces.push(Face { anchor: None });
        id
    }

    /// Append an edge together with its twin pair of half-edges: the primary
    /// runs `start`→`end` bounding `face1`, the secondary `end`→`start`
    /// bounding `face2` (`None` for the exterior). The twins reference each
    /// other; `next`/`prev` are left self-linked for the caller to wire.
    pub fn add_edge(
        &mut self,
        start: VertexId,
        end: VertexId,
        face1: Option<FaceId>,
        face2: Option<FaceId>,
    ) -> EdgeId {
        let edge = EdgeId(self.edges.len());
        let primary = HedgeId(self.hedges.len());
        let secondary = HedgeId(self.hedges.len() + 1);
        self.hedges.push(Hedge {
            start,
            end,
            face: face1,
            edge,
            next: primary,
            prev: primary,
            twin: secondary,
        });
        self.hedges.push(Hedge {
            start: end,
            end: start,
            face: face2,
            edge,
            next: secondary,
            prev: secondary,
            twin: primary,
        });
        self.edges.push(Edge { hedge: primary });
        edge
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }
    /// Number of bounded faces; the exterior region is not a record.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
    pub fn num_hedges(&self) -> usize {
        self.hedges.len()
    }

    pub fn vertex(&self, v: VertexId) -> &Vertex {
        &self.vertices[v.0]
    }
    pub fn face(&self, f: FaceId) -> &Face {
        &self.faces[f.0]
    }
    pub fn edge(&self, e: EdgeId) -> &Edge {
        &self.edges[e.0]
    }
    pub fn hedge(&self, h: HedgeId) -> &Hedge {
        &self.hedges[h.0]
    }

    pub fn contains_edge(&self, e: EdgeId) -> bool {
        e.0 < self.edges.len()
    }

    // Relinking is reserved for the builder and splitter in this crate; the
    // public surface stays append-and-read so callers cannot break the
    // structure between checks.
    pub(crate) fn face_mut(&mut self, f: FaceId) -> &mut Face {
        &mut self.faces[f.0]
    }
    pub(crate) fn edge_mut(&mut self, e: EdgeId) -> &mut Edge {
        &mut self.edges[e.0]
    }
    pub(crate) fn hedge_mut(&mut self, h: HedgeId) -> &mut Hedge {
        &mut self.hedges[h.0]
    }

    /// Position of a vertex.
    #[inline]
    pub fn pos(&self, v: VertexId) -> Vec2<f64> {
        self.vertices[v.0].pos
    }

    /// Start and end positions of a half-edge.
    #[inline]
    pub fn hedge_points(&self, h: HedgeId) -> (Vec2<f64>, Vec2<f64>) {
        let hedge = &self.hedges[h.0];
        (self.pos(hedge.start), self.pos(hedge.end))
    }

    /// Directed endpoints `(start, end)` of an edge's primary half-edge; the
    /// twin runs in the reverse direction.
    pub fn edge_endpoints(&self, e: EdgeId) -> (VertexId, VertexId) {
        let h = &self.hedges[self.edges[e.0].hedge.0];
        (h.start, h.end)
    }

    /// Anchor half-edge of a face; `None` only while the face is still being
    /// wired up inside a mutating operation.
    pub fn face_anchor(&self, f: FaceId) -> Option<HedgeId> {
        self.faces[f.0].anchor
    }

    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices.iter().enumerate().map(|(i, v)| (VertexId(i), v))
    }

    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &Face)> {
        self.faces.iter().enumerate().map(|(i, f)| (FaceId(i), f))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), e))
    }

    pub fn hedges(&self) -> impl Iterator<Item = (HedgeId, &Hedge)> {
        self.hedges.iter().enumerate().map(|(i, h)| (HedgeId(i), h))
    }

    /// The half-edges of `face`'s boundary cycle, starting at its anchor and
    /// following `next` until the anchor recurs. Empty if the face has no
    /// anchor yet.
    pub fn boundary_hedges(&self, face: FaceId) -> BoundaryHedges<'_> {
        BoundaryHedges {
            mesh: self,
            start: self.faces[face.0].anchor,
            cursor: self.faces[face.0].anchor,
        }
    }

    /// The ordered vertex sequence of `face`'s boundary (each half-edge's
    /// start vertex). Walking it twice yields the same sequence.
    pub fn boundary_vertices(&self, face: FaceId) -> impl Iterator<Item = VertexId> + '_ {
        self.boundary_hedges(face).map(|h| self.hedges[h.0].start)
    }

    /// True iff `p` lies strictly in the clockwise half-plane of every
    /// half-edge of `face`'s boundary, i.e. strictly inside the intersection
    /// of those half-planes. For the convex faces this subdivision produces
    /// from convex input that is exactly face membership; boundary points
    /// test negative everywhere.
    pub fn face_contains(&self, face: FaceId, p: Vec2<f64>) -> bool {
        if self.faces[face.0].anchor.is_none() {
            return false;
        }
        self.boundary_hedges(face).all(|h| {
            let (a, b) = self.hedge_points(h);
            cw_side(a, b, p)
        })
    }
}

/// Iterator over one face boundary cycle. Relies on intact `next` links; on
/// a corrupted mesh it may not terminate, which `check_invariants` exists to
/// rule out beforehand.
pub struct BoundaryHedges<'a> {
    mesh: &'a Mesh,
    start: Option<HedgeId>,
    cursor: Option<HedgeId>,
}

impl Iterator for BoundaryHedges<'_> {
    type Item = HedgeId;

    fn next(&mut self) -> Option<HedgeId> {
        let current = self.cursor?;
        let following = self.mesh.hedges[current.0].next;
        self.cursor = (Some(following) != self.start).then_some(following);
        Some(current)
    }
}

impl fmt::Display for Mesh {
    /// Full dump of the arenas with every link spelled out, one entity per
    /// line; intended for debugging small meshes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "vertices: {}", self.vertices.len())?;
        for (VertexId(i), v) in self.vertices() {
            writeln!(f, "  v{i} ({}, {})", v.pos.x, v.pos.y)?;
        }
        writeln!(f, "faces: {}", self.faces.len())?;
        for (FaceId(i), face) in self.faces() {
            match face.anchor {
                Some(HedgeId(a)) => writeln!(f, "  f{i} anchor h{a}")?,
                None => writeln!(f, "  f{i} anchor unset")?,
            }
        }
        writeln!(f, "edges: {}", self.edges.len())?;
        for (EdgeId(i), edge) in self.edges() {
            let h = edge.hedge;
            let t = self.hedges[h.0].twin;
            for side in [h, t] {
                let hedge = &self.hedges[side.0];
                let face = match hedge.face {
                    Some(FaceId(k)) => format!("f{k}"),
                    None => "ext".to_string(),
                };
                writeln!(
                    f,
                    "  e{i} h{} v{}->v{} {} next h{} prev h{} twin h{}",
                    side.0, hedge.start.0, hedge.end.0, face, hedge.next.0, hedge.prev.0, hedge.twin.0
                )?;
            }
        }
        Ok(())
    }
}
