//! Face splitting by double edge bisection.
//!
//! Purpose
//! - Implement [`Mesh::split_face`]: bisect two edges of one bounded face and
//!   join the bisection points with a bridge edge, turning that face into
//!   two.
//!
//! Why this design
//! - Validation runs to completion before the first write, so a rejected
//!   request leaves the mesh untouched.
//! - The relinking sequence deliberately reads link state mid-rewrite (the
//!   `old_prev` and `old_next_twin` reads below) instead of caching it up
//!   front. When the two edges are adjacent on the face, the first half of
//!   the rewrite updates exactly the links the second half then reads, which
//!   is what makes that case come out closed.

use crate::geom::{cw_side, midpoint};
use crate::Vec2;

use super::store::Mesh;
use super::types::{EdgeId, FaceId, HedgeId, MeshError, VertexId};

/// Receipt for one completed [`Mesh::split_face`] call, naming everything the
/// call created or reshaped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceSplit {
    /// Midpoint vertex inserted on the first edge.
    pub mid1: VertexId,
    /// Midpoint vertex inserted on the second edge.
    pub mid2: VertexId,
    /// The split face, keeping its identity; its boundary now runs
    /// `… -> mid1 -> mid2 -> …` along the bridge.
    pub kept: FaceId,
    /// The face created on the other side of the bridge.
    pub created: FaceId,
    /// New edge `mid1 -> mid2` separating `kept` from `created`.
    pub bridge: EdgeId,
    /// Outer half of the first bisected edge; its primary runs from `mid1`
    /// along the boundary of `created`.
    pub outer1: EdgeId,
    /// Outer half of the second bisected edge; its primary runs along the
    /// boundary of `created` into `mid2`.
    pub outer2: EdgeId,
}

impl Mesh {
    /// Split a face by bisecting edges `e1` and `e2` and bridging the two
    /// midpoints.
    ///
    /// Which face gets split is not passed in; it is derived from the edges.
    /// Let M and N be the midpoints of `e1` and `e2` and P the midpoint of
    /// the segment MN. Each edge contributes the half-edge that has P
    /// strictly on its clockwise side (the twin when the primary does not,
    /// including the on-line case). Both chosen half-edges must then bound
    /// the same bounded face; that face is the one split.
    ///
    /// On success the mesh has gained two vertices (M, N), three edges (the
    /// bridge plus the outer halves of `e1` and `e2`), and one face, and both
    /// involved faces are anchored on the bridge. `e1` and `e2` keep their
    /// identities as the inner halves, shrunk to end at M respectively start
    /// at N.
    ///
    /// # Errors
    ///
    /// [`MeshError::UnknownEdge`] for an out-of-range id,
    /// [`MeshError::IdenticalEdges`] when `e1 == e2`, and
    /// [`MeshError::NoCommonFace`] when the chosen half-edges bound different
    /// faces or the exterior. The mesh is unchanged in every error case.
    pub fn split_face(&mut self, e1: EdgeId, e2: EdgeId) -> Result<FaceSplit, MeshError> {
        // Phase 1: validate and pick half-edges, without writing anything.
        if !self.contains_edge(e1) {
            return Err(MeshError::UnknownEdge(e1));
        }
        if !self.contains_edge(e2) {
            return Err(MeshError::UnknownEdge(e2));
        }
        if e1 == e2 {
            return Err(MeshError::IdenticalEdges(e1));
        }

        let (a, b) = self.hedge_points(self.edge(e1).hedge);
        let (c, d) = self.hedge_points(self.edge(e2).hedge);
        let m = midpoint(a, b);
        let n = midpoint(c, d);
        let p = midpoint(m, n);

        let h1 = self.oriented_toward(e1, a, b, p);
        let h2 = self.oriented_toward(e2, c, d, p);
        let kept = match (self.hedge(h1).face, self.hedge(h2).face) {
            (Some(f1), Some(f2)) if f1 == f2 => f1,
            _ => return Err(MeshError::NoCommonFace(e1, e2)),
        };

        // Phase 2: mutate. From here on the call cannot fail.
        self.edge_mut(e1).hedge = h1;
        self.edge_mut(e2).hedge = h2;

        let mid1 = self.add_vertex(m);
        let mid2 = self.add_vertex(n);

        // `am` is still A->B and `nd` still C->D; the names anticipate the
        // shrinks below.
        let am = h1;
        let nd = h2;
        let am_twin = self.hedge(am).twin;
        let nd_twin = self.hedge(nd).twin;
        let far1 = self.hedge(am_twin).face;
        let far2 = self.hedge(nd_twin).face;
        let created = self.add_face();

        // Bridge M->N. Both faces re-anchor onto it: the old anchor of
        // `kept` may be about to migrate to `created`.
        let bridge = self.add_edge(mid1, mid2, Some(kept), Some(created));
        let mn = self.edge(bridge).hedge;
        let nm = self.hedge(mn).twin;
        self.face_mut(kept).anchor = Some(mn);
        self.face_mut(created).anchor = Some(nm);

        // Shrink A->B into A->M and hook the bridge behind it.
        let outer_end1 = self.hedge(am).end;
        let old_next = self.hedge(am).next;
        let old_prev_twin = self.hedge(am_twin).prev;
        self.hedge_mut(am).end = mid1;
        self.hedge_mut(am_twin).start = mid1;
        self.hedge_mut(am).next = mn;
        self.hedge_mut(mn).prev = am;

        // Outer half M->B, wired into both cycles where A->B used to run.
        let outer1 = self.add_edge(mid1, outer_end1, Some(created), far1);
        let mb = self.edge(outer1).hedge;
        let bm = self.hedge(mb).twin;
        self.hedge_mut(mb).next = old_next;
        self.hedge_mut(old_next).prev = mb;
        self.hedge_mut(mb).prev = nm;
        self.hedge_mut(nm).next = mb;
        self.hedge_mut(bm).prev = old_prev_twin;
        self.hedge_mut(old_prev_twin).next = bm;
        self.hedge_mut(bm).next = am_twin;
        self.hedge_mut(am_twin).prev = bm;

        // Shrink C->D into N->D. `old_prev` and `old_next_twin` are read
        // now, not earlier: if e2 follows e1 on the face the writes above
        // already redirected them through M->B.
        let outer_start2 = self.hedge(nd).start;
        let old_prev = self.hedge(nd).prev;
        let old_next_twin = self.hedge(nd_twin).next;
        self.hedge_mut(nd).start = mid2;
        self.hedge_mut(nd_twin).end = mid2;
        self.hedge_mut(nd).prev = mn;
        self.hedge_mut(mn).next = nd;

        // Outer half C->N.
        let outer2 = self.add_edge(outer_start2, mid2, Some(created), far2);
        let cn = self.edge(outer2).hedge;
        let nc = self.hedge(cn).twin;
        self.hedge_mut(cn).prev = old_prev;
        self.hedge_mut(old_prev).next = cn;
        self.hedge_mut(cn).next = nm;
        self.hedge_mut(nm).prev = cn;
        self.hedge_mut(nc).next = old_next_twin;
        self.hedge_mut(old_next_twin).prev = nc;
        self.hedge_mut(nc).prev = nd_twin;
        self.hedge_mut(nd_twin).next = nc;

        // Migrate the boundary chain that ended up between M->B and C->N
        // onto the created face. C->N itself was created carrying it.
        let mut h = mb;
        while h != cn {
            self.hedge_mut(h).face = Some(created);
            h = self.hedge(h).next;
        }

        debug_assert_eq!(self.check_invariants(), Ok(()));

        Ok(FaceSplit {
            mid1,
            mid2,
            kept,
            created,
            bridge,
            outer1,
            outer2,
        })
    }

    /// The half-edge of `e` that has `p` strictly on its clockwise side; the
    /// twin when the primary does not, which includes `p` exactly on the
    /// carrying line.
    fn oriented_toward(&self, e: EdgeId, start: Vec2<f64>, end: Vec2<f64>, p: Vec2<f64>) -> HedgeId {
        let primary = self.edge(e).hedge;
        if cw_side(start, end, p) {
            primary
        } else {
            self.hedge(primary).twin
        }
    }
}
