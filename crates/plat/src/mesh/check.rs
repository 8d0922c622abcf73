//! Structural validation of the whole subdivision.
//!
//! Purpose
//! - [`Mesh::check_invariants`] re-derives every property the builder and
//!   splitter are supposed to maintain and reports the first violation as a
//!   typed error naming the offending record.
//!
//! Why this design
//! - The mutating operations are pointer surgery on cyclic structure; a
//!   checker that walks everything turns "the relinking is correct" into one
//!   assertable call, used by the tests, the splitter's debug assertion, and
//!   the command-line `--check` flag.

use crate::geom::cycle_signed_area;
use crate::Vec2;

use super::store::Mesh;
use super::types::{FaceId, HedgeId, MeshError};

impl Mesh {
    /// Verify the full set of structural invariants.
    ///
    /// Checked, in order: twin links are symmetric with mirrored endpoints
    /// and a shared edge record; `next`/`prev` agree everywhere; every
    /// bounded face has an anchor whose cycle closes, consists exactly of
    /// half-edges labeled with that face, and runs clockwise; the remaining
    /// half-edges form one counterclockwise exterior cycle; no half-edge is
    /// left outside all cycles; and the Euler relation
    /// `V + F + 1 = E + 2` holds (counting the exterior as the `+ 1`).
    ///
    /// Read-only; `Ok(())` means the mesh is structurally sound.
    pub fn check_invariants(&self) -> Result<(), MeshError> {
        // Pairwise structure first, so the cycle walks below follow links
        // that are at least locally consistent.
        for (h, hedge) in self.hedges() {
            let twin = self.hedge(hedge.twin);
            if hedge.twin == h
                || twin.twin != h
                || twin.start != hedge.end
                || twin.end != hedge.start
                || twin.edge != hedge.edge
            {
                return Err(MeshError::BrokenTwin(h));
            }
            if self.hedge(hedge.next).prev != h || self.hedge(hedge.prev).next != h {
                return Err(MeshError::BrokenLink(h));
            }
        }

        let mut seen = vec![false; self.num_hedges()];

        for (f, face) in self.faces() {
            let anchor = face.anchor.ok_or(MeshError::MissingAnchor(f))?;
            if self.hedge(anchor).face != Some(f) {
                return Err(MeshError::StrayAnchor(f));
            }
            let cycle = self.collect_cycle(anchor, Some(f), &mut seen)?;
            if cycle_signed_area(&self.cycle_points(&cycle)) >= 0.0 {
                return Err(MeshError::FaceNotClockwise(f));
            }
        }

        // Whatever is not on a bounded cycle must be the one exterior cycle.
        let mut exterior: Option<Vec<HedgeId>> = None;
        let mut exterior_cycles = 0;
        for (h, hedge) in self.hedges() {
            if hedge.face.is_none() && !seen[h.0] {
                let cycle = self.collect_cycle(h, None, &mut seen)?;
                exterior_cycles += 1;
                exterior = Some(cycle);
            }
        }
        if exterior_cycles != 1 {
            return Err(MeshError::FragmentedExterior(exterior_cycles));
        }
        if let Some(cycle) = exterior {
            if cycle_signed_area(&self.cycle_points(&cycle)) <= 0.0 {
                return Err(MeshError::ExteriorNotCounterclockwise);
            }
        }

        if let Some(h) = seen.iter().position(|&s| !s) {
            return Err(MeshError::UnreachedHedge(HedgeId(h)));
        }

        let (v, f, e) = (self.num_vertices(), self.num_faces(), self.num_edges());
        if v + f + 1 != e + 2 {
            return Err(MeshError::EulerViolation {
                vertices: v,
                faces: f,
                edges: e,
            });
        }

        Ok(())
    }

    /// Walk the `next` cycle from `start`, marking members in `seen` and
    /// requiring every member to carry `label`. Bounded by the total
    /// half-edge count so it terminates on any input.
    fn collect_cycle(
        &self,
        start: HedgeId,
        label: Option<FaceId>,
        seen: &mut [bool],
    ) -> Result<Vec<HedgeId>, MeshError> {
        let mut cycle = Vec::new();
        let mut h = start;
        loop {
            if cycle.len() == self.num_hedges() {
                return Err(MeshError::UnclosedCycle(start));
            }
            let found = self.hedge(h).face;
            if found != label {
                return Err(MeshError::ForeignHedge {
                    hedge: h,
                    face: label,
                    found,
                });
            }
            seen[h.0] = true;
            cycle.push(h);
            h = self.hedge(h).next;
            if h == start {
                return Ok(cycle);
            }
        }
    }

    fn cycle_points(&self, cycle: &[HedgeId]) -> Vec<Vec2<f64>> {
        cycle.iter().map(|&h| self.pos(self.hedge(h).start)).collect()
    }
}
