//! Random simple polygons in 2D (radial jitter + replay tokens).
//!
//! Purpose
//! - Provide a small, deterministic sampler of clockwise polygon outlines
//!   for property tests and benches feeding [`Mesh::from_points`]
//!   (`crate::mesh::Mesh::from_points`).
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded angular
//!   and (optional) radial jitter, emit the points in descending-angle order
//!   so the outline winds clockwise. Jitter bounds keep the angles strictly
//!   sorted, so the polygon is star-shaped around the origin and therefore
//!   simple; with zero radial jitter all points lie on one circle and the
//!   polygon is strictly convex.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Vec2;

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radial jitter (relative amplitude). Radii = `base_radius * (1 + u)`,
    /// with `u∈[-radial_jitter, radial_jitter]`. Nonzero values give up
    /// convexity (the outline stays simple).
    pub radial_jitter: f64,
    /// Base radius of the outline around the origin.
    pub base_radius: f64,
    /// Random global phase in [0, 2π)?
    pub random_phase: bool,
}
impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.0,
            base_radius: 1.0,
            random_phase: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random simple clockwise polygon outline via radial jitter.
///
/// The result is always accepted by `Mesh::from_points`: at least three
/// points, pairwise-distinct neighbors, clockwise winding.
pub fn draw_polygon_radial(cfg: RadialCfg, tok: ReplayToken) -> Vec<Vec2<f64>> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng).max(3);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.max(0.0);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = 2.0 * std::f64::consts::PI / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * 2.0 * std::f64::consts::PI
    } else {
        0.0
    };
    let mut angles: Vec<f64> = (0..n)
        .map(|k| {
            let base = phase + (k as f64) * delta;
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            base + jitter
        })
        .collect();
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mut pts: Vec<Vector2<f64>> = angles
        .into_iter()
        .map(|th| {
            let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
            let r = (1.0 + u).max(1e-6) * r0;
            Vector2::new(th.cos() * r, th.sin() * r)
        })
        .collect();
    // Ascending angles wind counterclockwise; the mesh wants clockwise.
    pts.reverse();
    pts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{cw_side, cycle_signed_area};

    #[test]
    fn reproducible_draw() {
        let cfg = RadialCfg {
            vertex_count: VertexCount::Fixed(10),
            angle_jitter_frac: 0.2,
            radial_jitter: 0.1,
            base_radius: 1.0,
            random_phase: true,
        };
        let tok = ReplayToken { seed: 42, index: 7 };
        let p1 = draw_polygon_radial(cfg, tok);
        let p2 = draw_polygon_radial(cfg, tok);
        assert_eq!(p1.len(), p2.len());
        for (a, b) in p1.iter().zip(p2.iter()) {
            assert!((a - b).norm() < 1e-12);
        }
    }

    #[test]
    fn draws_wind_clockwise() {
        for index in 0..32 {
            let pts = draw_polygon_radial(RadialCfg::default(), ReplayToken { seed: 5, index });
            assert!(pts.len() >= 3);
            assert!(cycle_signed_area(&pts) < 0.0, "index {index}");
        }
    }

    #[test]
    fn unjittered_radius_gives_strictly_convex_outline() {
        let cfg = RadialCfg {
            vertex_count: VertexCount::Uniform { min: 4, max: 16 },
            ..RadialCfg::default()
        };
        for index in 0..16 {
            let pts = draw_polygon_radial(cfg, ReplayToken { seed: 11, index });
            let n = pts.len();
            for i in 0..n {
                let (a, b) = (pts[i], pts[(i + 1) % n]);
                for (j, &p) in pts.iter().enumerate() {
                    if j != i && j != (i + 1) % n {
                        assert!(cw_side(a, b, p), "index {index}, edge {i}, vertex {j}");
                    }
                }
            }
        }
    }
}
