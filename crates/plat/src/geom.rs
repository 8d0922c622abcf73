//! Scalar 2D helpers shared by the mesh and its callers.
//!
//! Everything here is a pure function over coordinates; the half-plane
//! predicate `cw_side` is the single geometric decision the subdivision
//! algorithms rely on.

use nalgebra::Vector2;

/// Signed area of the parallelogram spanned by vectors `a` and `b` in R².
/// Positive for a→b counterclockwise, negative otherwise.
#[inline]
pub fn parallelogram_area(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// True iff `p` lies strictly in the clockwise half-plane of the directed
/// edge `a`→`b`, i.e. the cross product of (a→p) and (a→b) is strictly
/// positive. Points exactly on the carrier line yield `false`; callers that
/// care about the boundary must treat "on the line" as outside.
///
/// Interiors of clockwise boundary cycles satisfy this predicate for every
/// directed edge of the cycle, which is what face classification builds on.
#[inline]
pub fn cw_side(a: Vector2<f64>, b: Vector2<f64>, p: Vector2<f64>) -> bool {
    parallelogram_area(p - a, b - a) > 0.0
}

/// Midpoint of the segment `a`–`b`.
#[inline]
pub fn midpoint(a: Vector2<f64>, b: Vector2<f64>) -> Vector2<f64> {
    (a + b) * 0.5
}

/// Shoelace sum over a closed point cycle: negative for clockwise
/// traversal, positive for counterclockwise, zero for degenerate input.
/// The value is twice the enclosed signed area.
pub fn cycle_signed_area(points: &[Vector2<f64>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        sum += parallelogram_area(points[i], points[(i + 1) % n]);
    }
    sum
}
