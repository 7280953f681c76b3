//! Geometry helpers for polygon classification and simplification

use crate::models::Point;

/// Guards the cosine denominator against zero-length edges
pub const COSINE_EPSILON: f64 = 1e-10;

/// Signed shoelace area of a closed polygon.
///
/// Positive for counter-clockwise traversal in a y-up frame (clockwise on
/// screen), negative otherwise. Fewer than 3 points have zero area.
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64
        })
        .sum();
    twice * 0.5
}

/// Perimeter of a closed curve (last point joins back to the first)
pub fn arc_length(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let n = points.len();
    (0..n)
        .map(|i| points[i].distance(&points[(i + 1) % n]))
        .sum()
}

/// True if the closed polygon turns the same way at every vertex.
///
/// A zero turn (collinear neighbours or a repeated vertex) counts as
/// non-convex, as do polygons with fewer than 3 vertices.
pub fn is_convex(points: &[Point]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }

    let mut sign = 0.0f64;
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let curr = points[i];
        let next = points[(i + 1) % n];
        let turn = curr.sub(&prev).cross(&next.sub(&curr));
        if turn == 0.0 {
            return false;
        }
        if sign == 0.0 {
            sign = turn.signum();
        } else if turn.signum() != sign {
            return false;
        }
    }
    true
}

/// Cosine of the angle at `vertex` between the edges towards `a` and `b`.
///
/// Degenerate edges do not fault: the epsilon in the denominator keeps the
/// result finite (and zero when either edge has zero length).
pub fn angle_cosine(a: &Point, b: &Point, vertex: &Point) -> f64 {
    let v1 = a.sub(vertex);
    let v2 = b.sub(vertex);
    v1.dot(&v2) / (v1.norm() * v2.norm() + COSINE_EPSILON)
}

/// Largest |cosine| over all interior angles of a closed polygon
pub fn max_abs_cosine(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            angle_cosine(&prev, &next, &points[i]).abs()
        })
        .fold(0.0, f64::max)
}

/// Distance from `p` to the infinite line through `a` and `b`
pub fn perpendicular_distance(p: &Point, a: &Point, b: &Point) -> f64 {
    let ab = b.sub(a);
    let mag = ab.norm();
    if mag < 1e-9 {
        return p.distance(a);
    }
    ab.cross(&p.sub(a)).abs() / mag
}
