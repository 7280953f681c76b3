use crate::models::{Contour, Point, Polygon};
use crate::utils::geometry::{arc_length, perpendicular_distance};

/// Perimeter-proportional Douglas-Peucker simplification of closed contours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonApproximator {
    epsilon_ratio: f64,
}

impl PolygonApproximator {
    /// Create an approximator allowing `epsilon_ratio * perimeter` deviation
    pub fn new(epsilon_ratio: f64) -> Self {
        Self { epsilon_ratio }
    }

    /// Simplify one contour
    pub fn approximate(&self, contour: &Contour) -> Polygon {
        approximate(contour, self.epsilon_ratio)
    }
}

impl Default for PolygonApproximator {
    fn default() -> Self {
        Self::new(0.02)
    }
}

/// Simplify a closed contour with tolerance `epsilon_ratio * perimeter`.
///
/// The curve is split at two mutually distant points and each half is
/// simplified independently. Output starts at the second split point (the
/// one farthest from the first) and follows contour order from there.
pub fn approximate(contour: &Contour, epsilon_ratio: f64) -> Polygon {
    let points = contour.points();
    if points.len() < 3 {
        return Polygon::new(points.to_vec());
    }

    let epsilon = epsilon_ratio * arc_length(points);
    let a = farthest_from(points, 0);
    let b = farthest_from(points, a);
    if a == b {
        return Polygon::new(vec![points[a]]);
    }

    let mut keep = vec![false; points.len()];
    keep[a] = true;
    keep[b] = true;
    mark_chain(points, a, b, epsilon, &mut keep);
    mark_chain(points, b, a, epsilon, &mut keep);

    let n = points.len();
    let vertices = (0..n)
        .map(|k| (b + k) % n)
        .filter(|&i| keep[i])
        .map(|i| points[i])
        .collect();
    Polygon::new(vertices)
}

fn farthest_from(points: &[Point], origin: usize) -> usize {
    let o = points[origin];
    let mut best = origin;
    let mut best_dist = 0.0;
    for (i, p) in points.iter().enumerate() {
        let d = p.distance(&o);
        if d > best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Iterative Douglas-Peucker over the cyclic run `start..=end`, flagging
/// kept indices in `keep`.
fn mark_chain(points: &[Point], start: usize, end: usize, epsilon: f64, keep: &mut [bool]) {
    let n = points.len();
    let span = (end + n - start) % n;
    let at = |k: usize| (start + k) % n;

    let mut stack = vec![(0usize, span)];
    while let Some((lo, hi)) = stack.pop() {
        if hi - lo < 2 {
            continue;
        }

        let a = points[at(lo)];
        let b = points[at(hi)];
        let mut dmax = 0.0;
        let mut index = lo;
        for k in lo + 1..hi {
            let d = perpendicular_distance(&points[at(k)], &a, &b);
            if d > dmax {
                index = k;
                dmax = d;
            }
        }

        if dmax > epsilon {
            keep[at(index)] = true;
            stack.push((lo, index));
            stack.push((index, hi));
        }
    }
}
