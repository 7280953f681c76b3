use serde::Serialize;

use super::Point;
use crate::utils::geometry::signed_area;

/// Closed boundary traced from a binary mask, direction-change vertices only
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contour {
    points: Vec<Point>,
}

impl Contour {
    /// Create a contour from ordered boundary points
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Ordered boundary points
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of stored points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the contour holds no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Simplified contour; vertex count is unconstrained
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Create a polygon from ordered vertices
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Ordered vertices
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True if the polygon holds no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(vertices: Vec<Point>) -> Self {
        Self::new(vertices)
    }
}

/// Axis-aligned bounds of a candidate, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    /// Smallest x
    pub min_x: i32,
    /// Smallest y
    pub min_y: i32,
    /// Largest x
    pub max_x: i32,
    /// Largest y
    pub max_y: i32,
}

/// A 4-vertex polygon that passed the area, convexity and angle tests.
///
/// Vertex order is the order produced by polygon approximation and is kept
/// stable for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SquareCandidate {
    vertices: [Point; 4],
}

impl SquareCandidate {
    /// Only the classifier builds candidates, so every instance is accepted geometry.
    pub(crate) fn new(vertices: [Point; 4]) -> Self {
        Self { vertices }
    }

    /// The four vertices in traversal order
    pub fn vertices(&self) -> &[Point; 4] {
        &self.vertices
    }

    /// First vertex, used by the renderer's border heuristic
    pub fn first_vertex(&self) -> Point {
        self.vertices[0]
    }

    /// Signed shoelace area; sign follows traversal direction
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.vertices)
    }

    /// Mean of the four vertices
    pub fn centroid(&self) -> (f64, f64) {
        let (sx, sy) = self
            .vertices
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x as f64, sy + p.y as f64));
        (sx / 4.0, sy / 4.0)
    }

    /// Axis-aligned bounds of the vertices
    pub fn bounding_box(&self) -> BoundingBox {
        let first = self.vertices[0];
        self.vertices.iter().skip(1).fold(
            BoundingBox {
                min_x: first.x,
                min_y: first.y,
                max_x: first.x,
                max_y: first.y,
            },
            |b, p| BoundingBox {
                min_x: b.min_x.min(p.x),
                min_y: b.min_y.min(p.y),
                max_x: b.max_x.max(p.x),
                max_y: b.max_y.max(p.y),
            },
        )
    }
}

/// Ordered candidates found in one frame. Not deduplicated across passes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SquareSet {
    squares: Vec<SquareCandidate>,
}

impl SquareSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, candidate: SquareCandidate) {
        self.squares.push(candidate);
    }

    pub(crate) fn extend<I: IntoIterator<Item = SquareCandidate>>(&mut self, iter: I) {
        self.squares.extend(iter);
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// True if nothing was detected
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Iterate candidates in detection order
    pub fn iter(&self) -> std::slice::Iter<'_, SquareCandidate> {
        self.squares.iter()
    }

    /// Borrow the candidates as a slice
    pub fn as_slice(&self) -> &[SquareCandidate] {
        &self.squares
    }

    /// Consume the set and return the candidates
    pub fn into_vec(self) -> Vec<SquareCandidate> {
        self.squares
    }
}

impl IntoIterator for SquareSet {
    type Item = SquareCandidate;
    type IntoIter = std::vec::IntoIter<SquareCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.squares.into_iter()
    }
}

impl<'a> IntoIterator for &'a SquareSet {
    type Item = &'a SquareCandidate;
    type IntoIter = std::slice::Iter<'a, SquareCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.squares.iter()
    }
}
