use serde::{Deserialize, Serialize};

/// Integer pixel coordinate, also used as a 2D edge vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (column)
    pub x: i32,
    /// Y coordinate (row)
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Vector from `other` to `self`
    pub fn sub(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Dot product of two vectors, widened to f64
    pub fn dot(&self, other: &Point) -> f64 {
        self.x as f64 * other.x as f64 + self.y as f64 * other.y as f64
    }

    /// Z component of the cross product of two vectors
    pub fn cross(&self, other: &Point) -> f64 {
        self.x as f64 * other.y as f64 - self.y as f64 * other.x as f64
    }

    /// Euclidean length of the vector
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Calculate distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        self.sub(other).norm()
    }
}

impl From<imageproc::point::Point<i32>> for Point {
    fn from(p: imageproc::point::Point<i32>) -> Self {
        Self::new(p.x, p.y)
    }
}
