//! Core data structures shared by every detection stage

/// Binary masks produced per quantization level
pub mod mask;
/// Integer pixel coordinates
pub mod point;
/// Contours, polygons and accepted squares
pub mod square;

pub use mask::BinaryMask;
pub use point::Point;
pub use square::{BoundingBox, Contour, Polygon, SquareCandidate, SquareSet};
