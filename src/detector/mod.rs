//! Square detection stages
//!
//! Each stage handles one step of the per-pass pipeline:
//! - Edge / threshold extraction (channel sample -> binary mask)
//! - Contour tracing (binary mask -> compressed boundary chains)
//! - Polygon approximation (chain -> low-vertex polygon)
//! - Square classification (polygon -> accept / reject)

/// Square-likeness tests: vertex count, area, convexity, corner angles
pub mod classifier;
/// Border following and chain compression
pub mod contour;
/// Canny and quantization-band masks
pub mod edges;
/// Closed Douglas-Peucker simplification
pub mod polygon;

pub use classifier::{SquareClassifier, Verdict};
pub use contour::{ContourFinder, ContourRetrieval};
pub use edges::EdgeExtractor;
pub use polygon::PolygonApproximator;
