use image::{GrayImage, Luma};
use imageproc::contours::{BorderType, find_contours};
use serde::{Deserialize, Serialize};

use crate::models::{BinaryMask, Contour, Point};

/// Which traced borders are kept. No hierarchy is returned in either mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContourRetrieval {
    /// Outer borders of every connected foreground region
    #[default]
    Outer,
    /// Outer borders plus the borders of holes inside regions
    All,
}

/// Traces closed region boundaries in a binary mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContourFinder {
    retrieval: ContourRetrieval,
}

impl ContourFinder {
    /// Create a finder with the given retrieval mode
    pub fn new(retrieval: ContourRetrieval) -> Self {
        Self { retrieval }
    }

    /// Trace borders with Suzuki-Abe border following and compress each
    /// chain to its direction-change vertices.
    ///
    /// Regions touching the image edge are traced as if the frame were
    /// surrounded by background. A uniform mask (all background or all
    /// foreground) yields nothing.
    pub fn find(&self, mask: &BinaryMask) -> Vec<Contour> {
        if mask.is_uniform() {
            return Vec::new();
        }

        let (max_x, max_y) = (mask.width() as i32 - 1, mask.height() as i32 - 1);
        find_contours::<i32>(&padded(mask))
            .into_iter()
            .filter(|c| match self.retrieval {
                ContourRetrieval::Outer => matches!(c.border_type, BorderType::Outer),
                ContourRetrieval::All => true,
            })
            .map(|c| {
                let points: Vec<Point> = c
                    .points
                    .into_iter()
                    .map(|p| Point::new((p.x - 1).clamp(0, max_x), (p.y - 1).clamp(0, max_y)))
                    .collect();
                Contour::new(compress_chain(points))
            })
            .filter(|c| !c.is_empty())
            .collect()
    }
}

/// Copy of the mask with a one-pixel background border. Border following
/// only opens an outer border where a background pixel precedes the region
/// in its row, so column 0 needs one.
fn padded(mask: &BinaryMask) -> GrayImage {
    let (w, h) = (mask.width(), mask.height());
    GrayImage::from_fn(w + 2, h + 2, |x, y| {
        if x == 0 || y == 0 || x > w || y > h {
            Luma([0])
        } else {
            Luma([mask.as_image().get_pixel(x - 1, y - 1)[0]])
        }
    })
}

/// Keep only the vertices where a closed 8-connected chain changes direction.
pub fn compress_chain(mut points: Vec<Point>) -> Vec<Point> {
    points.dedup();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    let n = points.len();
    if n < 3 {
        return points;
    }

    (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let curr = points[i];
            let next = points[(i + 1) % n];
            curr.sub(&prev) != next.sub(&curr)
        })
        .map(|i| points[i])
        .collect()
}
