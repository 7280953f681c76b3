use crate::models::{Point, Polygon, SquareCandidate};
use crate::utils::geometry::{is_convex, max_abs_cosine, signed_area};

/// Outcome of running a polygon through the square tests, in test order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Vertex count was not 4
    WrongVertexCount(usize),
    /// |signed area| did not exceed the area threshold
    TooSmall {
        /// Absolute area of the polygon
        area: f64,
    },
    /// Turn directions disagree (or a turn is zero)
    NotConvex,
    /// Some interior angle strays too far from 90 degrees
    Skewed {
        /// Largest |cosine| over the four corners
        max_cosine: f64,
    },
    /// All tests passed
    Accepted {
        /// Largest |cosine| over the four corners
        max_cosine: f64,
    },
}

impl Verdict {
    /// True for [`Verdict::Accepted`]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }
}

/// Decides whether a simplified contour is "square enough".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareClassifier {
    area_threshold: f64,
    angle_cosine_threshold: f64,
}

impl SquareClassifier {
    /// Create a classifier with explicit thresholds
    pub fn new(area_threshold: f64, angle_cosine_threshold: f64) -> Self {
        Self {
            area_threshold,
            angle_cosine_threshold,
        }
    }

    /// Run every test and report which one decided the outcome.
    ///
    /// Tests short-circuit: a polygon without exactly 4 vertices never
    /// reaches the area, convexity or angle tests.
    pub fn evaluate(&self, polygon: &Polygon) -> Verdict {
        let vertices = polygon.vertices();
        if vertices.len() != 4 {
            return Verdict::WrongVertexCount(vertices.len());
        }

        let area = signed_area(vertices).abs();
        if area <= self.area_threshold {
            return Verdict::TooSmall { area };
        }

        if !is_convex(vertices) {
            return Verdict::NotConvex;
        }

        let max_cosine = max_abs_cosine(vertices);
        if max_cosine < self.angle_cosine_threshold {
            Verdict::Accepted { max_cosine }
        } else {
            Verdict::Skewed { max_cosine }
        }
    }

    /// True if `polygon` passes all tests
    pub fn classify(&self, polygon: &Polygon) -> bool {
        self.evaluate(polygon).is_accepted()
    }

    /// Promote an accepted polygon to a candidate, keeping its vertex order.
    /// Rejections return the deciding verdict.
    pub fn accept(&self, polygon: &Polygon) -> Result<SquareCandidate, Verdict> {
        match self.evaluate(polygon) {
            Verdict::Accepted { .. } => {
                let v: &[Point] = polygon.vertices();
                Ok(SquareCandidate::new([v[0], v[1], v[2], v[3]]))
            }
            rejected => Err(rejected),
        }
    }
}

impl Default for SquareClassifier {
    fn default() -> Self {
        Self::new(1000.0, 0.3)
    }
}

/// Free-function form of [`SquareClassifier::classify`].
pub fn classify(polygon: &Polygon, area_threshold: f64, angle_cosine_threshold: f64) -> bool {
    SquareClassifier::new(area_threshold, angle_cosine_threshold).classify(polygon)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(pts: &[(i32, i32)]) -> Polygon {
        Polygon::new(pts.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    fn good_square() -> Polygon {
        poly(&[(150, 150), (150, 250), (250, 250), (250, 150)])
    }

    #[test]
    fn test_accepts_axis_aligned_square() {
        let c = SquareClassifier::default();
        assert_eq!(c.evaluate(&good_square()), Verdict::Accepted { max_cosine: 0.0 });
        assert!(classify(&good_square(), 1000.0, 0.3));
    }

    #[test]
    fn test_accepts_rotated_square() {
        let diamond = poly(&[(100, 40), (160, 100), (100, 160), (40, 100)]);
        assert!(SquareClassifier::default().classify(&diamond));
    }

    #[test]
    fn test_accepts_clockwise_and_counter_clockwise() {
        let mut p = good_square().vertices().to_vec();
        p.reverse();
        assert!(SquareClassifier::default().classify(&Polygon::new(p)));
    }

    #[test]
    fn test_rejects_wrong_vertex_count() {
        let c = SquareClassifier::default();
        let tri = poly(&[(0, 0), (200, 0), (0, 200)]);
        assert_eq!(c.evaluate(&tri), Verdict::WrongVertexCount(3));
        let penta = poly(&[(0, 0), (100, 0), (150, 80), (50, 150), (-50, 80)]);
        assert_eq!(c.evaluate(&penta), Verdict::WrongVertexCount(5));
        assert_eq!(c.evaluate(&Polygon::default()), Verdict::WrongVertexCount(0));
    }

    #[test]
    fn test_rejects_small_area_only() {
        // 30x30 square is otherwise perfect
        let small = poly(&[(0, 0), (0, 30), (30, 30), (30, 0)]);
        let c = SquareClassifier::default();
        assert_eq!(c.evaluate(&small), Verdict::TooSmall { area: 900.0 });
        assert!(SquareClassifier::new(800.0, 0.3).classify(&small));
    }

    #[test]
    fn test_area_threshold_is_exclusive() {
        let exact = poly(&[(0, 0), (0, 40), (25, 40), (25, 0)]);
        assert!(!SquareClassifier::new(1000.0, 0.3).classify(&exact));
        assert!(SquareClassifier::new(999.0, 0.3).classify(&exact));
    }

    #[test]
    fn test_rejects_non_convex_only() {
        // Large dart: area well above threshold, turn directions disagree
        let dart = poly(&[(0, 0), (200, 100), (0, 200), (60, 100)]);
        assert_eq!(SquareClassifier::default().evaluate(&dart), Verdict::NotConvex);
    }

    #[test]
    fn test_rejects_skewed_only() {
        // Parallelogram with 60/120 degree corners
        let skewed = poly(&[(0, 0), (100, 0), (150, 87), (50, 87)]);
        match SquareClassifier::default().evaluate(&skewed) {
            Verdict::Skewed { max_cosine } => assert!((max_cosine - 0.5).abs() < 0.01),
            other => panic!("expected Skewed, got {other:?}"),
        }
        // Loosening the angle threshold flips it
        assert!(SquareClassifier::new(1000.0, 0.6).classify(&skewed));
    }

    #[test]
    fn test_repeated_vertex_never_faults() {
        let degenerate = poly(&[(0, 0), (0, 0), (100, 100), (0, 100)]);
        let v = SquareClassifier::new(0.0, 0.3).evaluate(&degenerate);
        assert!(!v.is_accepted());
    }

    #[test]
    fn test_accept_keeps_vertex_order() {
        let sq = good_square();
        let cand = SquareClassifier::default().accept(&sq).unwrap();
        assert_eq!(&cand.vertices()[..], sq.vertices());
        assert_eq!(
            SquareClassifier::default().accept(&poly(&[(0, 0), (1, 1), (2, 0)])),
            Err(Verdict::WrongVertexCount(3))
        );
    }
}
