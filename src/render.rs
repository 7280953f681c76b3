//! Overlay drawing for detected squares.

use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

use crate::models::{SquareCandidate, SquareSet};

/// Draws accepted squares as closed polylines.
///
/// Candidates whose first vertex lies within `border_margin` of the top or
/// left edge are skipped. Those are usually the frame border picked up by a
/// threshold level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareRenderer {
    /// First-vertex suppression margin in pixels
    pub border_margin: u32,
    /// Line color
    pub color: Rgb<u8>,
    /// Line width in pixels
    pub thickness: u32,
}

impl Default for SquareRenderer {
    fn default() -> Self {
        Self {
            border_margin: 3,
            color: Rgb([0, 255, 0]),
            thickness: 3,
        }
    }
}

impl SquareRenderer {
    /// True if the candidate passes the border heuristic
    pub fn is_visible(&self, candidate: &SquareCandidate) -> bool {
        let first = candidate.first_vertex();
        let margin = i64::from(self.border_margin);
        i64::from(first.x) > margin && i64::from(first.y) > margin
    }

    /// Draw every visible candidate onto `canvas`; returns how many were drawn.
    pub fn render(&self, canvas: &mut RgbImage, squares: &SquareSet) -> usize {
        let mut drawn = 0;
        for candidate in squares.iter().filter(|c| self.is_visible(c)) {
            self.draw_outline(canvas, candidate);
            drawn += 1;
        }
        drawn
    }

    /// Render onto an RGB copy of a grayscale frame
    pub fn render_gray(&self, frame: &GrayImage, squares: &SquareSet) -> RgbImage {
        let mut canvas = RgbImage::from_fn(frame.width(), frame.height(), |x, y| {
            let v = frame.get_pixel(x, y)[0];
            Rgb([v, v, v])
        });
        self.render(&mut canvas, squares);
        canvas
    }

    fn draw_outline(&self, canvas: &mut RgbImage, candidate: &SquareCandidate) {
        let v = candidate.vertices();
        let t = self.thickness.max(1) as i32;
        let (lo, hi) = (-(t - 1) / 2, t / 2);

        for i in 0..v.len() {
            let a = v[i];
            let b = v[(i + 1) % v.len()];
            // Thick line as a bundle of offset one-pixel segments
            for oy in lo..=hi {
                for ox in lo..=hi {
                    draw_line_segment_mut(
                        canvas,
                        ((a.x + ox) as f32, (a.y + oy) as f32),
                        ((b.x + ox) as f32, (b.y + oy) as f32),
                        self.color,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::classifier::SquareClassifier;
    use crate::models::{Point, Polygon};

    fn candidate(pts: [(i32, i32); 4]) -> SquareCandidate {
        let poly = Polygon::new(pts.iter().map(|&(x, y)| Point::new(x, y)).collect());
        SquareClassifier::default().accept(&poly).unwrap()
    }

    fn set_of(cands: &[SquareCandidate]) -> SquareSet {
        let mut set = SquareSet::new();
        set.extend(cands.iter().copied());
        set
    }

    #[test]
    fn test_border_heuristic() {
        let r = SquareRenderer::default();
        assert!(r.is_visible(&candidate([(10, 10), (10, 60), (60, 60), (60, 10)])));
        assert!(!r.is_visible(&candidate([(3, 10), (3, 60), (60, 60), (60, 10)])));
        assert!(!r.is_visible(&candidate([(10, 2), (10, 60), (60, 60), (60, 2)])));
        // Only the first vertex matters
        assert!(r.is_visible(&candidate([(50, 10), (50, 70), (0, 70), (0, 10)])));
        assert!(r.is_visible(&candidate([(60, 10), (10, 10), (10, 60), (60, 60)])));
    }

    #[test]
    fn test_render_counts_and_draws() {
        let r = SquareRenderer::default();
        let squares = set_of(&[
            candidate([(10, 10), (10, 60), (60, 60), (60, 10)]),
            candidate([(1, 1), (1, 60), (60, 60), (60, 1)]),
        ]);
        let mut canvas = RgbImage::new(80, 80);
        assert_eq!(r.render(&mut canvas, &squares), 1);

        // Edge pixel and its thickness neighbours are green
        assert_eq!(*canvas.get_pixel(10, 30), Rgb([0, 255, 0]));
        assert_eq!(*canvas.get_pixel(11, 30), Rgb([0, 255, 0]));
        assert_eq!(*canvas.get_pixel(9, 30), Rgb([0, 255, 0]));
        // Interior untouched
        assert_eq!(*canvas.get_pixel(35, 35), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_render_gray_keeps_background() {
        let frame = GrayImage::from_pixel(40, 40, image::Luma([77]));
        let out = SquareRenderer::default().render_gray(&frame, &SquareSet::new());
        assert!(out.pixels().all(|p| *p == Rgb([77, 77, 77])));
    }
}
