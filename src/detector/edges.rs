use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::morphology::dilate;

use crate::models::BinaryMask;
use crate::utils::binarization::{band_cutoff, threshold_binarize};

/// Canny low threshold at level 0. Kept near zero so weak edges merge.
pub const CANNY_LOW_THRESHOLD: f32 = 5.0;

/// Turns one smoothed channel sample into a binary mask per quantization level.
///
/// Level 0 runs Canny and dilates the result once with a 3x3 square so that
/// edge fragments broken by gradient shading close up. Levels above 0 use a
/// fixed intensity cutoff `(level + 1) * 255 / level_count`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeExtractor {
    level_count: u32,
    high_threshold: f32,
}

impl EdgeExtractor {
    /// Create an extractor for `level_count` bands with the given Canny high threshold
    pub fn new(level_count: u32, high_threshold: f32) -> Self {
        Self {
            level_count,
            high_threshold,
        }
    }

    /// Number of quantization levels, including the edge level
    pub fn level_count(&self) -> u32 {
        self.level_count
    }

    /// Mask for `level` of this extractor
    pub fn extract(&self, sample: &GrayImage, level: u32) -> BinaryMask {
        extract(sample, level, self.level_count, self.high_threshold)
    }
}

/// Mask for one `(sample, level)` pair.
pub fn extract(sample: &GrayImage, level: u32, level_count: u32, high_threshold: f32) -> BinaryMask {
    if sample.width() == 0 || sample.height() == 0 {
        return BinaryMask::new(sample.width(), sample.height());
    }
    if level == 0 {
        edge_mask(sample, high_threshold)
    } else {
        threshold_binarize(sample, band_cutoff(level, level_count))
    }
}

fn edge_mask(sample: &GrayImage, high_threshold: f32) -> BinaryMask {
    let high = high_threshold.max(CANNY_LOW_THRESHOLD);
    let edges = canny(sample, CANNY_LOW_THRESHOLD, high);
    // L-inf radius 1 is the 3x3 square element.
    BinaryMask::from_image(dilate(&edges, Norm::LInf, 1))
}
