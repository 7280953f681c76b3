//! square_detect - multi-pass square detection for single raster frames
//!
//! Each frame is smoothed once, then sliced into a Canny edge level and a
//! set of intensity bands. Every band is traced into contours, simplified
//! with Douglas-Peucker and tested for four convex, near-right-angle
//! corners. Accepted quadrilaterals are returned in discovery order.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Detection configuration and validation
pub mod config;
/// Square detection stages (edges, contours, polygons, classification)
pub mod detector;
/// One-slot frame handoff and the frame listener capability
pub mod handoff;
/// Core data structures (Point, BinaryMask, Contour, SquareCandidate, etc.)
pub mod models;
/// Channel x level pass driver
pub mod pipeline;
/// Overlay drawing for detected squares
pub mod render;
/// Image-file helpers for the CLI, benches and tests
pub mod tools;
/// Utility functions (smoothing, binarization, geometry)
pub mod utils;

pub use config::{ConfigError, SquareConfig};
pub use detector::{ContourRetrieval, Verdict};
pub use handoff::{FrameListener, FrameSlot};
pub use models::{BinaryMask, BoundingBox, Contour, Point, Polygon, SquareCandidate, SquareSet};
pub use render::SquareRenderer;

use image::{GrayImage, RgbImage};
use log::debug;

/// Detect squares in a grayscale frame with the default configuration.
///
/// # Example
/// ```
/// use image::{GrayImage, Luma};
///
/// let frame = GrayImage::from_pixel(64, 64, Luma([128]));
/// assert!(square_detect::detect(&frame).is_empty());
/// ```
pub fn detect(frame: &GrayImage) -> SquareSet {
    pipeline::detect(frame, &SquareConfig::default())
}

/// Configured square detector.
///
/// Holds only an immutable configuration, so one detector can be shared
/// across threads and reused for every frame.
#[derive(Debug, Clone, Default)]
pub struct SquareDetector {
    config: SquareConfig,
}

impl SquareDetector {
    /// Create a detector after validating `config`
    pub fn new(config: SquareConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &SquareConfig {
        &self.config
    }

    /// Detect squares in a grayscale frame
    pub fn detect(&self, frame: &GrayImage) -> SquareSet {
        pipeline::detect(frame, &self.config)
    }

    /// Detect squares using the R, G and B planes as separate channel samples
    pub fn detect_rgb(&self, frame: &RgbImage) -> SquareSet {
        pipeline::detect_rgb(frame, &self.config)
    }

    /// Detect squares in a raw row-major grayscale buffer.
    ///
    /// The buffer is copied before processing, so the caller may reuse it as
    /// soon as this returns. A buffer whose length is not `width * height`
    /// yields an empty set.
    ///
    /// # Arguments
    /// * `image` - Grayscale bytes (1 byte per pixel)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    pub fn detect_from_grayscale(&self, image: &[u8], width: usize, height: usize) -> SquareSet {
        let expected = width.checked_mul(height);
        let frame = match (u32::try_from(width), u32::try_from(height), expected) {
            (Ok(w), Ok(h), Some(len)) if len == image.len() => {
                GrayImage::from_raw(w, h, image.to_vec())
            }
            _ => None,
        };

        match frame {
            Some(frame) => self.detect(&frame),
            None => {
                debug!(
                    "buffer of {} bytes does not match {}x{}, skipping frame",
                    image.len(),
                    width,
                    height
                );
                SquareSet::new()
            }
        }
    }
}
