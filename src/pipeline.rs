//! Multi-pass driver: channel samples x quantization levels.

use image::{GrayImage, RgbImage};
use log::{debug, trace};
use rayon::prelude::*;

use crate::config::SquareConfig;
use crate::detector::classifier::SquareClassifier;
use crate::detector::contour::ContourFinder;
use crate::detector::edges::EdgeExtractor;
use crate::detector::polygon::PolygonApproximator;
use crate::models::{SquareCandidate, SquareSet};
use crate::utils::filter::{median_blur, split_planes};

/// Stage objects shared by every pass of one frame.
struct Stages {
    edges: EdgeExtractor,
    contours: ContourFinder,
    polygons: PolygonApproximator,
    classifier: SquareClassifier,
}

impl Stages {
    fn from_config(config: &SquareConfig) -> Self {
        Self {
            edges: EdgeExtractor::new(config.level_count, config.high_threshold),
            contours: ContourFinder::new(config.retrieval),
            polygons: PolygonApproximator::new(config.epsilon_ratio),
            classifier: SquareClassifier::new(config.area_threshold, config.angle_cosine_threshold),
        }
    }

    /// One (sample, level) pass: mask -> contours -> polygons -> accepted squares
    fn run_pass(&self, sample: &GrayImage, channel: usize, level: u32) -> Vec<SquareCandidate> {
        let mask = self.edges.extract(sample, level);
        let contours = self.contours.find(&mask);

        let mut accepted = Vec::new();
        for contour in &contours {
            let polygon = self.polygons.approximate(contour);
            match self.classifier.accept(&polygon) {
                Ok(candidate) => {
                    trace!("channel {} level {}: accepted {:?}", channel, level, candidate.vertices());
                    accepted.push(candidate);
                }
                Err(verdict) => trace!("channel {} level {}: rejected {:?}", channel, level, verdict),
            }
        }

        trace!(
            "channel {} level {}: {} contours, {} squares",
            channel,
            level,
            contours.len(),
            accepted.len()
        );
        accepted
    }
}

/// Detect squares in a grayscale frame.
///
/// The frame is smoothed once; each of `channel_passes` samples is that same
/// smoothed image, so every candidate is reported once per pass.
pub fn detect(frame: &GrayImage, config: &SquareConfig) -> SquareSet {
    if frame.width() == 0 || frame.height() == 0 {
        debug!("empty frame {}x{}, nothing to detect", frame.width(), frame.height());
        return SquareSet::new();
    }

    let smoothed = median_blur(frame, config.blur_kernel_size);
    let samples: Vec<&GrayImage> = (0..config.channel_passes).map(|_| &smoothed).collect();
    run_samples(&samples, config)
}

/// Detect squares in an RGB frame using its R, G and B planes as the
/// channel samples. Each plane is smoothed once.
pub fn detect_rgb(frame: &RgbImage, config: &SquareConfig) -> SquareSet {
    if frame.width() == 0 || frame.height() == 0 {
        debug!("empty frame {}x{}, nothing to detect", frame.width(), frame.height());
        return SquareSet::new();
    }

    let planes: Vec<GrayImage> = split_planes(frame)
        .iter()
        .map(|plane| median_blur(plane, config.blur_kernel_size))
        .collect();
    let samples: Vec<&GrayImage> = planes.iter().collect();
    run_samples(&samples, config)
}

fn run_samples(samples: &[&GrayImage], config: &SquareConfig) -> SquareSet {
    let stages = Stages::from_config(config);
    let passes: Vec<(usize, u32)> = (0..samples.len())
        .flat_map(|c| (0..config.level_count).map(move |l| (c, l)))
        .collect();

    // Collecting an indexed parallel iterator keeps pass order.
    let per_pass: Vec<Vec<SquareCandidate>> = if config.parallel {
        passes
            .par_iter()
            .map(|&(c, l)| stages.run_pass(samples[c], c, l))
            .collect()
    } else {
        passes
            .iter()
            .map(|&(c, l)| stages.run_pass(samples[c], c, l))
            .collect()
    };

    let mut squares = SquareSet::new();
    for found in per_pass {
        squares.extend(found);
    }

    debug!(
        "{} passes ({} samples x {} levels): {} squares",
        passes.len(),
        samples.len(),
        config.level_count,
        squares.len()
    );
    squares
}
