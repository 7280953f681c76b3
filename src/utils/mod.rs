//! Utility functions for image processing
//!
//! This module provides helper functions for square detection:
//! - Smoothing (median blur) and RGB plane splitting
//! - Quantization-band binarization
//! - Geometry (signed area, perimeter, convexity, angle cosines)

/// Intensity-band thresholding
pub mod binarization;
/// Median blur and plane splitting
pub mod filter;
/// Area, perimeter, convexity and angle helpers
pub mod geometry;
