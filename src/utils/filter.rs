//! Once-per-frame smoothing applied before any channel/level pass.

use image::{GrayImage, RgbImage};
use imageproc::filter::median_filter;

/// Median blur with a square `kernel_size` x `kernel_size` window.
///
/// `kernel_size` must be odd; 1 (or 0) returns an unmodified copy. Borders
/// replicate the nearest edge pixel.
pub fn median_blur(image: &GrayImage, kernel_size: u32) -> GrayImage {
    let radius = kernel_size.saturating_sub(1) / 2;
    if radius == 0 || image.width() == 0 || image.height() == 0 {
        return image.clone();
    }
    median_filter(image, radius, radius)
}

/// Split an RGB image into its three planes (R, G, B order)
pub fn split_planes(image: &RgbImage) -> [GrayImage; 3] {
    let (w, h) = image.dimensions();
    let plane = |c: usize| GrayImage::from_fn(w, h, |x, y| image::Luma([image.get_pixel(x, y)[c]]));
    [plane(0), plane(1), plane(2)]
}
