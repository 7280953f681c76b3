use image::GrayImage;

use crate::models::BinaryMask;

/// Intensity cutoff for quantization band `level` out of `level_count`.
///
/// Integer arithmetic: `(level + 1) * 255 / level_count`, saturated to 255.
pub fn band_cutoff(level: u32, level_count: u32) -> u8 {
    if level_count == 0 {
        return u8::MAX;
    }
    let cutoff = (level as u64 + 1) * 255 / level_count as u64;
    cutoff.min(u8::MAX as u64) as u8
}

/// Simple global threshold binarization.
/// Foreground (255) where `gray >= cutoff`, background elsewhere.
pub fn threshold_binarize(gray: &GrayImage, cutoff: u8) -> BinaryMask {
    BinaryMask::from_predicate(gray, |v| v >= cutoff)
}
