//! Image-file helpers shared by the CLI, benches and tests

use crate::config::ConfigError;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, RgbImage};

/// Errors from the image-file driver.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Image could not be decoded or encoded
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    /// Filesystem failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Dataset directory holds no images
    #[error("no images found under {0}")]
    EmptyDataset(PathBuf),
}

/// Load an image file as 8-bit grayscale.
pub fn load_gray<P: AsRef<Path>>(path: P) -> Result<GrayImage, ToolError> {
    Ok(image::open(path)?.to_luma8())
}

/// Load an image file as 8-bit RGB.
pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<RgbImage, ToolError> {
    Ok(image::open(path)?.to_rgb8())
}

/// Default dataset root from environment variables.
pub fn dataset_root_from_env() -> PathBuf {
    env::var("SQUARE_DATASET_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("benches/images"))
}

/// Default bench limit from environment variables.
///
/// Returns `None` (full dataset) when `SQUARE_BENCH_LIMIT` is unset, `0` or
/// not a number.
pub fn bench_limit_from_env() -> Option<usize> {
    parse_limit(env::var("SQUARE_BENCH_LIMIT").ok().as_deref())
}

fn parse_limit(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&v| v != 0)
}

/// Sorted image paths under `root`, optionally truncated to `limit`.
pub fn dataset_iter<P: AsRef<Path>>(root: P, limit: Option<usize>) -> impl Iterator<Item = PathBuf> {
    let mut images = collect_images(root.as_ref());
    images.sort();
    if let Some(limit) = limit {
        images.truncate(limit);
    }
    images.into_iter()
}

fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if is_image(&path) {
                images.push(path);
            }
        }
    }

    images
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "bmp"))
}
