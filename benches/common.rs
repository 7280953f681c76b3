#![allow(dead_code)]

use image::{GrayImage, Luma};
use square_detect::tools::{bench_limit_from_env, dataset_iter, dataset_root_from_env};
use std::path::PathBuf;

pub fn collect_dataset_images() -> (PathBuf, Vec<PathBuf>) {
    let root = dataset_root_from_env();
    let limit = bench_limit_from_env();

    let images: Vec<PathBuf> = dataset_iter(&root, limit).collect();
    (root, images)
}

/// Gradient background with a grid of bright squares, roughly what a
/// marker board looks like after grayscale conversion.
pub fn synthetic_board(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let cell_x = x % 120;
        let cell_y = y % 120;
        if (30..90).contains(&cell_x) && (30..90).contains(&cell_y) {
            Luma([230])
        } else {
            Luma([((x + y) / 16 % 64) as u8 + 20])
        }
    })
}
