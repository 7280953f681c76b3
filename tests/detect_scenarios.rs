//! End-to-end detection scenarios on synthetic frames
//!
//! These cover the full pass loop: smoothing, edge and threshold levels,
//! contour tracing, simplification, classification and the render-time
//! border filter.

use image::{GrayImage, Luma, RgbImage};
use square_detect::detector::classifier::SquareClassifier;
use square_detect::models::Polygon;
use square_detect::{
    FrameListener, FrameSlot, SquareConfig, SquareDetector, SquareRenderer, SquareSet, detect,
};

fn frame_with_square(size: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> GrayImage {
    GrayImage::from_fn(size, size, |x, y| {
        if (x0..=x1).contains(&x) && (y0..=y1).contains(&y) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

fn near(actual: i32, expected: i32, tolerance: f64) -> bool {
    ((actual - expected) as f64).abs() <= tolerance
}

#[test]
fn test_centered_square_is_found() {
    let frame = frame_with_square(400, 150, 150, 250, 250);
    let squares = detect(&frame);
    assert!(!squares.is_empty(), "expected at least one square");

    let tolerance = 0.02 * 400.0;
    let matching = squares.iter().filter(|s| {
        let b = s.bounding_box();
        near(b.min_x, 150, tolerance)
            && near(b.min_y, 150, tolerance)
            && near(b.max_x, 250, tolerance)
            && near(b.max_y, 250, tolerance)
    });
    assert!(matching.count() >= 1);

    // Everything drawn: no candidate starts near the origin corner
    let mut canvas = RgbImage::new(400, 400);
    assert_eq!(SquareRenderer::default().render(&mut canvas, &squares), squares.len());
}

#[test]
fn test_corner_square_is_detected_but_not_drawn() {
    let frame = frame_with_square(400, 2, 2, 102, 102);
    let squares = detect(&frame);
    assert!(!squares.is_empty(), "classifier should accept the corner square");

    for s in &squares {
        let b = s.bounding_box();
        assert!(b.min_x <= 6 && b.min_y <= 6, "unexpected candidate {:?}", s);
        // The same vertices pass classification on their own
        let poly = Polygon::new(s.vertices().to_vec());
        assert!(SquareClassifier::default().classify(&poly));
    }

    let renderer = SquareRenderer::default();
    assert!(squares.iter().all(|s| !renderer.is_visible(s)));
    let mut canvas = RgbImage::new(400, 400);
    assert_eq!(renderer.render(&mut canvas, &squares), 0);
    assert!(canvas.pixels().all(|p| p.0 == [0, 0, 0]));
}

#[test]
fn test_uniform_gray_frame_is_empty() {
    let frame = GrayImage::from_pixel(100, 100, Luma([128]));
    let config = SquareConfig::builder()
        .retrieval(square_detect::ContourRetrieval::All)
        .build()
        .unwrap();
    assert!(detect(&frame).is_empty());
    assert!(SquareDetector::new(config).unwrap().detect(&frame).is_empty());
}

#[test]
fn test_detection_is_deterministic() {
    let frame = frame_with_square(300, 60, 80, 200, 210);
    let detector = SquareDetector::default();
    let first = detector.detect(&frame);
    let second = detector.detect(&frame);
    assert_eq!(first, second);

    let parallel = SquareDetector::new(SquareConfig {
        parallel: true,
        ..SquareConfig::default()
    })
    .unwrap();
    assert_eq!(parallel.detect(&frame), first);
}

#[test]
fn test_duplicates_are_kept_across_passes() {
    let frame = frame_with_square(300, 100, 100, 200, 200);
    let single = SquareDetector::new(SquareConfig {
        channel_passes: 1,
        ..SquareConfig::default()
    })
    .unwrap()
    .detect(&frame);
    let triple = SquareDetector::default().detect(&frame);
    assert_eq!(triple.len(), 3 * single.len());
}

#[test]
fn test_rotated_square_is_found() {
    // Diamond centred at (200, 200) with half-diagonal 90
    let frame = GrayImage::from_fn(400, 400, |x, y| {
        let d = (x as i32 - 200).abs() + (y as i32 - 200).abs();
        if d <= 90 { Luma([255]) } else { Luma([0]) }
    });
    let squares = detect(&frame);
    assert!(!squares.is_empty());
    for s in &squares {
        let (cx, cy) = s.centroid();
        assert!((cx - 200.0).abs() < 8.0 && (cy - 200.0).abs() < 8.0);
    }
}

#[test]
fn test_small_square_is_rejected() {
    // 20x20 region stays below the default area threshold
    let frame = frame_with_square(200, 80, 80, 99, 99);
    assert!(detect(&frame).is_empty());
}

#[test]
fn test_listener_through_frame_slot() {
    let slot = FrameSlot::new();
    slot.publish(frame_with_square(100, 0, 0, 0, 0));
    slot.publish(frame_with_square(400, 150, 150, 250, 250));

    let mut frames_seen = 0;
    let mut listener = |frame: &GrayImage| -> SquareSet {
        frames_seen += 1;
        detect(frame)
    };
    let squares = slot.dispatch(&mut listener).unwrap();
    assert!(!squares.is_empty());
    assert!(slot.dispatch(&mut listener).is_none());
    assert_eq!(frames_seen, 1);

    let mut detector = SquareDetector::default();
    assert_eq!(detector.on_frame(&frame_with_square(400, 150, 150, 250, 250)), squares);
}

#[test]
fn test_left_and_right_edge_blocks_match() {
    let block = |x_range: std::ops::RangeInclusive<u32>| {
        GrayImage::from_fn(400, 400, |x, y| {
            if x_range.contains(&x) && (150..=250).contains(&y) {
                Luma([255])
            } else {
                Luma([0])
            }
        })
    };
    let left = detect(&block(0..=100));
    let right = detect(&block(299..=399));

    assert!(!left.is_empty(), "block touching the left edge was missed");
    assert_eq!(left.len(), right.len());
    assert!(left.iter().all(|s| s.bounding_box().min_x <= 2));
    assert!(right.iter().all(|s| s.bounding_box().max_x >= 397));
}
