//! Frame handoff between an acquisition thread and the detector.

use std::sync::{Mutex, PoisonError};

use image::GrayImage;

use crate::SquareDetector;
use crate::models::SquareSet;

/// Receives frames one at a time and reports the squares found in each.
pub trait FrameListener {
    /// Process one frame
    fn on_frame(&mut self, frame: &GrayImage) -> SquareSet;
}

impl FrameListener for SquareDetector {
    fn on_frame(&mut self, frame: &GrayImage) -> SquareSet {
        self.detect(frame)
    }
}

impl<F> FrameListener for F
where
    F: FnMut(&GrayImage) -> SquareSet,
{
    fn on_frame(&mut self, frame: &GrayImage) -> SquareSet {
        self(frame)
    }
}

/// One-slot mailbox holding the most recent unread frame.
///
/// The producer publishes owned snapshots; an unread frame is replaced by a
/// newer one. The consumer takes the frame out, so the detector never shares
/// a buffer with the producer.
#[derive(Debug, Default)]
pub struct FrameSlot {
    slot: Mutex<Option<GrayImage>>,
}

impl FrameSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `frame`, returning the unread frame it replaced
    pub fn publish(&self, frame: GrayImage) -> Option<GrayImage> {
        self.lock().replace(frame)
    }

    /// Remove and return the pending frame
    pub fn take(&self) -> Option<GrayImage> {
        self.lock().take()
    }

    /// True if a frame is waiting
    pub fn is_pending(&self) -> bool {
        self.lock().is_some()
    }

    /// Take the pending frame, if any, and hand it to `listener`
    pub fn dispatch<L: FrameListener + ?Sized>(&self, listener: &mut L) -> Option<SquareSet> {
        let frame = self.take()?;
        Some(listener.on_frame(&frame))
    }

    // A panic while holding the lock cannot leave the Option half-written.
    fn lock(&self) -> std::sync::MutexGuard<'_, Option<GrayImage>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
