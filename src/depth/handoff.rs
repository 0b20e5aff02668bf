// SPDX-License-Identifier: GPL-3.0-only

//! Latest-frame handoff between the capture thread and the display context
//!
//! A single slot with latest-wins semantics: every publish replaces whatever
//! the display context has not yet consumed. There is no queue and no
//! backpressure; the capture thread never blocks on the display side beyond
//! the O(1) slot swap.

use std::sync::{Arc, Mutex};

use tracing::warn;

use super::types::GrayscaleFrame;

/// Shared latest-frame slot
///
/// Clones share the same slot; hand one clone to the capture side and one to
/// the display side. Frame pixel storage is reference counted, so both the
/// publish and the read hold the lock only for a handle swap.
#[derive(Debug, Clone, Default)]
pub struct FrameHandoff {
    latest: Arc<Mutex<Option<GrayscaleFrame>>>,
}

impl FrameHandoff {
    /// Create an empty handoff slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a frame, unconditionally replacing any unconsumed one
    ///
    /// Called from the capture context once per normalized frame. A poisoned
    /// slot drops the frame rather than panicking the capture loop.
    pub fn publish(&self, frame: GrayscaleFrame) {
        match self.latest.lock() {
            Ok(mut slot) => *slot = Some(frame),
            Err(_) => warn!("Frame slot poisoned, dropping frame"),
        }
    }

    /// Latest published frame, or `None` before the first publish
    ///
    /// Called from the display context on its own schedule. The returned
    /// frame shares pixel storage with the slot; no pixel data is copied.
    pub fn current_frame(&self) -> Option<GrayscaleFrame> {
        self.latest.lock().ok()?.clone()
    }

    /// Check whether anything has been published yet
    pub fn has_frame(&self) -> bool {
        self.latest.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(marker: u8) -> GrayscaleFrame {
        GrayscaleFrame {
            width: 1,
            height: 1,
            pixels: vec![marker].into(),
        }
    }

    #[test]
    fn test_empty_before_first_publish() {
        let handoff = FrameHandoff::new();
        assert!(handoff.current_frame().is_none());
        assert!(!handoff.has_frame());
    }

    #[test]
    fn test_latest_wins() {
        let handoff = FrameHandoff::new();
        handoff.publish(frame(1));
        handoff.publish(frame(2));
        handoff.publish(frame(3));
        let current = handoff.current_frame().unwrap();
        assert_eq!(current.pixels.as_ref(), &[3]);
    }

    #[test]
    fn test_read_does_not_consume() {
        let handoff = FrameHandoff::new();
        handoff.publish(frame(9));
        assert_eq!(handoff.current_frame().unwrap().pixels.as_ref(), &[9]);
        assert_eq!(handoff.current_frame().unwrap().pixels.as_ref(), &[9]);
    }

    #[test]
    fn test_clones_share_slot() {
        let producer = FrameHandoff::new();
        let consumer = producer.clone();
        producer.publish(frame(42));
        assert_eq!(consumer.current_frame().unwrap().pixels.as_ref(), &[42]);
    }

    #[test]
    fn test_cross_thread_freshness() {
        let handoff = FrameHandoff::new();
        let producer = handoff.clone();
        let publisher = std::thread::spawn(move || {
            for marker in 1..=50u8 {
                producer.publish(frame(marker));
            }
        });
        publisher.join().unwrap();
        assert_eq!(handoff.current_frame().unwrap().pixels.as_ref(), &[50]);
    }
}
