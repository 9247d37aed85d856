//! Scroll direction detection.

use crate::constants::DEFAULT_SCROLL_THRESHOLD_PX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Turns a stream of scroll offsets into an up/down signal.
///
/// Moves smaller than `threshold` since the last accepted offset leave the
/// signal alone, so jitter at rest and momentum tails are ignored.
#[derive(Clone, Debug)]
pub struct ScrollDirectionDetector {
    threshold: f64,
    last_seen: f64,
    direction: Option<ScrollDirection>,
}

impl Default for ScrollDirectionDetector {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THRESHOLD_PX, 0.0)
    }
}

impl ScrollDirectionDetector {
    pub fn new(threshold: f64, initial_offset: f64) -> Self {
        Self {
            threshold,
            last_seen: initial_offset,
            direction: None,
        }
    }

    #[inline]
    pub fn direction(&self) -> Option<ScrollDirection> {
        self.direction
    }

    #[inline]
    pub fn last_seen(&self) -> f64 {
        self.last_seen
    }

    /// Feed the current offset and return the (possibly unchanged) signal.
    pub fn observe(&mut self, offset: f64) -> Option<ScrollDirection> {
        let delta = offset - self.last_seen;
        if delta.abs() < self.threshold {
            return self.direction;
        }
        self.direction = Some(if delta > 0.0 {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        });
        // Overscroll bounce can report negative offsets.
        self.last_seen = offset.max(0.0);
        self.direction
    }
}

/// Coalesces bursts of notifications into one recomputation per frame.
///
/// The host calls [`request`](Self::request) on every event and only
/// schedules a frame callback when it returns `true`; the callback calls
/// [`complete`](Self::complete).
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameThrottle {
    ticking: bool,
}

impl FrameThrottle {
    #[inline]
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.ticking, true)
    }

    /// Request a frame through `schedule` unless one is already pending.
    ///
    /// A failed request releases the throttle so the next notification
    /// tries again.
    pub fn schedule<T, E>(&mut self, schedule: impl FnOnce() -> Result<T, E>) -> Option<T> {
        if !self.request() {
            return None;
        }
        match schedule() {
            Ok(handle) => Some(handle),
            Err(_) => {
                self.complete();
                None
            }
        }
    }

    #[inline]
    pub fn complete(&mut self) {
        self.ticking = false;
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.ticking
    }
}
