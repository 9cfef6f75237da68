use std::time::{Duration, Instant};

/// Timer for the animated demo. A frame is requested when due and the
/// animation steps only once that frame has been presented, so the
/// first frame shows the starting state.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    next_frame: Instant,
    pending: bool,
}

impl FramePacer {
    /// The first frame is due at `start`.
    pub fn new(start: Instant, interval: Duration) -> Self {
        Self {
            interval,
            next_frame: start,
            pending: false,
        }
    }

    /// True when a new frame should be requested at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.pending || now < self.next_frame {
            return false;
        }

        self.pending = true;
        self.next_frame = now + self.interval;

        true
    }

    pub fn next_frame(&self) -> Instant {
        self.next_frame
    }

    /// Called after a frame reached the screen. Returns whether it was a
    /// timed frame, i.e. whether the animation should step now.
    pub fn presented(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}
