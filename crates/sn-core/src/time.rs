//! Simulation time model.
//!
//! The host advances time in fixed frames.  Timestamps are seconds since the
//! session started, stored as `f64` so long sessions do not lose sub-frame
//! precision; durations handed to game logic are `f32`.

use std::fmt;

/// Fixed-step clock mirroring the host's "real time since startup".
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Seconds covered by one frame.
    pub frame_secs: f32,
    /// Frames elapsed since the session started.
    pub frame: u64,
}

impl SimClock {
    /// Create a clock at frame 0 with the given resolution.
    pub fn new(frame_secs: f32) -> Self {
        Self { frame_secs, frame: 0 }
    }

    /// Advance the clock by one frame.
    #[inline]
    pub fn advance(&mut self) {
        self.frame += 1;
    }

    /// Seconds elapsed since frame 0.
    #[inline]
    pub fn now_secs(&self) -> f64 {
        self.frame as f64 * self.frame_secs as f64
    }

    /// Seconds from `earlier` to now; negative if `earlier` is in the future.
    #[inline]
    pub fn secs_since(&self, earlier: f64) -> f32 {
        (self.now_secs() - earlier) as f32
    }

    /// How many frames span `secs` seconds (rounds up, minimum 1).
    #[inline]
    pub fn frames_for_secs(&self, secs: f32) -> u64 {
        ((secs / self.frame_secs).ceil() as u64).max(1)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame {} ({:.2}s)", self.frame, self.now_secs())
    }
}
