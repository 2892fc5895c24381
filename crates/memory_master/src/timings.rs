//! Durations that pace a game.

use std::time::Duration;

/// Preview countdown length, in seconds.
pub const PREVIEW_SECONDS: u32 = 5;
/// Pause before a matched pair is locked in.
pub const MATCH_DELAY: Duration = Duration::from_millis(500);
/// Pause before a mismatched pair is turned back down.
pub const MISMATCH_DELAY: Duration = Duration::from_millis(1000);
/// Period of the play clock and the preview countdown.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Pacing for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    preview_seconds: u32,
    match_delay: Duration,
    mismatch_delay: Duration,
}

impl Timings {
    /// Creates custom timings.
    pub fn new(preview_seconds: u32, match_delay: Duration, mismatch_delay: Duration) -> Self {
        Self {
            preview_seconds,
            match_delay,
            mismatch_delay,
        }
    }

    /// Seconds the Remember preview lasts.
    pub fn preview_seconds(&self) -> u32 {
        self.preview_seconds
    }

    /// Delay before a match resolves.
    pub fn match_delay(&self) -> Duration {
        self.match_delay
    }

    /// Delay before a mismatch resolves.
    pub fn mismatch_delay(&self) -> Duration {
        self.mismatch_delay
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self::new(PREVIEW_SECONDS, MATCH_DELAY, MISMATCH_DELAY)
    }
}
