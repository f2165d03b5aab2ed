use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::timings as defaults;

/// Timing table for one preview session, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PreviewTimings {
    /// Hover dwell before the preview opens. Raise it on dense grids where
    /// pointers sweep across many cards.
    pub open_delay_ms: u64,
    /// Delay before closing after the pointer leaves card and overlay. Must
    /// stay shorter than `open_delay_ms`.
    pub close_delay_ms: u64,
    /// Entrance settle time before the overlay counts as entered.
    pub enter_settle_ms: u64,
    /// Wait after entering before the trailer autoplays.
    pub autoplay_delay_ms: u64,
    /// Length of the zoom-into-navigation animation.
    pub redirect_duration_ms: u64,
    /// Cool-down before replaying a finished trailer; `None` leaves the
    /// poster up until the session closes.
    pub replay_cooldown_ms: Option<u64>,
}

impl Default for PreviewTimings {
    fn default() -> Self {
        Self {
            open_delay_ms: defaults::OPEN_DELAY_MS,
            close_delay_ms: defaults::CLOSE_DELAY_MS,
            enter_settle_ms: defaults::ENTER_SETTLE_MS,
            autoplay_delay_ms: defaults::AUTOPLAY_DELAY_MS,
            redirect_duration_ms: defaults::REDIRECT_DURATION_MS,
            replay_cooldown_ms: Some(defaults::REPLAY_COOLDOWN_MS),
        }
    }
}

impl PreviewTimings {
    pub fn open_delay(&self) -> Duration {
        Duration::from_millis(self.open_delay_ms)
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }

    pub fn enter_settle(&self) -> Duration {
        Duration::from_millis(self.enter_settle_ms)
    }

    pub fn autoplay_delay(&self) -> Duration {
        Duration::from_millis(self.autoplay_delay_ms)
    }

    pub fn redirect_duration(&self) -> Duration {
        Duration::from_millis(self.redirect_duration_ms)
    }

    pub fn replay_cooldown(&self) -> Option<Duration> {
        self.replay_cooldown_ms.map(Duration::from_millis)
    }
}
