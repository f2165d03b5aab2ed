//! Zoom-into-navigation animation.
//!
//! The animator freezes the overlay placement it was started with, scales
//! and fades it over a fixed duration, then runs the completion callback
//! exactly once. A failing callback is reported to the caller and never
//! retried.

use std::time::{Duration, Instant};

use hoverreel_model::OverlayPlacement;
use serde::Serialize;

use crate::error::NavigationError;

pub const REDIRECT_SCALE_FROM: f32 = 1.0;
pub const REDIRECT_SCALE_TO: f32 = 1.12;

/// Easing curves for preview animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    Linear,
    #[default]
    EaseOutCubic,
    EaseInOutCubic,
    EaseOutQuart,
    EaseOutExpo,
}

impl EasingFunction {
    /// Map linear progress in `0.0..=1.0` onto the curve.
    pub fn apply(&self, t: f32) -> f32 {
        // NaN progress counts as not started.
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            EasingFunction::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            EasingFunction::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            EasingFunction::EaseOutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
        }
    }
}

/// One rendered frame of the redirect animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RedirectFrame {
    /// The placement frozen when the redirect started.
    pub placement: OverlayPlacement,
    pub scale: f32,
    pub opacity: f32,
    /// Linear progress, before easing.
    pub progress: f32,
}

/// Result of advancing the animator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RedirectPoll {
    Idle,
    Animating(RedirectFrame),
    /// The completion callback ran successfully during this poll.
    Completed,
}

type Completion = Box<dyn FnOnce() -> Result<(), NavigationError>>;

enum AnimatorState {
    Idle,
    Running {
        started: Instant,
        placement: OverlayPlacement,
        on_complete: Completion,
    },
    /// Callback already invoked; further redirects stay refused until reset.
    Finished { placement: OverlayPlacement },
}

pub struct TransitionAnimator {
    duration: Duration,
    easing: EasingFunction,
    state: AnimatorState,
}

impl std::fmt::Debug for TransitionAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            AnimatorState::Idle => "idle",
            AnimatorState::Running { .. } => "running",
            AnimatorState::Finished { .. } => "finished",
        };
        f.debug_struct("TransitionAnimator")
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("state", &state)
            .finish()
    }
}

impl TransitionAnimator {
    pub fn new(duration: Duration) -> Self {
        Self::with_easing(duration, EasingFunction::EaseOutCubic)
    }

    pub fn with_easing(duration: Duration, easing: EasingFunction) -> Self {
        Self {
            duration,
            easing,
            state: AnimatorState::Idle,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Begin the redirect from `placement`. Returns false, and drops
    /// `on_complete` unused, when a redirect already started.
    pub fn start_redirect<F>(
        &mut self,
        now: Instant,
        placement: OverlayPlacement,
        on_complete: F,
    ) -> bool
    where
        F: FnOnce() -> Result<(), NavigationError> + 'static,
    {
        if !matches!(self.state, AnimatorState::Idle) {
            log::debug!("redirect already in flight, ignoring trigger");
            return false;
        }
        self.state = AnimatorState::Running {
            started: now,
            placement,
            on_complete: Box::new(on_complete),
        };
        true
    }

    /// A redirect has started, whether or not it completed.
    pub fn is_redirecting(&self) -> bool {
        !matches!(self.state, AnimatorState::Idle)
    }

    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            AnimatorState::Running { started, .. } => {
                Some(*started + self.duration)
            }
            _ => None,
        }
    }

    pub fn frame(&self, now: Instant) -> Option<RedirectFrame> {
        match &self.state {
            AnimatorState::Idle => None,
            AnimatorState::Running {
                started, placement, ..
            } => Some(self.frame_at(*placement, self.progress(*started, now))),
            AnimatorState::Finished { placement } => {
                Some(self.frame_at(*placement, 1.0))
            }
        }
    }

    fn progress(&self, started: Instant, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    fn frame_at(
        &self,
        placement: OverlayPlacement,
        progress: f32,
    ) -> RedirectFrame {
        let eased = self.easing.apply(progress);
        RedirectFrame {
            placement,
            scale: REDIRECT_SCALE_FROM
                + (REDIRECT_SCALE_TO - REDIRECT_SCALE_FROM) * eased,
            opacity: 1.0 - eased,
            progress,
        }
    }

    /// Advance to `now`, running the completion callback once the duration
    /// has elapsed. A callback error is returned as-is.
    pub fn poll(
        &mut self,
        now: Instant,
    ) -> Result<RedirectPoll, NavigationError> {
        let (started, placement) = match &self.state {
            AnimatorState::Running {
                started, placement, ..
            } => (*started, *placement),
            AnimatorState::Idle | AnimatorState::Finished { .. } => {
                return Ok(RedirectPoll::Idle);
            }
        };

        if now < started + self.duration {
            let frame = self.frame_at(placement, self.progress(started, now));
            return Ok(RedirectPoll::Animating(frame));
        }

        let finished = AnimatorState::Finished { placement };
        let AnimatorState::Running { on_complete, .. } =
            std::mem::replace(&mut self.state, finished)
        else {
            return Ok(RedirectPoll::Idle);
        };
        on_complete()?;
        Ok(RedirectPoll::Completed)
    }

    /// Drop any redirect, running or finished, without invoking it.
    pub fn reset(&mut self) {
        self.state = AnimatorState::Idle;
    }
}
