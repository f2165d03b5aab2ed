//! Lifecycle of one preview's media: poster first, delayed trailer
//! autoplay, mute handling and teardown.
//!
//! The machine owns every timer it arms and the liveness flag its play
//! tickets are bound to. Teardown cancels the timers, pauses and releases
//! the media element and revokes the flag, so nothing scheduled or in flight
//! can touch the preview afterwards.

use std::time::Instant;

use hoverreel_config::{PlaybackCapabilities, PreviewTimings};
use serde::Serialize;

use super::handle::{MediaHandle, PlayTicket};
use crate::error::MediaError;
use crate::scheduling::{Liveness, TimerSlot, earliest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewStage {
    Entering,
    Entered,
    Redirecting,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailerState {
    /// Poster is showing.
    Idle,
    /// Play requested, waiting for the platform.
    Loading,
    Playing,
}

/// Observable change produced by the machine.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaTransition {
    Entered,
    TrailerRequested,
    TrailerPlaying,
    TrailerFallback(MediaError),
    TrailerReset,
    MuteChanged(bool),
    StaleResultDiscarded,
}

pub struct MediaPreviewStateMachine {
    timings: PreviewTimings,
    capabilities: PlaybackCapabilities,
    media: Option<Box<dyn MediaHandle>>,
    stage: PreviewStage,
    trailer: TrailerState,
    trailer_loaded: bool,
    muted: bool,
    enter_timer: TimerSlot,
    autoplay_timer: TimerSlot,
    /// Set by `stop_playback`; the trailer stays on the poster until close.
    autoplay_suppressed: bool,
    play_generation: u64,
    liveness: Liveness,
}

impl std::fmt::Debug for MediaPreviewStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaPreviewStateMachine")
            .field("stage", &self.stage)
            .field("trailer", &self.trailer)
            .field("trailer_loaded", &self.trailer_loaded)
            .field("muted", &self.muted)
            .field("has_media", &self.media.is_some())
            .field("autoplay_suppressed", &self.autoplay_suppressed)
            .field("play_generation", &self.play_generation)
            .finish()
    }
}

impl MediaPreviewStateMachine {
    /// Start a preview in `Entering`. `media` is `None` when the content has
    /// no trailer; the preview then stays on the poster.
    pub fn begin(
        now: Instant,
        timings: PreviewTimings,
        capabilities: PlaybackCapabilities,
        media: Option<Box<dyn MediaHandle>>,
    ) -> Self {
        let muted =
            capabilities.force_muted || !capabilities.allow_unmuted_autoplay;
        let mut enter_timer = TimerSlot::new("preview-enter");
        enter_timer.schedule(now, timings.enter_settle());

        Self {
            timings,
            capabilities,
            media,
            stage: PreviewStage::Entering,
            trailer: TrailerState::Idle,
            trailer_loaded: false,
            muted,
            enter_timer,
            autoplay_timer: TimerSlot::new("preview-autoplay"),
            autoplay_suppressed: false,
            play_generation: 0,
            liveness: Liveness::new(),
        }
    }

    pub fn stage(&self) -> PreviewStage {
        self.stage
    }

    pub fn trailer_state(&self) -> TrailerState {
        self.trailer
    }

    pub fn is_trailer_playing(&self) -> bool {
        self.trailer == TrailerState::Playing
    }

    pub fn trailer_loaded(&self) -> bool {
        self.trailer_loaded
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn has_media(&self) -> bool {
        self.media.is_some()
    }

    pub fn capabilities(&self) -> PlaybackCapabilities {
        self.capabilities
    }

    /// Entering or entered; redirecting and closed machines are frozen.
    pub fn is_active(&self) -> bool {
        matches!(self.stage, PreviewStage::Entering | PreviewStage::Entered)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        if !self.is_active() {
            return None;
        }
        earliest([self.enter_timer.deadline(), self.autoplay_timer.deadline()])
    }

    /// Fire whatever timers are due at `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<MediaTransition> {
        let mut transitions = Vec::new();
        if !self.is_active() {
            return transitions;
        }

        if self.stage == PreviewStage::Entering
            && let Some(entered_at) = self.enter_timer.take_due(now)
        {
            self.stage = PreviewStage::Entered;
            transitions.push(MediaTransition::Entered);
            if self.media.is_some() && !self.autoplay_suppressed {
                // Measured from the scheduled entry, not from a late poll.
                self.autoplay_timer
                    .schedule(entered_at, self.timings.autoplay_delay());
            }
        }

        if self.stage == PreviewStage::Entered
            && self.trailer == TrailerState::Idle
            && self.autoplay_timer.take_due(now).is_some()
            && self.request_play()
        {
            transitions.push(MediaTransition::TrailerRequested);
        }

        transitions
    }

    fn request_play(&mut self) -> bool {
        let Some(media) = self.media.as_mut() else {
            return false;
        };
        self.play_generation += 1;
        let ticket =
            PlayTicket::new(self.play_generation, self.liveness.token());
        self.trailer = TrailerState::Loading;
        log::debug!(
            "requesting trailer playback (attempt {}, muted: {})",
            self.play_generation,
            self.muted
        );
        media.begin_play(ticket, self.muted);
        true
    }

    /// Outcome of an asynchronous play attempt.
    pub fn on_play_settled(
        &mut self,
        ticket: &PlayTicket,
        result: Result<(), MediaError>,
    ) -> MediaTransition {
        let current = ticket
            .is_current(self.play_generation, &self.liveness.token())
            && self.stage == PreviewStage::Entered
            && self.trailer == TrailerState::Loading;

        if !current {
            log::debug!(
                "discarding stale play result (attempt {}, now at {}, stage {:?})",
                ticket.generation(),
                self.play_generation,
                self.stage
            );
            // A late success must not leave the element running.
            if result.is_ok()
                && self.trailer == TrailerState::Idle
                && let Some(media) = self.media.as_mut()
            {
                media.pause();
            }
            return MediaTransition::StaleResultDiscarded;
        }

        match result {
            Ok(()) => {
                self.trailer = TrailerState::Playing;
                self.trailer_loaded = true;
                MediaTransition::TrailerPlaying
            }
            Err(err) => {
                log::warn!("trailer playback failed, keeping poster: {err}");
                self.fall_back_to_poster();
                MediaTransition::TrailerFallback(err)
            }
        }
    }

    pub fn on_trailer_ended(&mut self, now: Instant) -> Option<MediaTransition> {
        if self.stage != PreviewStage::Entered
            || self.trailer != TrailerState::Playing
        {
            return None;
        }

        if let Some(media) = self.media.as_mut() {
            media.pause();
            media.rewind();
        }
        self.trailer = TrailerState::Idle;

        if let Some(cooldown) = self.timings.replay_cooldown() {
            self.autoplay_timer.schedule(now, cooldown);
        }
        Some(MediaTransition::TrailerReset)
    }

    pub fn on_media_error(
        &mut self,
        error: MediaError,
    ) -> Option<MediaTransition> {
        if self.stage != PreviewStage::Entered
            || self.trailer == TrailerState::Idle
        {
            return None;
        }
        log::warn!("trailer media error, keeping poster: {error}");
        // Invalidate the in-flight attempt, if any.
        self.play_generation += 1;
        self.fall_back_to_poster();
        Some(MediaTransition::TrailerFallback(error))
    }

    fn fall_back_to_poster(&mut self) {
        if let Some(media) = self.media.as_mut() {
            media.pause();
        }
        self.trailer = TrailerState::Idle;
    }

    /// Apply `muted` to the active media. No-op without active media, when
    /// audio is forced off, or when nothing changes.
    pub fn set_muted(&mut self, muted: bool) -> Option<MediaTransition> {
        if self.capabilities.force_muted
            || self.stage != PreviewStage::Entered
            || self.trailer == TrailerState::Idle
            || self.muted == muted
        {
            return None;
        }
        let media = self.media.as_mut()?;
        media.set_muted(muted);
        self.muted = muted;
        Some(MediaTransition::MuteChanged(muted))
    }

    pub fn toggle_mute(&mut self) -> Option<MediaTransition> {
        self.set_muted(!self.muted)
    }

    /// Stop the trailer and keep it stopped for the rest of the preview,
    /// including an autoplay that entry would still arm. The preview stays
    /// open.
    pub fn stop_playback(&mut self) -> Option<MediaTransition> {
        if !self.is_active() {
            return None;
        }
        self.autoplay_suppressed = true;
        self.autoplay_timer.cancel();
        if self.trailer == TrailerState::Idle {
            return None;
        }
        self.play_generation += 1;
        self.fall_back_to_poster();
        Some(MediaTransition::TrailerReset)
    }

    /// Enter `Redirecting`: cancel every timer, stop playback, and refuse
    /// all further media changes. Returns false when already frozen.
    pub fn freeze_for_redirect(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.enter_timer.cancel();
        self.autoplay_timer.cancel();
        self.play_generation += 1;
        self.fall_back_to_poster();
        self.stage = PreviewStage::Redirecting;
        true
    }

    /// Synchronously stop everything and release the media element.
    pub fn teardown(&mut self) {
        if self.stage == PreviewStage::Closed {
            return;
        }
        self.enter_timer.cancel();
        self.autoplay_timer.cancel();
        self.play_generation += 1;
        self.liveness.revoke();
        if let Some(mut media) = self.media.take() {
            media.pause();
        }
        self.trailer = TrailerState::Idle;
        self.stage = PreviewStage::Closed;
    }
}

impl Drop for MediaPreviewStateMachine {
    fn drop(&mut self) {
        self.teardown();
    }
}
