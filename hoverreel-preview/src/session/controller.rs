//! Per-tile orchestration.
//!
//! A [`PreviewSessionController`] owns one hover intent controller, at most
//! one live preview session and one redirect animator. The surrounding UI
//! forwards pointer events, clicks and media callbacks into it and calls
//! [`PreviewSessionController::poll`] with the frame timestamp whenever
//! [`PreviewSessionController::next_deadline`] has passed.

use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use hoverreel_config::PreviewConfig;
use hoverreel_model::{
    CardGeometry, ContentSummary, LikeAction, OverlayPlacement,
    PreferenceSnapshot, Viewport, WatchlistAction,
};

use super::events::{CloseReason, PreviewEvent};
use super::view::PreviewView;
use crate::collaborators::{PreviewCallbacks, TileSurface};
use crate::error::{MediaError, NavigationError};
use crate::geometry::{GeometryCalculator, ResolvedPlacement};
use crate::hover_intent::{HoverIntentController, HoverRegion, IntentSignal};
use crate::media_preview::{
    MediaPreviewStateMachine, MediaTransition, PlayTicket, PreviewStage,
    TrailerState,
};
use crate::preferences::{
    PreferenceOp, PreferenceOutcome, PreferenceRequest, PreferenceResult,
};
use crate::scheduling::{Liveness, earliest};
use crate::transitions::{RedirectPoll, TransitionAnimator};

/// Live state of one hover cycle.
#[derive(Debug)]
struct PreviewSession {
    geometry: CardGeometry,
    resolved: ResolvedPlacement,
    media: MediaPreviewStateMachine,
    preferences: PreferenceSnapshot,
    /// Flags confirmed by a successful toggle in this session.
    like_confirmed: bool,
    list_confirmed: bool,
    liveness: Liveness,
}

impl PreviewSession {
    fn accepts_updates(&self) -> bool {
        self.media.is_active()
    }

    /// Merge a lookup result, keeping flags a toggle already confirmed.
    /// `None` when the lookup has nothing left to change.
    fn merge_lookup(
        &self,
        looked_up: PreferenceSnapshot,
    ) -> Option<PreferenceSnapshot> {
        if self.like_confirmed && self.list_confirmed {
            return None;
        }
        Some(PreferenceSnapshot {
            is_liked: if self.like_confirmed {
                self.preferences.is_liked
            } else {
                looked_up.is_liked
            },
            is_in_list: if self.list_confirmed {
                self.preferences.is_in_list
            } else {
                looked_up.is_in_list
            },
        })
    }
}

pub struct PreviewSessionController {
    content: ContentSummary,
    config: PreviewConfig,
    calculator: GeometryCalculator,
    callbacks: PreviewCallbacks,
    surface: Option<Box<dyn TileSurface>>,
    intent: HoverIntentController,
    animator: TransitionAnimator,
    session: Option<PreviewSession>,
    pending_preferences: Vec<PreferenceRequest>,
    events: Vec<PreviewEvent>,
}

impl fmt::Debug for PreviewSessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewSessionController")
            .field("content_id", &self.content.id)
            .field("attached", &self.surface.is_some())
            .field("intent", &self.intent)
            .field("animator", &self.animator)
            .field("session", &self.session)
            .finish()
    }
}

impl PreviewSessionController {
    pub fn new(
        content: ContentSummary,
        config: PreviewConfig,
        callbacks: PreviewCallbacks,
    ) -> Self {
        let timings = config.timings;
        Self {
            content,
            calculator: GeometryCalculator::new(config.layout),
            intent: HoverIntentController::new(
                timings.open_delay(),
                timings.close_delay(),
            ),
            animator: TransitionAnimator::new(timings.redirect_duration()),
            config,
            callbacks,
            surface: None,
            session: None,
            pending_preferences: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn content(&self) -> &ContentSummary {
        &self.content
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Bind the controller to its card element. Re-attaching tears down
    /// whatever the previous element had open.
    pub fn attach(&mut self, surface: Box<dyn TileSurface>) {
        if self.surface.is_some() {
            self.detach();
        }
        self.surface = Some(surface);
    }

    /// Unmount: synchronously cancel every timer, stop playback, drop any
    /// pending navigation and release the card element.
    pub fn detach(&mut self) {
        self.close_session(CloseReason::Detached);
        self.animator.reset();
        self.intent.reset();
        self.surface = None;
    }

    pub fn on_pointer_enter(&mut self, region: HoverRegion, now: Instant) {
        if self.surface.is_none() || self.animator.is_redirecting() {
            return;
        }
        self.intent.on_pointer_enter(region, now);
    }

    pub fn on_pointer_leave(&mut self, region: HoverRegion, now: Instant) {
        if self.surface.is_none() || self.animator.is_redirecting() {
            return;
        }
        self.intent.on_pointer_leave(region, now);
    }

    /// Run everything due at `now`. A failing navigation callback is
    /// returned to the caller after the tile has been reset.
    pub fn poll(&mut self, now: Instant) -> Result<(), NavigationError> {
        match self.intent.poll(now) {
            Some(IntentSignal::Open) => self.on_intent_open(now),
            Some(IntentSignal::Close) => self.on_intent_close(),
            None => {}
        }

        if let Some(session) = self.session.as_mut() {
            let transitions = session.media.poll(now);
            self.events
                .extend(transitions.into_iter().map(PreviewEvent::from));
        }

        match self.animator.poll(now) {
            Ok(RedirectPoll::Completed) => {
                log::debug!("navigated to {}", self.content.id);
                self.events.push(PreviewEvent::Navigated {
                    content_id: self.content.id.clone(),
                });
                self.finish_redirect();
                Ok(())
            }
            Ok(RedirectPoll::Idle | RedirectPoll::Animating(_)) => Ok(()),
            Err(err) => {
                log::warn!("navigation to {} failed: {err}", self.content.id);
                self.events.push(PreviewEvent::NavigationFailed {
                    content_id: self.content.id.clone(),
                    message: err.to_string(),
                });
                self.finish_redirect();
                Err(err)
            }
        }
    }

    /// Open a preview: measure the card, place the overlay, start media.
    /// Normally driven by the hover intent through [`Self::poll`].
    pub fn on_intent_open(&mut self, now: Instant) {
        if self.session.is_some() || self.animator.is_redirecting() {
            return;
        }
        let Some(surface) = self.surface.as_ref() else {
            log::debug!("intent opened on a detached tile, ignoring");
            return;
        };

        let geometry = surface.card_rect();
        let viewport = surface.viewport();
        if viewport.width < self.config.layout.min_supported_width {
            log::debug!(
                "viewport {}px is below the supported minimum, overlay shrinks",
                viewport.width
            );
        }
        let resolved = self.calculator.resolve(&geometry, viewport);
        let media = self
            .content
            .trailer_source()
            .map(|trailer| surface.create_media(&trailer));

        let machine = MediaPreviewStateMachine::begin(
            now,
            self.config.timings,
            self.config.capabilities(),
            media,
        );
        let liveness = Liveness::new();
        self.pending_preferences.push(PreferenceRequest::new(
            self.content.id.clone(),
            PreferenceOp::Fetch,
            liveness.token(),
        ));

        log::debug!(
            "preview for {} opened {:?} at {:?}",
            self.content.id,
            resolved.side,
            resolved.placement
        );
        self.events.push(PreviewEvent::IntentOpened {
            placement: resolved.placement,
            side: resolved.side,
            breakpoint: resolved.breakpoint,
        });
        self.session = Some(PreviewSession {
            geometry,
            resolved,
            media: machine,
            preferences: PreferenceSnapshot::default(),
            like_confirmed: false,
            list_confirmed: false,
            liveness,
        });
    }

    /// Close the preview. Ignored while a redirect owns the tile.
    pub fn on_intent_close(&mut self) {
        if self.animator.is_redirecting() {
            return;
        }
        self.close_session(CloseReason::IntentClosed);
        self.intent.acknowledge_closed();
    }

    fn close_session(&mut self, reason: CloseReason) {
        self.pending_preferences.clear();
        let Some(mut session) = self.session.take() else {
            return;
        };
        session.media.teardown();
        session.liveness.revoke();
        log::debug!("preview for {} closed ({reason:?})", self.content.id);
        self.events.push(PreviewEvent::Closed { reason });
    }

    /// Click: freeze the preview and start the redirect animation. Returns
    /// false when a redirect is already running or the tile is detached.
    pub fn on_activate(&mut self, now: Instant) -> bool {
        if self.animator.is_redirecting() {
            log::debug!("redirect for {} already running", self.content.id);
            return false;
        }

        let placement = match self.session.as_mut() {
            Some(session) => {
                session.media.freeze_for_redirect();
                session.resolved.placement
            }
            None => match self.surface.as_ref() {
                Some(surface) => card_placement(surface.card_rect()),
                None => return false,
            },
        };

        self.intent.suspend();
        let navigate = Rc::clone(&self.callbacks.navigate);
        let content_id = self.content.id.clone();
        self.animator
            .start_redirect(now, placement, move || navigate(&content_id));
        self.events.push(PreviewEvent::RedirectStarted { placement });
        true
    }

    fn finish_redirect(&mut self) {
        self.close_session(CloseReason::Redirected);
        self.animator.reset();
        self.intent.reset();
    }

    /// Secondary action: stop the trailer, then hand the content and the
    /// card geometry to the detail view. The preview stays open.
    pub fn on_request_details(&mut self) -> bool {
        if self.animator.is_redirecting() {
            return false;
        }
        let geometry = match (&self.session, &self.surface) {
            (Some(session), _) => session.geometry,
            (None, Some(surface)) => surface.card_rect(),
            (None, None) => return false,
        };

        if let Some(session) = self.session.as_mut()
            && let Some(transition) = session.media.stop_playback()
        {
            self.events.push(transition.into());
        }

        (self.callbacks.show_details)(&self.content, geometry);
        self.events.push(PreviewEvent::DetailsRequested {
            content_id: self.content.id.clone(),
        });
        true
    }

    pub fn on_play_settled(
        &mut self,
        ticket: &PlayTicket,
        result: Result<(), MediaError>,
    ) {
        let transition = match self.session.as_mut() {
            Some(session) => session.media.on_play_settled(ticket, result),
            None => {
                log::debug!(
                    "play result for attempt {} arrived after close",
                    ticket.generation()
                );
                MediaTransition::StaleResultDiscarded
            }
        };
        self.events.push(transition.into());
    }

    pub fn on_trailer_ended(&mut self, now: Instant) {
        if let Some(session) = self.session.as_mut()
            && let Some(transition) = session.media.on_trailer_ended(now)
        {
            self.events.push(transition.into());
        }
    }

    pub fn on_media_error(&mut self, error: MediaError) {
        if let Some(session) = self.session.as_mut()
            && let Some(transition) = session.media.on_media_error(error)
        {
            self.events.push(transition.into());
        }
    }

    /// Returns whether the mute state changed.
    pub fn set_muted(&mut self, muted: bool) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let event = session_transition(session.media.set_muted(muted));
        self.record(event)
    }

    pub fn toggle_mute(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let event = session_transition(session.media.toggle_mute());
        self.record(event)
    }

    fn record(&mut self, event: Option<PreviewEvent>) -> bool {
        match event {
            Some(event) => {
                self.events.push(event);
                true
            }
            None => false,
        }
    }

    /// Re-place the open overlay for a resized viewport. The card geometry
    /// captured at open is kept; frozen previews are left alone.
    pub fn on_viewport_resized(&mut self, viewport: Viewport) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.accepts_updates() {
            return;
        }
        let resolved = self.calculator.resolve(&session.geometry, viewport);
        if resolved.placement != session.resolved.placement {
            session.resolved = resolved;
            self.events.push(PreviewEvent::PlacementUpdated {
                placement: resolved.placement,
            });
        }
    }

    /// Requests queued since the last call, to be run by the driver.
    pub fn take_preference_requests(&mut self) -> Vec<PreferenceRequest> {
        std::mem::take(&mut self.pending_preferences)
    }

    pub fn request_like_toggle(&self) -> Option<PreferenceRequest> {
        let session = self.session.as_ref().filter(|s| s.accepts_updates())?;
        let action = LikeAction::toggling(session.preferences.is_liked);
        Some(PreferenceRequest::new(
            self.content.id.clone(),
            PreferenceOp::Like(action),
            session.liveness.token(),
        ))
    }

    pub fn request_watchlist_toggle(&self) -> Option<PreferenceRequest> {
        let session = self.session.as_ref().filter(|s| s.accepts_updates())?;
        let action = WatchlistAction::toggling(session.preferences.is_in_list);
        Some(PreferenceRequest::new(
            self.content.id.clone(),
            PreferenceOp::Watchlist(action),
            session.liveness.token(),
        ))
    }

    /// Apply a finished preference request. Outcomes from a closed session,
    /// unsuccessful toggles and cancelled requests are dropped, and a lookup
    /// never overrides a flag a toggle has already confirmed. Returns
    /// whether the shown state was updated.
    pub fn apply_preference_outcome(
        &mut self,
        outcome: PreferenceOutcome,
    ) -> bool {
        let Some(session) = self.session.as_mut() else {
            log::debug!("preference outcome after close, discarding");
            return false;
        };
        if !outcome.token.is_alive()
            || !outcome.token.same_owner(&session.liveness.token())
            || !session.accepts_updates()
        {
            log::debug!("stale preference outcome for {}", outcome.content_id);
            return false;
        }

        let current = session.preferences;
        let updated = match outcome.result {
            PreferenceResult::Fetched(snapshot) => {
                match session.merge_lookup(snapshot) {
                    Some(merged) => merged,
                    None => return false,
                }
            }
            PreferenceResult::Liked(toggle) if toggle.success => {
                session.like_confirmed = true;
                PreferenceSnapshot {
                    is_liked: toggle.is_liked,
                    ..current
                }
            }
            PreferenceResult::Watchlist(toggle) if toggle.success => {
                session.list_confirmed = true;
                PreferenceSnapshot {
                    is_in_list: toggle.is_in_list,
                    ..current
                }
            }
            // A failed lookup shows the safe default.
            PreferenceResult::Failed(_) if outcome.op == PreferenceOp::Fetch => {
                match session.merge_lookup(PreferenceSnapshot::default()) {
                    Some(merged) => merged,
                    None => return false,
                }
            }
            _ => return false,
        };

        session.preferences = updated;
        self.events
            .push(PreviewEvent::PreferencesUpdated { snapshot: updated });
        true
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([
            self.intent.next_deadline(),
            self.session
                .as_ref()
                .and_then(|session| session.media.next_deadline()),
            self.animator.deadline(),
        ])
    }

    pub fn stage(&self) -> Option<PreviewStage> {
        match &self.session {
            Some(session) => Some(session.media.stage()),
            None if self.animator.is_redirecting() => {
                Some(PreviewStage::Redirecting)
            }
            None => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn placement(&self) -> Option<OverlayPlacement> {
        self.session
            .as_ref()
            .map(|session| session.resolved.placement)
    }

    pub fn view(&self, now: Instant) -> PreviewView {
        let redirect = self.animator.frame(now);
        let capabilities = self.config.capabilities();
        let poster_url = self.content.poster_url().map(str::to_owned);

        match &self.session {
            Some(session) => PreviewView {
                stage: Some(session.media.stage()),
                placement: Some(session.resolved.placement),
                redirect,
                trailer: session.media.trailer_state(),
                trailer_loaded: session.media.trailer_loaded(),
                muted: session.media.is_muted(),
                show_volume_controls: capabilities.show_volume_controls
                    && session.media.has_media(),
                poster_url,
                is_liked: session.preferences.is_liked,
                is_in_list: session.preferences.is_in_list,
            },
            None => PreviewView {
                stage: redirect.map(|_| PreviewStage::Redirecting),
                placement: redirect.map(|frame| frame.placement),
                redirect,
                trailer: TrailerState::Idle,
                trailer_loaded: false,
                muted: capabilities.force_muted,
                show_volume_controls: false,
                poster_url,
                is_liked: false,
                is_in_list: false,
            },
        }
    }

    pub fn drain_events(&mut self) -> Vec<PreviewEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Drop for PreviewSessionController {
    fn drop(&mut self) {
        self.detach();
    }
}

fn session_transition(
    transition: Option<MediaTransition>,
) -> Option<PreviewEvent> {
    transition.map(PreviewEvent::from)
}

fn card_placement(card: CardGeometry) -> OverlayPlacement {
    OverlayPlacement {
        left: card.left,
        top: card.top,
        width: card.width,
        height: card.height,
    }
}
