//! Hover previews for content tiles.
//!
//! One [`PreviewSessionController`] per tile turns raw pointer events into a
//! debounced open/close intent, places the overlay inside the viewport,
//! runs the poster-then-trailer media lifecycle and hands clicks over to
//! navigation through a short zoom animation.
//!
//! Nothing here reads a clock or spawns work on its own. Drivers pass the
//! frame timestamp into every call, poll at
//! [`PreviewSessionController::next_deadline`], run the queued
//! [`PreferenceRequest`]s on their executor and report media outcomes back.
#![allow(missing_docs)]

pub mod clock;
pub mod collaborators;
pub mod error;
pub mod geometry;
pub mod hover_intent;
pub mod media_preview;
pub mod menu;
pub mod preferences;
pub mod replay;
pub mod scheduling;
pub mod session;
pub mod testing;
pub mod transitions;

pub use clock::{SystemTimeProvider, TimeProvider, VirtualTimeProvider};
pub use collaborators::{
    DetailsFn, NavigateFn, PreferenceService, PreviewCallbacks, TileSurface,
};
pub use error::{MediaError, NavigationError, PreferenceError};
pub use geometry::{GeometryCalculator, PlacementSide, ResolvedPlacement};
pub use hover_intent::{HoverIntentController, HoverRegion, IntentSignal};
pub use media_preview::{
    MediaHandle, MediaPreviewStateMachine, MediaTransition, PlayTicket,
    PreviewStage, TrailerState,
};
pub use menu::ContextMenuSlot;
pub use preferences::{
    PreferenceOp, PreferenceOutcome, PreferenceRequest, PreferenceResult,
};
pub use scheduling::{Liveness, LivenessToken, TaskHandle, TimerSlot};
pub use session::{
    CloseReason, PreviewEvent, PreviewSessionController, PreviewView,
};
pub use transitions::{
    EasingFunction, RedirectFrame, RedirectPoll, TransitionAnimator,
};
