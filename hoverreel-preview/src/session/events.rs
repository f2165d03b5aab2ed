use hoverreel_config::Breakpoint;
use hoverreel_model::{ContentId, OverlayPlacement, PreferenceSnapshot};
use serde::Serialize;

use crate::geometry::PlacementSide;
use crate::media_preview::MediaTransition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    IntentClosed,
    Redirected,
    Detached,
}

/// Something observable that happened to a tile's preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PreviewEvent {
    IntentOpened {
        placement: OverlayPlacement,
        side: PlacementSide,
        breakpoint: Breakpoint,
    },
    Entered,
    TrailerRequested,
    TrailerPlaying,
    TrailerFallback {
        reason: String,
    },
    TrailerReset,
    MuteChanged {
        muted: bool,
    },
    StaleResultDiscarded,
    PlacementUpdated {
        placement: OverlayPlacement,
    },
    RedirectStarted {
        placement: OverlayPlacement,
    },
    Navigated {
        content_id: ContentId,
    },
    NavigationFailed {
        content_id: ContentId,
        message: String,
    },
    DetailsRequested {
        content_id: ContentId,
    },
    Closed {
        reason: CloseReason,
    },
    PreferencesUpdated {
        snapshot: PreferenceSnapshot,
    },
}

impl From<MediaTransition> for PreviewEvent {
    fn from(transition: MediaTransition) -> Self {
        match transition {
            MediaTransition::Entered => PreviewEvent::Entered,
            MediaTransition::TrailerRequested => PreviewEvent::TrailerRequested,
            MediaTransition::TrailerPlaying => PreviewEvent::TrailerPlaying,
            MediaTransition::TrailerFallback(err) => {
                PreviewEvent::TrailerFallback {
                    reason: err.to_string(),
                }
            }
            MediaTransition::TrailerReset => PreviewEvent::TrailerReset,
            MediaTransition::MuteChanged(muted) => {
                PreviewEvent::MuteChanged { muted }
            }
            MediaTransition::StaleResultDiscarded => {
                PreviewEvent::StaleResultDiscarded
            }
        }
    }
}
