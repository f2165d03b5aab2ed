use hoverreel_model::ContentId;
use thiserror::Error;

/// Failures reported by the platform media element.
///
/// Always recovered locally: the preview falls back to the poster image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("autoplay rejected: {0}")]
    AutoplayRejected(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("playback aborted")]
    Aborted,
}

/// Failures of the preference (like / watchlist) collaborator.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failures raised by the navigation callback. Never retried here.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("navigation to {content_id} failed: {message}")]
    Failed {
        content_id: ContentId,
        message: String,
    },

    #[error("no route for content {0}")]
    NoRoute(ContentId),
}
