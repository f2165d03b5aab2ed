//! Boundaries to the world outside the preview: the tile element, the
//! preference backend and the navigation callbacks.

use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use hoverreel_model::{
    CardGeometry, ContentId, ContentSummary, LikeAction, LikeToggle,
    PreferenceSnapshot, TrailerSource, Viewport, WatchlistAction,
    WatchlistToggle,
};

use crate::error::{NavigationError, PreferenceError};
use crate::media_preview::MediaHandle;

/// The card element a controller is attached to.
///
/// Geometry is queried fresh every time a preview opens and never cached
/// across sessions.
pub trait TileSurface {
    fn card_rect(&self) -> CardGeometry;
    fn viewport(&self) -> Viewport;
    /// Build the trailer element for a new preview.
    fn create_media(&self, trailer: &TrailerSource) -> Box<dyn MediaHandle>;
}

/// Liked / watchlist backend. Toggles are idempotent on the server side.
#[async_trait]
pub trait PreferenceService: Send + Sync {
    async fn fetch(
        &self,
        content_id: &ContentId,
    ) -> Result<PreferenceSnapshot, PreferenceError>;

    async fn toggle_like(
        &self,
        content_id: &ContentId,
        action: LikeAction,
    ) -> Result<LikeToggle, PreferenceError>;

    async fn toggle_watchlist(
        &self,
        content_id: &ContentId,
        action: WatchlistAction,
    ) -> Result<WatchlistToggle, PreferenceError>;
}

pub type NavigateFn = Rc<dyn Fn(&ContentId) -> Result<(), NavigationError>>;
pub type DetailsFn = Rc<dyn Fn(&ContentSummary, CardGeometry)>;

/// Callbacks supplied by the surrounding page.
#[derive(Clone)]
pub struct PreviewCallbacks {
    pub navigate: NavigateFn,
    pub show_details: DetailsFn,
}

impl PreviewCallbacks {
    pub fn new<N, D>(navigate: N, show_details: D) -> Self
    where
        N: Fn(&ContentId) -> Result<(), NavigationError> + 'static,
        D: Fn(&ContentSummary, CardGeometry) + 'static,
    {
        Self {
            navigate: Rc::new(navigate),
            show_details: Rc::new(show_details),
        }
    }
}

impl fmt::Debug for PreviewCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewCallbacks").finish_non_exhaustive()
    }
}
