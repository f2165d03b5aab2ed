use hoverreel_model::OverlayPlacement;
use serde::Serialize;

use crate::media_preview::{PreviewStage, TrailerState};
use crate::transitions::RedirectFrame;

/// Everything a rendering layer needs to draw one tile's overlay.
///
/// `stage == None` means no overlay is shown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewView {
    pub stage: Option<PreviewStage>,
    pub placement: Option<OverlayPlacement>,
    /// Present while the redirect animation runs.
    pub redirect: Option<RedirectFrame>,
    pub trailer: TrailerState,
    pub trailer_loaded: bool,
    pub muted: bool,
    pub show_volume_controls: bool,
    pub poster_url: Option<String>,
    pub is_liked: bool,
    pub is_in_list: bool,
}

impl PreviewView {
    pub fn is_visible(&self) -> bool {
        self.stage.is_some()
    }
}
