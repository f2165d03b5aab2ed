//! Frequently used model types for UI and orchestration crates.

pub use crate::content::{
    AgeRating, AssetType, ContentSummary, ContentType, MediaAsset,
    TrailerSource,
};
pub use crate::geometry::{CardGeometry, OverlayPlacement, Viewport};
pub use crate::ids::ContentId;
pub use crate::preferences::{
    LikeAction, LikeToggle, PreferenceSnapshot, WatchlistAction,
    WatchlistToggle,
};
