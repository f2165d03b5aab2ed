//! Core data model definitions shared across hoverreel crates.
#![allow(missing_docs)]

pub mod content;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod preferences;
pub mod prelude;

// Intentionally curated re-exports for downstream consumers.
pub use content::{
    AgeRating, AssetType, ContentSummary, ContentType, MediaAsset,
    TrailerSource,
};
pub use error::{ModelError, Result as ModelResult};
pub use geometry::{CardGeometry, OverlayPlacement, Viewport};
pub use ids::ContentId;
pub use preferences::{
    LikeAction, LikeToggle, PreferenceSnapshot, WatchlistAction,
    WatchlistToggle,
};
