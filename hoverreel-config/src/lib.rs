//! Shared configuration library for hoverreel.
//!
//! Centralizes the canonical preview timing table, the breakpoint sizing
//! table, the audience profile and the guard rails that keep them coherent.
//! Every consumer loads through [`PreviewConfig::load_from_env`] so there is
//! a single source of truth for defaults.

pub mod constants;
pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{PreviewConfigSource, error::ConfigLoadError};
pub use models::audience::{AudienceProfile, PlaybackCapabilities};
pub use models::layout::{
    Breakpoint, BreakpointTable, LayoutConfig, OverlaySizing,
};
pub use models::timings::PreviewTimings;
pub use models::PreviewConfig;
pub use validation::ConfigGuardRailError;
