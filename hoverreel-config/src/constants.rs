//! Canonical defaults. Both audience profiles share one timing table.

pub mod timings {
    /// Pointer must rest on a card this long before the preview opens.
    pub const OPEN_DELAY_MS: u64 = 300;
    /// Grace period for moving from the card onto the overlay.
    pub const CLOSE_DELAY_MS: u64 = 120;
    /// Entrance animation before the overlay becomes interactive.
    pub const ENTER_SETTLE_MS: u64 = 150;
    pub const AUTOPLAY_DELAY_MS: u64 = 800;
    pub const REDIRECT_DURATION_MS: u64 = 500;
    /// Cool-down before the trailer autoplays again after it ended.
    pub const REPLAY_COOLDOWN_MS: u64 = 4_000;
}

pub mod layout {
    pub const MARGIN: f32 = 16.0;
    /// Space between the card and the overlay when stacked above/below.
    pub const GAP: f32 = 8.0;
    pub const MAX_HEIGHT_FRACTION: f32 = 0.8;
    pub const MIN_SUPPORTED_WIDTH: f32 = 280.0;

    pub const MOBILE_MAX_WIDTH: f32 = 640.0;
    pub const TABLET_MAX_WIDTH: f32 = 768.0;
}

pub mod env {
    pub const CONFIG_PATH: &str = "HOVERREEL_CONFIG_PATH";
    pub const CONFIG_JSON: &str = "HOVERREEL_CONFIG_JSON";

    pub const DEFAULT_FILES: &[&str] = &[
        "hoverreel.toml",
        "hoverreel.json",
        "config/hoverreel.toml",
        "config/hoverreel.json",
    ];
}
