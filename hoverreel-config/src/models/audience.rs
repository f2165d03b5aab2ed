use serde::{Deserialize, Serialize};

/// Which experience the tile grid is rendered for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AudienceProfile {
    #[default]
    Standard,
    Kids,
}

/// Playback capabilities granted to the preview state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackCapabilities {
    /// Trailer audio is never enabled, whatever the user does.
    pub force_muted: bool,
    /// Autoplay starts with sound when the platform allows it.
    pub allow_unmuted_autoplay: bool,
    pub show_volume_controls: bool,
}

impl AudienceProfile {
    pub fn capabilities(&self) -> PlaybackCapabilities {
        match self {
            AudienceProfile::Standard => PlaybackCapabilities {
                force_muted: false,
                allow_unmuted_autoplay: true,
                show_volume_controls: true,
            },
            AudienceProfile::Kids => PlaybackCapabilities {
                force_muted: true,
                allow_unmuted_autoplay: false,
                show_volume_controls: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kids_profile_is_always_muted() {
        let caps = AudienceProfile::Kids.capabilities();
        assert!(caps.force_muted);
        assert!(!caps.allow_unmuted_autoplay);
        assert!(!caps.show_volume_controls);

        let caps = AudienceProfile::Standard.capabilities();
        assert!(!caps.force_muted);
        assert!(caps.allow_unmuted_autoplay);
    }
}
