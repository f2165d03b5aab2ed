pub mod audience;
pub mod layout;
pub mod timings;

use serde::{Deserialize, Serialize};

use audience::{AudienceProfile, PlaybackCapabilities};
use layout::LayoutConfig;
use timings::PreviewTimings;

use crate::validation::ConfigGuardRailError;

/// Complete preview configuration shared by every tile of a grid.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub timings: PreviewTimings,
    pub layout: LayoutConfig,
    pub audience: AudienceProfile,
}

impl PreviewConfig {
    pub fn for_audience(audience: AudienceProfile) -> Self {
        Self {
            audience,
            ..Self::default()
        }
    }

    pub fn capabilities(&self) -> PlaybackCapabilities {
        self.audience.capabilities()
    }

    pub fn validate(&self) -> Result<(), ConfigGuardRailError> {
        crate::validation::validate(self)
    }
}
