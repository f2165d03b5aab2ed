use serde::{Deserialize, Serialize};

use crate::constants::layout as defaults;

/// Viewport width tier used to pick overlay sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

/// Overlay size formula for one breakpoint.
///
/// `width = clamp(viewport_width * width_fraction, min_width, max_width)`
/// and `height = width * aspect`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct OverlaySizing {
    pub width_fraction: f32,
    pub min_width: f32,
    pub max_width: f32,
    /// Height as a multiple of the overlay width.
    pub aspect: f32,
}

impl OverlaySizing {
    pub fn width_for(&self, viewport_width: f32) -> f32 {
        (viewport_width * self.width_fraction)
            .max(self.min_width)
            .min(self.max_width)
    }

    pub fn height_for(&self, width: f32) -> f32 {
        width * self.aspect
    }
}

/// Sizing rows keyed by viewport breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BreakpointTable {
    /// Viewports narrower than this are `Mobile`.
    pub mobile_max_width: f32,
    /// Viewports narrower than this (and not mobile) are `Tablet`.
    pub tablet_max_width: f32,
    pub mobile: OverlaySizing,
    pub tablet: OverlaySizing,
    pub desktop: OverlaySizing,
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self {
            mobile_max_width: defaults::MOBILE_MAX_WIDTH,
            tablet_max_width: defaults::TABLET_MAX_WIDTH,
            mobile: OverlaySizing {
                width_fraction: 0.92,
                min_width: 260.0,
                max_width: 420.0,
                aspect: 1.05,
            },
            tablet: OverlaySizing {
                width_fraction: 0.6,
                min_width: 320.0,
                max_width: 440.0,
                aspect: 0.95,
            },
            desktop: OverlaySizing {
                width_fraction: 0.3,
                min_width: 340.0,
                max_width: 480.0,
                aspect: 0.9,
            },
        }
    }
}

impl BreakpointTable {
    pub fn breakpoint_for(&self, viewport_width: f32) -> Breakpoint {
        if viewport_width < self.mobile_max_width {
            Breakpoint::Mobile
        } else if viewport_width < self.tablet_max_width {
            Breakpoint::Tablet
        } else {
            Breakpoint::Desktop
        }
    }

    pub fn sizing(&self, breakpoint: Breakpoint) -> &OverlaySizing {
        match breakpoint {
            Breakpoint::Mobile => &self.mobile,
            Breakpoint::Tablet => &self.tablet,
            Breakpoint::Desktop => &self.desktop,
        }
    }

    pub(crate) fn rows(&self) -> [(Breakpoint, &OverlaySizing); 3] {
        [
            (Breakpoint::Mobile, &self.mobile),
            (Breakpoint::Tablet, &self.tablet),
            (Breakpoint::Desktop, &self.desktop),
        ]
    }
}

/// Geometry knobs for overlay placement.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Minimum distance between the overlay and every viewport edge.
    pub margin: f32,
    /// Distance between the card and the overlay.
    pub gap: f32,
    /// Overlay height never exceeds this share of the viewport height.
    pub max_height_fraction: f32,
    /// Narrowest viewport the containment guarantee is made for.
    pub min_supported_width: f32,
    pub breakpoints: BreakpointTable,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: defaults::MARGIN,
            gap: defaults::GAP,
            max_height_fraction: defaults::MAX_HEIGHT_FRACTION,
            min_supported_width: defaults::MIN_SUPPORTED_WIDTH,
            breakpoints: BreakpointTable::default(),
        }
    }
}
