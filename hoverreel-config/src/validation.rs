//! Guard rails that reject incoherent preview configuration before any tile
//! is attached.

use thiserror::Error;

use crate::models::PreviewConfig;
use crate::models::layout::Breakpoint;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigGuardRailError {
    #[error("timings.open_delay_ms must be greater than zero")]
    ZeroOpenDelay,

    #[error(
        "timings.close_delay_ms ({close_ms}) must be shorter than timings.open_delay_ms ({open_ms})"
    )]
    CloseDelayNotShorter { close_ms: u64, open_ms: u64 },

    #[error("timings.redirect_duration_ms must be greater than zero")]
    ZeroRedirectDuration,

    #[error("{field} must be within (0, 1], got {value}")]
    FractionOutOfRange { field: String, value: f32 },

    #[error("{field} must be a finite, non-negative number, got {value}")]
    NegativeLength { field: String, value: f32 },

    #[error(
        "layout.breakpoints must ascend: mobile_max_width ({mobile}) < tablet_max_width ({tablet})"
    )]
    BreakpointsNotAscending { mobile: f32, tablet: f32 },

    #[error(
        "layout.breakpoints.{breakpoint:?}: min_width ({min}) exceeds max_width ({max})"
    )]
    InvertedWidthBounds {
        breakpoint: Breakpoint,
        min: f32,
        max: f32,
    },

    #[error("layout.breakpoints.{breakpoint:?}.aspect must be positive, got {aspect}")]
    NonPositiveAspect { breakpoint: Breakpoint, aspect: f32 },
}

fn check_fraction(field: &str, value: f32) -> Result<(), ConfigGuardRailError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigGuardRailError::FractionOutOfRange {
            field: field.to_string(),
            value,
        })
    }
}

fn check_length(field: &str, value: f32) -> Result<(), ConfigGuardRailError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigGuardRailError::NegativeLength {
            field: field.to_string(),
            value,
        })
    }
}

pub(crate) fn validate(config: &PreviewConfig) -> Result<(), ConfigGuardRailError> {
    let timings = &config.timings;
    if timings.open_delay_ms == 0 {
        return Err(ConfigGuardRailError::ZeroOpenDelay);
    }
    if timings.close_delay_ms >= timings.open_delay_ms {
        return Err(ConfigGuardRailError::CloseDelayNotShorter {
            close_ms: timings.close_delay_ms,
            open_ms: timings.open_delay_ms,
        });
    }
    if timings.redirect_duration_ms == 0 {
        return Err(ConfigGuardRailError::ZeroRedirectDuration);
    }

    let layout = &config.layout;
    check_length("layout.margin", layout.margin)?;
    check_length("layout.gap", layout.gap)?;
    check_length("layout.min_supported_width", layout.min_supported_width)?;
    check_fraction("layout.max_height_fraction", layout.max_height_fraction)?;

    let table = &layout.breakpoints;
    check_length("layout.breakpoints.mobile_max_width", table.mobile_max_width)?;
    if table.tablet_max_width <= table.mobile_max_width {
        return Err(ConfigGuardRailError::BreakpointsNotAscending {
            mobile: table.mobile_max_width,
            tablet: table.tablet_max_width,
        });
    }

    for (breakpoint, sizing) in table.rows() {
        check_fraction(
            &format!("layout.breakpoints.{breakpoint:?}.width_fraction"),
            sizing.width_fraction,
        )?;
        check_length(
            &format!("layout.breakpoints.{breakpoint:?}.min_width"),
            sizing.min_width,
        )?;
        if sizing.min_width > sizing.max_width {
            return Err(ConfigGuardRailError::InvertedWidthBounds {
                breakpoint,
                min: sizing.min_width,
                max: sizing.max_width,
            });
        }
        if !(sizing.aspect.is_finite() && sizing.aspect > 0.0) {
            return Err(ConfigGuardRailError::NonPositiveAspect {
                breakpoint,
                aspect: sizing.aspect,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass() {
        assert_eq!(PreviewConfig::default().validate(), Ok(()));
    }

    #[test]
    fn close_delay_must_be_shorter_than_open_delay() {
        let mut config = PreviewConfig::default();
        config.timings.close_delay_ms = config.timings.open_delay_ms;
        assert!(matches!(
            config.validate(),
            Err(ConfigGuardRailError::CloseDelayNotShorter { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_fraction() {
        let mut config = PreviewConfig::default();
        config.layout.max_height_fraction = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigGuardRailError::FractionOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_inverted_tiers() {
        let mut config = PreviewConfig::default();
        config.layout.breakpoints.tablet_max_width = 500.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigGuardRailError::BreakpointsNotAscending { .. })
        ));

        let mut config = PreviewConfig::default();
        config.layout.breakpoints.tablet.min_width = 900.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigGuardRailError::InvertedWidthBounds {
                breakpoint: Breakpoint::Tablet,
                ..
            })
        ));
    }

    #[test]
    fn rejects_negative_margin() {
        let mut config = PreviewConfig::default();
        config.layout.margin = -4.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigGuardRailError::NegativeLength { .. })
        ));
    }
}
