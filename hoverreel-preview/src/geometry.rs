//! Overlay placement.
//!
//! Pure arithmetic over the card rectangle and the viewport: identical
//! inputs always produce identical placements, and the result is clamped
//! rather than rejected when inputs are odd (NaN coordinates, cards scrolled
//! off-screen, viewports narrower than the overlay).

use hoverreel_config::{Breakpoint, LayoutConfig};
use hoverreel_model::{CardGeometry, OverlayPlacement, Viewport};
use serde::Serialize;

/// Which side of the card the overlay ended up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementSide {
    Above,
    Below,
}

/// Placement plus the decisions that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPlacement {
    pub placement: OverlayPlacement,
    pub side: PlacementSide,
    pub breakpoint: Breakpoint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryCalculator {
    layout: LayoutConfig,
}

impl GeometryCalculator {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn compute_placement(
        &self,
        card: &CardGeometry,
        viewport: Viewport,
    ) -> OverlayPlacement {
        self.resolve(card, viewport).placement
    }

    pub fn resolve(
        &self,
        card: &CardGeometry,
        viewport: Viewport,
    ) -> ResolvedPlacement {
        let layout = &self.layout;
        let margin = non_negative(layout.margin);
        let gap = non_negative(layout.gap);
        let vw = non_negative(viewport.width);
        let vh = non_negative(viewport.height);

        let available_width = (vw - 2.0 * margin).max(0.0);
        let available_height = (vh - 2.0 * margin).max(0.0);

        let breakpoint = layout.breakpoints.breakpoint_for(vw);
        let sizing = layout.breakpoints.sizing(breakpoint);

        // Viewports narrower than the tier minimum shrink the overlay to fit.
        let width = non_negative(sizing.width_for(vw)).min(available_width);
        let height = non_negative(sizing.height_for(width))
            .min(vh * layout.max_height_fraction)
            .min(available_height);

        let left = clamp_axis(
            card.center_x() - width / 2.0,
            margin,
            vw - margin - width,
        );

        let above_top = card.top - gap - height;
        let below_top = card.bottom() + gap;
        let fits_above = above_top >= margin;
        let fits_below = below_top + height <= vh - margin;
        let side = if fits_above {
            PlacementSide::Above
        } else if fits_below {
            PlacementSide::Below
        } else {
            // Neither side fits: favour the roomier one, clamping does the rest.
            let space_above = card.top - gap - margin;
            let space_below = vh - margin - below_top;
            if space_above >= space_below {
                PlacementSide::Above
            } else {
                PlacementSide::Below
            }
        };

        let preferred_top = match side {
            PlacementSide::Above => above_top,
            PlacementSide::Below => below_top,
        };
        let top = clamp_axis(preferred_top, margin, vh - margin - height);

        ResolvedPlacement {
            placement: OverlayPlacement {
                left,
                top,
                width,
                height,
            },
            side,
            breakpoint,
        }
    }
}

fn non_negative(value: f32) -> f32 {
    // `max` discards NaN in favour of the other operand.
    value.max(0.0)
}

/// Clamp into `[low, high]`; collapses to `low` when the range is empty.
/// NaN input lands on `low`.
fn clamp_axis(value: f32, low: f32, high: f32) -> f32 {
    if high < low {
        return low;
    }
    value.max(low).min(high)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> GeometryCalculator {
        GeometryCalculator::new(LayoutConfig::default())
    }

    #[test]
    fn prefers_above_when_there_is_room() {
        let viewport = Viewport::new(1280.0, 800.0);
        let card = CardGeometry::new(500.0, 500.0, 200.0, 120.0);
        let resolved = calculator().resolve(&card, viewport);

        assert_eq!(resolved.side, PlacementSide::Above);
        assert_eq!(resolved.breakpoint, Breakpoint::Desktop);
        let placement = resolved.placement;
        assert!((placement.bottom() - (card.top - 8.0)).abs() < 0.01);
        assert!((placement.left + placement.width / 2.0 - card.center_x()).abs() < 0.01);
    }

    #[test]
    fn falls_back_below_near_top_edge() {
        let viewport = Viewport::new(1280.0, 800.0);
        let card = CardGeometry::new(500.0, 40.0, 200.0, 120.0);
        let resolved = calculator().resolve(&card, viewport);

        assert_eq!(resolved.side, PlacementSide::Below);
        assert!((resolved.placement.top - (card.bottom() + 8.0)).abs() < 0.01);
    }

    #[test]
    fn tie_break_picks_roomier_side() {
        // Tall overlay on a short screen: neither side fits outright.
        let viewport = Viewport::new(1024.0, 420.0);
        let near_bottom = CardGeometry::new(400.0, 300.0, 180.0, 100.0);
        let near_top = CardGeometry::new(400.0, 30.0, 180.0, 100.0);

        let calc = calculator();
        assert_eq!(calc.resolve(&near_bottom, viewport).side, PlacementSide::Above);
        assert_eq!(calc.resolve(&near_top, viewport).side, PlacementSide::Below);
    }

    #[test]
    fn left_edge_card_on_narrow_viewport_clamps_to_margin() {
        let viewport = Viewport::new(320.0, 640.0);
        let card = CardGeometry::new(0.0, 10.0, 150.0, 220.0);
        let placement = calculator().compute_placement(&card, viewport);

        assert_eq!(placement.left, 16.0);
        assert_eq!(placement.width, 288.0);
        assert!(placement.is_within(viewport, 16.0));
    }

    #[test]
    fn height_is_capped_on_short_screens() {
        let viewport = Viewport::new(1400.0, 300.0);
        let card = CardGeometry::new(600.0, 100.0, 200.0, 100.0);
        let placement = calculator().compute_placement(&card, viewport);

        assert!(placement.height <= 300.0 * 0.8 + 0.01);
        assert!(placement.is_within(viewport, 16.0));
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let viewport = Viewport::new(900.0, 700.0);
        let card = CardGeometry::new(123.4, 456.7, 180.0, 260.0);
        let calc = calculator();
        assert_eq!(
            calc.compute_placement(&card, viewport),
            calc.compute_placement(&card, viewport)
        );
    }

    #[test]
    fn nan_card_coordinates_still_land_inside() {
        let viewport = Viewport::new(1024.0, 768.0);
        let card = CardGeometry::new(f32::NAN, f32::NAN, 100.0, 100.0);
        let placement = calculator().compute_placement(&card, viewport);
        assert!(placement.is_within(viewport, 16.0));
    }

    #[test]
    fn containment_sweep() {
        let calc = calculator();
        let margin = calc.layout().margin;
        let mut checked = 0;

        for vw in (280..=2560).step_by(97) {
            for vh in (320..=1600).step_by(113) {
                let viewport = Viewport::new(vw as f32, vh as f32);
                for left in (-200..vw + 200).step_by(131) {
                    for top in (-300..vh + 300).step_by(89) {
                        let card = CardGeometry::new(
                            left as f32,
                            top as f32,
                            180.0,
                            260.0,
                        );
                        let placement = calc.compute_placement(&card, viewport);
                        assert!(
                            placement.is_within(viewport, margin),
                            "{placement:?} escapes {viewport:?} for {card:?}"
                        );
                        checked += 1;
                    }
                }
            }
        }

        assert!(checked > 1000);
    }
}
