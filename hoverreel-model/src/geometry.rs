//! Geometry primitives in viewport (CSS pixel) coordinates.

/// Size of the visible viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Bounding box of the source tile, captured once when hover intent opens.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardGeometry {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CardGeometry {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }
}

/// Computed position and size of the preview overlay.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayPlacement {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl OverlayPlacement {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// True when the overlay sits inside `viewport` shrunk by `margin` on
    /// every side. A small epsilon absorbs float rounding.
    pub fn is_within(&self, viewport: Viewport, margin: f32) -> bool {
        const EPS: f32 = 0.01;
        self.left >= margin - EPS
            && self.top >= margin - EPS
            && self.right() <= viewport.width - margin + EPS
            && self.bottom() <= viewport.height - margin + EPS
    }

    /// Whether a pointer position falls on the overlay.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}
