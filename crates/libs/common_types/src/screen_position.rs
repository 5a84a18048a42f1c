use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Where a photo currently sits on screen, in pixels and radians.
///
/// `x`/`y` is the projected centre, `width`/`height` the axis-aligned
/// bounding box of the projected corners, `rotation` the angle of the
/// projected top edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct ScreenPosition {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
}

impl ScreenPosition {
    /// Sum of absolute differences over all five fields.
    #[must_use]
    pub fn delta(&self, other: &Self) -> f32 {
        (self.x - other.x).abs()
            + (self.y - other.y).abs()
            + (self.width - other.width).abs()
            + (self.height - other.height).abs()
            + (self.rotation - other.rotation).abs()
    }
}
