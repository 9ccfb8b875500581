use glam::Vec2;

use crate::geometry::Rect;

/// 2D scrolling camera: keeps a target centred on screen without ever showing
/// anything outside the map.
///
/// `offset` is added to world coordinates to get screen coordinates, so it is
/// always `<= 0` on both axes:
/// ```text
/// screen = world + offset
/// offset.x ∈ [-(map_w - view_w), 0]   (exactly 0 when map_w <= view_w)
/// offset.y ∈ [-(map_h - view_h), 0]   (exactly 0 when map_h <= view_h)
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Current world → screen translation.
    pub offset: Vec2,
    /// Map size in world pixels.
    pub map_size: Vec2,
    /// Visible region in screen pixels.
    pub viewport: Vec2,
}

impl Camera {
    pub fn new(map_width: f32, map_height: f32, viewport: Vec2) -> Self {
        Self {
            offset: Vec2::ZERO,
            map_size: Vec2::new(map_width, map_height),
            viewport,
        }
    }

    /// Recompute the offset so `target` sits at the viewport centre, then
    /// clamp each axis independently to the map edges.
    pub fn update(&mut self, target: &Rect) {
        let wanted = self.viewport / 2.0 - target.center();
        self.offset = Vec2::new(
            clamp_axis(wanted.x, self.map_size.x, self.viewport.x),
            clamp_axis(wanted.y, self.map_size.y, self.viewport.y),
        );
    }

    /// World rectangle → screen rectangle.
    pub fn apply_rect(&self, rect: &Rect) -> Rect {
        rect.translate(self.offset)
    }

    /// World point → screen point.
    pub fn apply_point(&self, point: Vec2) -> Vec2 {
        point + self.offset
    }
}

/// Clamp one axis of the offset. When the map is no larger than the
/// viewport the lower bound would be positive, so both bounds collapse to 0.
fn clamp_axis(wanted: f32, map_len: f32, view_len: f32) -> f32 {
    let min = (view_len - map_len).min(0.0);
    wanted.clamp(min, 0.0)
}
