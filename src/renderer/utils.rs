// ── Letterbox viewport math ───────────────────────────────────────────────────
//
// The framebuffer always has the logical size from the config. When the OS
// window differs (resized, or borderless on a monitor of another shape) the
// framebuffer is scaled uniformly and centred, leaving black bars.

use crate::window::WindowConfig;

/// Rectangle in physical pixels the framebuffer is drawn into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const EMPTY: Self = Self { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };
}

/// Largest uniformly scaled, centred copy of the logical size that fits the
/// physical size:
/// ```text
/// scale = min(pw / lw, ph / lh)
/// x = (pw - lw * scale) / 2,  y = (ph - lh * scale) / 2
/// ```
/// A zero logical dimension yields [`Viewport::EMPTY`].
pub fn letterbox_viewport(config: &WindowConfig) -> Viewport {
    if config.logical_width == 0 || config.logical_height == 0 {
        return Viewport::EMPTY;
    }

    let pw = config.physical_width as f32;
    let ph = config.physical_height as f32;
    let lw = config.logical_width as f32;
    let lh = config.logical_height as f32;

    let scale = (pw / lw).min(ph / lh);
    let width = lw * scale;
    let height = lh * scale;

    Viewport { x: (pw - width) / 2.0, y: (ph - height) / 2.0, width, height }
}
