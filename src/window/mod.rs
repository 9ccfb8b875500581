pub mod config;

pub use config::{WindowConfig, WindowMode};

use winit::dpi::PhysicalSize;
use winit::window::{Fullscreen, Window};

/// Apply `config.mode` to `window`.
///
/// `Windowed` drops any fullscreen state and requests the physical size.
/// `Borderless` covers the monitor the window currently sits on; the
/// framebuffer keeps its logical size and is letterboxed by the presenter.
pub fn apply_window_settings(window: &Window, config: &WindowConfig) {
    match config.mode {
        WindowMode::Windowed => {
            window.set_fullscreen(None);
            window.set_decorations(true);
            // The resize arrives later as `WindowEvent::Resized` on most
            // platforms, where the presenter reconfigures the surface.
            let _ = window.request_inner_size(PhysicalSize::new(
                config.physical_width,
                config.physical_height,
            ));
        }
        WindowMode::Borderless => {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
    }
}
