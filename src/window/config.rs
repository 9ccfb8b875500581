use serde::Deserialize;

// ── WindowMode ────────────────────────────────────────────────────────────────

/// Controls how the OS window is presented.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    /// Decorated window at the configured size.
    #[default]
    Windowed,
    /// Borderless window covering the current monitor.
    Borderless,
}

// ── WindowConfig ──────────────────────────────────────────────────────────────

/// Window size snapshot.
///
/// - **physical** dimensions are the real pixel size of the OS window.
/// - **logical** dimensions are the size of the game framebuffer; the world
///   and the dialog box are always laid out against these.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowConfig {
    pub physical_width: u32,
    pub physical_height: u32,
    pub logical_width: u32,
    pub logical_height: u32,
    pub mode: WindowMode,
}

impl WindowConfig {
    /// A windowed config whose physical size equals its logical size.
    pub fn new(width: u32, height: u32, mode: WindowMode) -> Self {
        Self {
            physical_width: width,
            physical_height: height,
            logical_width: width,
            logical_height: height,
            mode,
        }
    }

    /// Record a new OS window size; the logical size never changes.
    pub fn resized(&self, physical_width: u32, physical_height: u32) -> Self {
        Self { physical_width, physical_height, ..self.clone() }
    }

    /// `logical_width / logical_height`, or `0.0` when the height is zero.
    pub fn aspect_ratio(&self) -> f32 {
        if self.logical_height == 0 {
            return 0.0;
        }
        self.logical_width as f32 / self.logical_height as f32
    }
}
