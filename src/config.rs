use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::LoadError;
use crate::window::WindowMode;

/// Placement of the dialog box and its four text lines, in screen pixels.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DialogLayout {
    /// Distance of the box's left edge from the left of the screen.
    pub left: f32,
    /// Distance of the box's top edge from the bottom of the screen.
    pub bottom_offset: f32,
    /// Total horizontal margin; the box is `viewport_width - margin` wide.
    pub horizontal_margin: f32,
    pub height: f32,
    /// Width of the white frame around the black panel.
    pub border: f32,
    /// Offset of the first text line from the box origin.
    pub text_inset: f32,
    pub line_spacing: f32,
}

impl Default for DialogLayout {
    fn default() -> Self {
        Self {
            left: 180.0,
            bottom_offset: 140.0,
            horizontal_margin: 360.0,
            height: 130.0,
            border: 5.0,
            text_inset: 10.0,
            line_spacing: 30.0,
        }
    }
}

/// Everything tunable about a run. Every field has a default, so an empty
/// JSON object (or no file at all) gives a playable game.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub window_mode: WindowMode,
    pub tile_size: f32,
    /// Simulation steps per second.
    pub fps: u32,
    /// Interval between dialog text ticks, in milliseconds.
    pub tick_interval_ms: u64,
    /// Player speed in pixels per second.
    pub player_speed: f32,
    /// Player body edge as a fraction of `tile_size`.
    pub body_scale: f32,
    /// Distance from the body centre to the point the player interacts with.
    pub interact_reach: f32,
    /// Velocity scale applied on both axes when moving diagonally.
    pub diagonal_scale: f32,
    pub asset_dir: PathBuf,
    pub map_dir: PathBuf,
    pub start_map: String,
    /// Font file, relative to `asset_dir`.
    pub font: String,
    pub font_size: f32,
    pub pause_font_size: f32,
    pub player_sprite: String,
    pub background: [u8; 4],
    pub log_level: String,
    pub dialog: DialogLayout,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "tilewalk".into(),
            width: 1024,
            height: 768,
            window_mode: WindowMode::Windowed,
            tile_size: 64.0,
            fps: 60,
            tick_interval_ms: 40,
            player_speed: 300.0,
            body_scale: 0.75,
            interact_reach: 48.0,
            diagonal_scale: 0.7071,
            asset_dir: PathBuf::from("assets"),
            map_dir: PathBuf::from("maps"),
            start_map: "testMap2.tmx".into(),
            font: "chunky.ttf".into(),
            font_size: 25.0,
            pause_font_size: 105.0,
            player_sprite: "mainCharacter.png".into(),
            background: [40, 40, 40, 255],
            log_level: "info".into(),
            dialog: DialogLayout::default(),
        }
    }
}

impl GameConfig {
    /// Read a JSON config. A file that does not exist yields the defaults;
    /// a file that exists but does not parse is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text).map_err(|e| LoadError::format(path, e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(LoadError::io(path, e)),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }

    /// Edge length of the square player and NPC bodies.
    pub fn body_size(&self) -> f32 {
        self.tile_size * self.body_scale
    }

    pub fn viewport(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn asset_path(&self, relative: &str) -> PathBuf {
        self.asset_dir.join(relative.trim())
    }

    pub fn map_path(&self, file: &str) -> PathBuf {
        self.map_dir.join(file.trim())
    }
}
