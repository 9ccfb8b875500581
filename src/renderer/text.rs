use std::path::Path;

use fontdue::{Font, FontSettings};
use image::{Rgba, RgbaImage};

use crate::error::LoadError;

// ── TextRenderer ──────────────────────────────────────────────────────────────

/// Turns a string into a tightly sized RGBA image.
///
/// Everything that shows text (dialog lines, the pause banner) goes through
/// this trait, so game logic never touches a font directly and tests can
/// count rasterizations with a stub.
pub trait TextRenderer {
    /// Rasterize `text` as a single line in `color` on a transparent
    /// background. An empty string yields a zero-width image.
    fn render(&self, text: &str, color: Rgba<u8>) -> RgbaImage;
}

// ── TtfText ───────────────────────────────────────────────────────────────────

/// TrueType / OpenType text at one fixed pixel size.
pub struct TtfText {
    font: Font,
    px: f32,
    ascent: f32,
    line_height: f32,
}

impl TtfText {
    pub fn from_bytes(bytes: &[u8], px: f32) -> Result<Self, String> {
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|e| e.to_string())?;
        // Fonts without horizontal metrics still render; baseline sits at `px`.
        let (ascent, line_height) = match font.horizontal_line_metrics(px) {
            Some(m) => (m.ascent, m.ascent - m.descent),
            None => (px, px * 1.25),
        };
        Ok(Self { font, px, ascent, line_height })
    }

    pub fn load(path: impl AsRef<Path>, px: f32) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| LoadError::io(path, e))?;
        Self::from_bytes(&bytes, px).map_err(|reason| LoadError::Font {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn line_width(&self, text: &str) -> u32 {
        text.chars()
            .map(|ch| self.font.metrics(ch, self.px).advance_width)
            .sum::<f32>()
            .ceil() as u32
    }
}

impl TextRenderer for TtfText {
    fn render(&self, text: &str, color: Rgba<u8>) -> RgbaImage {
        let width = self.line_width(text);
        let height = self.line_height.ceil().max(1.0) as u32;
        let mut out = RgbaImage::new(width, height);

        let mut pen_x = 0.0f32;
        for ch in text.chars() {
            let (metrics, coverage) = self.font.rasterize(ch, self.px);
            // fontdue's ymin is the offset from the baseline to the bitmap's
            // bottom edge, positive upward.
            let left = (pen_x + metrics.xmin as f32).round() as i64;
            let top = (self.ascent - metrics.height as f32 - metrics.ymin as f32).round() as i64;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let alpha = coverage[gy * metrics.width + gx];
                    if alpha == 0 {
                        continue;
                    }
                    let x = left + gx as i64;
                    let y = top + gy as i64;
                    if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                        continue;
                    }
                    let a = (alpha as u16 * color.0[3] as u16 / 255) as u8;
                    let px = out.get_pixel_mut(x as u32, y as u32);
                    // Neighbouring glyphs may overlap by a pixel; keep the stronger one.
                    if a > px.0[3] {
                        *px = Rgba([color.0[0], color.0[1], color.0[2], a]);
                    }
                }
            }
            pen_x += metrics.advance_width;
        }
        out
    }
}
