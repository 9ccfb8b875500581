use glam::Vec2;
use image::{imageops, Pixel, Rgba, RgbaImage};

use crate::geometry::Rect;

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
/// Outline colour for debug rectangles.
pub const DEBUG_BLUE: Rgba<u8> = Rgba([100, 200, 255, 255]);

/// CPU framebuffer the whole frame is composed into before it is handed to
/// the presenter. Every drawing call clips to the canvas and alpha-blends.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::new(width, height) }
    }

    pub fn width(&self) -> u32 { self.image.width() }
    pub fn height(&self) -> u32 { self.image.height() }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA8 rows, ready for a texture upload.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn clear(&mut self, color: Rgba<u8>) {
        for px in self.image.pixels_mut() {
            *px = color;
        }
    }

    /// Draw `src` with its top-left corner at `pos` (truncated to whole pixels).
    pub fn blit(&mut self, src: &RgbaImage, pos: Vec2) {
        imageops::overlay(&mut self.image, src, pos.x as i64, pos.y as i64);
    }

    /// Draw `src` centred on `center`.
    pub fn blit_centered(&mut self, src: &RgbaImage, center: Vec2) {
        let half = Vec2::new(src.width() as f32, src.height() as f32) / 2.0;
        self.blit(src, center - half);
    }

    pub fn fill_rect(&mut self, rect: &Rect, color: Rgba<u8>) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else { return };
        for y in y0..y1 {
            for x in x0..x1 {
                self.image.get_pixel_mut(x, y).blend(&color);
            }
        }
    }

    /// Outline `thickness` pixels wide, drawn inside `rect`.
    pub fn stroke_rect(&mut self, rect: &Rect, color: Rgba<u8>, thickness: f32) {
        let t = thickness.min(rect.w / 2.0).min(rect.h / 2.0).max(0.0);
        if t == 0.0 {
            return;
        }
        self.fill_rect(&Rect::new(rect.x, rect.y, rect.w, t), color);
        self.fill_rect(&Rect::new(rect.x, rect.bottom() - t, rect.w, t), color);
        self.fill_rect(&Rect::new(rect.x, rect.y + t, t, rect.h - 2.0 * t), color);
        self.fill_rect(&Rect::new(rect.right() - t, rect.y + t, t, rect.h - 2.0 * t), color);
    }

    /// Blend a translucent black layer over the whole canvas.
    pub fn dim(&mut self, alpha: u8) {
        let full = Rect::new(0.0, 0.0, self.width() as f32, self.height() as f32);
        self.fill_rect(&full, Rgba([0, 0, 0, alpha]));
    }

    /// Pixel bounds of `rect` inside the canvas, or `None` if nothing is visible.
    fn clip(&self, rect: &Rect) -> Option<(u32, u32, u32, u32)> {
        let w = self.width() as f32;
        let h = self.height() as f32;
        let x0 = rect.left().floor().clamp(0.0, w);
        let y0 = rect.top().floor().clamp(0.0, h);
        let x1 = rect.right().floor().clamp(0.0, w);
        let y1 = rect.bottom().floor().clamp(0.0, h);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}
