#![allow(dead_code)]

use std::cell::RefCell;

use image::{Rgba, RgbaImage};
use tilewalk::renderer::text::TextRenderer;

/// Text renderer that draws one opaque pixel per char and remembers every
/// string it was asked to render.
#[derive(Default)]
pub struct RecordingText {
    pub calls: RefCell<Vec<String>>,
}

impl RecordingText {
    pub fn count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn last(&self) -> Option<String> {
        self.calls.borrow().last().cloned()
    }
}

impl TextRenderer for RecordingText {
    fn render(&self, text: &str, color: Rgba<u8>) -> RgbaImage {
        self.calls.borrow_mut().push(text.to_owned());
        RgbaImage::from_pixel(text.chars().count() as u32, 1, color)
    }
}
