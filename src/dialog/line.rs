use std::rc::Rc;

use glam::Vec2;
use image::Rgba;

use super::scrolling::ScrollingText;
use crate::renderer::canvas::Canvas;
use crate::renderer::text::TextRenderer;

/// One line of a dialog page: scrolling text plus where it is drawn.
#[derive(Debug)]
pub struct DialogLine {
    pub text: ScrollingText,
    pub position: Vec2,
}

impl DialogLine {
    pub fn new(text: impl Into<String>, color: Rgba<u8>, renderer: Rc<dyn TextRenderer>) -> Self {
        Self {
            text: ScrollingText::new(text, color, renderer),
            position: Vec2::ZERO,
        }
    }

    /// Filler for the unused slots of a short page: a single space that is
    /// already fully revealed.
    pub fn blank(color: Rgba<u8>, renderer: Rc<dyn TextRenderer>) -> Self {
        Self {
            text: ScrollingText::finished(" ", color, renderer),
            position: Vec2::ZERO,
        }
    }

    pub fn is_done(&self) -> bool {
        self.text.is_done()
    }

    pub fn advance(&mut self) -> bool {
        self.text.advance()
    }

    /// Replay the line from its first grapheme.
    pub fn reset(&mut self) {
        self.text.reset();
    }

    /// Draw the revealed prefix. A line that has never advanced draws nothing.
    pub fn draw(&self, canvas: &mut Canvas) {
        if let Some(image) = self.text.rendered() {
            canvas.blit(image, self.position);
        }
    }
}
