use std::fmt;
use std::rc::Rc;

use image::{Rgba, RgbaImage};
use unicode_segmentation::UnicodeSegmentation;

use crate::renderer::text::TextRenderer;

/// A string revealed one grapheme per [`advance`](Self::advance).
///
/// The cursor counts revealed graphemes. Whitespace never ends an advance:
/// revealing a space carries on to the next grapheme in the same call, so
/// words appear without a pause between them. A rendered image of the
/// revealed prefix is cached and rebuilt exactly once per advance that
/// changes the prefix.
pub struct ScrollingText {
    source: String,
    /// Byte offset just past each grapheme of `source`.
    ends: Vec<usize>,
    cursor: usize,
    done: bool,
    color: Rgba<u8>,
    renderer: Rc<dyn TextRenderer>,
    rendered: Option<RgbaImage>,
}

impl ScrollingText {
    /// Nothing revealed yet. An empty `text` is done from the start.
    pub fn new(text: impl Into<String>, color: Rgba<u8>, renderer: Rc<dyn TextRenderer>) -> Self {
        let source = text.into();
        let ends = grapheme_ends(&source);
        let done = ends.is_empty();
        Self { source, ends, cursor: 0, done, color, renderer, rendered: None }
    }

    /// Already fully revealed and never rendered. Used for the blank filler
    /// lines of a dialog page.
    pub fn finished(text: impl Into<String>, color: Rgba<u8>, renderer: Rc<dyn TextRenderer>) -> Self {
        let mut text = Self::new(text, color, renderer);
        text.cursor = text.ends.len();
        text.done = true;
        text
    }

    /// Reveal the next grapheme (and any whitespace run it starts). Returns
    /// `false` and changes nothing when the text is already done.
    pub fn advance(&mut self) -> bool {
        if self.done {
            return false;
        }
        let len = self.ends.len();
        self.cursor += 1;
        while self.cursor < len && self.grapheme(self.cursor - 1).trim().is_empty() {
            self.cursor += 1;
        }
        // A whitespace tail is revealed with the last visible grapheme.
        if (self.cursor..len).all(|i| self.grapheme(i).trim().is_empty()) {
            self.cursor = len;
        }
        self.done = self.cursor == len;
        self.rendered = Some(self.renderer.render(self.revealed(), self.color));
        true
    }

    /// Start over from an empty prefix and immediately reveal the first
    /// grapheme, so a reset line is never shown empty.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.done = self.ends.is_empty();
        self.rendered = None;
        self.advance();
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The prefix shown so far.
    pub fn revealed(&self) -> &str {
        match self.cursor {
            0 => "",
            n => &self.source[..self.ends[n - 1]],
        }
    }

    /// Number of graphemes revealed.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length of the source in graphemes.
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// Cached image of [`revealed`](Self::revealed); `None` until the first
    /// advance.
    pub fn rendered(&self) -> Option<&RgbaImage> {
        self.rendered.as_ref()
    }

    fn grapheme(&self, index: usize) -> &str {
        let start = if index == 0 { 0 } else { self.ends[index - 1] };
        &self.source[start..self.ends[index]]
    }
}

impl fmt::Debug for ScrollingText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollingText")
            .field("source", &self.source)
            .field("cursor", &self.cursor)
            .field("done", &self.done)
            .finish()
    }
}

fn grapheme_ends(text: &str) -> Vec<usize> {
    text.grapheme_indices(true)
        .map(|(start, g)| start + g.len())
        .collect()
}
