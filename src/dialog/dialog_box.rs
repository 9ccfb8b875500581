// ── Dialog box ────────────────────────────────────────────────────────────────
//
// Four line slots shown as one page, fed from a queue of pending strings.
//
//   Closed ──open(lines)──▶ Open ──tick──▶ Open   (first unfinished slot +1)
//                             │
//                             ├─advance, slot 4 unfinished─▶ Open (flush)
//                             ├─advance, queue not empty───▶ Open (next page)
//                             └─advance, queue empty───────▶ Closed
//
// Only one grapheme is revealed per tick across the whole box, always in the
// earliest slot that is still scrolling, so lines never animate together.

use std::collections::VecDeque;
use std::rc::Rc;

use glam::Vec2;
use image::Rgba;

use super::line::DialogLine;
use crate::config::DialogLayout;
use crate::geometry::Rect;
use crate::renderer::canvas::{Canvas, BLACK, WHITE};
use crate::renderer::text::TextRenderer;

pub const SLOTS: usize = 4;

/// What a call on the box did. The caller uses it to freeze or release the
/// player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DialogEvent {
    /// The box was closed and the request did nothing.
    Ignored,
    /// The box was already open; the lines were appended to the queue.
    Queued,
    /// A first page was loaded.
    Opened,
    /// The page was still scrolling and has been revealed in full.
    Skipped,
    /// The next page was loaded.
    Paged,
    /// Nothing left to show. The box is closed and empty.
    Closed,
}

pub struct DialogBox {
    slots: [Option<DialogLine>; SLOTS],
    pending: VecDeque<String>,
    active: bool,
    renderer: Rc<dyn TextRenderer>,
    color: Rgba<u8>,
    frame: Rect,
    panel: Rect,
    text_origin: Vec2,
    line_spacing: f32,
}

impl DialogBox {
    /// A closed box placed according to `layout` on a screen of `viewport`
    /// pixels.
    pub fn new(layout: &DialogLayout, viewport: Vec2, renderer: Rc<dyn TextRenderer>) -> Self {
        let frame = Rect::new(
            layout.left,
            viewport.y - layout.bottom_offset,
            viewport.x - layout.horizontal_margin,
            layout.height,
        );
        let panel = Rect::new(
            frame.x + layout.border,
            frame.y + layout.border,
            frame.w - 2.0 * layout.border,
            frame.h - 2.0 * layout.border,
        );
        Self {
            slots: Default::default(),
            pending: VecDeque::new(),
            active: false,
            renderer,
            color: WHITE,
            frame,
            panel,
            text_origin: frame.top_left() + Vec2::splat(layout.text_inset),
            line_spacing: layout.line_spacing,
        }
    }

    /// Queue `lines` and, if the box is closed, show the first page.
    ///
    /// Returns [`DialogEvent::Closed`] when the box was closed and there was
    /// nothing to show, in which case the box stays closed.
    pub fn open<I, S>(&mut self, lines: I) -> DialogEvent
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pending.extend(lines.into_iter().map(Into::into));
        if self.active {
            return DialogEvent::Queued;
        }
        if self.load_page() {
            self.active = true;
            log::debug!("dialog opened, {} line(s) pending", self.pending.len());
            DialogEvent::Opened
        } else {
            DialogEvent::Closed
        }
    }

    /// The "next" request.
    ///
    /// While the last slot is still scrolling the page is flushed: ticks are
    /// applied until slot 4 is done. Earlier slots finish first, in order.
    /// Once the page is complete the next one is loaded, or the box closes
    /// when the queue is empty.
    pub fn advance(&mut self) -> DialogEvent {
        if !self.active {
            return DialogEvent::Ignored;
        }

        if self.slots[SLOTS - 1].as_ref().is_some_and(|line| !line.is_done()) {
            while self.slots[SLOTS - 1].as_ref().is_some_and(|line| !line.is_done()) {
                self.tick();
            }
            return DialogEvent::Skipped;
        }

        if self.load_page() {
            log::debug!("dialog paged, {} line(s) pending", self.pending.len());
            DialogEvent::Paged
        } else {
            self.close();
            DialogEvent::Closed
        }
    }

    /// One timer step: reveal the next grapheme of the earliest unfinished
    /// slot. Does nothing while closed.
    pub fn tick(&mut self) {
        if self.active {
            self.step();
        }
    }

    fn step(&mut self) {
        if let Some(line) = self.slots.iter_mut().flatten().find(|line| !line.is_done()) {
            line.advance();
        }
    }

    /// Drop the page and everything queued behind it.
    pub fn close(&mut self) {
        if self.active {
            log::debug!("dialog closed");
        }
        self.slots = Default::default();
        self.pending.clear();
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Slot `index` (0-based) of the current page.
    pub fn slot(&self, index: usize) -> Option<&DialogLine> {
        self.slots.get(index)?.as_ref()
    }

    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Outer white rectangle.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Inner black rectangle.
    pub fn panel(&self) -> Rect {
        self.panel
    }

    /// The lines drawn this frame: slot 1 always, slot k once slot k-1 is
    /// done.
    pub fn visible_lines(&self) -> Vec<&DialogLine> {
        let mut visible = Vec::with_capacity(SLOTS);
        let mut previous_done = true;
        for line in self.slots.iter().flatten() {
            if !previous_done {
                break;
            }
            visible.push(line);
            previous_done = line.is_done();
        }
        visible
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        if !self.active {
            return;
        }
        canvas.fill_rect(&self.frame, WHITE);
        canvas.fill_rect(&self.panel, BLACK);
        for line in self.visible_lines() {
            line.draw(canvas);
        }
    }

    /// Fill all four slots from the queue, padding with blank lines, and
    /// reveal the first grapheme. Returns `false` when the queue was empty.
    fn load_page(&mut self) -> bool {
        let Some(first) = self.pending.pop_front() else {
            return false;
        };

        let mut page = Vec::with_capacity(SLOTS);
        page.push(first);
        while page.len() < SLOTS {
            match self.pending.pop_front() {
                Some(text) => page.push(text),
                None => break,
            }
        }

        for (i, slot) in self.slots.iter_mut().enumerate() {
            let mut line = match page.get_mut(i) {
                Some(text) => DialogLine::new(std::mem::take(text), self.color, Rc::clone(&self.renderer)),
                None => DialogLine::blank(self.color, Rc::clone(&self.renderer)),
            };
            line.position = self.text_origin + Vec2::new(0.0, i as f32 * self.line_spacing);
            *slot = Some(line);
        }

        self.step();
        true
    }
}
