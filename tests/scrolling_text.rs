mod common;

use std::rc::Rc;

use common::RecordingText;
use tilewalk::dialog::ScrollingText;
use tilewalk::renderer::canvas::WHITE;

fn scrolling(text: &str) -> (ScrollingText, Rc<RecordingText>) {
    let renderer = Rc::new(RecordingText::default());
    (ScrollingText::new(text, WHITE, renderer.clone()), renderer)
}

#[test]
fn len_advances_reveal_the_whole_string() {
    for s in ["hello", "a b c", "  ", "x", "héllo wörld", "tab\there"] {
        let (mut text, _) = scrolling(s);
        for _ in 0..s.chars().count() {
            text.advance();
        }
        assert!(text.is_done(), "{s:?} not done");
        assert_eq!(text.revealed(), s);

        assert!(!text.advance(), "{s:?}: advance after done must be a no-op");
        assert_eq!(text.revealed(), s);
    }
}

#[test]
fn one_grapheme_per_advance() {
    let (mut text, _) = scrolling("abc");
    assert_eq!(text.revealed(), "");
    text.advance();
    assert_eq!(text.revealed(), "a");
    assert!(!text.is_done());
    text.advance();
    assert_eq!(text.revealed(), "ab");
    text.advance();
    assert_eq!(text.revealed(), "abc");
    assert!(text.is_done());
}

#[test]
fn spaces_do_not_cost_an_advance() {
    let (mut text, _) = scrolling("a  bc");
    text.advance();
    assert_eq!(text.revealed(), "a");
    text.advance();
    assert_eq!(text.revealed(), "a  b");
    text.advance();
    assert_eq!(text.revealed(), "a  bc");
    assert!(text.is_done());
}

#[test]
fn combining_marks_stay_with_their_base() {
    let (mut text, _) = scrolling("e\u{301}x");
    assert_eq!(text.len(), 2);
    text.advance();
    assert_eq!(text.revealed(), "e\u{301}");
}

#[test]
fn empty_string_is_done_immediately() {
    let (mut text, renderer) = scrolling("");
    assert!(text.is_done());
    assert!(!text.advance());
    assert_eq!(renderer.count(), 0);
    assert!(text.rendered().is_none());
}

#[test]
fn renders_exactly_once_per_successful_advance() {
    let (mut text, renderer) = scrolling("ab cd");
    assert_eq!(renderer.count(), 0, "construction must not render");

    let mut successes = 0;
    for _ in 0..10 {
        if text.advance() {
            successes += 1;
        }
    }
    assert_eq!(successes, 4);
    assert_eq!(renderer.count(), 4);
    assert_eq!(renderer.last().as_deref(), Some("ab cd"));
    assert_eq!(text.rendered().map(|img| img.width()), Some(5));
}

#[test]
fn reset_shows_the_first_grapheme_again() {
    let (mut text, renderer) = scrolling("hello");
    while text.advance() {}
    assert!(text.is_done());

    text.reset();
    assert_eq!(text.revealed(), "h");
    assert!(!text.is_done());
    assert_eq!(renderer.last().as_deref(), Some("h"));
}

#[test]
fn reset_on_a_fresh_text_behaves_the_same() {
    let (mut text, _) = scrolling("xyz");
    text.reset();
    assert_eq!(text.cursor(), 1);
    assert_eq!(text.revealed(), "x");
}

#[test]
fn finished_text_is_done_without_rendering() {
    let renderer = Rc::new(RecordingText::default());
    let text = ScrollingText::finished(" ", WHITE, renderer.clone());
    assert!(text.is_done());
    assert_eq!(text.revealed(), " ");
    assert_eq!(renderer.count(), 0);
}

#[test]
fn trailing_whitespace_finishes_with_the_last_visible_grapheme() {
    let (mut text, renderer) = scrolling("ab ");
    let mut advances = 0;
    while text.advance() {
        advances += 1;
    }
    assert_eq!(advances, 2);
    assert_eq!(renderer.count(), 2);
    assert_eq!(renderer.last().as_deref(), Some("ab "));

    let (mut text, _) = scrolling("Hi there! \t");
    let mut advances = 0;
    while text.advance() {
        advances += 1;
    }
    assert_eq!(advances, 8);
    assert_eq!(text.revealed(), "Hi there! \t");
}
