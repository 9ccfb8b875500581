pub mod dialog_box;
pub mod line;
pub mod script;
pub mod scrolling;

pub use dialog_box::{DialogBox, DialogEvent, SLOTS};
pub use line::DialogLine;
pub use script::DialogScript;
pub use scrolling::ScrollingText;
