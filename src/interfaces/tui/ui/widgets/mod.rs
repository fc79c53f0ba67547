mod popup;

pub use popup::{Popup, centered_rect};
