//! Reusable TUI widgets.

pub mod form;
pub mod status_bar;

pub use form::{FieldView, draw_form, mask};
pub use status_bar::{StatusBarContext, draw_status_bar};
