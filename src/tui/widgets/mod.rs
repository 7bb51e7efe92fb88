//! Reusable TUI widgets.

pub mod form;
pub mod spinner;
pub mod status_bar;

pub use form::{Form, FormField, draw_form};
pub use spinner::{Spinner, draw_spinner};
pub use status_bar::{StatusBarContext, draw_status_bar};
