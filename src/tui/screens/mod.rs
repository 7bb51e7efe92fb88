//! TUI screen implementations.

pub mod file_picker;
pub mod generate;
pub mod help;

pub use file_picker::{FilePickerState, draw_file_picker};
pub use generate::{GenerateState, Submission, draw_generate};
pub use help::{HelpState, draw_help};
