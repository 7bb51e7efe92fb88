//! Domain model: question records and the form's selector enums.

mod difficulty;
mod input_mode;
mod mcq;

pub use difficulty::Difficulty;
pub use input_mode::InputMode;
pub use mcq::{Mcq, ParseError, parse_mcqs};
