use std::fmt;

/// Which source the question generator reads from.
///
/// The two capture surfaces are mutually exclusive in the form, but each
/// keeps its state while the other is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputMode {
    #[default]
    File,
    Text,
}

impl InputMode {
    /// Returns the label shown next to the mode selector.
    pub fn label(&self) -> &'static str {
        match self {
            InputMode::File => "Upload File",
            InputMode::Text => "Enter Text",
        }
    }

    /// Returns the other mode.
    pub fn toggled(&self) -> InputMode {
        match self {
            InputMode::File => InputMode::Text,
            InputMode::Text => InputMode::File,
        }
    }
}

#[mutants::skip]
impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
