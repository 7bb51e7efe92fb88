use std::fmt;

/// Requested difficulty for generated questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    #[default]
    Auto,
    Easy,
    Normal,
    Hard,
}

static ALL_DIFFICULTIES: &[Difficulty] = &[
    Difficulty::Auto,
    Difficulty::Easy,
    Difficulty::Normal,
    Difficulty::Hard,
];

impl Difficulty {
    /// Returns the keyword the generation service expects.
    pub fn wire_str(&self) -> &'static str {
        match self {
            Difficulty::Auto => "auto",
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// Returns the label shown in the form.
    ///
    /// `Normal` is labelled "Medium"; the service keyword and the user-facing
    /// wording have never matched and both sides are frozen.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Auto => "Auto",
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Returns all difficulties.
    pub fn all() -> &'static [Difficulty] {
        ALL_DIFFICULTIES
    }
}

#[mutants::skip]
impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
