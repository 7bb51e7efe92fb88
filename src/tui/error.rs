use crate::config::ConfigError;

/// Errors that can occur in the TUI layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The service endpoint configuration could not be resolved.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
