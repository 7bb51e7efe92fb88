use std::path::PathBuf;

/// Errors that can occur during a generation round trip.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The service answered with a non-success status code.
    #[error("server returned {status}")]
    Status { status: reqwest::StatusCode },

    /// The request never completed: connection, timeout, or body decode failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The chosen source file could not be read before upload.
    #[error("could not read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The service answered 2xx but a question block was malformed.
    #[error(transparent)]
    Parse(#[from] crate::model::ParseError),
}
