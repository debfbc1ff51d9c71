use thiserror::Error;

/// Common error types used across the application.
///
/// An empty fetch result is deliberately NOT represented here — zero orders
/// is an informational diagnostic, never an `Err`.
#[derive(Debug, Error)]
pub enum HeraldError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed data: {0}")]
    MalformedData(String),
}

impl From<reqwest::Error> for HeraldError {
    fn from(err: reqwest::Error) -> Self {
        HeraldError::Transport(err.to_string())
    }
}
