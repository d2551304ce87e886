//! Load failures
//!
//! Every way a forecast request can fail ends up as a [`LoadError`]. The
//! type is `Clone + PartialEq` so it can travel inside `Action::LoadFailed`
//! and be compared in tests.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("forecast service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// A success status whose body is not JSON.
    #[error("response body is not valid JSON: {0}")]
    MalformedBody(String),

    /// Valid JSON that does not look like a forecast.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

impl LoadError {
    /// Short label for the status line.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Transport(_) => "network error",
            LoadError::Api { .. } => "service error",
            LoadError::MalformedBody(_) => "bad response",
            LoadError::UnexpectedShape(_) => "bad response",
        }
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        LoadError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_status() {
        let err = LoadError::Api {
            status: 404,
            message: "city not found".into(),
        };
        assert_eq!(
            err.to_string(),
            "forecast service returned 404: city not found"
        );
        assert_eq!(err.kind(), "service error");
    }
}
