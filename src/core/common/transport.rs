use std::fmt::Display;

/// Failure of the assignment fetch.
///
/// Either variant means no assignment data was produced.
#[derive(Debug)]
pub enum FetchError {
    /// DNS, TLS, timeout or a non-success status on the assignments endpoint
    Transport(reqwest::Error),
    /// the payload was not JSON or did not match the expected shape
    Decode(serde_json::Error),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "fetch failed: {e}"),
            FetchError::Decode(e) => write!(f, "decode failed: {e}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Transport(e) => Some(e),
            FetchError::Decode(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(value: reqwest::Error) -> Self {
        FetchError::Transport(value)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(value: serde_json::Error) -> Self {
        FetchError::Decode(value)
    }
}
