/// Reasons a CAS login attempt fails.
///
/// None of them are retried, the caller decides whether to try again.
#[derive(Debug)]
pub enum AuthenticationError {
    /// DNS, TLS or timeout failure on the login page, the login form or the probe
    Transport(reqwest::Error),
    /// the login page did not carry an `lt` input with a value
    TokenNotFound,
    /// the login exchange completed but the service does not recognise the session
    NotAuthenticated(String),
}

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthenticationError::Transport(e) => write!(f, "login request failed: {e}"),
            AuthenticationError::TokenNotFound => write!(f, "login ticket (lt) not found"),
            AuthenticationError::NotAuthenticated(reason) => {
                write!(f, "session is not authenticated: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthenticationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthenticationError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AuthenticationError {
    fn from(value: reqwest::Error) -> Self {
        AuthenticationError::Transport(value)
    }
}
