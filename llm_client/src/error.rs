use std::fmt;

/// LLM client error type
#[derive(Debug)]
pub enum Error {
    /// HTTP transport error
    Http(reqwest::Error),
    /// JSON (de)serialization error
    Json(serde_json::Error),
    /// Non-success response from the provider API
    Api { status: u16, body: String },
    /// API key missing or empty; checked before any network call
    MissingCredential,
    /// Response parsed as JSON but the expected text path was absent
    MalformedResponse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(e) => write!(f, "HTTP error: {}", e),
            Error::Json(e) => write!(f, "JSON parse error: {}", e),
            Error::Api { status, body } => write!(f, "provider API error ({}): {}", status, body),
            Error::MissingCredential => write!(f, "API key is missing or empty"),
            Error::MalformedResponse(msg) => write!(f, "malformed provider response: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Http(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Http(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
