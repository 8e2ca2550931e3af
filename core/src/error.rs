//! Error types for the JSON fetch helper.
//!
//! # Design
//! A non-2xx response is classified into one of two variants. `Rejected`
//! means the server honored the error-list contract and carries the
//! extracted messages; its `Display` is exactly those messages joined with
//! newlines, so callers can show it to a user verbatim. `MalformedErrorBody`
//! means the failure body did not have that shape, and keeps the raw body
//! for debugging.

use thiserror::Error;

/// Boxed error produced by a `Transport` implementation.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `JsonClient` and `Fetcher`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response. Forwarded as-is.
    #[error(transparent)]
    Transport(TransportError),

    /// Non-2xx response whose body was a well-formed error list.
    #[error("{}", .messages.join("\n"))]
    Rejected { status: u16, messages: Vec<String> },

    /// Non-2xx response whose body was not an error list.
    #[error("HTTP {status}: unreadable error body ({reason})")]
    MalformedErrorBody {
        status: u16,
        body: String,
        reason: String,
    },

    /// A 2xx response body was not valid JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The target URL could not be resolved to an absolute URL.
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl FetchError {
    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Rejected { status, .. } | FetchError::MalformedErrorBody { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_displays_joined_messages() {
        let err = FetchError::Rejected {
            status: 400,
            messages: vec!["A".to_string(), "B".to_string()],
        };
        assert_eq!(err.to_string(), "A\nB");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn transport_error_is_transparent() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = FetchError::Transport(Box::new(inner));
        assert_eq!(err.to_string(), "refused");
        assert_eq!(err.status(), None);
    }
}
