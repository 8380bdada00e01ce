// src/gist/error.rs
// =============================================================================
// Errors that can happen while turning a gist reference into content.
//
// Every failure is a typed variant so callers can tell "bad input" apart from
// "the page had no raw link" apart from "the network went away". The Display
// text is what ends up after "Error: " in a rendered page.
// =============================================================================

use thiserror::Error;

/// Why a reference could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The reference matches neither the share form nor the direct form.
    #[error("Invalid Gist URL format")]
    InvalidFormat,

    /// The share page answered with something other than 200.
    #[error("Failed to fetch Gist: HTTP {status}")]
    DiscoveryHttp { status: u16 },

    /// The share page loaded, but it has no raw-file anchor.
    #[error("Could not find raw file URL in Gist")]
    RawLinkNotFound,

    /// The raw content URL answered with something other than 200.
    #[error("Failed to fetch Gist content: HTTP {status}")]
    FetchHttp { status: u16 },

    /// Connection, DNS, TLS or timeout failure at either stage.
    #[error("Request error: {message}")]
    Transport { message: String },
}

/// A request never produced an HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<TransportError> for ResolveError {
    fn from(err: TransportError) -> Self {
        ResolveError::Transport {
            message: err.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_in_message() {
        let err = ResolveError::DiscoveryHttp { status: 404 };
        assert!(err.to_string().contains("404"));

        let err = ResolveError::FetchHttp { status: 503 };
        assert_eq!(err.to_string(), "Failed to fetch Gist content: HTTP 503");
    }

    #[test]
    fn test_transport_error_converts() {
        let err: ResolveError = TransportError::new("Connection failed").into();
        assert_eq!(
            err,
            ResolveError::Transport {
                message: "Connection failed".to_string()
            }
        );
        assert_eq!(err.to_string(), "Request error: Connection failed");
    }
}
