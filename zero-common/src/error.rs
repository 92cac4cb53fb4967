//! Service error for screening consumers.
//!
//! Codec failures collapse into four outcomes a caller can act on:
//!
//! ```text
//! InvalidRequest      the screen request itself is wrong      400, fix and resubmit
//! UndecodableExport   the export came back but can't be read  502, not retried
//! Upstream            the fetch layer failed                  502, retryable
//! Config / Validation settings are unusable                   500 / 400
//! ```

use thiserror::Error;

/// Result type alias using the shared error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rejected before any token was emitted
    #[error("Invalid screen request: {0}")]
    InvalidRequest(String),

    /// The export body was fetched but failed batch-level decoding
    #[error("Undecodable export: {0}")]
    UndecodableExport(String),

    /// Transport, credentials or rate limiting in the fetch layer
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] crate::validation::ValidationError),

    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an error with additional context.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error under any context layers.
    pub fn root(&self) -> &Self {
        match self {
            Self::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// The caller must change the request or settings before trying again.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self.root(),
            Self::InvalidRequest(_) | Self::Validation(_) | Self::Config(_)
        )
    }

    /// Only fetch failures are worth repeating unchanged; a bad export
    /// decodes the same way every time.
    pub fn is_retryable(&self) -> bool {
        matches!(self.root(), Self::Upstream(_))
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self.root() {
            Self::InvalidRequest(_) | Self::Validation(_) => 400,
            Self::UndecodableExport(_) | Self::Upstream(_) => 502,
            _ => 500,
        }
    }
}

/// Extension trait for adding context to any error type.
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(Error::InvalidRequest("bad".into()).status_code(), 400);
        assert_eq!(Error::UndecodableExport("html".into()).status_code(), 502);
        assert_eq!(Error::Upstream("down".into()).status_code(), 502);
        assert_eq!(Error::Internal("oops".into()).status_code(), 500);
    }

    #[test]
    fn test_only_upstream_is_retryable() {
        assert!(Error::Upstream("429".into()).is_retryable());
        assert!(!Error::UndecodableExport("ragged".into()).is_retryable());
        assert!(!Error::InvalidRequest("sh_price".into()).is_retryable());
    }

    #[test]
    fn test_context_preserves_classification() {
        let result: std::result::Result<(), Error> =
            Err(Error::InvalidRequest("sh_price".into()));
        let err = result.context("compiling screen").unwrap_err();
        assert!(matches!(err, Error::WithContext { .. }));
        assert!(matches!(err.root(), Error::InvalidRequest(_)));
        assert!(err.is_input_error());
        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.to_string(),
            "compiling screen: Invalid screen request: sh_price"
        );

        let upstream = Error::Upstream("timeout".into()).with_context("volume_surge");
        assert!(upstream.is_retryable());
    }
}
