//! Error types for the screening codec.
//!
//! Compile-side failures are always caller-caused and never retried.
//! Decode-side failures split into batch errors, which abort decoding, and
//! cell errors, which degrade a single value to absent and are reported as
//! warnings next to the decoded rows.

use thiserror::Error;

/// Failure while validating or compiling a screen request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("unknown field: {field}")]
    UnknownField { field: String },

    #[error("field {field} is constrained more than once")]
    DuplicateField { field: String },

    #[error("invalid token {token:?} for {field}; legal tokens: {}", .legal.join(", "))]
    InvalidEnumValue {
        field: String,
        token: String,
        legal: Vec<String>,
    },

    #[error("invalid range for {field}: {reason}")]
    InvalidRange { field: String, reason: String },

    #[error("value {value} is outside the domain of {field}: {reason}")]
    OutOfDomain {
        field: String,
        value: f64,
        reason: String,
    },

    #[error("value {value} for {field} has more than {allowed} decimal place(s)")]
    ExcessPrecision {
        field: String,
        value: f64,
        allowed: u8,
    },

    #[error("{field} expects a {expected} constraint, got {actual}")]
    PayloadMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("constraint on {field} is empty")]
    EmptyConstraint { field: String },

    #[error("{field} requires its {part} part")]
    MissingPart { field: String, part: String },

    #[error("{field} has {expected} parts, got {found}")]
    PartCount {
        field: String,
        expected: usize,
        found: usize,
    },

    #[error("unknown sort key: {key}")]
    UnknownSortKey { key: String },

    #[error("unknown named screen: {name}")]
    UnknownScreen { name: String },

    #[error("result limit must be at least 1")]
    InvalidLimit,
}

impl CompileError {
    /// The field the error refers to, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnknownField { field }
            | Self::DuplicateField { field }
            | Self::InvalidEnumValue { field, .. }
            | Self::InvalidRange { field, .. }
            | Self::OutOfDomain { field, .. }
            | Self::ExcessPrecision { field, .. }
            | Self::PayloadMismatch { field, .. }
            | Self::EmptyConstraint { field }
            | Self::MissingPart { field, .. }
            | Self::PartCount { field, .. } => Some(field),
            Self::UnknownSortKey { .. } | Self::UnknownScreen { .. } | Self::InvalidLimit => {
                None
            }
        }
    }

    /// Compile errors come from the request itself.
    pub const fn is_input_error(&self) -> bool {
        true
    }

    /// Nothing in the codec is worth retrying.
    pub const fn is_retryable(&self) -> bool {
        false
    }
}

/// Failure that makes a whole CSV export untrustworthy.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("response is empty or has no header row")]
    MissingHeader,

    #[error("response is not a CSV export (looks like an HTML page)")]
    NotCsv,

    #[error("column {column:?} has no decode rule")]
    UnrecognizedColumn { column: String },

    #[error("column {column:?} appears more than once")]
    DuplicateColumn { column: String },

    #[error("requested field {field:?} is not a known column")]
    UnknownRequestedField { field: String },

    #[error("row {row} has {found} cells, header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl DecodeError {
    /// The column or requested field the error refers to, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnrecognizedColumn { column } | Self::DuplicateColumn { column } => {
                Some(column)
            }
            Self::UnknownRequestedField { field } => Some(field),
            _ => None,
        }
    }
}

/// Failure to decode one cell. Never aborts a batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CellError {
    #[error("malformed number: {raw:?}")]
    MalformedNumber { raw: String },

    #[error("malformed date: {raw:?}")]
    MalformedDate { raw: String },
}

/// Failure of an orchestrated screen run.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("fetching export failed: {0}")]
    Fetch(#[source] anyhow::Error),
}

impl ScreenError {
    /// True when the caller must change the request before trying again.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Compile(_))
    }
}

impl From<ScreenError> for zero_common::Error {
    fn from(err: ScreenError) -> Self {
        match err {
            ScreenError::Compile(e) => Self::InvalidRequest(e.to_string()),
            ScreenError::Decode(e) => Self::UndecodableExport(e.to_string()),
            ScreenError::Fetch(e) => Self::Upstream(format!("{e:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_names_field() {
        let err = CompileError::InvalidEnumValue {
            field: "cap".into(),
            token: "huge".into(),
            legal: vec!["mega".into(), "large".into()],
        };
        assert_eq!(err.field(), Some("cap"));
        assert_eq!(
            err.to_string(),
            "invalid token \"huge\" for cap; legal tokens: mega, large"
        );
        assert!(err.is_input_error());
        assert!(!err.is_retryable());
        assert_eq!(CompileError::InvalidLimit.field(), None);
    }

    #[test]
    fn test_screen_error_classification() {
        let compile: ScreenError = CompileError::UnknownField { field: "x".into() }.into();
        assert!(compile.is_input_error());

        let fetch = ScreenError::Fetch(anyhow::anyhow!("timeout"));
        assert!(!fetch.is_input_error());
        assert_eq!(fetch.to_string(), "fetching export failed: timeout");
    }

    #[test]
    fn test_screen_error_maps_onto_service_error() {
        let compile: zero_common::Error =
            ScreenError::from(CompileError::InvalidLimit).into();
        assert!(compile.is_input_error());
        assert_eq!(compile.status_code(), 400);

        let decode: zero_common::Error = ScreenError::from(DecodeError::NotCsv).into();
        assert!(!decode.is_input_error());
        assert!(!decode.is_retryable());
        assert_eq!(decode.status_code(), 502);

        let fetch: zero_common::Error = ScreenError::Fetch(anyhow::anyhow!("HTTP 429")).into();
        assert!(matches!(fetch, zero_common::Error::Upstream(ref msg) if msg == "HTTP 429"));
        assert!(fetch.is_retryable());
    }
}
