//! Zero Common - Shared configuration, logging, and error types for the
//! screening services.
//!
//! This crate provides:
//! - Configuration types and loading (`~/.codecoder/config.json` + `ZERO_*` overrides)
//! - Configuration validation
//! - Error types and handling utilities
//! - Logging setup and trace ids

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;
pub mod validation;

pub use config::{
    Config, FinvizConfig, ObservabilityConfig, PrecisionPolicy, UnknownColumnPolicy,
};
pub use error::{Error, Result};
pub use logging::{generate_trace_id, init_from_config, init_logging};
pub use validation::{Validate, ValidationError, ValidationResult};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{Config, FinvizConfig, PrecisionPolicy, UnknownColumnPolicy};
    pub use crate::error::{Error, Result};
    pub use crate::logging::{generate_trace_id, init_logging};
    pub use crate::validation::{Validate, ValidationError};
}
