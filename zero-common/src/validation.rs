//! Configuration validation.
//!
//! Checks that configuration values are within the ranges the codec and
//! the logging layer accept before anything is built from them.

use thiserror::Error;

use crate::config::{Config, FinvizConfig, ObservabilityConfig, EXPORT_VIEWS};

/// Configuration validation error.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Trait for validatable configuration sections.
pub trait Validate {
    /// Validate this configuration section.
    fn validate(&self) -> ValidationResult<()>;
}

impl Config {
    /// Validate the entire configuration.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = self.observability.validate() {
            errors.push(e);
        }

        if let Err(e) = self.finviz.validate() {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else if errors.len() == 1 {
            Err(errors.remove(0))
        } else {
            Err(ValidationError::Multiple(errors))
        }
    }

    /// Load, apply environment overrides, and validate configuration.
    pub fn load_and_validate() -> anyhow::Result<Self> {
        let config = Self::load_with_env()?;
        config.validate().map_err(|e| anyhow::anyhow!("{}", e))?;
        Ok(config)
    }
}

impl Validate for ObservabilityConfig {
    fn validate(&self) -> ValidationResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_level".into(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            });
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.log_format.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_format".into(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            });
        }

        Ok(())
    }
}

impl Validate for FinvizConfig {
    fn validate(&self) -> ValidationResult<()> {
        if self.view.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "finviz.view".into(),
            });
        }

        if !EXPORT_VIEWS.contains(&self.view.as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "finviz.view".into(),
                reason: format!("must be one of: {}", EXPORT_VIEWS.join(", ")),
            });
        }

        if self.max_results_cap == 0 {
            return Err(ValidationError::InvalidValue {
                field: "finviz.max_results_cap".into(),
                reason: "must be greater than 0".into(),
            });
        }

        Ok(())
    }
}
