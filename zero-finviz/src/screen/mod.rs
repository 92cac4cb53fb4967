//! Screen Orchestrator.
//!
//! Drives one screen end to end: compile the request, hand the compiled
//! query to an [`ExportFetcher`], decode what comes back. Fetching is
//! supplied by the caller; this crate never talks to the network.

pub mod presets;

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use zero_common::{generate_trace_id, Config, FinvizConfig, Validate, ValidationResult};

use crate::error::{CompileError, DecodeError, ScreenError};
use crate::filter::{CompileOptions, CompiledScreen, FilterCompiler, ScreenRequest};
use crate::registry::{FieldDescriptor, FieldRegistry};
use crate::response::schema::ResponseSchema;
use crate::response::{DecodeOptions, DecodeWarning, DecodedBatch, ResponseDecoder, StockRecord};

pub use presets::{EarningsWinners, NamedScreen};

// ============================================================================
// Fetch Seam
// ============================================================================

/// Retrieves the CSV export for a compiled screen.
///
/// Implementations own transport, credentials, retries and rate limiting.
#[async_trait]
pub trait ExportFetcher: Send + Sync {
    async fn fetch_export(&self, query: &CompiledScreen) -> anyhow::Result<String>;
}

// ============================================================================
// Options
// ============================================================================

/// Codec settings for a [`Screener`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenerOptions {
    pub compile: CompileOptions,
    pub decode: DecodeOptions,
}

impl ScreenerOptions {
    /// Options from the `finviz` section, rejecting settings that would
    /// compile unusable queries (zero result cap, unknown view).
    pub fn from_config(config: &Config) -> ValidationResult<Self> {
        Self::from_finviz(&config.finviz)
    }

    pub fn from_finviz(finviz: &FinvizConfig) -> ValidationResult<Self> {
        finviz.validate()?;
        Ok(Self {
            compile: CompileOptions::from_config(finviz),
            decode: DecodeOptions::from_config(finviz),
        })
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Result of one orchestrated screen.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenOutcome {
    /// Trace id of the run
    pub id: String,
    pub query: CompiledScreen,
    pub batch: DecodedBatch,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_secs: f64,
}

impl ScreenOutcome {
    pub fn records(&self) -> &[StockRecord] {
        &self.batch.records
    }

    pub fn warnings(&self) -> &[DecodeWarning] {
        &self.batch.warnings
    }

    /// Tickers in export order, skipping rows without one.
    pub fn tickers(&self) -> Vec<&str> {
        self.batch
            .records
            .iter()
            .filter_map(StockRecord::ticker)
            .collect()
    }

    /// Summary string for logging.
    pub fn summary(&self) -> String {
        format!(
            "Screen {} returned {} rows ({} warnings) in {:.2}s",
            self.query.filters(),
            self.batch.len(),
            self.batch.warnings.len(),
            self.duration_secs
        )
    }
}

// ============================================================================
// Screener
// ============================================================================

/// Entry point tying registry, compiler, schema and decoder together.
#[derive(Debug, Clone)]
pub struct Screener {
    registry: &'static FieldRegistry,
    schema: &'static ResponseSchema,
    options: ScreenerOptions,
}

impl Default for Screener {
    fn default() -> Self {
        Self::new(ScreenerOptions::default())
    }
}

impl Screener {
    /// Screener over the process-wide registry and schema.
    pub fn new(options: ScreenerOptions) -> Self {
        Self {
            registry: FieldRegistry::global(),
            schema: ResponseSchema::global(),
            options,
        }
    }

    /// Validates the whole config before building the screener.
    pub fn from_config(config: &Config) -> ValidationResult<Self> {
        config.validate()?;
        Ok(Self::new(ScreenerOptions::from_config(config)?))
    }

    pub fn options(&self) -> &ScreenerOptions {
        &self.options
    }

    pub fn compiler(&self) -> FilterCompiler<'static> {
        FilterCompiler::new(self.registry, self.options.compile.clone())
    }

    pub fn decoder(&self) -> ResponseDecoder<'static> {
        ResponseDecoder::new(self.schema, self.options.decode.clone())
    }

    /// Validate and compile a request.
    pub fn compile(&self, request: &ScreenRequest) -> Result<CompiledScreen, CompileError> {
        self.compiler().compile(request)
    }

    /// Decode an export, keeping `requested` fields (all when empty).
    pub fn decode<S: AsRef<str>>(
        &self,
        csv_text: &str,
        requested: &[S],
    ) -> Result<DecodedBatch, DecodeError> {
        self.decoder().decode(csv_text, requested)
    }

    pub fn describe_field(&self, field_id: &str) -> Result<&'static FieldDescriptor, CompileError> {
        self.registry.describe(field_id)
    }

    pub fn list_fields(&self) -> Vec<&'static str> {
        self.registry.list_fields()
    }

    pub fn all_legal_tokens(
        &self,
        field_id: &str,
    ) -> Result<std::collections::BTreeSet<&'static str>, CompileError> {
        self.registry.all_legal_tokens(field_id)
    }

    /// Compile, fetch and decode one screen.
    pub async fn run<F>(
        &self,
        request: &ScreenRequest,
        fetcher: &F,
    ) -> Result<ScreenOutcome, ScreenError>
    where
        F: ExportFetcher + ?Sized,
    {
        let id = generate_trace_id();
        let span = tracing::info_span!("screen", trace_id = %id);
        let started_at = Utc::now();
        let timer = Instant::now();

        let query = {
            let _enter = span.enter();
            self.compile(request)?
        };

        let body = fetcher
            .fetch_export(&query)
            .await
            .map_err(ScreenError::Fetch)?;

        let _enter = span.enter();
        debug!(bytes = body.len(), "Fetched export");

        let batch = self.decode(&body, &query.columns)?;

        let outcome = ScreenOutcome {
            id,
            query,
            batch,
            started_at,
            completed_at: Utc::now(),
            duration_secs: timer.elapsed().as_secs_f64(),
        };

        info!("{}", outcome.summary());
        Ok(outcome)
    }

    /// Run a named screen.
    pub async fn run_named<F>(
        &self,
        screen: NamedScreen,
        fetcher: &F,
    ) -> Result<ScreenOutcome, ScreenError>
    where
        F: ExportFetcher + ?Sized,
    {
        self.run(&screen.request(), fetcher).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterSpec;
    use zero_common::UnknownColumnPolicy;

    #[test]
    fn test_options_follow_config() {
        let mut config = Config::default();
        config.finviz.view = "111".into();
        config.finviz.max_results_cap = 200;
        config.finviz.unknown_columns = UnknownColumnPolicy::Passthrough;

        let options = ScreenerOptions::from_config(&config).unwrap();
        assert_eq!(options.compile.view, "111");
        assert_eq!(options.compile.max_results_cap, 200);
        assert_eq!(options.decode.unknown_columns, UnknownColumnPolicy::Passthrough);
    }

    #[test]
    fn test_describe_and_list() {
        let screener = Screener::default();
        assert!(screener.list_fields().contains(&"sh_price"));
        assert_eq!(screener.describe_field("ta_rsi").unwrap().id, "ta_rsi");
        assert!(matches!(
            screener.describe_field("nope"),
            Err(CompileError::UnknownField { .. })
        ));
        assert!(screener.all_legal_tokens("cap").unwrap().contains("large"));
    }

    #[test]
    fn test_compile_uses_configured_view() {
        let mut config = Config::default();
        config.finviz.view = "111".into();
        let screener = Screener::from_config(&config).unwrap();

        let request = ScreenRequest::new().filter(FilterSpec::preset("sh_price", "o10"));
        let screen = screener.compile(&request).unwrap();
        assert_eq!(screen.view, "111");
        assert_eq!(screen.filters(), "sh_price_o10");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = Config::default();
        config.finviz.max_results_cap = 0;
        assert!(matches!(
            Screener::from_config(&config),
            Err(zero_common::ValidationError::InvalidValue { ref field, .. })
                if field == "finviz.max_results_cap"
        ));

        let mut config = Config::default();
        config.finviz.view = "999".into();
        assert!(ScreenerOptions::from_config(&config).is_err());
    }
}
