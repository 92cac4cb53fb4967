//! Integration tests for the screen orchestrator.
//!
//! Runs compile → fetch → decode against mock fetchers standing in for the
//! HTTP layer.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use zero_common::Config;
use zero_finviz::{
    CompileError, CompiledScreen, DecodeError, ExportFetcher, FieldValue, FilterSpec, NamedScreen,
    ScreenError, ScreenRequest, Screener, SortKey, SortOrder,
};

// ============================================================================
// Mock Fetchers
// ============================================================================

/// Returns a canned body and remembers the last query it was asked for.
struct MockFetcher {
    body: String,
    calls: AtomicU32,
    last_query: Mutex<Option<CompiledScreen>>,
}

impl MockFetcher {
    fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            calls: AtomicU32::new(0),
            last_query: Mutex::new(None),
        }
    }

    fn call_count(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }

    fn last_filters(&self) -> Option<String> {
        self.last_query
            .lock()
            .unwrap()
            .as_ref()
            .map(CompiledScreen::filters)
    }
}

#[async_trait]
impl ExportFetcher for MockFetcher {
    async fn fetch_export(&self, query: &CompiledScreen) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        *self.last_query.lock().unwrap() = Some(query.clone());
        Ok(self.body.clone())
    }
}

/// Always fails, like a fetch layer that ran out of retries.
struct FailingFetcher;

#[async_trait]
impl ExportFetcher for FailingFetcher {
    async fn fetch_export(&self, _query: &CompiledScreen) -> anyhow::Result<String> {
        anyhow::bail!("HTTP 429 Too Many Requests")
    }
}

const EXPORT: &str = "\
Ticker,Company,Price,Change,Relative Volume,Volume
AMD,Advanced Micro Devices Inc.,156.20,4.85%,2.31,71.2M
PLTR,Palantir Technologies Inc.,41.07,3.10%,1.87,98.5M
SMCI,Super Micro Computer Inc.,-,2.05%,1.62,abc
";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("zero_finviz=debug")
        .try_init();
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_run_compiles_fetches_and_decodes() {
    init_tracing();
    let screener = Screener::default();
    let fetcher = MockFetcher::new(EXPORT);

    let request = ScreenRequest::new()
        .filter(FilterSpec::preset("cap", "midover"))
        .filter(FilterSpec::range("sh_relvol", 1.5, None))
        .columns(["ticker", "price", "price_change", "volume"])
        .sort_by(SortKey::Change, SortOrder::Desc)
        .limit(20);

    let outcome = screener.run(&request, &fetcher).await.unwrap();

    assert_eq!(fetcher.call_count(), 1);
    assert_eq!(fetcher.last_filters().as_deref(), Some("cap_midover,sh_relvol_o1.5"));
    assert_eq!(outcome.query.sort.as_deref(), Some("-change"));
    assert_eq!(outcome.query.limit, Some(20));

    assert_eq!(outcome.tickers(), vec!["AMD", "PLTR", "SMCI"]);
    assert_eq!(outcome.batch.columns, vec!["ticker", "price", "price_change", "volume"]);
    assert_eq!(
        outcome.records()[0].get("price_change"),
        Some(&FieldValue::Rate(0.0485))
    );
    assert_eq!(outcome.records()[2].get("price"), Some(&FieldValue::Absent));
    assert_eq!(outcome.records()[2].get("volume"), Some(&FieldValue::Absent));
    assert_eq!(outcome.warnings().len(), 1);
    assert!(!outcome.id.is_empty());
    assert!(outcome.completed_at >= outcome.started_at);
}

#[tokio::test]
async fn test_invalid_request_never_fetches() {
    let screener = Screener::default();
    let fetcher = MockFetcher::new(EXPORT);

    let request = ScreenRequest::new().filter(FilterSpec::range("sh_price", 50.0, 10.0));
    let err = screener.run(&request, &fetcher).await.unwrap_err();

    assert!(matches!(err, ScreenError::Compile(CompileError::InvalidRange { .. })));
    assert!(err.is_input_error());
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn test_fetch_failure_is_reported() {
    let screener = Screener::default();
    let request = ScreenRequest::new().filter(FilterSpec::preset("sh_price", "o10"));

    let err = screener.run(&request, &FailingFetcher).await.unwrap_err();
    assert!(matches!(err, ScreenError::Fetch(_)));
    assert!(!err.is_input_error());
    assert!(err.to_string().contains("429"));
}

#[tokio::test]
async fn test_html_response_is_a_decode_error() {
    let screener = Screener::default();
    let fetcher = MockFetcher::new("<!DOCTYPE html><html><body>Please log in</body></html>");
    let request = ScreenRequest::new().filter(FilterSpec::preset("sh_price", "o10"));

    let err = screener.run(&request, &fetcher).await.unwrap_err();
    assert!(matches!(err, ScreenError::Decode(DecodeError::NotCsv)));
}

#[tokio::test]
async fn test_named_screen_sends_fixed_filter_string() {
    let screener = Screener::default();
    let fetcher = MockFetcher::new("Ticker,Price\n");

    let outcome = screener
        .run_named(NamedScreen::EarningsTrading, &fetcher)
        .await
        .unwrap();

    assert!(outcome.batch.is_empty());
    assert_eq!(
        fetcher.last_filters().as_deref(),
        Some(
            "cap_smallover,earningsdate_yesterdayafter|todaybefore,fa_epsrev_ep,sh_avgvol_o200,\
             sh_price_o10,ta_change_u,ta_perf_0to-4w,ta_volatility_1tox"
        )
    );
    assert_eq!(outcome.query.sort.as_deref(), Some("-epssurprise"));
    assert_eq!(outcome.query.limit, Some(60));
}

#[tokio::test]
async fn test_uptrend_named_screen() {
    let screener = Screener::default();
    let fetcher = MockFetcher::new("Ticker\n");

    let outcome = screener
        .run_named(NamedScreen::Uptrend, &fetcher)
        .await
        .unwrap();

    assert_eq!(
        outcome.query.filters(),
        "cap_microover,ind_stocksonly,sh_avgvol_o100,sh_price_o10,ta_highlow52w_a30h,\
         ta_perf2_4wup,ta_sma20_pa,ta_sma200_pa,ta_sma50_sa200"
    );
    assert_eq!(outcome.query.sort.as_deref(), Some("-epsyoy1"));
}

#[tokio::test]
async fn test_config_caps_result_limit() {
    let mut config = Config::default();
    config.finviz.max_results_cap = 100;
    let screener = Screener::from_config(&config).unwrap();
    let fetcher = MockFetcher::new("Ticker\n");

    let request = ScreenRequest::new()
        .filter(FilterSpec::preset("exch", "nyse"))
        .limit(5000);
    let outcome = screener.run(&request, &fetcher).await.unwrap();

    assert_eq!(outcome.query.limit, Some(100));
}

#[tokio::test]
async fn test_fetcher_as_trait_object() {
    let screener = Screener::default();
    let fetcher: Box<dyn ExportFetcher> = Box::new(MockFetcher::new(EXPORT));
    let request = ScreenRequest::new().filter(FilterSpec::preset("sh_price", "o10"));

    let outcome = screener.run(&request, fetcher.as_ref()).await.unwrap();
    assert_eq!(outcome.batch.len(), 3);
}

#[test]
fn test_zero_result_cap_is_rejected_before_compiling() {
    let mut config = Config::default();
    config.finviz.max_results_cap = 0;

    let err = Screener::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("finviz.max_results_cap"));

    let service: zero_common::Error = err.into();
    assert!(service.is_input_error());
}
