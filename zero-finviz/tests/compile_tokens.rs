//! Integration tests for the filter compiler.
//!
//! Checks the token grammar end to end through the public API: determinism,
//! preset round trips over the whole catalog, and the numeric-range spelling
//! rules.

use chrono::NaiveDate;
use proptest::prelude::*;
use test_case::test_case;

use zero_common::PrecisionPolicy;
use zero_finviz::filter::compile::format_number;
use zero_finviz::{
    CompileError, CompileOptions, EncodingKind, FieldRegistry, FilterCompiler, FilterPayload,
    FilterSpec, ScreenRequest, SortKey, SortOrder,
};

// ============================================================================
// Helpers
// ============================================================================

fn compiler() -> FilterCompiler<'static> {
    FilterCompiler::new(FieldRegistry::global(), CompileOptions::default())
}

fn token(spec: FilterSpec) -> String {
    compiler().compile_spec(&spec).unwrap().into_string()
}

fn compile_err(spec: FilterSpec) -> CompileError {
    compiler()
        .compile(&ScreenRequest::new().filter(spec))
        .unwrap_err()
}

// ============================================================================
// Numeric Ranges
// ============================================================================

#[test_case(Some(10.0), Some(50.0), "sh_price_10to50" ; "both bounds")]
#[test_case(Some(10.0), None, "sh_price_10to" ; "open upper")]
#[test_case(None, Some(50.0), "sh_price_to50" ; "open lower")]
#[test_case(Some(10.50), Some(20.00), "sh_price_10.5to20" ; "minimal decimals")]
#[test_case(Some(0.25), Some(1.0), "sh_price_0.25to1" ; "below one")]
fn test_price_range_spelling(min: Option<f64>, max: Option<f64>, expected: &str) {
    assert_eq!(token(FilterSpec::range("sh_price", min, max)), expected);
}

#[test]
fn test_negative_bounds_preserved() {
    assert_eq!(
        token(FilterSpec::range("ta_change", -10.0, 10.0)),
        "ta_change_-10to10"
    );
    assert_eq!(
        token(FilterSpec::range("fa_epsqoq", -25.5, None)),
        "fa_epsqoq_-25.5to"
    );
}

#[test]
fn test_min_greater_than_max_rejected() {
    let err = compile_err(FilterSpec::range("sh_price", 50.0, 10.0));
    assert!(matches!(err, CompileError::InvalidRange { ref field, .. } if field == "sh_price"));
}

#[test]
fn test_unknown_field_rejected() {
    let err = compile_err(FilterSpec::preset("fa_unicorns", "o5"));
    assert_eq!(
        err,
        CompileError::UnknownField {
            field: "fa_unicorns".into()
        }
    );
}

#[test]
fn test_negative_bound_on_positive_field_rejected() {
    let err = compile_err(FilterSpec::range("sh_price", -1.0, None));
    assert!(matches!(err, CompileError::OutOfDomain { .. }));
}

#[test]
fn test_excess_precision_reject_then_round() {
    let spec = FilterSpec::range("sh_price", 10.125, None);
    assert!(matches!(
        compile_err(spec.clone()),
        CompileError::ExcessPrecision { allowed: 2, .. }
    ));

    let rounding = FilterCompiler::new(
        FieldRegistry::global(),
        CompileOptions {
            precision: PrecisionPolicy::Round,
            ..CompileOptions::default()
        },
    );
    let screen = rounding.compile(&ScreenRequest::new().filter(spec)).unwrap();
    assert_eq!(screen.filters(), "sh_price_10.13to");
}

#[test]
fn test_exact_preset_match_uses_shortcut() {
    assert_eq!(token(FilterSpec::range("sh_relvol", 1.5, None)), "sh_relvol_o1.5");
    assert_eq!(token(FilterSpec::range("sh_relvol", 1.6, None)), "sh_relvol_1.6to");
    assert_eq!(token(FilterSpec::range("cap", 0.3, None)), "cap_smallover");
}

// ============================================================================
// Enumerations, Windows, Compounds
// ============================================================================

#[test]
fn test_any_of_prefixes_first_token_only() {
    assert_eq!(
        token(FilterSpec::any_of("sec", ["technology", "energy"])),
        "sec_technology|energy"
    );
    assert!(matches!(
        compile_err(FilterSpec::any_of("sec", Vec::<String>::new())),
        CompileError::EmptyConstraint { .. }
    ));
}

#[test]
fn test_calendar_window() {
    let from = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let to = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
    assert_eq!(
        token(FilterSpec::dates("earningsdate", from, to)),
        "earningsdate_05-01-2024x05-10-2024"
    );
    assert!(matches!(
        compile_err(FilterSpec::dates("earningsdate", to, from)),
        CompileError::InvalidRange { .. }
    ));
}

#[test]
fn test_compound_fields() {
    assert_eq!(
        token(FilterSpec::parts(
            "ta_perf",
            vec![
                Some(FilterPayload::range(0.0, None)),
                Some(FilterPayload::flag("4w")),
            ],
        )),
        "ta_perf_0to-4w"
    );
    assert_eq!(
        token(FilterSpec::parts(
            "fa_epsrev",
            vec![None, Some(FilterPayload::preset("ro5"))],
        )),
        "fa_epsrev_ro5"
    );
    assert!(matches!(
        compile_err(FilterSpec::parts(
            "ta_perf",
            vec![Some(FilterPayload::range(0.0, None))],
        )),
        CompileError::PartCount {
            expected: 2,
            found: 1,
            ..
        }
    ));
}

#[test]
fn test_full_request_query_pairs() {
    let request = ScreenRequest::new()
        .filter(FilterSpec::preset("cap", "largeover"))
        .filter(FilterSpec::range("sh_price", 10.0, 50.0))
        .sort_by(SortKey::MarketCap, SortOrder::Desc)
        .columns(["ticker", "eps_growth_this_y"])
        .limit(25);
    let screen = compiler().compile(&request).unwrap();
    let all_columns = (0..=128).map(|i| i.to_string()).collect::<Vec<_>>().join(",");

    assert_eq!(
        screen.query_pairs(),
        vec![
            ("v", "151".to_string()),
            ("c", all_columns),
            ("f", "cap_largeover,sh_price_10to50".to_string()),
            ("o", "-marketcap".to_string()),
            ("ar", "25".to_string()),
            ("ft", "4".to_string()),
        ]
    );
}

#[test]
fn test_duplicate_field_rejected() {
    let request = ScreenRequest::new()
        .filter(FilterSpec::range("sh_price", 10.0, None))
        .filter(FilterSpec::range("sh_price", None, 50.0));
    assert_eq!(
        compiler().compile(&request).unwrap_err(),
        CompileError::DuplicateField {
            field: "sh_price".into()
        }
    );
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_every_preset_token_round_trips() {
    let registry = FieldRegistry::global();
    let compiler = compiler();

    for descriptor in registry.iter() {
        let EncodingKind::PresetEnum(set) = &descriptor.kind else {
            continue;
        };
        let legal = registry.all_legal_tokens(descriptor.id).unwrap();
        let prefix = format!("{}_", descriptor.id);

        for name in set.names() {
            let compiled = compiler
                .compile_spec(&FilterSpec::preset(descriptor.id, name))
                .unwrap();
            let body = compiled
                .as_str()
                .strip_prefix(&prefix)
                .unwrap_or_else(|| panic!("{compiled} lacks prefix {prefix}"));
            assert!(legal.contains(body), "{} not legal for {}", body, descriptor.id);
        }
    }
}

fn cents() -> impl Strategy<Value = f64> {
    (0u32..100_000).prop_map(|c| f64::from(c) / 100.0)
}

proptest! {
    #[test]
    fn prop_compile_is_deterministic(lo in cents(), span in cents(), desc in any::<bool>()) {
        let order = if desc { SortOrder::Desc } else { SortOrder::Asc };
        let request = ScreenRequest::new()
            .filter(FilterSpec::preset("exch", "nasd"))
            .filter(FilterSpec::range("sh_price", lo, lo + span))
            .sort_by(SortKey::Price, order);

        let first = compiler().compile(&request);
        let second = compiler().compile(&request);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_custom_range_spelling(lo in cents(), hi in cents()) {
        prop_assume!(lo <= hi);
        let compiled = token(FilterSpec::range("sh_price", lo, hi));
        prop_assert_eq!(
            compiled,
            format!("sh_price_{}to{}", format_number(lo), format_number(hi))
        );
    }
}
