//! Filter Compiler.
//!
//! Turns validated filter specs into filter tokens:
//!
//! ```text
//! PresetEnum / FlagEnum   {id}_{token}             cap_largeover, ta_sma200_pa
//! multi-select            {id}_{t1}|{t2}            sec_technology|energy
//! NumericRange            {id}_{min}to{max}         sh_price_10to50, sh_price_10to, sh_price_to50
//!   (shortcut match)      {id}_{preset}             sh_relvol_o1.5
//! DateRange               {id}_{MM-DD-YYYY}x{...}   earningsdate_05-01-2024x05-10-2024
//! Compound                {id}_{part}{sep}{part}    ta_perf_0to-4w, fa_epsrev_ep
//! ```
//!
//! Tokens are joined with `,` in request order. The same request always
//! produces the same bytes.

use std::fmt;

use serde::Serialize;
use zero_common::{FinvizConfig, PrecisionPolicy};

use super::validate::{round_to, Validator};
use super::{FilterPayload, FilterSpec, ScreenRequest};
use crate::error::CompileError;
use crate::registry::{CompoundLayout, EncodingKind, FieldRegistry, RangeForm, RangeRules};

/// Date spelling inside a calendar window token.
const WINDOW_DATE_FORMAT: &str = "%m-%d-%Y";

/// Export format parameter (`ft=4` selects CSV).
const EXPORT_FORMAT: &str = "4";

/// Number of columns the custom view can carry; `c` selects all of them so
/// fields outside the view's defaults still come back.
pub const EXPORT_COLUMN_COUNT: u32 = 129;

/// One compiled filter token. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CompiledToken(String);

impl CompiledToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CompiledToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CompiledToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Everything the fetch layer needs to build the export request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledScreen {
    pub tokens: Vec<CompiledToken>,
    pub view: String,
    /// `o` value, `-` prefixed for descending
    pub sort: Option<String>,
    /// `ar` value, already capped
    pub limit: Option<u32>,
    /// Output fields the caller wants decoded
    pub columns: Vec<String>,
}

impl CompiledScreen {
    /// Comma-joined filter string (`f` parameter).
    pub fn filters(&self) -> String {
        self.tokens
            .iter()
            .map(CompiledToken::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Column index list (`c` parameter).
    pub fn column_indices(&self) -> String {
        (0..EXPORT_COLUMN_COUNT)
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Ordered query parameters. Credentials are added by the fetch layer.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("v", self.view.clone()), ("c", self.column_indices())];
        if !self.tokens.is_empty() {
            pairs.push(("f", self.filters()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("o", sort.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("ar", limit.to_string()));
        }
        pairs.push(("ft", EXPORT_FORMAT.to_string()));
        pairs
    }
}

/// Compiler settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOptions {
    pub view: String,
    pub max_results_cap: u32,
    pub precision: PrecisionPolicy,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self::from_config(&FinvizConfig::default())
    }
}

impl CompileOptions {
    pub fn from_config(config: &FinvizConfig) -> Self {
        Self {
            view: config.view.clone(),
            max_results_cap: config.max_results_cap,
            precision: config.precision_policy,
        }
    }
}

/// Compiles screen requests against a registry.
#[derive(Debug, Clone)]
pub struct FilterCompiler<'a> {
    registry: &'a FieldRegistry,
    options: CompileOptions,
}

impl<'a> FilterCompiler<'a> {
    pub fn new(registry: &'a FieldRegistry, options: CompileOptions) -> Self {
        Self { registry, options }
    }

    pub fn validator(&self) -> Validator<'a> {
        Validator::new(self.registry, self.options.precision)
    }

    /// Validate, then compile a full request.
    pub fn compile(&self, request: &ScreenRequest) -> Result<CompiledScreen, CompileError> {
        self.validator().validate_request(request)?;

        let tokens = request
            .filters
            .iter()
            .map(|spec| self.compile_spec(spec))
            .collect::<Result<Vec<_>, _>>()?;

        let limit = request.limit.map(|limit| {
            if limit > self.options.max_results_cap {
                tracing::debug!(
                    requested = limit,
                    cap = self.options.max_results_cap,
                    "Result limit capped"
                );
            }
            limit.min(self.options.max_results_cap)
        });

        let screen = CompiledScreen {
            tokens,
            view: self.options.view.clone(),
            sort: request.sort.map(|s| s.token()),
            limit,
            columns: request.columns.clone(),
        };

        tracing::info!(
            filters = screen.tokens.len(),
            sort = screen.sort.as_deref().unwrap_or("-"),
            "Compiled screen request"
        );

        Ok(screen)
    }

    /// Compile one spec. Assumes the spec already passed validation.
    pub fn compile_spec(&self, spec: &FilterSpec) -> Result<CompiledToken, CompileError> {
        let descriptor = self.registry.describe(&spec.field)?;
        let body = self.encode(&spec.field, &descriptor.kind, &spec.payload)?;
        let token = CompiledToken(format!("{}_{}", descriptor.id, body));
        tracing::debug!(field = descriptor.id, token = %token, "Compiled filter");
        Ok(token)
    }

    /// Encode a payload without the field prefix.
    fn encode(
        &self,
        field: &str,
        kind: &EncodingKind,
        payload: &FilterPayload,
    ) -> Result<String, CompileError> {
        match (kind, payload) {
            (EncodingKind::PresetEnum(_), FilterPayload::Preset(token))
            | (EncodingKind::FlagEnum(_), FilterPayload::Flag(token))
            | (EncodingKind::DateRange(_), FilterPayload::Preset(token))
            | (EncodingKind::NumericRange(_), FilterPayload::Preset(token)) => Ok(token.clone()),

            (
                EncodingKind::PresetEnum(_) | EncodingKind::FlagEnum(_) | EncodingKind::DateRange(_),
                FilterPayload::AnyOf(tokens),
            ) => Ok(tokens.join("|")),

            (EncodingKind::NumericRange(rules), FilterPayload::Range { min, max }) => {
                Ok(self.encode_range(rules, *min, *max))
            }

            (EncodingKind::DateRange(_), FilterPayload::Dates { from, to }) => Ok(format!(
                "{}x{}",
                from.format(WINDOW_DATE_FORMAT),
                to.format(WINDOW_DATE_FORMAT)
            )),

            (EncodingKind::Compound(layout), FilterPayload::Parts(parts)) => {
                self.encode_compound(field, layout, parts)
            }

            (kind, payload) => Err(CompileError::PayloadMismatch {
                field: field.to_string(),
                expected: kind.name(),
                actual: payload.kind_name(),
            }),
        }
    }

    fn encode_range(&self, rules: &RangeRules, min: Option<f64>, max: Option<f64>) -> String {
        let (min, max) = match self.options.precision {
            PrecisionPolicy::Reject => (min, max),
            PrecisionPolicy::Round => (
                min.map(|v| round_to(v, rules.precision)),
                max.map(|v| round_to(v, rules.precision)),
            ),
        };

        if rules.form != RangeForm::Custom {
            if let Some(preset) = rules.preset_for(min, max) {
                return preset.token.to_string();
            }
        }

        let lo = min.map(format_number).unwrap_or_default();
        let hi = max.map(format_number).unwrap_or_default();
        format!("{lo}to{hi}")
    }

    fn encode_compound(
        &self,
        field: &str,
        layout: &CompoundLayout,
        parts: &[Option<FilterPayload>],
    ) -> Result<String, CompileError> {
        let mut encoded = Vec::with_capacity(layout.parts.len());
        for (part, payload) in layout.parts.iter().zip(parts) {
            match payload {
                Some(payload) => {
                    let name = format!("{field}.{}", part.descriptor.id);
                    encoded.push(Some(self.encode(&name, &part.descriptor.kind, payload)?));
                }
                None => encoded.push(None),
            }
        }

        let pieces: Vec<String> = if layout.elide_absent {
            encoded.into_iter().flatten().collect()
        } else {
            encoded.into_iter().map(Option::unwrap_or_default).collect()
        };
        Ok(pieces.join(layout.separator))
    }
}

/// Shortest decimal spelling that reads back as the same value.
///
/// Integers have no decimal point, fractions no trailing zeros, and the sign
/// stays in front. Negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}
