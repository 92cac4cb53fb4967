//! Validation Layer.
//!
//! Pre-flight checks run before compilation. Filters are checked in request
//! order and the first failure is returned; later filters are not inspected.
//! Compound constraints are checked part by part against each part's own
//! descriptor, with errors naming the part as `{field}.{part}`.

use std::collections::HashSet;

use zero_common::PrecisionPolicy;

use super::{FilterPayload, FilterSpec, ScreenRequest};
use crate::error::CompileError;
use crate::registry::{EncodingKind, FieldRegistry, RangeForm, RangeRules, TokenSet};

/// Checks filter specs against the registry.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    registry: &'a FieldRegistry,
    precision: PrecisionPolicy,
}

impl<'a> Validator<'a> {
    pub fn new(registry: &'a FieldRegistry, precision: PrecisionPolicy) -> Self {
        Self {
            registry,
            precision,
        }
    }

    /// Validate a whole request: every filter, field uniqueness and the limit.
    pub fn validate_request(&self, request: &ScreenRequest) -> Result<(), CompileError> {
        let mut seen = HashSet::new();

        for spec in &request.filters {
            if !seen.insert(spec.field.as_str()) {
                return Err(CompileError::DuplicateField {
                    field: spec.field.clone(),
                });
            }
            self.validate_spec(spec)?;
        }

        if request.limit == Some(0) {
            return Err(CompileError::InvalidLimit);
        }

        Ok(())
    }

    /// Validate one filter spec.
    pub fn validate_spec(&self, spec: &FilterSpec) -> Result<(), CompileError> {
        let descriptor = self.registry.describe(&spec.field)?;
        self.check(&spec.field, &descriptor.kind, &spec.payload)
    }

    fn check(
        &self,
        field: &str,
        kind: &EncodingKind,
        payload: &FilterPayload,
    ) -> Result<(), CompileError> {
        match (kind, payload) {
            (EncodingKind::PresetEnum(set), FilterPayload::Preset(token))
            | (EncodingKind::FlagEnum(set), FilterPayload::Flag(token))
            | (EncodingKind::DateRange(set), FilterPayload::Preset(token)) => {
                check_token(field, set, token)
            }

            (
                EncodingKind::PresetEnum(set)
                | EncodingKind::FlagEnum(set)
                | EncodingKind::DateRange(set),
                FilterPayload::AnyOf(tokens),
            ) if set.multi_select => {
                if tokens.is_empty() {
                    return Err(CompileError::EmptyConstraint {
                        field: field.to_string(),
                    });
                }
                tokens
                    .iter()
                    .try_for_each(|token| check_token(field, set, token))
            }

            (EncodingKind::NumericRange(rules), FilterPayload::Range { min, max }) => {
                self.check_range(field, rules, *min, *max)
            }

            (EncodingKind::NumericRange(rules), FilterPayload::Preset(token)) => {
                if rules.has_preset(token) {
                    Ok(())
                } else {
                    Err(CompileError::InvalidEnumValue {
                        field: field.to_string(),
                        token: token.clone(),
                        legal: rules.presets.iter().map(|p| p.token.to_string()).collect(),
                    })
                }
            }

            (EncodingKind::DateRange(_), FilterPayload::Dates { from, to }) => {
                if from > to {
                    Err(CompileError::InvalidRange {
                        field: field.to_string(),
                        reason: format!("window starts {from} after it ends {to}"),
                    })
                } else {
                    Ok(())
                }
            }

            (EncodingKind::Compound(layout), FilterPayload::Parts(parts)) => {
                if parts.len() != layout.parts.len() {
                    return Err(CompileError::PartCount {
                        field: field.to_string(),
                        expected: layout.parts.len(),
                        found: parts.len(),
                    });
                }
                if parts.iter().all(Option::is_none) {
                    return Err(CompileError::EmptyConstraint {
                        field: field.to_string(),
                    });
                }

                for (part, payload) in layout.parts.iter().zip(parts) {
                    match payload {
                        Some(payload) => {
                            let name = format!("{field}.{}", part.descriptor.id);
                            self.check(&name, &part.descriptor.kind, payload)?;
                        }
                        None if part.required => {
                            return Err(CompileError::MissingPart {
                                field: field.to_string(),
                                part: part.descriptor.id.to_string(),
                            });
                        }
                        None => {}
                    }
                }
                Ok(())
            }

            (kind, payload) => Err(CompileError::PayloadMismatch {
                field: field.to_string(),
                expected: expected_payload(kind),
                actual: payload.kind_name(),
            }),
        }
    }

    fn check_range(
        &self,
        field: &str,
        rules: &RangeRules,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<(), CompileError> {
        if min.is_none() && max.is_none() {
            return Err(CompileError::InvalidRange {
                field: field.to_string(),
                reason: "at least one bound is required".into(),
            });
        }

        for value in min.iter().chain(max.iter()).copied() {
            if !value.is_finite() {
                return Err(CompileError::OutOfDomain {
                    field: field.to_string(),
                    value,
                    reason: "not a finite number".into(),
                });
            }
        }

        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(CompileError::InvalidRange {
                    field: field.to_string(),
                    reason: format!("min {lo} is greater than max {hi}"),
                });
            }
        }

        for value in min.iter().chain(max.iter()).copied() {
            if value < 0.0 && !rules.allow_negative {
                return Err(CompileError::OutOfDomain {
                    field: field.to_string(),
                    value,
                    reason: "negative values are not allowed".into(),
                });
            }
            if self.precision == PrecisionPolicy::Reject && decimal_places(value) > rules.precision
            {
                return Err(CompileError::ExcessPrecision {
                    field: field.to_string(),
                    value,
                    allowed: rules.precision,
                });
            }
        }

        if rules.form == RangeForm::PresetOnly {
            let (lo, hi) = match self.precision {
                PrecisionPolicy::Reject => (min, max),
                PrecisionPolicy::Round => (
                    min.map(|v| round_to(v, rules.precision)),
                    max.map(|v| round_to(v, rules.precision)),
                ),
            };
            if rules.preset_for(lo, hi).is_none() {
                return Err(CompileError::InvalidRange {
                    field: field.to_string(),
                    reason: "only preset ranges are accepted for this field".into(),
                });
            }
        }

        Ok(())
    }
}

fn check_token(field: &str, set: &TokenSet, token: &str) -> Result<(), CompileError> {
    if set.contains(token) {
        Ok(())
    } else {
        Err(CompileError::InvalidEnumValue {
            field: field.to_string(),
            token: token.to_string(),
            legal: set.names().map(str::to_string).collect(),
        })
    }
}

fn expected_payload(kind: &EncodingKind) -> &'static str {
    match kind {
        EncodingKind::PresetEnum(_) => "preset",
        EncodingKind::FlagEnum(_) => "flag",
        EncodingKind::NumericRange(_) => "range or preset",
        EncodingKind::DateRange(_) => "preset or dates",
        EncodingKind::Compound(_) => "parts",
    }
}

/// Decimal places in the shortest representation of `value`.
pub(crate) fn decimal_places(value: f64) -> u8 {
    let text = value.abs().to_string();
    match text.split_once('.') {
        Some((_, fraction)) => u8::try_from(fraction.len()).unwrap_or(u8::MAX),
        None => 0,
    }
}

/// Round half away from zero to `places` decimals.
pub(crate) fn round_to(value: f64, places: u8) -> f64 {
    let factor = 10f64.powi(i32::from(places));
    (value * factor).round() / factor
}
