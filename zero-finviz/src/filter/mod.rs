//! Filter Spec Model.
//!
//! Value objects describing what a caller wants screened: one
//! [`FilterSpec`] per field, collected into a [`ScreenRequest`] together
//! with the output columns, a sort directive and a result limit.

pub mod compile;
pub mod sort;
pub mod validate;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use compile::{CompileOptions, CompiledScreen, CompiledToken, FilterCompiler};
pub use sort::{SortDirective, SortKey, SortOrder};
pub use validate::Validator;

/// The constraint placed on one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FilterPayload {
    /// A named token from the field's token set or shortcut table
    Preset(String),
    /// Numeric bounds in the field's unit; at least one must be present
    Range { min: Option<f64>, max: Option<f64> },
    /// A flag token
    Flag(String),
    /// Several tokens OR-ed together (multi-select fields only)
    AnyOf(Vec<String>),
    /// Inclusive calendar window
    Dates { from: NaiveDate, to: NaiveDate },
    /// One optional payload per part of a compound field
    Parts(Vec<Option<FilterPayload>>),
}

impl FilterPayload {
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Preset(_) => "preset",
            Self::Range { .. } => "range",
            Self::Flag(_) => "flag",
            Self::AnyOf(_) => "any_of",
            Self::Dates { .. } => "dates",
            Self::Parts(_) => "parts",
        }
    }

    pub fn range(min: impl Into<Option<f64>>, max: impl Into<Option<f64>>) -> Self {
        Self::Range {
            min: min.into(),
            max: max.into(),
        }
    }

    pub fn preset(token: impl Into<String>) -> Self {
        Self::Preset(token.into())
    }

    pub fn flag(token: impl Into<String>) -> Self {
        Self::Flag(token.into())
    }
}

/// One user constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub field: String,
    pub payload: FilterPayload,
}

impl FilterSpec {
    pub fn new(field: impl Into<String>, payload: FilterPayload) -> Self {
        Self {
            field: field.into(),
            payload,
        }
    }

    pub fn preset(field: impl Into<String>, token: impl Into<String>) -> Self {
        Self::new(field, FilterPayload::preset(token))
    }

    pub fn flag(field: impl Into<String>, token: impl Into<String>) -> Self {
        Self::new(field, FilterPayload::flag(token))
    }

    /// Numeric bounds; pass `None` for an open side.
    pub fn range(
        field: impl Into<String>,
        min: impl Into<Option<f64>>,
        max: impl Into<Option<f64>>,
    ) -> Self {
        Self::new(field, FilterPayload::range(min, max))
    }

    pub fn any_of<I, S>(field: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            field,
            FilterPayload::AnyOf(tokens.into_iter().map(Into::into).collect()),
        )
    }

    pub fn dates(field: impl Into<String>, from: NaiveDate, to: NaiveDate) -> Self {
        Self::new(field, FilterPayload::Dates { from, to })
    }

    pub fn parts(field: impl Into<String>, parts: Vec<Option<FilterPayload>>) -> Self {
        Self::new(field, FilterPayload::Parts(parts))
    }
}

/// A complete screening request.
///
/// Filters compile in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenRequest {
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
    /// Output fields to decode; empty means every returned column
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub sort: Option<SortDirective>,
    /// Maximum rows to return (`ar`)
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ScreenRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, spec: FilterSpec) -> Self {
        self.filters.push(spec);
        self
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn sort_by(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort = Some(SortDirective { key, order });
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_insertion_order() {
        let request = ScreenRequest::new()
            .filter(FilterSpec::range("sh_price", 10.0, None))
            .filter(FilterSpec::preset("cap", "largeover"))
            .sort_by(SortKey::Change, SortOrder::Desc)
            .limit(50);

        let fields: Vec<_> = request.filters.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["sh_price", "cap"]);
        assert_eq!(request.limit, Some(50));
    }

    #[test]
    fn test_payload_json_shape() {
        let spec = FilterSpec::range("sh_price", 10.5, None);
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["payload"]["type"], "range");
        assert_eq!(json["payload"]["value"]["min"], 10.5);

        let parsed: FilterSpec = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, spec);
    }

    #[test]
    fn test_request_from_json() {
        let request: ScreenRequest = serde_json::from_str(
            r#"{
                "filters": [
                    {"field": "sec", "payload": {"type": "any_of", "value": ["technology", "energy"]}},
                    {"field": "ta_sma200", "payload": {"type": "flag", "value": "pa"}}
                ],
                "sort": {"key": "market_cap", "order": "desc"}
            }"#,
        )
        .unwrap();

        assert_eq!(request.filters.len(), 2);
        assert_eq!(
            request.filters[0].payload,
            FilterPayload::AnyOf(vec!["technology".into(), "energy".into()])
        );
        assert_eq!(request.sort.unwrap().key, SortKey::MarketCap);
        assert!(request.columns.is_empty());
    }
}
