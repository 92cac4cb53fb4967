//! Response side of the codec: the column schema, decoded value types, and
//! the CSV decoder.

pub mod decode;
pub mod schema;

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::CellError;

pub use decode::{DecodeOptions, RawRow, ResponseDecoder};
pub use schema::{normalize_header, ColumnRule, DecodeKind, ResponseSchema};

/// A decoded cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// No data (`-` in the export), or a cell that failed to decode
    Absent,
    Text(String),
    Number(f64),
    /// Fractional rate, `0.052` for `5.2%`
    Rate(f64),
    /// Integer quantity in base units
    Magnitude(i64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Category { value: String, known: bool },
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Numeric view of numbers, rates and magnitudes.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) | Self::Rate(v) => Some(*v),
            Self::Magnitude(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Category { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::DateTime(dt) => Some(dt.date()),
            _ => None,
        }
    }
}

/// One decoded row, keyed by output field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StockRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl StockRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn ticker(&self) -> Option<&str> {
        self.get("ticker").and_then(FieldValue::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Something the decoder had to degrade.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecodeWarning {
    /// A cell failed to decode and was set to absent. Rows count from 1.
    Cell {
        row: usize,
        column: String,
        field: String,
        #[serde(serialize_with = "serialize_display")]
        error: CellError,
    },
    /// A requested field had no column in the export
    MissingColumn { field: String },
}

fn serialize_display<S: serde::Serializer>(
    error: &CellError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell {
                row, column, error, ..
            } => write!(f, "row {row}, column {column:?}: {error}"),
            Self::MissingColumn { field } => {
                write!(f, "requested field {field:?} is missing from the export")
            }
        }
    }
}

/// Decoded rows in input order, plus the warnings collected on the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecodedBatch {
    pub records: Vec<StockRecord>,
    pub warnings: Vec<DecodeWarning>,
    /// Output field names, in header or request order
    pub columns: Vec<String>,
}

impl DecodedBatch {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_views() {
        assert_eq!(FieldValue::Magnitude(250_000).as_f64(), Some(250_000.0));
        assert_eq!(FieldValue::Rate(0.052).as_f64(), Some(0.052));
        assert!(FieldValue::Absent.as_f64().is_none());
        assert_eq!(
            FieldValue::Category {
                value: "Space".into(),
                known: false
            }
            .as_str(),
            Some("Space")
        );
    }

    #[test]
    fn test_absent_is_not_zero() {
        assert_ne!(FieldValue::Absent, FieldValue::Number(0.0));
        assert!(FieldValue::Absent.is_absent());
    }

    #[test]
    fn test_warning_serializes_with_message() {
        let warning = DecodeWarning::Cell {
            row: 3,
            column: "P/E".into(),
            field: "pe_ratio".into(),
            error: CellError::MalformedNumber { raw: "abc".into() },
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["type"], "cell");
        assert_eq!(json["error"], "malformed number: \"abc\"");
        assert_eq!(warning.to_string(), "row 3, column \"P/E\": malformed number: \"abc\"");
    }
}
