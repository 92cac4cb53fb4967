//! Response Decoder.
//!
//! Strict at the batch level, best-effort per cell:
//! - an empty body, an HTML page, a duplicate or unknown header, an unknown
//!   requested field, or a row whose width differs from the header aborts
//!   decoding;
//! - a cell that does not parse becomes [`FieldValue::Absent`] and leaves a
//!   [`DecodeWarning`], the rest of the row and batch decode normally.
//!
//! Output rows keep input order. Large batches are decoded on the rayon
//! pool; results are collected positionally so order is unaffected.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use rayon::prelude::*;
use zero_common::{FinvizConfig, UnknownColumnPolicy};

use super::schema::{normalize_header, DecodeKind, ResponseSchema};
use super::{DecodeWarning, DecodedBatch, FieldValue, StockRecord};
use crate::error::{CellError, DecodeError};

/// "No data" marker used by the export.
pub const ABSENT_SENTINEL: &str = "-";

const DATE_FORMAT: &str = "%m/%d/%Y";
const DATETIME_FORMATS: &[&str] = &["%m/%d/%Y %I:%M:%S %p", "%m/%d/%Y %I:%M %p"];

/// Decoder settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOptions {
    pub unknown_columns: UnknownColumnPolicy,
    /// Row count from which [`ResponseDecoder::decode`] goes parallel
    pub parallel_threshold: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::from_config(&FinvizConfig::default())
    }
}

impl DecodeOptions {
    pub fn from_config(config: &FinvizConfig) -> Self {
        Self {
            unknown_columns: config.unknown_columns,
            parallel_threshold: config.parallel_decode_threshold,
        }
    }
}

// ============================================================================
// Raw Rows
// ============================================================================

/// One CSV line viewed as header → raw cell. Borrowed from the reader's
/// buffers and dropped once the row is decoded.
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    number: usize,
    headers: &'a StringRecord,
    record: &'a StringRecord,
}

impl<'a> RawRow<'a> {
    /// 1-based position among data rows.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn cell(&self, index: usize) -> Option<&'a str> {
        self.record.get(index)
    }

    pub fn get(&self, header: &str) -> Option<&'a str> {
        let index = self.headers.iter().position(|h| h == header)?;
        self.record.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.headers.iter().zip(self.record.iter())
    }
}

// ============================================================================
// Decode Plan
// ============================================================================

/// A header resolved against the schema.
#[derive(Debug, Clone)]
struct Column {
    index: usize,
    header: String,
    field: String,
    kind: DecodeKind,
}

#[derive(Debug, Clone)]
enum Source {
    Column(usize),
    Missing,
}

/// One output field and where its value comes from.
#[derive(Debug, Clone)]
struct Output {
    name: String,
    source: Source,
}

#[derive(Debug)]
struct Plan {
    columns: Vec<Column>,
    outputs: Vec<Output>,
}

// ============================================================================
// Decoder
// ============================================================================

/// Converts CSV exports into typed records.
#[derive(Debug, Clone)]
pub struct ResponseDecoder<'a> {
    schema: &'a ResponseSchema,
    options: DecodeOptions,
}

impl<'a> ResponseDecoder<'a> {
    pub fn new(schema: &'a ResponseSchema, options: DecodeOptions) -> Self {
        Self { schema, options }
    }

    /// Decode `csv_text`, keeping only `requested` fields (all when empty).
    ///
    /// Requested names may be output field names (`market_cap`) or export
    /// headers (`Market Cap`); records are keyed by the name as requested.
    pub fn decode<S: AsRef<str>>(
        &self,
        csv_text: &str,
        requested: &[S],
    ) -> Result<DecodedBatch, DecodeError> {
        self.decode_with(csv_text, requested, None)
    }

    /// Like [`decode`](Self::decode) but always spreads rows across the
    /// rayon pool.
    pub fn decode_parallel<S: AsRef<str>>(
        &self,
        csv_text: &str,
        requested: &[S],
    ) -> Result<DecodedBatch, DecodeError> {
        self.decode_with(csv_text, requested, Some(true))
    }

    fn decode_with<S: AsRef<str>>(
        &self,
        csv_text: &str,
        requested: &[S],
        force_parallel: Option<bool>,
    ) -> Result<DecodedBatch, DecodeError> {
        let text = csv_text.trim_start_matches('\u{feff}');
        if text.trim().is_empty() {
            return Err(DecodeError::MissingHeader);
        }
        if looks_like_html(text) {
            return Err(DecodeError::NotCsv);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        if headers.is_empty() || headers.iter().all(str::is_empty) {
            return Err(DecodeError::MissingHeader);
        }

        let columns = self.resolve_columns(&headers)?;
        let (outputs, mut warnings) = self.resolve_outputs(&columns, requested)?;
        let plan = Plan { columns, outputs };

        let mut rows = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result?;
            if record.len() != headers.len() {
                return Err(DecodeError::RaggedRow {
                    row: i + 1,
                    expected: headers.len(),
                    found: record.len(),
                });
            }
            rows.push(record);
        }

        let parallel = force_parallel.unwrap_or(rows.len() >= self.options.parallel_threshold);
        let decode_one = |(i, record): (usize, &StringRecord)| {
            let raw = RawRow {
                number: i + 1,
                headers: &headers,
                record,
            };
            decode_row(&plan, raw)
        };

        let decoded: Vec<(StockRecord, Vec<DecodeWarning>)> = if parallel {
            rows.par_iter().enumerate().map(decode_one).collect()
        } else {
            rows.iter().enumerate().map(decode_one).collect()
        };

        let mut records = Vec::with_capacity(decoded.len());
        for (record, row_warnings) in decoded {
            records.push(record);
            warnings.extend(row_warnings);
        }

        let batch = DecodedBatch {
            records,
            warnings,
            columns: plan.outputs.into_iter().map(|o| o.name).collect(),
        };

        tracing::info!(
            rows = batch.records.len(),
            columns = batch.columns.len(),
            warnings = batch.warnings.len(),
            parallel,
            "Decoded export"
        );

        Ok(batch)
    }

    fn resolve_columns(&self, headers: &StringRecord) -> Result<Vec<Column>, DecodeError> {
        let mut seen = HashSet::new();
        let mut columns = Vec::with_capacity(headers.len());

        for (index, header) in headers.iter().enumerate() {
            if !seen.insert(header) {
                return Err(DecodeError::DuplicateColumn {
                    column: header.to_string(),
                });
            }

            let column = match self.schema.rule_for_header(header) {
                Some(rule) => Column {
                    index,
                    header: header.to_string(),
                    field: rule.field.to_string(),
                    kind: rule.kind,
                },
                None if self.options.unknown_columns == UnknownColumnPolicy::Passthrough => {
                    tracing::debug!(column = header, "Passing through unknown column");
                    Column {
                        index,
                        header: header.to_string(),
                        field: normalize_header(header),
                        kind: DecodeKind::PlainString,
                    }
                }
                None => {
                    return Err(DecodeError::UnrecognizedColumn {
                        column: header.to_string(),
                    });
                }
            };
            columns.push(column);
        }

        Ok(columns)
    }

    fn resolve_outputs<S: AsRef<str>>(
        &self,
        columns: &[Column],
        requested: &[S],
    ) -> Result<(Vec<Output>, Vec<DecodeWarning>), DecodeError> {
        if requested.is_empty() {
            let outputs = columns
                .iter()
                .enumerate()
                .map(|(i, c)| Output {
                    name: c.field.clone(),
                    source: Source::Column(i),
                })
                .collect();
            return Ok((outputs, Vec::new()));
        }

        let mut outputs = Vec::with_capacity(requested.len());
        let mut warnings = Vec::new();

        for name in requested {
            let name = name.as_ref();
            let found = columns
                .iter()
                .position(|c| c.field == name || c.header == name);

            let source = match found {
                Some(i) => Source::Column(i),
                None if self.schema.rule_for_field(name).is_some()
                    || self.schema.rule_for_header(name).is_some() =>
                {
                    tracing::warn!(field = name, "Requested field missing from export");
                    warnings.push(DecodeWarning::MissingColumn {
                        field: name.to_string(),
                    });
                    Source::Missing
                }
                None => {
                    return Err(DecodeError::UnknownRequestedField {
                        field: name.to_string(),
                    });
                }
            };

            outputs.push(Output {
                name: name.to_string(),
                source,
            });
        }

        Ok((outputs, warnings))
    }
}

fn looks_like_html(text: &str) -> bool {
    let head: String = text
        .trim_start()
        .chars()
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    head.starts_with("<!doctype html") || head.starts_with("<html")
}

fn decode_row(plan: &Plan, raw: RawRow<'_>) -> (StockRecord, Vec<DecodeWarning>) {
    let mut record = StockRecord::new();
    let mut warnings = Vec::new();

    for output in &plan.outputs {
        let value = match output.source {
            Source::Missing => FieldValue::Absent,
            Source::Column(i) => {
                let column = &plan.columns[i];
                let cell = raw.cell(column.index).unwrap_or(ABSENT_SENTINEL);
                match decode_cell(column.kind, cell) {
                    Ok(value) => value,
                    Err(error) => {
                        tracing::warn!(
                            row = raw.number(),
                            column = %column.header,
                            error = %error,
                            "Cell decoded as absent"
                        );
                        warnings.push(DecodeWarning::Cell {
                            row: raw.number(),
                            column: column.header.clone(),
                            field: column.field.clone(),
                            error,
                        });
                        FieldValue::Absent
                    }
                }
            }
        };
        record.insert(output.name.clone(), value);
    }

    (record, warnings)
}

// ============================================================================
// Cell Decoding
// ============================================================================

/// Decode one raw cell under `kind`.
pub fn decode_cell(kind: DecodeKind, raw: &str) -> Result<FieldValue, CellError> {
    let raw = raw.trim();
    if raw.is_empty() || raw == ABSENT_SENTINEL {
        return Ok(FieldValue::Absent);
    }

    match kind {
        DecodeKind::PlainString => Ok(FieldValue::Text(raw.to_string())),
        DecodeKind::Numeric => parse_number(raw).map(FieldValue::Number),
        DecodeKind::Percentage => parse_percentage(raw).map(FieldValue::Rate),
        DecodeKind::ScaledMagnitude(suffixes) => {
            parse_magnitude(raw, suffixes).map(FieldValue::Magnitude)
        }
        DecodeKind::Date => parse_date(raw),
        DecodeKind::Enum(known) => Ok(FieldValue::Category {
            value: raw.to_string(),
            known: known.contains(&raw),
        }),
    }
}

fn malformed(raw: &str) -> CellError {
    CellError::MalformedNumber {
        raw: raw.to_string(),
    }
}

/// Drop currency signs and thousands separators.
fn strip_decorations(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, ',' | '$')).collect()
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_number(raw: &str) -> Result<f64, CellError> {
    parse_finite(&strip_decorations(raw)).ok_or_else(|| malformed(raw))
}

/// `"5.2%"` → `0.052`, computed by moving the decimal point in the digit
/// string so the result is the closest double to the written rate.
fn parse_percentage(raw: &str) -> Result<f64, CellError> {
    let cleaned = strip_decorations(raw);
    let number = cleaned.strip_suffix('%').unwrap_or(&cleaned).trim_end();
    shift_decimal(number, -2)
        .and_then(|shifted| parse_finite(&shifted))
        .ok_or_else(|| malformed(raw))
}

/// `"1.5B"` → `1_500_000_000`; no suffix means base units already.
fn parse_magnitude(raw: &str, suffixes: &[(char, u32)]) -> Result<i64, CellError> {
    let cleaned = strip_decorations(raw);
    let (number, exponent) = match cleaned.chars().last() {
        Some(c) if c.is_ascii_alphabetic() => {
            let upper = c.to_ascii_uppercase();
            let exponent = suffixes
                .iter()
                .find(|(suffix, _)| *suffix == upper)
                .map(|(_, exponent)| *exponent)
                .ok_or_else(|| malformed(raw))?;
            (&cleaned[..cleaned.len() - c.len_utf8()], exponent)
        }
        _ => (cleaned.as_str(), 0),
    };

    let places = i32::try_from(exponent).map_err(|_| malformed(raw))?;
    let value = shift_decimal(number.trim_end(), places)
        .and_then(|shifted| parse_finite(&shifted))
        .ok_or_else(|| malformed(raw))?
        .round();

    if value.abs() >= i64::MAX as f64 {
        return Err(malformed(raw));
    }
    Ok(value as i64)
}

/// Move the decimal point of a plain decimal string by `places`
/// (positive = multiply by ten per place). `None` for anything that is not
/// `[+-]digits[.digits]`.
fn shift_decimal(text: &str, places: i32) -> Option<String> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part
        .bytes()
        .chain(frac_part.bytes())
        .all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let digits = format!("{int_part}{frac_part}");
    let len = digits.len() as i64;
    let point = int_part.len() as i64 + i64::from(places);

    let body = if point <= 0 {
        format!("0.{}{}", "0".repeat((-point) as usize), digits)
    } else if point >= len {
        format!("{}{}", digits, "0".repeat((point - len) as usize))
    } else {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{whole}.{fraction}")
    };

    Some(if negative { format!("-{body}") } else { body })
}

fn parse_date(raw: &str) -> Result<FieldValue, CellError> {
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(FieldValue::DateTime(dt));
        }
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(FieldValue::Date)
        .map_err(|_| CellError::MalformedDate {
            raw: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::schema::MAGNITUDE_SUFFIXES;
    use test_case::test_case;

    const SCALED: DecodeKind = DecodeKind::ScaledMagnitude(MAGNITUDE_SUFFIXES);

    fn decoder() -> ResponseDecoder<'static> {
        ResponseDecoder::new(ResponseSchema::global(), DecodeOptions::default())
    }

    #[test_case("5.2%", 0.052 ; "simple")]
    #[test_case("-3.75%", -0.0375 ; "negative")]
    #[test_case("0.5%", 0.005 ; "below one")]
    #[test_case("125%", 1.25 ; "above hundred")]
    #[test_case("1,250.5%", 12.505 ; "thousands separator")]
    #[test_case("12", 0.12 ; "no percent sign")]
    fn test_percentage(raw: &str, expected: f64) {
        assert_eq!(decode_cell(DecodeKind::Percentage, raw), Ok(FieldValue::Rate(expected)));
    }

    #[test_case("1.5B", 1_500_000_000 ; "billions")]
    #[test_case("250K", 250_000 ; "thousands")]
    #[test_case("3.2T", 3_200_000_000_000 ; "trillions")]
    #[test_case("12.34M", 12_340_000 ; "millions")]
    #[test_case("-1.5M", -1_500_000 ; "negative")]
    #[test_case("1,234,567", 1_234_567 ; "plain with separators")]
    #[test_case("0.5", 1 ; "rounds half away from zero")]
    fn test_magnitude(raw: &str, expected: i64) {
        assert_eq!(decode_cell(SCALED, raw), Ok(FieldValue::Magnitude(expected)));
    }

    #[test]
    fn test_sentinel_is_absent_not_zero() {
        for kind in [
            DecodeKind::Numeric,
            DecodeKind::Percentage,
            SCALED,
            DecodeKind::Date,
            DecodeKind::PlainString,
        ] {
            assert_eq!(decode_cell(kind, "-"), Ok(FieldValue::Absent));
        }
        assert_eq!(decode_cell(DecodeKind::Numeric, "0"), Ok(FieldValue::Number(0.0)));
    }

    #[test]
    fn test_malformed_numbers() {
        for raw in ["abc", "1.2.3", "NaN", "inf", "5%x"] {
            assert_eq!(
                decode_cell(DecodeKind::Numeric, raw),
                Err(CellError::MalformedNumber { raw: raw.into() }),
                "{raw}"
            );
        }
        assert!(decode_cell(SCALED, "1.5X").is_err());
        assert!(decode_cell(DecodeKind::Percentage, "%").is_err());
    }

    #[test]
    fn test_numeric_tolerates_currency() {
        assert_eq!(decode_cell(DecodeKind::Numeric, "$1,024.50"), Ok(FieldValue::Number(1024.5)));
        assert_eq!(decode_cell(DecodeKind::Numeric, "-0.75"), Ok(FieldValue::Number(-0.75)));
    }

    #[test]
    fn test_dates() {
        assert_eq!(
            decode_cell(DecodeKind::Date, "05/01/2024"),
            Ok(FieldValue::Date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()))
        );
        let with_time = decode_cell(DecodeKind::Date, "10/30/2024 04:30:00 PM").unwrap();
        assert_eq!(
            with_time.as_date(),
            NaiveDate::from_ymd_opt(2024, 10, 30)
        );
        assert!(matches!(with_time, FieldValue::DateTime(_)));
        assert_eq!(
            decode_cell(DecodeKind::Date, "2024-05-01"),
            Err(CellError::MalformedDate {
                raw: "2024-05-01".into()
            })
        );
    }

    #[test]
    fn test_enum_keeps_unknown_categories() {
        let kind = DecodeKind::Enum(&["Yes", "No"]);
        assert_eq!(
            decode_cell(kind, "Yes"),
            Ok(FieldValue::Category {
                value: "Yes".into(),
                known: true
            })
        );
        assert_eq!(
            decode_cell(kind, "Maybe"),
            Ok(FieldValue::Category {
                value: "Maybe".into(),
                known: false
            })
        );
    }

    #[test]
    fn test_shift_decimal() {
        assert_eq!(shift_decimal("5.2", -2).as_deref(), Some("0.052"));
        assert_eq!(shift_decimal("1.5", 9).as_deref(), Some("1500000000"));
        assert_eq!(shift_decimal("-12.345", 1).as_deref(), Some("-123.45"));
        assert_eq!(shift_decimal(".5", 0).as_deref(), Some("0.5"));
        assert_eq!(shift_decimal("", 2), None);
        assert_eq!(shift_decimal("1e5", 2), None);
    }

    #[test]
    fn test_raw_row_lookup() {
        let headers = StringRecord::from(vec!["Ticker", "Price"]);
        let record = StringRecord::from(vec!["AAPL", "189.5"]);
        let row = RawRow {
            number: 1,
            headers: &headers,
            record: &record,
        };
        assert_eq!(row.get("Price"), Some("189.5"));
        assert_eq!(row.get("Volume"), None);
        assert_eq!(row.iter().count(), 2);
    }

    #[test]
    fn test_html_body_rejected() {
        let err = decoder()
            .decode::<&str>("<!DOCTYPE html><html><body>Login</body></html>", &[])
            .unwrap_err();
        assert!(matches!(err, DecodeError::NotCsv));
    }

    #[test]
    fn test_empty_body_rejected() {
        assert!(matches!(
            decoder().decode::<&str>("  \n", &[]),
            Err(DecodeError::MissingHeader)
        ));
    }

    #[test]
    fn test_bom_is_ignored() {
        let batch = decoder()
            .decode::<&str>("\u{feff}Ticker,Price\nAAPL,189.5\n", &[])
            .unwrap();
        assert_eq!(batch.records[0].ticker(), Some("AAPL"));
    }
}
