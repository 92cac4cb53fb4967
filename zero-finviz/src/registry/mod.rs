//! Field Registry.
//!
//! The closed catalog of screenable fields. Each entry says how a constraint
//! on that field is spelled in the filter mini-language: a token picked from
//! a fixed set, a numeric range (with optional named shortcuts), a calendar
//! window, or a compound of independently encoded parts.
//!
//! The catalog is built once per process and never mutated. Use
//! [`FieldRegistry::global`] for the shared instance.

mod catalog;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use serde::Serialize;

use crate::error::CompileError;

// ============================================================================
// Presets and Units
// ============================================================================

/// A named token. When it carries bounds it is also a shortcut for the
/// numeric range `[min, max]` on its field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preset {
    pub token: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Preset {
    /// Token with no numeric meaning.
    pub const fn named(token: &'static str) -> Self {
        Self {
            token,
            label: None,
            min: None,
            max: None,
        }
    }

    /// Shortcut for "over `min`".
    pub const fn over(token: &'static str, min: f64) -> Self {
        Self {
            token,
            label: None,
            min: Some(min),
            max: None,
        }
    }

    /// Shortcut for "under `max`".
    pub const fn under(token: &'static str, max: f64) -> Self {
        Self {
            token,
            label: None,
            min: None,
            max: Some(max),
        }
    }

    /// Shortcut for "`min` to `max`".
    pub const fn between(token: &'static str, min: f64, max: f64) -> Self {
        Self {
            token,
            label: None,
            min: Some(min),
            max: Some(max),
        }
    }

    pub const fn labeled(self, label: &'static str) -> Self {
        Self {
            label: Some(label),
            ..self
        }
    }

    /// Whether this preset stands for exactly the given bounds.
    pub fn matches(&self, min: Option<f64>, max: Option<f64>) -> bool {
        (self.min.is_some() || self.max.is_some()) && self.min == min && self.max == max
    }
}

/// Unit the numeric bounds of a field are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Plain,
    Dollars,
    /// Percent points, `5` means 5%
    Percent,
    Ratio,
    Thousands,
    Millions,
    Billions,
}

impl Unit {
    /// Base units per unit.
    pub const fn scale(self) -> f64 {
        match self {
            Self::Thousands => 1e3,
            Self::Millions => 1e6,
            Self::Billions => 1e9,
            Self::Plain | Self::Dollars | Self::Percent | Self::Ratio => 1.0,
        }
    }

    /// Convert a base-unit quantity (shares, dollars) into this unit.
    pub fn from_base(self, value: f64) -> f64 {
        value / self.scale()
    }
}

// ============================================================================
// Encoding Kinds
// ============================================================================

/// A fixed set of legal tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenSet {
    pub tokens: &'static [Preset],
    /// Whether several tokens may be OR-ed in one constraint
    pub multi_select: bool,
}

impl TokenSet {
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|p| p.token == token)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tokens.iter().map(|p| p.token)
    }
}

/// Which spellings a numeric range field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeForm {
    /// Ranges always render as `{min}to{max}`
    Custom,
    /// A range equal to a shortcut renders as the shortcut token
    PreferPreset,
    /// Only shortcut tokens are understood
    PresetOnly,
}

/// Formatting rules for a numeric range field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeRules {
    /// Maximum decimal places a bound may carry
    pub precision: u8,
    pub allow_negative: bool,
    pub unit: Unit,
    pub form: RangeForm,
    pub presets: &'static [Preset],
}

impl RangeRules {
    /// First shortcut whose bounds equal `[min, max]`.
    pub fn preset_for(&self, min: Option<f64>, max: Option<f64>) -> Option<&'static Preset> {
        self.presets.iter().find(|p| p.matches(min, max))
    }

    pub fn has_preset(&self, token: &str) -> bool {
        self.presets.iter().any(|p| p.token == token)
    }

    /// Highest open-ended "over" shortcut whose floor does not exceed
    /// `value` (in field units).
    pub fn floor_preset(&self, value: f64) -> Option<&'static Preset> {
        self.presets
            .iter()
            .filter(|p| p.max.is_none())
            .filter_map(|p| p.min.map(|min| (min, p)))
            .filter(|(min, _)| *min <= value)
            .max_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, p)| p)
    }
}

/// One part of a compound field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundPart {
    pub descriptor: FieldDescriptor,
    pub required: bool,
}

/// Layout of a compound field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundLayout {
    pub parts: Vec<CompoundPart>,
    /// Joins part encodings; never a bare comma
    pub separator: &'static str,
    /// Drop absent parts together with their separators
    pub elide_absent: bool,
}

/// How a constraint on a field is encoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EncodingKind {
    PresetEnum(TokenSet),
    FlagEnum(TokenSet),
    NumericRange(RangeRules),
    DateRange(TokenSet),
    Compound(CompoundLayout),
}

impl EncodingKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PresetEnum(_) => "preset_enum",
            Self::FlagEnum(_) => "flag_enum",
            Self::NumericRange(_) => "numeric_range",
            Self::DateRange(_) => "date_range",
            Self::Compound(_) => "compound",
        }
    }

    /// Tokens accepted as a single-token payload. Compound fields have none.
    pub fn legal_tokens(&self) -> BTreeSet<&'static str> {
        match self {
            Self::PresetEnum(set) | Self::FlagEnum(set) | Self::DateRange(set) => {
                set.names().collect()
            }
            Self::NumericRange(rules) => rules.presets.iter().map(|p| p.token).collect(),
            Self::Compound(_) => BTreeSet::new(),
        }
    }
}

/// Catalog section a field is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    Descriptive,
    Fundamental,
    Technical,
    /// Part of a compound field, not screenable on its own
    Part,
}

/// Static catalog entry for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub group: FieldGroup,
    #[serde(flatten)]
    pub kind: EncodingKind,
}

// ============================================================================
// Registry
// ============================================================================

static GLOBAL: OnceLock<FieldRegistry> = OnceLock::new();

/// Read-only map from field id to descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRegistry {
    fields: BTreeMap<&'static str, FieldDescriptor>,
}

impl FieldRegistry {
    /// Build a fresh registry from the fixed catalog.
    pub fn load() -> Self {
        let fields = catalog::fields()
            .into_iter()
            .map(|descriptor| (descriptor.id, descriptor))
            .collect();
        Self { fields }
    }

    /// Process-wide registry, built on first use.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::load)
    }

    pub fn describe(&self, field_id: &str) -> Result<&FieldDescriptor, CompileError> {
        self.fields
            .get(field_id)
            .ok_or_else(|| CompileError::UnknownField {
                field: field_id.to_string(),
            })
    }

    pub fn all_legal_tokens(&self, field_id: &str) -> Result<BTreeSet<&'static str>, CompileError> {
        Ok(self.describe(field_id)?.kind.legal_tokens())
    }

    /// All field ids, sorted.
    pub fn list_fields(&self) -> Vec<&'static str> {
        self.fields.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_preset_snaps_down() {
        let Ok(EncodingKind::NumericRange(rules)) =
            FieldRegistry::global().describe("sh_avgvol").map(|d| &d.kind)
        else {
            panic!("sh_avgvol is a numeric range");
        };
        assert_eq!(rules.floor_preset(150.0).map(|p| p.token), Some("o100"));
        assert_eq!(rules.floor_preset(500.0).map(|p| p.token), Some("o500"));
        assert_eq!(rules.floor_preset(99_999.0).map(|p| p.token), Some("o2000"));
        assert!(rules.floor_preset(49.0).is_none());
    }

    #[test]
    fn test_load_twice_is_identical() {
        assert_eq!(FieldRegistry::load(), FieldRegistry::load());
        assert_eq!(FieldRegistry::global(), &FieldRegistry::load());
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let raw = catalog::fields();
        assert_eq!(raw.len(), FieldRegistry::load().len());
        assert!(raw.len() >= 70, "catalog has {} fields", raw.len());
    }

    #[test]
    fn test_describe_unknown_field() {
        let err = FieldRegistry::global().describe("fa_nope").unwrap_err();
        assert_eq!(
            err,
            CompileError::UnknownField {
                field: "fa_nope".into()
            }
        );
    }

    #[test]
    fn test_legal_tokens_for_enum_field() {
        let tokens = FieldRegistry::global().all_legal_tokens("exch").unwrap();
        assert!(tokens.contains("nasd"));
        assert!(tokens.contains("nyse"));
        assert!(!tokens.contains("lse"));
    }

    #[test]
    fn test_compound_separators_are_never_commas() {
        for descriptor in FieldRegistry::global().iter() {
            if let EncodingKind::Compound(layout) = &descriptor.kind {
                assert!(!layout.separator.is_empty(), "{}", descriptor.id);
                assert_ne!(layout.separator, ",", "{}", descriptor.id);
                assert!(!layout.separator.contains(','), "{}", descriptor.id);
                assert!(layout.parts.len() >= 2, "{}", descriptor.id);
            }
        }
    }

    #[test]
    fn test_shortcut_bounds_are_unambiguous() {
        for descriptor in FieldRegistry::global().iter() {
            let EncodingKind::NumericRange(rules) = &descriptor.kind else {
                continue;
            };
            for (i, a) in rules.presets.iter().enumerate() {
                for b in &rules.presets[i + 1..] {
                    assert_ne!(a.token, b.token, "{} repeats a token", descriptor.id);
                    if a.min.is_some() || a.max.is_some() {
                        assert!(
                            !(a.min == b.min && a.max == b.max),
                            "{}: {} and {} share bounds",
                            descriptor.id,
                            a.token,
                            b.token
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_token_sets_have_no_duplicates() {
        for descriptor in FieldRegistry::global().iter() {
            let set = match &descriptor.kind {
                EncodingKind::PresetEnum(set)
                | EncodingKind::FlagEnum(set)
                | EncodingKind::DateRange(set) => set,
                _ => continue,
            };
            let unique: BTreeSet<_> = set.names().collect();
            assert_eq!(unique.len(), set.tokens.len(), "{}", descriptor.id);
        }
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(Unit::Thousands.from_base(500_000.0), 500.0);
        assert_eq!(Unit::Billions.from_base(2_000_000_000.0), 2.0);
        assert_eq!(Unit::Dollars.from_base(12.5), 12.5);
    }

    #[test]
    fn test_named_presets_never_match_ranges() {
        let none = Preset::named("none");
        assert!(!none.matches(None, None));
        assert!(Preset::over("o5", 5.0).matches(Some(5.0), None));
        assert!(!Preset::over("o5", 5.0).matches(Some(5.0), Some(10.0)));
    }

    #[test]
    fn test_descriptor_serializes_for_discovery() {
        let descriptor = FieldRegistry::global().describe("sh_price").unwrap();
        let json = serde_json::to_value(descriptor).unwrap();
        assert_eq!(json["id"], "sh_price");
        assert_eq!(json["kind"], "numeric_range");
        assert_eq!(json["unit"], "dollars");
    }
}
