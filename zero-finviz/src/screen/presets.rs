//! Named screens.
//!
//! Request templates for the service's well-known screens. Filter order is
//! part of each template: the service caches and compares filter strings
//! verbatim, so the same screen must always produce the same bytes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CompileError;
use crate::filter::compile::format_number;
use crate::filter::{FilterPayload, FilterSpec, ScreenRequest, SortKey, SortOrder};
use crate::registry::{EncodingKind, FieldRegistry, Unit};

const EARNINGS_RESULT_LIMIT: u32 = 60;

/// A fixed screen known by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedScreen {
    /// Liquid stocks up on heavy relative volume
    VolumeSurge,
    /// Stocks stacked above their moving averages and off the 52-week low
    Uptrend,
    /// Reporting before today's open and already moving
    EarningsPremarket,
    /// Reporting after today's close and moving after hours
    EarningsAfterhours,
    /// Recent reporters with positive revisions and a low-volatility month
    EarningsTrading,
    /// This week's reporters with growth and momentum, default parameters
    EarningsWinners,
}

impl NamedScreen {
    pub const ALL: [NamedScreen; 6] = [
        Self::VolumeSurge,
        Self::Uptrend,
        Self::EarningsPremarket,
        Self::EarningsAfterhours,
        Self::EarningsTrading,
        Self::EarningsWinners,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::VolumeSurge => "volume_surge",
            Self::Uptrend => "uptrend",
            Self::EarningsPremarket => "earnings_premarket",
            Self::EarningsAfterhours => "earnings_afterhours",
            Self::EarningsTrading => "earnings_trading",
            Self::EarningsWinners => "earnings_winners",
        }
    }

    pub fn request(self) -> ScreenRequest {
        match self {
            Self::VolumeSurge => volume_surge(),
            Self::Uptrend => uptrend(),
            Self::EarningsPremarket => earnings_premarket(),
            Self::EarningsAfterhours => earnings_afterhours(),
            Self::EarningsTrading => earnings_trading(),
            Self::EarningsWinners => EarningsWinners::default().request(),
        }
    }
}

impl fmt::Display for NamedScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedScreen {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|screen| screen.name() == wanted)
            .ok_or_else(|| CompileError::UnknownScreen { name: s.to_string() })
    }
}

fn stocks_only() -> FilterSpec {
    FilterSpec::preset("ind", "stocksonly")
}

/// Price is a custom-range field, but whole-dollar floors the service
/// knows are sent as their `o{n}` shortcut.
fn price_floor(min: f64) -> FilterSpec {
    let token = format!("o{}", format_number(min));
    let known = matches!(
        FieldRegistry::global().describe("sh_price").map(|d| &d.kind),
        Ok(EncodingKind::NumericRange(rules)) if rules.has_preset(&token)
    );
    if known {
        FilterSpec::preset("sh_price", token)
    } else {
        FilterSpec::range("sh_price", min, None)
    }
}

/// Average-volume floor from a share count: whole thousands, snapped down
/// to the nearest `o{n}` shortcut. `None` below the smallest shortcut.
fn avg_volume_floor(shares: f64) -> Option<FilterSpec> {
    let thousands = Unit::Thousands.from_base(shares).floor();
    match FieldRegistry::global().describe("sh_avgvol").map(|d| &d.kind) {
        Ok(EncodingKind::NumericRange(rules)) => rules
            .floor_preset(thousands)
            .map(|preset| FilterSpec::preset("sh_avgvol", preset.token)),
        _ => None,
    }
}

/// `cap_smallover,ind_stocksonly,sh_avgvol_o100,sh_price_o10,sh_relvol_o1.5,ta_change_u2,ta_sma200_pa`
pub fn volume_surge() -> ScreenRequest {
    ScreenRequest::new()
        .filter(FilterSpec::preset("cap", "smallover"))
        .filter(stocks_only())
        .filter(FilterSpec::preset("sh_avgvol", "o100"))
        .filter(FilterSpec::preset("sh_price", "o10"))
        .filter(FilterSpec::range("sh_relvol", 1.5, None))
        .filter(FilterSpec::range("ta_change", 2.0, None))
        .filter(FilterSpec::flag("ta_sma200", "pa"))
        .sort_by(SortKey::Change, SortOrder::Desc)
}

pub fn uptrend() -> ScreenRequest {
    ScreenRequest::new()
        .filter(FilterSpec::preset("cap", "microover"))
        .filter(stocks_only())
        .filter(FilterSpec::preset("sh_avgvol", "o100"))
        .filter(FilterSpec::preset("sh_price", "o10"))
        .filter(FilterSpec::flag("ta_highlow52w", "a30h"))
        .filter(FilterSpec::preset("ta_perf2", "4wup"))
        .filter(FilterSpec::flag("ta_sma20", "pa"))
        .filter(FilterSpec::flag("ta_sma200", "pa"))
        .filter(FilterSpec::flag("ta_sma50", "sa200"))
        .sort_by(SortKey::EpsNextYear, SortOrder::Desc)
}

pub fn earnings_premarket() -> ScreenRequest {
    ScreenRequest::new()
        .filter(FilterSpec::preset("cap", "smallover"))
        .filter(FilterSpec::preset("earningsdate", "todaybefore"))
        .filter(stocks_only())
        .filter(FilterSpec::preset("sh_avgvol", "o100"))
        .filter(FilterSpec::preset("sh_price", "o10"))
        .filter(FilterSpec::range("ta_change", 2.0, None))
        .sort_by(SortKey::Change, SortOrder::Desc)
        .limit(EARNINGS_RESULT_LIMIT)
}

/// After-hours movers lead the filter string.
pub fn earnings_afterhours() -> ScreenRequest {
    ScreenRequest::new()
        .filter(FilterSpec::range("ah_change", 2.0, None))
        .filter(FilterSpec::preset("cap", "smallover"))
        .filter(FilterSpec::preset("earningsdate", "todayafter"))
        .filter(FilterSpec::preset("sh_avgvol", "o100"))
        .filter(FilterSpec::preset("sh_price", "o10"))
        .sort_by(SortKey::AfterHoursChange, SortOrder::Desc)
        .limit(EARNINGS_RESULT_LIMIT)
}

pub fn earnings_trading() -> ScreenRequest {
    ScreenRequest::new()
        .filter(FilterSpec::preset("cap", "smallover"))
        .filter(FilterSpec::any_of(
            "earningsdate",
            ["yesterdayafter", "todaybefore"],
        ))
        .filter(FilterSpec::parts(
            "fa_epsrev",
            vec![Some(FilterPayload::preset("ep")), None],
        ))
        .filter(FilterSpec::preset("sh_avgvol", "o200"))
        .filter(FilterSpec::preset("sh_price", "o10"))
        .filter(FilterSpec::preset("ta_change", "u"))
        .filter(FilterSpec::parts(
            "ta_perf",
            vec![
                Some(FilterPayload::range(0.0, None)),
                Some(FilterPayload::flag("4w")),
            ],
        ))
        .filter(FilterSpec::parts(
            "ta_volatility",
            vec![Some(FilterPayload::range(1.0, None)), None],
        ))
        .sort_by(SortKey::EpsSurprise, SortOrder::Desc)
        .limit(EARNINGS_RESULT_LIMIT)
}

// ============================================================================
// Earnings Winners
// ============================================================================

/// Parameters of the earnings winners screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarningsWinners {
    /// Earnings window token (`thisweek`, `yesterday`, `today`)
    pub window: String,
    pub market_cap: Option<String>,
    pub min_price: Option<f64>,
    /// Average daily volume in shares
    pub min_avg_volume: Option<f64>,
    /// Percent
    pub min_eps_growth_qoq: Option<f64>,
    /// EPS revision token (`ep`, `eo5`, ...)
    pub eps_revision: Option<String>,
    /// Percent
    pub min_sales_growth_qoq: Option<f64>,
    /// Percent, over the last week
    pub min_weekly_performance: Option<f64>,
    pub above_sma200: bool,
    /// Sector tokens; empty means no sector filter
    pub sectors: Vec<String>,
    pub max_results: u32,
}

impl Default for EarningsWinners {
    fn default() -> Self {
        Self {
            window: "thisweek".into(),
            market_cap: Some("smallover".into()),
            min_price: Some(10.0),
            min_avg_volume: Some(500_000.0),
            min_eps_growth_qoq: Some(10.0),
            eps_revision: Some("eo5".into()),
            min_sales_growth_qoq: Some(5.0),
            min_weekly_performance: Some(5.0),
            above_sma200: true,
            sectors: [
                "technology",
                "industrials",
                "healthcare",
                "communicationservices",
                "consumercyclical",
                "financial",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            max_results: 50,
        }
    }
}

impl EarningsWinners {
    pub fn request(&self) -> ScreenRequest {
        let mut request = ScreenRequest::new();

        if let Some(cap) = &self.market_cap {
            request = request.filter(FilterSpec::preset("cap", cap.as_str()));
        }
        request = request.filter(FilterSpec::preset("earningsdate", self.window.as_str()));
        if let Some(min) = self.min_eps_growth_qoq {
            request = request.filter(FilterSpec::range("fa_epsqoq", min, None));
        }
        if let Some(token) = &self.eps_revision {
            request = request.filter(FilterSpec::parts(
                "fa_epsrev",
                vec![Some(FilterPayload::preset(token.as_str())), None],
            ));
        }
        if let Some(min) = self.min_sales_growth_qoq {
            request = request.filter(FilterSpec::range("fa_salesqoq", min, None));
        }
        if !self.sectors.is_empty() {
            request = request.filter(FilterSpec::any_of("sec", self.sectors.iter().cloned()));
        }
        if let Some(spec) = self.min_avg_volume.and_then(avg_volume_floor) {
            request = request.filter(spec);
        }
        if let Some(min) = self.min_price {
            request = request.filter(price_floor(min));
        }
        if let Some(min) = self.min_weekly_performance {
            request = request.filter(FilterSpec::parts(
                "ta_perf",
                vec![
                    Some(FilterPayload::range(min, None)),
                    Some(FilterPayload::flag("1w")),
                ],
            ));
        }
        if self.above_sma200 {
            request = request.filter(FilterSpec::flag("ta_sma200", "pa"));
        }

        request
            .sort_by(SortKey::PerformanceWeek, SortOrder::Desc)
            .limit(self.max_results)
    }
}
