//! Sort directives (`o` parameter).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CompileError;

/// Column the screener sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Ticker,
    Company,
    Sector,
    Industry,
    Country,
    MarketCap,
    Pe,
    ForwardPe,
    Peg,
    Price,
    Change,
    Volume,
    AverageVolume,
    RelativeVolume,
    PerformanceWeek,
    PerformanceMonth,
    PerformanceQuarter,
    PerformanceHalfYear,
    PerformanceYear,
    PerformanceYtd,
    AnalystRecom,
    DividendYield,
    Eps,
    EpsThisYear,
    EpsNextYear,
    EpsSurprise,
    Sales,
    InsiderOwn,
    InstOwn,
    Rsi,
    Volatility,
    EarningsDate,
    IpoDate,
    AfterHoursChange,
}

impl SortKey {
    /// Spelling used in the `o` query parameter.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Ticker => "ticker",
            Self::Company => "company",
            Self::Sector => "sector",
            Self::Industry => "industry",
            Self::Country => "country",
            Self::MarketCap => "marketcap",
            Self::Pe => "pe",
            Self::ForwardPe => "forwardpe",
            Self::Peg => "peg",
            Self::Price => "price",
            Self::Change => "change",
            Self::Volume => "volume",
            Self::AverageVolume => "averagevolume",
            Self::RelativeVolume => "relvol",
            Self::PerformanceWeek => "perf1w",
            Self::PerformanceMonth => "perf4w",
            Self::PerformanceQuarter => "perf13w",
            Self::PerformanceHalfYear => "perf26w",
            Self::PerformanceYear => "perf52w",
            Self::PerformanceYtd => "perfytd",
            Self::AnalystRecom => "recom",
            Self::DividendYield => "dividendyield",
            Self::Eps => "eps",
            Self::EpsThisYear => "epsthisy",
            Self::EpsNextYear => "epsyoy1",
            Self::EpsSurprise => "epssurprise",
            Self::Sales => "sales",
            Self::InsiderOwn => "insiderown",
            Self::InstOwn => "instown",
            Self::Rsi => "rsi",
            Self::Volatility => "volatility1w",
            Self::EarningsDate => "earningsdate",
            Self::IpoDate => "ipodate",
            Self::AfterHoursChange => "afterchange",
        }
    }
}

impl FromStr for SortKey {
    type Err = CompileError;

    /// Accepts semantic names (`market_cap`, `price_change`, ...) and the
    /// raw `o` tokens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim().to_lowercase().as_str() {
            "ticker" => Self::Ticker,
            "company" => Self::Company,
            "sector" => Self::Sector,
            "industry" => Self::Industry,
            "country" => Self::Country,
            "market_cap" | "marketcap" => Self::MarketCap,
            "pe" | "pe_ratio" => Self::Pe,
            "forward_pe" | "forwardpe" => Self::ForwardPe,
            "peg" => Self::Peg,
            "price" => Self::Price,
            "change" | "price_change" => Self::Change,
            "volume" => Self::Volume,
            "avg_volume" | "average_volume" | "averagevolume" => Self::AverageVolume,
            "relative_volume" | "relvol" => Self::RelativeVolume,
            "performance_week" | "performance_1w" | "perf1w" => Self::PerformanceWeek,
            "performance_month" | "performance_1m" | "perf4w" => Self::PerformanceMonth,
            "performance_quarter" | "performance_3m" | "perf13w" => Self::PerformanceQuarter,
            "performance_half_year" | "performance_6m" | "perf26w" => Self::PerformanceHalfYear,
            "performance_year" | "performance_1y" | "perf52w" => Self::PerformanceYear,
            "performance_ytd" | "perfytd" => Self::PerformanceYtd,
            "analyst_recom" | "recom" => Self::AnalystRecom,
            "dividend_yield" | "dividendyield" => Self::DividendYield,
            "eps" => Self::Eps,
            "eps_growth_this_y" | "epsthisy" => Self::EpsThisYear,
            "eps_growth_yoy" | "eps_growth_next_y" | "epsyoy1" => Self::EpsNextYear,
            "eps_surprise" | "epssurprise" => Self::EpsSurprise,
            "sales" => Self::Sales,
            "insider_own" | "insiderown" => Self::InsiderOwn,
            "inst_own" | "institutional_own" | "instown" => Self::InstOwn,
            "rsi" => Self::Rsi,
            "volatility" | "volatility1w" => Self::Volatility,
            "earnings_date" | "earningsdate" => Self::EarningsDate,
            "ipo_date" | "ipodate" => Self::IpoDate,
            "afterhours_change" | "afterchange" => Self::AfterHoursChange,
            _ => {
                return Err(CompileError::UnknownSortKey { key: s.to_string() });
            }
        };
        Ok(key)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(CompileError::UnknownSortKey { key: s.to_string() }),
        }
    }
}

/// Sort key plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDirective {
    pub key: SortKey,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortDirective {
    pub const fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// `o` parameter value; descending sorts carry a leading `-`.
    pub fn token(&self) -> String {
        match self.order {
            SortOrder::Asc => self.key.token().to_string(),
            SortOrder::Desc => format!("-{}", self.key.token()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("price_change", "change" ; "semantic alias")]
    #[test_case("eps_surprise", "epssurprise" ; "earnings surprise")]
    #[test_case("relative_volume", "relvol" ; "relative volume")]
    #[test_case("MARKET_CAP", "marketcap" ; "case insensitive")]
    #[test_case("perf1w", "perf1w" ; "raw token")]
    fn test_parse_sort_key(input: &str, token: &str) {
        let key: SortKey = input.parse().unwrap();
        assert_eq!(key.token(), token);
    }

    #[test]
    fn test_unknown_sort_key() {
        let err = "popularity".parse::<SortKey>().unwrap_err();
        assert_eq!(
            err,
            CompileError::UnknownSortKey {
                key: "popularity".into()
            }
        );
    }

    #[test]
    fn test_direction_prefix() {
        assert_eq!(
            SortDirective::new(SortKey::Change, SortOrder::Desc).token(),
            "-change"
        );
        assert_eq!(
            SortDirective::new(SortKey::Ticker, SortOrder::Asc).token(),
            "ticker"
        );
    }

    #[test]
    fn test_every_token_parses_back() {
        let all = [
            SortKey::Ticker,
            SortKey::MarketCap,
            SortKey::RelativeVolume,
            SortKey::EpsNextYear,
            SortKey::AfterHoursChange,
            SortKey::Volatility,
        ];
        for key in all {
            assert_eq!(key.token().parse::<SortKey>().unwrap(), key);
        }
    }
}
