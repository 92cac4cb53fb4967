//! Response Schema.
//!
//! Maps each CSV export header to the output field it fills and the rule
//! used to decode it. Headers are matched exactly as the export spells them.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Serialize;

/// Multiplier suffixes for scaled magnitudes, as powers of ten.
pub const MAGNITUDE_SUFFIXES: &[(char, u32)] = &[('K', 3), ('M', 6), ('B', 9), ('T', 12)];

pub const SECTOR_NAMES: &[&str] = &[
    "Basic Materials",
    "Communication Services",
    "Consumer Cyclical",
    "Consumer Defensive",
    "Energy",
    "Financial",
    "Financial Services",
    "Healthcare",
    "Industrials",
    "Real Estate",
    "Technology",
    "Utilities",
];

pub const YES_NO: &[&str] = &["Yes", "No"];

pub const EARNINGS_TIMING: &[&str] = &["BMO", "AMC"];

pub const ACTIVE_PASSIVE: &[&str] = &["Active", "Passive"];

/// How a column's cells are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum DecodeKind {
    PlainString,
    Numeric,
    /// `5.2%` → 0.052
    Percentage,
    /// `1.5B` → 1_500_000_000
    ScaledMagnitude(&'static [(char, u32)]),
    /// `MM/DD/YYYY`, optionally followed by a time of day
    Date,
    /// Known categories; unknown values are kept as raw strings
    Enum(&'static [&'static str]),
}

/// Decode rule for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnRule {
    pub header: &'static str,
    pub field: &'static str,
    pub kind: DecodeKind,
}

const fn rule(header: &'static str, field: &'static str, kind: DecodeKind) -> ColumnRule {
    ColumnRule {
        header,
        field,
        kind,
    }
}

const SCALED: DecodeKind = DecodeKind::ScaledMagnitude(MAGNITUDE_SUFFIXES);

const COLUMNS: &[ColumnRule] = &[
    // Descriptive
    rule("No.", "rank", DecodeKind::Numeric),
    rule("Ticker", "ticker", DecodeKind::PlainString),
    rule("Company", "company", DecodeKind::PlainString),
    rule("Sector", "sector", DecodeKind::Enum(SECTOR_NAMES)),
    rule("Industry", "industry", DecodeKind::PlainString),
    rule("Country", "country", DecodeKind::PlainString),
    rule("Index", "index", DecodeKind::PlainString),
    rule("Market Cap", "market_cap", SCALED),
    rule("Optionable", "optionable", DecodeKind::Enum(YES_NO)),
    rule("Shortable", "shortable", DecodeKind::Enum(YES_NO)),
    rule("Earnings Date", "earnings_date", DecodeKind::Date),
    rule("Earnings Time", "earnings_timing", DecodeKind::Enum(EARNINGS_TIMING)),
    rule("IPO Date", "ipo_date", DecodeKind::Date),
    rule("Employees", "employees", SCALED),
    // Price and volume
    rule("Price", "price", DecodeKind::Numeric),
    rule("Prev Close", "prev_close", DecodeKind::Numeric),
    rule("Open", "open", DecodeKind::Numeric),
    rule("High", "high", DecodeKind::Numeric),
    rule("Low", "low", DecodeKind::Numeric),
    rule("Change", "price_change", DecodeKind::Percentage),
    rule("Change from Open", "change_from_open", DecodeKind::Percentage),
    rule("Gap", "gap", DecodeKind::Percentage),
    rule("Volume", "volume", SCALED),
    rule("Average Volume", "avg_volume", SCALED),
    rule("Relative Volume", "relative_volume", DecodeKind::Numeric),
    rule("Trades", "trades_count", SCALED),
    rule("After-Hours Close", "afterhours_price", DecodeKind::Numeric),
    rule("After-Hours Change", "afterhours_change", DecodeKind::Percentage),
    // Valuation
    rule("P/E", "pe_ratio", DecodeKind::Numeric),
    rule("Forward P/E", "forward_pe", DecodeKind::Numeric),
    rule("PEG", "peg", DecodeKind::Numeric),
    rule("P/S", "ps_ratio", DecodeKind::Numeric),
    rule("P/B", "pb_ratio", DecodeKind::Numeric),
    rule("P/Cash", "price_to_cash", DecodeKind::Numeric),
    rule("P/Free Cash Flow", "price_to_free_cash_flow", DecodeKind::Numeric),
    rule("EPS (ttm)", "eps", DecodeKind::Numeric),
    rule("Book/sh", "book_value_per_share", DecodeKind::Numeric),
    rule("Cash/sh", "cash_per_share", DecodeKind::Numeric),
    rule("Dividend", "dividend", DecodeKind::Numeric),
    rule("Dividend Yield", "dividend_yield", DecodeKind::Percentage),
    rule("Income", "income", SCALED),
    rule("Sales", "sales", SCALED),
    // Growth and earnings
    rule("EPS this Y", "eps_this_y", DecodeKind::Percentage),
    rule("EPS next Y", "eps_next_y", DecodeKind::Percentage),
    rule("EPS past 5Y", "eps_past_5y", DecodeKind::Percentage),
    rule("EPS next 5Y", "eps_next_5y", DecodeKind::Percentage),
    rule("EPS growth this Y", "eps_growth_this_y", DecodeKind::Percentage),
    rule("EPS growth next Y", "eps_growth_next_y", DecodeKind::Percentage),
    rule("EPS growth past 5Y", "eps_growth_past_5y", DecodeKind::Percentage),
    rule("EPS growth next 5Y", "eps_growth_next_5y", DecodeKind::Percentage),
    rule("Sales past 5Y", "sales_growth_past_5y", DecodeKind::Percentage),
    rule("EPS Q/Q", "eps_growth_qtr", DecodeKind::Percentage),
    rule("Sales Q/Q", "sales_growth_qtr", DecodeKind::Percentage),
    rule("EPS Surprise", "eps_surprise", DecodeKind::Percentage),
    rule("Revenue Surprise", "revenue_surprise", DecodeKind::Percentage),
    rule("EPS Estimate", "eps_estimate", DecodeKind::Numeric),
    rule("EPS Actual", "eps_actual", DecodeKind::Numeric),
    rule("Revenue Estimate", "revenue_estimate", SCALED),
    rule("Revenue Actual", "revenue_actual", SCALED),
    rule("EPS Revision", "eps_revision", DecodeKind::Percentage),
    rule("Revenue Revision", "revenue_revision", DecodeKind::Percentage),
    // Performance
    rule("Performance (1 Minute)", "performance_1min", DecodeKind::Percentage),
    rule("Performance (2 Minutes)", "performance_2min", DecodeKind::Percentage),
    rule("Performance (3 Minutes)", "performance_3min", DecodeKind::Percentage),
    rule("Performance (5 Minutes)", "performance_5min", DecodeKind::Percentage),
    rule("Performance (10 Minutes)", "performance_10min", DecodeKind::Percentage),
    rule("Performance (15 Minutes)", "performance_15min", DecodeKind::Percentage),
    rule("Performance (30 Minutes)", "performance_30min", DecodeKind::Percentage),
    rule("Performance (1 Hour)", "performance_1h", DecodeKind::Percentage),
    rule("Performance (2 Hours)", "performance_2h", DecodeKind::Percentage),
    rule("Performance (4 Hours)", "performance_4h", DecodeKind::Percentage),
    rule("Performance (Week)", "performance_1w", DecodeKind::Percentage),
    rule("Performance (Month)", "performance_1m", DecodeKind::Percentage),
    rule("Performance (Quarter)", "performance_3m", DecodeKind::Percentage),
    rule("Performance (Half Year)", "performance_6m", DecodeKind::Percentage),
    rule("Performance (YTD)", "performance_ytd", DecodeKind::Percentage),
    rule("Performance (Year)", "performance_1y", DecodeKind::Percentage),
    rule("Return 3 Year", "performance_3y", DecodeKind::Percentage),
    rule("Return 5 Year", "performance_5y", DecodeKind::Percentage),
    rule("Return 10 Year", "performance_10y", DecodeKind::Percentage),
    rule("Return Since Inception", "performance_since_inception", DecodeKind::Percentage),
    // Financial health
    rule("Current Ratio", "current_ratio", DecodeKind::Numeric),
    rule("Quick Ratio", "quick_ratio", DecodeKind::Numeric),
    rule("LT Debt/Equity", "lt_debt_to_equity", DecodeKind::Numeric),
    rule("Total Debt/Equity", "debt_to_equity", DecodeKind::Numeric),
    rule("Gross Margin", "gross_margin", DecodeKind::Percentage),
    rule("Operating Margin", "operating_margin", DecodeKind::Percentage),
    rule("Profit Margin", "profit_margin", DecodeKind::Percentage),
    rule("Return on Assets", "roa", DecodeKind::Percentage),
    rule("Return on Equity", "roe", DecodeKind::Percentage),
    rule("Return on Invested Capital", "roic", DecodeKind::Percentage),
    rule("Payout Ratio", "payout_ratio", DecodeKind::Percentage),
    // Ownership
    rule("Insider Ownership", "insider_ownership", DecodeKind::Percentage),
    rule("Insider Transactions", "insider_transactions", DecodeKind::Percentage),
    rule("Institutional Ownership", "institutional_ownership", DecodeKind::Percentage),
    rule("Institutional Transactions", "institutional_transactions", DecodeKind::Percentage),
    rule("Shares Outstanding", "shares_outstanding", SCALED),
    rule("Shares Float", "shares_float", SCALED),
    rule("Float %", "float_percentage", DecodeKind::Percentage),
    rule("Short Float", "float_short", DecodeKind::Percentage),
    rule("Short Ratio", "short_ratio", DecodeKind::Numeric),
    rule("Short Interest", "short_interest", SCALED),
    rule("Analyst Recom", "analyst_recom", DecodeKind::Numeric),
    rule("Recom", "analyst_recommendation", DecodeKind::Numeric),
    rule("Target Price", "target_price", DecodeKind::Numeric),
    // Technical
    rule("Beta", "beta", DecodeKind::Numeric),
    rule("Average True Range", "atr", DecodeKind::Numeric),
    rule("Volatility", "volatility", DecodeKind::Percentage),
    rule("Volatility (Week)", "volatility_week", DecodeKind::Percentage),
    rule("Volatility (Month)", "volatility_month", DecodeKind::Percentage),
    rule("Relative Strength Index (14)", "rsi", DecodeKind::Numeric),
    rule("20-Day Simple Moving Average", "sma_20", DecodeKind::Percentage),
    rule("50-Day Simple Moving Average", "sma_50", DecodeKind::Percentage),
    rule("200-Day Simple Moving Average", "sma_200", DecodeKind::Percentage),
    rule("from SMA20", "sma_20_relative", DecodeKind::Percentage),
    rule("from SMA50", "sma_50_relative", DecodeKind::Percentage),
    rule("from SMA200", "sma_200_relative", DecodeKind::Percentage),
    rule("SMA20", "sma20", DecodeKind::Percentage),
    rule("SMA50", "sma50", DecodeKind::Percentage),
    rule("SMA200", "sma200", DecodeKind::Percentage),
    rule("50-Day High", "day_50_high", DecodeKind::Percentage),
    rule("50-Day Low", "day_50_low", DecodeKind::Percentage),
    rule("52-Week High", "week_52_high", DecodeKind::Percentage),
    rule("52-Week Low", "week_52_low", DecodeKind::Percentage),
    rule("All-Time High", "all_time_high", DecodeKind::Percentage),
    rule("All-Time Low", "all_time_low", DecodeKind::Percentage),
    // Funds
    rule("Category", "single_category", DecodeKind::PlainString),
    rule("Asset Type", "asset_type", DecodeKind::PlainString),
    rule("ETF Type", "etf_type", DecodeKind::PlainString),
    rule("Sector/Theme", "sector_theme", DecodeKind::PlainString),
    rule("Region", "region", DecodeKind::PlainString),
    rule("Active/Passive", "active_passive", DecodeKind::Enum(ACTIVE_PASSIVE)),
    rule("Tags", "tags", DecodeKind::PlainString),
    rule("Net Asset Value", "nav", DecodeKind::Numeric),
    rule("Net Asset Value %", "nav_percent", DecodeKind::Percentage),
    rule("Assets Under Management", "aum", SCALED),
    rule("Total Holdings", "total_holdings", SCALED),
    rule("Net Flows (1 Month)", "net_flows_1m", SCALED),
    rule("Net Flows % (1 Month)", "net_flows_1m_percent", DecodeKind::Percentage),
    rule("Net Flows (3 Month)", "net_flows_3m", SCALED),
    rule("Net Flows % (3 Month)", "net_flows_3m_percent", DecodeKind::Percentage),
    rule("Net Flows (YTD)", "net_flows_ytd", SCALED),
    rule("Net Flows % (YTD)", "net_flows_ytd_percent", DecodeKind::Percentage),
    rule("Net Flows (1 Year)", "net_flows_1y", SCALED),
    rule("Net Flows % (1 Year)", "net_flows_1y_percent", DecodeKind::Percentage),
];

static STANDARD: OnceLock<ResponseSchema> = OnceLock::new();

/// Lookup from export header (and output field) to decode rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    by_header: BTreeMap<&'static str, ColumnRule>,
    by_field: BTreeMap<&'static str, &'static str>,
}

impl ResponseSchema {
    /// Schema for the screener's CSV export columns.
    pub fn standard() -> Self {
        Self::from_rules(COLUMNS.iter().cloned())
    }

    /// Shared standard schema.
    pub fn global() -> &'static Self {
        STANDARD.get_or_init(Self::standard)
    }

    pub fn from_rules(rules: impl IntoIterator<Item = ColumnRule>) -> Self {
        let mut by_header = BTreeMap::new();
        let mut by_field = BTreeMap::new();
        for rule in rules {
            by_field.insert(rule.field, rule.header);
            by_header.insert(rule.header, rule);
        }
        Self {
            by_header,
            by_field,
        }
    }

    pub fn rule_for_header(&self, header: &str) -> Option<&ColumnRule> {
        self.by_header.get(header)
    }

    /// Rule for an output field name such as `market_cap`.
    pub fn rule_for_field(&self, field: &str) -> Option<&ColumnRule> {
        self.by_field
            .get(field)
            .and_then(|header| self.by_header.get(header))
    }

    pub fn rules(&self) -> impl Iterator<Item = &ColumnRule> {
        self.by_header.values()
    }

    pub fn len(&self) -> usize {
        self.by_header.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_header.is_empty()
    }
}

/// Field name for a header without a rule: lower-case, `%` spelled out,
/// other runs of non-alphanumerics collapsed to `_`.
pub fn normalize_header(header: &str) -> String {
    let mut out = String::with_capacity(header.len());
    let mut pending_sep = false;

    for c in header.trim().chars() {
        if c == '%' {
            if !out.is_empty() {
                out.push('_');
            }
            out.push_str("percent");
            pending_sep = false;
        } else if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            pending_sep = false;
        } else {
            pending_sep = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_and_fields_are_unique() {
        let schema = ResponseSchema::standard();
        assert_eq!(schema.len(), COLUMNS.len());
        assert_eq!(schema.by_field.len(), COLUMNS.len());
    }

    #[test]
    fn test_lookup_both_ways() {
        let schema = ResponseSchema::global();
        let rule = schema.rule_for_header("Market Cap").unwrap();
        assert_eq!(rule.field, "market_cap");
        assert!(matches!(rule.kind, DecodeKind::ScaledMagnitude(_)));
        assert_eq!(schema.rule_for_field("market_cap"), Some(rule));
        assert!(schema.rule_for_header("market_cap").is_none());
    }

    #[test]
    fn test_growth_and_short_spellings_are_distinct_columns() {
        let schema = ResponseSchema::global();
        assert_eq!(
            schema.rule_for_header("EPS growth this Y").map(|r| r.field),
            Some("eps_growth_this_y")
        );
        assert_eq!(
            schema.rule_for_header("EPS this Y").map(|r| r.field),
            Some("eps_this_y")
        );
        assert_eq!(
            schema.rule_for_field("net_flows_1m").map(|r| r.kind),
            Some(SCALED)
        );
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Float %"), "float_percent");
        assert_eq!(normalize_header("Net Flows (1 Month)"), "net_flows_1_month");
        assert_eq!(normalize_header("  Sector/Theme "), "sector_theme");
        assert_eq!(normalize_header("Tags"), "tags");
    }
}
