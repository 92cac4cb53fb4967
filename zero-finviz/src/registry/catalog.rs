//! The fixed field table.
//!
//! Token spellings follow the screener's filter grammar exactly. Shortcut
//! bounds are written in the unit of their field (see [`Unit`]).

use super::{
    CompoundLayout, CompoundPart, EncodingKind, FieldDescriptor, FieldGroup, Preset, RangeForm,
    RangeRules, TokenSet, Unit,
};

// ============================================================================
// Builders
// ============================================================================

fn preset_enum(
    id: &'static str,
    label: &'static str,
    group: FieldGroup,
    tokens: &'static [Preset],
    multi_select: bool,
) -> FieldDescriptor {
    FieldDescriptor {
        id,
        label,
        group,
        kind: EncodingKind::PresetEnum(TokenSet {
            tokens,
            multi_select,
        }),
    }
}

fn flag_enum(
    id: &'static str,
    label: &'static str,
    group: FieldGroup,
    tokens: &'static [Preset],
) -> FieldDescriptor {
    FieldDescriptor {
        id,
        label,
        group,
        kind: EncodingKind::FlagEnum(TokenSet {
            tokens,
            multi_select: false,
        }),
    }
}

fn date_range(id: &'static str, label: &'static str, tokens: &'static [Preset]) -> FieldDescriptor {
    FieldDescriptor {
        id,
        label,
        group: FieldGroup::Descriptive,
        kind: EncodingKind::DateRange(TokenSet {
            tokens,
            multi_select: true,
        }),
    }
}

fn numeric(
    id: &'static str,
    label: &'static str,
    group: FieldGroup,
    rules: RangeRules,
) -> FieldDescriptor {
    FieldDescriptor {
        id,
        label,
        group,
        kind: EncodingKind::NumericRange(rules),
    }
}

const fn rules(
    unit: Unit,
    precision: u8,
    allow_negative: bool,
    form: RangeForm,
    presets: &'static [Preset],
) -> RangeRules {
    RangeRules {
        precision,
        allow_negative,
        unit,
        form,
        presets,
    }
}

fn part(id: &'static str, label: &'static str, kind: EncodingKind, required: bool) -> CompoundPart {
    CompoundPart {
        descriptor: FieldDescriptor {
            id,
            label,
            group: FieldGroup::Part,
            kind,
        },
        required,
    }
}

// ============================================================================
// Descriptive
// ============================================================================

const EXCHANGES: &[Preset] = &[
    Preset::named("amex").labeled("AMEX"),
    Preset::named("cboe").labeled("CBOE"),
    Preset::named("nasd").labeled("NASDAQ"),
    Preset::named("nyse").labeled("NYSE"),
];

const INDICES: &[Preset] = &[
    Preset::named("sp500").labeled("S&P 500"),
    Preset::named("ndx").labeled("NASDAQ 100"),
    Preset::named("dji").labeled("DJIA"),
    Preset::named("rut").labeled("Russell 2000"),
];

const SECTORS: &[Preset] = &[
    Preset::named("basicmaterials").labeled("Basic Materials"),
    Preset::named("communicationservices").labeled("Communication Services"),
    Preset::named("consumercyclical").labeled("Consumer Cyclical"),
    Preset::named("consumerdefensive").labeled("Consumer Defensive"),
    Preset::named("energy").labeled("Energy"),
    Preset::named("financial").labeled("Financial Services"),
    Preset::named("healthcare").labeled("Healthcare"),
    Preset::named("industrials").labeled("Industrials"),
    Preset::named("realestate").labeled("Real Estate"),
    Preset::named("technology").labeled("Technology"),
    Preset::named("utilities").labeled("Utilities"),
];

const INDUSTRIES: &[Preset] = &[
    Preset::named("stocksonly").labeled("Stocks only (ex-Funds)"),
    Preset::named("exchangetradedfund").labeled("Exchange Traded Fund"),
    Preset::named("aerospacedefense").labeled("Aerospace & Defense"),
    Preset::named("airlines").labeled("Airlines"),
    Preset::named("assetmanagement").labeled("Asset Management"),
    Preset::named("automanufacturers").labeled("Auto Manufacturers"),
    Preset::named("banksdiversified").labeled("Banks - Diversified"),
    Preset::named("banksregional").labeled("Banks - Regional"),
    Preset::named("biotechnology").labeled("Biotechnology"),
    Preset::named("communicationequipment").labeled("Communication Equipment"),
    Preset::named("consumerelectronics").labeled("Consumer Electronics"),
    Preset::named("creditservices").labeled("Credit Services"),
    Preset::named("drugmanufacturersgeneral").labeled("Drug Manufacturers - General"),
    Preset::named("gold").labeled("Gold"),
    Preset::named("insurancelife").labeled("Insurance - Life"),
    Preset::named("internetcontentinformation").labeled("Internet Content & Information"),
    Preset::named("internetretail").labeled("Internet Retail"),
    Preset::named("medicaldevices").labeled("Medical Devices"),
    Preset::named("oilgasep").labeled("Oil & Gas E&P"),
    Preset::named("oilgasintegrated").labeled("Oil & Gas Integrated"),
    Preset::named("reitresidential").labeled("REIT - Residential"),
    Preset::named("reitretail").labeled("REIT - Retail"),
    Preset::named("semiconductors").labeled("Semiconductors"),
    Preset::named("softwareapplication").labeled("Software - Application"),
    Preset::named("softwareinfrastructure").labeled("Software - Infrastructure"),
    Preset::named("specialtyretail").labeled("Specialty Retail"),
    Preset::named("utilitiesregulatedelectric").labeled("Utilities - Regulated Electric"),
];

const COUNTRIES: &[Preset] = &[
    Preset::named("usa").labeled("USA"),
    Preset::named("notusa").labeled("Foreign (ex-USA)"),
    Preset::named("asia").labeled("Asia"),
    Preset::named("europe").labeled("Europe"),
    Preset::named("latinamerica").labeled("Latin America"),
    Preset::named("argentina").labeled("Argentina"),
    Preset::named("australia").labeled("Australia"),
    Preset::named("brazil").labeled("Brazil"),
    Preset::named("canada").labeled("Canada"),
    Preset::named("china").labeled("China"),
    Preset::named("france").labeled("France"),
    Preset::named("germany").labeled("Germany"),
    Preset::named("hongkong").labeled("Hong Kong"),
    Preset::named("india").labeled("India"),
    Preset::named("ireland").labeled("Ireland"),
    Preset::named("israel").labeled("Israel"),
    Preset::named("japan").labeled("Japan"),
    Preset::named("netherlands").labeled("Netherlands"),
    Preset::named("singapore").labeled("Singapore"),
    Preset::named("southkorea").labeled("South Korea"),
    Preset::named("switzerland").labeled("Switzerland"),
    Preset::named("taiwan").labeled("Taiwan"),
    Preset::named("unitedkingdom").labeled("United Kingdom"),
];

const MARKET_CAP: &[Preset] = &[
    Preset::over("mega", 200.0).labeled("Mega ($200bln and more)"),
    Preset::between("large", 10.0, 200.0).labeled("Large ($10bln to $200bln)"),
    Preset::between("mid", 2.0, 10.0).labeled("Mid ($2bln to $10bln)"),
    Preset::between("small", 0.3, 2.0).labeled("Small ($300mln to $2bln)"),
    Preset::between("micro", 0.05, 0.3).labeled("Micro ($50mln to $300mln)"),
    Preset::under("nano", 0.05).labeled("Nano (under $50mln)"),
    Preset::over("largeover", 10.0).labeled("+Large (over $10bln)"),
    Preset::over("midover", 2.0).labeled("+Mid (over $2bln)"),
    Preset::over("smallover", 0.3).labeled("+Small (over $300mln)"),
    Preset::over("microover", 0.05).labeled("+Micro (over $50mln)"),
    Preset::under("largeunder", 200.0).labeled("-Large (under $200bln)"),
    Preset::under("midunder", 10.0).labeled("-Mid (under $10bln)"),
    Preset::under("smallunder", 2.0).labeled("-Small (under $2bln)"),
    Preset::under("microunder", 0.3).labeled("-Micro (under $300mln)"),
];

const DIVIDEND_YIELD: &[Preset] = &[
    Preset::named("none").labeled("None (0%)"),
    Preset::named("pos").labeled("Positive (>0%)"),
    Preset::over("high", 5.0).labeled("High (>5%)"),
    Preset::over("veryhigh", 10.0).labeled("Very High (>10%)"),
    Preset::over("o1", 1.0),
    Preset::over("o2", 2.0),
    Preset::over("o3", 3.0),
    Preset::over("o4", 4.0),
    Preset::over("o6", 6.0),
    Preset::over("o7", 7.0),
    Preset::over("o8", 8.0),
    Preset::over("o9", 9.0),
];

const SHARES_MILLIONS: &[Preset] = &[
    Preset::under("u1", 1.0),
    Preset::under("u5", 5.0),
    Preset::under("u10", 10.0),
    Preset::under("u20", 20.0),
    Preset::under("u50", 50.0),
    Preset::under("u100", 100.0),
    Preset::over("o1", 1.0),
    Preset::over("o2", 2.0),
    Preset::over("o5", 5.0),
    Preset::over("o10", 10.0),
    Preset::over("o20", 20.0),
    Preset::over("o50", 50.0),
    Preset::over("o100", 100.0),
    Preset::over("o200", 200.0),
    Preset::over("o500", 500.0),
    Preset::over("o1000", 1000.0),
];

const SHORT_FLOAT: &[Preset] = &[
    Preset::under("low", 5.0).labeled("Low (<5%)"),
    Preset::over("high", 20.0).labeled("High (>20%)"),
    Preset::under("u10", 10.0),
    Preset::under("u15", 15.0),
    Preset::under("u20", 20.0),
    Preset::under("u25", 25.0),
    Preset::under("u30", 30.0),
    Preset::over("o5", 5.0),
    Preset::over("o10", 10.0),
    Preset::over("o15", 15.0),
    Preset::over("o25", 25.0),
    Preset::over("o30", 30.0),
];

const ANALYST_RECOM: &[Preset] = &[
    Preset::named("strongbuy").labeled("Strong Buy (1)"),
    Preset::named("buybetter").labeled("Buy or better"),
    Preset::named("buy").labeled("Buy"),
    Preset::named("holdbetter").labeled("Hold or better"),
    Preset::named("hold").labeled("Hold"),
    Preset::named("holdworse").labeled("Hold or worse"),
    Preset::named("sell").labeled("Sell"),
    Preset::named("sellworse").labeled("Sell or worse"),
    Preset::named("strongsell").labeled("Strong Sell (5)"),
];

const OPTION_SHORT: &[Preset] = &[
    Preset::named("option").labeled("Optionable"),
    Preset::named("short").labeled("Shortable"),
    Preset::named("optionshort").labeled("Optionable and shortable"),
];

const EARNINGS_WINDOWS: &[Preset] = &[
    Preset::named("today").labeled("Today"),
    Preset::named("todaybefore").labeled("Today Before Market Open"),
    Preset::named("todayafter").labeled("Today After Market Close"),
    Preset::named("tomorrow").labeled("Tomorrow"),
    Preset::named("tomorrowbefore").labeled("Tomorrow Before Market Open"),
    Preset::named("tomorrowafter").labeled("Tomorrow After Market Close"),
    Preset::named("yesterday").labeled("Yesterday"),
    Preset::named("yesterdaybefore").labeled("Yesterday Before Market Open"),
    Preset::named("yesterdayafter").labeled("Yesterday After Market Close"),
    Preset::named("nextdays5").labeled("Next 5 Days"),
    Preset::named("prevdays5").labeled("Previous 5 Days"),
    Preset::named("thisweek").labeled("This Week"),
    Preset::named("nextweek").labeled("Next Week"),
    Preset::named("prevweek").labeled("Previous Week"),
    Preset::named("thismonth").labeled("This Month"),
];

const IPO_WINDOWS: &[Preset] = &[
    Preset::named("today").labeled("Today"),
    Preset::named("yesterday").labeled("Yesterday"),
    Preset::named("prevweek").labeled("In the last week"),
    Preset::named("prevmonth").labeled("In the last month"),
    Preset::named("prevquarter").labeled("In the last quarter"),
    Preset::named("prevyear").labeled("In the last year"),
    Preset::named("prev2yrs").labeled("In the last 2 years"),
    Preset::named("prev3yrs").labeled("In the last 3 years"),
    Preset::named("prev5yrs").labeled("In the last 5 years"),
    Preset::named("more1").labeled("More than a year ago"),
    Preset::named("more5").labeled("More than 5 years ago"),
    Preset::named("more10").labeled("More than 10 years ago"),
    Preset::named("more15").labeled("More than 15 years ago"),
    Preset::named("more20").labeled("More than 20 years ago"),
    Preset::named("more25").labeled("More than 25 years ago"),
];

const AVERAGE_VOLUME: &[Preset] = &[
    Preset::under("u50", 50.0),
    Preset::under("u100", 100.0),
    Preset::under("u500", 500.0),
    Preset::under("u750", 750.0),
    Preset::under("u1000", 1000.0),
    Preset::over("o50", 50.0),
    Preset::over("o100", 100.0),
    Preset::over("o200", 200.0),
    Preset::over("o300", 300.0),
    Preset::over("o400", 400.0),
    Preset::over("o500", 500.0),
    Preset::over("o750", 750.0),
    Preset::over("o1000", 1000.0),
    Preset::over("o2000", 2000.0),
    Preset::between("100to500", 100.0, 500.0),
    Preset::between("100to1000", 100.0, 1000.0),
    Preset::between("500to1000", 500.0, 1000.0),
    Preset::between("500to10000", 500.0, 10000.0),
];

const RELATIVE_VOLUME: &[Preset] = &[
    Preset::over("o10", 10.0),
    Preset::over("o5", 5.0),
    Preset::over("o3", 3.0),
    Preset::over("o2", 2.0),
    Preset::over("o1.5", 1.5),
    Preset::over("o1", 1.0),
    Preset::over("o0.75", 0.75),
    Preset::over("o0.5", 0.5),
    Preset::over("o0.25", 0.25),
    Preset::under("u2", 2.0),
    Preset::under("u1.5", 1.5),
    Preset::under("u1", 1.0),
    Preset::under("u0.75", 0.75),
    Preset::under("u0.5", 0.5),
    Preset::under("u0.25", 0.25),
    Preset::under("u0.1", 0.1),
];

const CURRENT_VOLUME: &[Preset] = &[
    Preset::under("u50", 50.0),
    Preset::under("u100", 100.0),
    Preset::under("u500", 500.0),
    Preset::under("u1000", 1000.0),
    Preset::over("o0", 0.0),
    Preset::over("o50", 50.0),
    Preset::over("o100", 100.0),
    Preset::over("o200", 200.0),
    Preset::over("o500", 500.0),
    Preset::over("o1000", 1000.0),
    Preset::over("o2000", 2000.0),
    Preset::over("o5000", 5000.0),
    Preset::over("o10000", 10000.0),
    Preset::over("o20000", 20000.0),
];

const PRICE: &[Preset] = &[
    Preset::under("u1", 1.0),
    Preset::under("u2", 2.0),
    Preset::under("u3", 3.0),
    Preset::under("u4", 4.0),
    Preset::under("u5", 5.0),
    Preset::under("u7", 7.0),
    Preset::under("u10", 10.0),
    Preset::under("u15", 15.0),
    Preset::under("u20", 20.0),
    Preset::under("u30", 30.0),
    Preset::under("u40", 40.0),
    Preset::under("u50", 50.0),
    Preset::over("o1", 1.0),
    Preset::over("o2", 2.0),
    Preset::over("o3", 3.0),
    Preset::over("o4", 4.0),
    Preset::over("o5", 5.0),
    Preset::over("o7", 7.0),
    Preset::over("o10", 10.0),
    Preset::over("o15", 15.0),
    Preset::over("o20", 20.0),
    Preset::over("o30", 30.0),
    Preset::over("o40", 40.0),
    Preset::over("o50", 50.0),
    Preset::over("o60", 60.0),
    Preset::over("o70", 70.0),
    Preset::over("o80", 80.0),
    Preset::over("o90", 90.0),
    Preset::over("o100", 100.0),
    Preset::between("1to5", 1.0, 5.0),
    Preset::between("1to10", 1.0, 10.0),
    Preset::between("1to20", 1.0, 20.0),
    Preset::between("5to10", 5.0, 10.0),
    Preset::between("5to20", 5.0, 20.0),
    Preset::between("5to50", 5.0, 50.0),
    Preset::between("10to20", 10.0, 20.0),
    Preset::between("10to50", 10.0, 50.0),
    Preset::between("20to50", 20.0, 50.0),
    Preset::between("50to100", 50.0, 100.0),
];

const TARGET_PRICE: &[Preset] = &[
    Preset::named("a50").labeled("50% Above Price"),
    Preset::named("a40").labeled("40% Above Price"),
    Preset::named("a30").labeled("30% Above Price"),
    Preset::named("a20").labeled("20% Above Price"),
    Preset::named("a10").labeled("10% Above Price"),
    Preset::named("a5").labeled("5% Above Price"),
    Preset::named("above").labeled("Above Price"),
    Preset::named("below").labeled("Below Price"),
    Preset::named("b5").labeled("5% Below Price"),
    Preset::named("b10").labeled("10% Below Price"),
    Preset::named("b20").labeled("20% Below Price"),
    Preset::named("b30").labeled("30% Below Price"),
    Preset::named("b40").labeled("40% Below Price"),
    Preset::named("b50").labeled("50% Below Price"),
];

const NEWS_DATE: &[Preset] = &[
    Preset::named("today").labeled("Today"),
    Preset::named("todayafter").labeled("Aftermarket Today"),
    Preset::named("sinceyesterday").labeled("Since Yesterday"),
    Preset::named("yesterday").labeled("Yesterday"),
    Preset::named("prevdays5").labeled("In the last 5 days"),
    Preset::named("prevweek").labeled("In the last week"),
    Preset::named("prevmonth").labeled("In the last month"),
];

// ============================================================================
// Fundamental
// ============================================================================

const VALUATION: &[Preset] = &[
    Preset::under("low", 15.0).labeled("Low (<15)"),
    Preset::named("profitable").labeled("Profitable (>0)"),
    Preset::over("high", 50.0).labeled("High (>50)"),
    Preset::under("u5", 5.0),
    Preset::under("u10", 10.0),
    Preset::under("u20", 20.0),
    Preset::under("u25", 25.0),
    Preset::under("u30", 30.0),
    Preset::under("u35", 35.0),
    Preset::under("u40", 40.0),
    Preset::under("u45", 45.0),
    Preset::under("u50", 50.0),
    Preset::over("o5", 5.0),
    Preset::over("o10", 10.0),
    Preset::over("o15", 15.0),
    Preset::over("o20", 20.0),
    Preset::over("o25", 25.0),
    Preset::over("o30", 30.0),
    Preset::over("o40", 40.0),
];

const PRICE_MULTIPLE: &[Preset] = &[
    Preset::under("low", 1.0).labeled("Low (<1)"),
    Preset::over("high", 10.0).labeled("High (>10)"),
    Preset::under("u2", 2.0),
    Preset::under("u3", 3.0),
    Preset::under("u4", 4.0),
    Preset::under("u5", 5.0),
    Preset::under("u6", 6.0),
    Preset::under("u7", 7.0),
    Preset::under("u8", 8.0),
    Preset::under("u9", 9.0),
    Preset::under("u10", 10.0),
    Preset::over("o1", 1.0),
    Preset::over("o2", 2.0),
    Preset::over("o3", 3.0),
    Preset::over("o4", 4.0),
    Preset::over("o5", 5.0),
];

const PEG: &[Preset] = &[
    Preset::under("low", 1.0).labeled("Low (<1)"),
    Preset::over("high", 2.0).labeled("High (>2)"),
    Preset::under("u2", 2.0),
    Preset::under("u3", 3.0),
    Preset::over("o1", 1.0),
    Preset::over("o3", 3.0),
];

const GROWTH: &[Preset] = &[
    Preset::under("neg", 0.0).labeled("Negative (<0%)"),
    Preset::over("pos", 0.0).labeled("Positive (>0%)"),
    Preset::between("poslow", 0.0, 10.0).labeled("Positive Low (0-10%)"),
    Preset::over("high", 25.0).labeled("High (>25%)"),
    Preset::under("u5", 5.0),
    Preset::under("u10", 10.0),
    Preset::under("u15", 15.0),
    Preset::under("u20", 20.0),
    Preset::under("u25", 25.0),
    Preset::under("u30", 30.0),
    Preset::over("o5", 5.0),
    Preset::over("o10", 10.0),
    Preset::over("o15", 15.0),
    Preset::over("o20", 20.0),
    Preset::over("o30", 30.0),
];

const EPS_REVISION: &[Preset] = &[
    Preset::named("ep").labeled("EPS Up"),
    Preset::named("en").labeled("EPS Down"),
    Preset::named("eo5").labeled("EPS Up over 5%"),
    Preset::named("eo10").labeled("EPS Up over 10%"),
    Preset::named("eo20").labeled("EPS Up over 20%"),
    Preset::named("eo50").labeled("EPS Up over 50%"),
    Preset::named("eu5").labeled("EPS Down over 5%"),
    Preset::named("eu10").labeled("EPS Down over 10%"),
];

const REVENUE_REVISION: &[Preset] = &[
    Preset::named("rp").labeled("Revenue Up"),
    Preset::named("rn").labeled("Revenue Down"),
    Preset::named("ro5").labeled("Revenue Up over 5%"),
    Preset::named("ro10").labeled("Revenue Up over 10%"),
    Preset::named("ro20").labeled("Revenue Up over 20%"),
    Preset::named("ro50").labeled("Revenue Up over 50%"),
    Preset::named("ru5").labeled("Revenue Down over 5%"),
    Preset::named("ru10").labeled("Revenue Down over 10%"),
];

const RETURNS: &[Preset] = &[
    Preset::over("pos", 0.0).labeled("Positive (>0%)"),
    Preset::under("neg", 0.0).labeled("Negative (<0%)"),
    Preset::over("verypos", 30.0).labeled("Very Positive (>30%)"),
    Preset::under("veryneg", -15.0).labeled("Very Negative (<-15%)"),
    Preset::under("u-50", -50.0),
    Preset::under("u-25", -25.0),
    Preset::under("u-10", -10.0),
    Preset::under("u-5", -5.0),
    Preset::over("o5", 5.0),
    Preset::over("o10", 10.0),
    Preset::over("o15", 15.0),
    Preset::over("o20", 20.0),
    Preset::over("o25", 25.0),
    Preset::over("o50", 50.0),
];

const LIQUIDITY: &[Preset] = &[
    Preset::over("high", 3.0).labeled("High (>3)"),
    Preset::under("low", 1.0).labeled("Low (<1)"),
    Preset::under("u0.5", 0.5),
    Preset::over("o0.5", 0.5),
    Preset::over("o1", 1.0),
    Preset::over("o1.5", 1.5),
    Preset::over("o2", 2.0),
    Preset::over("o5", 5.0),
    Preset::over("o10", 10.0),
];

const LEVERAGE: &[Preset] = &[
    Preset::over("high", 0.5).labeled("High (>0.5)"),
    Preset::under("low", 0.1).labeled("Low (<0.1)"),
    Preset::under("u1", 1.0),
    Preset::under("u0.9", 0.9),
    Preset::under("u0.8", 0.8),
    Preset::under("u0.7", 0.7),
    Preset::under("u0.6", 0.6),
    Preset::under("u0.5", 0.5),
    Preset::over("o0.1", 0.1),
    Preset::over("o0.2", 0.2),
    Preset::over("o0.3", 0.3),
    Preset::over("o1", 1.0),
];

const MARGIN: &[Preset] = &[
    Preset::over("pos", 0.0).labeled("Positive (>0%)"),
    Preset::under("neg", 0.0).labeled("Negative (<0%)"),
    Preset::over("high", 20.0).labeled("High (>20%)"),
    Preset::under("veryneg", -20.0).labeled("Very Negative (<-20%)"),
    Preset::under("u90", 90.0),
    Preset::under("u50", 50.0),
    Preset::under("u10", 10.0),
    Preset::under("u-10", -10.0),
    Preset::over("o5", 5.0),
    Preset::over("o10", 10.0),
    Preset::over("o30", 30.0),
    Preset::over("o50", 50.0),
    Preset::over("o70", 70.0),
    Preset::over("o90", 90.0),
];

const PAYOUT: &[Preset] = &[
    Preset::named("none").labeled("None (0%)"),
    Preset::over("pos", 0.0).labeled("Positive (>0%)"),
    Preset::under("low", 20.0).labeled("Low (<20%)"),
    Preset::over("high", 50.0).labeled("High (>50%)"),
    Preset::over("o10", 10.0),
    Preset::over("o20", 20.0),
    Preset::over("o30", 30.0),
    Preset::over("o40", 40.0),
    Preset::over("o100", 100.0),
    Preset::under("u10", 10.0),
    Preset::under("u30", 30.0),
    Preset::under("u50", 50.0),
    Preset::under("u100", 100.0),
];

const OWNERSHIP: &[Preset] = &[
    Preset::under("low", 5.0).labeled("Low (<5%)"),
    Preset::over("high", 30.0).labeled("High (>30%)"),
    Preset::over("veryhigh", 50.0).labeled("Very High (>50%)"),
    Preset::over("o10", 10.0),
    Preset::over("o20", 20.0),
    Preset::over("o40", 40.0),
    Preset::over("o60", 60.0),
    Preset::over("o70", 70.0),
    Preset::over("o80", 80.0),
    Preset::over("o90", 90.0),
    Preset::under("u10", 10.0),
    Preset::under("u50", 50.0),
    Preset::under("u90", 90.0),
];

const TRANSACTIONS: &[Preset] = &[
    Preset::under("veryneg", -20.0).labeled("Very Negative (<-20%)"),
    Preset::under("neg", 0.0).labeled("Negative (<0%)"),
    Preset::over("pos", 0.0).labeled("Positive (>0%)"),
    Preset::over("verypos", 20.0).labeled("Very Positive (>20%)"),
    Preset::under("u-90", -90.0),
    Preset::under("u-50", -50.0),
    Preset::under("u-10", -10.0),
    Preset::under("u-5", -5.0),
    Preset::over("o5", 5.0),
    Preset::over("o10", 10.0),
    Preset::over("o50", 50.0),
    Preset::over("o90", 90.0),
];

// ============================================================================
// Technical
// ============================================================================

const PERF_PERIODS: &[Preset] = &[
    Preset::named("d").labeled("Today"),
    Preset::named("1w").labeled("Week"),
    Preset::named("4w").labeled("Month"),
    Preset::named("13w").labeled("Quarter"),
    Preset::named("26w").labeled("Half Year"),
    Preset::named("52w").labeled("Year"),
    Preset::named("ytd").labeled("Year To Date"),
    Preset::named("3y").labeled("3 Years"),
    Preset::named("5y").labeled("5 Years"),
    Preset::named("10y").labeled("10 Years"),
];

const PERF_PRESETS: &[Preset] = &[
    Preset::named("dup").labeled("Today Up"),
    Preset::named("ddown").labeled("Today Down"),
    Preset::named("d5o").labeled("Today +5%"),
    Preset::named("d5u").labeled("Today -5%"),
    Preset::named("1wup").labeled("Week Up"),
    Preset::named("1wdown").labeled("Week Down"),
    Preset::named("1w10o").labeled("Week +10%"),
    Preset::named("1w10u").labeled("Week -10%"),
    Preset::named("4wup").labeled("Month Up"),
    Preset::named("4wdown").labeled("Month Down"),
    Preset::named("4w20o").labeled("Month +20%"),
    Preset::named("4w20u").labeled("Month -20%"),
    Preset::named("13wup").labeled("Quarter Up"),
    Preset::named("13wdown").labeled("Quarter Down"),
    Preset::named("26wup").labeled("Half Up"),
    Preset::named("26wdown").labeled("Half Down"),
    Preset::named("52wup").labeled("Year Up"),
    Preset::named("52wdown").labeled("Year Down"),
    Preset::named("ytdup").labeled("YTD Up"),
    Preset::named("ytddown").labeled("YTD Down"),
];

const RSI: &[Preset] = &[
    Preset::over("ob90", 90.0).labeled("Overbought (90)"),
    Preset::over("ob80", 80.0).labeled("Overbought (80)"),
    Preset::over("ob70", 70.0).labeled("Overbought (70)"),
    Preset::over("ob60", 60.0).labeled("Overbought (60)"),
    Preset::under("os50", 50.0).labeled("Oversold (50)"),
    Preset::under("os40", 40.0).labeled("Oversold (40)"),
    Preset::under("os30", 30.0).labeled("Oversold (30)"),
    Preset::under("os20", 20.0).labeled("Oversold (20)"),
    Preset::under("os10", 10.0).labeled("Oversold (10)"),
    Preset::under("nob60", 60.0).labeled("Not Overbought (<60)"),
    Preset::over("nos50", 50.0).labeled("Not Oversold (>50)"),
    Preset::over("nos40", 40.0).labeled("Not Oversold (>40)"),
];

const DAILY_MOVE: &[Preset] = &[
    Preset::over("u", 0.0).labeled("Up"),
    Preset::over("u1", 1.0),
    Preset::over("u2", 2.0),
    Preset::over("u3", 3.0),
    Preset::over("u4", 4.0),
    Preset::over("u5", 5.0),
    Preset::over("u6", 6.0),
    Preset::over("u7", 7.0),
    Preset::over("u8", 8.0),
    Preset::over("u9", 9.0),
    Preset::over("u10", 10.0),
    Preset::over("u15", 15.0),
    Preset::over("u20", 20.0),
    Preset::under("d", 0.0).labeled("Down"),
    Preset::under("d1", -1.0),
    Preset::under("d2", -2.0),
    Preset::under("d3", -3.0),
    Preset::under("d4", -4.0),
    Preset::under("d5", -5.0),
    Preset::under("d6", -6.0),
    Preset::under("d7", -7.0),
    Preset::under("d8", -8.0),
    Preset::under("d9", -9.0),
    Preset::under("d10", -10.0),
    Preset::under("d15", -15.0),
    Preset::under("d20", -20.0),
];

const SMA20: &[Preset] = &[
    Preset::named("pa").labeled("Price above SMA20"),
    Preset::named("pb").labeled("Price below SMA20"),
    Preset::named("pa10").labeled("Price 10% above SMA20"),
    Preset::named("pa20").labeled("Price 20% above SMA20"),
    Preset::named("pa50").labeled("Price 50% above SMA20"),
    Preset::named("pb10").labeled("Price 10% below SMA20"),
    Preset::named("pb20").labeled("Price 20% below SMA20"),
    Preset::named("pb50").labeled("Price 50% below SMA20"),
    Preset::named("pca").labeled("Price crossed SMA20 above"),
    Preset::named("pcb").labeled("Price crossed SMA20 below"),
    Preset::named("cross50").labeled("SMA20 crossed SMA50"),
    Preset::named("cross50a").labeled("SMA20 crossed SMA50 above"),
    Preset::named("cross50b").labeled("SMA20 crossed SMA50 below"),
    Preset::named("cross200").labeled("SMA20 crossed SMA200"),
    Preset::named("cross200a").labeled("SMA20 crossed SMA200 above"),
    Preset::named("cross200b").labeled("SMA20 crossed SMA200 below"),
    Preset::named("sa50").labeled("SMA20 above SMA50"),
    Preset::named("sb50").labeled("SMA20 below SMA50"),
    Preset::named("sa200").labeled("SMA20 above SMA200"),
    Preset::named("sb200").labeled("SMA20 below SMA200"),
];

const SMA50: &[Preset] = &[
    Preset::named("pa").labeled("Price above SMA50"),
    Preset::named("pb").labeled("Price below SMA50"),
    Preset::named("pa10").labeled("Price 10% above SMA50"),
    Preset::named("pa20").labeled("Price 20% above SMA50"),
    Preset::named("pa50").labeled("Price 50% above SMA50"),
    Preset::named("pb10").labeled("Price 10% below SMA50"),
    Preset::named("pb20").labeled("Price 20% below SMA50"),
    Preset::named("pb50").labeled("Price 50% below SMA50"),
    Preset::named("pca").labeled("Price crossed SMA50 above"),
    Preset::named("pcb").labeled("Price crossed SMA50 below"),
    Preset::named("cross20").labeled("SMA50 crossed SMA20"),
    Preset::named("cross20a").labeled("SMA50 crossed SMA20 above"),
    Preset::named("cross20b").labeled("SMA50 crossed SMA20 below"),
    Preset::named("cross200").labeled("SMA50 crossed SMA200"),
    Preset::named("cross200a").labeled("SMA50 crossed SMA200 above"),
    Preset::named("cross200b").labeled("SMA50 crossed SMA200 below"),
    Preset::named("sa20").labeled("SMA50 above SMA20"),
    Preset::named("sb20").labeled("SMA50 below SMA20"),
    Preset::named("sa200").labeled("SMA50 above SMA200"),
    Preset::named("sb200").labeled("SMA50 below SMA200"),
];

const SMA200: &[Preset] = &[
    Preset::named("pa").labeled("Price above SMA200"),
    Preset::named("pb").labeled("Price below SMA200"),
    Preset::named("pa10").labeled("Price 10% above SMA200"),
    Preset::named("pa20").labeled("Price 20% above SMA200"),
    Preset::named("pa50").labeled("Price 50% above SMA200"),
    Preset::named("pa100").labeled("Price 100% above SMA200"),
    Preset::named("pb10").labeled("Price 10% below SMA200"),
    Preset::named("pb20").labeled("Price 20% below SMA200"),
    Preset::named("pb50").labeled("Price 50% below SMA200"),
    Preset::named("pca").labeled("Price crossed SMA200 above"),
    Preset::named("pcb").labeled("Price crossed SMA200 below"),
    Preset::named("cross20").labeled("SMA200 crossed SMA20"),
    Preset::named("cross20a").labeled("SMA200 crossed SMA20 above"),
    Preset::named("cross20b").labeled("SMA200 crossed SMA20 below"),
    Preset::named("cross50").labeled("SMA200 crossed SMA50"),
    Preset::named("cross50a").labeled("SMA200 crossed SMA50 above"),
    Preset::named("cross50b").labeled("SMA200 crossed SMA50 below"),
    Preset::named("sa20").labeled("SMA200 above SMA20"),
    Preset::named("sb20").labeled("SMA200 below SMA20"),
    Preset::named("sa50").labeled("SMA200 above SMA50"),
    Preset::named("sb50").labeled("SMA200 below SMA50"),
];

const HIGH_LOW_SHORT: &[Preset] = &[
    Preset::named("nh").labeled("New High"),
    Preset::named("nl").labeled("New Low"),
    Preset::named("b0to3h").labeled("0-3% below High"),
    Preset::named("b0to5h").labeled("0-5% below High"),
    Preset::named("b0to10h").labeled("0-10% below High"),
    Preset::named("a0to3h").labeled("0-3% above Low"),
    Preset::named("a0to5h").labeled("0-5% above Low"),
    Preset::named("a0to10h").labeled("0-10% above Low"),
    Preset::named("b5h").labeled("5% or more below High"),
    Preset::named("b10h").labeled("10% or more below High"),
    Preset::named("b20h").labeled("20% or more below High"),
    Preset::named("a5h").labeled("5% or more above Low"),
    Preset::named("a10h").labeled("10% or more above Low"),
    Preset::named("a20h").labeled("20% or more above Low"),
];

const HIGH_LOW_LONG: &[Preset] = &[
    Preset::named("nh").labeled("New High"),
    Preset::named("nl").labeled("New Low"),
    Preset::named("b0to3h").labeled("0-3% below High"),
    Preset::named("b0to5h").labeled("0-5% below High"),
    Preset::named("b0to10h").labeled("0-10% below High"),
    Preset::named("b5h").labeled("5% or more below High"),
    Preset::named("b10h").labeled("10% or more below High"),
    Preset::named("b20h").labeled("20% or more below High"),
    Preset::named("b30h").labeled("30% or more below High"),
    Preset::named("b50h").labeled("50% or more below High"),
    Preset::named("b90h").labeled("90% or more below High"),
    Preset::named("a0to3h").labeled("0-3% above Low"),
    Preset::named("a0to5h").labeled("0-5% above Low"),
    Preset::named("a0to10h").labeled("0-10% above Low"),
    Preset::named("a5h").labeled("5% or more above Low"),
    Preset::named("a10h").labeled("10% or more above Low"),
    Preset::named("a20h").labeled("20% or more above Low"),
    Preset::named("a30h").labeled("30% or more above Low"),
    Preset::named("a50h").labeled("50% or more above Low"),
    Preset::named("a100h").labeled("100% or more above Low"),
    Preset::named("a300h").labeled("300% or more above Low"),
    Preset::named("a500h").labeled("500% or more above Low"),
];

const PATTERNS: &[Preset] = &[
    Preset::named("horizontal").labeled("Horizontal S/R"),
    Preset::named("horizontal2").labeled("Horizontal S/R (Strong)"),
    Preset::named("tlresistance").labeled("TL Resistance"),
    Preset::named("tlsupport").labeled("TL Support"),
    Preset::named("wedgeup").labeled("Wedge Up"),
    Preset::named("wedgedown").labeled("Wedge Down"),
    Preset::named("wedge").labeled("Wedge"),
    Preset::named("triangleasc").labeled("Triangle Ascending"),
    Preset::named("triangledesc").labeled("Triangle Descending"),
    Preset::named("channelup").labeled("Channel Up"),
    Preset::named("channeldown").labeled("Channel Down"),
    Preset::named("channel").labeled("Channel"),
    Preset::named("doubletop").labeled("Double Top"),
    Preset::named("doublebottom").labeled("Double Bottom"),
    Preset::named("multipletop").labeled("Multiple Top"),
    Preset::named("multiplebottom").labeled("Multiple Bottom"),
    Preset::named("headandshoulders").labeled("Head & Shoulders"),
    Preset::named("headandshouldersinv").labeled("Head & Shoulders Inverse"),
];

const CANDLESTICKS: &[Preset] = &[
    Preset::named("lls").labeled("Long Lower Shadow"),
    Preset::named("lus").labeled("Long Upper Shadow"),
    Preset::named("h").labeled("Hammer"),
    Preset::named("ih").labeled("Inverted Hammer"),
    Preset::named("stw").labeled("Spinning Top White"),
    Preset::named("stb").labeled("Spinning Top Black"),
    Preset::named("d").labeled("Doji"),
    Preset::named("dd").labeled("Dragonfly Doji"),
    Preset::named("gd").labeled("Gravestone Doji"),
    Preset::named("mw").labeled("Marubozu White"),
    Preset::named("mb").labeled("Marubozu Black"),
];

const BETA: &[Preset] = &[
    Preset::under("u0", 0.0),
    Preset::under("u0.5", 0.5),
    Preset::under("u1", 1.0),
    Preset::under("u1.5", 1.5),
    Preset::under("u2", 2.0),
    Preset::over("o0", 0.0),
    Preset::over("o0.5", 0.5),
    Preset::over("o1", 1.0),
    Preset::over("o1.5", 1.5),
    Preset::over("o2", 2.0),
    Preset::over("o3", 3.0),
    Preset::over("o4", 4.0),
    Preset::between("0to0.5", 0.0, 0.5),
    Preset::between("0to1", 0.0, 1.0),
    Preset::between("0.5to1", 0.5, 1.0),
    Preset::between("0.5to1.5", 0.5, 1.5),
    Preset::between("1to1.5", 1.0, 1.5),
    Preset::between("1to2", 1.0, 2.0),
];

const ATR: &[Preset] = &[
    Preset::over("o0.25", 0.25),
    Preset::over("o0.5", 0.5),
    Preset::over("o0.75", 0.75),
    Preset::over("o1", 1.0),
    Preset::over("o1.5", 1.5),
    Preset::over("o2", 2.0),
    Preset::over("o3", 3.0),
    Preset::over("o5", 5.0),
    Preset::under("u0.25", 0.25),
    Preset::under("u0.5", 0.5),
    Preset::under("u1", 1.0),
    Preset::under("u2", 2.0),
    Preset::under("u5", 5.0),
];

// ============================================================================
// Table
// ============================================================================

/// Every screenable field, in catalog order.
pub(super) fn fields() -> Vec<FieldDescriptor> {
    use FieldGroup::{Descriptive, Fundamental, Technical};
    use RangeForm::{Custom, PreferPreset};

    let growth = || rules(Unit::Percent, 2, true, PreferPreset, GROWTH);
    let returns = || rules(Unit::Percent, 2, true, PreferPreset, RETURNS);
    let margin = || rules(Unit::Percent, 2, true, PreferPreset, MARGIN);
    let ownership = || rules(Unit::Percent, 2, false, PreferPreset, OWNERSHIP);
    let transactions = || rules(Unit::Percent, 2, true, PreferPreset, TRANSACTIONS);
    let daily_move = || rules(Unit::Percent, 2, true, PreferPreset, DAILY_MOVE);
    let multiple = || rules(Unit::Ratio, 2, false, PreferPreset, PRICE_MULTIPLE);

    vec![
        // Descriptive
        preset_enum("exch", "Exchange", Descriptive, EXCHANGES, true),
        preset_enum("idx", "Index", Descriptive, INDICES, true),
        preset_enum("sec", "Sector", Descriptive, SECTORS, true),
        preset_enum("ind", "Industry", Descriptive, INDUSTRIES, true),
        preset_enum("geo", "Country", Descriptive, COUNTRIES, true),
        numeric(
            "cap",
            "Market Cap.",
            Descriptive,
            rules(Unit::Billions, 2, false, PreferPreset, MARKET_CAP),
        ),
        numeric(
            "fa_div",
            "Dividend Yield",
            Descriptive,
            rules(Unit::Percent, 2, false, PreferPreset, DIVIDEND_YIELD),
        ),
        numeric(
            "sh_float",
            "Float",
            Descriptive,
            rules(Unit::Millions, 2, false, PreferPreset, SHARES_MILLIONS),
        ),
        numeric(
            "sh_outstanding",
            "Shares Outstanding",
            Descriptive,
            rules(Unit::Millions, 2, false, PreferPreset, SHARES_MILLIONS),
        ),
        numeric(
            "sh_short",
            "Float Short",
            Descriptive,
            rules(Unit::Percent, 2, false, PreferPreset, SHORT_FLOAT),
        ),
        flag_enum("an_recom", "Analyst Recom.", Descriptive, ANALYST_RECOM),
        flag_enum("sh_opt", "Option/Short", Descriptive, OPTION_SHORT),
        date_range("earningsdate", "Earnings Date", EARNINGS_WINDOWS),
        date_range("ipodate", "IPO Date", IPO_WINDOWS),
        numeric(
            "sh_avgvol",
            "Average Volume",
            Descriptive,
            rules(Unit::Thousands, 0, false, PreferPreset, AVERAGE_VOLUME),
        ),
        numeric(
            "sh_relvol",
            "Relative Volume",
            Descriptive,
            rules(Unit::Ratio, 2, false, PreferPreset, RELATIVE_VOLUME),
        ),
        numeric(
            "sh_curvol",
            "Current Volume",
            Descriptive,
            rules(Unit::Thousands, 0, false, PreferPreset, CURRENT_VOLUME),
        ),
        numeric(
            "sh_price",
            "Price",
            Descriptive,
            rules(Unit::Dollars, 2, false, Custom, PRICE),
        ),
        flag_enum("targetprice", "Target Price", Descriptive, TARGET_PRICE),
        flag_enum("news_date", "Latest News", Descriptive, NEWS_DATE),
        // Fundamental
        numeric(
            "fa_pe",
            "P/E",
            Fundamental,
            rules(Unit::Ratio, 2, false, PreferPreset, VALUATION),
        ),
        numeric(
            "fa_fpe",
            "Forward P/E",
            Fundamental,
            rules(Unit::Ratio, 2, false, PreferPreset, VALUATION),
        ),
        numeric(
            "fa_peg",
            "PEG",
            Fundamental,
            rules(Unit::Ratio, 2, false, PreferPreset, PEG),
        ),
        numeric("fa_ps", "P/S", Fundamental, multiple()),
        numeric("fa_pb", "P/B", Fundamental, multiple()),
        numeric("fa_pc", "Price/Cash", Fundamental, multiple()),
        numeric(
            "fa_pfcf",
            "Price/Free Cash Flow",
            Fundamental,
            rules(Unit::Ratio, 2, false, PreferPreset, VALUATION),
        ),
        numeric(
            "fa_evebitda",
            "EV/EBITDA",
            Fundamental,
            rules(Unit::Ratio, 2, true, PreferPreset, VALUATION),
        ),
        numeric("fa_evsales", "EV/Sales", Fundamental, multiple()),
        numeric("fa_epsyoy", "EPS growth this year", Fundamental, growth()),
        numeric("fa_epsyoy1", "EPS growth next year", Fundamental, growth()),
        numeric("fa_epsyoyttm", "EPS growth TTM", Fundamental, growth()),
        numeric("fa_eps5years", "EPS growth past 5 years", Fundamental, growth()),
        numeric("fa_estltgrowth", "EPS growth next 5 years", Fundamental, growth()),
        numeric("fa_sales5years", "Sales growth past 5 years", Fundamental, growth()),
        numeric("fa_salesyoyttm", "Sales growth TTM", Fundamental, growth()),
        numeric("fa_epsqoq", "EPS growth qtr over qtr", Fundamental, growth()),
        numeric("fa_salesqoq", "Sales growth qtr over qtr", Fundamental, growth()),
        FieldDescriptor {
            id: "fa_epsrev",
            label: "EPS/Revenue Revision",
            group: Fundamental,
            kind: EncodingKind::Compound(CompoundLayout {
                parts: vec![
                    part(
                        "eps",
                        "EPS Revision",
                        EncodingKind::PresetEnum(TokenSet {
                            tokens: EPS_REVISION,
                            multi_select: false,
                        }),
                        false,
                    ),
                    part(
                        "revenue",
                        "Revenue Revision",
                        EncodingKind::PresetEnum(TokenSet {
                            tokens: REVENUE_REVISION,
                            multi_select: false,
                        }),
                        false,
                    ),
                ],
                separator: "x",
                elide_absent: true,
            }),
        },
        numeric("fa_roa", "Return on Assets", Fundamental, returns()),
        numeric("fa_roe", "Return on Equity", Fundamental, returns()),
        numeric("fa_roi", "Return on Investment", Fundamental, returns()),
        numeric(
            "fa_curratio",
            "Current Ratio",
            Fundamental,
            rules(Unit::Ratio, 2, false, PreferPreset, LIQUIDITY),
        ),
        numeric(
            "fa_quickratio",
            "Quick Ratio",
            Fundamental,
            rules(Unit::Ratio, 2, false, PreferPreset, LIQUIDITY),
        ),
        numeric(
            "fa_ltdebteq",
            "LT Debt/Equity",
            Fundamental,
            rules(Unit::Ratio, 2, false, PreferPreset, LEVERAGE),
        ),
        numeric(
            "fa_debteq",
            "Debt/Equity",
            Fundamental,
            rules(Unit::Ratio, 2, false, PreferPreset, LEVERAGE),
        ),
        numeric("fa_grossmargin", "Gross Margin", Fundamental, margin()),
        numeric("fa_opermargin", "Operating Margin", Fundamental, margin()),
        numeric("fa_netmargin", "Net Profit Margin", Fundamental, margin()),
        numeric(
            "fa_payoutratio",
            "Payout Ratio",
            Fundamental,
            rules(Unit::Percent, 2, false, PreferPreset, PAYOUT),
        ),
        numeric("sh_insiderown", "Insider Ownership", Fundamental, ownership()),
        numeric("sh_insidertrans", "Insider Transactions", Fundamental, transactions()),
        numeric("sh_instown", "Institutional Ownership", Fundamental, ownership()),
        numeric("sh_insttrans", "Institutional Transactions", Fundamental, transactions()),
        // Technical
        FieldDescriptor {
            id: "ta_perf",
            label: "Performance",
            group: Technical,
            kind: EncodingKind::Compound(CompoundLayout {
                parts: vec![
                    part(
                        "change",
                        "Change (%)",
                        EncodingKind::NumericRange(rules(Unit::Percent, 2, true, Custom, &[])),
                        true,
                    ),
                    part(
                        "period",
                        "Period",
                        EncodingKind::FlagEnum(TokenSet {
                            tokens: PERF_PERIODS,
                            multi_select: false,
                        }),
                        true,
                    ),
                ],
                separator: "-",
                elide_absent: false,
            }),
        },
        preset_enum("ta_perf2", "Performance 2", Technical, PERF_PRESETS, false),
        FieldDescriptor {
            id: "ta_volatility",
            label: "Volatility",
            group: Technical,
            kind: EncodingKind::Compound(CompoundLayout {
                parts: vec![
                    part(
                        "week",
                        "Week (%)",
                        EncodingKind::NumericRange(rules(Unit::Percent, 2, false, Custom, &[])),
                        false,
                    ),
                    part(
                        "month",
                        "Month (%)",
                        EncodingKind::NumericRange(rules(Unit::Percent, 2, false, Custom, &[])),
                        false,
                    ),
                ],
                separator: "x",
                elide_absent: false,
            }),
        },
        numeric(
            "ta_rsi",
            "RSI (14)",
            Technical,
            rules(Unit::Plain, 2, false, Custom, RSI),
        ),
        numeric("ta_gap", "Gap", Technical, daily_move()),
        numeric("ta_change", "Change", Technical, daily_move()),
        numeric("ta_changeopen", "Change from Open", Technical, daily_move()),
        numeric("ah_change", "After-Hours Change", Technical, daily_move()),
        flag_enum("ta_sma20", "20-Day Simple Moving Average", Technical, SMA20),
        flag_enum("ta_sma50", "50-Day Simple Moving Average", Technical, SMA50),
        flag_enum("ta_sma200", "200-Day Simple Moving Average", Technical, SMA200),
        flag_enum("ta_highlow20d", "20-Day High/Low", Technical, HIGH_LOW_SHORT),
        flag_enum("ta_highlow50d", "50-Day High/Low", Technical, HIGH_LOW_SHORT),
        flag_enum("ta_highlow52w", "52-Week High/Low", Technical, HIGH_LOW_LONG),
        flag_enum("ta_alltime", "All-Time High/Low", Technical, HIGH_LOW_LONG),
        flag_enum("ta_pattern", "Pattern", Technical, PATTERNS),
        flag_enum("ta_candlestick", "Candlestick", Technical, CANDLESTICKS),
        numeric(
            "ta_beta",
            "Beta",
            Technical,
            rules(Unit::Ratio, 2, true, PreferPreset, BETA),
        ),
        numeric(
            "ta_averagetruerange",
            "Average True Range",
            Technical,
            rules(Unit::Dollars, 2, false, PreferPreset, ATR),
        ),
    ]
}
