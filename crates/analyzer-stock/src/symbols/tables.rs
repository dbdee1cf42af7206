//! Static lookup tables for symbol resolution
//!
//! Both tables are built once on first use and never mutated afterwards.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Exchange code to Yahoo Finance symbol suffix
///
/// US venues need no suffix and carry an empty string.
pub const EXCHANGE_SUFFIXES: &[(&str, &str)] = &[
    // India
    ("NSE", ".NS"),
    ("BSE", ".BO"),
    // UK
    ("LSE", ".L"),
    // Europe
    ("XETRA", ".DE"),
    ("EURONEXT", ".PA"),
    ("AEX", ".AS"),
    ("SIX", ".SW"),
    ("BME", ".MC"),
    ("BIT", ".MI"),
    // Asia Pacific
    ("TSE", ".T"),
    ("HKEX", ".HK"),
    ("SSE", ".SS"),
    ("SZSE", ".SZ"),
    ("KRX", ".KS"),
    ("ASX", ".AX"),
    ("SGX", ".SI"),
    ("TWO", ".TWO"),
    ("TWSE", ".TW"),
    // Americas
    ("TSX", ".TO"),
    ("BMV", ".MX"),
    ("BOVESPA", ".SA"),
    // Middle East
    ("TASE", ".TA"),
    ("TADAWUL", ".SAU"),
    // US
    ("NYSE", ""),
    ("NASDAQ", ""),
];

/// Lower-case company name to canonical symbol
const COMPANY_ENTRIES: &[(&str, &str)] = &[
    // US
    ("apple", "AAPL"),
    ("microsoft", "MSFT"),
    ("google", "GOOGL"),
    ("alphabet", "GOOGL"),
    ("amazon", "AMZN"),
    ("meta", "META"),
    ("facebook", "META"),
    ("tesla", "TSLA"),
    ("nvidia", "NVDA"),
    ("netflix", "NFLX"),
    ("intel", "INTC"),
    ("amd", "AMD"),
    ("ibm", "IBM"),
    ("oracle", "ORCL"),
    ("adobe", "ADBE"),
    ("salesforce", "CRM"),
    ("walmart", "WMT"),
    ("jpmorgan", "JPM"),
    ("visa", "V"),
    ("coca cola", "KO"),
    ("berkshire hathaway", "BRK-B"),
    // India (NSE)
    ("tcs", "TCS.NS"),
    ("infosys", "INFY.NS"),
    ("wipro", "WIPRO.NS"),
    ("hcl", "HCLTECH.NS"),
    ("tech mahindra", "TECHM.NS"),
    ("mahindra", "M&M.NS"),
    ("reliance", "RELIANCE.NS"),
    ("hdfc bank", "HDFCBANK.NS"),
    ("hdfc", "HDFCBANK.NS"),
    ("icici bank", "ICICIBANK.NS"),
    ("icici", "ICICIBANK.NS"),
    ("bharti", "BHARTIARTL.NS"),
    ("airtel", "BHARTIARTL.NS"),
    ("itc", "ITC.NS"),
    ("sbi", "SBIN.NS"),
    ("tata motors", "TATAMOTORS.NS"),
    ("tata steel", "TATASTEEL.NS"),
    ("adani", "ADANIENT.NS"),
    ("bajaj", "BAJFINANCE.NS"),
    ("axis bank", "AXISBANK.NS"),
    ("maruti", "MARUTI.NS"),
    ("asian paints", "ASIANPAINT.NS"),
    ("larsen", "LT.NS"),
    ("kotak", "KOTAKBANK.NS"),
    ("sun pharma", "SUNPHARMA.NS"),
    // UK
    ("bp", "BP.L"),
    ("shell", "SHEL.L"),
    ("hsbc", "HSBA.L"),
    ("unilever", "ULVR.L"),
    ("astrazeneca", "AZN.L"),
    ("glaxosmithkline", "GSK.L"),
    ("gsk", "GSK.L"),
    ("vodafone", "VOD.L"),
    ("rolls royce", "RR.L"),
    ("barclays", "BARC.L"),
    ("tesco", "TSCO.L"),
    // Europe
    ("volkswagen", "VOW.DE"),
    ("bmw", "BMW.DE"),
    ("mercedes", "MBG.DE"),
    ("siemens", "SIE.DE"),
    ("sap", "SAP.DE"),
    ("adidas", "ADS.DE"),
    ("lvmh", "MC.PA"),
    ("total", "TTE.PA"),
    ("air liquide", "AI.PA"),
    ("airbus", "AIR.PA"),
    ("asml", "ASML.AS"),
    ("nestle", "NESN.SW"),
    ("novartis", "NOVN.SW"),
    ("roche", "ROG.SW"),
    // Japan
    ("toyota", "7203.T"),
    ("sony", "6758.T"),
    ("nintendo", "7974.T"),
    ("softbank", "9984.T"),
    ("honda", "7267.T"),
    ("mitsubishi", "8058.T"),
    // China and Hong Kong
    ("alibaba", "BABA"),
    ("tencent", "0700.HK"),
    ("baidu", "BIDU"),
    ("ping an", "2318.HK"),
    ("icbc", "1398.HK"),
    // Other
    ("samsung", "005930.KS"),
    ("shopify", "SHOP.TO"),
    ("petrobras", "PETR4.SA"),
    ("bhp", "BHP.AX"),
    ("dbs", "D05.SI"),
    ("tsmc", "2330.TW"),
];

static COMPANY_SYMBOLS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| COMPANY_ENTRIES.iter().copied().collect());

/// Canonical symbol for a company name, matched case-insensitively
pub fn company_symbol(name: &str) -> Option<&'static str> {
    COMPANY_SYMBOLS.get(name.trim().to_lowercase().as_str()).copied()
}

/// Every `(company, symbol)` pair in the table
pub fn company_symbols() -> impl Iterator<Item = (&'static str, &'static str)> {
    COMPANY_ENTRIES.iter().copied()
}

/// Exchange whose suffix `symbol` already carries, ignoring case
pub fn known_suffix(symbol: &str) -> Option<(&'static str, &'static str)> {
    let upper = symbol.to_uppercase();
    EXCHANGE_SUFFIXES
        .iter()
        .copied()
        .find(|(_, suffix)| !suffix.is_empty() && upper.ends_with(suffix))
}
