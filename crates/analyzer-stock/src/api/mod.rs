//! Collaborator contracts and the network clients that fulfil them
//!
//! The research core only talks to market data, news and symbol search
//! through the traits in this module. Concrete clients:
//! - [`YahooFinanceClient`]: price history, instrument metadata, symbol search
//! - [`NewsApiClient`]: recent articles from newsapi.org

pub mod news_api;
pub mod yahoo;

pub use news_api::NewsApiClient;
pub use yahoo::YahooFinanceClient;

use crate::error::{Result, ResearchError};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One daily bar as consumed by the research core
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
}

/// Look-back window for a price history request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryPeriod {
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "5y")]
    FiveYears,
}

impl HistoryPeriod {
    /// Periods a chart may be requested for
    pub const CHART_PERIODS: [HistoryPeriod; 5] = [
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
        Self::FiveYears,
    ];

    /// Range string as used by Yahoo Finance
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FiveDays => "5d",
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::FiveYears => "5y",
        }
    }

    /// Calendar days covered by the period
    ///
    /// `5d` means five trading days, so it spans a full week to survive a
    /// weekend plus a market holiday.
    pub fn days(&self) -> i64 {
        match self {
            Self::FiveDays => 7,
            Self::OneMonth => 30,
            Self::ThreeMonths => 90,
            Self::SixMonths => 180,
            Self::OneYear => 365,
            Self::FiveYears => 1825,
        }
    }

    /// Parse a period for the chart operation, rejecting anything outside
    /// [`Self::CHART_PERIODS`]
    pub fn parse_chart(value: &str) -> Result<Self> {
        value
            .parse::<Self>()
            .ok()
            .filter(|p| Self::CHART_PERIODS.contains(p))
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::CHART_PERIODS.iter().map(Self::as_str).collect();
                ResearchError::Validation(format!(
                    "Invalid period '{value}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

impl fmt::Display for HistoryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryPeriod {
    type Err = ResearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "5d" => Ok(Self::FiveDays),
            "1mo" => Ok(Self::OneMonth),
            "3mo" => Ok(Self::ThreeMonths),
            "6mo" => Ok(Self::SixMonths),
            "1y" => Ok(Self::OneYear),
            "5y" => Ok(Self::FiveYears),
            other => Err(ResearchError::Validation(format!("Unknown period '{other}'"))),
        }
    }
}

/// Instrument metadata; providers fill in what they know
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketInfo {
    pub currency: Option<String>,
    pub exchange: Option<String>,
    pub long_name: Option<String>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub volume: Option<u64>,
}

/// A ranked hit from a symbol search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolCandidate {
    pub symbol: String,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    pub exchange: Option<String>,
}

impl SymbolCandidate {
    /// Long name, else short name
    pub fn display_name(&self) -> Option<&str> {
        fn usable(name: &Option<String>) -> Option<&str> {
            name.as_deref().filter(|n| !n.trim().is_empty())
        }
        usable(&self.long_name).or_else(|| usable(&self.short_name))
    }
}

/// Source of daily price history and instrument metadata
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceHistoryFetcher: Send + Sync {
    /// Daily bars, oldest first; an unknown symbol may yield an empty vector
    async fn fetch(&self, symbol: &str, period: HistoryPeriod) -> Result<Vec<PricePoint>>;

    /// Currency, exchange and other metadata for `symbol`
    async fn market_info(&self, symbol: &str) -> Result<MarketInfo>;
}

/// Source of recent article texts, most recent first
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsCollector: Send + Sync {
    /// Returns an empty vector, not an error, when nothing is available
    async fn fetch(&self, query: &str) -> Result<Vec<String>>;
}

/// Free-text instrument search
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SymbolSearch: Send + Sync {
    /// Candidates in relevance order
    async fn search(&self, query: &str) -> Result<Vec<SymbolCandidate>>;
}
