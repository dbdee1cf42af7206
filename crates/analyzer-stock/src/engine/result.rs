//! Research result types

use crate::api::{MarketInfo, PricePoint};
use crate::decision::Decision;
use crate::error::{Result, ResearchError};
use crate::symbols::{ResolutionStrategy, ResolvedSymbol};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Headlines kept on a result for display
pub const DISPLAY_HEADLINES: usize = 5;

const DEFAULT_CURRENCY: &str = "USD";
const DEFAULT_EXCHANGE: &str = "Unknown";

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Price change over a history window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePerformance {
    pub current_price: f64,
    pub change_pct: f64,
    pub currency: String,
    pub exchange: String,
}

impl PricePerformance {
    /// `(last - first) / first * 100` over `points`, oldest first
    ///
    /// Needs at least two points. Missing metadata falls back to USD and an
    /// unknown exchange.
    pub fn from_history(symbol: &str, points: &[PricePoint], info: &MarketInfo) -> Result<Self> {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Err(insufficient(symbol, points.len()));
        };
        if points.len() < 2 {
            return Err(insufficient(symbol, points.len()));
        }

        let change_pct = (last.close - first.close) / first.close * 100.0;
        if !change_pct.is_finite() {
            return Err(ResearchError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: format!("invalid starting price {}", first.close),
            });
        }

        Ok(Self {
            current_price: round2(last.close),
            change_pct: round2(change_pct),
            currency: info
                .currency
                .clone()
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            exchange: info
                .exchange
                .clone()
                .unwrap_or_else(|| DEFAULT_EXCHANGE.to_string()),
        })
    }
}

fn insufficient(symbol: &str, points: usize) -> ResearchError {
    ResearchError::InsufficientData {
        symbol: symbol.to_string(),
        points,
    }
}

/// Outcome of one pipeline run
///
/// Built once and never mutated; fields are read through accessors.
#[derive(Debug, Clone, Serialize)]
pub struct ResearchResult {
    symbol: String,
    company_name: String,
    decision: Decision,
    sentiment_score: f64,
    price_change_6m: f64,
    current_price: f64,
    currency: String,
    exchange: String,
    explanation: String,
    headlines: Vec<String>,
    strategy_used: ResolutionStrategy,
    analyzed_at: DateTime<Utc>,
}

impl ResearchResult {
    pub fn new(
        resolved: ResolvedSymbol,
        performance: PricePerformance,
        sentiment: f64,
        decision: Decision,
        explanation: String,
        mut headlines: Vec<String>,
    ) -> Self {
        headlines.truncate(DISPLAY_HEADLINES);

        Self {
            symbol: resolved.canonical_symbol,
            company_name: resolved.company_name,
            decision,
            sentiment_score: round2(sentiment),
            price_change_6m: performance.change_pct,
            current_price: performance.current_price,
            currency: performance.currency,
            exchange: performance.exchange,
            explanation,
            headlines,
            strategy_used: resolved.strategy,
            analyzed_at: Utc::now(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn sentiment_score(&self) -> f64 {
        self.sentiment_score
    }

    /// Percent change over the configured history window
    pub fn price_change(&self) -> f64 {
        self.price_change_6m
    }

    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn headlines(&self) -> &[String] {
        &self.headlines
    }

    pub fn strategy_used(&self) -> ResolutionStrategy {
        self.strategy_used
    }

    pub fn analyzed_at(&self) -> DateTime<Utc> {
        self.analyzed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn points(closes: &[f64]) -> Vec<PricePoint> {
        closes
            .iter()
            .enumerate()
            .map(|(i, close)| PricePoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64),
                open: *close,
                close: *close,
            })
            .collect()
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(round2(-3.211), -3.21);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_performance_from_history() {
        let info = MarketInfo {
            currency: Some("INR".to_string()),
            exchange: Some("NSI".to_string()),
            ..Default::default()
        };
        let perf = PricePerformance::from_history("TCS.NS", &points(&[100.0, 90.0, 112.5]), &info)
            .unwrap();

        assert_eq!(perf.change_pct, 12.5);
        assert_eq!(perf.current_price, 112.5);
        assert_eq!(perf.currency, "INR");
        assert_eq!(perf.exchange, "NSI");
    }

    #[test]
    fn test_performance_defaults_metadata() {
        let perf =
            PricePerformance::from_history("AAPL", &points(&[200.0, 150.0]), &MarketInfo::default())
                .unwrap();
        assert_eq!(perf.change_pct, -25.0);
        assert_eq!(perf.currency, "USD");
        assert_eq!(perf.exchange, "Unknown");
    }

    #[test]
    fn test_performance_needs_two_points() {
        for closes in [&[][..], &[101.0][..]] {
            let err = PricePerformance::from_history("AAPL", &points(closes), &MarketInfo::default())
                .unwrap_err();
            assert!(matches!(err, ResearchError::InsufficientData { .. }));
        }
    }

    #[test]
    fn test_result_caps_headlines_and_rounds() {
        let resolved = ResolvedSymbol {
            raw_input: "apple".to_string(),
            canonical_symbol: "AAPL".to_string(),
            company_name: "apple".to_string(),
            strategy: ResolutionStrategy::CompanyTable,
        };
        let performance = PricePerformance {
            current_price: 190.12,
            change_pct: 8.4,
            currency: "USD".to_string(),
            exchange: "NMS".to_string(),
        };
        let headlines = (0..8).map(|i| format!("headline {i}")).collect();

        let result = ResearchResult::new(
            resolved,
            performance,
            0.123_456,
            Decision::Buy,
            "because".to_string(),
            headlines,
        );

        assert_eq!(result.symbol(), "AAPL");
        assert_eq!(result.sentiment_score(), 0.12);
        assert_eq!(result.headlines().len(), DISPLAY_HEADLINES);
        assert_eq!(result.headlines()[0], "headline 0");
        assert_eq!(result.strategy_used(), ResolutionStrategy::CompanyTable);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["decision"], "BUY");
        assert_eq!(json["price_change_6m"], 8.4);
        assert_eq!(json["strategy_used"], "company_table");
    }
}
