//! Ordered fallback chain from raw input to a canonical symbol

use super::tables;
use crate::api::{HistoryPeriod, PriceHistoryFetcher, SymbolSearch};
use crate::error::{Result, ResearchError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, instrument, warn};

static TICKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{1,6}$").expect("ticker pattern is valid"));

/// Which step of the chain produced the symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    CompanyTable,
    ExchangeSuffix,
    TickerPattern,
    ExternalSearch,
    RegionalProbe,
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CompanyTable => "company table",
            Self::ExchangeSuffix => "exchange suffix",
            Self::TickerPattern => "ticker pattern",
            Self::ExternalSearch => "external search",
            Self::RegionalProbe => "regional probe",
        };
        f.write_str(name)
    }
}

/// Outcome of a successful resolution
///
/// `canonical_symbol` is upper case and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSymbol {
    pub raw_input: String,
    pub canonical_symbol: String,
    pub company_name: String,
    pub strategy: ResolutionStrategy,
}

/// Maps raw text to a canonical symbol
///
/// Steps run in order and stop at the first hit:
/// 1. company name table
/// 2. known exchange suffix
/// 3. bare ticker pattern (1 to 6 alphanumerics)
/// 4. external symbol search
/// 5. regional suffix probed with a short history fetch
///
/// Step 3 accepts anything ticker-shaped; a wrong guess surfaces later when
/// price history comes back empty.
#[derive(Clone)]
pub struct SymbolResolver {
    search: Arc<dyn SymbolSearch>,
    prober: Arc<dyn PriceHistoryFetcher>,
    probe_suffix: String,
}

impl SymbolResolver {
    pub fn new(
        search: Arc<dyn SymbolSearch>,
        prober: Arc<dyn PriceHistoryFetcher>,
        probe_suffix: impl Into<String>,
    ) -> Self {
        Self {
            search,
            prober,
            probe_suffix: probe_suffix.into().to_uppercase(),
        }
    }

    #[instrument(skip(self))]
    pub async fn resolve(&self, raw: &str, company: Option<&str>) -> Result<ResolvedSymbol> {
        let input = raw.trim();
        if input.is_empty() {
            return Err(ResearchError::NotFound(raw.to_string()));
        }

        let company = company.map(str::trim).filter(|c| !c.is_empty());
        let resolved = |symbol: String, name: &str, strategy: ResolutionStrategy| {
            info!("Resolved '{}' to {} via {}", input, symbol, strategy);
            ResolvedSymbol {
                raw_input: raw.to_string(),
                canonical_symbol: symbol,
                company_name: company.unwrap_or(name).to_string(),
                strategy,
            }
        };

        if let Some(symbol) = tables::company_symbol(input) {
            return Ok(resolved(symbol.to_string(), input, ResolutionStrategy::CompanyTable));
        }

        let upper = input.to_uppercase();

        if let Some((exchange, _)) = tables::known_suffix(&upper) {
            debug!("'{}' carries the {} suffix", upper, exchange);
            return Ok(resolved(upper, input, ResolutionStrategy::ExchangeSuffix));
        }

        if TICKER_PATTERN.is_match(&upper) {
            return Ok(resolved(upper, input, ResolutionStrategy::TickerPattern));
        }

        match self.search.search(input).await {
            Ok(candidates) => {
                // Blank symbols count as no hit
                if let Some(first) = candidates.iter().find(|c| !c.symbol.trim().is_empty()) {
                    let symbol = first.symbol.trim().to_uppercase();
                    let name = first.display_name().unwrap_or(input);
                    return Ok(resolved(symbol, name, ResolutionStrategy::ExternalSearch));
                }
                debug!("Symbol search found nothing for '{}'", input);
            }
            Err(e) => warn!("Symbol search failed for '{}': {}", input, e),
        }

        let probe = format!("{}{}", upper.replace(' ', ""), self.probe_suffix);
        match self.prober.fetch(&probe, HistoryPeriod::FiveDays).await {
            Ok(points) if !points.is_empty() => {
                return Ok(resolved(probe, input, ResolutionStrategy::RegionalProbe));
            }
            Ok(_) => debug!("Probe {} returned no data", probe),
            Err(e) => warn!("Probe {} failed: {}", probe, e),
        }

        warn!("Could not resolve '{}'", input);
        Err(ResearchError::NotFound(input.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockPriceHistoryFetcher, MockSymbolSearch, PricePoint, SymbolCandidate};
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    fn resolver(search: MockSymbolSearch, prober: MockPriceHistoryFetcher) -> SymbolResolver {
        SymbolResolver::new(Arc::new(search), Arc::new(prober), ".NS")
    }

    fn offline() -> SymbolResolver {
        let mut search = MockSymbolSearch::new();
        search.expect_search().never();
        let mut prober = MockPriceHistoryFetcher::new();
        prober.expect_fetch().never();
        resolver(search, prober)
    }

    fn bar() -> PricePoint {
        PricePoint {
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            open: 100.0,
            close: 101.0,
        }
    }

    #[tokio::test]
    async fn test_every_table_entry_resolves_regardless_of_case() {
        let resolver = offline();

        for (name, symbol) in tables::company_symbols() {
            for input in [name.to_string(), name.to_uppercase(), capitalize(name)] {
                let resolved = resolver.resolve(&input, None).await.unwrap();
                assert_eq!(resolved.canonical_symbol, symbol, "{input}");
                assert_eq!(resolved.strategy, ResolutionStrategy::CompanyTable);
            }
        }
    }

    fn capitalize(s: &str) -> String {
        let mut chars = s.chars();
        chars
            .next()
            .map(|c| c.to_uppercase().chain(chars).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_suffix_match_skips_search() {
        let resolved = offline().resolve("BP.L", None).await.unwrap();
        assert_eq!(resolved.canonical_symbol, "BP.L");
        assert_eq!(resolved.strategy, ResolutionStrategy::ExchangeSuffix);

        let resolved = offline().resolve("hdfcbank.ns", None).await.unwrap();
        assert_eq!(resolved.canonical_symbol, "HDFCBANK.NS");
    }

    #[tokio::test]
    async fn test_ticker_pattern() {
        let resolved = offline().resolve("crwd", Some("CrowdStrike")).await.unwrap();
        assert_eq!(resolved.canonical_symbol, "CRWD");
        assert_eq!(resolved.company_name, "CrowdStrike");
        assert_eq!(resolved.strategy, ResolutionStrategy::TickerPattern);
    }

    #[tokio::test]
    async fn test_search_fallback() {
        let mut search = MockSymbolSearch::new();
        search
            .expect_search()
            .with(eq("Palantir Technologies"))
            .times(1)
            .returning(|_| {
                Ok(vec![SymbolCandidate {
                    symbol: "pltr".to_string(),
                    long_name: Some("Palantir Technologies Inc.".to_string()),
                    short_name: None,
                    exchange: Some("NMS".to_string()),
                }])
            });
        let mut prober = MockPriceHistoryFetcher::new();
        prober.expect_fetch().never();

        let resolved = resolver(search, prober)
            .resolve("Palantir Technologies", None)
            .await
            .unwrap();
        assert_eq!(resolved.canonical_symbol, "PLTR");
        assert_eq!(resolved.company_name, "Palantir Technologies Inc.");
        assert_eq!(resolved.strategy, ResolutionStrategy::ExternalSearch);
    }

    #[tokio::test]
    async fn test_blank_search_symbol_is_skipped() {
        let mut search = MockSymbolSearch::new();
        search.expect_search().times(1).returning(|_| {
            Ok(vec![
                SymbolCandidate {
                    symbol: "  ".to_string(),
                    long_name: Some("Ghost Listing".to_string()),
                    short_name: None,
                    exchange: None,
                },
                SymbolCandidate {
                    symbol: "slcn".to_string(),
                    long_name: None,
                    short_name: Some("Some Long Co".to_string()),
                    exchange: Some("NMS".to_string()),
                },
            ])
        });
        let mut prober = MockPriceHistoryFetcher::new();
        prober.expect_fetch().never();

        let resolved = resolver(search, prober)
            .resolve("Some Long Company Name", None)
            .await
            .unwrap();
        assert_eq!(resolved.canonical_symbol, "SLCN");
        assert_eq!(resolved.company_name, "Some Long Co");
        assert_eq!(resolved.strategy, ResolutionStrategy::ExternalSearch);
    }

    #[tokio::test]
    async fn test_only_blank_search_symbols_fall_through() {
        let mut search = MockSymbolSearch::new();
        search.expect_search().times(1).returning(|_| {
            Ok(vec![SymbolCandidate {
                symbol: "  ".to_string(),
                long_name: None,
                short_name: None,
                exchange: None,
            }])
        });
        let mut prober = MockPriceHistoryFetcher::new();
        prober
            .expect_fetch()
            .with(eq("SOMELONGCOMPANYNAME.NS"), eq(HistoryPeriod::FiveDays))
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let err = resolver(search, prober)
            .resolve("Some Long Company Name", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ResearchError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_regional_probe_after_failed_search() {
        let mut search = MockSymbolSearch::new();
        search
            .expect_search()
            .returning(|_| Err(ResearchError::provider("Yahoo Finance", "timed out")));
        let mut prober = MockPriceHistoryFetcher::new();
        prober
            .expect_fetch()
            .with(eq("BHARATFORG.NS"), eq(HistoryPeriod::FiveDays))
            .times(1)
            .returning(|_, _| Ok(vec![bar()]));

        let resolved = resolver(search, prober)
            .resolve("bharatforg", None)
            .await
            .unwrap();
        assert_eq!(resolved.canonical_symbol, "BHARATFORG.NS");
        assert_eq!(resolved.strategy, ResolutionStrategy::RegionalProbe);
    }

    #[tokio::test]
    async fn test_unresolvable_input() {
        let mut search = MockSymbolSearch::new();
        search.expect_search().times(1).returning(|_| Ok(Vec::new()));
        let mut prober = MockPriceHistoryFetcher::new();
        prober.expect_fetch().times(1).returning(|_, _| Ok(Vec::new()));

        let err = resolver(search, prober)
            .resolve("ZZZZZZZ123", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ResearchError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_input_is_not_found() {
        let err = offline().resolve("   ", None).await.unwrap_err();
        assert!(matches!(err, ResearchError::NotFound(_)));
    }
}
