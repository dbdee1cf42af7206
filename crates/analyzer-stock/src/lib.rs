//! Stock symbol resolution and research decisions
//!
//! This crate turns a free-text company name or ticker into a BUY/SELL/HOLD
//! recommendation by combining recent news sentiment with medium-term price
//! performance, plus a human-readable rationale. It includes:
//!
//! - Symbol resolution through an ordered fallback chain (company table,
//!   exchange suffix, ticker pattern, external search, regional probe)
//! - Yahoo Finance price history, metadata and symbol search
//! - NewsAPI article collection with client-side rate limiting
//! - Lexicon-based sentiment scoring and aggregation
//! - Pluggable decision rules (weighted, hard-threshold)
//! - Template or LLM-generated explanations
//!
//! # Architecture
//!
//! [`ResearchPipeline`] wires the pieces together:
//! raw input → [`SymbolResolver`] → (price history ∥ news) →
//! [`SentimentAggregator`] → [`DecisionEngine`] → [`Explainer`] →
//! [`ResearchResult`]. [`MarketService`] adds the boundary operations
//! (compare, trending, metrics, chart, news digest, search).
//!
//! # Example
//!
//! ```rust,no_run
//! use analyzer_stock::{MarketService, ResearchConfig, ResearchPipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ResearchConfig::from_env()?;
//!     let service = MarketService::new(ResearchPipeline::from_config(&config)?);
//!
//!     let result = service.analyze("infosys").await?;
//!     println!("{} -> {}", result.symbol(), result.decision());
//!     println!("{}", result.explanation());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod explanation;
pub mod sentiment;
pub mod symbols;

// Re-export main types for convenience
pub use api::{
    HistoryPeriod, MarketInfo, NewsApiClient, NewsCollector, PriceHistoryFetcher, PricePoint,
    SymbolCandidate, SymbolSearch, YahooFinanceClient,
};
pub use config::{ResearchConfig, ResearchConfigBuilder};
pub use decision::{
    Decision, DecisionEngine, DecisionRule, DecisionRuleKind, HardThresholdRule, WeightedRule,
};
pub use engine::{
    ComparisonReport, MarketService, NewsDigest, PricePerformance, ResearchPipeline,
    ResearchResult, SearchOutcome, StockMetrics, TrendingReport,
};
pub use error::{Result, ResearchError};
pub use explanation::{
    ExplanationContext, ExplanationKind, Explainer, GenerativeExplainer, TemplateExplainer,
};
pub use sentiment::{LexiconScorer, SentimentAggregator, SentimentScorer};
pub use symbols::{ResolutionStrategy, ResolvedSymbol, SymbolResolver};
