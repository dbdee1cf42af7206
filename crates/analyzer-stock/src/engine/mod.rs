//! Research engine
//!
//! [`ResearchPipeline`] runs one research pass; [`MarketService`] exposes the
//! boundary operations built on top of it.

pub mod market;
pub mod pipeline;
pub mod result;

pub use market::{
    BestPerformer, ChartPoint, ChartSeries, ComparisonReport, MarketService, NewsDigest,
    NewsHeadline, SearchOutcome, SentimentLabel, StockMetrics, TrendingReport, TrendingStock,
};
pub use pipeline::{ResearchPipeline, ResearchPipelineBuilder};
pub use result::{PricePerformance, ResearchResult, round2};
