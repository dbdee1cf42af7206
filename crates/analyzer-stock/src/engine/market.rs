//! Upward operations: analyze, compare, trending, metrics, chart, news, search

use super::pipeline::ResearchPipeline;
use super::result::{ResearchResult, round2};
use crate::api::{HistoryPeriod, MarketInfo};
use crate::decision::Decision;
use crate::error::{Result, ResearchError};
use serde::Serialize;
use tracing::{info, instrument, warn};

pub const MIN_COMPARE: usize = 2;
pub const MAX_COMPARE: usize = 4;
pub const TRENDING_THRESHOLD_PCT: f64 = 8.0;
pub const TRENDING_LIMIT: usize = 6;

const DIGEST_HEADLINES: usize = 5;
const HEADLINE_CHARS: usize = 200;
const NO_NEWS: &str = "No recent news available";
const NOT_FOUND_HINT: &str = "Stock not found. Try full company name or exact ticker symbol.";

/// Symbols scanned by [`MarketService::trending`]
pub const WATCHLIST: &[(&str, &str)] = &[
    ("AAPL", "Apple"),
    ("MSFT", "Microsoft"),
    ("GOOGL", "Google"),
    ("TCS.NS", "TCS"),
    ("INFY.NS", "Infosys"),
    ("RELIANCE.NS", "Reliance"),
    ("TSLA", "Tesla"),
];

#[derive(Debug, Clone, Serialize)]
pub struct BestPerformer {
    pub symbol: String,
    pub change: f64,
    pub decision: Decision,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub results: Vec<ResearchResult>,
    pub best_performer: BestPerformer,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendingStock {
    pub symbol: String,
    pub name: String,
    pub change: f64,
    pub current_price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendingReport {
    pub stocks: Vec<TrendingStock>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StockMetrics {
    pub symbol: String,
    pub current_price: f64,
    pub day_change: f64,
    pub day_change_pct: f64,
    pub open_price: f64,
    pub high_52w: Option<f64>,
    pub low_52w: Option<f64>,
    pub volume: Option<u64>,
    pub currency: String,
    pub exchange: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    /// `YYYY-MM-DD`
    pub date: String,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub symbol: String,
    pub period: HistoryPeriod,
    pub points: Vec<ChartPoint>,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            Self::Positive
        } else if score < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsHeadline {
    pub headline: String,
    pub sentiment: SentimentLabel,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsDigest {
    pub company: String,
    pub headlines: Vec<NewsHeadline>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_sentiment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Boundary operations over a [`ResearchPipeline`]
///
/// Multi-symbol operations run one symbol at a time; a failing symbol is
/// logged and skipped.
#[derive(Clone)]
pub struct MarketService {
    pipeline: ResearchPipeline,
}

impl MarketService {
    pub fn new(pipeline: ResearchPipeline) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &ResearchPipeline {
        &self.pipeline
    }

    pub async fn analyze(&self, name: &str) -> Result<ResearchResult> {
        self.pipeline.orchestrate(name, None).await
    }

    /// Research 2 to 4 inputs and pick the best price performer
    #[instrument(skip(self))]
    pub async fn compare(&self, names: &[String]) -> Result<ComparisonReport> {
        if names.len() < MIN_COMPARE {
            return Err(ResearchError::Validation(format!(
                "Please provide at least {MIN_COMPARE} stocks to compare"
            )));
        }
        if names.len() > MAX_COMPARE {
            return Err(ResearchError::Validation(format!(
                "Maximum {MAX_COMPARE} stocks can be compared at once"
            )));
        }

        let mut results = Vec::with_capacity(names.len());
        for name in names {
            match self.pipeline.orchestrate(name, None).await {
                Ok(result) => results.push(result),
                Err(e) => warn!("Skipping '{}' in comparison: {}", name, e),
            }
        }

        // First maximum wins ties
        let best = results
            .iter()
            .reduce(|best, r| if r.price_change() > best.price_change() { r } else { best })
            .map(|r| BestPerformer {
                symbol: r.symbol().to_string(),
                change: r.price_change(),
                decision: r.decision(),
            })
            .ok_or_else(|| ResearchError::NotFound(names.join(", ")))?;

        info!("Best performer: {} ({:+.2}%)", best.symbol, best.change);
        Ok(ComparisonReport {
            results,
            best_performer: best,
        })
    }

    /// Watchlist entries up more than 8% over the history window
    #[instrument(skip(self))]
    pub async fn trending(&self) -> Result<TrendingReport> {
        let period = self.pipeline.history_period();
        let mut stocks = Vec::new();

        for (symbol, name) in WATCHLIST {
            let points = match self.pipeline.prices().fetch(symbol, period).await {
                Ok(points) => points,
                Err(e) => {
                    warn!("Skipping {} in trending scan: {}", symbol, e);
                    continue;
                }
            };
            let (Some(first), Some(last)) = (points.first(), points.last()) else {
                continue;
            };
            if points.len() < 2 || first.close == 0.0 {
                continue;
            }

            let change = (last.close - first.close) / first.close * 100.0;
            if change > TRENDING_THRESHOLD_PCT {
                stocks.push(TrendingStock {
                    symbol: (*symbol).to_string(),
                    name: (*name).to_string(),
                    change: round2(change),
                    current_price: round2(last.close),
                });
            }
        }

        stocks.sort_by(|a, b| b.change.total_cmp(&a.change));
        stocks.truncate(TRENDING_LIMIT);

        Ok(TrendingReport {
            count: stocks.len(),
            stocks,
        })
    }

    /// Latest-bar metrics plus instrument metadata
    #[instrument(skip(self))]
    pub async fn metrics(&self, symbol: &str) -> Result<StockMetrics> {
        let symbol = canonical(symbol)?;
        let prices = self.pipeline.prices();

        let points = prices.fetch(&symbol, HistoryPeriod::FiveDays).await?;
        let last = points.last().ok_or_else(|| ResearchError::DataUnavailable {
            symbol: symbol.clone(),
            reason: "no recent price bar".to_string(),
        })?;

        let market = prices.market_info(&symbol).await.unwrap_or_else(|e| {
            warn!("Market info unavailable for {}: {}", symbol, e);
            MarketInfo::default()
        });

        let day_change = last.close - last.open;
        let day_change_pct = if last.open == 0.0 {
            0.0
        } else {
            day_change / last.open * 100.0
        };

        Ok(StockMetrics {
            current_price: round2(last.close),
            day_change: round2(day_change),
            day_change_pct: round2(day_change_pct),
            open_price: round2(last.open),
            high_52w: market.fifty_two_week_high,
            low_52w: market.fifty_two_week_low,
            volume: market.volume,
            currency: market.currency.unwrap_or_else(|| "USD".to_string()),
            exchange: market.exchange.unwrap_or_else(|| "Unknown".to_string()),
            symbol,
        })
    }

    /// Daily closes for one of the chart periods
    #[instrument(skip(self))]
    pub async fn chart(&self, symbol: &str, period: &str) -> Result<ChartSeries> {
        let period = HistoryPeriod::parse_chart(period)?;
        let symbol = canonical(symbol)?;

        let points = self.pipeline.prices().fetch(&symbol, period).await?;
        if points.is_empty() {
            return Err(ResearchError::DataUnavailable {
                symbol,
                reason: format!("no chart data for {period}"),
            });
        }

        let points: Vec<ChartPoint> = points
            .iter()
            .map(|p| ChartPoint {
                date: p.date.format("%Y-%m-%d").to_string(),
                price: round2(p.close),
            })
            .collect();

        Ok(ChartSeries {
            symbol,
            period,
            count: points.len(),
            points,
        })
    }

    /// Recent headlines with a per-article tone label
    #[instrument(skip(self))]
    pub async fn news(&self, company: &str) -> Result<NewsDigest> {
        let company = company.trim();
        if company.is_empty() {
            return Err(ResearchError::Validation("company name must not be empty".to_string()));
        }

        let articles = self.pipeline.news().fetch(company).await.unwrap_or_else(|e| {
            warn!("News unavailable for {}: {}", company, e);
            Vec::new()
        });
        if articles.is_empty() {
            return Ok(NewsDigest {
                company: company.to_string(),
                headlines: Vec::new(),
                count: 0,
                overall_sentiment: None,
                message: Some(NO_NEWS.to_string()),
            });
        }

        let sentiment = self.pipeline.sentiment();
        let overall = sentiment.aggregate(&articles);
        let headlines: Vec<NewsHeadline> = articles
            .iter()
            .take(DIGEST_HEADLINES)
            .map(|article| NewsHeadline {
                headline: truncate_headline(article),
                sentiment: SentimentLabel::from_score(sentiment.score(article)),
            })
            .collect();

        Ok(NewsDigest {
            company: company.to_string(),
            count: headlines.len(),
            headlines,
            overall_sentiment: Some(round2(overall)),
            message: None,
        })
    }

    /// Resolve without researching; not finding a symbol is not an error
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<SearchOutcome> {
        match self.pipeline.resolver().resolve(query, None).await {
            Ok(resolved) => Ok(SearchOutcome {
                query: query.to_string(),
                found: true,
                symbol: Some(resolved.canonical_symbol),
                company_name: Some(resolved.company_name),
                message: None,
            }),
            Err(ResearchError::NotFound(_)) => Ok(SearchOutcome {
                query: query.to_string(),
                found: false,
                symbol: None,
                company_name: None,
                message: Some(NOT_FOUND_HINT.to_string()),
            }),
            Err(e) => Err(e),
        }
    }
}

fn canonical(symbol: &str) -> Result<String> {
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(ResearchError::Validation("symbol must not be empty".to_string()));
    }
    Ok(symbol)
}

fn truncate_headline(article: &str) -> String {
    if article.chars().count() > HEADLINE_CHARS {
        let head: String = article.chars().take(HEADLINE_CHARS).collect();
        format!("{head}...")
    } else {
        article.to_string()
    }
}
