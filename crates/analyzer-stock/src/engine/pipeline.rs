//! Research pipeline: resolve, fetch, score, decide, explain

use super::result::{PricePerformance, ResearchResult};
use crate::api::{
    HistoryPeriod, MarketInfo, NewsApiClient, NewsCollector, PriceHistoryFetcher, PricePoint,
    SymbolSearch, YahooFinanceClient,
};
use crate::config::ResearchConfig;
use crate::decision::{DecisionEngine, DecisionRuleKind};
use crate::error::{Result, ResearchError};
use crate::explanation::{
    ExplanationContext, ExplanationKind, Explainer, GenerativeExplainer, TemplateExplainer,
};
use crate::sentiment::SentimentAggregator;
use crate::symbols::SymbolResolver;
use analyzer_llm::LLMProvider;
use analyzer_llm::providers::{OpenAIConfig, OpenAIProvider};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Turns raw input into a [`ResearchResult`]
///
/// News and price history are fetched jointly. A news failure degrades to an
/// empty corpus; missing price history aborts with `DataUnavailable`.
#[derive(Clone)]
pub struct ResearchPipeline {
    resolver: SymbolResolver,
    prices: Arc<dyn PriceHistoryFetcher>,
    news: Arc<dyn NewsCollector>,
    sentiment: SentimentAggregator,
    decisions: DecisionEngine,
    explainer: Arc<dyn Explainer>,
    history_period: HistoryPeriod,
}

impl ResearchPipeline {
    pub fn builder(
        prices: Arc<dyn PriceHistoryFetcher>,
        news: Arc<dyn NewsCollector>,
        search: Arc<dyn SymbolSearch>,
    ) -> ResearchPipelineBuilder {
        ResearchPipelineBuilder::new(prices, news, search)
    }

    /// Wire Yahoo Finance, NewsAPI and the configured strategies
    pub fn from_config(config: &ResearchConfig) -> Result<Self> {
        config.validate()?;

        let yahoo = Arc::new(YahooFinanceClient::new(config.request_timeout)?);
        let news = Arc::new(NewsApiClient::new(
            config.news_api_key.clone(),
            config.news_page_size,
            config.news_rate_limit,
            config.request_timeout,
        )?);

        let explainer: Arc<dyn Explainer> = match config.explanation {
            ExplanationKind::Template => Arc::new(TemplateExplainer),
            ExplanationKind::Generative => Arc::new(
                GenerativeExplainer::new(llm_provider(config)?)
                    .with_model(&config.llm_model)
                    .with_max_tokens(config.llm_max_tokens)
                    .with_temperature(config.llm_temperature),
            ),
        };

        info!(
            rule = ?config.decision_rule,
            explanation = explainer.name(),
            news = news.is_configured(),
            "Research pipeline configured"
        );

        Ok(Self::builder(yahoo.clone(), news, yahoo)
            .decision_rule(config.decision_rule)
            .explainer(explainer)
            .probe_suffix(&config.probe_suffix)
            .history_period(config.history_period)
            .build())
    }

    pub fn prices(&self) -> &Arc<dyn PriceHistoryFetcher> {
        &self.prices
    }

    pub fn news(&self) -> &Arc<dyn NewsCollector> {
        &self.news
    }

    pub fn resolver(&self) -> &SymbolResolver {
        &self.resolver
    }

    pub fn sentiment(&self) -> &SentimentAggregator {
        &self.sentiment
    }

    pub fn history_period(&self) -> HistoryPeriod {
        self.history_period
    }

    #[instrument(skip(self))]
    pub async fn orchestrate(&self, raw: &str, company: Option<&str>) -> Result<ResearchResult> {
        let resolved = self.resolver.resolve(raw, company).await?;
        let symbol = resolved.canonical_symbol.clone();

        let (headlines, history) = tokio::join!(
            self.collect_news(&resolved.company_name),
            self.price_history(&symbol),
        );
        let (points, market) = history?;

        let performance = PricePerformance::from_history(&symbol, &points, &market)
            .map_err(|e| unavailable(&symbol, e))?;

        let sentiment = self.sentiment.aggregate(&headlines);
        let decision = self.decisions.decide(sentiment, performance.change_pct);

        let context = ExplanationContext {
            symbol: &symbol,
            decision,
            sentiment,
            price_change_pct: performance.change_pct,
            current_price: performance.current_price,
            currency: &performance.currency,
            exchange: &performance.exchange,
            headlines: &headlines,
        };
        let explanation = self.explainer.explain(&context).await;

        info!(
            "{} -> {} (sentiment {:.2}, change {:+.2}%, {} article(s))",
            symbol,
            decision,
            sentiment,
            performance.change_pct,
            headlines.len()
        );

        Ok(ResearchResult::new(
            resolved,
            performance,
            sentiment,
            decision,
            explanation,
            headlines,
        ))
    }

    async fn collect_news(&self, query: &str) -> Vec<String> {
        match self.news.fetch(query).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!("News unavailable for {}: {}", query, e);
                Vec::new()
            }
        }
    }

    async fn price_history(&self, symbol: &str) -> Result<(Vec<PricePoint>, MarketInfo)> {
        let points = self
            .prices
            .fetch(symbol, self.history_period)
            .await
            .map_err(|e| unavailable(symbol, e))?;

        if points.len() < 2 {
            return Err(unavailable(
                symbol,
                ResearchError::InsufficientData {
                    symbol: symbol.to_string(),
                    points: points.len(),
                },
            ));
        }

        let market = self.prices.market_info(symbol).await.unwrap_or_else(|e| {
            warn!("Market info unavailable for {}: {}", symbol, e);
            MarketInfo::default()
        });

        Ok((points, market))
    }
}

fn unavailable(symbol: &str, cause: ResearchError) -> ResearchError {
    match cause {
        ResearchError::DataUnavailable { .. } => cause,
        other => ResearchError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: other.to_string(),
        },
    }
}

/// `None` when no OpenAI key is configured
fn llm_provider(config: &ResearchConfig) -> Result<Option<Arc<dyn LLMProvider>>> {
    let Some(key) = config.openai_api_key.as_deref() else {
        warn!("OPENAI_API_KEY not set - generative explanations will be unavailable");
        return Ok(None);
    };

    let mut openai = OpenAIConfig::new(key).with_timeout(config.request_timeout.as_secs());
    if let Some(base) = config.openai_api_base.as_deref() {
        openai = openai.with_api_base(base);
    }

    Ok(Some(Arc::new(OpenAIProvider::with_config(openai)?)))
}

/// Builder for ResearchPipeline
pub struct ResearchPipelineBuilder {
    prices: Arc<dyn PriceHistoryFetcher>,
    news: Arc<dyn NewsCollector>,
    search: Arc<dyn SymbolSearch>,
    sentiment: Option<SentimentAggregator>,
    decision_rule: DecisionRuleKind,
    explainer: Option<Arc<dyn Explainer>>,
    probe_suffix: String,
    history_period: HistoryPeriod,
}

impl ResearchPipelineBuilder {
    fn new(
        prices: Arc<dyn PriceHistoryFetcher>,
        news: Arc<dyn NewsCollector>,
        search: Arc<dyn SymbolSearch>,
    ) -> Self {
        let defaults = ResearchConfig::default();
        Self {
            prices,
            news,
            search,
            sentiment: None,
            decision_rule: defaults.decision_rule,
            explainer: None,
            probe_suffix: defaults.probe_suffix,
            history_period: defaults.history_period,
        }
    }

    /// Set the sentiment aggregator (default: lexicon scorer)
    pub fn sentiment(mut self, sentiment: SentimentAggregator) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    /// Set the decision rule (default: weighted)
    pub fn decision_rule(mut self, rule: DecisionRuleKind) -> Self {
        self.decision_rule = rule;
        self
    }

    /// Set the explanation strategy (default: template)
    pub fn explainer(mut self, explainer: Arc<dyn Explainer>) -> Self {
        self.explainer = Some(explainer);
        self
    }

    /// Set the regional probe suffix (default: `.NS`)
    pub fn probe_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.probe_suffix = suffix.into();
        self
    }

    /// Set the price history window (default: six months)
    pub fn history_period(mut self, period: HistoryPeriod) -> Self {
        self.history_period = period;
        self
    }

    pub fn build(self) -> ResearchPipeline {
        ResearchPipeline {
            resolver: SymbolResolver::new(self.search, self.prices.clone(), self.probe_suffix),
            prices: self.prices,
            news: self.news,
            sentiment: self.sentiment.unwrap_or_default(),
            decisions: DecisionEngine::from_kind(self.decision_rule),
            explainer: self
                .explainer
                .unwrap_or_else(|| Arc::new(TemplateExplainer)),
            history_period: self.history_period,
        }
    }
}
