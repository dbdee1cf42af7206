//! Configuration for stock research operations

use crate::api::HistoryPeriod;
use crate::decision::DecisionRuleKind;
use crate::error::{Result, ResearchError};
use crate::explanation::ExplanationKind;
use crate::explanation::generative::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use analyzer_utils::env_var;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// Configuration for stock research operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchConfig {
    /// Timeout applied to every external round-trip
    pub request_timeout: Duration,

    /// Look-back window for the price performance figure
    pub history_period: HistoryPeriod,

    /// Articles fetched per news request
    pub news_page_size: usize,

    /// News requests allowed per minute
    pub news_rate_limit: u32,

    /// Suffix appended by the last-resort regional probe
    pub probe_suffix: String,

    pub decision_rule: DecisionRuleKind,

    pub explanation: ExplanationKind,

    /// NewsAPI key (optional, news is empty without it)
    #[serde(skip_serializing)]
    pub news_api_key: Option<String>,

    /// OpenAI key (optional, only the generative explanation uses it)
    #[serde(skip_serializing)]
    pub openai_api_key: Option<String>,

    /// OpenAI-compatible base URL override
    pub openai_api_base: Option<String>,

    pub llm_model: String,

    pub llm_max_tokens: usize,

    pub llm_temperature: f32,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            history_period: HistoryPeriod::SixMonths,
            news_page_size: 5,
            news_rate_limit: 60,
            probe_suffix: ".NS".to_string(),
            decision_rule: DecisionRuleKind::Weighted,
            explanation: ExplanationKind::Template,
            news_api_key: None,
            openai_api_key: None,
            openai_api_base: None,
            llm_model: DEFAULT_MODEL.to_string(),
            llm_max_tokens: DEFAULT_MAX_TOKENS,
            llm_temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl ResearchConfig {
    /// Create a new configuration builder
    pub fn builder() -> ResearchConfigBuilder {
        ResearchConfigBuilder::default()
    }

    /// Defaults overlaid with the environment, validated
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env()?.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            return Err(ResearchError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.news_page_size == 0 {
            return Err(ResearchError::Config(
                "news_page_size must be greater than 0".to_string(),
            ));
        }

        if self.probe_suffix.trim().is_empty() {
            return Err(ResearchError::Config(
                "probe_suffix must not be empty".to_string(),
            ));
        }

        if self.llm_model.trim().is_empty() {
            return Err(ResearchError::Config("llm_model must not be empty".to_string()));
        }

        Ok(())
    }
}

/// Builder for ResearchConfig
#[derive(Debug, Default)]
pub struct ResearchConfigBuilder {
    request_timeout: Option<Duration>,
    history_period: Option<HistoryPeriod>,
    news_page_size: Option<usize>,
    news_rate_limit: Option<u32>,
    probe_suffix: Option<String>,
    decision_rule: Option<DecisionRuleKind>,
    explanation: Option<ExplanationKind>,
    news_api_key: Option<String>,
    openai_api_key: Option<String>,
    openai_api_base: Option<String>,
    llm_model: Option<String>,
    llm_max_tokens: Option<usize>,
    llm_temperature: Option<f32>,
}

impl ResearchConfigBuilder {
    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the price history window
    pub fn history_period(mut self, period: HistoryPeriod) -> Self {
        self.history_period = Some(period);
        self
    }

    /// Set articles per news request
    pub fn news_page_size(mut self, size: usize) -> Self {
        self.news_page_size = Some(size);
        self
    }

    /// Set news requests per minute
    pub fn news_rate_limit(mut self, per_minute: u32) -> Self {
        self.news_rate_limit = Some(per_minute);
        self
    }

    /// Set the regional probe suffix
    pub fn probe_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.probe_suffix = Some(suffix.into());
        self
    }

    /// Set the decision rule
    pub fn decision_rule(mut self, rule: DecisionRuleKind) -> Self {
        self.decision_rule = Some(rule);
        self
    }

    /// Set the explanation strategy
    pub fn explanation(mut self, kind: ExplanationKind) -> Self {
        self.explanation = Some(kind);
        self
    }

    /// Set NewsAPI key
    pub fn news_api_key(mut self, key: impl Into<String>) -> Self {
        self.news_api_key = Some(key.into());
        self
    }

    /// Set OpenAI key
    pub fn openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    /// Set OpenAI-compatible base URL
    pub fn openai_api_base(mut self, base: impl Into<String>) -> Self {
        self.openai_api_base = Some(base.into());
        self
    }

    /// Set the chat model
    pub fn llm_model(mut self, model: impl Into<String>) -> Self {
        self.llm_model = Some(model.into());
        self
    }

    /// Set the completion token budget
    pub fn llm_max_tokens(mut self, max_tokens: usize) -> Self {
        self.llm_max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature
    pub fn llm_temperature(mut self, temperature: f32) -> Self {
        self.llm_temperature = Some(temperature);
        self
    }

    /// Fill every field not already set from the process environment
    pub fn with_env(self) -> Result<Self> {
        self.with_env_from(env_var)
    }

    /// Fill every field not already set from `lookup`
    ///
    /// A variable that is set but does not parse is a `Config` error.
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let text = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        self.news_api_key = self.news_api_key.or_else(|| text("NEWS_API_KEY"));
        self.openai_api_key = self.openai_api_key.or_else(|| text("OPENAI_API_KEY"));
        self.openai_api_base = self.openai_api_base.or_else(|| text("OPENAI_API_BASE"));
        self.llm_model = self.llm_model.or_else(|| text("OPENAI_MODEL"));
        self.probe_suffix = self.probe_suffix.or_else(|| text("ANALYZER_PROBE_SUFFIX"));

        if self.decision_rule.is_none() {
            self.decision_rule =
                parse_var("ANALYZER_DECISION_RULE", text("ANALYZER_DECISION_RULE"))?;
        }
        if self.explanation.is_none() {
            self.explanation = parse_var("ANALYZER_EXPLANATION", text("ANALYZER_EXPLANATION"))?;
        }
        if self.request_timeout.is_none() {
            self.request_timeout =
                parse_var("ANALYZER_TIMEOUT_SECS", text("ANALYZER_TIMEOUT_SECS"))?
                    .map(Duration::from_secs);
        }
        if self.news_page_size.is_none() {
            self.news_page_size =
                parse_var("ANALYZER_NEWS_PAGE_SIZE", text("ANALYZER_NEWS_PAGE_SIZE"))?;
        }

        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<ResearchConfig> {
        let defaults = ResearchConfig::default();

        let config = ResearchConfig {
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            history_period: self.history_period.unwrap_or(defaults.history_period),
            news_page_size: self.news_page_size.unwrap_or(defaults.news_page_size),
            news_rate_limit: self.news_rate_limit.unwrap_or(defaults.news_rate_limit),
            probe_suffix: self.probe_suffix.unwrap_or(defaults.probe_suffix),
            decision_rule: self.decision_rule.unwrap_or(defaults.decision_rule),
            explanation: self.explanation.unwrap_or(defaults.explanation),
            news_api_key: self.news_api_key,
            openai_api_key: self.openai_api_key,
            openai_api_base: self.openai_api_base,
            llm_model: self.llm_model.unwrap_or(defaults.llm_model),
            llm_max_tokens: self.llm_max_tokens.unwrap_or(defaults.llm_max_tokens),
            llm_temperature: self.llm_temperature.unwrap_or(defaults.llm_temperature),
        };

        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T>(key: &str, value: Option<String>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .map(|v| {
            v.parse::<T>()
                .map_err(|e| ResearchError::Config(format!("invalid {key}='{v}': {e}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ResearchConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.history_period, HistoryPeriod::SixMonths);
        assert_eq!(config.news_page_size, 5);
        assert_eq!(config.probe_suffix, ".NS");
        assert_eq!(config.decision_rule, DecisionRuleKind::Weighted);
        assert_eq!(config.explanation, ExplanationKind::Template);
        assert_eq!(config.llm_model, "gpt-4o-mini");
        assert_eq!(config.llm_max_tokens, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ResearchConfig::builder()
            .decision_rule(DecisionRuleKind::HardThreshold)
            .explanation(ExplanationKind::Generative)
            .request_timeout(Duration::from_secs(30))
            .probe_suffix(".BO")
            .news_api_key("test_key")
            .build()
            .unwrap();

        assert_eq!(config.decision_rule, DecisionRuleKind::HardThreshold);
        assert_eq!(config.explanation, ExplanationKind::Generative);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.probe_suffix, ".BO");
        assert_eq!(config.news_api_key.as_deref(), Some("test_key"));
        assert_eq!(config.news_page_size, 5);
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = ResearchConfig {
            request_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ResearchError::Config(_))));
    }

    #[test]
    fn test_validation_zero_page_size() {
        let result = ResearchConfig::builder().news_page_size(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_empty_probe_suffix() {
        let config = ResearchConfig {
            probe_suffix: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_keys_are_not_serialized() {
        let config = ResearchConfig {
            news_api_key: Some("secret-news".to_string()),
            openai_api_key: Some("secret-openai".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("\"decision_rule\":\"weighted\""));
    }

    #[test]
    fn test_env_overlay() {
        let config = ResearchConfig::builder()
            .with_env_from(lookup(&[
                ("NEWS_API_KEY", "news-key"),
                ("OPENAI_MODEL", "local-model"),
                ("ANALYZER_DECISION_RULE", "hard-threshold"),
                ("ANALYZER_EXPLANATION", "generative"),
                ("ANALYZER_TIMEOUT_SECS", "25"),
                ("ANALYZER_NEWS_PAGE_SIZE", "8"),
                ("ANALYZER_PROBE_SUFFIX", ".BO"),
            ]))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.news_api_key.as_deref(), Some("news-key"));
        assert_eq!(config.llm_model, "local-model");
        assert_eq!(config.decision_rule, DecisionRuleKind::HardThreshold);
        assert_eq!(config.explanation, ExplanationKind::Generative);
        assert_eq!(config.request_timeout, Duration::from_secs(25));
        assert_eq!(config.news_page_size, 8);
        assert_eq!(config.probe_suffix, ".BO");
    }

    #[test]
    fn test_explicit_values_win_over_env() {
        let config = ResearchConfig::builder()
            .decision_rule(DecisionRuleKind::Weighted)
            .with_env_from(lookup(&[("ANALYZER_DECISION_RULE", "not-a-rule")]))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.decision_rule, DecisionRuleKind::Weighted);
    }

    #[test]
    fn test_invalid_env_values_are_config_errors() {
        for (key, value) in [
            ("ANALYZER_DECISION_RULE", "hard_thresold"),
            ("ANALYZER_EXPLANATION", "poetry"),
            ("ANALYZER_TIMEOUT_SECS", "ten"),
            ("ANALYZER_NEWS_PAGE_SIZE", "-1"),
        ] {
            let result = ResearchConfig::builder().with_env_from(lookup(&[(key, value)]));
            match result {
                Err(ResearchError::Config(message)) => assert!(message.contains(key), "{message}"),
                other => panic!("{key}={value} should fail, got {:?}", other.map(|_| ())),
            }
        }
    }

    #[test]
    fn test_blank_env_values_are_unset() {
        let config = ResearchConfig::builder()
            .with_env_from(lookup(&[("ANALYZER_TIMEOUT_SECS", "  "), ("NEWS_API_KEY", "")]))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.news_api_key.is_none());
    }
}
