//! Explanation written by an OpenAI-compatible chat model

use super::{ExplanationContext, Explainer};
use analyzer_llm::{CompletionRequest, LLMProvider};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: usize = 300;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

const PROMPT_HEADLINES: usize = 5;
const HEADLINE_CHARS: usize = 150;
const UNCONFIGURED: &str =
    "AI explanation unavailable: OpenAI client not initialized. Please set OPENAI_API_KEY.";

/// Asks an [`LLMProvider`] to justify the decision
///
/// Without a provider, or when the provider fails, the explanation is a
/// fixed "AI explanation unavailable" text.
#[derive(Clone)]
pub struct GenerativeExplainer {
    provider: Option<Arc<dyn LLMProvider>>,
    model: String,
    max_tokens: usize,
    temperature: f32,
}

impl GenerativeExplainer {
    pub fn new(provider: Option<Arc<dyn LLMProvider>>) -> Self {
        Self {
            provider,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn build_prompt(context: &ExplanationContext<'_>) -> String {
        let headlines: Vec<String> = context
            .headlines
            .iter()
            .take(PROMPT_HEADLINES)
            .map(|h| format!("- {}...", h.chars().take(HEADLINE_CHARS).collect::<String>()))
            .collect();

        format!(
            "You are a financial research assistant.\n\n\
             Stock: {}\n\
             6-month price change: {}%\n\
             Current price: {} {}\n\
             Exchange: {}\n\n\
             Recent news headlines:\n{}\n\n\
             Final decision: {}\n\n\
             Explain clearly and concisely why this recommendation was made based on the \
             data provided. Keep it under 150 words.",
            context.symbol,
            context.price_change_pct,
            context.current_price,
            context.currency,
            context.exchange,
            headlines.join("\n"),
            context.decision,
        )
    }
}

#[async_trait]
impl Explainer for GenerativeExplainer {
    async fn explain(&self, context: &ExplanationContext<'_>) -> String {
        let Some(provider) = &self.provider else {
            warn!("OPENAI_API_KEY not set - generative explanation unavailable");
            return UNCONFIGURED.to_string();
        };

        let request = CompletionRequest::builder(&self.model)
            .user(Self::build_prompt(context))
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .build();

        match provider.complete(request).await {
            Ok(response) => match response.text() {
                Some(text) => {
                    if response.finish_reason.is_truncated() {
                        warn!("AI explanation for {} hit the token limit", context.symbol);
                    }
                    info!("Generated AI explanation for {}", context.symbol);
                    text.to_string()
                }
                None => {
                    warn!("LLM returned an empty explanation for {}", context.symbol);
                    "AI explanation unavailable: empty response".to_string()
                }
            },
            Err(e) => {
                error!("Error generating AI explanation: {}", e);
                format!("AI explanation unavailable: {e}")
            }
        }
    }

    fn name(&self) -> &'static str {
        "generative"
    }
}
