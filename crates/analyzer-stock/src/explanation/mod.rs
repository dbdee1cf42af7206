//! Natural-language rationale for a decision
//!
//! Two interchangeable strategies sit behind [`Explainer`]:
//! - [`TemplateExplainer`]: deterministic text, no network
//! - [`GenerativeExplainer`]: chat completion with a fixed fallback text

pub mod generative;
pub mod template;

pub use generative::GenerativeExplainer;
pub use template::TemplateExplainer;

use crate::decision::Decision;
use crate::error::ResearchError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Everything a strategy may draw on
#[derive(Debug, Clone, Copy)]
pub struct ExplanationContext<'a> {
    pub symbol: &'a str,
    pub decision: Decision,
    pub sentiment: f64,
    pub price_change_pct: f64,
    pub current_price: f64,
    pub currency: &'a str,
    pub exchange: &'a str,
    pub headlines: &'a [String],
}

impl ExplanationContext<'_> {
    pub fn has_news(&self) -> bool {
        !self.headlines.is_empty()
    }
}

/// Renders the rationale; never fails, degraded output is still text
#[async_trait]
pub trait Explainer: Send + Sync {
    async fn explain(&self, context: &ExplanationContext<'_>) -> String;

    fn name(&self) -> &'static str;
}

/// Configurable choice of explanation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExplanationKind {
    #[default]
    Template,
    Generative,
}

impl FromStr for ExplanationKind {
    type Err = ResearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "template" => Ok(Self::Template),
            "generative" | "llm" | "ai" => Ok(Self::Generative),
            other => Err(ResearchError::Config(format!(
                "unknown explanation strategy '{other}' (expected 'template' or 'generative')"
            ))),
        }
    }
}
