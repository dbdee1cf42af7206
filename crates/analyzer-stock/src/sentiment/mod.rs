//! News corpus to a single polarity score

pub mod lexicon;

pub use lexicon::LexiconScorer;

use std::sync::Arc;
use tracing::debug;

/// Per-text polarity in `[-1, 1]`, negative meaning negative tone
#[cfg_attr(test, mockall::automock)]
pub trait SentimentScorer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

/// Unweighted mean of per-article polarities
#[derive(Clone)]
pub struct SentimentAggregator {
    scorer: Arc<dyn SentimentScorer>,
}

impl SentimentAggregator {
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { scorer }
    }

    /// Polarity of a single text
    pub fn score(&self, text: &str) -> f64 {
        self.scorer.polarity(text).clamp(-1.0, 1.0)
    }

    /// Mean polarity of `articles`; `0.0` for an empty corpus
    pub fn aggregate(&self, articles: &[String]) -> f64 {
        if articles.is_empty() {
            return 0.0;
        }

        let total: f64 = articles.iter().map(|a| self.score(a)).sum();
        let mean = total / articles.len() as f64;
        debug!("Aggregated sentiment {:.3} over {} article(s)", mean, articles.len());
        mean
    }
}

impl Default for SentimentAggregator {
    fn default() -> Self {
        Self::new(Arc::new(LexiconScorer::new()))
    }
}
