//! Discrete BUY/SELL/HOLD decisions from sentiment and price change

use crate::error::ResearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Investment decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Buy,
    Sell,
    Hold,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A strategy mapping `(sentiment, price change %)` to a [`Decision`]
pub trait DecisionRule: Send + Sync {
    fn decide(&self, sentiment: f64, price_change_pct: f64) -> Decision;

    /// Short identifier used in logs
    fn name(&self) -> &'static str;
}

/// Continuous blend of price momentum and news tone
///
/// `combined = change * 0.6 + sentiment * 20 * 0.4`, then BUY above 3,
/// SELL below -3.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedRule;

impl WeightedRule {
    const PRICE_WEIGHT: f64 = 0.6;
    const SENTIMENT_WEIGHT: f64 = 0.4;
    /// Stretches sentiment in [-1, 1] onto a percent-like scale
    const SENTIMENT_SCALE: f64 = 20.0;
    const THRESHOLD: f64 = 3.0;

    pub fn combined(sentiment: f64, price_change_pct: f64) -> f64 {
        price_change_pct * Self::PRICE_WEIGHT
            + sentiment * Self::SENTIMENT_SCALE * Self::SENTIMENT_WEIGHT
    }
}

impl DecisionRule for WeightedRule {
    fn decide(&self, sentiment: f64, price_change_pct: f64) -> Decision {
        let combined = Self::combined(sentiment, price_change_pct);
        if combined > Self::THRESHOLD {
            Decision::Buy
        } else if combined < -Self::THRESHOLD {
            Decision::Sell
        } else {
            Decision::Hold
        }
    }

    fn name(&self) -> &'static str {
        "weighted"
    }
}

/// Both signals must agree past fixed thresholds
#[derive(Debug, Clone, Copy, Default)]
pub struct HardThresholdRule;

impl HardThresholdRule {
    const SENTIMENT_THRESHOLD: f64 = 0.1;
    const PRICE_THRESHOLD: f64 = 5.0;
}

impl DecisionRule for HardThresholdRule {
    fn decide(&self, sentiment: f64, price_change_pct: f64) -> Decision {
        if sentiment > Self::SENTIMENT_THRESHOLD && price_change_pct > Self::PRICE_THRESHOLD {
            Decision::Buy
        } else if sentiment < -Self::SENTIMENT_THRESHOLD
            && price_change_pct < -Self::PRICE_THRESHOLD
        {
            Decision::Sell
        } else {
            Decision::Hold
        }
    }

    fn name(&self) -> &'static str {
        "hard-threshold"
    }
}

/// Configurable choice of decision rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionRuleKind {
    #[default]
    Weighted,
    HardThreshold,
}

impl DecisionRuleKind {
    pub fn build(self) -> Arc<dyn DecisionRule> {
        match self {
            Self::Weighted => Arc::new(WeightedRule),
            Self::HardThreshold => Arc::new(HardThresholdRule),
        }
    }
}

impl FromStr for DecisionRuleKind {
    type Err = ResearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weighted" => Ok(Self::Weighted),
            "hard-threshold" | "hard_threshold" | "threshold" => Ok(Self::HardThreshold),
            other => Err(ResearchError::Config(format!(
                "unknown decision rule '{other}' (expected 'weighted' or 'hard-threshold')"
            ))),
        }
    }
}

/// Applies the configured [`DecisionRule`]
#[derive(Clone)]
pub struct DecisionEngine {
    rule: Arc<dyn DecisionRule>,
}

impl DecisionEngine {
    pub fn new(rule: Arc<dyn DecisionRule>) -> Self {
        Self { rule }
    }

    pub fn from_kind(kind: DecisionRuleKind) -> Self {
        Self::new(kind.build())
    }

    pub fn rule_name(&self) -> &'static str {
        self.rule.name()
    }

    pub fn decide(&self, sentiment: f64, price_change_pct: f64) -> Decision {
        let decision = self.rule.decide(sentiment, price_change_pct);
        debug!(
            rule = self.rule.name(),
            sentiment, price_change_pct, %decision, "Decision made"
        );
        decision
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::from_kind(DecisionRuleKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_rule() {
        let rule = WeightedRule;
        assert!((WeightedRule::combined(0.5, 10.0) - 10.0).abs() < 1e-9);
        assert_eq!(rule.decide(0.5, 10.0), Decision::Buy);
        assert_eq!(rule.decide(-0.5, -10.0), Decision::Sell);
        // 4 * 0.6 + 0 = 2.4
        assert_eq!(rule.decide(0.0, 4.0), Decision::Hold);
        // Strong news alone can tip it: 0.5 * 20 * 0.4 = 4
        assert_eq!(rule.decide(0.5, 0.0), Decision::Buy);
    }

    #[test]
    fn test_hard_threshold_rule() {
        let rule = HardThresholdRule;
        assert_eq!(rule.decide(0.2, 6.0), Decision::Buy);
        assert_eq!(rule.decide(-0.2, -6.0), Decision::Sell);
        // Signals must agree
        assert_eq!(rule.decide(0.9, 2.0), Decision::Hold);
        assert_eq!(rule.decide(0.05, 40.0), Decision::Hold);
        assert_eq!(rule.decide(-0.3, 7.0), Decision::Hold);
    }

    #[test]
    fn test_neutral_inputs_hold_for_every_rule() {
        for kind in [DecisionRuleKind::Weighted, DecisionRuleKind::HardThreshold] {
            assert_eq!(kind.build().decide(0.0, 0.0), Decision::Hold, "{kind:?}");
        }
    }

    #[test]
    fn test_rules_disagree_where_expected() {
        let weighted = DecisionEngine::from_kind(DecisionRuleKind::Weighted);
        let hard = DecisionEngine::from_kind(DecisionRuleKind::HardThreshold);
        assert_eq!(weighted.decide(0.0, 8.0), Decision::Buy);
        assert_eq!(hard.decide(0.0, 8.0), Decision::Hold);
        assert_eq!(weighted.rule_name(), "weighted");
        assert_eq!(hard.rule_name(), "hard-threshold");
    }

    #[test]
    fn test_rule_kind_parsing() {
        assert_eq!("weighted".parse::<DecisionRuleKind>().unwrap(), DecisionRuleKind::Weighted);
        assert_eq!(
            "Hard-Threshold".parse::<DecisionRuleKind>().unwrap(),
            DecisionRuleKind::HardThreshold
        );
        assert!(matches!(
            "coin-flip".parse::<DecisionRuleKind>(),
            Err(ResearchError::Config(_))
        ));
    }

    #[test]
    fn test_decision_serialization() {
        assert_eq!(serde_json::to_string(&Decision::Buy).unwrap(), "\"BUY\"");
        assert_eq!(Decision::Hold.to_string(), "HOLD");
    }
}
