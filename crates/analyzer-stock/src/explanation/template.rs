//! Deterministic, offline explanation text

use super::{ExplanationContext, Explainer};
use crate::decision::Decision;
use async_trait::async_trait;

const NEUTRAL_BAND: f64 = 0.1;
const STRONG_SENTIMENT: f64 = 0.2;
const MOMENTUM_PCT: f64 = 5.0;

fn sentiment_label(sentiment: f64) -> &'static str {
    if sentiment > STRONG_SENTIMENT {
        "very positive"
    } else if sentiment > NEUTRAL_BAND {
        "positive"
    } else if sentiment > -NEUTRAL_BAND {
        "neutral"
    } else if sentiment > -STRONG_SENTIMENT {
        "negative"
    } else {
        "very negative"
    }
}

fn magnitude_label(change_pct: f64) -> &'static str {
    match change_pct.abs() {
        m if m < 2.0 => "minimal movement",
        m if m < 5.0 => "modest movement",
        m if m < 10.0 => "moderate movement",
        m if m < 20.0 => "significant movement",
        _ => "major movement",
    }
}

fn direction_clause(change_pct: f64) -> String {
    if change_pct > 0.0 {
        format!("gained {change_pct:.1}%")
    } else if change_pct < 0.0 {
        format!("declined {:.1}%", change_pct.abs())
    } else {
        "remained flat".to_string()
    }
}

/// Every HOLD reason whose gate is satisfied, in checklist order
fn hold_reasons(sentiment: f64, change_pct: f64, has_news: bool) -> Vec<String> {
    let mut reasons = Vec::new();

    if sentiment.abs() <= NEUTRAL_BAND {
        reasons.push("Sentiment is neutral: no strong positive or negative news".to_string());
    }
    if change_pct.abs() < MOMENTUM_PCT {
        reasons.push(format!(
            "Price movement is modest ({:.1}%): not enough momentum",
            change_pct.abs()
        ));
    }
    if sentiment > NEUTRAL_BAND && change_pct < MOMENTUM_PCT {
        reasons.push("Positive news but weak price action: the market may be uncertain".to_string());
    }
    if sentiment < -NEUTRAL_BAND && change_pct > -MOMENTUM_PCT {
        reasons.push("Negative news but the price is holding up: it may have support".to_string());
    }
    if !has_news {
        reasons.push(
            "Limited news coverage: insufficient information for strong conviction".to_string(),
        );
    }

    reasons
}

/// Render the rationale for `decision`
///
/// Pure function of its inputs. The text always names the decision and ends
/// with a summary carrying the sentiment, the signed change to two decimals
/// and whether news was available.
pub fn explain(decision: Decision, sentiment: f64, change_pct: f64, has_news: bool) -> String {
    let mood = sentiment_label(sentiment).to_uppercase();
    let magnitude = magnitude_label(change_pct);
    let direction = direction_clause(change_pct);

    let mut text = format!("{decision} RECOMMENDATION\n\n");
    let signals = |momentum: &str| {
        format!(
            "- News Sentiment: {mood} ({sentiment:.2})\n\
             - Price Performance: Stock has {direction} over 6 months ({magnitude})\n\
             - Market Momentum: {momentum}\n"
        )
    };

    match decision {
        Decision::Buy => {
            text.push_str("Strong positive signals detected:\n");
            text.push_str(&signals("Sentiment and price trend point upward"));
            text.push_str(
                "\nWhy BUY?\n\
                 Positive news coverage together with solid price performance suggests \
                 favorable market conditions. The stock shows upward momentum with a \
                 positive market perception.\n\n\
                 Note: This is based on historical data. Always do your own research and \
                 consider your risk tolerance before investing.",
            );
        }
        Decision::Sell => {
            text.push_str("Warning signals detected:\n");
            text.push_str(&signals("Sentiment and price trend point downward"));
            text.push_str(
                "\nWhy SELL?\n\
                 Negative news coverage together with declining price performance \
                 indicates unfavorable market conditions. The stock shows downward \
                 momentum with a poor market perception.\n\n\
                 Consider: Cutting losses or reallocating to better-performing assets.",
            );
        }
        Decision::Hold => {
            text.push_str("Mixed or neutral signals:\n");
            text.push_str(&signals("No clear directional trend"));
            text.push_str(
                "\nWhy HOLD?\n\
                 The stock doesn't show strong enough signals for either buying or selling:\n",
            );

            let reasons = hold_reasons(sentiment, change_pct, has_news);
            if reasons.is_empty() {
                text.push_str("- Waiting for clearer market direction is prudent");
            } else {
                let lines: Vec<String> = reasons.iter().map(|r| format!("- {r}")).collect();
                text.push_str(&lines.join("\n"));
            }
            text.push_str(
                "\n\nStrategy: Monitor closely for stronger signals before taking action.",
            );
        }
    }

    text.push_str(&format!(
        "\n\nDATA SUMMARY:\n   Sentiment Score: {sentiment:.2} (-1 to +1 scale)\n   \
         6-Month Change: {change_pct:+.2}%\n   News Articles: {}",
        if has_news { "Available" } else { "Limited" }
    ));

    text
}

/// [`Explainer`] backed by [`explain`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateExplainer;

#[async_trait]
impl Explainer for TemplateExplainer {
    async fn explain(&self, context: &ExplanationContext<'_>) -> String {
        explain(
            context.decision,
            context.sentiment,
            context.price_change_pct,
            context.has_news(),
        )
    }

    fn name(&self) -> &'static str {
        "template"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_buckets() {
        assert_eq!(sentiment_label(0.5), "very positive");
        assert_eq!(sentiment_label(0.15), "positive");
        assert_eq!(sentiment_label(0.1), "neutral");
        assert_eq!(sentiment_label(0.0), "neutral");
        assert_eq!(sentiment_label(-0.15), "negative");
        assert_eq!(sentiment_label(-0.2), "very negative");
    }

    #[test]
    fn test_magnitude_buckets() {
        assert_eq!(magnitude_label(1.9), "minimal movement");
        assert_eq!(magnitude_label(-4.0), "modest movement");
        assert_eq!(magnitude_label(9.99), "moderate movement");
        assert_eq!(magnitude_label(-19.0), "significant movement");
        assert_eq!(magnitude_label(35.0), "major movement");
    }

    #[test]
    fn test_direction_clause() {
        assert_eq!(direction_clause(12.34), "gained 12.3%");
        assert_eq!(direction_clause(-7.26), "declined 7.3%");
        assert_eq!(direction_clause(0.0), "remained flat");
    }

    #[test]
    fn test_explain_is_idempotent_and_complete() {
        let cases = [
            (Decision::Buy, 0.45, 12.345, true),
            (Decision::Sell, -0.3, -8.5, true),
            (Decision::Hold, 0.0, 1.2, false),
        ];

        for (decision, sentiment, change, has_news) in cases {
            let first = explain(decision, sentiment, change, has_news);
            let second = explain(decision, sentiment, change, has_news);
            assert_eq!(first, second);
            assert!(first.contains(decision.as_str()), "{first}");
            assert!(first.contains(&format!("{change:+.2}%")), "{first}");
        }
    }

    #[test]
    fn test_hold_reasons_can_co_occur() {
        let text = explain(Decision::Hold, 0.05, 1.0, false);
        assert!(text.contains("Sentiment is neutral"));
        assert!(text.contains("Price movement is modest (1.0%)"));
        assert!(text.contains("Limited news coverage"));
        assert!(text.contains("News Articles: Limited"));
        assert!(!text.contains("Waiting for clearer market direction"));
    }

    #[test]
    fn test_hold_conflict_reasons() {
        let positive = hold_reasons(0.3, 2.0, true);
        assert!(positive.iter().any(|r| r.starts_with("Positive news but weak price")));

        let negative = hold_reasons(-0.3, -2.0, true);
        assert!(negative.iter().any(|r| r.starts_with("Negative news but the price")));
    }

    #[test]
    fn test_hold_without_specific_reason() {
        // Strong, agreeing signals that a stricter rule still held back
        let text = explain(Decision::Hold, 0.5, 12.0, true);
        assert!(text.contains("Waiting for clearer market direction is prudent"));
    }

    #[tokio::test]
    async fn test_template_explainer_uses_context() {
        let headlines = vec!["Apple beats estimates".to_string()];
        let context = ExplanationContext {
            symbol: "AAPL",
            decision: Decision::Buy,
            sentiment: 0.4,
            price_change_pct: 10.0,
            current_price: 190.5,
            currency: "USD",
            exchange: "NMS",
            headlines: &headlines,
        };

        let text = TemplateExplainer.explain(&context).await;
        assert_eq!(text, explain(Decision::Buy, 0.4, 10.0, true));
        assert!(text.contains("+10.00%"));
    }
}
