//! Human-readable reports for each command

use analyzer_stock::engine::{ChartSeries, NewsDigest, SentimentLabel, TrendingReport};
use analyzer_stock::{ComparisonReport, ResearchResult, SearchOutcome, StockMetrics};
use serde::Serialize;

const RULE: &str = "------------------------------------------------------------";

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn research(result: &ResearchResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({})  {}\n",
        result.company_name(),
        result.symbol(),
        result.decision()
    ));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!(
        "price      : {:.2} {} on {}\n",
        result.current_price(),
        result.currency(),
        result.exchange()
    ));
    out.push_str(&format!("change     : {:+.2}%\n", result.price_change()));
    out.push_str(&format!("sentiment  : {:.2}\n", result.sentiment_score()));
    out.push_str(&format!("resolved by: {}\n", result.strategy_used()));

    if !result.headlines().is_empty() {
        out.push_str("headlines:\n");
        for headline in result.headlines() {
            out.push_str(&format!("  - {headline}\n"));
        }
    }

    out.push('\n');
    out.push_str(result.explanation());
    out.push('\n');
    out
}

pub fn comparison(report: &ComparisonReport) -> String {
    let mut out = format!(
        "{:<16} {:>10} {:>10} {:>8}\n",
        "SYMBOL", "PRICE", "CHANGE", "ACTION"
    );
    for result in &report.results {
        out.push_str(&format!(
            "{:<16} {:>10.2} {:>9.2}% {:>8}\n",
            result.symbol(),
            result.current_price(),
            result.price_change(),
            result.decision()
        ));
    }
    let best = &report.best_performer;
    out.push_str(&format!(
        "\nbest performer: {} ({:+.2}%, {})\n",
        best.symbol, best.change, best.decision
    ));
    out
}

pub fn trending(report: &TrendingReport) -> String {
    if report.stocks.is_empty() {
        return "No watchlist stock moved more than 8%\n".to_string();
    }

    let mut out = format!("{:<10} {:<24} {:>10} {:>10}\n", "SYMBOL", "NAME", "PRICE", "CHANGE");
    for stock in &report.stocks {
        out.push_str(&format!(
            "{:<10} {:<24} {:>10.2} {:>9.2}%\n",
            stock.symbol, stock.name, stock.current_price, stock.change
        ));
    }
    out
}

pub fn metrics(metrics: &StockMetrics) -> String {
    let mut out = format!("{} on {}\n", metrics.symbol, metrics.exchange);
    out.push_str(&format!(
        "price  : {:.2} {}\n",
        metrics.current_price, metrics.currency
    ));
    out.push_str(&format!("open   : {:.2}\n", metrics.open_price));
    out.push_str(&format!(
        "change : {:+.2} ({:+.2}%)\n",
        metrics.day_change, metrics.day_change_pct
    ));
    if let (Some(low), Some(high)) = (metrics.low_52w, metrics.high_52w) {
        out.push_str(&format!("52w    : {low:.2} - {high:.2}\n"));
    }
    if let Some(volume) = metrics.volume {
        out.push_str(&format!("volume : {volume}\n"));
    }
    out
}

pub fn chart(series: &ChartSeries) -> String {
    let mut out = format!("{} over {} ({} points)\n", series.symbol, series.period, series.count);
    for point in &series.points {
        out.push_str(&format!("{}  {:>10.2}\n", point.date, point.price));
    }
    out
}

pub fn news(digest: &NewsDigest) -> String {
    let mut out = format!("News for {}\n", digest.company);
    if let Some(message) = &digest.message {
        out.push_str(message);
        out.push('\n');
        return out;
    }

    for item in &digest.headlines {
        out.push_str(&format!(
            "  [{:<8}] {}\n",
            sentiment_label(item.sentiment),
            item.headline
        ));
    }
    if let Some(overall) = digest.overall_sentiment {
        out.push_str(&format!("overall sentiment: {overall:.2}\n"));
    }
    out
}

pub fn search(outcome: &SearchOutcome) -> String {
    match (&outcome.symbol, outcome.found) {
        (Some(symbol), true) => format!(
            "{} -> {} ({})\n",
            outcome.query,
            symbol,
            outcome.company_name.as_deref().unwrap_or("unknown company")
        ),
        _ => format!(
            "{}: {}\n",
            outcome.query,
            outcome.message.as_deref().unwrap_or("not found")
        ),
    }
}

fn sentiment_label(label: SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Positive => "positive",
        SentimentLabel::Negative => "negative",
        SentimentLabel::Neutral => "neutral",
    }
}
