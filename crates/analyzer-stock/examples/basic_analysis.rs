//! Basic research example
//!
//! Resolves a company name or ticker, collects price history and news, and
//! prints the decision with its explanation.
//!
//! To run this example:
//! ```bash
//! # Optional: news is empty without it and sentiment stays neutral
//! export NEWS_API_KEY=your_key_here
//!
//! cargo run --example basic_analysis -- "tata motors"
//! ```

use analyzer_stock::{MarketService, ResearchConfig, ResearchPipeline};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    analyzer_utils::init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let name = if args.is_empty() {
        "apple".to_string()
    } else {
        args.join(" ")
    };

    let config = ResearchConfig::from_env()?;
    println!("Configuration:");
    println!("  - Decision rule: {:?}", config.decision_rule);
    println!("  - Explanation: {:?}", config.explanation);
    println!("  - News key set: {}\n", config.news_api_key.is_some());

    let service = MarketService::new(ResearchPipeline::from_config(&config)?);
    let result = service.analyze(&name).await?;

    println!(
        "{} ({}) resolved by {}",
        result.company_name(),
        result.symbol(),
        result.strategy_used()
    );
    println!(
        "Price {:.2} {} ({:+.2}%), sentiment {:.2}\n",
        result.current_price(),
        result.currency(),
        result.price_change(),
        result.sentiment_score()
    );
    println!("{}", result.explanation());

    Ok(())
}
