//! Command-line interface for the stock analyzer
//!
//! ```bash
//! export NEWS_API_KEY="..."
//! analyzer analyze tata motors
//! analyzer compare AAPL MSFT NVDA --json
//! analyzer analyze apple --explanation generative
//! ```

mod cli;
mod output;

use analyzer_stock::{MarketService, ResearchConfig, ResearchPipeline};
use analyzer_utils::LogFormat;
use clap::Parser;
use tracing::info;

use crate::cli::{Cli, Command, join_words};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    let default_filter = if cli.verbose {
        "info"
    } else {
        "warn"
    };
    analyzer_utils::init_tracing_with(default_filter, format);

    let mut builder = ResearchConfig::builder();
    if let Some(rule) = cli.rule {
        builder = builder.decision_rule(rule);
    }
    if let Some(kind) = cli.explanation {
        builder = builder.explanation(kind);
    }
    let config = builder.with_env()?.build()?;

    let service = MarketService::new(ResearchPipeline::from_config(&config)?);
    info!(command = ?cli.command, "Running command");

    run(&service, cli.command, cli.json).await
}

async fn run(service: &MarketService, command: Command, json: bool) -> anyhow::Result<()> {
    match command {
        Command::Analyze { name, company } => {
            let name = join_words(&name);
            let result = service
                .pipeline()
                .orchestrate(&name, company.as_deref())
                .await?;
            emit(json, &result, output::research)
        }
        Command::Compare { names } => {
            let report = service.compare(&names).await?;
            emit(json, &report, output::comparison)
        }
        Command::Trending => {
            let report = service.trending().await?;
            emit(json, &report, output::trending)
        }
        Command::Metrics { symbol } => {
            let metrics = service.metrics(&symbol).await?;
            emit(json, &metrics, output::metrics)
        }
        Command::Chart { symbol, period } => {
            let series = service.chart(&symbol, &period).await?;
            emit(json, &series, output::chart)
        }
        Command::News { company } => {
            let digest = service.news(&join_words(&company)).await?;
            emit(json, &digest, output::news)
        }
        Command::Search { query } => {
            let outcome = service.search(&join_words(&query)).await?;
            emit(json, &outcome, output::search)
        }
    }
}

fn emit<T: serde::Serialize>(json: bool, value: &T, render: fn(&T) -> String) -> anyhow::Result<()> {
    if json {
        output::print_json(value)
    } else {
        print!("{}", render(value));
        Ok(())
    }
}
