use analyzer_stock::{DecisionRuleKind, ExplanationKind};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "analyzer")]
#[command(about = "Resolve stock symbols and research BUY/SELL/HOLD decisions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print machine-readable JSON instead of a report
    #[arg(long, global = true)]
    pub json: bool,

    /// Decision rule: weighted or hard-threshold
    #[arg(long, global = true, env = "ANALYZER_DECISION_RULE")]
    pub rule: Option<DecisionRuleKind>,

    /// Explanation strategy: template or generative
    #[arg(long, global = true, env = "ANALYZER_EXPLANATION")]
    pub explanation: Option<ExplanationKind>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Log at info level instead of warn
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Full research pass for one company name or ticker
    Analyze {
        /// Company name or ticker, e.g. `tata motors` or `AAPL`
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        /// Company name used for the news query
        #[arg(long)]
        company: Option<String>,
    },

    /// Compare 2 to 4 stocks and pick the best performer
    Compare {
        #[arg(required = true, num_args = 1..)]
        names: Vec<String>,
    },

    /// Watchlist stocks moving more than 8% over the window
    Trending,

    /// Latest daily bar for a symbol
    Metrics { symbol: String },

    /// Closing price series for a symbol
    Chart {
        symbol: String,

        /// One of 1mo, 3mo, 6mo, 1y, 5y
        #[arg(long, default_value = "6mo")]
        period: String,
    },

    /// Recent headlines for a company with sentiment labels
    News {
        #[arg(required = true, num_args = 1..)]
        company: Vec<String>,
    },

    /// Resolve a name to a symbol without researching it
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
}

/// Joins unquoted multi-word arguments back into one name
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_accepts_multi_word_names() {
        let cli = Cli::try_parse_from(["analyzer", "analyze", "tata", "motors"]).unwrap();
        match cli.command {
            Command::Analyze { name, company } => {
                assert_eq!(join_words(&name), "tata motors");
                assert!(company.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_parse() {
        let cli = Cli::try_parse_from([
            "analyzer",
            "compare",
            "AAPL",
            "MSFT",
            "--json",
            "--rule",
            "hard-threshold",
            "--explanation",
            "generative",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.rule, Some(DecisionRuleKind::HardThreshold));
        assert_eq!(cli.explanation, Some(ExplanationKind::Generative));
    }

    #[test]
    fn test_unknown_rule_is_rejected() {
        let result = Cli::try_parse_from(["analyzer", "trending", "--rule", "coin-flip"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_chart_period_default() {
        let cli = Cli::try_parse_from(["analyzer", "chart", "AAPL"]).unwrap();
        match cli.command {
            Command::Chart { symbol, period } => {
                assert_eq!(symbol, "AAPL");
                assert_eq!(period, "6mo");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
