//! Rule-based polarity scoring over a financial word list

use super::SentimentScorer;
use std::collections::HashMap;
use std::sync::LazyLock;

const WORD_SCORES: &[(&str, f64)] = &[
    // Positive
    ("bullish", 0.8),
    ("surge", 0.7),
    ("surges", 0.7),
    ("rally", 0.7),
    ("soar", 0.8),
    ("gain", 0.5),
    ("profit", 0.6),
    ("profitable", 0.6),
    ("growth", 0.6),
    ("grow", 0.5),
    ("rise", 0.5),
    ("increase", 0.5),
    ("improve", 0.5),
    ("outperform", 0.7),
    ("beat", 0.6),
    ("exceed", 0.6),
    ("strong", 0.5),
    ("positive", 0.5),
    ("optimistic", 0.6),
    ("confident", 0.5),
    ("record", 0.6),
    ("high", 0.4),
    ("upgrade", 0.6),
    ("buy", 0.5),
    ("breakout", 0.6),
    ("momentum", 0.4),
    ("recovery", 0.5),
    ("rebound", 0.5),
    ("win", 0.5),
    ("success", 0.6),
    ("successful", 0.6),
    ("innovative", 0.5),
    ("expand", 0.4),
    ("expansion", 0.4),
    ("dividend", 0.3),
    ("good", 0.4),
    ("great", 0.6),
    ("excellent", 0.8),
    // Negative
    ("bearish", -0.8),
    ("crash", -0.9),
    ("plunge", -0.8),
    ("drop", -0.6),
    ("fall", -0.5),
    ("decline", -0.6),
    ("loss", -0.6),
    ("losses", -0.6),
    ("down", -0.4),
    ("decrease", -0.5),
    ("weak", -0.5),
    ("negative", -0.5),
    ("pessimistic", -0.6),
    ("concern", -0.5),
    ("worry", -0.5),
    ("fear", -0.6),
    ("risk", -0.4),
    ("volatile", -0.3),
    ("uncertainty", -0.5),
    ("miss", -0.6),
    ("disappoint", -0.7),
    ("underperform", -0.6),
    ("downgrade", -0.6),
    ("sell", -0.5),
    ("slump", -0.7),
    ("correction", -0.4),
    ("crisis", -0.8),
    ("warning", -0.5),
    ("trouble", -0.6),
    ("problem", -0.5),
    ("fail", -0.7),
    ("lawsuit", -0.6),
    ("probe", -0.4),
    ("layoff", -0.6),
    ("recall", -0.5),
    ("fraud", -0.9),
    ("bad", -0.4),
    ("poor", -0.5),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nobody", "nothing", "none", "cannot", "cant", "don't",
    "dont", "doesn't", "doesnt", "didn't", "didnt", "won't", "wont", "isn't", "isnt", "aren't",
    "arent", "wasn't", "wasnt", "hardly", "barely",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.5),
    ("extremely", 2.0),
    ("highly", 1.5),
    ("significantly", 1.5),
    ("sharply", 1.5),
    ("dramatically", 1.8),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("marginally", 0.5),
];

/// Inflections tried, in order, when a word has no direct entry
const SUFFIXES: &[&str] = &["ing", "ed", "es", "s", "d"];

static WORDS: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| WORD_SCORES.iter().copied().collect());

static INTENSITY: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| INTENSIFIERS.iter().copied().collect());

/// Financial lexicon scorer with negation and intensifier handling
///
/// A negation flips the sign of the next scored word; an intensifier scales
/// it. The text score is the mean of matched word scores clamped to
/// `[-1, 1]`, or `0.0` when nothing matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }

    fn word_score(word: &str) -> Option<f64> {
        if let Some(score) = WORDS.get(word) {
            return Some(*score);
        }
        SUFFIXES.iter().find_map(|suffix| {
            word.strip_suffix(suffix)
                .filter(|stem| stem.len() > 2)
                .and_then(|stem| WORDS.get(stem).copied())
        })
    }
}

impl SentimentScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let mut scores = Vec::new();
        let mut negate_next = false;
        let mut intensity = 1.0;

        for raw in text.split_whitespace() {
            let word = raw
                .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase();
            if word.is_empty() {
                continue;
            }

            if NEGATIONS.contains(&word.as_str()) {
                negate_next = true;
                continue;
            }

            if let Some(multiplier) = INTENSITY.get(word.as_str()) {
                intensity = *multiplier;
                continue;
            }

            if let Some(mut score) = Self::word_score(&word) {
                if negate_next {
                    score = -score;
                    negate_next = false;
                }
                scores.push(score * intensity);
                intensity = 1.0;
            }
        }

        if scores.is_empty() {
            return 0.0;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}
