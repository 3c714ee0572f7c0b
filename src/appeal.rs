//! Per-appeal signal counting.
//!
//! Each scorer matches the document against its own lexicon and adds
//! appeal-specific surface heuristics:
//!
//! - pathos: emphatic punctuation (`!`, `?`)
//! - ethos: quotation marks, as quoted-attribution spans
//! - logos: digit runs and percent signs

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analyzer::AnalyzedText;
use crate::lexicon::Lexicon;
use crate::matcher::match_terms;

static DIGIT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// How an odd number of quotation marks is turned into a span count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotationPolicy {
    /// Marks divided by two, fractional when odd.
    #[default]
    Half,
    /// Unmatched mark ignored.
    Floor,
    /// Unmatched mark counted as a full span.
    Ceil,
}

impl std::str::FromStr for QuotationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "half" => Ok(QuotationPolicy::Half),
            "floor" => Ok(QuotationPolicy::Floor),
            "ceil" => Ok(QuotationPolicy::Ceil),
            _ => Err(format!(
                "unknown quotation policy {:?}, must be 'half', 'floor' or 'ceil'",
                s
            )),
        }
    }
}

impl QuotationPolicy {
    pub fn spans(&self, marks: usize) -> f64 {
        match self {
            QuotationPolicy::Half => marks as f64 / 2.0,
            QuotationPolicy::Floor => (marks / 2) as f64,
            QuotationPolicy::Ceil => marks.div_ceil(2) as f64,
        }
    }
}

/// Common view over the three signal records.
pub trait AppealSignals {
    /// Composite total used for normalization.
    fn total_value(&self) -> f64;
}

/// Emotional appeal signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathosSignals {
    #[serde(rename = "pathos_words")]
    pub words: usize,
    pub exclamation: usize,
    pub question: usize,
    #[serde(rename = "total_pathos")]
    pub total: usize,
}

/// Credibility appeal signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EthosSignals {
    #[serde(rename = "ethos_words")]
    pub words: usize,
    pub quotation: f64,
    #[serde(rename = "total_ethos")]
    pub total: f64,
}

/// Logical appeal signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogosSignals {
    #[serde(rename = "logos_words")]
    pub words: usize,
    pub number: usize,
    pub percent: usize,
    #[serde(rename = "total_logos")]
    pub total: usize,
}

impl AppealSignals for PathosSignals {
    fn total_value(&self) -> f64 {
        self.total as f64
    }
}

impl AppealSignals for EthosSignals {
    fn total_value(&self) -> f64 {
        self.total
    }
}

impl AppealSignals for LogosSignals {
    fn total_value(&self) -> f64 {
        self.total as f64
    }
}

fn count_char(text: &str, c: char) -> usize {
    text.chars().filter(|&ch| ch == c).count()
}

fn matched_words(analyzed: &AnalyzedText, lexicon: &Lexicon) -> usize {
    match_terms(&analyzed.tokens, &analyzed.phrases, lexicon).count()
}

/// Score the emotional appeal of a document.
pub fn score_pathos(text: &str, analyzed: &AnalyzedText, lexicon: &Lexicon) -> PathosSignals {
    let words = matched_words(analyzed, lexicon);
    let exclamation = count_char(text, '!');
    let question = count_char(text, '?');

    PathosSignals {
        words,
        exclamation,
        question,
        total: words + exclamation + question,
    }
}

/// Score the credibility appeal of a document.
pub fn score_ethos(
    text: &str,
    analyzed: &AnalyzedText,
    lexicon: &Lexicon,
    policy: QuotationPolicy,
) -> EthosSignals {
    let words = matched_words(analyzed, lexicon);
    let marks = count_char(text, '"');
    if marks % 2 == 1 {
        tracing::debug!(marks, ?policy, "odd number of quotation marks");
    }
    let quotation = policy.spans(marks);

    EthosSignals {
        words,
        quotation,
        total: words as f64 + quotation,
    }
}

/// Score the logical appeal of a document.
pub fn score_logos(text: &str, analyzed: &AnalyzedText, lexicon: &Lexicon) -> LogosSignals {
    let words = matched_words(analyzed, lexicon);
    let number = DIGIT_RUN_RE.find_iter(text).count();
    let percent = count_char(text, '%');

    LogosSignals {
        words,
        number,
        percent,
        total: words + number + percent,
    }
}
