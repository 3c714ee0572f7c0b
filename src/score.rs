//! Length normalization and result records.
//!
//! Raw appeal totals are converted to a rate per 1000 characters so that
//! documents of different lengths can be compared.

use serde::{Deserialize, Serialize};

use crate::appeal::{AppealSignals, EthosSignals, LogosSignals, PathosSignals};

/// Normalization basis, in characters.
pub const PER_CHARS: f64 = 1000.0;

/// Convert a raw total into a rate per [`PER_CHARS`] characters.
///
/// Returns `None` for empty text, where the rate is undefined.
pub fn normalize(total: f64, text_length: usize) -> Option<f64> {
    if text_length == 0 {
        return None;
    }
    Some(total / text_length as f64 * PER_CHARS)
}

fn rate(signals: &dyn AppealSignals, text_length: usize) -> f64 {
    normalize(signals.total_value(), text_length).unwrap_or(0.0)
}

/// Scoring outcome for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    pub title: String,
    pub label: String,
    /// Character count of the raw content.
    pub text_length: usize,
    pub pathos_score: f64,
    pub ethos_score: f64,
    pub logos_score: f64,
    #[serde(flatten)]
    pub pathos: PathosSignals,
    #[serde(flatten)]
    pub ethos: EthosSignals,
    #[serde(flatten)]
    pub logos: LogosSignals,
}

impl DocumentResult {
    /// Build a record, normalizing each appeal total by `text_length`.
    ///
    /// Empty text gets zero scores; callers that want another policy check
    /// `text_length` first.
    pub fn new(
        title: String,
        label: String,
        text_length: usize,
        pathos: PathosSignals,
        ethos: EthosSignals,
        logos: LogosSignals,
    ) -> Self {
        Self {
            pathos_score: rate(&pathos, text_length),
            ethos_score: rate(&ethos, text_length),
            logos_score: rate(&logos, text_length),
            title,
            label,
            text_length,
            pathos,
            ethos,
            logos,
        }
    }
}

/// A document left out of the table and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDocument {
    /// Position in the input collection.
    pub index: usize,
    pub title: String,
    pub reason: String,
}

/// Results of a batch run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    pub rows: Vec<DocumentResult>,
    #[serde(default)]
    pub skipped: Vec<SkippedDocument>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of input documents the table accounts for.
    pub fn documents(&self) -> usize {
        self.rows.len() + self.skipped.len()
    }
}

/// Mean normalized scores over a group of rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreMeans {
    pub documents: usize,
    pub pathos: f64,
    pub ethos: f64,
    pub logos: f64,
}

impl ScoreMeans {
    fn from_rows<'a>(rows: impl IntoIterator<Item = &'a DocumentResult>) -> Self {
        let mut means = ScoreMeans::default();
        for row in rows {
            means.documents += 1;
            means.pathos += row.pathos_score;
            means.ethos += row.ethos_score;
            means.logos += row.logos_score;
        }
        if means.documents > 0 {
            let n = means.documents as f64;
            means.pathos /= n;
            means.ethos /= n;
            means.logos /= n;
        }
        means
    }
}

/// Mean scores for one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSummary {
    pub label: String,
    #[serde(flatten)]
    pub means: ScoreMeans,
}

/// Overall and per-label averages of a result table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub overall: ScoreMeans,
    /// Labels in first-appearance order.
    pub by_label: Vec<LabelSummary>,
}

/// Average the normalized scores of a table, overall and per label.
pub fn summarize(table: &ResultTable) -> Summary {
    let mut labels: Vec<&str> = Vec::new();
    for row in &table.rows {
        if !labels.contains(&row.label.as_str()) {
            labels.push(&row.label);
        }
    }

    let by_label = labels
        .into_iter()
        .map(|label| LabelSummary {
            label: label.to_string(),
            means: ScoreMeans::from_rows(table.rows.iter().filter(|r| r.label == label)),
        })
        .collect();

    Summary {
        overall: ScoreMeans::from_rows(&table.rows),
        by_label,
    }
}
