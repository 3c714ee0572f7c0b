//! The morphological analyzer capability consumed by the scoring core.

use crate::error::AnalysisError;

/// Tokens and phrases derived from one document.
///
/// Produced fresh for every document and dropped once its three appeals
/// have been scored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzedText {
    /// Lemmatized tokens in document order.
    pub tokens: Vec<String>,
    /// Extracted multi-token phrases in document order.
    pub phrases: Vec<String>,
}

/// Text analyzer trait.
///
/// Any tagger (rule-based, statistical, external process) can sit behind
/// this interface without affecting the scorers.
///
/// # Thread Safety
///
/// The batch runner shares one analyzer across rayon workers, so
/// implementations must be `Send + Sync`. A tagger holding mutable state
/// must guard it internally (e.g. a `Mutex` or one instance per thread).
pub trait MorphologicalAnalyzer: Send + Sync {
    /// Returns a short identifier for logs and reports.
    fn name(&self) -> &'static str;

    /// Split text into lemmatized tokens.
    fn tokenize(&self, text: &str) -> Result<Vec<String>, AnalysisError>;

    /// Extract multi-word phrases from text.
    fn extract_phrases(&self, text: &str) -> Result<Vec<String>, AnalysisError>;

    /// Bring a lexicon term into the form `tokenize` produces.
    ///
    /// Lexicons are normalized with this before matching, so a term and a
    /// token for the same word compare equal. The default keeps the term.
    fn normalize_term(&self, term: &str) -> String {
        term.to_string()
    }

    /// Run both operations.
    fn analyze(&self, text: &str) -> Result<AnalyzedText, AnalysisError> {
        Ok(AnalyzedText {
            tokens: self.tokenize(text)?,
            phrases: self.extract_phrases(text)?,
        })
    }
}
