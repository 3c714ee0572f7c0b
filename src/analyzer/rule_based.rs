//! Deterministic rule-based analyzer.
//!
//! Tokens are Unicode word runs, optionally lowercased, with the longest
//! matching particle suffix removed. Phrases are contiguous token n-grams
//! that never cross clause punctuation.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::MorphologicalAnalyzer;
use crate::error::AnalysisError;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{N}_]+").unwrap());

static CLAUSE_BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[.!?,;:\n\r"'()\[\]{}“”‘’…·]+"#).unwrap()
});

/// Korean postpositional particles stripped from token ends.
const DEFAULT_SUFFIXES: &[&str] = &[
    "에서는", "으로는", "에게서", "에서", "에게", "으로", "까지", "부터", "처럼", "보다",
    "은", "는", "이", "가", "을", "를", "의", "에", "도", "와", "과", "로", "만",
];

/// Tuning knobs for [`RuleBasedAnalyzer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerOptions {
    /// Lowercase tokens before lemmatization.
    pub lowercase: bool,
    /// Longest phrase, in tokens. Values below 2 disable phrase extraction.
    pub max_phrase_tokens: usize,
    /// Minimum characters a token must keep after suffix stripping.
    pub min_stem_chars: usize,
    /// Suffixes removed from token ends; the longest match wins.
    pub suffixes: Vec<String>,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            lowercase: true,
            max_phrase_tokens: 3,
            min_stem_chars: 2,
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Stateless analyzer driven by [`AnalyzerOptions`].
#[derive(Debug, Clone)]
pub struct RuleBasedAnalyzer {
    options: AnalyzerOptions,
    /// Suffixes sorted longest first.
    suffixes: Vec<String>,
}

impl Default for RuleBasedAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerOptions::default())
    }
}

impl RuleBasedAnalyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        let mut suffixes: Vec<String> = options
            .suffixes
            .iter()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect();
        suffixes.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        suffixes.dedup();
        Self { options, suffixes }
    }

    /// Reduce a raw word to its lemma.
    fn lemmatize(&self, word: &str) -> String {
        let word = if self.options.lowercase {
            word.to_lowercase()
        } else {
            word.to_string()
        };

        let len = word.chars().count();
        for suffix in &self.suffixes {
            if let Some(stem) = word.strip_suffix(suffix.as_str()) {
                if len - suffix.chars().count() >= self.options.min_stem_chars {
                    return stem.to_string();
                }
            }
        }
        word
    }

    fn lemmas(&self, text: &str) -> Vec<String> {
        WORD_RE
            .find_iter(text)
            .map(|m| self.lemmatize(m.as_str()))
            .collect()
    }
}

/// Reject text the analyzer cannot handle.
fn check_text(text: &str) -> Result<(), AnalysisError> {
    for (position, ch) in text.chars().enumerate() {
        match ch {
            '\u{FFFD}' => return Err(AnalysisError::UnsupportedEncoding { position }),
            '\0' => return Err(AnalysisError::ControlCharacter { position }),
            _ => {}
        }
    }
    Ok(())
}

impl MorphologicalAnalyzer for RuleBasedAnalyzer {
    fn name(&self) -> &'static str {
        "rule-based"
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>, AnalysisError> {
        check_text(text)?;
        Ok(self.lemmas(text))
    }

    fn extract_phrases(&self, text: &str) -> Result<Vec<String>, AnalysisError> {
        check_text(text)?;

        let max = self.options.max_phrase_tokens;
        let mut seen = HashSet::new();
        let mut phrases = Vec::new();
        if max < 2 {
            return Ok(phrases);
        }

        for clause in CLAUSE_BREAK_RE.split(text) {
            let lemmas = self.lemmas(clause);
            for n in 2..=max.min(lemmas.len()) {
                for window in lemmas.windows(n) {
                    let phrase = window.join(" ");
                    if seen.insert(phrase.clone()) {
                        phrases.push(phrase);
                    }
                }
            }
        }

        Ok(phrases)
    }

    /// Case-fold like `tokenize`. Terms are not suffix-stripped: lexicon
    /// entries are expected to be lemmas already.
    fn normalize_term(&self, term: &str) -> String {
        if self.options.lowercase {
            term.to_lowercase()
        } else {
            term.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_strips_particles() {
        let analyzer = RuleBasedAnalyzer::default();
        let tokens = analyzer.tokenize("희망을 잃지 마라. 희망이 있다!").unwrap();
        assert_eq!(tokens, vec!["희망", "잃지", "마라", "희망", "있다"]);
    }

    #[test]
    fn test_short_words_keep_suffix() {
        let analyzer = RuleBasedAnalyzer::default();
        // Stripping "이" would leave a single character.
        assert_eq!(analyzer.tokenize("나이").unwrap(), vec!["나이"]);
    }

    #[test]
    fn test_longest_suffix_wins() {
        let analyzer = RuleBasedAnalyzer::default();
        assert_eq!(analyzer.tokenize("학교에서는").unwrap(), vec!["학교"]);
    }

    #[test]
    fn test_lowercase_option() {
        let analyzer = RuleBasedAnalyzer::default();
        assert_eq!(analyzer.tokenize("Trust ME").unwrap(), vec!["trust", "me"]);

        let analyzer = RuleBasedAnalyzer::new(AnalyzerOptions {
            lowercase: false,
            ..Default::default()
        });
        assert_eq!(analyzer.tokenize("Trust ME").unwrap(), vec!["Trust", "ME"]);
    }

    #[test]
    fn test_normalize_term_follows_lowercase_option() {
        let analyzer = RuleBasedAnalyzer::default();
        assert_eq!(analyzer.normalize_term("WHO"), "who");
        assert_eq!(analyzer.normalize_term("Nobel Prize"), "nobel prize");

        let analyzer = RuleBasedAnalyzer::new(AnalyzerOptions {
            lowercase: false,
            ..Default::default()
        });
        assert_eq!(analyzer.normalize_term("WHO"), "WHO");
    }

    #[test]
    fn test_digits_are_tokens() {
        let analyzer = RuleBasedAnalyzer::default();
        let tokens = analyzer.tokenize("Profits rose 12% in 2024!").unwrap();
        assert_eq!(tokens, vec!["profits", "rose", "12", "in", "2024"]);
    }

    #[test]
    fn test_phrases_stay_within_clauses() {
        let analyzer = RuleBasedAnalyzer::default();
        let phrases = analyzer.extract_phrases("국민 여러분, 경제 위기 극복").unwrap();
        assert_eq!(
            phrases,
            vec!["국민 여러분", "경제 위기", "위기 극복", "경제 위기 극복"]
        );
    }

    #[test]
    fn test_phrases_are_deduplicated() {
        let analyzer = RuleBasedAnalyzer::default();
        let phrases = analyzer.extract_phrases("경제 위기. 경제 위기.").unwrap();
        assert_eq!(phrases, vec!["경제 위기"]);
    }

    #[test]
    fn test_phrase_extraction_disabled() {
        let analyzer = RuleBasedAnalyzer::new(AnalyzerOptions {
            max_phrase_tokens: 1,
            ..Default::default()
        });
        assert!(analyzer.extract_phrases("경제 위기 극복").unwrap().is_empty());
    }

    #[test]
    fn test_replacement_char_is_encoding_error() {
        let analyzer = RuleBasedAnalyzer::default();
        assert_eq!(
            analyzer.analyze("ab\u{FFFD}c"),
            Err(AnalysisError::UnsupportedEncoding { position: 2 })
        );
    }

    #[test]
    fn test_nul_is_rejected() {
        let analyzer = RuleBasedAnalyzer::default();
        assert_eq!(
            analyzer.tokenize("a\0"),
            Err(AnalysisError::ControlCharacter { position: 1 })
        );
    }

    #[test]
    fn test_empty_text() {
        let analyzer = RuleBasedAnalyzer::default();
        let analyzed = analyzer.analyze("").unwrap();
        assert!(analyzed.tokens.is_empty());
        assert!(analyzed.phrases.is_empty());
    }
}
