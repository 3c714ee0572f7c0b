//! Batch runner that scores a collection of documents.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analyzer::MorphologicalAnalyzer;
use crate::appeal::{score_ethos, score_logos, score_pathos, QuotationPolicy};
use crate::documents::Document;
use crate::error::ScoreError;
use crate::lexicon::{Appeal, LexiconSet};
use crate::score::{DocumentResult, ResultTable, SkippedDocument};

/// What to do with a document whose content is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyDocumentPolicy {
    /// Keep the row with all scores set to zero.
    #[default]
    Zero,
    /// Leave the row out and record it as skipped.
    Skip,
    /// Abort the run.
    Error,
}

impl std::str::FromStr for EmptyDocumentPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zero" => Ok(EmptyDocumentPolicy::Zero),
            "skip" => Ok(EmptyDocumentPolicy::Skip),
            "error" => Ok(EmptyDocumentPolicy::Error),
            _ => Err(format!(
                "unknown empty document policy {:?}, must be 'zero', 'skip' or 'error'",
                s
            )),
        }
    }
}

/// What to do when the analyzer rejects a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisErrorPolicy {
    /// Abort the run with the first failing document, in input order.
    #[default]
    Abort,
    /// Leave the row out and record it as skipped.
    Skip,
}

impl std::str::FromStr for AnalysisErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(AnalysisErrorPolicy::Abort),
            "skip" => Ok(AnalysisErrorPolicy::Skip),
            _ => Err(format!(
                "unknown analysis error policy {:?}, must be 'abort' or 'skip'",
                s
            )),
        }
    }
}

enum Outcome {
    Scored(DocumentResult),
    Skipped(SkippedDocument),
    Failed(ScoreError),
}

/// Scores documents against a lexicon set.
pub struct Runner<'a> {
    analyzer: &'a dyn MorphologicalAnalyzer,
    lexicons: &'a LexiconSet,
    empty_document: EmptyDocumentPolicy,
    analysis_error: AnalysisErrorPolicy,
    quotation: QuotationPolicy,
    parallel: bool,
    progress: bool,
}

impl<'a> Runner<'a> {
    /// Create a runner with default policies.
    pub fn new(analyzer: &'a dyn MorphologicalAnalyzer, lexicons: &'a LexiconSet) -> Self {
        Self {
            analyzer,
            lexicons,
            empty_document: EmptyDocumentPolicy::default(),
            analysis_error: AnalysisErrorPolicy::default(),
            quotation: QuotationPolicy::default(),
            parallel: true,
            progress: false,
        }
    }

    pub fn empty_document(mut self, policy: EmptyDocumentPolicy) -> Self {
        self.empty_document = policy;
        self
    }

    pub fn analysis_error(mut self, policy: AnalysisErrorPolicy) -> Self {
        self.analysis_error = policy;
        self
    }

    pub fn quotation(mut self, policy: QuotationPolicy) -> Self {
        self.quotation = policy;
        self
    }

    /// Set whether documents are scored on the rayon thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set whether a progress bar is drawn on stderr.
    pub fn progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Score every document, preserving input order.
    ///
    /// Lexicon terms are normalized with the analyzer's term normalization
    /// once per run, before any document is matched.
    pub fn run(&self, documents: &[Document]) -> Result<ResultTable, ScoreError> {
        let lexicons = self.lexicons.normalized(self.analyzer);
        for appeal in Appeal::ALL {
            tracing::debug!(%appeal, terms = lexicons.get(appeal).len(), "lexicon ready");
        }

        let bar = self.progress_bar(documents.len());

        let score = |(index, doc): (usize, &Document)| {
            let outcome = self.score_document(index, doc, &lexicons);
            bar.inc(1);
            outcome
        };

        let outcomes: Vec<Outcome> = if self.parallel {
            documents.par_iter().enumerate().map(score).collect()
        } else {
            documents.iter().enumerate().map(score).collect()
        };
        bar.finish_and_clear();

        let mut table = ResultTable::new();
        for outcome in outcomes {
            match outcome {
                Outcome::Scored(row) => table.rows.push(row),
                Outcome::Skipped(skipped) => table.skipped.push(skipped),
                Outcome::Failed(err) => return Err(err),
            }
        }

        tracing::info!(
            analyzer = self.analyzer.name(),
            scored = table.rows.len(),
            skipped = table.skipped.len(),
            "scored documents"
        );
        Ok(table)
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }
        let style = ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} documents")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        ProgressBar::new(len as u64).with_style(style)
    }

    /// Run the full pipeline for one document.
    fn score_document(&self, index: usize, doc: &Document, lexicons: &LexiconSet) -> Outcome {
        let text = doc.content.as_str();
        let text_length = text.chars().count();

        if text_length == 0 {
            match self.empty_document {
                EmptyDocumentPolicy::Zero => {}
                EmptyDocumentPolicy::Skip => {
                    tracing::warn!(index, title = %doc.title, "skipping empty document");
                    return Outcome::Skipped(SkippedDocument {
                        index,
                        title: doc.title.clone(),
                        reason: "empty content".to_string(),
                    });
                }
                EmptyDocumentPolicy::Error => {
                    return Outcome::Failed(ScoreError::DegenerateDocument {
                        index,
                        title: doc.title.clone(),
                    });
                }
            }
        }

        let analyzed = match self.analyzer.analyze(text) {
            Ok(analyzed) => analyzed,
            Err(source) => {
                return match self.analysis_error {
                    AnalysisErrorPolicy::Abort => Outcome::Failed(ScoreError::Analysis {
                        index,
                        title: doc.title.clone(),
                        source,
                    }),
                    AnalysisErrorPolicy::Skip => {
                        tracing::warn!(
                            index,
                            title = %doc.title,
                            error = %source,
                            "skipping document"
                        );
                        Outcome::Skipped(SkippedDocument {
                            index,
                            title: doc.title.clone(),
                            reason: source.to_string(),
                        })
                    }
                };
            }
        };

        let pathos = score_pathos(text, &analyzed, lexicons.get(Appeal::Pathos));
        let ethos = score_ethos(text, &analyzed, lexicons.get(Appeal::Ethos), self.quotation);
        let logos = score_logos(text, &analyzed, lexicons.get(Appeal::Logos));

        tracing::debug!(
            index,
            title = %doc.title,
            tokens = analyzed.tokens.len(),
            phrases = analyzed.phrases.len(),
            pathos = pathos.total,
            ethos = ethos.total,
            logos = logos.total,
            "scored document"
        );

        Outcome::Scored(DocumentResult::new(
            doc.title.clone(),
            doc.label.clone(),
            text_length,
            pathos,
            ethos,
            logos,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AnalyzerOptions, RuleBasedAnalyzer};
    use crate::error::AnalysisError;
    use crate::lexicon::Lexicon;

    fn lexicons() -> LexiconSet {
        LexiconSet {
            pathos: ["희망", "분노"].into_iter().collect(),
            ethos: ["전문가", "교수"].into_iter().collect(),
            logos: ["통계", "따라서"].into_iter().collect(),
        }
    }

    fn documents() -> Vec<Document> {
        vec![
            Document::new("a", "희망이 있다! 분노하라?", "fake"),
            Document::new("b", r#"전문가는 "통계 결과 12% 증가"라고 했다"#, "real"),
            Document::new("c", "아무 일도 없었다", "real"),
        ]
    }

    #[test]
    fn test_run_preserves_order_and_count() {
        let analyzer = RuleBasedAnalyzer::default();
        let lexicons = lexicons();
        let docs = documents();

        let table = Runner::new(&analyzer, &lexicons).run(&docs).unwrap();

        assert_eq!(table.len(), docs.len());
        let titles: Vec<_> = table.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);

        let a = &table.rows[0];
        assert_eq!(a.pathos.words, 1);
        assert_eq!(a.pathos.exclamation, 1);
        assert_eq!(a.pathos.question, 1);
        assert_eq!(a.text_length, "희망이 있다! 분노하라?".chars().count());

        let b = &table.rows[1];
        assert_eq!(b.ethos.words, 1);
        assert_eq!(b.ethos.quotation, 1.0);
        assert_eq!(b.logos.words, 1);
        assert_eq!(b.logos.number, 1);
        assert_eq!(b.logos.percent, 1);

        let c = &table.rows[2];
        assert_eq!(c.pathos_score, 0.0);
        assert_eq!(c.ethos_score, 0.0);
        assert_eq!(c.logos_score, 0.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let analyzer = RuleBasedAnalyzer::default();
        let lexicons = lexicons();
        let docs = documents();

        let parallel = Runner::new(&analyzer, &lexicons).run(&docs).unwrap();
        let sequential = Runner::new(&analyzer, &lexicons)
            .parallel(false)
            .run(&docs)
            .unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_empty_document_policies() {
        let analyzer = RuleBasedAnalyzer::default();
        let lexicons = LexiconSet::default();
        let docs = vec![
            Document::new("full", "내용", "x"),
            Document::new("empty", "", "x"),
        ];

        let table = Runner::new(&analyzer, &lexicons).run(&docs).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].text_length, 0);
        assert_eq!(table.rows[1].pathos_score, 0.0);
        assert_eq!(table.rows[1].ethos_score, 0.0);
        assert_eq!(table.rows[1].logos_score, 0.0);

        let table = Runner::new(&analyzer, &lexicons)
            .empty_document(EmptyDocumentPolicy::Skip)
            .run(&docs)
            .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.skipped.len(), 1);
        assert_eq!(table.skipped[0].index, 1);
        assert_eq!(table.documents(), 2);

        let err = Runner::new(&analyzer, &lexicons)
            .empty_document(EmptyDocumentPolicy::Error)
            .run(&docs)
            .unwrap_err();
        assert!(matches!(err, ScoreError::DegenerateDocument { index: 1, .. }));
    }

    #[test]
    fn test_analysis_error_policies() {
        let analyzer = RuleBasedAnalyzer::default();
        let lexicons = LexiconSet::default();
        let docs = vec![
            Document::new("ok", "괜찮다", "x"),
            Document::new("bad", "깨진\u{FFFD}글자", "x"),
            Document::new("worse", "널\0문자", "x"),
        ];

        let err = Runner::new(&analyzer, &lexicons).run(&docs).unwrap_err();
        match err {
            ScoreError::Analysis { index, source, .. } => {
                assert_eq!(index, 1);
                assert_eq!(source, AnalysisError::UnsupportedEncoding { position: 2 });
            }
            other => panic!("unexpected error: {other}"),
        }

        let table = Runner::new(&analyzer, &lexicons)
            .analysis_error(AnalysisErrorPolicy::Skip)
            .run(&docs)
            .unwrap();
        assert_eq!(table.len(), 1);
        let skipped: Vec<_> = table.skipped.iter().map(|s| s.index).collect();
        assert_eq!(skipped, vec![1, 2]);
    }

    #[test]
    fn test_quotation_policy_applies() {
        let analyzer = RuleBasedAnalyzer::default();
        let lexicons = LexiconSet {
            ethos: Lexicon::new(),
            ..LexiconSet::default()
        };
        let docs = vec![Document::new("q", r#"그가 "말했다"#, "x")];

        let table = Runner::new(&analyzer, &lexicons)
            .quotation(QuotationPolicy::Floor)
            .run(&docs)
            .unwrap();
        assert_eq!(table.rows[0].ethos.quotation, 0.0);
    }

    #[test]
    fn test_mixed_case_lexicon_terms_match() {
        let analyzer = RuleBasedAnalyzer::default();
        let lexicons = LexiconSet {
            ethos: ["Professor"].into_iter().collect(),
            logos: ["Therefore"].into_iter().collect(),
            ..LexiconSet::default()
        };
        let docs = vec![Document::new("en", "Professor Kim said so. THEREFORE it holds", "x")];

        let table = Runner::new(&analyzer, &lexicons).run(&docs).unwrap();
        assert_eq!(table.rows[0].ethos.words, 1);
        assert_eq!(table.rows[0].logos.words, 1);

        let case_sensitive = RuleBasedAnalyzer::new(AnalyzerOptions {
            lowercase: false,
            ..Default::default()
        });
        let table = Runner::new(&case_sensitive, &lexicons).run(&docs).unwrap();
        assert_eq!(table.rows[0].ethos.words, 1);
        assert_eq!(table.rows[0].logos.words, 0);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("SKIP".parse::<EmptyDocumentPolicy>(), Ok(EmptyDocumentPolicy::Skip));
        assert!("drop".parse::<EmptyDocumentPolicy>().is_err());
        assert_eq!("abort".parse::<AnalysisErrorPolicy>(), Ok(AnalysisErrorPolicy::Abort));
    }
}
