//! Rhetorica - rhetorical appeal scoring.
//!
//! Rhetorica measures how strongly a document leans on the three classical
//! appeals: pathos (emotion), ethos (credibility) and logos (logic). Each
//! appeal combines lexicon matches with cheap surface signals and is
//! reported as a rate per 1000 characters.
//!
//! # Architecture
//!
//! - `analyzer`: tokenize/extract-phrases capability and a rule-based analyzer
//! - `lexicon`: appeal vocabularies
//! - `matcher`: lexicon membership over tokens and phrases
//! - `appeal`: per-appeal signal counting
//! - `score`: length normalization, result records and summaries
//! - `runner`: batch scoring with empty-document and analyzer-failure policies
//! - `documents`: TSV document loading
//! - `config`: YAML configuration
//! - `report`: output formatting (pretty, JSON, TSV)
//!
//! # Plugging in another analyzer
//!
//! Implement [`MorphologicalAnalyzer`] and pass it to [`Runner::new`]. The
//! scorers only see its tokens and phrases.

pub mod analyzer;
pub mod appeal;
pub mod cli;
pub mod config;
pub mod documents;
pub mod error;
pub mod lexicon;
pub mod matcher;
pub mod report;
pub mod runner;
pub mod score;

pub use analyzer::{AnalyzedText, AnalyzerOptions, MorphologicalAnalyzer, RuleBasedAnalyzer};
pub use appeal::{EthosSignals, LogosSignals, PathosSignals, QuotationPolicy};
pub use config::Config;
pub use documents::Document;
pub use error::{AnalysisError, LoadError, ScoreError};
pub use lexicon::{Appeal, Lexicon, LexiconSet};
pub use matcher::{match_terms, TermMatches};
pub use runner::{AnalysisErrorPolicy, EmptyDocumentPolicy, Runner};
pub use score::{normalize, DocumentResult, ResultTable, Summary};
