//! Typed errors for loading, analysis and scoring.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading lexicon or document files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: malformed record, expected 3 tab-separated fields but found {fields}")]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        fields: usize,
    },

    #[error("walking {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Errors raised by a morphological analyzer for a single document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("text contains undecodable bytes (U+FFFD at char {position})")]
    UnsupportedEncoding { position: usize },

    #[error("text contains a NUL control character at char {position}")]
    ControlCharacter { position: usize },

    #[error("analyzer failed: {0}")]
    Other(String),
}

/// Errors that abort a batch run.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("document #{index} ({title:?}): {source}")]
    Analysis {
        index: usize,
        title: String,
        #[source]
        source: AnalysisError,
    },

    #[error("document #{index} ({title:?}) has empty content; scores are undefined")]
    DegenerateDocument { index: usize, title: String },
}
