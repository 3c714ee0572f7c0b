//! Appeal vocabularies.
//!
//! Each appeal has its own lexicon file with one term per line. Only the
//! first tab-separated field of a line is used, surrounding whitespace is
//! trimmed and blank lines are skipped. A missing file is not an error: the
//! lexicon is simply empty and scoring falls back to the surface heuristics.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analyzer::MorphologicalAnalyzer;
use crate::error::LoadError;

/// The three rhetorical appeals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appeal {
    Pathos,
    Ethos,
    Logos,
}

impl Appeal {
    pub const ALL: [Appeal; 3] = [Appeal::Pathos, Appeal::Ethos, Appeal::Logos];

    pub fn as_str(&self) -> &'static str {
        match self {
            Appeal::Pathos => "pathos",
            Appeal::Ethos => "ethos",
            Appeal::Logos => "logos",
        }
    }

    /// Conventional lexicon file name for this appeal.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Appeal::Pathos => "pathos.txt",
            Appeal::Ethos => "ethos.txt",
            Appeal::Logos => "logos.txt",
        }
    }
}

impl std::fmt::Display for Appeal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable set of vocabulary terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    terms: HashSet<String>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse lexicon content, one term per line.
    pub fn parse(content: &str) -> Self {
        let terms = content
            .lines()
            .filter_map(|line| {
                let term = line.split('\t').next().unwrap_or("").trim();
                if term.is_empty() {
                    None
                } else {
                    Some(term.to_string())
                }
            })
            .collect();
        Self { terms }
    }

    /// Load a lexicon file. A missing file yields an empty lexicon.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let lexicon = Self::parse(&content);
                if lexicon.is_empty() {
                    tracing::warn!(path = %path.display(), "lexicon file has no terms");
                } else {
                    tracing::debug!(
                        path = %path.display(),
                        terms = lexicon.len(),
                        "loaded lexicon"
                    );
                }
                Ok(lexicon)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    path = %path.display(),
                    "lexicon file not found, using empty lexicon"
                );
                Ok(Self::new())
            }
            Err(source) => Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Rewrite every term with `normalize`. Terms that normalize to the
    /// same string collapse into one.
    pub fn normalized<F: Fn(&str) -> String>(&self, normalize: F) -> Self {
        self.terms.iter().map(|term| normalize(term.as_str())).collect()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Lexicon {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let terms = iter
            .into_iter()
            .filter_map(|s| {
                let s: String = s.into();
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect();
        Self { terms }
    }
}

/// The pathos, ethos and logos lexicons used for one run.
#[derive(Debug, Clone, Default)]
pub struct LexiconSet {
    pub pathos: Lexicon,
    pub ethos: Lexicon,
    pub logos: Lexicon,
}

impl LexiconSet {
    /// Load all three lexicons from explicit paths.
    pub fn load(pathos: &Path, ethos: &Path, logos: &Path) -> Result<Self, LoadError> {
        Ok(Self {
            pathos: Lexicon::load(pathos)?,
            ethos: Lexicon::load(ethos)?,
            logos: Lexicon::load(logos)?,
        })
    }

    /// Normalize all three lexicons the way `analyzer` normalizes tokens.
    pub fn normalized(&self, analyzer: &dyn MorphologicalAnalyzer) -> Self {
        let normalize = |term: &str| analyzer.normalize_term(term);
        Self {
            pathos: self.pathos.normalized(normalize),
            ethos: self.ethos.normalized(normalize),
            logos: self.logos.normalized(normalize),
        }
    }

    pub fn get(&self, appeal: Appeal) -> &Lexicon {
        match appeal {
            Appeal::Pathos => &self.pathos,
            Appeal::Ethos => &self.ethos,
            Appeal::Logos => &self.logos,
        }
    }
}
