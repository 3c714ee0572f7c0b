//! Configuration file schema for rhetorica.
//!
//! A configuration names the document source, the three lexicon files, the
//! analyzer settings and the scoring policies. Every field is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyzer::AnalyzerOptions;
use crate::appeal::QuotationPolicy;
use crate::lexicon::Appeal;
use crate::runner::{AnalysisErrorPolicy, EmptyDocumentPolicy};

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["rhetorica.yaml", ".rhetorica.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub name: String,
    /// Document TSV file or directory (default: texts.tsv)
    #[serde(default)]
    pub documents: Option<PathBuf>,
    #[serde(default)]
    pub lexicons: LexiconPaths,
    /// Glob patterns for document files to skip when loading a directory
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    #[serde(default)]
    pub analyzer: AnalyzerOptions,
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Score documents in parallel (default: true)
    #[serde(default)]
    pub parallel: Option<bool>,
    /// Directory the file was loaded from; relative paths resolve against it.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Config {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() || self.base_dir.as_os_str().is_empty() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Returns the document source.
    ///
    /// A configured path resolves against the config file's directory. The
    /// "texts.tsv" default always means the working directory, also when the
    /// config came from the user configuration directory.
    pub fn documents_path(&self) -> PathBuf {
        match &self.documents {
            Some(path) => self.resolve(path),
            None => PathBuf::from("texts.tsv"),
        }
    }

    /// Returns the lexicon file for an appeal.
    pub fn lexicon_path(&self, appeal: Appeal) -> PathBuf {
        let configured = match appeal {
            Appeal::Pathos => &self.lexicons.pathos,
            Appeal::Ethos => &self.lexicons.ethos,
            Appeal::Logos => &self.lexicons.logos,
        };
        let path = configured
            .clone()
            .unwrap_or_else(|| self.lexicons_dir().join(appeal.default_file_name()));
        self.resolve(&path)
    }

    fn lexicons_dir(&self) -> PathBuf {
        self.lexicons.dir.clone().unwrap_or_default()
    }

    /// Returns whether to score in parallel (defaults to true).
    pub fn is_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }
}

/// Lexicon file locations.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LexiconPaths {
    /// Directory holding pathos.txt, ethos.txt and logos.txt
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub pathos: Option<PathBuf>,
    #[serde(default)]
    pub ethos: Option<PathBuf>,
    #[serde(default)]
    pub logos: Option<PathBuf>,
}

/// Scoring policies.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ScoringConfig {
    #[serde(default)]
    pub empty_document: EmptyDocumentPolicy,
    #[serde(default)]
    pub analysis_error: AnalysisErrorPolicy,
    #[serde(default)]
    pub quotation: QuotationPolicy,
}

/// Find a configuration file in the working directory, then in the user
/// configuration directory.
pub fn discover() -> Option<PathBuf> {
    for name in DEFAULT_CONFIG_NAMES {
        let path = PathBuf::from(name);
        if path.exists() {
            return Some(path);
        }
    }

    let dirs = directories::ProjectDirs::from("", "", "rhetorica")?;
    let path = dirs.config_dir().join("config.yaml");
    path.exists().then_some(path)
}

/// Validate a configuration for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    for pattern in &config.excluded_paths {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }

    for suffix in &config.analyzer.suffixes {
        if suffix.trim().is_empty() {
            anyhow::bail!("analyzer suffixes must not be empty");
        }
    }

    if config.analyzer.min_stem_chars == 0 {
        anyhow::bail!("analyzer min_stem_chars must be at least 1");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
version: "1.0"
name: "Test Config"
documents: texts.tsv
lexicons:
  dir: dict
  logos: custom/logos.txt
analyzer:
  max_phrase_tokens: 2
scoring:
  empty_document: skip
  analysis_error: skip
  quotation: floor
parallel: false
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.name, "Test Config");
        assert_eq!(config.analyzer.max_phrase_tokens, 2);
        assert!(config.analyzer.lowercase);
        assert_eq!(config.scoring.empty_document, EmptyDocumentPolicy::Skip);
        assert_eq!(config.scoring.analysis_error, AnalysisErrorPolicy::Skip);
        assert_eq!(config.scoring.quotation, QuotationPolicy::Floor);
        assert!(!config.is_parallel());
        assert_eq!(
            config.lexicon_path(Appeal::Pathos),
            PathBuf::from("dict/pathos.txt")
        );
        assert_eq!(
            config.lexicon_path(Appeal::Logos),
            PathBuf::from("custom/logos.txt")
        );
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.documents_path(), PathBuf::from("texts.tsv"));
        assert_eq!(config.lexicon_path(Appeal::Ethos), PathBuf::from("ethos.txt"));
        assert_eq!(config.scoring.empty_document, EmptyDocumentPolicy::Zero);
        assert_eq!(config.scoring.analysis_error, AnalysisErrorPolicy::Abort);
        assert_eq!(config.scoring.quotation, QuotationPolicy::Half);
        assert!(config.is_parallel());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_paths_resolve_against_config_dir() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rhetorica.yaml");
        std::fs::write(&path, "documents: data/texts.tsv\n").unwrap();

        let config = Config::parse_file(&path).unwrap();
        assert_eq!(config.documents_path(), temp.path().join("data/texts.tsv"));
        assert_eq!(
            config.lexicon_path(Appeal::Pathos),
            temp.path().join("pathos.txt")
        );
    }

    #[test]
    fn test_default_documents_stay_in_working_dir() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "lexicons:\n  dir: dict\n").unwrap();

        let config = Config::parse_file(&path).unwrap();
        assert_eq!(config.documents_path(), PathBuf::from("texts.tsv"));
        assert_eq!(
            config.lexicon_path(Appeal::Ethos),
            temp.path().join("dict/ethos.txt")
        );
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let yaml = "scoring:\n  empty_document: drop\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_glob() {
        let config = Config {
            excluded_paths: vec!["[".to_string()],
            ..Default::default()
        };
        assert!(validate(&config).is_err());
    }
}
