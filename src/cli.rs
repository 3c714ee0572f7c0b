//! Command-line interface for rhetorica.

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::analyzer::RuleBasedAnalyzer;
use crate::appeal::QuotationPolicy;
use crate::config::{self, Config};
use crate::documents;
use crate::lexicon::{Appeal, LexiconSet};
use crate::report::{self, Format};
use crate::runner::{AnalysisErrorPolicy, EmptyDocumentPolicy, Runner};
use crate::score;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Rhetorical appeal scoring - measure pathos, ethos and logos in text.
///
/// Rhetorica matches each document against pathos, ethos and logos
/// lexicons, adds punctuation and number heuristics, and reports each
/// appeal as a rate per 1000 characters.
#[derive(Parser)]
#[command(name = "rhetorica")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score documents for rhetorical appeals
    #[command(visible_alias = "analyze")]
    Score(ScoreArgs),
    /// Create a new rhetorica configuration from a template
    Init(InitArgs),
}

/// Arguments for the score command.
#[derive(Parser)]
pub struct ScoreArgs {
    /// Document TSV file or directory (default: from config, then texts.tsv)
    pub documents: Option<PathBuf>,

    /// Path to configuration YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding pathos.txt, ethos.txt and logos.txt
    #[arg(short, long)]
    pub lexicons: Option<PathBuf>,

    /// Pathos lexicon file
    #[arg(long)]
    pub pathos: Option<PathBuf>,

    /// Ethos lexicon file
    #[arg(long)]
    pub ethos: Option<PathBuf>,

    /// Logos lexicon file
    #[arg(long)]
    pub logos: Option<PathBuf>,

    /// Output format: pretty, json, or tsv
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Empty document policy: zero, skip, or error
    #[arg(long)]
    pub empty_documents: Option<String>,

    /// Analyzer failure policy: abort or skip
    #[arg(long)]
    pub on_analysis_error: Option<String>,

    /// Odd quotation mark policy: half, floor, or ceil
    #[arg(long)]
    pub quotation: Option<String>,

    /// Score documents on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Show a progress bar on stderr
    #[arg(long)]
    pub progress: bool,

    /// Exit non-zero if any document was skipped
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "rhetorica.yaml")]
    pub output: PathBuf,

    /// Template to use
    #[arg(short, long, default_value = "minimal")]
    pub template: String,

    /// List available templates
    #[arg(short, long)]
    pub list: bool,
}

/// Available configuration templates.
struct Template {
    name: &'static str,
    description: &'static str,
    content: &'static str,
}

/// All available templates.
static TEMPLATES: &[Template] = &[
    Template {
        name: "minimal",
        description: "Default policies, lexicons next to the config file",
        content: include_str!("templates/minimal.yaml"),
    },
    Template {
        name: "korean",
        description: "Korean news corpus with particle stripping and skip policies",
        content: include_str!("templates/korean.yaml"),
    },
];

fn parse_flag<T: std::str::FromStr<Err = String>>(
    value: Option<&str>,
) -> anyhow::Result<Option<T>> {
    value
        .map(|v| v.parse::<T>().map_err(anyhow::Error::msg))
        .transpose()
}

/// Load the configuration named on the command line, or a discovered one,
/// or the defaults.
fn load_config(path: Option<&Path>) -> anyhow::Result<(Config, Option<PathBuf>)> {
    let path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => config::discover(),
    };

    let config = match &path {
        Some(p) => Config::parse_file(p)
            .with_context(|| format!("parsing configuration {}", p.display()))?,
        None => Config::default(),
    };
    config::validate(&config).context("invalid configuration")?;

    Ok((config, path))
}

/// Apply command-line overrides on top of the configuration.
///
/// Paths given on the command line are relative to the working directory,
/// not to the configuration file. A lexicon directory replaces every
/// per-appeal file from the configuration; `--pathos`, `--ethos` and
/// `--logos` still take precedence over it.
fn apply_overrides(config: &mut Config, args: &ScoreArgs) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    if let Some(dir) = &args.lexicons {
        config.lexicons.dir = Some(cwd.join(dir));
        config.lexicons.pathos = None;
        config.lexicons.ethos = None;
        config.lexicons.logos = None;
    }
    if let Some(p) = &args.pathos {
        config.lexicons.pathos = Some(cwd.join(p));
    }
    if let Some(p) = &args.ethos {
        config.lexicons.ethos = Some(cwd.join(p));
    }
    if let Some(p) = &args.logos {
        config.lexicons.logos = Some(cwd.join(p));
    }
    if let Some(policy) = parse_flag::<EmptyDocumentPolicy>(args.empty_documents.as_deref())? {
        config.scoring.empty_document = policy;
    }
    if let Some(policy) = parse_flag::<AnalysisErrorPolicy>(args.on_analysis_error.as_deref())? {
        config.scoring.analysis_error = policy;
    }
    if let Some(policy) = parse_flag::<QuotationPolicy>(args.quotation.as_deref())? {
        config.scoring.quotation = policy;
    }
    if args.sequential {
        config.parallel = Some(false);
    }
    Ok(())
}

/// Run the score command.
pub fn run_score(args: &ScoreArgs) -> anyhow::Result<i32> {
    // Validate format
    let format = match args.format.parse::<Format>() {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let (mut config, config_path) = load_config(args.config.as_deref())?;
    if let Some(p) = &config_path {
        tracing::info!(path = %p.display(), "using configuration");
    }

    let documents_path = match &args.documents {
        Some(p) => p.clone(),
        None => config.documents_path(),
    };
    if let Err(e) = apply_overrides(&mut config, args) {
        eprintln!("Error: {}", e);
        return Ok(EXIT_ERROR);
    }

    if !documents_path.exists() {
        eprintln!("Error: cannot access path {:?}", documents_path);
        return Ok(EXIT_ERROR);
    }

    let lexicons = LexiconSet::load(
        &config.lexicon_path(Appeal::Pathos),
        &config.lexicon_path(Appeal::Ethos),
        &config.lexicon_path(Appeal::Logos),
    )?;

    let docs = documents::load(&documents_path, &config.excluded_paths)?;
    if docs.is_empty() {
        eprintln!("Warning: no documents to score");
        return Ok(EXIT_SUCCESS);
    }

    let analyzer = RuleBasedAnalyzer::new(config.analyzer.clone());
    let table = Runner::new(&analyzer, &lexicons)
        .empty_document(config.scoring.empty_document)
        .analysis_error(config.scoring.analysis_error)
        .quotation(config.scoring.quotation)
        .parallel(config.is_parallel())
        .progress(args.progress)
        .run(&docs)?;
    let summary = score::summarize(&table);

    let source = documents_path.to_string_lossy().to_string();
    match format {
        Format::Json => report::write_json(&source, &table, &summary)?,
        Format::Tsv => report::write_tsv(&table),
        Format::Pretty => report::write_pretty(&source, &table, &summary),
    }

    if args.strict && !table.skipped.is_empty() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // List mode
    if args.list {
        return list_templates();
    }

    // Find template
    let template = match TEMPLATES.iter().find(|t| t.name == args.template) {
        Some(t) => t,
        None => {
            eprintln!("Error: unknown template {:?}", args.template);
            eprintln!("Run 'rhetorica init --list' to see available templates");
            return Ok(EXIT_ERROR);
        }
    };

    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, template.content) {
        eprintln!("Error: failed to write configuration: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {} from template '{}'", args.output.display(), template.name);
    println!();
    println!("Next steps:");
    println!("  1. Put pathos.txt, ethos.txt and logos.txt next to {}", args.output.display());
    println!("  2. Run: rhetorica score texts.tsv --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}

/// List available templates.
fn list_templates() -> anyhow::Result<i32> {
    println!("Available templates:");
    println!();

    for template in TEMPLATES {
        let name = if template.name == "minimal" {
            format!("{} (default)", template.name)
        } else {
            template.name.to_string()
        };
        println!("  {:<20} {}", name, template.description);
    }

    println!();
    println!("Usage:");
    println!("  rhetorica init --template <name>");

    Ok(EXIT_SUCCESS)
}
