//! Output formatting for scoring results.
//!
//! Supports three output formats:
//! - Pretty: colored terminal table with overall and per-label averages
//! - JSON: structured output for programmatic consumption
//! - TSV: one flat line per document, for spreadsheets and plotting tools

use colored::*;
use serde::{Deserialize, Serialize};

use crate::score::{DocumentResult, ResultTable, ScoreMeans, SkippedDocument, Summary};

/// Characters of a title shown before it is cut off in the pretty table.
const TITLE_WIDTH: usize = 10;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pretty,
    Json,
    Tsv,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(Format::Pretty),
            "json" => Ok(Format::Json),
            "tsv" => Ok(Format::Tsv),
            _ => Err(format!(
                "invalid format {:?}, must be 'pretty', 'json', or 'tsv'",
                s
            )),
        }
    }
}

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report structure.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub source: String,
    pub documents: usize,
    pub rows: Vec<DocumentResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedDocument>,
    pub summary: Summary,
}

impl JsonReport {
    pub fn new(source: &str, table: &ResultTable, summary: &Summary) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            source: source.to_string(),
            documents: table.documents(),
            rows: table.rows.clone(),
            skipped: table.skipped.clone(),
            summary: summary.clone(),
        }
    }
}

/// Write results in JSON format.
pub fn write_json(source: &str, table: &ResultTable, summary: &Summary) -> anyhow::Result<()> {
    let report = JsonReport::new(source, table, summary);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// TSV Format
// =============================================================================

const TSV_COLUMNS: &[&str] = &[
    "title",
    "label",
    "text_length",
    "pathos_score",
    "ethos_score",
    "logos_score",
    "pathos_words",
    "exclamation",
    "question",
    "total_pathos",
    "ethos_words",
    "quotation",
    "total_ethos",
    "logos_words",
    "number",
    "percent",
    "total_logos",
];

/// Tabs and newlines inside a field would break the row.
fn tsv_field(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

/// Render a result table as TSV with a header row.
pub fn format_tsv(table: &ResultTable) -> String {
    let mut out = TSV_COLUMNS.join("\t");
    out.push('\n');

    for r in &table.rows {
        let fields = [
            tsv_field(&r.title),
            tsv_field(&r.label),
            r.text_length.to_string(),
            r.pathos_score.to_string(),
            r.ethos_score.to_string(),
            r.logos_score.to_string(),
            r.pathos.words.to_string(),
            r.pathos.exclamation.to_string(),
            r.pathos.question.to_string(),
            r.pathos.total.to_string(),
            r.ethos.words.to_string(),
            r.ethos.quotation.to_string(),
            r.ethos.total.to_string(),
            r.logos.words.to_string(),
            r.logos.number.to_string(),
            r.logos.percent.to_string(),
            r.logos.total.to_string(),
        ];
        out.push_str(&fields.join("\t"));
        out.push('\n');
    }

    out
}

/// Write results in TSV format.
pub fn write_tsv(table: &ResultTable) {
    print!("{}", format_tsv(table));
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Shorten a title for table display.
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_WIDTH {
        let head: String = title.chars().take(TITLE_WIDTH).collect();
        format!("{}...", head)
    } else {
        title.to_string()
    }
}

/// Write results in pretty (human-readable) format.
pub fn write_pretty(source: &str, table: &ResultTable, summary: &Summary) {
    // Header
    println!();
    print!("  ");
    print!("{}", "rhetorica".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Documents: ".dimmed());
    println!("{}", source);
    print!("  {}", "Scored:    ".dimmed());
    print!("{}", table.len());
    if !table.skipped.is_empty() {
        print!("  {}", format!("({} skipped)", table.skipped.len()).dimmed());
    }
    println!();
    println!();

    if !table.rows.is_empty() {
        write_rows(&table.rows);
        println!();
    }

    if !table.skipped.is_empty() {
        write_skipped(&table.skipped);
        println!();
    }

    write_summary(summary);
    println!();
}

fn write_header_row(first: &str) {
    println!(
        "    {:<16} {:>9} {:>9} {:>9}",
        first.bold(),
        "Pathos".red().bold(),
        "Ethos".blue().bold(),
        "Logos".green().bold()
    );
}

fn write_rows(rows: &[DocumentResult]) {
    println!(
        "  {} {}",
        "Scores".bold(),
        "(per 1000 characters)".dimmed()
    );
    println!();
    println!(
        "    {:<16} {:<10} {:>7} {:>9} {:>9} {:>9}",
        "Title".bold(),
        "Label".bold(),
        "Chars".bold(),
        "Pathos".red().bold(),
        "Ethos".blue().bold(),
        "Logos".green().bold()
    );

    for r in rows {
        println!(
            "    {:<16} {:<10} {:>7} {:>9.2} {:>9.2} {:>9.2}",
            truncate_title(&r.title),
            r.label.dimmed(),
            r.text_length,
            r.pathos_score,
            r.ethos_score,
            r.logos_score
        );
    }
}

fn write_means(name: &str, means: &ScoreMeans) {
    let plural = if means.documents != 1 { "s" } else { "" };
    println!(
        "    {:<16} {:>9.2} {:>9.2} {:>9.2}  {}",
        name,
        means.pathos,
        means.ethos,
        means.logos,
        format!("({} document{})", means.documents, plural).dimmed()
    );
}

fn write_summary(summary: &Summary) {
    println!("  {}", "Averages:".bold());
    write_header_row("");
    write_means("all", &summary.overall);

    for entry in &summary.by_label {
        write_means(&truncate_title(&entry.label), &entry.means);
    }
}

fn write_skipped(skipped: &[SkippedDocument]) {
    println!("  {} ({}):", "Skipped".yellow(), skipped.len());
    for s in skipped {
        print!("    {:<6}", format!("#{}", s.index).dimmed());
        println!("{}", truncate_title(&s.title).blue());
        println!("            {}", s.reason);
    }
}
