//! Output formatting for summarize runs.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::SummarizeError;
use crate::summarize::{Outcome, Skipped};

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Summaries were written (or would be, in check mode)
    Updated,
    /// Summaries were already current
    Unchanged,
    /// No declarations of the requested kinds
    NothingFound,
    Failed,
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStatus::Updated => write!(f, "updated"),
            FileStatus::Unchanged => write!(f, "unchanged"),
            FileStatus::NothingFound => write!(f, "nothing found"),
            FileStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Result of summarizing one file.
#[derive(Debug, Clone)]
pub struct FileResult {
    pub path: String,
    pub status: FileStatus,
    /// `Kind name` of each annotated declaration
    pub annotated: Vec<String>,
    pub skipped: Vec<Skipped>,
    pub error: Option<String>,
}

impl FileResult {
    /// Build a file result from a command result.
    pub fn from_command(path: &str, result: Result<Outcome, SummarizeError>) -> Self {
        let mut file = FileResult {
            path: path.to_string(),
            status: FileStatus::Unchanged,
            annotated: Vec::new(),
            skipped: Vec::new(),
            error: None,
        };
        match result {
            Ok(outcome) => {
                if outcome.changed {
                    file.status = FileStatus::Updated;
                }
                file.annotated = outcome
                    .annotated
                    .iter()
                    .map(|d| format!("{} {}", d.kind, d.name))
                    .collect();
                file.skipped = outcome.skipped;
            }
            Err(e) if e.is_notice() => file.status = FileStatus::NothingFound,
            Err(e) => {
                file.status = FileStatus::Failed;
                file.error = Some(format!("{:#}", anyhow::Error::from(e)));
            }
        }
        file
    }
}

/// Results of a summarize run over one or more files.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub files: Vec<FileResult>,
    /// Whether the run was in check mode (no writes)
    pub check: bool,
}

impl RunReport {
    pub fn new(mut files: Vec<FileResult>, check: bool) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Self { files, check }
    }

    pub fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }

    pub fn annotated_count(&self) -> usize {
        self.files.iter().map(|f| f.annotated.len()).sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.files.iter().map(|f| f.skipped.len()).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.count(FileStatus::Failed) > 0
    }
}

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report structure.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
    pub check: bool,
    pub files_scanned: usize,
    pub files_updated: usize,
    pub files_failed: usize,
    pub files: Vec<JsonFile>,
}

/// Per-file JSON entry.
#[derive(Serialize, Deserialize)]
pub struct JsonFile {
    pub path: String,
    pub status: FileStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotated: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<JsonSkipped>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A declaration left without a summary.
#[derive(Serialize, Deserialize)]
pub struct JsonSkipped {
    pub name: String,
    pub kind: String,
    pub line: usize,
    pub reason: String,
}

/// Build the JSON representation of a run.
pub fn to_json_report(path: &str, config_path: Option<&str>, report: &RunReport) -> JsonReport {
    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        config: config_path.map(str::to_string),
        check: report.check,
        files_scanned: report.files.len(),
        files_updated: report.count(FileStatus::Updated),
        files_failed: report.count(FileStatus::Failed),
        files: report.files.iter().map(file_to_json).collect(),
    }
}

fn file_to_json(f: &FileResult) -> JsonFile {
    JsonFile {
        path: f.path.clone(),
        status: f.status,
        annotated: f.annotated.clone(),
        skipped: f
            .skipped
            .iter()
            .map(|s| JsonSkipped {
                name: s.declaration.name.clone(),
                kind: s.declaration.kind.to_string(),
                line: s.declaration.line,
                reason: s.reason.to_string(),
            })
            .collect(),
        error: f.error.clone(),
    }
}

/// Write results in JSON format.
pub fn write_json<W: Write>(
    out: &mut W,
    path: &str,
    config_path: Option<&str>,
    report: &RunReport,
) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&to_json_report(path, config_path, report))?;
    writeln!(out, "{}", json)?;
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results as colored terminal output.
pub fn write_pretty<W: Write>(
    out: &mut W,
    path: &str,
    config_path: Option<&str>,
    report: &RunReport,
) -> anyhow::Result<()> {
    // Header
    writeln!(out)?;
    writeln!(
        out,
        "  {} v{}",
        "ecs-summarizer".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out)?;
    writeln!(out, "  {}{}", "Scanning: ".dimmed(), path)?;
    writeln!(
        out,
        "  {}{}",
        "Config:   ".dimmed(),
        config_path.unwrap_or("(defaults)")
    )?;
    writeln!(out)?;

    for file in &report.files {
        write_file(out, file, report.check)?;
    }
    if !report.files.is_empty() {
        writeln!(out)?;
    }

    write_final_status(out, report)?;
    writeln!(out)?;
    Ok(())
}

fn write_file<W: Write>(out: &mut W, file: &FileResult, check: bool) -> anyhow::Result<()> {
    match file.status {
        FileStatus::Updated => {
            let label = if check { "✗ stale" } else { "✓ updated" };
            let label = if check { label.yellow() } else { label.green() };
            writeln!(
                out,
                "  {}  {}  {}",
                label,
                file.path,
                format!("({} annotated)", file.annotated.len()).dimmed()
            )?;
        }
        FileStatus::Unchanged => {
            writeln!(out, "  {}  {}", "· current".dimmed(), file.path)?;
        }
        FileStatus::NothingFound => return Ok(()),
        FileStatus::Failed => {
            writeln!(out, "  {}  {}", "✗ failed".red(), file.path)?;
            if let Some(error) = &file.error {
                writeln!(out, "      {}", error.red())?;
            }
        }
    }

    for skipped in &file.skipped {
        writeln!(
            out,
            "      {} {} _{} (line {}): {}",
            "skipped".yellow(),
            skipped.declaration.kind,
            skipped.declaration.name,
            skipped.declaration.line,
            skipped.reason
        )?;
    }
    Ok(())
}

fn write_final_status<W: Write>(out: &mut W, report: &RunReport) -> anyhow::Result<()> {
    let updated = report.count(FileStatus::Updated);
    let failed = report.count(FileStatus::Failed);
    let verb = if report.check { "need updating" } else { "updated" };

    let summary = format!(
        "{} files scanned, {} {}, {} declarations annotated, {} skipped",
        report.files.len(),
        updated,
        verb,
        report.annotated_count(),
        report.skipped_count()
    );

    if failed > 0 {
        writeln!(out, "  {} {} ({} failed)", "✗".red(), summary, failed)?;
    } else if report.check && updated > 0 {
        writeln!(out, "  {} {}", "✗".yellow(), summary)?;
    } else {
        writeln!(out, "  {} {}", "✓".green(), summary)?;
    }
    Ok(())
}
