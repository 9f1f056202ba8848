//! Command-line interface for ecs-summarizer.

use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::commands::Command;
use crate::config::{self, Config, DEFAULT_CONFIG_TEMPLATE};
use crate::host::{FileHost, StdioHost};
use crate::report::{self, FileResult, FileStatus, RunReport};
use crate::summarize::{DeclarationKind, Summarizer};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Directory names never descended into (Unity and .NET build output).
const SKIPPED_DIRS: &[&str] = &["Library", "Temp", "Logs", "obj", "bin"];

/// Generate XML doc summaries for Unity ECS fields.
///
/// Finds `ComponentTypeSet` and `EntityQuery` fields, reads the statements
/// that configure them, and writes a `/// <summary>` block above each one
/// listing its component types and query clauses. Re-running replaces the
/// previously generated summaries.
#[derive(Parser)]
#[command(name = "ecs-summarizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Insert or refresh summaries in a file or directory
    #[command(visible_alias = "run")]
    Summarize(SummarizeArgs),
    /// Write a default configuration file
    Init(InitArgs),
}

/// Which declarations to summarize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    TypeSets,
    Queries,
    All,
}

impl KindArg {
    pub fn kinds(&self) -> Vec<DeclarationKind> {
        match self {
            KindArg::TypeSets => vec![DeclarationKind::TypeSet],
            KindArg::Queries => vec![DeclarationKind::Query],
            KindArg::All => DeclarationKind::ALL.to_vec(),
        }
    }
}

/// Output format for the run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Pretty,
    Json,
}

/// Arguments for the summarize command.
#[derive(Parser)]
pub struct SummarizeArgs {
    /// File or directory to process (ignored with --stdin)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Declarations to summarize (default: from config, else all)
    #[arg(short, long, value_enum)]
    pub kind: Option<KindArg>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report files whose summaries are stale without writing them
    #[arg(long)]
    pub check: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: FormatArg,

    /// Read the buffer from stdin and write the result to stdout
    #[arg(long)]
    pub stdin: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "ecs-summarizer.yaml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Collect files to summarize under `root`.
pub fn collect_files(root: &Path, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let excluded = config.excluded_matcher()?;
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            // Skip hidden and build output directories
            !name.starts_with('.') && !SKIPPED_DIRS.iter().any(|d| name == *d)
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !config.has_extension(path) {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        if excluded.is_match(relative) || excluded.is_match(path) {
            debug!(path = %path.display(), "excluded by config");
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Summarize every file, in parallel.
pub fn summarize_files(
    files: &[PathBuf],
    command: Command,
    summarizer: &Summarizer,
    check: bool,
) -> RunReport {
    let results: Vec<FileResult> = files
        .par_iter()
        .map(|path| {
            let mut host = FileHost::new(path).dry_run(check);
            let result = command.execute(&mut host, summarizer);
            if let Err(e) = &result {
                if !e.is_notice() {
                    warn!(path = %path.display(), "{}", e);
                }
            }
            FileResult::from_command(&path.to_string_lossy(), result)
        })
        .collect();

    RunReport::new(results, check)
}

/// Run the summarize command.
pub fn run_summarize(args: &SummarizeArgs) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir()?;
    let (config, config_path) = match Config::load(args.config.as_deref(), &cwd) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: invalid config: {:#}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let kinds = match args.kind {
        Some(kind) => kind.kinds(),
        None => config.kinds.clone(),
    };
    let command = Command::for_kinds(&kinds);
    let summarizer = Summarizer::new().line_ending(config.line_ending);

    if args.stdin {
        return run_stdin(command, &summarizer, args.check);
    }

    let metadata = match std::fs::metadata(&args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let files = if metadata.is_dir() {
        collect_files(&args.path, &config)?
    } else {
        vec![args.path.clone()]
    };

    if files.is_empty() {
        eprintln!("Warning: no files to summarize");
        return Ok(EXIT_SUCCESS);
    }

    let report = summarize_files(&files, command, &summarizer, args.check);

    let path_str = args.path.to_string_lossy().to_string();
    let config_str = config_path.map(|p| p.to_string_lossy().to_string());
    let mut stdout = std::io::stdout().lock();
    match args.format {
        FormatArg::Json => report::write_json(&mut stdout, &path_str, config_str.as_deref(), &report)?,
        FormatArg::Pretty => {
            report::write_pretty(&mut stdout, &path_str, config_str.as_deref(), &report)?
        }
    }

    if report.has_failures() {
        Ok(EXIT_ERROR)
    } else if args.check && report.count(FileStatus::Updated) > 0 {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Pipe stdin through the command to stdout.
fn run_stdin(command: Command, summarizer: &Summarizer, check: bool) -> anyhow::Result<i32> {
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    let mut host = StdioHost::new(stdin, stdout).dry_run(check);

    let result = command.execute(&mut host, summarizer);
    let replaced = host.replaced();
    host.finish()?;

    match result {
        Ok(_) if check && replaced => Ok(EXIT_FAILED),
        Ok(_) => Ok(EXIT_SUCCESS),
        Err(e) if e.is_notice() => Ok(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {:#}", anyhow::Error::from(e));
            Ok(EXIT_ERROR)
        }
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() && !args.force {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Use --force to overwrite it or --output to choose another path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, DEFAULT_CONFIG_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "Created {}", args.output.display())?;
    writeln!(stdout)?;
    writeln!(stdout, "Next steps:")?;
    writeln!(stdout, "  1. Edit {} to customize for your project", args.output.display())?;
    writeln!(stdout, "  2. Run: ecs-summarizer summarize Assets/")?;
    if config::discover(Path::new(".")).is_none() {
        writeln!(
            stdout,
            "  (pass --config {} when running from another directory)",
            args.output.display()
        )?;
    }

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SYSTEM: &str = "public partial struct S : ISystem\n{\n    private EntityQuery _q;\n    public void OnCreate(ref SystemState state)\n    {\n        _q = SystemAPI.QueryBuilder().WithAll<A>().Build();\n    }\n}\n";

    fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "ecs-summarizer",
            "summarize",
            "Assets",
            "--kind",
            "type-sets",
            "--check",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Summarize(args) => {
                assert_eq!(args.path, PathBuf::from("Assets"));
                assert_eq!(args.kind, Some(KindArg::TypeSets));
                assert!(args.check);
                assert_eq!(args.format, FormatArg::Json);
            }
            Commands::Init(_) => panic!("expected summarize"),
        }

        let cli = Cli::try_parse_from(["ecs-summarizer", "-v", "run"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_collect_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let kept = write(root, "Assets/Systems/Move.cs", SYSTEM);
        write(root, "Assets/Systems/Notes.txt", "");
        write(root, "Library/Cache.cs", SYSTEM);
        write(root, ".git/Hook.cs", SYSTEM);
        write(root, "Assets/Generated/Gen.cs", SYSTEM);

        let config = Config::parse_str("excluded_paths: [\"**/Generated/**\"]").unwrap();
        let files = collect_files(root, &config).unwrap();
        assert_eq!(files, [kept]);
    }

    #[test]
    fn test_summarize_files_check_then_write() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "Move.cs", SYSTEM);
        let files = vec![path.clone()];
        let summarizer = Summarizer::new();

        let report = summarize_files(&files, Command::SummarizeAll, &summarizer, true);
        assert_eq!(report.count(FileStatus::Updated), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SYSTEM);

        let report = summarize_files(&files, Command::SummarizeAll, &summarizer, false);
        assert_eq!(report.count(FileStatus::Updated), 1);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains(
            "    /// WithAll: <see cref=\"A\" />\n    /// </summary>\n    private EntityQuery _q;"
        ));

        let report = summarize_files(&files, Command::SummarizeAll, &summarizer, true);
        assert_eq!(report.count(FileStatus::Unchanged), 1);
    }

    #[test]
    fn test_run_init() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("cfg/ecs-summarizer.yaml");
        let args = InitArgs {
            output: output.clone(),
            force: false,
        };
        assert_eq!(run_init(&args).unwrap(), EXIT_SUCCESS);
        assert!(Config::parse_file(&output).is_ok());

        assert_eq!(run_init(&args).unwrap(), EXIT_ERROR);

        let forced = InitArgs {
            output,
            force: true,
        };
        assert_eq!(run_init(&forced).unwrap(), EXIT_SUCCESS);
    }
}
