//! Command-line interface for pystyle.

use clap::Parser;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::check::Analyzer;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ISSUES: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Static style checker for Python sources.
///
/// Runs per-line textual checks (line length, indentation, semicolons,
/// comment spacing, TODO markers, blank lines) and declaration checks
/// (naming conventions, mutable default arguments) over a file or a
/// directory tree, and prints a deterministic, sorted report.
#[derive(Parser)]
#[command(name = "pystyle")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to check (a .py file or a directory searched recursively)
    pub path: PathBuf,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

/// Collect candidate files for a path.
///
/// A file is analyzed as-is. Under a directory, every `.py` file at any
/// depth is a candidate; candidates are sorted lexicographically so runs
/// are reproducible. Zero candidates under a directory is an error,
/// distinct from a successful run that finds no issues.
pub fn collect_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if path.is_dir() {
        let mut files = Vec::new();
        for entry in WalkDir::new(path) {
            let entry = entry?;
            if entry.file_type().is_file() {
                let ext = entry.path().extension().and_then(|e| e.to_str());
                if ext == Some("py") {
                    files.push(entry.path().to_path_buf());
                }
            }
        }
        if files.is_empty() {
            anyhow::bail!("no files to check under {}", path.display());
        }
        files.sort();
        return Ok(files);
    }

    anyhow::bail!("{} is not a file or a directory", path.display())
}

/// Run the checker.
///
/// Returns the process exit code; fatal conditions (bad path, no
/// candidates, unreadable or unparseable file) surface as errors.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    if cli.format != "text" && cli.format != "json" {
        anyhow::bail!("invalid format {:?}, must be 'text' or 'json'", cli.format);
    }

    let files = collect_files(&cli.path)?;

    let mut analyzer = Analyzer::new();
    analyzer.analyze_files(&files)?;
    let issues = analyzer.into_issues();

    match cli.format.as_str() {
        "json" => println!("{}", report::render_json(&issues)?),
        _ => {
            let text = report::render_text(&issues);
            if !text.is_empty() {
                println!("{}", text);
            }
        }
    }

    if issues.is_empty() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_ISSUES)
    }
}
