//! Analysis driver: loads files, runs both batteries, accumulates issues.

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::parser::{ModuleDecls, PythonParser};

use super::issue::Issue;
use super::lines::{LineContext, LINE_CHECKS};
use super::tree::check_declarations;

/// One file prepared for analysis: trimmed physical lines plus the
/// extracted declarations. Built fresh per file and dropped once its
/// checks have run; no state crosses files except the issue accumulator.
pub struct SourceUnit {
    pub file: String,
    pub lines: Vec<String>,
    pub decls: ModuleDecls,
}

impl SourceUnit {
    /// Split source into physical lines, after trimming trailing
    /// whitespace from the whole file (not per line). A trailing `\r`
    /// per line is dropped so CRLF input lines match LF input.
    fn split_lines(source: &str) -> Vec<String> {
        source
            .trim_end()
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect()
    }

    pub fn from_source(parser: &PythonParser, file: &str, source: &str) -> anyhow::Result<Self> {
        let decls = parser.parse(file, source)?;
        Ok(Self {
            file: file.to_string(),
            lines: Self::split_lines(source),
            decls,
        })
    }

    pub fn load(parser: &PythonParser, path: &Path) -> anyhow::Result<Self> {
        let file = path.to_string_lossy().to_string();
        let source =
            fs::read_to_string(path).with_context(|| format!("reading {}", file))?;
        Self::from_source(parser, &file, &source)
    }
}

/// Runs both check batteries over a sequence of files, accumulating
/// every issue into one run-wide list.
pub struct Analyzer {
    parser: PythonParser,
    issues: Vec<Issue>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            parser: PythonParser::new(),
            issues: Vec::new(),
        }
    }

    /// Analyze files strictly sequentially, in the caller-supplied order.
    ///
    /// A file that fails to read or parse aborts the whole run; no
    /// partial report is produced for it.
    pub fn analyze_files<P: AsRef<Path>>(&mut self, files: &[P]) -> anyhow::Result<()> {
        for path in files {
            let unit = SourceUnit::load(&self.parser, path.as_ref())?;
            self.analyze_unit(&unit);
        }
        Ok(())
    }

    /// Analyze one already-loaded unit.
    pub fn analyze_unit(&mut self, unit: &SourceUnit) {
        for (i, line) in unit.lines.iter().enumerate() {
            let ctx = LineContext {
                lines: &unit.lines,
                line_num: i + 1,
            };
            for check in LINE_CHECKS {
                if let Some(finding) = check(line, &ctx) {
                    self.issues.push(Issue::new(&unit.file, finding));
                }
            }
        }

        for finding in check_declarations(&unit.decls) {
            self.issues.push(Issue::new(&unit.file, finding));
        }
    }

    /// Consume the analyzer, returning all issues in report order.
    pub fn into_issues(self) -> Vec<Issue> {
        let mut issues = self.issues;
        issues.sort();
        issues
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
