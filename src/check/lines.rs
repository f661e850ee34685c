//! Line-oriented textual checks (S001-S007).
//!
//! Each check is a pure function of the current line (plus, for the
//! blank-lines check, the surrounding lines) returning at most one
//! finding. The battery runs in the declared order for every physical
//! line; the final report re-sorts, so only membership matters.

use lazy_static::lazy_static;
use regex::Regex;

use super::issue::{Finding, RuleCode};

/// Maximum allowed line length in characters.
const MAX_LINE_LENGTH: usize = 79;

/// Blank lines tolerated before a line of content.
const MAX_BLANK_LINES: usize = 2;

lazy_static! {
    /// A semicolon that terminates the statement: only whitespace and an
    /// optional comment may follow it.
    static ref SEMICOLON: Regex = Regex::new(r"^[^#]*;\s*(#.*)?$").unwrap();

    /// Code followed by an inline comment with fewer than two spaces
    /// before the `#`. A full-line comment has no code segment and
    /// cannot match.
    static ref TIGHT_INLINE_COMMENT: Regex = Regex::new(r"^[^#]*\S ?#").unwrap();

    /// A comment containing a todo marker, any casing.
    static ref TODO_COMMENT: Regex = Regex::new(r"(?i)^[^#]*#.*todo").unwrap();

    /// `class` or `def` keyword followed by two or more whitespace
    /// characters before the name.
    static ref SPACES_AFTER_KEYWORD: Regex = Regex::new(r"^\s*(class|def)\s{2,}").unwrap();
}

/// Context handed to every line check.
pub struct LineContext<'a> {
    /// All physical lines of the file.
    pub lines: &'a [String],
    /// 1-based number of the line under inspection.
    pub line_num: usize,
}

/// A line check: inspects one line and emits at most one finding.
pub type LineCheck = fn(&str, &LineContext) -> Option<Finding>;

/// The full battery, in declared order.
pub const LINE_CHECKS: &[LineCheck] = &[
    check_length,
    check_indent,
    check_semicolon,
    check_inline_comment,
    check_todo,
    check_blank_lines,
    check_spaces_after_keyword,
];

fn check_length(line: &str, ctx: &LineContext) -> Option<Finding> {
    if line.chars().count() > MAX_LINE_LENGTH {
        return Some(Finding::new(ctx.line_num, RuleCode::LineTooLong, "Too long"));
    }
    None
}

fn check_indent(line: &str, ctx: &LineContext) -> Option<Finding> {
    let indent = line.chars().take_while(|c| c.is_whitespace()).count();
    if indent % 4 != 0 {
        return Some(Finding::new(
            ctx.line_num,
            RuleCode::BadIndentation,
            "Indentation is not a multiple of 4",
        ));
    }
    None
}

fn check_semicolon(line: &str, ctx: &LineContext) -> Option<Finding> {
    if SEMICOLON.is_match(line) {
        return Some(Finding::new(
            ctx.line_num,
            RuleCode::UnnecessarySemicolon,
            "Unnecessary semicolon",
        ));
    }
    None
}

fn check_inline_comment(line: &str, ctx: &LineContext) -> Option<Finding> {
    if TIGHT_INLINE_COMMENT.is_match(line) {
        return Some(Finding::new(
            ctx.line_num,
            RuleCode::InlineCommentSpacing,
            "At least two spaces required before inline comments",
        ));
    }
    None
}

fn check_todo(line: &str, ctx: &LineContext) -> Option<Finding> {
    if TODO_COMMENT.is_match(line) {
        return Some(Finding::new(ctx.line_num, RuleCode::TodoFound, "TODO found"));
    }
    None
}

/// Flags a non-blank line preceded by three or more blank lines.
///
/// The finding is attached to the content line, not the blank run. The
/// lookback never underflows: the check only fires once at least three
/// prior lines exist.
fn check_blank_lines(line: &str, ctx: &LineContext) -> Option<Finding> {
    let index = ctx.line_num - 1;
    if index <= MAX_BLANK_LINES {
        return None;
    }
    let preceding_blank = ctx.lines[index - 3..index]
        .iter()
        .all(|l| l.trim().is_empty());
    if !line.trim().is_empty() && preceding_blank {
        return Some(Finding::new(
            ctx.line_num,
            RuleCode::ExcessiveBlankLines,
            "More than two blank lines used before this line",
        ));
    }
    None
}

fn check_spaces_after_keyword(line: &str, ctx: &LineContext) -> Option<Finding> {
    if let Some(caps) = SPACES_AFTER_KEYWORD.captures(line) {
        let keyword = &caps[1];
        return Some(Finding::new(
            ctx.line_num,
            RuleCode::SpacesAfterKeyword,
            format!("Too many spaces after '{}'", keyword),
        ));
    }
    None
}
