//! Core types for check results.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Rule codes for the style checks.
///
/// S001-S007 are line checks, S008-S012 are declaration-tree checks.
/// The code strings are part of the report contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleCode {
    #[serde(rename = "S001")]
    LineTooLong,
    #[serde(rename = "S002")]
    BadIndentation,
    #[serde(rename = "S003")]
    UnnecessarySemicolon,
    #[serde(rename = "S004")]
    InlineCommentSpacing,
    #[serde(rename = "S005")]
    TodoFound,
    #[serde(rename = "S006")]
    ExcessiveBlankLines,
    #[serde(rename = "S007")]
    SpacesAfterKeyword,
    #[serde(rename = "S008")]
    ClassNaming,
    #[serde(rename = "S009")]
    FunctionNaming,
    #[serde(rename = "S010")]
    ArgumentNaming,
    #[serde(rename = "S011")]
    VariableNaming,
    #[serde(rename = "S012")]
    MutableDefault,
}

impl RuleCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCode::LineTooLong => "S001",
            RuleCode::BadIndentation => "S002",
            RuleCode::UnnecessarySemicolon => "S003",
            RuleCode::InlineCommentSpacing => "S004",
            RuleCode::TodoFound => "S005",
            RuleCode::ExcessiveBlankLines => "S006",
            RuleCode::SpacesAfterKeyword => "S007",
            RuleCode::ClassNaming => "S008",
            RuleCode::FunctionNaming => "S009",
            RuleCode::ArgumentNaming => "S010",
            RuleCode::VariableNaming => "S011",
            RuleCode::MutableDefault => "S012",
        }
    }
}

impl std::fmt::Display for RuleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A violation emitted by a check before it is attributed to a file.
///
/// Checks only know the line they fired on; the driver owns the current
/// file identifier and promotes findings to [`Issue`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub line_num: usize,
    pub code: RuleCode,
    pub message: String,
}

impl Finding {
    pub fn new(line_num: usize, code: RuleCode, message: impl Into<String>) -> Self {
        Self {
            line_num,
            code,
            message: message.into(),
        }
    }
}

/// A single reported style violation.
///
/// Issues are value objects: created once, never mutated, owned by the
/// run-wide accumulator. Identical issues are retained, not deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub file: String,
    pub line_num: usize,
    pub code: RuleCode,
    pub message: String,
}

impl Issue {
    pub fn new(file: impl Into<String>, finding: Finding) -> Self {
        Self {
            file: file.into(),
            line_num: finding.line_num,
            code: finding.code,
            message: finding.message,
        }
    }

    /// Sort key defining the report order.
    ///
    /// Explicit 4-tuple rather than derived field order so the contract
    /// survives struct reshuffling. Code comparison is by code string.
    fn sort_key(&self) -> (&str, usize, &'static str, &str) {
        (&self.file, self.line_num, self.code.as_str(), &self.message)
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: Line {}: {} {}",
            self.file, self.line_num, self.code, self.message
        )
    }
}
