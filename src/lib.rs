//! pystyle - static style checker for Python sources.
//!
//! Given a file or directory, pystyle reports per-line and
//! per-declaration style violations: line length, indentation, stray
//! semicolons, comment spacing, TODO markers, excessive blank lines,
//! naming conventions, and mutable default arguments.
//!
//! # Architecture
//!
//! - `parser`: tree-sitter based extraction of Python declarations
//!   (classes, functions, arguments, defaults, body bindings)
//! - `check`: the line-check and declaration-check batteries, the issue
//!   model, and the analysis driver
//! - `report`: output formatting (text, JSON)
//! - `cli`: argument parsing, file discovery, and the run loop

pub mod check;
pub mod cli;
pub mod parser;
pub mod report;

pub use check::{Analyzer, Issue, RuleCode, SourceUnit};
pub use parser::{ClassDecl, FunctionDecl, ModuleDecls, PythonParser};
