//! Style checks and the analysis driver.

mod issue;
mod lines;
mod naming;
mod runner;
mod tree;

pub use issue::{Finding, Issue, RuleCode};
pub use lines::{LineCheck, LineContext, LINE_CHECKS};
pub use naming::{violates_camel_case, violates_snake_case};
pub use runner::{Analyzer, SourceUnit};
pub use tree::check_declarations;
