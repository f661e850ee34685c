//! Declaration-tree checks (S008-S012).
//!
//! These consume the extracted declaration facts, never the raw syntax
//! tree, and emit findings in document order. The driver re-sorts the
//! final report, so traversal order only shapes accumulation.

use crate::parser::{ClassDecl, FunctionDecl, ModuleDecls};

use super::issue::{Finding, RuleCode};
use super::naming::{violates_camel_case, violates_snake_case};

/// Run the full battery over every declaration in the module.
pub fn check_declarations(decls: &ModuleDecls) -> Vec<Finding> {
    let mut findings = Vec::new();

    for class in &decls.classes {
        check_class_name(class, &mut findings);
    }
    for function in &decls.functions {
        check_function_name(function, &mut findings);
        check_argument_names(function, &mut findings);
        check_variable_names(function, &mut findings);
        check_mutable_default(function, &mut findings);
    }

    findings
}

fn check_class_name(class: &ClassDecl, findings: &mut Vec<Finding>) {
    if violates_camel_case(&class.name) {
        findings.push(Finding::new(
            class.line,
            RuleCode::ClassNaming,
            format!("Class name '{}' should use CamelCase", class.name),
        ));
    }
}

fn check_function_name(function: &FunctionDecl, findings: &mut Vec<Finding>) {
    if violates_snake_case(&function.name) {
        findings.push(Finding::new(
            function.line,
            RuleCode::FunctionNaming,
            format!("Function name '{}' should use snake_case", function.name),
        ));
    }
}

/// One finding per offending argument, all attached to the `def` line.
/// The declaration model carries no per-argument position.
fn check_argument_names(function: &FunctionDecl, findings: &mut Vec<Finding>) {
    for arg in &function.args {
        if violates_snake_case(arg) {
            findings.push(Finding::new(
                function.line,
                RuleCode::ArgumentNaming,
                format!("Argument name '{}' should use snake_case", arg),
            ));
        }
    }
}

/// One finding per binding occurrence, at the occurrence's own line.
/// Occurrences are not deduplicated per name.
fn check_variable_names(function: &FunctionDecl, findings: &mut Vec<Finding>) {
    for binding in &function.bindings {
        if violates_snake_case(&binding.name) {
            findings.push(Finding::new(
                binding.line,
                RuleCode::VariableNaming,
                format!(
                    "Variable name '{}' in function should use snake_case",
                    binding.name
                ),
            ));
        }
    }
}

/// At most one finding per function, however many defaults are mutable.
fn check_mutable_default(function: &FunctionDecl, findings: &mut Vec<Finding>) {
    if function.defaults.iter().any(|d| d.is_mutable()) {
        findings.push(Finding::new(
            function.line,
            RuleCode::MutableDefault,
            "Default argument value is mutable",
        ));
    }
}
