//! Python declaration extraction using tree-sitter.
//!
//! Parses one module and reduces it to the closed set of declaration
//! facts the checks consume: classes, functions (with their positional
//! arguments, default-value shapes and body bindings), nothing else.
//! Declarations are collected at any nesting depth, in document order.

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor};

const DECLARATION_QUERY: &str = r#"
; Class definitions
(class_definition
  name: (identifier) @class_name
) @class

; Function definitions (module-level, methods, nested)
(function_definition
  name: (identifier) @func_name
) @function
"#;

/// A class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    /// 1-based line of the `class` keyword.
    pub line: usize,
}

/// Shape of a default-value expression, as far as the checks care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    List,
    Set,
    Dict,
    Other,
}

impl DefaultValue {
    /// True for the literal container displays that make a default mutable.
    pub fn is_mutable(&self) -> bool {
        matches!(self, DefaultValue::List | DefaultValue::Set | DefaultValue::Dict)
    }
}

/// A name bound by an assignment occurrence inside a function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    /// 1-based line of the binding occurrence itself.
    pub line: usize,
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: String,
    /// 1-based line of the `def` keyword.
    pub line: usize,
    /// Positional argument names, defaulted ones included. Keyword-only
    /// arguments (after `*`) and splats are not positional.
    pub args: Vec<String>,
    /// Default values of the trailing positional arguments, in order.
    pub defaults: Vec<DefaultValue>,
    /// Every binding occurrence in the body subtree, nested scopes
    /// included, in document order.
    pub bindings: Vec<Binding>,
}

/// All declarations extracted from one module.
#[derive(Debug, Clone, Default)]
pub struct ModuleDecls {
    pub classes: Vec<ClassDecl>,
    pub functions: Vec<FunctionDecl>,
}

/// Tree-sitter backed parser for Python source.
pub struct PythonParser {
    language: Language,
}

impl PythonParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    /// Parse a module and extract its declarations.
    ///
    /// Malformed source is a hard error; there is no partial extraction.
    /// `file` only labels the error message.
    pub fn parse(&self, file: &str, source: &str) -> anyhow::Result<ModuleDecls> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse Python source: {}", file))?;

        if tree.root_node().has_error() {
            anyhow::bail!("syntax error in {}", file);
        }

        let source = source.as_bytes();
        let query = Query::new(&self.language, DECLARATION_QUERY)?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, tree.root_node(), source);

        let mut decls = ModuleDecls::default();

        while let Some(m) = matches.next() {
            let mut name = String::new();
            let mut decl_node = None;
            let mut is_class = false;

            for capture in m.captures {
                let capture_name = query.capture_names()[capture.index as usize];
                match capture_name {
                    "class_name" => {
                        name = node_text(capture.node, source).to_string();
                        is_class = true;
                    }
                    "func_name" => {
                        name = node_text(capture.node, source).to_string();
                    }
                    "class" | "function" => {
                        decl_node = Some(capture.node);
                    }
                    _ => {}
                }
            }

            let node = match decl_node {
                Some(n) if !name.is_empty() => n,
                _ => continue,
            };
            let line = node.start_position().row + 1;

            if is_class {
                decls.classes.push(ClassDecl { name, line });
            } else {
                let (args, defaults) = extract_parameters(node, source);
                let mut bindings = Vec::new();
                if let Some(body) = node.child_by_field_name("body") {
                    collect_bindings(body, source, &mut bindings);
                }
                decls.functions.push(FunctionDecl {
                    name,
                    line,
                    args,
                    defaults,
                    bindings,
                });
            }
        }

        decls.classes.sort_by_key(|c| (c.line, c.name.clone()));
        decls.functions.sort_by_key(|f| (f.line, f.name.clone()));
        Ok(decls)
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// Collect positional argument names and their trailing defaults.
///
/// Collection stops at a bare `*` or `*args`: everything after it is
/// keyword-only and outside both the argument-naming and mutable-default
/// checks. `**kwargs` is never positional.
fn extract_parameters(func_node: Node, source: &[u8]) -> (Vec<String>, Vec<DefaultValue>) {
    let mut args = Vec::new();
    let mut defaults = Vec::new();

    let params = match func_node.child_by_field_name("parameters") {
        Some(p) => p,
        None => return (args, defaults),
    };

    let mut cursor = params.walk();
    for param in params.named_children(&mut cursor) {
        match param.kind() {
            "identifier" => {
                args.push(node_text(param, source).to_string());
            }
            "typed_parameter" => {
                if let Some(inner) = param.named_child(0) {
                    if inner.kind() == "identifier" {
                        args.push(node_text(inner, source).to_string());
                    }
                }
            }
            "default_parameter" | "typed_default_parameter" => {
                if let Some(name) = param.child_by_field_name("name") {
                    if name.kind() == "identifier" {
                        args.push(node_text(name, source).to_string());
                    }
                }
                if let Some(value) = param.child_by_field_name("value") {
                    defaults.push(classify_default(value));
                }
            }
            // Bare `*` or `*args` ends the positional section
            "list_splat_pattern" | "keyword_separator" => break,
            // `/` just closes the positional-only section; `**kwargs`
            // is last and never positional
            "positional_separator" | "dictionary_splat_pattern" => {}
            _ => {}
        }
    }

    (args, defaults)
}

fn classify_default(value: Node) -> DefaultValue {
    match value.kind() {
        "list" => DefaultValue::List,
        "set" => DefaultValue::Set,
        "dictionary" => DefaultValue::Dict,
        _ => DefaultValue::Other,
    }
}

/// Walk a function body subtree and record every binding occurrence.
///
/// Covers plain and augmented assignments, `for` targets (statements and
/// comprehension clauses alike), `with .. as` targets and walrus
/// bindings. `except .. as e` binds a bare string in the Python
/// declaration model, not a name occurrence, so it is skipped.
fn collect_bindings(node: Node, source: &[u8], out: &mut Vec<Binding>) {
    match node.kind() {
        "assignment" | "augmented_assignment" => {
            if let Some(left) = node.child_by_field_name("left") {
                collect_targets(left, source, out);
            }
        }
        // `for_in_clause` is the `for X in ..` part of list/set/dict
        // comprehensions and generator expressions
        "for_statement" | "for_in_clause" => {
            if let Some(left) = node.child_by_field_name("left") {
                collect_targets(left, source, out);
            }
        }
        "named_expression" => {
            if let Some(name) = node.child_by_field_name("name") {
                collect_targets(name, source, out);
            }
        }
        "as_pattern" => {
            let in_except = node
                .parent()
                .map(|p| p.kind() == "except_clause")
                .unwrap_or(false);
            if !in_except {
                if let Some(alias) = node.child_by_field_name("alias") {
                    collect_targets(alias, source, out);
                }
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_bindings(child, source, out);
    }
}

/// Descend through a target expression, keeping only plain names.
///
/// Attribute and subscript targets bind no local name and are dropped.
fn collect_targets(node: Node, source: &[u8], out: &mut Vec<Binding>) {
    match node.kind() {
        "identifier" => out.push(Binding {
            name: node_text(node, source).to_string(),
            line: node.start_position().row + 1,
        }),
        "pattern_list" | "tuple_pattern" | "list_pattern" | "list_splat_pattern" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                collect_targets(child, source, out);
            }
        }
        // `as` targets keep the shape of the aliased expression: a plain
        // identifier becomes a leaf of this kind, anything structured
        // (tuple, attribute, subscript) sits underneath as a named child
        // and goes back through this match
        "as_pattern_target" => {
            if node.named_child_count() == 0 {
                out.push(Binding {
                    name: node_text(node, source).to_string(),
                    line: node.start_position().row + 1,
                });
            } else {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    collect_targets(child, source, out);
                }
            }
        }
        // attribute / subscript / anything else: no plain name bound
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> ModuleDecls {
        PythonParser::new().parse("test.py", source).unwrap()
    }

    #[test]
    fn test_extract_classes_and_functions() {
        let decls = parse(
            r#"
class Person:
    def greet(self):
        pass


def top_level(x, y):
    return x + y
"#,
        );

        assert_eq!(decls.classes.len(), 1);
        assert_eq!(decls.classes[0].name, "Person");
        assert_eq!(decls.classes[0].line, 2);

        let names: Vec<_> = decls.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["greet", "top_level"]);
        assert_eq!(decls.functions[1].line, 7);
        assert_eq!(decls.functions[1].args, vec!["x", "y"]);
    }

    #[test]
    fn test_nested_declarations_found_at_any_depth() {
        let decls = parse(
            r#"
def outer():
    class Inner:
        pass

    def helper():
        pass
"#,
        );

        assert_eq!(decls.classes.len(), 1);
        assert_eq!(decls.classes[0].name, "Inner");
        let names: Vec<_> = decls.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["outer", "helper"]);
    }

    #[test]
    fn test_positional_arguments_and_defaults() {
        let decls = parse("def f(a, b=1, c=[], *args, kw=None, **extra):\n    pass\n");
        let f = &decls.functions[0];

        // Keyword-only `kw` and the splats are not positional
        assert_eq!(f.args, vec!["a", "b", "c"]);
        assert_eq!(f.defaults, vec![DefaultValue::Other, DefaultValue::List]);
    }

    #[test]
    fn test_typed_parameters() {
        let decls = parse("def f(a: int, b: str = 'x', c: dict = {}):\n    pass\n");
        let f = &decls.functions[0];
        assert_eq!(f.args, vec!["a", "b", "c"]);
        assert_eq!(f.defaults, vec![DefaultValue::Other, DefaultValue::Dict]);
    }

    #[test]
    fn test_default_classification() {
        let decls = parse("def f(a=[], b=set(), c={1}, d={}, e=(), g=0):\n    pass\n");
        let f = &decls.functions[0];
        assert_eq!(
            f.defaults,
            vec![
                DefaultValue::List,
                DefaultValue::Other, // set() is a call, not a display
                DefaultValue::Set,
                DefaultValue::Dict,
                DefaultValue::Other,
                DefaultValue::Other,
            ]
        );
    }

    #[test]
    fn test_bindings_in_body() {
        let decls = parse(
            r#"
def f(self):
    Bad = 1
    good = 2
    a, Wrong = 1, 2
    self.Attr = 3
"#,
        );
        let f = &decls.functions[0];
        let names: Vec<_> = f.bindings.iter().map(|b| b.name.as_str()).collect();
        // attribute target binds no local name
        assert_eq!(names, vec!["Bad", "good", "a", "Wrong"]);
        assert_eq!(f.bindings[0].line, 3);
        assert_eq!(f.bindings[3].line, 5);
    }

    #[test]
    fn test_bindings_include_nested_scopes() {
        let decls = parse(
            r#"
def outer():
    def inner():
        Deep = 1
    outer_var = 2
"#,
        );

        let outer = decls.functions.iter().find(|f| f.name == "outer").unwrap();
        let outer_names: Vec<_> = outer.bindings.iter().map(|b| b.name.as_str()).collect();
        assert!(outer_names.contains(&"Deep"));
        assert!(outer_names.contains(&"outer_var"));

        let inner = decls.functions.iter().find(|f| f.name == "inner").unwrap();
        let inner_names: Vec<_> = inner.bindings.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(inner_names, vec!["Deep"]);
    }

    #[test]
    fn test_loop_and_with_bindings() {
        let decls = parse(
            r#"
def f(items):
    for Idx, value in enumerate(items):
        total = value
    with open('x') as FH:
        pass
"#,
        );
        let names: Vec<_> = decls.functions[0]
            .bindings
            .iter()
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(names, vec!["Idx", "value", "total", "FH"]);
    }

    #[test]
    fn test_comprehension_targets_bind() {
        let decls = parse("def f(items):\n    return [Bad * 2 for Bad in items]\n");
        let names: Vec<_> = decls.functions[0]
            .bindings
            .iter()
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(names, vec!["Bad"]);
        assert_eq!(decls.functions[0].bindings[0].line, 2);
    }

    #[test]
    fn test_all_comprehension_forms_bind() {
        let decls = parse(
            r#"
def f(items):
    pairs = {Key: 1 for Key in items}
    lazy = (V for V in items if V)
"#,
        );
        let names: Vec<_> = decls.functions[0]
            .bindings
            .iter()
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(names, vec!["pairs", "Key", "lazy", "V"]);
    }

    #[test]
    fn test_positional_only_parameters_are_positional() {
        let decls = parse("def f(a, b, /, c):\n    pass\n");
        assert_eq!(decls.functions[0].args, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_augmented_assignment_binds() {
        let decls = parse("def f():\n    Count = 0\n    Count += 1\n");
        let names: Vec<_> = decls.functions[0]
            .bindings
            .iter()
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(names, vec!["Count", "Count"]);
    }

    #[test]
    fn test_syntax_error_is_fatal() {
        let err = PythonParser::new().parse("bad.py", "def broken(:\n");
        assert!(err.is_err());
        assert!(err.unwrap_err().to_string().contains("bad.py"));
    }

    #[test]
    fn test_empty_module() {
        let decls = parse("");
        assert!(decls.classes.is_empty());
        assert!(decls.functions.is_empty());
    }
}
