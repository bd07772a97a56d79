//! Strict-mode checks over a TypeScript source unit.
//!
//! This is not a type checker. It covers the strict-mode diagnostics that
//! can be decided from syntax alone: implicit `any` parameters, unused
//! locals and parameters, missing returns and primitive literal mismatches.

use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor};

use super::typescript::{CompilerOptions, DiagnosticCategory, SourceUnit, TsDiagnostic};
use crate::error::ParseError;

const FUNCTION_QUERY: &str = r#"
(function_declaration) @function
(generator_function_declaration) @function
(function_expression) @function
(arrow_function) @function
(method_definition) @function
"#;

const DECLARATOR_QUERY: &str = r#"
(variable_declarator
  name: (identifier) @name)
"#;

/// Node kinds that open a new function scope.
const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "generator_function",
    "arrow_function",
    "method_definition",
];

/// Statement nesting followed when deciding whether a body returns.
const MAX_STATEMENT_DEPTH: usize = 256;

/// Return types that do not require a returned value.
const VOID_LIKE: &[&str] = &["void", "any", "undefined", "never", "unknown"];

struct Parameter<'t> {
    name: &'t str,
    node: Node<'t>,
    typed: bool,
    rest: bool,
    property: bool,
}

/// Runs every check over one unit.
pub struct Checker<'u, 'a> {
    unit: &'u SourceUnit<'a>,
    options: CompilerOptions,
    functions: Query,
    declarators: Query,
    /// Every identifier reference as (name, start byte).
    references: Vec<(&'a str, usize)>,
    is_module: bool,
}

impl<'u, 'a> Checker<'u, 'a> {
    pub fn new(unit: &'u SourceUnit<'a>, options: CompilerOptions) -> Result<Self, ParseError> {
        let functions = Query::new(unit.language(), FUNCTION_QUERY)?;
        let declarators = Query::new(unit.language(), DECLARATOR_QUERY)?;

        let root = unit.tree().root_node();
        let text = unit.text();
        let mut references = Vec::new();
        walk(root, |node| {
            if matches!(node.kind(), "identifier" | "shorthand_property_identifier") {
                if let Ok(name) = node.utf8_text(text.as_bytes()) {
                    references.push((name, node.start_byte()));
                }
            }
            true
        });

        let mut cursor = root.walk();
        let is_module = root
            .named_children(&mut cursor)
            .any(|child| matches!(child.kind(), "import_statement" | "export_statement"));

        Ok(Self {
            unit,
            options,
            functions,
            declarators,
            references,
            is_module,
        })
    }

    /// All diagnostics, in discovery order.
    pub fn check(&self) -> Vec<TsDiagnostic> {
        let mut out = Vec::new();
        for function in self.captures(&self.functions, "function") {
            self.check_function(function, &mut out);
        }
        for name in self.captures(&self.declarators, "name") {
            self.check_declarator(name, &mut out);
        }
        out
    }

    fn captures(&self, query: &Query, capture: &str) -> Vec<Node<'u>> {
        let Some(index) = query.capture_index_for_name(capture) else {
            return Vec::new();
        };
        let unit: &'u SourceUnit<'a> = self.unit;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(query, unit.tree().root_node(), unit.text().as_bytes());

        let mut nodes = Vec::new();
        while let Some(m) = matches.next() {
            for capture in m.captures {
                if capture.index == index {
                    nodes.push(capture.node);
                }
            }
        }
        nodes
    }

    fn text(&self, node: Node) -> &'a str {
        node.utf8_text(self.unit.text().as_bytes()).unwrap_or("")
    }

    fn check_function(&self, function: Node<'u>, out: &mut Vec<TsDiagnostic>) {
        let parameters = self.parameters(function);

        if !is_contextually_typed(function) {
            for param in parameters.iter().filter(|p| !p.typed) {
                out.push(self.implicit_any(param));
            }
        }

        if matches!(function.kind(), "function_declaration" | "generator_function_declaration")
            && (self.is_module || has_function_ancestor(function))
            && !is_exported(function)
        {
            if let Some(name) = function.child_by_field_name("name") {
                self.check_unused_local(name, out);
            }
        }

        let Some(body) = function.child_by_field_name("body") else {
            return;
        };

        for param in &parameters {
            if param.property || param.name.starts_with('_') {
                continue;
            }
            if self.references_within(param.name, body) == 0 {
                out.push(diagnostic(
                    6133,
                    self.options.no_unused_parameters,
                    param.node.start_byte(),
                    format!("'{}' is declared but its value is never read.", param.name),
                ));
            }
        }

        if body.kind() == "statement_block" && !is_generator(function) {
            self.check_returns(function, body, out);
        }
    }

    fn implicit_any(&self, param: &Parameter) -> TsDiagnostic {
        let enabled = self.options.implicit_any_is_error();
        let (code, message) = match (param.rest, enabled) {
            (true, _) => (7019, format!("Rest parameter '{}' implicitly has an 'any[]' type.", param.name)),
            (false, true) => (7006, format!("Parameter '{}' implicitly has an 'any' type.", param.name)),
            (false, false) => (
                7044,
                format!(
                    "Parameter '{}' implicitly has an 'any' type, but a better type may be inferred from usage.",
                    param.name
                ),
            ),
        };
        diagnostic(code, enabled, param.node.start_byte(), message)
    }

    fn check_returns(&self, function: Node, body: Node, out: &mut Vec<TsDiagnostic>) {
        let return_type = function
            .child_by_field_name("return_type")
            .and_then(|annotation| annotation.named_child(0));
        let void_like = return_type.is_some_and(|t| is_void_like(self.text(t)));

        let mut value_returns = 0;
        walk(body, |node| {
            if node.kind() == "return_statement" && node.named_child_count() > 0 {
                value_returns += 1;
            }
            node.id() == body.id() || !FUNCTION_KINDS.contains(&node.kind())
        });
        let always = always_returns(body);

        if let Some(return_type) = return_type {
            if !void_like && value_returns == 0 && !always {
                out.push(TsDiagnostic::error(
                    2355,
                    return_type.start_byte(),
                    "A function whose declared type is neither 'undefined', 'void', nor 'any' must return a value.",
                ));
            }
        }

        if self.options.no_implicit_returns && !void_like && value_returns > 0 && !always {
            let at = function.child_by_field_name("name").unwrap_or(function);
            out.push(TsDiagnostic::error(
                7030,
                at.start_byte(),
                "Not all code paths return a value.",
            ));
        }
    }

    fn check_declarator(&self, name: Node, out: &mut Vec<TsDiagnostic>) {
        let Some(declarator) = name.parent() else {
            return;
        };

        if (self.is_module || has_function_ancestor(declarator)) && !is_exported(declarator) {
            self.check_unused_local(name, out);
        }

        let declared = declarator
            .child_by_field_name("type")
            .and_then(|annotation| annotation.named_child(0))
            .filter(|t| t.kind() == "predefined_type")
            .map(|t| self.text(t));
        let literal = declarator
            .child_by_field_name("value")
            .and_then(|value| literal_type(value.kind()));

        if let (Some(declared), Some(literal)) = (declared, literal) {
            if !matches!(declared, "string" | "number" | "boolean") || declared == literal {
                return;
            }
            if matches!(literal, "null" | "undefined") && !self.options.checks_nulls() {
                return;
            }
            out.push(TsDiagnostic::error(
                2322,
                name.start_byte(),
                format!("Type '{}' is not assignable to type '{}'.", literal, declared),
            ));
        }
    }

    fn check_unused_local(&self, name: Node, out: &mut Vec<TsDiagnostic>) {
        let text = self.text(name);
        if text.is_empty() || text.starts_with('_') {
            return;
        }
        let start = name.start_byte();
        let used = self
            .references
            .iter()
            .any(|&(other, at)| other == text && at != start);
        if !used {
            out.push(diagnostic(
                6133,
                self.options.no_unused_locals,
                start,
                format!("'{}' is declared but its value is never read.", text),
            ));
        }
    }

    fn references_within(&self, name: &str, scope: Node) -> usize {
        let range = scope.byte_range();
        self.references
            .iter()
            .filter(|&&(other, at)| other == name && range.contains(&at))
            .count()
    }

    fn parameters(&self, function: Node<'u>) -> Vec<Parameter<'u>> {
        if let Some(single) = function.child_by_field_name("parameter") {
            return vec![Parameter {
                name: self.text(single),
                node: single,
                typed: false,
                rest: false,
                property: false,
            }];
        }

        let Some(list) = function.child_by_field_name("parameters") else {
            return Vec::new();
        };

        let mut params = Vec::new();
        let mut cursor = list.walk();
        for param in list.named_children(&mut cursor) {
            if !matches!(param.kind(), "required_parameter" | "optional_parameter") {
                continue;
            }
            let Some(pattern) = param.child_by_field_name("pattern") else {
                continue;
            };
            let (node, rest) = match pattern.kind() {
                "identifier" => (pattern, false),
                "rest_pattern" => match pattern.named_child(0) {
                    Some(inner) if inner.kind() == "identifier" => (inner, true),
                    _ => continue,
                },
                _ => continue,
            };

            let mut inner = param.walk();
            let property = param
                .children(&mut inner)
                .any(|c| matches!(c.kind(), "accessibility_modifier" | "readonly"));

            params.push(Parameter {
                name: self.text(node),
                node,
                typed: param.child_by_field_name("type").is_some()
                    || param.child_by_field_name("value").is_some(),
                rest,
                property,
            });
        }
        params
    }
}

fn diagnostic(code: u32, enabled: bool, start: usize, message: String) -> TsDiagnostic {
    TsDiagnostic {
        code,
        category: if enabled {
            DiagnosticCategory::Error
        } else {
            DiagnosticCategory::Suggestion
        },
        start: Some(start),
        message,
    }
}

/// Pre-order walk; `visit` returns whether to descend into the node.
fn walk<'t>(root: Node<'t>, mut visit: impl FnMut(Node<'t>) -> bool) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if !visit(node) {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
}

/// Callbacks passed as arguments or assigned to typed bindings get their
/// parameter types from context.
fn is_contextually_typed(function: Node) -> bool {
    if !matches!(function.kind(), "arrow_function" | "function_expression") {
        return false;
    }

    let mut parent = function.parent();
    while let Some(p) = parent.filter(|p| p.kind() == "parenthesized_expression") {
        parent = p.parent();
    }

    parent.is_some_and(|p| match p.kind() {
        "arguments" | "as_expression" | "satisfies_expression" => true,
        "variable_declarator" | "public_field_definition" => p.child_by_field_name("type").is_some(),
        _ => false,
    })
}

fn has_function_ancestor(node: Node) -> bool {
    let mut current = node.parent();
    while let Some(p) = current {
        if FUNCTION_KINDS.contains(&p.kind()) {
            return true;
        }
        current = p.parent();
    }
    false
}

fn is_exported(node: Node) -> bool {
    let mut current = node.parent();
    while let Some(p) = current {
        match p.kind() {
            "export_statement" => return true,
            "program" => return false,
            _ => current = p.parent(),
        }
    }
    false
}

fn is_generator(function: Node) -> bool {
    matches!(function.kind(), "generator_function_declaration" | "generator_function")
        || (function.kind() == "method_definition" && {
            let mut cursor = function.walk();
            let found = function.children(&mut cursor).any(|c| c.kind() == "*");
            found
        })
}

fn is_void_like(type_text: &str) -> bool {
    let text = type_text.trim();
    text.starts_with("Promise<void")
        || text
            .split('|')
            .map(str::trim)
            .any(|part| VOID_LIKE.contains(&part))
}

fn literal_type(kind: &str) -> Option<&'static str> {
    match kind {
        "string" | "template_string" => Some("string"),
        "number" => Some("number"),
        "true" | "false" => Some("boolean"),
        "null" => Some("null"),
        "undefined" => Some("undefined"),
        _ => None,
    }
}

/// Whether every path through a statement ends in `return` or `throw`, or
/// never reaches the statement's end.
fn always_returns(node: Node) -> bool {
    returns_within(node, 0)
}

fn returns_within(node: Node, depth: usize) -> bool {
    // Too deep to tell; stay quiet rather than report a missing return.
    if depth > MAX_STATEMENT_DEPTH {
        return true;
    }
    let returns = |n: Node| returns_within(n, depth + 1);

    match node.kind() {
        "return_statement" | "throw_statement" => true,
        "statement_block" => {
            let mut cursor = node.walk();
            let found = node.named_children(&mut cursor).any(returns);
            found
        }
        "if_statement" => {
            match (
                node.child_by_field_name("consequence"),
                node.child_by_field_name("alternative"),
            ) {
                (Some(then), Some(otherwise)) => returns(then) && returns(otherwise),
                _ => false,
            }
        }
        "else_clause" => node.named_child(0).is_some_and(returns),
        "labeled_statement" => node.child_by_field_name("body").is_some_and(returns),
        "try_statement" => {
            let finally = node
                .child_by_field_name("finalizer")
                .and_then(|f| f.child_by_field_name("body"));
            if finally.is_some_and(returns) {
                return true;
            }
            let body = node.child_by_field_name("body").is_some_and(returns);
            let handler = node
                .child_by_field_name("handler")
                .map_or(true, |h| h.child_by_field_name("body").is_some_and(returns));
            body && handler
        }
        "switch_statement" => switch_always_returns(node, depth),
        "while_statement" | "do_statement" | "for_statement" => {
            is_endless_loop(node) && !escapes(node, Escape::Loop)
        }
        _ => false,
    }
}

/// A switch with a `default` clause that nothing breaks out of ends in its
/// last clause, so it returns when that clause does.
fn switch_always_returns(switch: Node, depth: usize) -> bool {
    let Some(body) = switch.child_by_field_name("body") else {
        return false;
    };
    let mut cursor = body.walk();
    let clauses: Vec<Node> = body.named_children(&mut cursor).collect();

    if !clauses.iter().any(|c| c.kind() == "switch_default") || escapes(switch, Escape::Switch) {
        return false;
    }
    clauses.last().is_some_and(|last| {
        let mut cursor = last.walk();
        let found = last
            .children_by_field_name("body", &mut cursor)
            .any(|statement| returns_within(statement, depth + 1));
        found
    })
}

/// `while (true)`, `do .. while (true)` and `for (;;)`.
fn is_endless_loop(node: Node) -> bool {
    let Some(condition) = node.child_by_field_name("condition") else {
        return node.kind() == "for_statement";
    };
    let mut current = condition;
    loop {
        match current.kind() {
            // `for (;;)` parses its condition as an empty statement
            "true" | "empty_statement" => return true,
            "parenthesized_expression" => match current.named_child(0) {
                Some(inner) => current = inner,
                None => return false,
            },
            _ => return false,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Escape {
    Loop,
    Switch,
}

/// Whether a `break` (or, for a switch, a `continue`) can leave `target`.
///
/// Unlabeled jumps bind to the nearest enclosing loop or switch; labeled ones
/// are assumed to leave.
fn escapes(target: Node, kind: Escape) -> bool {
    // (node, inside a nested loop, inside a nested switch)
    let mut stack: Vec<(Node, bool, bool)> = Vec::new();
    let mut cursor = target.walk();
    stack.extend(target.named_children(&mut cursor).map(|c| (c, false, false)));

    while let Some((node, in_loop, in_switch)) = stack.pop() {
        let labeled = node.child_by_field_name("label").is_some();
        match node.kind() {
            "break_statement" if labeled || !(in_loop || in_switch) => return true,
            "continue_statement" if kind == Escape::Switch && (labeled || !in_loop) => return true,
            other if FUNCTION_KINDS.contains(&other) || other == "class_body" => continue,
            _ => {}
        }

        let (in_loop, in_switch) = match node.kind() {
            "while_statement" | "do_statement" | "for_statement" | "for_in_statement" => (true, in_switch),
            "switch_statement" => (in_loop, true),
            _ => (in_loop, in_switch),
        };
        let mut cursor = node.walk();
        stack.extend(node.named_children(&mut cursor).map(|c| (c, in_loop, in_switch)));
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::typescript::{Program, SNIPPET_FILE_NAME};

    fn check_with(code: &str, options: CompilerOptions) -> Vec<(u32, String)> {
        let unit = SourceUnit::parse(SNIPPET_FILE_NAME, code).unwrap();
        Program::new(&unit, options)
            .semantic_diagnostics()
            .unwrap()
            .into_iter()
            .filter(|d| d.category == DiagnosticCategory::Error)
            .map(|d| (d.code, d.message))
            .collect()
    }

    fn check(code: &str) -> Vec<(u32, String)> {
        check_with(code, CompilerOptions::strict())
    }

    fn codes(code: &str) -> Vec<u32> {
        check(code).into_iter().map(|(c, _)| c).collect()
    }

    #[test]
    fn test_implicit_any() {
        let diags = check("function add(a, b) { return a + b; }");
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0], (7006, "Parameter 'a' implicitly has an 'any' type.".to_string()));
        assert_eq!(diags[1].1, "Parameter 'b' implicitly has an 'any' type.");
    }

    #[test]
    fn test_callback_is_contextually_typed() {
        assert!(codes("[1, 2].map(n => n * 2);").is_empty());
        assert!(codes("const f: (x: number) => number = x => x;").is_empty());
    }

    #[test]
    fn test_rest_parameter() {
        assert_eq!(codes("function f(...items) { return items; }"), vec![7019]);
    }

    #[test]
    fn test_unused_parameter() {
        let diags = check("function f(a: number, _b: number): number { return 1; }");
        assert_eq!(diags, vec![(6133, "'a' is declared but its value is never read.".to_string())]);
    }

    #[test]
    fn test_unused_local_in_function() {
        let diags = check("function f(): number {\n  const unused = 1;\n  return 2;\n}");
        assert_eq!(diags, vec![(6133, "'unused' is declared but its value is never read.".to_string())]);
    }

    #[test]
    fn test_script_top_level_is_not_local() {
        assert!(codes("const top = 1;").is_empty());
    }

    #[test]
    fn test_module_top_level_is_local() {
        assert_eq!(codes("import { a } from \"./a\";\nconst b = a;"), vec![6133]);
        assert!(codes("import { a } from \"./a\";\nexport const b = a;").is_empty());
    }

    #[test]
    fn test_not_all_paths_return() {
        let code = "function f(x: boolean): number {\n  if (x) {\n    return 1;\n  }\n}";
        assert_eq!(codes(code), vec![7030]);
    }

    #[test]
    fn test_all_paths_return() {
        let code = "function f(x: boolean): number {\n  if (x) {\n    return 1;\n  } else {\n    return 2;\n  }\n}";
        assert!(codes(code).is_empty());
        assert!(codes("function g(): number { throw new Error(\"no\"); }").is_empty());
    }

    #[test]
    fn test_exhaustive_switch_returns() {
        let code = "function f(x: number): number {\n  switch (x) {\n    case 1:\n      return 1;\n    case 2:\n    default:\n      return 0;\n  }\n}";
        assert!(codes(code).is_empty());
    }

    #[test]
    fn test_switch_that_can_fall_out() {
        let no_default = "function f(x: number): number {\n  switch (x) {\n    case 1:\n      return 1;\n  }\n}";
        assert_eq!(codes(no_default), vec![7030]);

        let breaks = "function f(x: number): number {\n  switch (x) {\n    case 1:\n      if (x > 0) break;\n      return 1;\n    default:\n      return 0;\n  }\n}";
        assert_eq!(codes(breaks), vec![7030]);

        let inner_loop_break = "function f(x: number): number {\n  switch (x) {\n    default:\n      for (const y of [1]) { break; }\n      return 0;\n  }\n}";
        assert!(codes(inner_loop_break).is_empty());
    }

    #[test]
    fn test_endless_loops_never_complete() {
        assert!(codes("function f(x: number): number {\n  while (true) {\n    return x;\n  }\n}").is_empty());
        assert!(codes("function f(x: number): number {\n  for (;;) {\n    if (x) return x;\n  }\n}").is_empty());
        assert!(codes("function f(x: number): number {\n  do {\n    return x;\n  } while (true);\n}").is_empty());
    }

    #[test]
    fn test_loops_that_can_finish() {
        let breaks = "function f(x: number): number {\n  while (true) {\n    if (x) break;\n    return 1;\n  }\n}";
        assert_eq!(codes(breaks), vec![7030]);

        let bounded = "function f(x: number): number {\n  while (x > 0) {\n    return 1;\n  }\n}";
        assert_eq!(codes(bounded), vec![7030]);

        let nested_switch_break = "function f(x: number): number {\n  while (true) {\n    switch (x) {\n      case 1:\n        break;\n    }\n    return 1;\n  }\n}";
        assert!(codes(nested_switch_break).is_empty());
    }

    #[test]
    fn test_deeply_nested_blocks() {
        let depth = 5000;
        let code = format!(
            "function f(x: number): number {{\n  if (x) return 1;\n{}return 2;{}\n}}",
            "{".repeat(depth),
            "}".repeat(depth)
        );
        assert!(codes(&code).is_empty());
    }

    #[test]
    fn test_missing_return_value() {
        assert_eq!(codes("function f(): number {\n}"), vec![2355]);
        assert!(codes("function f(): void {\n}").is_empty());
        assert!(codes("async function f(): Promise<void> {\n}").is_empty());
    }

    #[test]
    fn test_literal_mismatch() {
        let diags = check("let n: number = \"x\";");
        assert_eq!(
            diags,
            vec![(2322, "Type 'string' is not assignable to type 'number'.".to_string())]
        );
        assert!(codes("let ok: string = \"x\";").is_empty());
    }

    #[test]
    fn test_null_needs_strict_null_checks() {
        assert_eq!(codes("let s: string = null;"), vec![2322]);
        assert!(check_with("let s: string = null;", CompilerOptions::default()).is_empty());
    }

    #[test]
    fn test_relaxed_options_downgrade_to_suggestions() {
        let unit = SourceUnit::parse(SNIPPET_FILE_NAME, "function f(a) { return 1; }").unwrap();
        let diags = Program::new(&unit, CompilerOptions::default())
            .semantic_diagnostics()
            .unwrap();
        assert!(!diags.is_empty());
        assert!(diags.iter().all(|d| d.category == DiagnosticCategory::Suggestion));
    }

    #[test]
    fn test_sorted_by_position() {
        let unit = SourceUnit::parse(
            SNIPPET_FILE_NAME,
            "let n: number = \"x\";\nfunction add(a, b) { return a + b; }",
        )
        .unwrap();
        let diags = Program::new(&unit, CompilerOptions::strict())
            .semantic_diagnostics()
            .unwrap();
        let starts: Vec<_> = diags.iter().map(|d| d.start.unwrap()).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
        assert_eq!(diags[0].code, 2322);
    }
}
