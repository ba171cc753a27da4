//! Breadth-first structural extraction.
//!
//! Nodes are visited level by level the way Python's `ast.walk` does, so a
//! module-level function is listed before the methods and closures nested
//! below it. Wrapper nodes the tree-sitter grammar adds (`block`,
//! `decorated_definition`, `else_clause`, ...) are spliced into their parent
//! so depths line up with Python AST levels.

use std::collections::VecDeque;

use repometer_types::ImportCounts;
use tree_sitter::Node;

/// What a module defines, imports and calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleStructure {
    /// `def` and `async def` names, nested ones included.
    pub function_names: Vec<String>,
    pub num_classes: usize,
    /// Top-level package name -> number of import statements naming it.
    pub imports: ImportCounts,
    /// Dotted callee names.
    pub function_calls: Vec<String>,
}

pub(crate) fn extract(root: Node<'_>, source: &[u8]) -> ModuleStructure {
    let mut out = ModuleStructure::default();
    let mut queue = VecDeque::from([root]);

    while let Some(node) = queue.pop_front() {
        match node.kind() {
            "function_definition" => {
                if let Some(name) = field_text(node, "name", source) {
                    out.function_names.push(name.to_string());
                }
            }
            "class_definition" => out.num_classes += 1,
            "import_statement" => {
                let mut cursor = node.walk();
                for name in node.children_by_field_name("name", &mut cursor) {
                    let dotted = if name.kind() == "aliased_import" {
                        name.child_by_field_name("name")
                    } else {
                        Some(name)
                    };
                    if let Some(package) = dotted.and_then(|n| top_level_package(n, source)) {
                        count(&mut out.imports, package);
                    }
                }
            }
            "import_from_statement" => {
                if let Some(package) = node
                    .child_by_field_name("module_name")
                    .and_then(|module| from_module_package(module, source))
                {
                    count(&mut out.imports, package);
                }
            }
            "future_import_statement" => count(&mut out.imports, "__future__"),
            "call" => {
                if let Some(name) = node
                    .child_by_field_name("function")
                    .and_then(|callee| dotted_name(callee, source))
                {
                    out.function_calls.push(name);
                }
            }
            _ => {}
        }

        queue.extend(ast_children(node));
    }

    out
}

/// Children in Python AST order: wrappers are spliced in place and the
/// decorators of a definition follow its body.
fn ast_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut out = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        push_spliced(child, &mut out);
    }

    if matches!(node.kind(), "function_definition" | "class_definition")
        && let Some(parent) = node.parent().filter(|p| p.kind() == "decorated_definition")
    {
        let mut cursor = parent.walk();
        for decorator in parent
            .named_children(&mut cursor)
            .filter(|c| c.kind() == "decorator")
        {
            let mut inner = decorator.walk();
            out.extend(decorator.named_children(&mut inner));
        }
    }
    out
}

fn push_spliced<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    match node.kind() {
        "block" | "else_clause" | "finally_clause" | "with_clause" | "argument_list" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                push_spliced(child, out);
            }
        }
        "decorated_definition" => {
            if let Some(definition) = node.child_by_field_name("definition") {
                out.push(definition);
            }
        }
        // `x = f()` is one `Assign` statement in Python.
        "expression_statement" => match node.named_child(0) {
            Some(inner)
                if node.named_child_count() == 1
                    && matches!(inner.kind(), "assignment" | "augmented_assignment") =>
            {
                out.push(inner)
            }
            _ => out.push(node),
        },
        "comment" => {}
        _ => out.push(node),
    }
}

fn count(imports: &mut ImportCounts, name: &str) {
    *imports.entry(name.to_string()).or_insert(0) += 1;
}

fn field_text<'a>(node: Node<'_>, field: &str, source: &'a [u8]) -> Option<&'a str> {
    node.child_by_field_name(field)?.utf8_text(source).ok()
}

/// First segment of a `dotted_name`.
fn top_level_package<'a>(node: Node<'_>, source: &'a [u8]) -> Option<&'a str> {
    let text = node.utf8_text(source).ok()?;
    text.split('.').next().map(str::trim).filter(|s| !s.is_empty())
}

/// `from a.b import x` names `a`; `from ..a.b import x` names `a`;
/// `from . import x` names nothing.
fn from_module_package<'a>(module: Node<'_>, source: &'a [u8]) -> Option<&'a str> {
    match module.kind() {
        "dotted_name" => top_level_package(module, source),
        "relative_import" => {
            let mut cursor = module.walk();
            let dotted = module
                .named_children(&mut cursor)
                .find(|child| child.kind() == "dotted_name")?;
            top_level_package(dotted, source)
        }
        _ => None,
    }
}

/// `f` for an identifier callee, `a.b.c` for an attribute chain rooted at an
/// identifier, `None` for anything else.
fn dotted_name(callee: Node<'_>, source: &[u8]) -> Option<String> {
    let mut parts = Vec::new();
    let mut node = callee;
    while node.kind() == "attribute" {
        parts.push(field_text(node, "attribute", source)?);
        node = node.child_by_field_name("object")?;
    }
    if node.kind() != "identifier" {
        return None;
    }
    parts.push(node.utf8_text(source).ok()?);
    parts.reverse();
    Some(parts.join("."))
}
