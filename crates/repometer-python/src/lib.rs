//! # repometer-python
//!
//! **Tier 1 (Parsing)**
//!
//! Python source analysis on a tree-sitter parse tree: function and class
//! discovery, import usage, call sites and, behind the `cyclomatic` feature,
//! radon-style block complexity.
//!
//! ## What belongs here
//! * Parsing and syntax-error detection
//! * Structural extraction in breadth-first order
//! * Exact cyclomatic complexity
//!
//! ## What does NOT belong here
//! * Line counting (use repometer-content)
//! * Deciding how a failure is recorded (use repometer-analysis)

#[cfg(feature = "cyclomatic")]
pub mod cyclomatic;
pub mod structure;

use tree_sitter::{Node, Parser, Tree};

pub use structure::ModuleStructure;

/// Statement kinds the grammar accepts for Python 2 compatibility but
/// Python 3 rejects.
const LEGACY_KINDS: &[&str] = &["print_statement", "exec_statement"];

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to load the Python grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("parser produced no tree")]
    NoTree,
    #[error("syntax error at line {line}")]
    Syntax { line: usize },
}

/// A successfully parsed module together with its source text.
pub struct ParsedModule<'s> {
    tree: Tree,
    source: &'s str,
}

impl std::fmt::Debug for ParsedModule<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedModule")
            .field("root", &self.tree.root_node().kind())
            .field("bytes", &self.source.len())
            .finish()
    }
}

/// Parse Python source, rejecting trees with error or missing nodes.
pub fn parse(source: &str) -> Result<ParsedModule<'_>, ParseError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_python::LANGUAGE.into())?;
    let tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;

    if let Some(bad) = first_invalid(tree.root_node()) {
        return Err(ParseError::Syntax {
            line: bad.start_position().row + 1,
        });
    }

    Ok(ParsedModule { tree, source })
}

impl<'s> ParsedModule<'s> {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Functions, classes, imports and calls in breadth-first order.
    pub fn structure(&self) -> ModuleStructure {
        structure::extract(self.root(), self.source.as_bytes())
    }

    /// Per-block complexity scores: top-level functions, then each class
    /// followed by its methods.
    #[cfg(feature = "cyclomatic")]
    pub fn cyclomatic(&self) -> Vec<u32> {
        cyclomatic::block_scores(self.root())
    }
}

fn first_invalid(root: Node<'_>) -> Option<Node<'_>> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() || LEGACY_KINDS.contains(&node.kind()) {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}
