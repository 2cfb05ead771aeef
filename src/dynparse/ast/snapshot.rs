//! AST Snapshot - a normalized, owned representation of the tree
//!
//! The snapshot is format-agnostic: JSON and YAML output both serialize it, so neither has to
//! walk the arena itself.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::node::{Ast, Node};

/// A snapshot of an AST node and its descendants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstSnapshot {
    /// `rule` or `literal`
    pub node_type: String,

    /// Rule name or literal text
    pub label: String,

    /// Input units covered by the node
    pub span: Range<usize>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    pub fn new(node_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            span: 0..0,
            children: Vec::new(),
        }
    }

    pub fn with_span(mut self, span: Range<usize>) -> Self {
        self.span = span;
        self
    }

    pub fn with_children(mut self, children: Vec<AstSnapshot>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Snapshot a node and all of its descendants
pub fn snapshot_node(node: Node<'_>) -> AstSnapshot {
    AstSnapshot::new(node.kind().node_type(), node.value())
        .with_span(node.span())
        .with_children(node.children().map(snapshot_node).collect())
}

pub fn snapshot_from_ast(ast: &Ast) -> AstSnapshot {
    snapshot_node(ast.root())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_mirrors_tree() {
        let mut ast = Ast::new("greeting");
        let root = ast.root_id();
        let hello = ast.create_literal("hello");
        ast.add_child(root, hello).unwrap();

        let snapshot = snapshot_from_ast(&ast);
        assert_eq!(snapshot.node_type, "rule");
        assert_eq!(snapshot.label, "greeting");
        assert_eq!(
            snapshot.children,
            vec![AstSnapshot::new("literal", "hello")]
        );
    }
}
