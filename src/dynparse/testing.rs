//! Fluent assertions for parsed trees
//!
//! Checking a tree by hand means a chain of `child(i).unwrap()` calls and `assert_eq!`s that
//! hide the shape being tested. `assert_ast` mirrors the tree instead:
//!
//! ```rust,ignore
//! assert_ast(&ast)
//!     .rule("root")
//!     .child_count(3)
//!     .child(0, |c| { c.literal("("); })
//!     .child(1, |c| {
//!         c.rule("inner").child(0, |x| { x.literal("x"); });
//!     });
//! ```
//!
//! Failures name the path to the offending node, e.g. `root.children[1]`, and count
//! mismatches list what was actually there.

use std::ops::Range;

use crate::dynparse::ast::{Ast, Node};

pub fn assert_ast(ast: &Ast) -> NodeAssertion<'_> {
    NodeAssertion {
        node: ast.root(),
        context: "root".to_string(),
    }
}

pub struct NodeAssertion<'a> {
    node: Node<'a>,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    /// Assert this is a rule node with the given name
    pub fn rule(self, expected: &str) -> Self {
        match self.node.rule() {
            Some(name) => assert_eq!(
                name, expected,
                "{}: Expected rule '{}', found rule '{}'",
                self.context, expected, name
            ),
            None => panic!(
                "{}: Expected rule '{}', found literal {:?}",
                self.context,
                expected,
                self.node.value()
            ),
        }
        self
    }

    /// Assert this is a literal node with the given value
    pub fn literal(self, expected: &str) -> Self {
        match self.node.literal_value() {
            Some(value) => assert_eq!(
                value, expected,
                "{}: Expected literal {:?}, found literal {:?}",
                self.context, expected, value
            ),
            None => panic!(
                "{}: Expected literal {:?}, found rule '{}'",
                self.context,
                expected,
                self.node.value()
            ),
        }
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.child_count();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} children, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize_children(self.node)
        );
        self
    }

    /// Assert on a specific child by index
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let Some(child) = self.node.child(index) else {
            panic!(
                "{}: Child index {} out of bounds (node has {} children)",
                self.context,
                index,
                self.node.child_count()
            );
        };
        assertion(NodeAssertion {
            node: child,
            context: format!("{}.children[{}]", self.context, index),
        });
        self
    }

    /// Assert the literal leaves under this node concatenate to `expected`
    pub fn text(self, expected: &str) -> Self {
        let actual = self.node.text();
        assert_eq!(
            actual, expected,
            "{}: Expected text '{}', but got '{}'",
            self.context, expected, actual
        );
        self
    }

    pub fn span(self, expected: Range<usize>) -> Self {
        assert_eq!(
            self.node.span(),
            expected,
            "{}: Expected span {:?}, found {:?}",
            self.context,
            expected,
            self.node.span()
        );
        self
    }
}

fn summarize_children(node: Node<'_>) -> String {
    node.children()
        .map(|child| match child.literal_value() {
            Some(value) => format!("{:?}", value),
            None => child.value().to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "root.children[0]: Expected literal \"y\"")]
    fn test_failure_names_the_path() {
        let mut ast = Ast::new("root");
        let x = ast.create_literal("x");
        ast.add_child(ast.root_id(), x).unwrap();
        assert_ast(&ast).child(0, |c| {
            c.literal("y");
        });
    }

    #[test]
    #[should_panic(expected = "Expected 2 children, found 1: [\"x\"]")]
    fn test_count_mismatch_lists_children() {
        let mut ast = Ast::new("root");
        let x = ast.create_literal("x");
        ast.add_child(ast.root_id(), x).unwrap();
        assert_ast(&ast).child_count(2);
    }
}
