//! The AST produced by a successful parse
//!
//! The tree is an arena: [`Ast`] owns every node, children are stored as ordered lists of
//! [`NodeId`] handles, and each node keeps an `Option<NodeId>` back to its parent. The parent
//! handle is only used for navigation; ownership always flows from the arena.
//!
//! Read access goes through [`Node`], a cheap borrowed view. Edits go through `Ast` so that a
//! child's parent handle and its parent's child list never disagree.

use std::fmt;
use std::ops::Range;

use crate::dynparse::error::AstError;

/// Handle to a node inside one [`Ast`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two node kinds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A successful match of the named rule
    Rule(String),
    /// A literal matched verbatim
    Literal(String),
}

impl NodeKind {
    pub fn node_type(&self) -> &'static str {
        match self {
            NodeKind::Rule(_) => "rule",
            NodeKind::Literal(_) => "literal",
        }
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    span: Range<usize>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An AST: an arena of nodes plus the id of its root
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Ast {
    /// Start a tree whose root is a rule node with no children
    pub fn new(root_rule: impl Into<String>) -> Self {
        Self::with_root(NodeKind::Rule(root_rule.into()), 0..0)
    }

    pub(crate) fn with_root(kind: NodeKind, span: Range<usize>) -> Self {
        Self {
            nodes: vec![NodeData {
                kind,
                span,
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> Node<'_> {
        Node {
            ast: self,
            id: self.root,
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        self.nodes.get(id.0).map(|_| Node { ast: self, id })
    }

    /// Number of nodes in the arena, including detached ones
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create a detached rule node
    pub fn create_rule(&mut self, name: impl Into<String>) -> NodeId {
        self.push(NodeKind::Rule(name.into()), 0..0)
    }

    /// Create a detached literal node
    pub fn create_literal(&mut self, value: impl Into<String>) -> NodeId {
        self.push(NodeKind::Literal(value.into()), 0..0)
    }

    pub(crate) fn push(&mut self, kind: NodeKind, span: Range<usize>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            span,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Push a new node directly under `parent`; used while converting a fresh match tree
    pub(crate) fn push_child(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        span: Range<usize>,
    ) -> NodeId {
        let id = self.push(kind, span);
        self.nodes[id.0].parent = Some(parent);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append `child` to `parent`'s children, detaching it from any previous parent
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), AstError> {
        self.check(parent)?;
        self.check(child)?;
        if matches!(self.nodes[parent.0].kind, NodeKind::Literal(_)) {
            return Err(AstError::LiteralCannotHaveChildren(parent));
        }
        if child == self.root || self.is_ancestor_or_self(child, parent) {
            return Err(AstError::WouldCreateCycle { parent, child });
        }

        if let Some(old_parent) = self.nodes[child.0].parent {
            self.nodes[old_parent.0].children.retain(|&c| c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Detach `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), AstError> {
        self.check(parent)?;
        self.check(child)?;
        let children = &mut self.nodes[parent.0].children;
        let Some(index) = children.iter().position(|&c| c == child) else {
            return Err(AstError::NotAChild { parent, child });
        };
        children.remove(index);
        self.nodes[child.0].parent = None;
        Ok(())
    }

    /// Detach every child of `parent`
    pub fn remove_all_children(&mut self, parent: NodeId) -> Result<(), AstError> {
        self.check(parent)?;
        let children = std::mem::take(&mut self.nodes[parent.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        Ok(())
    }

    fn check(&self, id: NodeId) -> Result<(), AstError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(AstError::UnknownNode(id))
        }
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == candidate {
                return true;
            }
            match self.nodes[node.0].parent {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }
}

/// A borrowed view of one node
#[derive(Clone, Copy)]
pub struct Node<'a> {
    ast: &'a Ast,
    id: NodeId,
}

impl<'a> Node<'a> {
    fn data(&self) -> &'a NodeData {
        &self.ast.nodes[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &'a NodeKind {
        &self.data().kind
    }

    pub fn is_rule(&self) -> bool {
        matches!(self.kind(), NodeKind::Rule(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind(), NodeKind::Literal(_))
    }

    /// The rule name, `None` on literal nodes
    pub fn rule(&self) -> Option<&'a str> {
        match self.kind() {
            NodeKind::Rule(name) => Some(name),
            NodeKind::Literal(_) => None,
        }
    }

    /// The matched literal, `None` on rule nodes
    pub fn literal_value(&self) -> Option<&'a str> {
        match self.kind() {
            NodeKind::Literal(value) => Some(value),
            NodeKind::Rule(_) => None,
        }
    }

    /// The tag payload: rule name or literal text
    pub fn value(&self) -> &'a str {
        match self.kind() {
            NodeKind::Rule(name) => name,
            NodeKind::Literal(value) => value,
        }
    }

    /// The input units this node covers
    pub fn span(&self) -> Range<usize> {
        self.data().span.clone()
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        let ast = self.ast;
        self.data().parent.map(|id| Node { ast, id })
    }

    pub fn children(&self) -> impl ExactSizeIterator<Item = Node<'a>> + 'a {
        let ast = self.ast;
        self.data().children.iter().map(move |&id| Node { ast, id })
    }

    pub fn child(&self, index: usize) -> Option<Node<'a>> {
        let ast = self.ast;
        self.data()
            .children
            .get(index)
            .map(|&id| Node { ast, id })
    }

    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    /// First immediate child that is a rule node named `name`
    ///
    /// Only one level is scanned; use [`Node::find_rule`] to search the whole subtree.
    pub fn node_for_rule(&self, name: &str) -> Option<Node<'a>> {
        self.children().find(|child| child.rule() == Some(name))
    }

    /// Matched text of the immediate child captured under rule `name`
    pub fn value_for_symbol(&self, name: &str) -> Option<String> {
        self.node_for_rule(name).map(|node| node.text())
    }

    /// First rule node named `name` in this subtree, depth-first, excluding this node
    pub fn find_rule(&self, name: &str) -> Option<Node<'a>> {
        for child in self.children() {
            if child.rule() == Some(name) {
                return Some(child);
            }
            if let Some(found) = child.find_rule(name) {
                return Some(found);
            }
        }
        None
    }

    /// Literal leaves of this subtree, left to right
    pub fn leaves(&self) -> Vec<Node<'a>> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves(&self, out: &mut Vec<Node<'a>>) {
        if self.is_literal() {
            out.push(*self);
        }
        for child in self.children() {
            child.collect_leaves(out);
        }
    }

    /// Concatenation of the literal leaves, i.e. the input this node matched
    pub fn text(&self) -> String {
        self.leaves()
            .iter()
            .filter_map(|leaf| leaf.literal_value())
            .collect()
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tuple = f.debug_tuple(self.kind().node_type());
        tuple.field(&self.value());
        let children: Vec<Node<'_>> = self.children().collect();
        if !children.is_empty() {
            tuple.field(&children);
        }
        tuple.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Ast, NodeId, NodeId, NodeId) {
        let mut ast = Ast::new("call");
        let root = ast.root_id();
        let name = ast.create_rule("name");
        let f = ast.create_literal("f");
        let paren = ast.create_literal("(");
        ast.add_child(name, f).unwrap();
        ast.add_child(root, name).unwrap();
        ast.add_child(root, paren).unwrap();
        (ast, name, f, paren)
    }

    #[test]
    fn test_add_child_sets_parent() {
        let (ast, name, f, _) = sample();
        let f_node = ast.node(f).unwrap();
        assert_eq!(f_node.parent().unwrap().id(), name);
        assert_eq!(ast.root().child_count(), 2);
    }

    #[test]
    fn test_accessors_by_kind() {
        let (ast, name, f, _) = sample();
        let name_node = ast.node(name).unwrap();
        assert_eq!(name_node.rule(), Some("name"));
        assert_eq!(name_node.literal_value(), None);
        assert_eq!(name_node.value(), "name");

        let f_node = ast.node(f).unwrap();
        assert_eq!(f_node.rule(), None);
        assert_eq!(f_node.literal_value(), Some("f"));
        assert_eq!(f_node.value(), "f");
    }

    #[test]
    fn test_node_for_rule_is_one_level() {
        let (mut ast, name, _, _) = sample();
        let inner = ast.create_rule("inner");
        ast.add_child(name, inner).unwrap();

        let root = ast.root();
        assert_eq!(root.node_for_rule("name").map(|n| n.id()), Some(name));
        assert!(root.node_for_rule("inner").is_none());
        assert_eq!(root.find_rule("inner").map(|n| n.id()), Some(inner));
    }

    #[test]
    fn test_value_for_symbol() {
        let (ast, _, _, _) = sample();
        assert_eq!(ast.root().value_for_symbol("name"), Some("f".to_string()));
        assert_eq!(ast.root().value_for_symbol("missing"), None);
    }

    #[test]
    fn test_remove_child() {
        let (mut ast, name, _, paren) = sample();
        let root = ast.root_id();
        ast.remove_child(root, paren).unwrap();
        assert_eq!(ast.root().child_count(), 1);
        assert!(ast.node(paren).unwrap().parent().is_none());

        assert_eq!(
            ast.remove_child(root, paren),
            Err(AstError::NotAChild {
                parent: root,
                child: paren
            })
        );
        assert_eq!(ast.root().child(0).unwrap().id(), name);
    }

    #[test]
    fn test_remove_all_children() {
        let (mut ast, name, _, paren) = sample();
        let root = ast.root_id();
        ast.remove_all_children(root).unwrap();
        assert_eq!(ast.root().child_count(), 0);
        assert!(ast.node(name).unwrap().parent().is_none());
        assert!(ast.node(paren).unwrap().parent().is_none());
    }

    #[test]
    fn test_add_child_moves_between_parents() {
        let (mut ast, name, f, _) = sample();
        let root = ast.root_id();
        ast.add_child(root, f).unwrap();
        assert_eq!(ast.node(name).unwrap().child_count(), 0);
        assert_eq!(ast.node(f).unwrap().parent().unwrap().id(), root);
    }

    #[test]
    fn test_literal_cannot_have_children() {
        let (mut ast, _, f, paren) = sample();
        assert_eq!(
            ast.add_child(f, paren),
            Err(AstError::LiteralCannotHaveChildren(f))
        );
    }

    #[test]
    fn test_cycles_are_rejected() {
        let (mut ast, name, _, _) = sample();
        let root = ast.root_id();
        assert_eq!(
            ast.add_child(name, root),
            Err(AstError::WouldCreateCycle {
                parent: name,
                child: root
            })
        );
        assert_eq!(
            ast.add_child(name, name),
            Err(AstError::WouldCreateCycle {
                parent: name,
                child: name
            })
        );
    }

    #[test]
    fn test_unknown_node() {
        let (mut ast, _, _, _) = sample();
        let root = ast.root_id();
        let stray = NodeId(ast.len() + 3);
        assert_eq!(ast.add_child(root, stray), Err(AstError::UnknownNode(stray)));
        assert!(ast.node(stray).is_none());
    }

    #[test]
    fn test_text_concatenates_leaves() {
        let (ast, _, _, _) = sample();
        assert_eq!(ast.root().text(), "f(");
        assert_eq!(ast.root().leaves().len(), 2);
    }
}
