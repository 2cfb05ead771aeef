//! Intermediate match tree
//!
//! The matcher builds plain owned nodes while it backtracks. Partial results from a failed
//! alternative are simply dropped. Only the tree of a successful top-level match is converted
//! into an [`Ast`](crate::dynparse::ast::Ast).

use std::ops::Range;

use crate::dynparse::ast::NodeKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchNode {
    pub kind: NodeKind,
    pub span: Range<usize>,
    pub children: Vec<MatchNode>,
}

impl MatchNode {
    pub fn rule(name: &str, span: Range<usize>, children: Vec<MatchNode>) -> Self {
        Self {
            kind: NodeKind::Rule(name.to_string()),
            span,
            children,
        }
    }

    pub fn literal(value: &str, span: Range<usize>) -> Self {
        Self {
            kind: NodeKind::Literal(value.to_string()),
            span,
            children: Vec::new(),
        }
    }
}

/// A successful match: where the cursor ended and what was produced on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matched {
    pub end: usize,
    pub nodes: Vec<MatchNode>,
}

impl Matched {
    pub fn empty(at: usize) -> Self {
        Self {
            end: at,
            nodes: Vec::new(),
        }
    }
}
