//! Conversion from the engine's intermediate match tree to the arena AST

use crate::dynparse::ast::{Ast, NodeId};
use crate::dynparse::engine::intermediate::MatchNode;

/// Move a finished match tree into a fresh [`Ast`], wiring parent handles on the way
pub fn convert_match(root: MatchNode) -> Ast {
    let MatchNode {
        kind,
        span,
        children,
    } = root;
    let mut ast = Ast::with_root(kind, span);
    let root_id = ast.root_id();
    for child in children {
        attach(&mut ast, root_id, child);
    }
    ast
}

fn attach(ast: &mut Ast, parent: NodeId, node: MatchNode) {
    let MatchNode {
        kind,
        span,
        children,
    } = node;
    let id = ast.push_child(parent, kind, span);
    for child in children {
        attach(ast, id, child);
    }
}
