//! Treeviz formatter for parsed trees
//!
//! One node per line. The root is printed bare, every other node hangs off its parent with a
//! `├─`/`└─` connector, and nesting is carried by `│ ` prefixes:
//!
//! ```text
//! rule: root
//! ├─ literal: "("
//! ├─ rule: inner
//! │ └─ literal: "x"
//! └─ literal: ")"
//! ```
//!
//! Labels longer than the configured width are truncated with `...`.

use crate::dynparse::ast::{Ast, Node};
use crate::dynparse::config::ParserConfig;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn label(node: Node<'_>, max_chars: usize) -> String {
    match node.literal_value() {
        Some(value) => format!("{:?}", truncate(value, max_chars)),
        None => truncate(node.value(), max_chars),
    }
}

pub fn to_treeviz_str(ast: &Ast) -> String {
    to_treeviz_str_with_width(ast, ParserConfig::default().treeviz.max_label_width)
}

pub fn to_treeviz_str_with_width(ast: &Ast, max_label_width: usize) -> String {
    let root = ast.root();
    let mut result = format!(
        "{}: {}\n",
        root.kind().node_type(),
        label(root, max_label_width)
    );
    append_children(&mut result, root, "", max_label_width);
    result
}

fn append_node(result: &mut String, node: Node<'_>, prefix: &str, is_last: bool, width: usize) {
    let connector = if is_last { "└─" } else { "├─" };
    result.push_str(&format!(
        "{}{} {}: {}\n",
        prefix,
        connector,
        node.kind().node_type(),
        label(node, width)
    ));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    append_children(result, node, &new_prefix, width);
}

fn append_children(result: &mut String, node: Node<'_>, prefix: &str, width: usize) {
    let count = node.child_count();
    for (i, child) in node.children().enumerate() {
        append_node(result, child, prefix, i + 1 == count, width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_prefixes() {
        let mut ast = Ast::new("root");
        let a = ast.create_rule("a");
        let x = ast.create_literal("x");
        let y = ast.create_literal("y");
        ast.add_child(ast.root_id(), a).unwrap();
        ast.add_child(a, x).unwrap();
        ast.add_child(ast.root_id(), y).unwrap();

        assert_eq!(
            to_treeviz_str(&ast),
            "rule: root\n├─ rule: a\n│ └─ literal: \"x\"\n└─ literal: \"y\"\n"
        );
    }

    #[test]
    fn test_labels_are_truncated() {
        let mut ast = Ast::new("root");
        let long = ast.create_literal("abcdefgh");
        ast.add_child(ast.root_id(), long).unwrap();
        assert_eq!(
            to_treeviz_str_with_width(&ast, 3),
            "rule: roo...\n└─ literal: \"abc...\"\n"
        );
    }
}
