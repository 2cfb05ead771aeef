//! # dynparse
//!
//! A grammar-driven parser. A small textual grammar is compiled at runtime into a validated
//! rule table, and that table drives an ordered-choice (PEG) matcher that turns raw strings or
//! pre-tokenized input into an AST of rule and literal nodes.
//!
//! ```text
//! call := name "(" args? ")"
//! args := name ("," name)*
//! name := "f" | "x" | "y"
//! ```
//!
//! The first declared rule is the root. It must consume the whole input, and it may not be
//! referenced from inside the grammar.

pub mod dynparse;

pub use dynparse::ast::{Ast, Node, NodeId, NodeKind};
pub use dynparse::config::ParserConfig;
pub use dynparse::error::{
    AstError, BuildError, GrammarError, GrammarErrorKind, GrammarSyntaxError, ParseError,
    ParseErrorKind,
};
pub use dynparse::grammar::{compile, Pattern, Rule};
pub use dynparse::parser::Parser;
pub use dynparse::syntax::SyntaxTable;
