//! Error types for every phase of the pipeline
//!
//! Grammar problems and parse problems are disjoint taxonomies:
//!
//! - [`GrammarSyntaxError`] - the grammar text itself is malformed (compile time)
//! - [`GrammarError`] - the compiled table is structurally unsound (validation time)
//! - [`ParseError`] - an input does not match the root rule (parse time)
//!
//! [`BuildError`] is what constructing a [`Parser`](super::parser::Parser) can fail with.

use std::fmt;
use std::ops::Range;

use thiserror::Error;

use super::ast::{NodeId, Position};

/// What went wrong while reading grammar text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    #[error("unterminated literal")]
    UnterminatedLiteral,
    #[error("invalid escape sequence '\\{0}' in literal")]
    InvalidEscape(char),
    #[error("unknown symbol '{0}'")]
    UnknownSymbol(char),
    #[error("unexpected {found}, expected {expected}")]
    UnexpectedToken { found: String, expected: String },
    #[error("unexpected end of grammar, expected {expected}")]
    UnexpectedEnd { expected: String },
    #[error("grammar declares no rules")]
    NoRules,
}

/// Grammar text that could not be compiled
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("grammar syntax error at {position}: {kind}")]
pub struct GrammarSyntaxError {
    pub kind: SyntaxErrorKind,
    /// Byte range of the offending text
    pub span: Range<usize>,
    /// Line and column (both zero-based) of `span.start`
    pub position: Position,
}

impl GrammarSyntaxError {
    pub fn new(kind: SyntaxErrorKind, span: Range<usize>, position: Position) -> Self {
        Self {
            kind,
            span,
            position,
        }
    }
}

/// The structural checks a compiled table must pass, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarErrorKind {
    EmptyLiteral,
    DuplicateRule,
    OrphanNonterminal,
    UsedRootSymbol,
    UnusedSymbol,
}

impl GrammarErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            GrammarErrorKind::EmptyLiteral => "EmptyLiteral",
            GrammarErrorKind::DuplicateRule => "DuplicateRule",
            GrammarErrorKind::OrphanNonterminal => "OrphanNonterminal",
            GrammarErrorKind::UsedRootSymbol => "UsedRootSymbol",
            GrammarErrorKind::UnusedSymbol => "UnusedSymbol",
        }
    }

    /// The fixed human-readable reason attached to every error of this kind
    pub fn reason(self) -> &'static str {
        match self {
            GrammarErrorKind::EmptyLiteral => "literals must contain at least one character",
            GrammarErrorKind::DuplicateRule => "a rule with this name is already declared",
            GrammarErrorKind::OrphanNonterminal => "the referenced rule is never declared",
            GrammarErrorKind::UsedRootSymbol => {
                "the root rule cannot be referenced from inside the grammar"
            }
            GrammarErrorKind::UnusedSymbol => "the rule is declared but never referenced",
        }
    }
}

impl fmt::Display for GrammarErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A compiled table that failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} '{rule_name}': {reason}")]
pub struct GrammarError {
    pub kind: GrammarErrorKind,
    /// The offending rule, or the offending symbol for reference errors
    pub rule_name: String,
    pub reason: &'static str,
    /// For reference errors, the rule whose pattern holds the bad reference
    pub referenced_in: Option<String>,
}

impl GrammarError {
    pub fn new(kind: GrammarErrorKind, rule_name: impl Into<String>) -> Self {
        Self {
            kind,
            rule_name: rule_name.into(),
            reason: kind.reason(),
            referenced_in: None,
        }
    }

    pub fn referenced_in(mut self, rule: impl Into<String>) -> Self {
        self.referenced_in = Some(rule.into());
        self
    }
}

/// Everything that can stop a [`Parser`](super::parser::Parser) from being built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error(transparent)]
    Syntax(#[from] GrammarSyntaxError),
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error("grammar table contains no rules")]
    EmptyTable,
}

impl BuildError {
    /// The validation error kind, if this is a validation failure
    pub fn grammar_kind(&self) -> Option<GrammarErrorKind> {
        match self {
            BuildError::Grammar(err) => Some(err.kind),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The start rule did not match at all
    #[error("no match")]
    NoMatch,
    /// The start rule matched but left input behind
    #[error("unconsumed input")]
    TrailingInput,
    /// Rule nesting went past the configured depth
    #[error("recursion limit exceeded")]
    RecursionLimit,
    /// A sub-parse named a rule the table does not have
    #[error("unknown rule '{0}'")]
    UnknownRule(String),
}

/// An input the grammar does not accept
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "{kind} at position {position}{}: expected {}, found {}",
    location_suffix(.location),
    describe_expected(.expected),
    describe_found(.found)
)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Furthest cursor reached, in input units
    pub position: usize,
    /// Line and column of `position`, for string input
    pub location: Option<Position>,
    /// What would have let matching continue at `position`
    pub expected: Vec<String>,
    /// The input unit at `position`, `None` at end of input
    pub found: Option<String>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: usize) -> Self {
        Self {
            kind,
            position,
            location: None,
            expected: Vec::new(),
            found: None,
        }
    }

    pub fn with_expected(mut self, expected: Vec<String>) -> Self {
        self.expected = expected;
        self
    }

    pub fn with_found(mut self, found: Option<String>) -> Self {
        self.found = found;
        self
    }

    pub fn with_location(mut self, location: Option<Position>) -> Self {
        self.location = location;
        self
    }

    /// The expectations joined for display, e.g. `"hi" or "hello"`
    pub fn expected_description(&self) -> String {
        describe_expected(&self.expected)
    }

    /// The unit at `position`, quoted, or `end of input`
    pub fn found_description(&self) -> String {
        describe_found(&self.found)
    }
}

fn describe_expected(expected: &[String]) -> String {
    if expected.is_empty() {
        "nothing".to_string()
    } else {
        expected.join(" or ")
    }
}

fn describe_found(found: &Option<String>) -> String {
    match found {
        Some(found) => format!("{:?}", found),
        None => "end of input".to_string(),
    }
}

fn location_suffix(location: &Option<Position>) -> String {
    location
        .map(|location| format!(" ({})", location))
        .unwrap_or_default()
}

/// Invalid edits to an [`Ast`](super::ast::Ast)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    #[error("node {0} does not belong to this tree")]
    UnknownNode(NodeId),
    #[error("literal node {0} cannot have children")]
    LiteralCannotHaveChildren(NodeId),
    #[error("node {child} is not a child of node {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
    #[error("attaching node {child} under node {parent} would create a cycle")]
    WouldCreateCycle { parent: NodeId, child: NodeId },
}

/// Serializing an AST failed
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
