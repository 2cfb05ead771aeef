//! Recursive ordered-choice matcher
//!
//! Every matching function takes the cursor by value and returns `Option<Matched>`. A `None`
//! is an ordinary recoverable failure: the caller still holds its own cursor, so backtracking
//! is just dropping the partial result. Only [`match_input`] turns a failure into a
//! [`ParseError`].
//!
//! While matching, the matcher keeps the diagnostics that end up in the error. Each failed
//! literal is recorded at the cursor where it failed, and only the furthest such cursor is
//! kept.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::dynparse::ast::conversion::convert_match;
use crate::dynparse::ast::Ast;
use crate::dynparse::config::ParserConfig;
use crate::dynparse::error::{ParseError, ParseErrorKind};
use crate::dynparse::grammar::Pattern;
use crate::dynparse::syntax::SyntaxTable;

use super::input::Input;
use super::intermediate::{MatchNode, Matched};

/// Match the rule at `rule_index` against the whole of `input`
pub fn match_input<I: Input + ?Sized>(
    table: &SyntaxTable,
    rule_index: usize,
    input: &I,
    config: &ParserConfig,
) -> Result<Ast, ParseError> {
    let mut matcher = Matcher::new(table, input, config);
    let result = matcher.rule(rule_index, 0);

    if let Some(at) = matcher.limit_hit {
        debug!(at, max_depth = config.engine.max_depth, "parse hit recursion limit");
        return Err(matcher.error(ParseErrorKind::RecursionLimit, at, Vec::new()));
    }

    match result {
        Some(node) if node.span.end == input.len() => {
            debug!(units = input.len(), "parse succeeded");
            Ok(convert_match(node))
        }
        Some(node) => {
            let end = node.span.end;
            debug!(end, units = input.len(), "parse left trailing input");
            if matcher.furthest >= end && !matcher.expected.is_empty() {
                let expected = std::mem::take(&mut matcher.expected);
                Err(matcher.error(ParseErrorKind::TrailingInput, matcher.furthest, expected))
            } else {
                let expected = vec!["end of input".to_string()];
                Err(matcher.error(ParseErrorKind::TrailingInput, end, expected))
            }
        }
        None => {
            debug!(furthest = matcher.furthest, "parse failed");
            let expected = std::mem::take(&mut matcher.expected);
            Err(matcher.error(ParseErrorKind::NoMatch, matcher.furthest, expected))
        }
    }
}

/// Per-parse matching state; the table itself is never written
struct Matcher<'t, I: Input + ?Sized> {
    table: &'t SyntaxTable,
    input: &'t I,
    max_depth: usize,
    max_expected: usize,
    depth: usize,
    /// (rule index, cursor) pairs currently being matched
    active: HashSet<(usize, usize)>,
    furthest: usize,
    expected: Vec<String>,
    /// Cursor where the depth limit was hit, if it was
    limit_hit: Option<usize>,
}

impl<'t, I: Input + ?Sized> Matcher<'t, I> {
    fn new(table: &'t SyntaxTable, input: &'t I, config: &ParserConfig) -> Self {
        Self {
            table,
            input,
            max_depth: config.engine.max_depth,
            max_expected: config.diagnostics.max_expected,
            depth: 0,
            active: HashSet::new(),
            furthest: 0,
            expected: Vec::new(),
            limit_hit: None,
        }
    }

    /// Match one rule at `at`, wrapping whatever its pattern produced in a rule node
    fn rule(&mut self, index: usize, at: usize) -> Option<MatchNode> {
        if self.limit_hit.is_some() {
            return None;
        }
        let table = self.table;
        let rule = table.rule_at(index)?;

        if self.depth >= self.max_depth {
            self.limit_hit = Some(at);
            return None;
        }
        if !self.active.insert((index, at)) {
            trace!(rule = %rule.name, at, "left recursion cut");
            return None;
        }

        trace!(rule = %rule.name, at, depth = self.depth, "enter rule");
        self.depth += 1;
        let result = self.pattern(&rule.pattern, at);
        self.depth -= 1;
        self.active.remove(&(index, at));

        result.map(|matched| MatchNode::rule(&rule.name, at..matched.end, matched.nodes))
    }

    fn pattern(&mut self, pattern: &'t Pattern, at: usize) -> Option<Matched> {
        match pattern {
            Pattern::Literal(value) => self.literal(value, at),
            Pattern::RuleRef(name) => {
                let index = self.table.index_of(name)?;
                self.rule(index, at).map(|node| Matched {
                    end: node.span.end,
                    nodes: vec![node],
                })
            }
            Pattern::Sequence(parts) => {
                let mut cursor = at;
                let mut nodes = Vec::new();
                for part in parts {
                    let matched = self.pattern(part, cursor)?;
                    cursor = matched.end;
                    nodes.extend(matched.nodes);
                }
                Some(Matched { end: cursor, nodes })
            }
            Pattern::Choice(alternatives) => {
                for alternative in alternatives {
                    if let Some(matched) = self.pattern(alternative, at) {
                        return Some(matched);
                    }
                    if self.limit_hit.is_some() {
                        return None;
                    }
                }
                None
            }
            Pattern::Optional(inner) => {
                Some(self.pattern(inner, at).unwrap_or_else(|| Matched::empty(at)))
            }
            Pattern::Repeat(inner) => {
                let mut cursor = at;
                let mut nodes = Vec::new();
                while let Some(matched) = self.pattern(inner, cursor) {
                    // A zero-width iteration is a no-op and ends the repetition
                    if matched.end == cursor {
                        break;
                    }
                    cursor = matched.end;
                    nodes.extend(matched.nodes);
                }
                Some(Matched { end: cursor, nodes })
            }
        }
    }

    fn literal(&mut self, value: &str, at: usize) -> Option<Matched> {
        match self.input.match_literal(at, value) {
            Some(end) => Some(Matched {
                end,
                nodes: vec![MatchNode::literal(value, at..end)],
            }),
            None => {
                self.record_failure(at, format!("{:?}", value));
                None
            }
        }
    }

    fn record_failure(&mut self, at: usize, description: String) {
        if at > self.furthest {
            self.furthest = at;
            self.expected.clear();
        }
        if at == self.furthest
            && self.expected.len() < self.max_expected
            && !self.expected.contains(&description)
        {
            self.expected.push(description);
        }
    }

    fn error(&self, kind: ParseErrorKind, at: usize, expected: Vec<String>) -> ParseError {
        ParseError::new(kind, at)
            .with_expected(expected)
            .with_found(self.input.unit(at).map(str::to_string))
            .with_location(self.input.location(at))
    }
}
