//! Cursor-addressable input
//!
//! Raw strings and pre-tokenized sequences are two surface forms of one abstraction: a
//! sequence of units addressed by index. The matcher only ever sees [`Input`].

use crate::dynparse::ast::{Position, SourceLocation};

pub trait Input {
    /// Number of units
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Match `literal` verbatim at unit `at`, returning the unit index just past it
    fn match_literal(&self, at: usize, literal: &str) -> Option<usize>;

    /// The text of unit `at`, `None` at or past the end
    fn unit(&self, at: usize) -> Option<&str>;

    /// Line and column of unit `at`, when the input has lines
    fn location(&self, _at: usize) -> Option<Position> {
        None
    }
}

/// A raw string consumed one `char` at a time
pub struct CharInput<'a> {
    source: &'a str,
    /// Byte offset of every char, plus `source.len()` as a sentinel
    offsets: Vec<usize>,
    lines: SourceLocation<'a>,
}

impl<'a> CharInput<'a> {
    pub fn new(source: &'a str) -> Self {
        let offsets = source
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(source.len()))
            .collect();
        Self {
            source,
            offsets,
            lines: SourceLocation::new(source),
        }
    }

    fn byte_offset(&self, at: usize) -> usize {
        self.offsets
            .get(at)
            .copied()
            .unwrap_or(self.source.len())
    }
}

impl Input for CharInput<'_> {
    fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    fn match_literal(&self, at: usize, literal: &str) -> Option<usize> {
        if at > self.len() {
            return None;
        }
        self.source[self.byte_offset(at)..]
            .starts_with(literal)
            .then(|| at + literal.chars().count())
    }

    fn unit(&self, at: usize) -> Option<&str> {
        if at >= self.len() {
            return None;
        }
        self.source
            .get(self.byte_offset(at)..self.byte_offset(at + 1))
    }

    fn location(&self, at: usize) -> Option<Position> {
        Some(self.lines.byte_to_position(self.byte_offset(at)))
    }
}

/// A pre-tokenized sequence; each literal matches exactly one equal token
pub struct TokenInput<'a, S: AsRef<str>> {
    tokens: &'a [S],
}

impl<'a, S: AsRef<str>> TokenInput<'a, S> {
    pub fn new(tokens: &'a [S]) -> Self {
        Self { tokens }
    }
}

impl<S: AsRef<str>> Input for TokenInput<'_, S> {
    fn len(&self) -> usize {
        self.tokens.len()
    }

    fn match_literal(&self, at: usize, literal: &str) -> Option<usize> {
        self.tokens
            .get(at)
            .filter(|token| token.as_ref() == literal)
            .map(|_| at + 1)
    }

    fn unit(&self, at: usize) -> Option<&str> {
        self.tokens.get(at).map(|token| token.as_ref())
    }
}
