//! Pattern model: the in-memory form of a grammar term
//!
//! Patterns are plain owned trees. Rules refer to each other only by name through
//! [`Pattern::RuleRef`]; recursion between rules is resolved by the syntax table at match time,
//! never by nesting one rule inside another.

use std::fmt;

/// One grammar term
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Matches its text verbatim
    Literal(String),
    /// Matches the named rule
    RuleRef(String),
    /// Matches each part in order
    Sequence(Vec<Pattern>),
    /// Ordered choice: the first alternative that matches wins
    Choice(Vec<Pattern>),
    /// Zero or one
    Optional(Box<Pattern>),
    /// Zero or more, greedy
    Repeat(Box<Pattern>),
}

impl Pattern {
    pub fn literal(value: impl Into<String>) -> Self {
        Pattern::Literal(value.into())
    }

    pub fn rule_ref(name: impl Into<String>) -> Self {
        Pattern::RuleRef(name.into())
    }

    pub fn sequence(parts: Vec<Pattern>) -> Self {
        Pattern::Sequence(parts)
    }

    pub fn choice(alternatives: Vec<Pattern>) -> Self {
        Pattern::Choice(alternatives)
    }

    pub fn optional(inner: Pattern) -> Self {
        Pattern::Optional(Box::new(inner))
    }

    pub fn repeat(inner: Pattern) -> Self {
        Pattern::Repeat(Box::new(inner))
    }

    /// Visit this pattern and every sub-pattern, pre-order
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Pattern)) {
        f(self);
        match self {
            Pattern::Literal(_) | Pattern::RuleRef(_) => {}
            Pattern::Sequence(parts) | Pattern::Choice(parts) => {
                for part in parts {
                    part.walk(f);
                }
            }
            Pattern::Optional(inner) | Pattern::Repeat(inner) => inner.walk(f),
        }
    }

    /// Names of every rule this pattern references, in pre-order
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.walk(&mut |pattern| {
            if let Pattern::RuleRef(name) = pattern {
                names.push(name.as_str());
            }
        });
        names
    }

    /// Every literal value in this pattern, in pre-order
    pub fn literals(&self) -> Vec<&str> {
        let mut values = Vec::new();
        self.walk(&mut |pattern| {
            if let Pattern::Literal(value) = pattern {
                values.push(value.as_str());
            }
        });
        values
    }

    fn precedence(&self) -> u8 {
        match self {
            Pattern::Choice(_) => 0,
            Pattern::Sequence(_) => 1,
            Pattern::Optional(_) | Pattern::Repeat(_) => 2,
            Pattern::Literal(_) | Pattern::RuleRef(_) => 3,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, min_precedence: u8) -> fmt::Result {
        if self.precedence() < min_precedence {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

/// Renders grammar surface syntax; parentheses appear only where precedence needs them
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(value) => write_literal(f, value),
            Pattern::RuleRef(name) => f.write_str(name),
            Pattern::Sequence(parts) => {
                if parts.is_empty() {
                    return f.write_str("()");
                }
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    part.fmt_operand(f, 2)?;
                }
                Ok(())
            }
            Pattern::Choice(alternatives) => {
                if alternatives.is_empty() {
                    return f.write_str("()");
                }
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    alternative.fmt_operand(f, 1)?;
                }
                Ok(())
            }
            Pattern::Optional(inner) => {
                inner.fmt_operand(f, 2)?;
                f.write_str("?")
            }
            Pattern::Repeat(inner) => {
                inner.fmt_operand(f, 2)?;
                f.write_str("*")
            }
        }
    }
}

fn write_literal(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in value.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            other => write!(f, "{}", other)?,
        }
    }
    f.write_str("\"")
}

/// A named grammar production
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub name: String,
    pub pattern: Pattern,
}

impl Rule {
    pub fn new(name: impl Into<String>, pattern: Pattern) -> Self {
        Self {
            name: name.into(),
            pattern,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} := {}", self.name, self.pattern)
    }
}
