//! The syntax table: compiled rules, by name and in declaration order

use std::collections::HashMap;
use std::fmt;

use crate::dynparse::error::GrammarError;
use crate::dynparse::grammar::Rule;

use super::validator;

/// Rules keyed by name, plus their declaration order
///
/// The first rule in declaration order is the root. A table is immutable once built and is
/// shared read-only by every parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTable {
    rules: Vec<Rule>,
    index: HashMap<String, usize>,
}

impl SyntaxTable {
    /// Build a table from rules in declaration order
    ///
    /// Duplicate names stay in the ordered list so validation can report them; lookups by
    /// name resolve to the first declaration.
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        let mut index = HashMap::with_capacity(rules.len());
        for (i, rule) in rules.iter().enumerate() {
            index.entry(rule.name.clone()).or_insert(i);
        }
        Self { rules, index }
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.index_of(name).map(|i| &self.rules[i])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn rule_at(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    /// Rules in declaration order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn root(&self) -> Option<&Rule> {
        self.rules.first()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every structural check, stopping at the first violation
    pub fn validate(&self) -> Result<(), GrammarError> {
        validator::validate(self)
    }
}

/// One rule per line, in declaration order; compiles back to an equal table
impl fmt::Display for SyntaxTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}
