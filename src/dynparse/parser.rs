//! The `Parser` facade
//!
//! Construction compiles and validates the grammar once; a `Parser` that exists is always
//! backed by a sound table. Parsing borrows the table read-only, so one `Parser` can be shared
//! across threads and used for any number of concurrent parses.

use std::str::FromStr;

use tracing::debug;

use crate::dynparse::ast::Ast;
use crate::dynparse::config::ParserConfig;
use crate::dynparse::engine::{match_input, CharInput, Input, TokenInput};
use crate::dynparse::error::{BuildError, ParseError, ParseErrorKind};
use crate::dynparse::grammar::compile;
use crate::dynparse::syntax::SyntaxTable;

#[derive(Debug, Clone)]
pub struct Parser {
    table: SyntaxTable,
    config: ParserConfig,
}

impl Parser {
    /// Compile and validate `grammar` with the default configuration
    pub fn new(grammar: &str) -> Result<Self, BuildError> {
        Self::with_config(grammar, ParserConfig::default())
    }

    pub fn with_config(grammar: &str, config: ParserConfig) -> Result<Self, BuildError> {
        let table = compile(grammar)?;
        Self::build(table, config)
    }

    /// Validate a table built without grammar text
    pub fn from_table(table: SyntaxTable) -> Result<Self, BuildError> {
        Self::build(table, ParserConfig::default())
    }

    fn build(table: SyntaxTable, config: ParserConfig) -> Result<Self, BuildError> {
        if table.is_empty() {
            return Err(BuildError::EmptyTable);
        }
        table.validate()?;
        debug!(
            rules = table.len(),
            root = table.root().map(|rule| rule.name.as_str()).unwrap_or_default(),
            "parser ready"
        );
        Ok(Self { table, config })
    }

    /// Parse a raw string from the root rule; every char must be consumed
    pub fn parse(&self, input: &str) -> Result<Ast, ParseError> {
        self.run(0, &CharInput::new(input))
    }

    /// Parse a pre-tokenized sequence from the root rule; every token must be consumed
    pub fn parse_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Ast, ParseError> {
        self.run(0, &TokenInput::new(tokens))
    }

    /// Parse a raw string starting from the named rule instead of the root
    pub fn parse_rule(&self, rule: &str, input: &str) -> Result<Ast, ParseError> {
        self.run(self.rule_index(rule)?, &CharInput::new(input))
    }

    pub fn parse_rule_tokens<S: AsRef<str>>(
        &self,
        rule: &str,
        tokens: &[S],
    ) -> Result<Ast, ParseError> {
        self.run(self.rule_index(rule)?, &TokenInput::new(tokens))
    }

    fn rule_index(&self, rule: &str) -> Result<usize, ParseError> {
        self.table
            .index_of(rule)
            .ok_or_else(|| ParseError::new(ParseErrorKind::UnknownRule(rule.to_string()), 0))
    }

    fn run<I: Input>(&self, rule_index: usize, input: &I) -> Result<Ast, ParseError> {
        match_input(&self.table, rule_index, input, &self.config)
    }

    pub fn table(&self) -> &SyntaxTable {
        &self.table
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Name of the root rule
    pub fn root_rule(&self) -> &str {
        self.table
            .root()
            .map(|rule| rule.name.as_str())
            .unwrap_or_default()
    }
}

impl FromStr for Parser {
    type Err = BuildError;

    fn from_str(grammar: &str) -> Result<Self, Self::Err> {
        Self::new(grammar)
    }
}
