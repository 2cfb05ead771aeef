//! Parser combinators for grammar text, built on chumsky
//!
//! The combinators consume `(Token, byte span)` pairs from the lexer and slice identifier and
//! literal text back out of the shared source.

use std::sync::Arc;

use chumsky::prelude::*;

use crate::dynparse::grammar::pattern::Pattern;
use crate::dynparse::lexer::{Token, TokenSpan};

/// Type alias for parser error
pub(crate) type ParserError = Simple<TokenSpan>;

/// One logical line of grammar text
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Line {
    /// `name := alternatives`
    Rule(String, Vec<Pattern>),
    /// `| alternatives`, continuing the previous rule; keeps the pipe's byte span
    Continuation(std::ops::Range<usize>, Vec<Pattern>),
}

/// Helper: match a specific token type
pub(crate) fn token(t: Token) -> impl Parser<TokenSpan, TokenSpan, Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenSpan| *tok == t)
}

/// Wrap alternatives, unwrapping the single-alternative case
pub(crate) fn choice_or_single(mut alternatives: Vec<Pattern>) -> Pattern {
    if alternatives.len() == 1 {
        alternatives.remove(0)
    } else {
        Pattern::Choice(alternatives)
    }
}

fn sequence_or_single(mut parts: Vec<Pattern>) -> Pattern {
    if parts.len() == 1 {
        parts.remove(0)
    } else {
        Pattern::Sequence(parts)
    }
}

/// A rule name
pub(crate) fn identifier(
    source: Arc<String>,
) -> impl Parser<TokenSpan, String, Error = ParserError> + Clone {
    token(Token::Ident)
        .map(move |(_, span)| source[span].to_string())
        .labelled("rule name")
}

/// A quoted literal, escapes decoded
pub(crate) fn literal(
    source: Arc<String>,
) -> impl Parser<TokenSpan, String, Error = ParserError> + Clone {
    token(Token::Literal)
        .map(move |(_, span)| {
            let raw = &source[span];
            // Escapes were checked before parsing started
            decode_literal(raw).unwrap_or_else(|_| raw[1..raw.len() - 1].to_string())
        })
        .labelled("literal")
}

/// `sequence ('|' sequence)*`, where parenthesised groups recurse back into this parser
pub(crate) fn alternatives(
    source: Arc<String>,
) -> impl Parser<TokenSpan, Vec<Pattern>, Error = ParserError> + Clone {
    recursive(move |alternatives| {
        let group = token(Token::OpenParen)
            .ignore_then(alternatives)
            .then_ignore(token(Token::CloseParen).labelled("')'"))
            .map(choice_or_single);

        let primary = literal(source.clone())
            .map(Pattern::Literal)
            .or(identifier(source.clone()).map(Pattern::RuleRef))
            .or(group)
            .labelled("term");

        let suffix = filter(|(t, _): &TokenSpan| t.is_suffix()).map(|(t, _)| t);

        let term = primary
            .then(suffix.repeated())
            .foldl(|pattern, suffix| match suffix {
                Token::Question => Pattern::optional(pattern),
                _ => Pattern::repeat(pattern),
            });

        let sequence = term.repeated().at_least(1).map(sequence_or_single);

        sequence
            .separated_by(token(Token::Pipe))
            .at_least(1)
    })
}

/// A rule declaration or a continuation line
pub(crate) fn line(
    source: Arc<String>,
) -> impl Parser<TokenSpan, Line, Error = ParserError> + Clone {
    let declaration = identifier(source.clone())
        .then_ignore(token(Token::Define).labelled("':='"))
        .then(alternatives(source.clone()))
        .map(|(name, alternatives)| Line::Rule(name, alternatives));

    let continuation = token(Token::Pipe)
        .then(alternatives(source))
        .map(|((_, span), alternatives)| Line::Continuation(span, alternatives));

    declaration.or(continuation)
}

/// Whole grammar: optional lines separated by newlines
pub(crate) fn grammar(
    source: Arc<String>,
) -> impl Parser<TokenSpan, Vec<Line>, Error = ParserError> + Clone {
    line(source)
        .or_not()
        .separated_by(token(Token::Newline))
        .then_ignore(end())
        .map(|lines| lines.into_iter().flatten().collect())
}

/// Decode the escapes of a quoted literal (quotes included in `raw`)
///
/// On failure, returns the byte offset of the backslash within `raw` and the escaped char.
pub(crate) fn decode_literal(raw: &str) -> Result<String, (usize, char)> {
    let inner = &raw[1..raw.len() - 1];
    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.char_indices();

    while let Some((offset, ch)) = chars.next() {
        if ch != '\\' {
            value.push(ch);
            continue;
        }
        match chars.next() {
            Some((_, '"')) => value.push('"'),
            Some((_, '\\')) => value.push('\\'),
            Some((_, 'n')) => value.push('\n'),
            Some((_, 't')) => value.push('\t'),
            Some((_, 'r')) => value.push('\r'),
            Some((_, other)) => return Err((offset + 1, other)),
            None => return Err((offset + 1, '\\')),
        }
    }

    Ok(value)
}
