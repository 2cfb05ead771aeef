//! Implementation of the grammar lexer
//!
//! Tokenization itself is handled entirely by logos. This layer attaches spans and turns the
//! two lexical failure modes (a character outside the grammar language, an unclosed literal)
//! into [`GrammarSyntaxError`]s.

use std::ops::Range;

use logos::Logos;

use crate::dynparse::ast::SourceLocation;
use crate::dynparse::error::{GrammarSyntaxError, SyntaxErrorKind};
use crate::dynparse::lexer::tokens::Token;

/// Token paired with its byte span in the grammar text
pub type TokenSpan = (Token, Range<usize>);

/// Tokenize grammar text, keeping spans
pub fn tokenize_with_spans(source: &str) -> Result<Vec<TokenSpan>, GrammarSyntaxError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(Token::UnterminatedLiteral) => {
                return Err(error_at(source, SyntaxErrorKind::UnterminatedLiteral, span));
            }
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                let symbol = lexer.slice().chars().next().unwrap_or('\u{fffd}');
                return Err(error_at(source, SyntaxErrorKind::UnknownSymbol(symbol), span));
            }
        }
    }

    Ok(tokens)
}

/// Tokenize grammar text, dropping spans
pub fn tokenize(source: &str) -> Result<Vec<Token>, GrammarSyntaxError> {
    Ok(tokenize_with_spans(source)?
        .into_iter()
        .map(|(token, _)| token)
        .collect())
}

pub(crate) fn error_at(
    source: &str,
    kind: SyntaxErrorKind,
    span: Range<usize>,
) -> GrammarSyntaxError {
    let position = SourceLocation::new(source).byte_to_position(span.start);
    GrammarSyntaxError::new(kind, span, position)
}
