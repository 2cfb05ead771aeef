//! Token definitions for grammar text
//!
//! Tokens carry no payload; identifier and literal text is sliced back out of the source
//! through the token's span when the compiler needs it.

use logos::Logos;

use std::fmt;

/// All tokens that can appear in grammar text
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    #[token(":=")]
    Define,

    #[token("|")]
    Pipe,

    #[token("?")]
    Question,

    #[token("*")]
    Star,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token("\n")]
    Newline,

    #[regex(r"[A-Za-z_][A-Za-z0-9_\-]*")]
    Ident,

    // Escapes are validated later, when the literal is decoded
    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    Literal,

    // An opening quote with no closing quote before the end of the line
    #[regex(r#""([^"\\\n]|\\[^\n])*"#)]
    UnterminatedLiteral,
}

impl Token {
    /// Check if this token is a postfix combinator
    pub fn is_suffix(&self) -> bool {
        matches!(self, Token::Question | Token::Star)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::Define => "':='",
            Token::Pipe => "'|'",
            Token::Question => "'?'",
            Token::Star => "'*'",
            Token::OpenParen => "'('",
            Token::CloseParen => "')'",
            Token::Newline => "end of line",
            Token::Ident => "rule name",
            Token::Literal => "literal",
            Token::UnterminatedLiteral => "unterminated literal",
        };
        f.write_str(text)
    }
}
