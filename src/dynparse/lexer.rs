//! Lexer module for grammar text
//!
//! Grammar text is line oriented, so newlines are real tokens while every other run of
//! whitespace and every `#` comment is skipped by logos.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{tokenize, tokenize_with_spans, TokenSpan};
pub use tokens::Token;
