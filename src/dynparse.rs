//! Main module for dynparse library functionality
//!
//! The pipeline runs leaves first:
//!
//! - `lexer` tokenizes grammar text with logos
//! - `grammar` turns those tokens into [`grammar::Rule`]s (chumsky combinators)
//! - `syntax` owns the compiled rules and validates them once
//! - `engine` matches a validated table against an input
//! - `ast` is the tree handed back to callers
//!
//! [`parser::Parser`] ties these together behind the two public entry points.

pub mod ast;
pub mod config;
pub mod engine;
pub mod error;
pub mod formats;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod syntax;

#[cfg(test)]
pub mod testing;
