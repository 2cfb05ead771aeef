//! Grammar model and compiler
//!
//! Grammar text is line oriented:
//!
//! ```text
//! grammar      = { line } ;
//! line         = [ rule | continuation ] [ comment ] NEWLINE ;
//! rule         = IDENT ":=" alternatives ;
//! continuation = "|" alternatives ;
//! alternatives = sequence { "|" sequence } ;
//! sequence     = term { term } ;
//! term         = primary { "?" | "*" } ;
//! primary      = LITERAL | IDENT | "(" alternatives ")" ;
//! ```
//!
//! Literals are double quoted and understand `\"`, `\\`, `\n`, `\t` and `\r`. Comments start
//! with `#` and run to the end of the line.

pub mod combinators;
pub mod compiler;
pub mod pattern;

pub use compiler::compile;
pub use pattern::{Pattern, Rule};
