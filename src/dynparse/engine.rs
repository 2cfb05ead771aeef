//! Matching engine
//!
//! Ordered-choice backtracking over a validated [`SyntaxTable`](super::syntax::SyntaxTable).
//! The table is only ever read, so one table serves any number of concurrent parses.

pub mod input;
pub mod intermediate;
pub mod matcher;

pub use input::{CharInput, Input, TokenInput};
pub use matcher::match_input;
