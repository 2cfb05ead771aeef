//! Syntax table and validator

pub mod table;
pub mod validator;

pub use table::SyntaxTable;
pub use validator::validate;
