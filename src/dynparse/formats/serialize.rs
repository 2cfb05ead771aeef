//! JSON and YAML output, both rendered from the serde snapshot

use crate::dynparse::ast::{snapshot_from_ast, Ast};
use crate::dynparse::error::FormatError;

pub fn to_json(ast: &Ast) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(&snapshot_from_ast(ast))?)
}

pub fn to_yaml(ast: &Ast) -> Result<String, FormatError> {
    Ok(serde_yaml::to_string(&snapshot_from_ast(ast))?)
}
