//! Output formats for a parsed [`Ast`](super::ast::Ast)
//!
//! - `treeviz` - one line per node, box-drawing connectors, for eyeballing and snapshots
//! - `serialize` - JSON and YAML renderings of the [`AstSnapshot`](super::ast::AstSnapshot)

pub mod serialize;
pub mod treeviz;

pub use serialize::{to_json, to_yaml};
pub use treeviz::{to_treeviz_str, to_treeviz_str_with_width};
