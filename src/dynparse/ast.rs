//! AST definitions and utilities
//!
//! - `node` - the arena tree, node handles and the read-only node view
//! - `conversion` - turning the engine's match tree into an [`Ast`]
//! - `position` - line/column positions for error reporting
//! - `snapshot` - an owned, serializable copy of a tree

pub mod conversion;
pub mod node;
pub mod position;
pub mod snapshot;

pub use node::{Ast, Node, NodeId, NodeKind};
pub use position::{Position, SourceLocation};
pub use snapshot::{snapshot_from_ast, snapshot_node, AstSnapshot};
