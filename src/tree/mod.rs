//! Directory tree walking
//!
//! `TreeWalker` owns a `FilterSpec` and produces a `Walk`, a lazy pre-order
//! iterator over the displayed entries below a root. Excluded directories are
//! never opened, so pruned subtrees cost nothing.

mod node;
mod walker;

pub use node::{Node, NodeKind};
pub(crate) use node::serialize_lossy_path;
pub use walker::{NOT_REGULAR, TreeWalker, Walk};
