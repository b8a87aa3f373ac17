//! dirtree - directory trees with layered filtering and LLM-ready export

pub mod error;
pub mod export;
pub mod filter;
pub mod logging;
pub mod output;
pub mod picker;
pub mod size;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Error, Result};
pub use export::{ExportDocument, ExportRecord, ExportSpec, LlmExporter};
pub use filter::{Admission, FilterSpec, FilterSpecBuilder, Pattern};
pub use output::{IndicatorMode, RenderConfig, TreeRenderer, TreeStyle, print_json};
pub use picker::{DirectoryPicker, PromptPicker};
pub use size::{format_size, parse_size};
pub use tree::{Node, NodeKind, TreeWalker, Walk};
