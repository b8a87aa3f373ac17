//! Tree formatting and display
//!
//! - `config` - render configuration and branch glyph sets
//! - `tree` - tree renderer, plain or colored
//! - `json` - JSON output

mod config;
mod json;
mod tree;

pub use config::{Glyphs, IndicatorMode, RenderConfig, TreeStyle};
pub use json::{print_json, to_json};
pub use tree::TreeRenderer;
