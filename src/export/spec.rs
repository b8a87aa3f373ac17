//! Export configuration

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::filter::BINARY_EXTENSIONS;
use crate::tree::{Node, NodeKind};

/// Default content cap per file: 100 KiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024;

/// Rules deciding which displayed files get their content exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpec {
    /// Files larger than this are listed but never opened
    pub max_file_size: u64,
    /// Lowercase extensions without the dot; empty means any extension
    pub extensions: BTreeSet<String>,
    pub output_directory: PathBuf,
    /// Extensions treated as binary when `extensions` is empty
    pub binary_extensions: BTreeSet<String>,
}

impl Default for ExportSpec {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            extensions: BTreeSet::new(),
            output_directory: PathBuf::from("."),
            binary_extensions: BINARY_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl ExportSpec {
    /// Add extensions from user input. Accepts comma separated lists,
    /// leading dots and any case: `".PY, rs"` adds `py` and `rs`.
    pub fn add_extensions<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in items {
            for ext in item.as_ref().split(',') {
                let ext = ext.trim().trim_start_matches('.').to_lowercase();
                if !ext.is_empty() {
                    self.extensions.insert(ext);
                }
            }
        }
    }

    /// Whether the extension allow-list admits a file with this extension.
    pub fn allows(&self, extension: Option<&str>) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        extension.is_some_and(|e| self.extensions.contains(e))
    }

    /// Known binary extension, consulted only without an allow-list.
    pub fn is_known_binary(&self, extension: Option<&str>) -> bool {
        self.extensions.is_empty() && extension.is_some_and(|e| self.binary_extensions.contains(e))
    }

    /// Whether a walked file is expected to get a content block, judged from
    /// its name and listed size only. The file is not opened, so content
    /// that later sniffs as binary is still counted as eligible.
    pub fn is_eligible(&self, node: &Node) -> bool {
        if node.kind != NodeKind::File || node.error.is_some() {
            return false;
        }
        let ext = node.extension();
        self.allows(ext.as_deref())
            && node.size.is_some_and(|size| size <= self.max_file_size)
            && !self.is_known_binary(ext.as_deref())
    }
}
