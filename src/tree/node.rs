//! Walked entries

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::filter::slash_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
    Symlink,
}

/// One filesystem entry met during a walk.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub name: String,
    /// Absolute path on disk
    #[serde(serialize_with = "serialize_lossy_path")]
    pub path: PathBuf,
    /// Path relative to the walk root
    #[serde(serialize_with = "serialize_slash_path")]
    pub rel_path: PathBuf,
    /// 0 for the root's immediate children
    pub depth: usize,
    pub kind: NodeKind,
    /// Size in bytes, files only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    pub display: bool,
    pub descend: bool,
    /// Set when the entry or its directory listing could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Node {
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Relative path joined with `/` on every platform.
    pub fn slash_path(&self) -> String {
        slash_path(&self.rel_path)
    }

    /// Lowercase extension without the dot, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }
}

fn serialize_slash_path<S: serde::Serializer>(path: &Path, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&slash_path(path))
}

/// Serialize a path as a string, replacing invalid UTF-8 with U+FFFD
/// instead of failing.
pub(crate) fn serialize_lossy_path<P, S>(path: &P, s: S) -> Result<S::Ok, S::Error>
where
    P: AsRef<Path>,
    S: serde::Serializer,
{
    s.serialize_str(&path.as_ref().to_string_lossy())
}
