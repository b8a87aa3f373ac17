//! Test utilities for building temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory tree for testing.
///
/// Cleaned up when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("dirtree-test")
            .tempdir()
            .expect("Failed to create temp dir");
        Self { dir }
    }

    /// Create a tree holding each path with a short text body.
    /// Paths ending in `/` become empty directories.
    pub fn with_paths(paths: &[&str]) -> Self {
        let tree = Self::new();
        for path in paths {
            if path.ends_with('/') {
                tree.add_dir(path);
            } else {
                tree.add_file(path, "content\n");
            }
        }
        tree
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Directory name of the tree root.
    pub fn name(&self) -> String {
        self.dir
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Add a text file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        self.add_bytes(path, content.as_bytes())
    }

    /// Add a file with raw bytes, creating parent directories as needed.
    pub fn add_bytes(&self, path: &str, content: &[u8]) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Build a wide and deep tree: `width` directories per level, `depth`
    /// levels, `files` files in each directory.
    pub fn generate(width: usize, depth: usize, files: usize) -> Self {
        let tree = Self::new();
        let mut level = vec![String::new()];
        for _ in 0..depth {
            let mut next = Vec::new();
            for parent in &level {
                for w in 0..width {
                    let dir = if parent.is_empty() {
                        format!("dir{}", w)
                    } else {
                        format!("{}/dir{}", parent, w)
                    };
                    tree.add_dir(&dir);
                    for f in 0..files {
                        tree.add_file(&format!("{}/file{}.rs", dir, f), "fn main() {}\n");
                    }
                    next.push(dir);
                }
            }
            level = next;
        }
        tree
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}
