//! TreeWalker - lazy depth-first traversal driven by a FilterSpec

use std::fs::{self, DirEntry};
use std::io;
use std::path::{Path, PathBuf};
use std::vec;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::filter::FilterSpec;

use super::node::{Node, NodeKind};

/// Error recorded on entries that are neither regular files, directories
/// nor symlinks.
pub const NOT_REGULAR: &str = "not a regular file";

/// Walks a directory tree, yielding displayed entries in pre-order.
/// Children are visited in byte-wise name order, files and directories
/// interleaved. Symbolic links are reported but never followed.
#[derive(Debug, Clone, Default)]
pub struct TreeWalker {
    spec: FilterSpec,
}

impl TreeWalker {
    pub fn new(spec: FilterSpec) -> Self {
        Self { spec }
    }

    /// Start a walk at `root`. The root itself is not yielded.
    ///
    /// Fails when the root is missing, not a directory, or cannot be listed.
    /// Failures below the root are reported on the affected node instead.
    pub fn walk(&self, root: &Path) -> Result<Walk<'_>> {
        let root = root.canonicalize().map_err(|source| Error::RootNotFound {
            path: root.to_path_buf(),
            source,
        })?;
        if !root.is_dir() {
            return Err(Error::RootNotDirectory { path: root });
        }
        let entries = read_children(&root).map_err(|source| Error::RootUnreadable {
            path: root.clone(),
            source,
        })?;
        debug!("walking {}", root.display());

        Ok(Walk {
            spec: &self.spec,
            root,
            stack: vec![Frame {
                entries: entries.into_iter(),
                depth: 0,
            }],
            entries_seen: 0,
            errors: 0,
        })
    }
}

/// One open directory: its remaining sorted children and their depth.
#[derive(Debug)]
struct Frame {
    entries: vec::IntoIter<DirEntry>,
    depth: usize,
}

/// In-progress traversal. Memory is bounded by the open directories on the
/// current path, not by the size of the tree.
#[derive(Debug)]
pub struct Walk<'a> {
    spec: &'a FilterSpec,
    root: PathBuf,
    stack: Vec<Frame>,
    entries_seen: usize,
    errors: usize,
}

impl Walk<'_> {
    /// Canonical root of this walk.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Entries looked at so far, displayed or not. Pruned subtrees are never
    /// looked at and do not count.
    pub fn entries_seen(&self) -> usize {
        self.entries_seen
    }

    /// Entries or directory listings that could not be read so far.
    pub fn errors(&self) -> usize {
        self.errors
    }

    fn visit(&mut self, entry: DirEntry, depth: usize) -> Option<Node> {
        self.entries_seen += 1;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        let rel_path = path
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| PathBuf::from(&name));

        let (kind, size, mut error) = match entry.file_type() {
            Ok(ft) if ft.is_symlink() => (NodeKind::Symlink, None, None),
            Ok(ft) if ft.is_dir() => (NodeKind::Directory, None, None),
            Ok(_) => match entry.metadata() {
                Ok(meta) if meta.is_file() => (NodeKind::File, Some(meta.len()), None),
                // Pipes, sockets and device nodes
                Ok(_) => (NodeKind::File, None, Some(NOT_REGULAR.to_string())),
                Err(e) => (NodeKind::File, None, Some(e.to_string())),
            },
            Err(e) => (NodeKind::File, None, Some(e.to_string())),
        };
        if let Some(e) = &error {
            warn!("cannot read {}: {}", path.display(), e);
            self.errors += 1;
        }

        let admission = self.spec.admit(&rel_path, kind, depth);

        if admission.descend {
            match read_children(&path) {
                Ok(children) => self.stack.push(Frame {
                    entries: children.into_iter(),
                    depth: depth + 1,
                }),
                Err(e) => {
                    warn!("cannot list {}: {}", path.display(), e);
                    self.errors += 1;
                    error = Some(e.to_string());
                }
            }
        } else if kind == NodeKind::Directory {
            debug!("not descending into {}", rel_path.display());
        }

        admission.display.then(|| Node {
            name,
            path,
            rel_path,
            depth,
            kind,
            size,
            display: true,
            descend: admission.descend,
            error,
        })
    }
}

impl Iterator for Walk<'_> {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        loop {
            let frame = self.stack.last_mut()?;
            let depth = frame.depth;
            let Some(entry) = frame.entries.next() else {
                self.stack.pop();
                continue;
            };
            if let Some(node) = self.visit(entry, depth) {
                return Some(node);
            }
        }
    }
}

/// List a directory sorted by name. Entries that fail to list are skipped.
fn read_children(dir: &Path) -> io::Result<Vec<DirEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        match entry {
            Ok(e) => entries.push(e),
            Err(e) => warn!("skipping entry in {}: {}", dir.display(), e),
        }
    }
    entries.sort_by_key(|a| a.file_name());
    Ok(entries)
}
