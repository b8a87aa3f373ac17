//! Reading and classifying file content for export

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use log::debug;

use crate::tree::{NOT_REGULAR, Node, NodeKind};

use super::spec::ExportSpec;

/// Bytes inspected when sniffing for binary content.
const SAMPLE_LEN: usize = 8192;

/// Share of control bytes above which a sample counts as binary.
const BINARY_RATIO: f32 = 0.1;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// First line of every export document. Files starting with it are earlier
/// exports and are left out of new ones.
pub const GENERATED_MARKER: &str = "\u{200B}<!-- DIRTREE_GENERATED_FILE -->";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    /// Invalid UTF-8 sequences were replaced with U+FFFD
    Lossy,
    Binary,
    /// Content was never read
    Unknown,
}

/// Export outcome for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    /// `/`-joined path relative to the walk root
    pub path: String,
    pub size: u64,
    pub encoding: Encoding,
    /// Over the size limit; never opened
    pub truncated: bool,
    pub content: Option<String>,
    pub error: Option<String>,
}

impl ExportRecord {
    fn empty(path: String, size: u64) -> Self {
        Self {
            path,
            size,
            encoding: Encoding::Unknown,
            truncated: false,
            content: None,
            error: None,
        }
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }
}

/// Build the record for a displayed node, or `None` when the node does not
/// take part in the export (not a regular file, refused by the extension
/// allow-list, or an earlier export).
pub fn read_record(node: &Node, spec: &ExportSpec) -> Option<ExportRecord> {
    if node.kind != NodeKind::File {
        return None;
    }
    let ext = node.extension();
    if !spec.allows(ext.as_deref()) {
        debug!("export: {} not in extension list", node.slash_path());
        return None;
    }

    let mut record = ExportRecord::empty(node.slash_path(), node.size.unwrap_or(0));

    if let Some(e) = &node.error {
        record.error = Some(e.clone());
        return Some(record);
    }
    if record.size > spec.max_file_size {
        debug!("export: {} over size limit", record.path);
        record.truncated = true;
        return Some(record);
    }
    if spec.is_known_binary(ext.as_deref()) {
        record.encoding = Encoding::Binary;
        return Some(record);
    }

    let bytes = match read_capped(&node.path, spec.max_file_size) {
        Ok(b) => b,
        Err(e) => {
            record.error = Some(e.to_string());
            return Some(record);
        }
    };
    // The file may have grown since it was listed.
    if bytes.len() as u64 > spec.max_file_size {
        record.size = record.size.max(bytes.len() as u64);
        record.truncated = true;
        return Some(record);
    }
    record.size = bytes.len() as u64;

    if looks_binary(&bytes) {
        record.encoding = Encoding::Binary;
        return Some(record);
    }

    let (content, encoding) = decode(&bytes);
    if content.starts_with(GENERATED_MARKER) {
        debug!("export: {} is a previous export", record.path);
        return None;
    }
    record.encoding = encoding;
    record.content = Some(content);
    Some(record)
}

/// Read at most `limit + 1` bytes of a regular file. Other file types are
/// refused before opening: a pipe blocks and a device never ends.
fn read_capped(path: &Path, limit: u64) -> io::Result<Vec<u8>> {
    if !fs::metadata(path)?.is_file() {
        return Err(io::Error::other(NOT_REGULAR));
    }
    let mut bytes = Vec::new();
    File::open(path)?
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// A NUL byte, or more than 10% control bytes, in the first 8 KiB.
pub fn looks_binary(bytes: &[u8]) -> bool {
    let sample = &bytes[..bytes.len().min(SAMPLE_LEN)];
    if sample.is_empty() {
        return false;
    }
    if sample.contains(&0) {
        return true;
    }
    let control = sample
        .iter()
        .filter(|&&b| b < 9 || (b > 13 && b < 32))
        .count();
    control as f32 / sample.len() as f32 > BINARY_RATIO
}

/// Strict UTF-8 first, lossy replacement otherwise. A leading BOM is dropped.
pub fn decode(bytes: &[u8]) -> (String, Encoding) {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => (s.to_string(), Encoding::Utf8),
        Err(_) => (String::from_utf8_lossy(bytes).into_owned(), Encoding::Lossy),
    }
}
