//! JSON output formatting

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::tree::{Node, NodeKind, serialize_lossy_path};

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(serialize_with = "serialize_lossy_path")]
    root: &'a Path,
    directories: usize,
    files: usize,
    entries: &'a [Node],
}

/// Serialize the walked nodes as pretty-printed JSON.
pub fn to_json(root: &Path, nodes: &[Node]) -> serde_json::Result<String> {
    let directories = nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Directory)
        .count();
    let report = JsonReport {
        root,
        directories,
        files: nodes.len() - directories,
        entries: nodes,
    };
    serde_json::to_string_pretty(&report)
}

/// Print the walked nodes as pretty-printed JSON to stdout.
pub fn print_json(root: &Path, nodes: &[Node]) -> io::Result<()> {
    let json = to_json(root, nodes).map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_report_counts_and_entries() {
        let nodes = vec![
            Node {
                name: "src".to_string(),
                path: PathBuf::from("/p/src"),
                rel_path: PathBuf::from("src"),
                depth: 0,
                kind: NodeKind::Directory,
                size: None,
                display: true,
                descend: true,
                error: None,
            },
            Node {
                name: "lib.rs".to_string(),
                path: PathBuf::from("/p/src/lib.rs"),
                rel_path: PathBuf::from("src/lib.rs"),
                depth: 1,
                kind: NodeKind::File,
                size: Some(12),
                display: true,
                descend: false,
                error: Some("permission denied".to_string()),
            },
        ];
        let json = to_json(Path::new("/p"), &nodes).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["root"], "/p");
        assert_eq!(value["directories"], 1);
        assert_eq!(value["files"], 1);
        assert_eq!(value["entries"][1]["rel_path"], "src/lib.rs");
        assert_eq!(value["entries"][1]["error"], "permission denied");
        assert!(value["entries"][0].get("size").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_names_do_not_fail() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"bad\xff.txt");
        let root = Path::new("/p").join(OsStr::from_bytes(b"r\xfe"));
        let nodes = vec![Node {
            name: raw.to_string_lossy().to_string(),
            path: root.join(raw),
            rel_path: PathBuf::from(raw),
            depth: 0,
            kind: NodeKind::File,
            size: Some(1),
            display: true,
            descend: false,
            error: None,
        }];
        let json = to_json(&root, &nodes).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["root"], "/p/r\u{FFFD}");
        assert_eq!(value["entries"][0]["path"], "/p/r\u{FFFD}/bad\u{FFFD}.txt");
        assert_eq!(value["entries"][0]["name"], "bad\u{FFFD}.txt");
    }
}
