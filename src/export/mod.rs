//! LLM-oriented markdown export
//!
//! The export runs over the same displayed nodes as the tree but decides
//! content inclusion with its own rules ([`ExportSpec`]): an extension
//! allow-list, a size cap and binary detection.

mod content;
mod markdown;
mod spec;

use chrono::Local;
use log::info;

use crate::output::{RenderConfig, TreeRenderer};
use crate::tree::{Node, NodeKind};

pub use content::{Encoding, ExportRecord, GENERATED_MARKER, decode, looks_binary, read_record};
pub use markdown::{ExportDocument, ExportSummary};
pub use spec::{DEFAULT_MAX_FILE_SIZE, ExportSpec};

/// Builds export documents from walked nodes.
#[derive(Debug, Clone, Default)]
pub struct LlmExporter {
    spec: ExportSpec,
}

impl LlmExporter {
    pub fn new(spec: ExportSpec) -> Self {
        Self { spec }
    }

    /// Build the document for the displayed `nodes` of a walk rooted at a
    /// directory named `root_name`.
    pub fn export(&self, root_name: &str, nodes: &[Node]) -> ExportDocument {
        let structure = TreeRenderer::new(RenderConfig {
            show_size: true,
            ..Default::default()
        })
        .format(root_name, nodes);

        let files_checked = nodes.iter().filter(|n| n.kind == NodeKind::File).count();
        let records: Vec<ExportRecord> = nodes
            .iter()
            .filter_map(|n| read_record(n, &self.spec))
            .collect();
        info!(
            "export: {} of {} files considered",
            records.len(),
            files_checked
        );

        ExportDocument {
            root_name: root_name.to_string(),
            generated: Local::now(),
            structure,
            records,
            files_checked,
            extensions: self.spec.extensions.clone(),
            max_file_size: self.spec.max_file_size,
        }
    }

    /// Write a document into the configured output directory.
    pub fn write(&self, document: &ExportDocument) -> crate::Result<std::path::PathBuf> {
        document.write_to(&self.spec.output_directory)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::filter::FilterSpec;
    use crate::tree::TreeWalker;

    fn walk(root: &std::path::Path, spec: FilterSpec) -> Vec<Node> {
        TreeWalker::new(spec).walk(root).unwrap().collect()
    }

    #[test]
    fn test_big_file_listed_but_not_exported() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("big.txt"), vec![b'a'; 500]).unwrap();
        fs::write(tmp.path().join("small.txt"), "tiny").unwrap();

        let nodes = walk(tmp.path(), FilterSpec::default());
        let exporter = LlmExporter::new(ExportSpec {
            max_file_size: 100,
            ..Default::default()
        });
        let doc = exporter.export("proj", &nodes);
        let text = doc.render();

        assert!(doc.structure.contains("big.txt (500 B)"));
        assert!(text.contains("### `big.txt` (500 B)\n\n*Content omitted"));
        assert!(!text.contains(&"a".repeat(500)));
        assert!(text.contains("```txt\ntiny\n```"));
        assert_eq!(doc.summary().with_content, 1);
        assert_eq!(doc.summary().truncated, 1);
    }

    #[test]
    fn test_size_and_binary_laws() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), vec![b'a'; 64]).unwrap();
        fs::write(tmp.path().join("b.txt"), vec![b'b'; 65]).unwrap();
        fs::write(tmp.path().join("c.dat"), [0u8, 1, 2]).unwrap();
        fs::write(tmp.path().join("d.bin"), [9u8, 0, 0]).unwrap();

        let nodes = walk(tmp.path(), FilterSpec::permissive());
        let doc = LlmExporter::new(ExportSpec {
            max_file_size: 64,
            ..Default::default()
        })
        .export("laws", &nodes);

        assert_eq!(doc.records.len(), 4);
        for record in &doc.records {
            assert!(record.size <= 64 || (record.truncated && record.content.is_none()));
            if record.encoding == Encoding::Binary {
                assert!(record.content.is_none());
            }
        }
    }

    #[test]
    fn test_display_and_export_rules_are_independent() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("main.py"), "print(1)").unwrap();
        fs::write(tmp.path().join("notes.md"), "# notes").unwrap();

        let nodes = walk(tmp.path(), FilterSpec::default());
        let mut spec = ExportSpec::default();
        spec.add_extensions(["py"]);
        let doc = LlmExporter::new(spec).export("proj", &nodes);

        assert!(doc.structure.contains("notes.md"));
        let paths: Vec<&str> = doc.records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["main.py"]);
        assert_eq!(doc.files_checked, 2);
    }

    #[test]
    fn test_write_uses_output_directory() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("lib.rs"), "pub fn f() {}").unwrap();

        let out = tmp.path().join("exports");
        let exporter = LlmExporter::new(ExportSpec {
            output_directory: out.clone(),
            ..Default::default()
        });
        let doc = exporter.export("src", &walk(&src, FilterSpec::default()));
        let path = exporter.write(&doc).unwrap();

        assert!(path.starts_with(&out));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("dirtree_export_src_"));
        assert!(name.ends_with(".md"));

        // A second export of the output directory leaves the first one out.
        let again = exporter.export("exports", &walk(&out, FilterSpec::default()));
        assert!(again.records.is_empty());
        assert_eq!(again.files_checked, 1);
    }
}
