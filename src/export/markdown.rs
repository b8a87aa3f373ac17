//! Markdown export document

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::info;

use crate::error::{Error, Result};
use crate::size::format_size;

use super::content::{Encoding, ExportRecord, GENERATED_MARKER};

/// Counters shown at the end of the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Displayed regular files considered for export
    pub files_checked: usize,
    pub with_content: usize,
    pub truncated: usize,
    pub binary: usize,
    pub errors: usize,
    /// Bytes of content included
    pub content_bytes: u64,
}

/// A finished export, ready to render or write.
#[derive(Debug, Clone)]
pub struct ExportDocument {
    pub root_name: String,
    pub generated: DateTime<Local>,
    /// Plain tree text of every displayed node
    pub structure: String,
    pub records: Vec<ExportRecord>,
    pub files_checked: usize,
    pub extensions: BTreeSet<String>,
    pub max_file_size: u64,
}

impl ExportDocument {
    pub fn summary(&self) -> ExportSummary {
        let mut summary = ExportSummary {
            files_checked: self.files_checked,
            ..Default::default()
        };
        for record in &self.records {
            if let Some(content) = &record.content {
                summary.with_content += 1;
                summary.content_bytes += content.len() as u64;
            } else if record.error.is_some() {
                summary.errors += 1;
            } else if record.truncated {
                summary.truncated += 1;
            } else if record.encoding == Encoding::Binary {
                summary.binary += 1;
            }
        }
        summary
    }

    /// `dirtree_export_<root>_<YYYYmmdd_HHMMSS>.md`
    pub fn file_name(&self) -> String {
        format!(
            "dirtree_export_{}_{}.md",
            self.root_name,
            self.generated.format("%Y%m%d_%H%M%S")
        )
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let summary = self.summary();

        let _ = writeln!(out, "{}", GENERATED_MARKER);
        let _ = writeln!(out, "# Directory Tree for: {}", self.root_name);
        let _ = writeln!(
            out,
            "Generated on: {}",
            self.generated.format("%Y-%m-%d %H:%M:%S")
        );

        out.push_str("\n## Directory Structure\n");
        push_block(&mut out, "text", &self.structure);

        out.push_str("\n## File Contents\n\n");
        if self.extensions.is_empty() {
            out.push_str(
                "*Content included for all non-binary files (excluding common binary formats).*\n",
            );
        } else {
            let list: Vec<&str> = self.extensions.iter().map(String::as_str).collect();
            let _ = writeln!(
                out,
                "*Content included for file extensions: {}*",
                list.join(", ")
            );
        }
        let _ = writeln!(
            out,
            "*Maximum file size for inclusion: {}*",
            format_size(self.max_file_size)
        );

        for record in &self.records {
            self.push_record(&mut out, record);
        }
        if summary.with_content == 0 {
            out.push_str(
                "\n*No file content included based on current settings (size, type, or errors).*\n",
            );
        }

        out.push_str("\n## Summary\n\n");
        let _ = writeln!(
            out,
            "* Files with content included: {}/{}",
            summary.with_content, summary.files_checked
        );
        let _ = writeln!(
            out,
            "* Total content size: {}",
            format_size(summary.content_bytes)
        );
        if summary.truncated > 0 {
            let _ = writeln!(out, "* Files over the size limit: {}", summary.truncated);
        }
        if summary.binary > 0 {
            let _ = writeln!(out, "* Binary files skipped: {}", summary.binary);
        }
        if summary.errors > 0 {
            let _ = writeln!(out, "* Unreadable files: {}", summary.errors);
        }
        out
    }

    fn push_record(&self, out: &mut String, record: &ExportRecord) {
        let _ = writeln!(
            out,
            "\n### `{}` ({})\n",
            record.path,
            format_size(record.size)
        );

        if let Some(err) = &record.error {
            let _ = writeln!(out, "*Content omitted: could not read file ({}).*", err);
            return;
        }
        if record.truncated {
            let _ = writeln!(
                out,
                "*Content omitted: file exceeds the {} limit.*",
                format_size(self.max_file_size)
            );
            return;
        }
        let Some(content) = &record.content else {
            out.push_str("*Content omitted: binary file.*\n");
            return;
        };
        if record.encoding == Encoding::Lossy {
            out.push_str("*Not valid UTF-8: invalid bytes were replaced.*\n\n");
        }
        let lang = Path::new(&record.path)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        push_block(out, &lang, content);
    }

    /// Write the rendered document into `dir`, creating it when missing.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir).map_err(|source| Error::ExportWrite {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(self.file_name());
        fs::write(&path, self.render()).map_err(|source| Error::ExportWrite {
            path: path.clone(),
            source,
        })?;
        info!("export written to {}", path.display());
        Ok(path)
    }
}

/// Append a fenced block whose fence is longer than any backtick run inside.
fn push_block(out: &mut String, lang: &str, body: &str) {
    let fence = fence_for(body);
    let _ = writeln!(out, "{}{}", fence, lang);
    out.push_str(body);
    if !body.is_empty() && !body.ends_with('\n') {
        out.push('\n');
    }
    let _ = writeln!(out, "{}", fence);
}

fn fence_for(body: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in body.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}
