//! Tree renderer
//!
//! `TreeRenderer` lays a pre-order node sequence out as a tree and writes it
//! either as plain text or with colors through termcolor.

use std::io::{self, Write};
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

use crate::filter::slash_path;
use crate::size::format_size;
use crate::tree::{Node, NodeKind};

use super::config::{Glyphs, IndicatorMode, RenderConfig};

/// A node placed under its nearest displayed ancestor.
struct Entry<'a> {
    node: &'a Node,
    label: String,
    children: Vec<usize>,
}

struct Layout<'a> {
    entries: Vec<Entry<'a>>,
    top: Vec<usize>,
    dirs: usize,
    files: usize,
}

impl<'a> Layout<'a> {
    fn build<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = &'a Node>,
    {
        let mut layout = Layout {
            entries: Vec::new(),
            top: Vec::new(),
            dirs: 0,
            files: 0,
        };
        // Displayed directories on the current path
        let mut open: Vec<usize> = Vec::new();

        for node in nodes {
            while let Some(&dir) = open.last() {
                let dir_path = &layout.entries[dir].node.rel_path;
                if node.rel_path != *dir_path && node.rel_path.starts_with(dir_path) {
                    break;
                }
                open.pop();
            }

            let idx = layout.entries.len();
            let label = match open.last() {
                Some(&parent) => {
                    layout.entries[parent].children.push(idx);
                    label_under(&layout.entries[parent].node.rel_path, node)
                }
                None => {
                    layout.top.push(idx);
                    label_under(Path::new(""), node)
                }
            };
            layout.entries.push(Entry {
                node,
                label,
                children: Vec::new(),
            });

            if node.kind == NodeKind::Directory {
                layout.dirs += 1;
                open.push(idx);
            } else {
                layout.files += 1;
            }
        }
        layout
    }
}

/// Entry name, or the collapsed path from `parent` when intermediate
/// directories were not displayed.
fn label_under(parent: &Path, node: &Node) -> String {
    if node.rel_path.parent() == Some(parent) {
        return node.name.clone();
    }
    node.rel_path
        .strip_prefix(parent)
        .map(slash_path)
        .unwrap_or_else(|_| node.name.clone())
}

/// Renderer for walked trees.
pub struct TreeRenderer {
    config: RenderConfig,
}

impl TreeRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Plain text rendering, colors never applied.
    pub fn format<'a, I>(&self, root_name: &str, nodes: I) -> String
    where
        I: IntoIterator<Item = &'a Node>,
    {
        let mut out = NoColor::new(Vec::new());
        // Writing into memory cannot fail.
        let _ = self.write_to(&mut out, root_name, nodes);
        String::from_utf8_lossy(&out.into_inner()).into_owned()
    }

    /// Print to stdout, colored when the config asks for it.
    pub fn print<'a, I>(&self, root_name: &str, nodes: I) -> io::Result<(usize, usize)>
    where
        I: IntoIterator<Item = &'a Node>,
    {
        let choice = if self.config.use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write_to(&mut stdout, root_name, nodes)
    }

    /// Render to any color-capable writer. Returns (directories, files).
    pub fn write_to<'a, W, I>(
        &self,
        out: &mut W,
        root_name: &str,
        nodes: I,
    ) -> io::Result<(usize, usize)>
    where
        W: WriteColor,
        I: IntoIterator<Item = &'a Node>,
    {
        let layout = Layout::build(nodes);
        let glyphs = self.config.style.glyphs();

        if self.config.style.uses_icons() {
            write!(out, "🌳 ")?;
        }
        out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        write!(out, "{}", root_name)?;
        out.reset()?;
        writeln!(out)?;

        for (i, &idx) in layout.top.iter().enumerate() {
            let is_last = i + 1 == layout.top.len();
            self.write_entry(out, &layout, idx, "", is_last, &glyphs)?;
        }

        writeln!(out)?;
        writeln!(out, "{} directories, {} files", layout.dirs, layout.files)?;
        Ok((layout.dirs, layout.files))
    }

    /// `Some(true)` for a file whose content the export will include,
    /// `Some(false)` for one it leaves out, `None` when no marker is drawn.
    fn export_marker(&self, node: &Node) -> Option<bool> {
        let spec = self.config.export.as_ref()?;
        if node.kind != NodeKind::File {
            return None;
        }
        let included = spec.is_eligible(node);
        match self.config.indicators {
            IndicatorMode::All => Some(included),
            IndicatorMode::Included => included.then_some(true),
            IndicatorMode::Off => None,
        }
    }

    fn write_entry<W: WriteColor>(
        &self,
        out: &mut W,
        layout: &Layout<'_>,
        idx: usize,
        prefix: &str,
        is_last: bool,
        glyphs: &Glyphs,
    ) -> io::Result<()> {
        let entry = &layout.entries[idx];
        let node = entry.node;
        let connector = if is_last { glyphs.last_tee } else { glyphs.tee };

        write!(out, "{}{}", prefix, connector)?;
        if self.config.style.uses_icons() {
            let icon = match node.kind {
                NodeKind::Directory => "📂 ",
                NodeKind::Symlink => "🔗 ",
                NodeKind::File => "📄 ",
            };
            write!(out, "{}", icon)?;
        }

        let mut spec = ColorSpec::new();
        match node.kind {
            NodeKind::Directory => spec.set_fg(Some(Color::Blue)).set_bold(true),
            NodeKind::Symlink => spec.set_fg(Some(Color::Cyan)),
            NodeKind::File => spec.set_fg(Some(Color::White)),
        };
        out.set_color(&spec)?;
        write!(out, "{}", entry.label)?;
        out.reset()?;

        if self.config.show_size {
            if let Some(bytes) = node.size {
                write!(out, " ")?;
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                write!(out, "({})", format_size(bytes))?;
                out.reset()?;
            }
        }
        if let Some(included) = self.export_marker(node) {
            write!(out, " ")?;
            if included {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                write!(out, "[LLM✓]")?;
            } else {
                out.set_color(ColorSpec::new().set_dimmed(true))?;
                write!(out, "[LLM✗]")?;
            }
            out.reset()?;
        }
        if let Some(err) = &node.error {
            write!(out, " ")?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            write!(out, "[error: {}]", err)?;
            out.reset()?;
        }
        writeln!(out)?;

        let child_prefix = format!(
            "{}{}",
            prefix,
            if is_last { glyphs.empty } else { glyphs.branch }
        );
        for (i, &child) in entry.children.iter().enumerate() {
            let child_is_last = i + 1 == entry.children.len();
            self.write_entry(out, layout, child, &child_prefix, child_is_last, glyphs)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use termcolor::Buffer;

    use super::*;
    use crate::export::ExportSpec;
    use crate::output::TreeStyle;

    fn node(rel: &str, kind: NodeKind) -> Node {
        let rel_path = PathBuf::from(rel);
        Node {
            name: rel_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            path: PathBuf::from("/project").join(rel),
            depth: rel_path.components().count() - 1,
            rel_path,
            kind,
            size: (kind == NodeKind::File).then_some(2048),
            display: true,
            descend: kind == NodeKind::Directory,
            error: None,
        }
    }

    fn sample() -> Vec<Node> {
        vec![
            node("src", NodeKind::Directory),
            node("src/lib.rs", NodeKind::File),
            node("src/main.rs", NodeKind::File),
            node("Cargo.toml", NodeKind::File),
        ]
    }

    fn plain(style: TreeStyle) -> TreeRenderer {
        TreeRenderer::new(RenderConfig {
            style,
            ..Default::default()
        })
    }

    #[test]
    fn test_format_unicode() {
        let output = plain(TreeStyle::Unicode).format("project", &sample());
        let expected = "\
project
├── src
│   ├── lib.rs
│   └── main.rs
└── Cargo.toml

1 directories, 3 files
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_format_ascii_and_minimal() {
        let output = plain(TreeStyle::Ascii).format("project", &sample());
        assert!(output.contains("|-- src\n|   |-- lib.rs\n|   `-- main.rs\n`-- Cargo.toml"));

        let output = plain(TreeStyle::Minimal).format("project", &sample());
        assert!(output.contains("- src\n  - lib.rs\n  - main.rs\n- Cargo.toml"));
    }

    #[test]
    fn test_emoji_icons() {
        let output = plain(TreeStyle::Emoji).format("project", &sample());
        assert!(output.starts_with("🌳 project\n"));
        assert!(output.contains("├── 📂 src"));
        assert!(output.contains("┃   ├── 📄 lib.rs"));
    }

    #[test]
    fn test_sizes_and_errors() {
        let mut nodes = sample();
        nodes[0].error = Some("permission denied".to_string());
        let renderer = TreeRenderer::new(RenderConfig {
            show_size: true,
            ..Default::default()
        });
        let output = renderer.format("project", &nodes);
        assert!(output.contains("├── src [error: permission denied]"));
        assert!(output.contains("lib.rs (2.0 KB)"));
    }

    #[test]
    fn test_export_markers() {
        let mut nodes = sample();
        nodes[2].size = Some(500_000);
        let config = |indicators| RenderConfig {
            indicators,
            export: Some(ExportSpec::default()),
            ..Default::default()
        };

        let output = TreeRenderer::new(config(IndicatorMode::Included)).format("project", &nodes);
        assert!(output.contains("├── lib.rs [LLM✓]\n"));
        assert!(output.contains("└── main.rs\n"));
        assert!(!output.contains("src [LLM"));

        let output = TreeRenderer::new(config(IndicatorMode::All)).format("project", &nodes);
        assert!(output.contains("└── main.rs [LLM✗]\n"));
        assert!(output.contains("└── Cargo.toml [LLM✓]\n"));

        let output = TreeRenderer::new(config(IndicatorMode::Off)).format("project", &nodes);
        assert!(!output.contains("[LLM"));
    }

    #[test]
    fn test_no_markers_without_export() {
        let renderer = TreeRenderer::new(RenderConfig {
            indicators: IndicatorMode::All,
            ..Default::default()
        });
        assert!(!renderer.format("project", &sample()).contains("[LLM"));
    }

    #[test]
    fn test_orphans_collapse_to_relative_path() {
        // A file re-admitted inside a directory that was not displayed.
        let nodes = vec![
            node("docs", NodeKind::Directory),
            node("docs/.hidden/keep.md", NodeKind::File),
            node("readme.md", NodeKind::File),
        ];
        let output = plain(TreeStyle::Unicode).format("project", &nodes);
        assert!(output.contains("├── docs\n│   └── .hidden/keep.md\n└── readme.md"));

        let nodes = vec![node(".cache/keep.txt", NodeKind::File)];
        let output = plain(TreeStyle::Unicode).format("project", &nodes);
        assert!(output.contains("└── .cache/keep.txt"));
    }

    #[test]
    fn test_empty_tree() {
        let output = plain(TreeStyle::Unicode).format("empty", std::iter::empty());
        assert_eq!(output, "empty\n\n0 directories, 0 files\n");
    }

    #[test]
    fn test_color_codes_only_when_writer_supports_them() {
        let renderer = TreeRenderer::new(RenderConfig {
            use_color: true,
            ..Default::default()
        });
        let mut colored = Buffer::ansi();
        let counts = renderer.write_to(&mut colored, "project", &sample()).unwrap();
        assert_eq!(counts, (1, 3));
        assert!(String::from_utf8_lossy(colored.as_slice()).contains("\x1b["));

        let plain_text = renderer.format("project", &sample());
        assert!(!plain_text.contains("\x1b["));
    }
}
