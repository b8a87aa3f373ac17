//! CLI entry point for dirtree

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use dirtree::logging::StderrLogger;
use dirtree::{
    DirectoryPicker, Error, ExportSpec, FilterSpec, IndicatorMode, LlmExporter, Node, PromptPicker,
    RenderConfig, TreeRenderer, TreeStyle, TreeWalker, format_size, parse_size, print_json,
};
use log::{debug, info, warn};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            io::stdout().is_terminal()
        }
    }
}

/// Tree drawing style
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Style {
    #[default]
    Unicode,
    Ascii,
    Bold,
    Rounded,
    Emoji,
    Minimal,
}

impl From<Style> for TreeStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Unicode => TreeStyle::Unicode,
            Style::Ascii => TreeStyle::Ascii,
            Style::Bold => TreeStyle::Bold,
            Style::Rounded => TreeStyle::Rounded,
            Style::Emoji => TreeStyle::Emoji,
            Style::Minimal => TreeStyle::Minimal,
        }
    }
}

/// Export markers in the displayed tree
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Indicators {
    /// Mark included files with [LLM✓] and the rest with [LLM✗]
    All,
    /// Mark included files only
    #[default]
    Included,
    /// No markers
    #[value(name = "none")]
    Off,
}

impl From<Indicators> for IndicatorMode {
    fn from(indicators: Indicators) -> Self {
        match indicators {
            Indicators::All => IndicatorMode::All,
            Indicators::Included => IndicatorMode::Included,
            Indicators::Off => IndicatorMode::Off,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dirtree")]
#[command(about = "Directory trees with layered filtering and LLM-ready markdown export")]
#[command(version)]
struct Args {
    /// Directory to display
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Only show files matching PATTERN (can be used multiple times)
    #[arg(short = 'I', long = "include", value_name = "PATTERN")]
    include: Vec<String>,

    /// Hide entries matching PATTERN; prefix with ! to force-include
    /// (can be used multiple times)
    #[arg(short = 'E', long = "exclude", value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Hide common clutter: VCS metadata, dependency and build dirs (default)
    #[arg(long = "smart-exclude", overrides_with = "no_smart_exclude")]
    smart_exclude: bool,

    /// Disable the built-in exclusion list
    #[arg(long = "no-smart-exclude", overrides_with = "smart_exclude")]
    no_smart_exclude: bool,

    /// Show hidden files and directories
    #[arg(short = 'H', long = "hidden")]
    hidden: bool,

    /// Descend at most N levels below the root's children (0 = children only)
    #[arg(short = 'd', long = "max-depth", value_name = "N")]
    max_depth: Option<usize>,

    /// Tree drawing style
    #[arg(short = 's', long = "style", default_value = "unicode")]
    style: Style,

    /// Show file sizes next to filenames
    #[arg(long = "size")]
    size: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Output the displayed entries as JSON
    #[arg(long = "json")]
    json: bool,

    /// Write a markdown export with file contents for LLM context
    #[arg(short = 'L', long = "llm")]
    llm: bool,

    /// Largest file whose content is exported, e.g. 100k, 1.5m
    #[arg(long = "llm-max-size", value_name = "SIZE", default_value = "100k")]
    llm_max_size: String,

    /// Only export content for these extensions (repeatable, comma lists allowed)
    #[arg(long = "llm-ext", value_name = "EXT")]
    llm_ext: Vec<String>,

    /// Directory for the export file (default: current directory)
    #[arg(long = "llm-output-dir", value_name = "DIR")]
    llm_output_dir: Option<PathBuf>,

    /// Export markers in the tree while exporting: all, included, none
    #[arg(long = "llm-indicators", value_name = "WHICH", default_value = "included")]
    llm_indicators: Indicators,

    /// Choose the directory interactively
    #[arg(short = 'i', long = "interactive")]
    interactive: bool,

    /// Log filter decisions and progress to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    let use_color = should_use_color(args.color);
    StderrLogger::init(args.verbose, use_color && io::stderr().is_terminal());

    if let Err(e) = run(&args, use_color) {
        eprintln!("dirtree: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args, use_color: bool) -> dirtree::Result<()> {
    // All configuration is validated before the walk starts.
    let filter = FilterSpec::builder()
        .include(&args.include)
        .exclude(&args.exclude)
        .smart_exclude(args.smart_exclude || !args.no_smart_exclude)
        .show_hidden(args.hidden)
        .max_depth(args.max_depth)
        .build()?;
    debug!(
        "{} include and {} exclude patterns in effect",
        filter.include_patterns().len(),
        filter.exclude_patterns().len()
    );
    let export_spec = if args.llm {
        Some(export_spec(args)?)
    } else {
        None
    };

    let Some(root) = choose_root(args)? else {
        return Ok(());
    };

    let walker = TreeWalker::new(filter);
    let mut walk = walker.walk(&root)?;
    let root_name = root_name(walk.root());
    let nodes: Vec<Node> = walk.by_ref().collect();
    info!(
        "walked {} entries, {} displayed",
        walk.entries_seen(),
        nodes.len()
    );
    if walk.errors() > 0 {
        warn!("{} entries could not be read", walk.errors());
    }

    let printed = if args.json {
        print_json(walk.root(), &nodes)
    } else {
        let renderer = TreeRenderer::new(RenderConfig {
            style: args.style.into(),
            use_color,
            show_size: args.size,
            indicators: args.llm_indicators.into(),
            export: export_spec.clone(),
        });
        renderer.print(&root_name, &nodes).map(|_| ())
    };
    if let Err(e) = printed {
        eprintln!("dirtree: error writing output: {}", e);
        process::exit(1);
    }

    if let Some(spec) = export_spec {
        let exporter = LlmExporter::new(spec);
        let document = exporter.export(&root_name, &nodes);
        let path = exporter.write(&document)?;
        let summary = document.summary();
        eprintln!(
            "dirtree: LLM export written to {} ({}/{} files with content, {})",
            path.display(),
            summary.with_content,
            summary.files_checked,
            format_size(summary.content_bytes)
        );
    }
    Ok(())
}

fn export_spec(args: &Args) -> dirtree::Result<ExportSpec> {
    let mut spec = ExportSpec {
        max_file_size: parse_size(&args.llm_max_size)?,
        ..Default::default()
    };
    spec.add_extensions(&args.llm_ext);
    if let Some(dir) = &args.llm_output_dir {
        spec.output_directory = dir.clone();
    }
    Ok(spec)
}

/// The directory to scan, or `None` when the picker was cancelled.
fn choose_root(args: &Args) -> dirtree::Result<Option<PathBuf>> {
    if !args.interactive {
        return Ok(Some(args.path.clone()));
    }
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        warn!("--interactive needs a terminal, using {}", args.path.display());
        return Ok(Some(args.path.clone()));
    }
    let mut picker = PromptPicker::new(stdin.lock(), io::stderr()).show_hidden(args.hidden);
    picker
        .pick(&args.path)
        .map_err(|source| Error::RootUnreadable {
            path: args.path.clone(),
            source,
        })
}

fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "root".to_string())
}
