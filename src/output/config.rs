//! Output configuration types

use crate::export::ExportSpec;

/// Glyph set used to draw tree branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    #[default]
    Unicode,
    Ascii,
    Bold,
    Rounded,
    Emoji,
    Minimal,
}

/// Branch glyphs for one style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    /// Continuation under a non-last entry
    pub branch: &'static str,
    pub tee: &'static str,
    pub last_tee: &'static str,
    /// Continuation under a last entry
    pub empty: &'static str,
}

impl TreeStyle {
    pub fn glyphs(self) -> Glyphs {
        match self {
            TreeStyle::Unicode => Glyphs {
                branch: "│   ",
                tee: "├── ",
                last_tee: "└── ",
                empty: "    ",
            },
            TreeStyle::Ascii => Glyphs {
                branch: "|   ",
                tee: "|-- ",
                last_tee: "`-- ",
                empty: "    ",
            },
            TreeStyle::Bold => Glyphs {
                branch: "┃   ",
                tee: "┣━━ ",
                last_tee: "┗━━ ",
                empty: "    ",
            },
            TreeStyle::Rounded => Glyphs {
                branch: "│   ",
                tee: "├── ",
                last_tee: "╰── ",
                empty: "    ",
            },
            TreeStyle::Emoji => Glyphs {
                branch: "┃   ",
                tee: "├── ",
                last_tee: "└── ",
                empty: "    ",
            },
            TreeStyle::Minimal => Glyphs {
                branch: "  ",
                tee: "- ",
                last_tee: "- ",
                empty: "  ",
            },
        }
    }

    pub fn uses_icons(self) -> bool {
        self == TreeStyle::Emoji
    }
}

/// Which files get an export marker in the displayed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndicatorMode {
    /// `[LLM✓]` on files whose content is exported, `[LLM✗]` on the rest
    All,
    /// `[LLM✓]` only
    #[default]
    Included,
    Off,
}

/// Configuration for tree rendering.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    pub style: TreeStyle,
    pub use_color: bool,
    /// Append human-readable sizes to files
    pub show_size: bool,
    pub indicators: IndicatorMode,
    /// Rules of the export running alongside this tree; markers are drawn
    /// only when set
    pub export: Option<ExportSpec>,
}
