//! Built-in exclusion lists

/// A versioned, immutable set of exclusion patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultExcludes {
    pub version: u32,
    pub patterns: &'static [&'static str],
}

impl DefaultExcludes {
    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns.contains(&pattern)
    }
}

/// Smart-exclude list: version control metadata, dependency caches, build
/// output, editor state and scratch files.
pub const SMART_EXCLUDES: DefaultExcludes = DefaultExcludes {
    version: 1,
    patterns: &[
        // Version control
        ".git",
        "*.git",
        ".svn",
        ".hg",
        ".bzr",
        ".gitignore",
        ".gitattributes",
        ".gitmodules",
        // Node.js
        "node_modules",
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        // Python
        "__pycache__",
        "*.pyc",
        "*.pyo",
        "venv",
        "env",
        ".venv",
        ".env",
        "*.egg-info",
        "dist",
        "build",
        "htmlcov",
        ".pytest_cache",
        ".mypy_cache",
        // IDE and editor files
        ".idea",
        ".vscode",
        ".vs",
        ".DS_Store",
        "Thumbs.db",
        // Build output
        ".next",
        "out",
        "coverage",
        "bin",
        "obj",
        "target",
        // Temporary and log files
        "data",
        "*.log",
        "logs",
        "tmp",
        "temp",
        ".env.*",
        ".envrc",
        "__MACOSX",
    ],
};

/// Extensions treated as binary without looking at their bytes, used by the
/// export when no extension allow-list is given.
pub const BINARY_EXTENSIONS: &[&str] = &[
    // Images
    "jpg",
    "jpeg",
    "png",
    "gif",
    "bmp",
    "ico",
    "webp",
    "tiff",
    "tif",
    "psd",
    // Audio and video
    "mp3",
    "mp4",
    "wav",
    "avi",
    "mov",
    "wmv",
    "flv",
    "ogg",
    "webm",
    "mkv",
    "aac",
    "flac",
    // Archives
    "zip",
    "tar",
    "gz",
    "bz2",
    "xz",
    "rar",
    "7z",
    "jar",
    "war",
    "ear",
    // Executables and objects
    "exe",
    "dll",
    "so",
    "dylib",
    "bin",
    "o",
    "a",
    "lib",
    "class",
    "msi",
    "dmg",
    "pkg",
    // Office documents
    "pdf",
    "doc",
    "docx",
    "xls",
    "xlsx",
    "ppt",
    "pptx",
    "odt",
    "ods",
    "odp",
    // Databases
    "db",
    "sqlite",
    "sqlite3",
    "mdb",
    "accdb",
    "dump",
    "sqlitedb",
    // Fonts
    "ttf",
    "otf",
    "woff",
    "woff2",
    "eot",
    // Other
    "iso",
    "img",
    "swf",
    "dat",
    "pickle",
    "pkl",
    "model",
    "pt",
    "onnx",
];
