//! Glob pattern matching against paths relative to the scan root

use std::fmt;
use std::path::{Component, Path};

use glob::MatchOptions;

use crate::error::{Error, Result};

/// Whether patterns compare case-sensitively on this host.
/// Windows and macOS filesystems are case-insensitive by default.
pub const fn host_is_case_sensitive() -> bool {
    !cfg!(any(windows, target_os = "macos"))
}

/// A compiled filter pattern.
///
/// - `*` matches any run of characters except `/`, `**` any run including `/`
///   (as a whole path component), `?` one character, `[...]` a class.
/// - A leading `!` negates the pattern.
/// - A trailing `/` restricts the pattern to directories.
/// - A pattern without `/` is tested against the entry name at any depth;
///   one with `/` is tested against the full relative path.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    glob: glob::Pattern,
    negated: bool,
    dir_only: bool,
    anchored: bool,
    options: MatchOptions,
}

impl Pattern {
    pub fn new(source: &str, case_sensitive: bool) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidPattern {
            pattern: source.to_string(),
            reason: reason.to_string(),
        };

        let (negated, rest) = match source.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, source),
        };
        let (dir_only, rest) = match rest.strip_suffix('/') {
            Some(rest) => (true, rest),
            None => (false, rest),
        };
        let body = rest.strip_prefix('/').unwrap_or(rest);
        if body.is_empty() {
            return Err(invalid("empty pattern"));
        }

        let glob = glob::Pattern::new(body).map_err(|e| invalid(e.msg))?;

        Ok(Self {
            source: source.to_string(),
            glob,
            negated,
            dir_only,
            anchored: body.contains('/'),
            options: MatchOptions {
                case_sensitive,
                require_literal_separator: true,
                require_literal_leading_dot: false,
            },
        })
    }

    /// The pattern as written, including any `!` prefix.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn is_dir_only(&self) -> bool {
        self.dir_only
    }

    /// Raw glob test, ignoring negation.
    pub fn matches_glob(&self, rel_path: &Path, is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }
        if self.anchored {
            self.glob
                .matches_with(&slash_path(rel_path), self.options)
        } else {
            let name = rel_path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            self.glob.matches_with(&name, self.options)
        }
    }

    /// Glob test with negation applied.
    pub fn is_match(&self, rel_path: &Path, is_dir: bool) -> bool {
        self.matches_glob(rel_path, is_dir) != self.negated
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

/// Join the normal components of a relative path with `/`, whatever the host
/// separator is.
pub fn slash_path(rel_path: &Path) -> String {
    let mut out = String::new();
    for component in rel_path.components() {
        if let Component::Normal(part) = component {
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(&part.to_string_lossy());
        }
    }
    out
}
