//! Display admission and descent decisions

use std::path::{Component, Path};

use log::trace;

use crate::error::Result;
use crate::tree::NodeKind;

use super::defaults::{DefaultExcludes, SMART_EXCLUDES};
use super::pattern::{Pattern, host_is_case_sensitive};

/// Outcome of filtering one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    /// Entry appears in the displayed sequence
    pub display: bool,
    /// Directory children are visited (always false for non-directories)
    pub descend: bool,
}

/// Immutable filter configuration, compiled once per run.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
    show_hidden: bool,
    max_depth: Option<usize>,
}

impl Default for FilterSpec {
    /// Smart-exclude on, hidden entries hidden, no depth limit.
    fn default() -> Self {
        let excludes = SMART_EXCLUDES
            .patterns
            .iter()
            .filter_map(|p| Pattern::new(p, host_is_case_sensitive()).ok())
            .collect();
        Self {
            include: Vec::new(),
            exclude: excludes,
            show_hidden: false,
            max_depth: None,
        }
    }
}

impl FilterSpec {
    pub fn builder() -> FilterSpecBuilder {
        FilterSpecBuilder::default()
    }

    /// A spec that admits everything, hidden entries included.
    pub fn permissive() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            show_hidden: true,
            max_depth: None,
        }
    }

    pub fn include_patterns(&self) -> &[Pattern] {
        &self.include
    }

    /// Effective exclude list in evaluation order (defaults first).
    pub fn exclude_patterns(&self) -> &[Pattern] {
        &self.exclude
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Decide whether an entry is displayed and, for directories, whether its
    /// children are visited. `depth` is 0 for the root's immediate children.
    pub fn admit(&self, rel_path: &Path, kind: NodeKind, depth: usize) -> Admission {
        let is_dir = kind == NodeKind::Directory;
        let mut display = true;
        let mut descend = is_dir;

        if !self.show_hidden && is_hidden(rel_path) {
            display = false;
        }

        if display && !is_dir && !self.include.is_empty() {
            display = self.include.iter().any(|p| p.is_match(rel_path, is_dir));
        }

        // Last matching exclude wins; a negated match re-admits.
        if let Some(pattern) = self
            .exclude
            .iter()
            .rev()
            .find(|p| p.matches_glob(rel_path, is_dir))
        {
            if pattern.is_negated() {
                display = true;
            } else {
                display = false;
                descend = false;
                trace!("excluded {} by '{}'", rel_path.display(), pattern.as_str());
            }
        }

        if let Some(max) = self.max_depth {
            if depth > max {
                display = false;
                descend = false;
            } else if depth == max {
                descend = false;
            }
        }

        Admission { display, descend }
    }
}

/// True when the entry or any ancestor below the root starts with a dot.
fn is_hidden(rel_path: &Path) -> bool {
    rel_path.components().any(|c| match c {
        Component::Normal(part) => part.to_string_lossy().starts_with('.'),
        _ => false,
    })
}

/// Builder for [`FilterSpec`]; pattern compile errors surface from `build`.
#[derive(Debug, Clone)]
pub struct FilterSpecBuilder {
    include: Vec<String>,
    exclude: Vec<String>,
    smart_exclude: bool,
    defaults: DefaultExcludes,
    show_hidden: bool,
    max_depth: Option<usize>,
    case_sensitive: bool,
}

impl Default for FilterSpecBuilder {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            smart_exclude: true,
            defaults: SMART_EXCLUDES,
            show_hidden: false,
            max_depth: None,
            case_sensitive: host_is_case_sensitive(),
        }
    }
}

impl FilterSpecBuilder {
    pub fn include<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn smart_exclude(mut self, enabled: bool) -> Self {
        self.smart_exclude = enabled;
        self
    }

    /// Replace the built-in smart-exclude list.
    pub fn default_excludes(mut self, defaults: DefaultExcludes) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn show_hidden(mut self, show: bool) -> Self {
        self.show_hidden = show;
        self
    }

    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn case_sensitive(mut self, sensitive: bool) -> Self {
        self.case_sensitive = sensitive;
        self
    }

    pub fn build(self) -> Result<FilterSpec> {
        let compile = |p: &str| Pattern::new(p, self.case_sensitive);

        let include = self
            .include
            .iter()
            .map(|p| compile(p.as_str()))
            .collect::<Result<Vec<_>>>()?;

        let mut exclude = Vec::new();
        if self.smart_exclude {
            for default in self.defaults.patterns {
                if self.include.iter().any(|inc| names_default(inc, default)) {
                    trace!("smart exclude '{}' overridden by include", default);
                    continue;
                }
                exclude.push(compile(*default)?);
            }
        }
        for p in &self.exclude {
            exclude.push(compile(p.as_str())?);
        }

        Ok(FilterSpec {
            include,
            exclude,
            show_hidden: self.show_hidden,
            max_depth: self.max_depth,
        })
    }
}

/// An include pattern overrides a default exclusion when it names it.
fn names_default(include: &str, default: &str) -> bool {
    let include = include.trim_start_matches('/');
    include == default
        || include
            .strip_prefix(default)
            .is_some_and(|rest| rest.starts_with('/'))
}
