//! Entry filtering
//!
//! Every entry met during a walk gets two independent answers: whether it is
//! displayed, and (for directories) whether its children are visited at all.
//!
//! Precedence, applied per entry:
//!
//! 1. hidden entries (and everything under a hidden directory) are not
//!    displayed unless hidden files are shown; descent is unaffected
//! 2. include patterns, when present, must match a file; directories are
//!    exempt so matching descendants stay reachable
//! 3. exclude patterns (smart defaults first, then explicit ones) are
//!    scanned and the last match wins: a `!` pattern re-admits the entry, any
//!    other match hides it and prunes a directory's whole subtree
//! 4. entries deeper than the depth limit are dropped and directories at the
//!    limit are listed without being descended

mod defaults;
mod pattern;
mod spec;

pub use defaults::{BINARY_EXTENSIONS, DefaultExcludes, SMART_EXCLUDES};
pub use pattern::{Pattern, host_is_case_sensitive, slash_path};
pub use spec::{Admission, FilterSpec, FilterSpecBuilder};
