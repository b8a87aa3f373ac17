//! Error types for dirtree
//!
//! Only configuration problems and export write failures surface as
//! [`Error`]. Problems with individual entries are recorded on the
//! affected [`Node`](crate::tree::Node) or
//! [`ExportRecord`](crate::export::ExportRecord) and never stop a walk.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A filter pattern failed to compile
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A human-readable size could not be parsed
    #[error("invalid size '{input}': {reason}")]
    InvalidSize { input: String, reason: String },

    #[error("cannot access '{}': {source}", path.display())]
    RootNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' is not a directory", path.display())]
    RootNotDirectory { path: PathBuf },

    #[error("cannot read directory '{}': {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The export document could not be written
    #[error("failed to write export '{}': {source}", path.display())]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// True for errors raised before any traversal starts.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Error::ExportWrite { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_classification() {
        let bad_pattern = Error::InvalidPattern {
            pattern: "[abc".to_string(),
            reason: "invalid range pattern".to_string(),
        };
        assert!(bad_pattern.is_configuration());

        let write = Error::ExportWrite {
            path: PathBuf::from("out.md"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!write.is_configuration());
    }

    #[test]
    fn test_messages_name_offending_input() {
        let err = Error::InvalidSize {
            input: "12q".to_string(),
            reason: "unknown unit 'q'".to_string(),
        };
        assert_eq!(err.to_string(), "invalid size '12q': unknown unit 'q'");

        let err = Error::RootNotDirectory {
            path: PathBuf::from("notes.txt"),
        };
        assert_eq!(err.to_string(), "'notes.txt' is not a directory");
    }
}
