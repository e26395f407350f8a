//! Error types for mdtail
//!
//! Startup errors ([ViewerError::EmptySet], [ViewerError::Config]) end the process.
//! Everything raised while the watch loop is running is reported and the loop keeps going.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mdtail operations
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Main error type for mdtail
#[derive(Error, Debug)]
pub enum ViewerError {
    /// No documents left after resolving and deduplicating the arguments
    #[error("No markdown files found to watch")]
    EmptySet,

    /// Selection index outside of the document set. Indicates a bug in the navigation math.
    #[error("index {index} out of range for {len} documents")]
    IndexOutOfRange { index: usize, len: usize },

    /// A document could not be read for rendering
    #[error("Unable to read file: {} ({source})", path.display())]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A poll cycle could not stat a watched document
    #[error("Unable to stat file: {} ({source})", path.display())]
    WatchIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration file could not be parsed or written
    #[error("config error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Terminal setup, drawing or teardown failed
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_message_matches_cli_output() {
        assert_eq!(
            ViewerError::EmptySet.to_string(),
            "No markdown files found to watch"
        );
    }

    #[test]
    fn document_read_names_path_and_cause() {
        let err = ViewerError::DocumentRead {
            path: PathBuf::from("/notes/todo.md"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/notes/todo.md"), "missing path: {msg}");
        assert!(msg.contains("permission denied"), "missing cause: {msg}");
    }

    #[test]
    fn index_out_of_range_display() {
        let err = ViewerError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "index 4 out of range for 2 documents");
    }
}
