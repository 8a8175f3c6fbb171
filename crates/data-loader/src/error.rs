//! Error types for the data-loader crate.
//!
//! Rust error handling concepts demonstrated:
//! - thiserror for defining custom error types
//! - Enum variants for different error cases
//! - Error messages with context
//! - Automatic `Display` and `Error` trait implementations

use crate::types::{MissingDataset, Platform};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during catalog loading
///
/// Rust concept: Using an enum for errors lets callers match on the cases
/// they can recover from (`DataNotFound`, `NoDataAvailable`) and bubble up
/// the ones they cannot (`Configuration`).
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Unknown platform identifier, unknown field, or a platform with no file mapping.
    ///
    /// This is a programming error, not a user error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The file expected for a platform is absent
    #[error("Dataset for {platform} not found: {}", .path.display())]
    DataNotFound { platform: Platform, path: PathBuf },

    /// Every platform file is absent in a combined load
    #[error("No datasets could be loaded ({} files missing)", .missing.len())]
    NoDataAvailable { missing: Vec<MissingDataset> },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader could not make sense of a file
    #[error("CSV error in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
}

impl DataLoadError {
    /// Whether a caller should warn and carry on rather than abort.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DataLoadError::DataNotFound { .. } | DataLoadError::NoDataAvailable { .. }
        )
    }
}

/// Convenience type alias for Results in this crate
///
/// Rust concept: Type aliases make code more readable
/// Instead of writing `Result<T, DataLoadError>` everywhere,
/// we can write `Result<T>`
pub type Result<T> = std::result::Result<T, DataLoadError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error_converts_and_is_fatal() {
        let err: DataLoadError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, DataLoadError::Io(_)));
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "I/O error: denied");
    }

    #[test]
    fn test_missing_data_is_recoverable() {
        let err = DataLoadError::DataNotFound {
            platform: Platform::Hulu,
            path: PathBuf::from("data/hulu_titles.csv"),
        };
        assert!(err.is_recoverable());
        assert!(!DataLoadError::Configuration("bad".into()).is_recoverable());
    }
}
