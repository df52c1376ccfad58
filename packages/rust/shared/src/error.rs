//! Error types for readme-indexer.
//!
//! Library crates use [`ReadmeIndexerError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all readme-indexer operations.
#[derive(Debug, thiserror::Error)]
pub enum ReadmeIndexerError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A required sentinel tag is absent from the README.
    #[error("{path:?} is missing the {marker} marker")]
    MissingMarker { marker: String, path: PathBuf },

    /// The directory the articles are scanned from does not exist.
    #[error("source directory {path:?} does not exist")]
    MissingSource { path: PathBuf },

    /// Data validation error (unknown category, malformed README, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ReadmeIndexerError>;

impl ReadmeIndexerError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// A sentinel tag was not found in the given README.
    pub fn missing_marker(marker: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingMarker {
            marker: marker.into(),
            path: path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = ReadmeIndexerError::config("unknown key `notez`");
        assert_eq!(err.to_string(), "config error: unknown key `notez`");

        let err = ReadmeIndexerError::missing_marker("<!-- NOTES_END -->", "README.md");
        assert!(err.to_string().contains("<!-- NOTES_END -->"));

        let err = ReadmeIndexerError::MissingSource {
            path: PathBuf::from("articles"),
        };
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn every_variant_is_constructible_and_displays() {
        let all = [
            ReadmeIndexerError::config("bad key"),
            ReadmeIndexerError::io(
                "README.md",
                std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            ),
            ReadmeIndexerError::missing_marker("<!-- NOTES_START -->", "README.md"),
            ReadmeIndexerError::MissingSource {
                path: PathBuf::from("articles"),
            },
            ReadmeIndexerError::validation("tags out of order"),
        ];

        for err in &all {
            let prefix = match err {
                ReadmeIndexerError::Config { .. } => "config error",
                ReadmeIndexerError::Io { .. } => "I/O error",
                ReadmeIndexerError::MissingMarker { .. } => "\"README.md\" is missing",
                ReadmeIndexerError::MissingSource { .. } => "source directory",
                ReadmeIndexerError::Validation { .. } => "validation error",
            };
            assert!(err.to_string().starts_with(prefix), "{err}");
        }
    }
}
