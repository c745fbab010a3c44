use std::path::Path;
use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Optional file path
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Create a source location pointing at the start of a file
    pub fn file(path: &Path) -> Self {
        Self {
            file: Some(path.display().to_string()),
            line: 1,
            column: 1,
        }
    }

    /// Attach a file path to an existing location
    pub fn in_file(mut self, path: &Path) -> Self {
        self.file = Some(path.display().to_string());
        self
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Errors raised while configuring, loading or building the docs site.
#[derive(Debug, Error)]
pub enum SiteError {
    /// Malformed redirect rule, bad alias path or invalid configuration file.
    /// Always fatal: the build halts.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },
    /// A documentation source file failed schema validation or could not be compiled.
    #[error("Content error at {location}: {message}")]
    ContentValidation {
        /// Error message
        message: String,
        /// Source location (always carries the file path)
        location: SourceLocation,
    },
    /// IO error while reading content or writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SiteError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a content validation error anchored at the start of `path`
    pub fn content(message: impl Into<String>, path: &Path) -> Self {
        Self::ContentValidation {
            message: message.into(),
            location: SourceLocation::file(path),
        }
    }

    /// Create a content validation error at an explicit location
    pub fn content_at(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::ContentValidation {
            message: message.into(),
            location,
        }
    }

    /// Returns true for configuration-time failures.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Returns true for document validation failures.
    pub fn is_content(&self) -> bool {
        matches!(self, Self::ContentValidation { .. })
    }
}

/// Convenience alias used across the workspace.
pub type Result<T, E = SiteError> = std::result::Result<T, E>;
