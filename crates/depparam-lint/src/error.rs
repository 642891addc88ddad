//! Lint error types

use std::path::PathBuf;

/// Errors building an index or loading configuration
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    /// Manifest is not valid JSON for a decoration index
    #[error("invalid decoration manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Configuration is not valid TOML for a lint config
    #[error("invalid lint configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Callable has no decoration record to index
    #[error("callable '{0}' is not decorated")]
    NotDecorated(String),
}

impl LintError {
    /// Create I/O error for `path`
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for lint operations
pub type LintResult<T> = Result<T, LintError>;
