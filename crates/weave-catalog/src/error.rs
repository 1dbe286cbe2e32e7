//! Error types for the catalog.

use std::path::PathBuf;

use thiserror::Error;
use weave_sql_core::SqlError;

/// Catalog errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reading a configuration or snapshot file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that was read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The TOML configuration is invalid.
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// The JSON configuration or snapshot is invalid.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension selects no known format.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(PathBuf),

    /// A table pattern is not a valid glob.
    #[error("invalid table pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Underlying error.
        source: glob::PatternError,
    },

    /// Two tables, or two columns of one table, ended up with the same alias.
    #[error("duplicate alias '{alias}' in {scope}")]
    DuplicateAlias {
        /// The alias after renaming.
        alias: String,
        /// `catalog` for tables, the table alias for columns.
        scope: String,
    },

    /// No table has the given alias.
    #[error("unknown table '{0}'")]
    UnknownTable(String),

    /// Error from the statement builder.
    #[error(transparent)]
    Core(#[from] SqlError),

    /// [`install`](crate::install) was called twice.
    #[error("a catalog is already installed")]
    AlreadyInstalled,
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
