//! Catalog configuration, loaded from TOML or JSON.
//!
//! ```toml
//! dialect = "mysql"
//!
//! [tables."t_*"]
//! removes = [{ prefix = "t_", suffix = "_tab" }]
//! replaces = { "_" = "-" }
//!
//! [tables."t_*".column]
//! removes = [{ prefix = "f_" }]
//!
//! [acl]
//! "t_audit*" = ["query"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CatalogError, Result};
use crate::naming::TableNameRule;

/// Operations a table may be exposed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acl {
    /// Insert rows.
    Create,
    /// Read rows.
    Query,
    /// Read one row by its key columns.
    QueryByKey,
    /// Change rows.
    Update,
    /// Change one row by its key columns.
    UpdateByKey,
    /// Remove rows.
    Delete,
    /// Remove one row by its key columns.
    DeleteByKey,
}

impl Acl {
    /// Every operation; the default for tables without an ACL entry.
    pub const ALL: [Self; 7] = [
        Self::Create,
        Self::Query,
        Self::QueryByKey,
        Self::Update,
        Self::UpdateByKey,
        Self::Delete,
        Self::DeleteByKey,
    ];

    /// Returns whether the operation addresses a row through the table's key
    /// columns.
    #[must_use]
    pub const fn requires_key(self) -> bool {
        matches!(self, Self::QueryByKey | Self::UpdateByKey | Self::DeleteByKey)
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Dialect name or database product name, e.g. `mysql` or `PostgreSQL`.
    pub dialect: String,

    /// Naming rules keyed by glob patterns over physical table names.
    #[serde(default)]
    pub tables: BTreeMap<String, TableNameRule>,

    /// Allowed operations keyed by glob patterns over physical table names.
    #[serde(default)]
    pub acl: BTreeMap<String, Vec<Acl>>,
}

impl CatalogConfig {
    /// Creates a configuration without any rules.
    #[must_use]
    pub fn new(dialect: impl Into<String>) -> Self {
        Self {
            dialect: dialect.into(),
            ..Self::default()
        }
    }

    /// Adds a naming rule for tables matching `pattern`.
    #[must_use]
    pub fn table_rule(mut self, pattern: impl Into<String>, rule: TableNameRule) -> Self {
        self.tables.insert(pattern.into(), rule);
        self
    }

    /// Restricts tables matching `pattern` to `acl`.
    #[must_use]
    pub fn acl(mut self, pattern: impl Into<String>, acl: impl IntoIterator<Item = Acl>) -> Self {
        self.acl.insert(pattern.into(), acl.into_iter().collect());
        self
    }

    /// Parses a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Toml`] for malformed input.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Parses a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] for malformed input.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Loads a configuration file. The format follows the extension:
    /// `.toml` or `.json`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] when the file cannot be read,
    /// [`CatalogError::UnsupportedFormat`] for other extensions, and a parse
    /// error for malformed content.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&raw)?,
            Some("json") => Self::from_json_str(&raw)?,
            _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        };
        tracing::debug!(
            path = %path.display(),
            table_rules = config.tables.len(),
            acl_rules = config.acl.len(),
            "loaded catalog config"
        );
        Ok(config)
    }
}
