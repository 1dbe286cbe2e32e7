//! Discovered table metadata, the input of [`Catalog::build`](crate::Catalog::build).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// One physical table as reported by schema discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Physical table name.
    pub name: String,
    /// Human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    /// Columns in declaration order.
    #[serde(default)]
    pub columns: Vec<ColumnMetadata>,
}

impl TableMetadata {
    /// A table without remark or columns.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            remark: None,
            columns: Vec::new(),
        }
    }

    /// Sets the remark.
    #[must_use]
    pub fn remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Appends a column.
    #[must_use]
    pub fn column(mut self, column: ColumnMetadata) -> Self {
        self.columns.push(column);
        self
    }
}

/// One physical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Physical column name.
    pub name: String,
    /// SQL type tag, e.g. `VARCHAR(64)`.
    pub type_name: String,
    /// Numeric type code, see [`weave_sql_core::schema::type_code`].
    #[serde(default)]
    pub type_code: i32,
    /// Human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    /// Whether the column takes part in a key.
    #[serde(default)]
    pub key: bool,
}

impl ColumnMetadata {
    /// A non-key column without remark.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, type_code: i32) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            type_code,
            remark: None,
            key: false,
        }
    }

    /// Sets the remark.
    #[must_use]
    pub fn remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Flags the column as part of a key.
    #[must_use]
    pub const fn key(mut self) -> Self {
        self.key = true;
        self
    }
}

/// Wrapper for TOML snapshots, which cannot hold a bare array.
#[derive(Deserialize)]
struct Snapshot {
    #[serde(default)]
    tables: Vec<TableMetadata>,
}

/// Loads a schema snapshot. JSON files hold an array of tables, TOML files
/// a `[[tables]]` array.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] when the file cannot be read, and a format
/// error when its extension is unknown or its content is malformed.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Vec<TableMetadata>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tables = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&raw)?,
        Some("toml") => toml::from_str::<Snapshot>(&raw)?.tables,
        _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
    };
    Ok(tables)
}
