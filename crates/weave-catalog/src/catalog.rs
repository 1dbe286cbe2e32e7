//! The schema snapshot: renamed, typed tables indexed by alias.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use tracing::{debug, info, warn};
use weave_sql_core::schema::{
    AnyColumn, Boolean, ColumnDefinition, Date, Decimal, Domain, DomainKind, Integer, Table,
    TableBuilder, Text, Time, Timestamp,
};
use weave_sql_core::Dialect;

use crate::config::{Acl, CatalogConfig};
use crate::error::{CatalogError, Result};
use crate::metadata::{self, ColumnMetadata, TableMetadata};
use crate::naming::{PatternMap, Renamer};

static CATALOG: OnceLock<Catalog> = OnceLock::new();

#[derive(Debug)]
struct Entry {
    table: Table,
    keys: Vec<AnyColumn>,
    acl: Vec<Acl>,
}

/// Read-only tables of one database, addressed by their public aliases.
#[derive(Debug)]
pub struct Catalog {
    dialect: Dialect,
    entries: Vec<Entry>,
    by_alias: HashMap<String, usize>,
}

impl Catalog {
    /// Builds the catalog from discovered tables.
    ///
    /// Table and column names are rewritten by the configured rules, column
    /// domains follow the type tag. Fails when two tables, or two columns of
    /// one table, end up with the same alias.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateAlias`] for alias clashes,
    /// [`CatalogError::InvalidPattern`] for bad globs in the configuration, and
    /// [`CatalogError::Core`] for an unknown dialect.
    pub fn build(config: &CatalogConfig, tables: Vec<TableMetadata>) -> Result<Self> {
        let dialect = Dialect::for_name(&config.dialect)?;
        let renamer = Renamer::compile(&config.tables)?;
        let acls = PatternMap::compile(&config.acl)?;

        let mut entries = Vec::with_capacity(tables.len());
        let mut by_alias = HashMap::with_capacity(tables.len());
        for metadata in tables {
            let alias = renamer.table_alias(&metadata.name);
            if alias != metadata.name {
                debug!(table = %metadata.name, alias = %alias, "Renamed table");
            }
            if by_alias.contains_key(&alias) {
                return Err(CatalogError::DuplicateAlias {
                    alias,
                    scope: String::from("catalog"),
                });
            }

            let acl = acls
                .lookup(&metadata.name)
                .cloned()
                .unwrap_or_else(|| Acl::ALL.to_vec());
            let entry = build_table(&renamer, &alias, metadata, acl)?;
            by_alias.insert(alias, entries.len());
            entries.push(entry);
        }

        info!(dialect = %dialect, tables = entries.len(), "Built catalog");
        Ok(Self {
            dialect,
            entries,
            by_alias,
        })
    }

    /// Loads the configuration and a schema snapshot from files, then builds.
    ///
    /// # Errors
    ///
    /// Fails when either file cannot be loaded, or as [`build`](Self::build).
    pub fn load(config: impl AsRef<Path>, snapshot: impl AsRef<Path>) -> Result<Self> {
        let config = CatalogConfig::load(config)?;
        let tables = metadata::load_snapshot(snapshot)?;
        Self::build(&config, tables)
    }

    /// Dialect the catalog's statements are built for.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The table with the public alias `alias`.
    #[must_use]
    pub fn table(&self, alias: &str) -> Option<&Table> {
        self.entry(alias).map(|entry| &entry.table)
    }

    /// All tables, in discovery order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.entries.iter().map(|entry| &entry.table)
    }

    /// The column with the public alias `column_alias` in the table
    /// `table_alias`.
    #[must_use]
    pub fn column(&self, table_alias: &str, column_alias: &str) -> Option<&AnyColumn> {
        self.table(table_alias)?.column(column_alias)
    }

    /// Columns flagged as keys of the table, in column order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownTable`] when no table has the alias.
    pub fn key_columns(&self, table_alias: &str) -> Result<&[AnyColumn]> {
        self.require(table_alias).map(|entry| entry.keys.as_slice())
    }

    /// Operations the table is exposed for.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownTable`] when no table has the alias.
    pub fn acl(&self, table_alias: &str) -> Result<&[Acl]> {
        self.require(table_alias).map(|entry| entry.acl.as_slice())
    }

    /// Whether the table is exposed for `acl`. Operations by key also need
    /// at least one key column.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownTable`] when no table has the alias.
    pub fn allows(&self, table_alias: &str, acl: Acl) -> Result<bool> {
        let entry = self.require(table_alias)?;
        Ok(entry.acl.contains(&acl) && (!acl.requires_key() || !entry.keys.is_empty()))
    }

    fn entry(&self, alias: &str) -> Option<&Entry> {
        self.by_alias.get(alias).map(|&index| &self.entries[index])
    }

    fn require(&self, alias: &str) -> Result<&Entry> {
        self.entry(alias)
            .ok_or_else(|| CatalogError::UnknownTable(alias.to_owned()))
    }
}

fn build_table(
    renamer: &Renamer,
    alias: &str,
    metadata: TableMetadata,
    acl: Vec<Acl>,
) -> Result<Entry> {
    let mut builder = Table::aliased(metadata.name.as_str(), alias);
    if let Some(remark) = metadata.remark {
        builder.remark(remark);
    }

    let mut key_aliases = Vec::new();
    for column in &metadata.columns {
        let column_alias = renamer.column_alias(&metadata.name, &column.name);
        if builder.columns().iter().any(|c| c.alias() == column_alias) {
            return Err(CatalogError::DuplicateAlias {
                alias: column_alias,
                scope: alias.to_owned(),
            });
        }
        if column_alias != column.name {
            debug!(table = %alias, column = %column.name, alias = %column_alias, "Renamed column");
        }
        let kind = DomainKind::for_type_name(&column.type_name).unwrap_or_else(|| {
            warn!(
                table = %metadata.name,
                column = %column.name,
                type_name = %column.type_name,
                "Unknown column type, treating as text"
            );
            DomainKind::Text
        });
        match kind {
            DomainKind::Integer => add_column::<Integer>(&mut builder, column, &column_alias),
            DomainKind::Decimal => add_column::<Decimal>(&mut builder, column, &column_alias),
            DomainKind::Text => add_column::<Text>(&mut builder, column, &column_alias),
            DomainKind::Date => add_column::<Date>(&mut builder, column, &column_alias),
            DomainKind::Time => add_column::<Time>(&mut builder, column, &column_alias),
            DomainKind::Timestamp => add_column::<Timestamp>(&mut builder, column, &column_alias),
            DomainKind::Boolean => add_column::<Boolean>(&mut builder, column, &column_alias),
        }
        if column.key {
            key_aliases.push(column_alias);
        }
    }

    let table = builder.build();
    let keys = key_aliases
        .iter()
        .filter_map(|key| table.column(key).cloned())
        .collect();
    Ok(Entry { table, keys, acl })
}

fn add_column<D: Domain>(builder: &mut TableBuilder, column: &ColumnMetadata, alias: &str) {
    let mut added = builder
        .column::<D>(column.name.as_str())
        .definition(ColumnDefinition::new(column.type_name.as_str(), column.type_code));
    if alias != column.name {
        added = added.alias(alias);
    }
    if let Some(remark) = &column.remark {
        added = added.remark(remark.as_str());
    }
    added.add();
}

/// Installs `catalog` as the process-wide catalog. Succeeds once.
///
/// # Errors
///
/// Returns [`CatalogError::AlreadyInstalled`] on every later call.
pub fn install(catalog: Catalog) -> Result<&'static Catalog> {
    CATALOG
        .set(catalog)
        .map_err(|_| CatalogError::AlreadyInstalled)?;
    CATALOG.get().ok_or(CatalogError::AlreadyInstalled)
}

/// The installed catalog, if any.
#[must_use]
pub fn global() -> Option<&'static Catalog> {
    CATALOG.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::{NameRule, TableNameRule};
    use weave_sql_core::schema::type_code;

    fn orders() -> TableMetadata {
        TableMetadata::new("t_orders")
            .remark("Customer orders")
            .column(ColumnMetadata::new("f_id", "INT", type_code::INTEGER).key())
            .column(ColumnMetadata::new("f_total", "DECIMAL(10,2)", type_code::DECIMAL))
            .column(ColumnMetadata::new("f_placed", "DATETIME", type_code::TIMESTAMP))
            .column(ColumnMetadata::new("f_shape", "GEOMETRY", 0))
    }

    fn config() -> CatalogConfig {
        CatalogConfig::new("MySQL").table_rule(
            "t_*",
            TableNameRule::new(
                NameRule::default().remove("t_", ""),
                NameRule::default().remove("f_", ""),
            ),
        )
    }

    #[test]
    fn test_build_renames_and_types() {
        let catalog = Catalog::build(&config(), vec![orders()]).unwrap();
        assert_eq!(catalog.dialect(), Dialect::MySql);

        let table = catalog.table("orders").unwrap();
        assert_eq!(table.name(), "t_orders");
        assert_eq!(table.remark(), Some("Customer orders"));
        assert!(catalog.table("t_orders").is_none());

        let total = catalog.column("orders", "total").unwrap();
        assert_eq!(total.kind(), DomainKind::Decimal);
        assert_eq!(total.name(), "f_total");
        assert_eq!(total.definition().type_name(), "DECIMAL(10,2)");
        assert_eq!(
            catalog.column("orders", "placed").unwrap().kind(),
            DomainKind::Timestamp
        );
        assert_eq!(
            catalog.column("orders", "shape").unwrap().kind(),
            DomainKind::Text
        );
    }

    #[test]
    fn test_key_columns() {
        let catalog = Catalog::build(&config(), vec![orders()]).unwrap();
        let keys = catalog.key_columns("orders").unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].alias(), "id");
        assert!(matches!(
            catalog.key_columns("missing"),
            Err(CatalogError::UnknownTable(ref name)) if name == "missing"
        ));
    }

    #[test]
    fn test_duplicate_table_alias() {
        let err = Catalog::build(
            &config(),
            vec![TableMetadata::new("t_orders"), TableMetadata::new("orders")],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DuplicateAlias { ref alias, ref scope } if alias == "orders" && scope == "catalog"
        ));
    }

    #[test]
    fn test_duplicate_column_alias() {
        let table = TableMetadata::new("t_orders")
            .column(ColumnMetadata::new("f_id", "INT", type_code::INTEGER))
            .column(ColumnMetadata::new("id", "INT", type_code::INTEGER));
        let err = Catalog::build(&config(), vec![table]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DuplicateAlias { ref alias, ref scope } if alias == "id" && scope == "orders"
        ));
    }

    #[test]
    fn test_acl_defaults_and_overrides() {
        let config = config().acl("t_audit*", [Acl::Query]);
        let catalog = Catalog::build(
            &config,
            vec![orders(), TableMetadata::new("t_audit_log")],
        )
        .unwrap();
        assert_eq!(catalog.acl("orders").unwrap(), Acl::ALL);
        assert!(catalog.allows("audit_log", Acl::Query).unwrap());
        assert!(!catalog.allows("audit_log", Acl::Delete).unwrap());
    }

    #[test]
    fn test_unknown_dialect() {
        let err = Catalog::build(&CatalogConfig::new("oracle"), Vec::new()).unwrap_err();
        assert!(matches!(err, CatalogError::Core(_)));
    }
}
