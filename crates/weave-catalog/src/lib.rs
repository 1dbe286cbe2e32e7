//! # weave-catalog
//!
//! A read-only schema snapshot for [`weave_sql_core`].
//!
//! Discovered table metadata becomes typed core [`Table`](weave_sql_core::schema::Table)s
//! whose public names are rewritten by glob-matched naming rules. The result
//! can be installed once as process-wide state.
//!
//! ```rust
//! use weave_catalog::{Catalog, CatalogConfig, ColumnMetadata, TableMetadata};
//! use weave_sql_core::prelude::*;
//! use weave_sql_core::ConditionKind;
//!
//! let config = CatalogConfig::from_toml_str(
//!     r#"
//! dialect = "mysql"
//!
//! [tables."t_*"]
//! removes = [{ prefix = "t_" }]
//! "#,
//! )
//! .unwrap();
//! let snapshot = vec![TableMetadata::new("t_persons")
//!     .column(ColumnMetadata::new("lastname", "VARCHAR(64)", 12))];
//! let catalog = Catalog::build(&config, snapshot).unwrap();
//!
//! let persons = catalog.table("persons").unwrap();
//! let lastname = catalog.column("persons", "lastname").unwrap();
//! let condition = lastname
//!     .compare(ConditionKind::Equal, SqlValue::Text(String::from("Nils")))
//!     .unwrap();
//! let sql = delete_from(persons)
//!     .where_clause(condition)
//!     .build(catalog.dialect())
//!     .unwrap();
//! assert_eq!(
//!     sql,
//!     "DELETE FROM `t_persons` AS `persons` WHERE `persons`.`lastname` = 'Nils'"
//! );
//! ```

mod catalog;
pub mod config;
pub mod doc;
pub mod error;
pub mod metadata;
pub mod naming;

pub use catalog::{global, install, Catalog};
pub use config::{Acl, CatalogConfig};
pub use doc::{doc_type, DocType};
pub use error::{CatalogError, Result};
pub use metadata::{load_snapshot, ColumnMetadata, TableMetadata};
pub use naming::{Affix, NameRule, TableNameRule};
