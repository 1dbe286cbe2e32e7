//! # weave-sql-core
//!
//! A dialect-aware SQL statement builder.
//!
//! Tables and typed columns describe the schema, conditions are built from
//! column methods and AND/OR/NOT combinators, and statements render to the SQL
//! of the requested [`Dialect`], compact or pretty-printed.
//!
//! ```rust
//! use weave_sql_core::prelude::*;
//!
//! let mut persons = Table::builder("persons");
//! let lastname = persons.varchar_column("lastname").build();
//! let age = persons.int_column("age").build();
//! let persons = persons.build();
//!
//! let delete = delete_from(&persons)
//!     .where_clause(
//!         lastname
//!             .is_not_like("Nils", LikeType::After)
//!             .and(Function::min(&age).gt_eq(50))
//!             .and(lastname.eq("Schumacher").or(lastname.eq("Kuenzel"))),
//!     )
//!     .limit(10);
//!
//! assert_eq!(
//!     delete.build(Dialect::MySql).unwrap(),
//!     "DELETE FROM `persons` WHERE (`persons`.`lastname` NOT LIKE 'Nils%' \
//!      AND MIN(`persons`.`age`) >= 50 AND (`persons`.`lastname` = 'Schumacher' \
//!      OR `persons`.`lastname` = 'Kuenzel')) LIMIT 10"
//! );
//! assert!(delete
//!     .build(Dialect::Sybase)
//!     .unwrap()
//!     .starts_with("DELETE TOP 10 FROM `persons` WHERE"));
//! ```
//!
//! ## Parameters
//!
//! Values are inlined as escaped literals by default. [`Placeholder`]s render
//! as parameter markers, and [`BuildOptions::bind_literals`] turns every
//! literal into a marker, so the SQL text never contains caller data:
//!
//! ```rust
//! use weave_sql_core::prelude::*;
//!
//! let mut users = Table::builder("users");
//! let name = users.varchar_column("name").build();
//! let users = users.build();
//!
//! let user_input = "'; DROP TABLE users; --";
//! let built = Select::all_from(&users)
//!     .where_clause(name.eq(user_input))
//!     .prepare(Dialect::PostgreSql, &BuildOptions::new().bind_literals(true))
//!     .unwrap();
//!
//! assert_eq!(built.sql, "SELECT * FROM \"users\" WHERE \"users\".\"name\" = $1");
//! assert_eq!(
//!     built.parameters,
//!     [Parameter::Value(SqlValue::Text(user_input.to_owned()))]
//! );
//! ```

pub mod building;
pub mod condition;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod function;
pub mod query;
pub mod schema;
pub mod value;

pub use building::{
    BuildOptions, BuildingContext, BuiltStatement, Indentation, Parameter, ParameterStyle,
};
pub use condition::{Condition, ConditionKind, LikeType};
pub use dialect::{Dialect, LimitPlacement};
pub use error::{Result, SqlError};
pub use expr::{Operand, Placeholder, ScalarExpr};
pub use function::{Function, SqlFunction};
pub use query::{Delete, Insert, Query, Select, StatementKind, Update};
pub use value::{SqlValue, ToSqlValue};

/// Everything needed to describe tables and build statements.
pub mod prelude {
    pub use crate::building::{BuildOptions, BuiltStatement, Indentation, Parameter, ParameterStyle};
    pub use crate::condition::{
        Condition, Expression, LikeType, OrderedExpression, TemporalExpression, TextExpression,
    };
    pub use crate::dialect::Dialect;
    pub use crate::error::SqlError;
    pub use crate::expr::Placeholder;
    pub use crate::function::Function;
    pub use crate::query::{
        delete_from, insert_into, select, update, Delete, Insert, OrderBy, Query, Select, Update,
    };
    pub use crate::schema::{AnyColumn, Column, Table};
    pub use crate::value::SqlValue;
}
