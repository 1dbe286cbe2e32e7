//! Tables, columns and value domains.

mod column;
mod domain;
mod table;

pub use column::{type_code, AnyColumn, Column, ColumnDefinition, ColumnRef};
pub use domain::{
    Boolean, Date, Decimal, Domain, DomainKind, Integer, Numeric, Ordered, Temporal, Text, Time,
    Timestamp,
};
pub use table::{ColumnBuilder, Table, TableBuilder, TableRef};
