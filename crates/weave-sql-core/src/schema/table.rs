//! Tables and the builder that creates their columns.

use std::marker::PhantomData;
use std::sync::Arc;

use super::column::{type_code, AnyColumn, Column, ColumnDefinition};
use super::domain::{Boolean, Date, Decimal, Domain, Integer, Text, Time, Timestamp};
use crate::building::BuildingContext;

#[derive(Debug)]
struct TableIdent {
    name: String,
    alias: Option<String>,
}

/// The identity of a table: its physical name and optional alias.
///
/// Every column holds one of these as a back-reference to its table.
#[derive(Debug, Clone)]
pub struct TableRef(Arc<TableIdent>);

impl TableRef {
    fn new(name: String, alias: Option<String>) -> Self {
        let alias = alias.filter(|a| *a != name);
        Self(Arc::new(TableIdent { name, alias }))
    }

    /// Returns the physical table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Returns the logical name, which defaults to the physical name.
    #[must_use]
    pub fn alias(&self) -> &str {
        self.0.alias.as_deref().unwrap_or(&self.0.name)
    }

    /// Returns whether the table is renamed.
    #[must_use]
    pub fn has_alias(&self) -> bool {
        self.0.alias.is_some()
    }

    /// Name used to qualify column references: the alias, or the physical
    /// name when the build renders tables unaliased.
    pub(crate) fn qualifier(&self, ctx: &BuildingContext) -> &str {
        if ctx.tables_unaliased() {
            self.name()
        } else {
            self.alias()
        }
    }

    /// Returns whether both handles point at the same table.
    #[must_use]
    pub fn same_table(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Renders the table as it appears in FROM: `<name> [AS <alias>]`.
    pub(crate) fn render_declaration(&self, ctx: &BuildingContext) -> String {
        match &self.0.alias {
            Some(alias) if !ctx.tables_unaliased() => {
                format!("{} AS {}", ctx.quote(&self.0.name), ctx.quote(alias))
            }
            _ => ctx.quote(&self.0.name),
        }
    }
}

#[derive(Debug)]
struct TableData {
    ident: TableRef,
    remark: Option<String>,
    columns: Vec<AnyColumn>,
}

/// A table with its ordered columns.
///
/// Tables are immutable once built and cheap to clone.
#[derive(Debug, Clone)]
pub struct Table(Arc<TableData>);

impl Table {
    /// Starts a table whose alias is its name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> TableBuilder {
        TableBuilder::new(name.into(), None)
    }

    /// Starts a table with a logical name different from its physical one.
    #[must_use]
    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> TableBuilder {
        TableBuilder::new(name.into(), Some(alias.into()))
    }

    /// Returns the physical table name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.ident.name()
    }

    /// Returns the logical name.
    #[must_use]
    pub fn alias(&self) -> &str {
        self.0.ident.alias()
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn remark(&self) -> Option<&str> {
        self.0.remark.as_deref()
    }

    /// Returns the table identity shared with its columns.
    #[must_use]
    pub fn reference(&self) -> &TableRef {
        &self.0.ident
    }

    /// Returns the columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[AnyColumn] {
        &self.0.columns
    }

    /// Finds a column by its logical name.
    #[must_use]
    pub fn column(&self, alias: &str) -> Option<&AnyColumn> {
        self.0.columns.iter().find(|c| c.alias() == alias)
    }

    /// Finds a column by its physical name.
    #[must_use]
    pub fn column_by_name(&self, name: &str) -> Option<&AnyColumn> {
        self.0.columns.iter().find(|c| c.name() == name)
    }
}

/// Collects the columns of a table.
///
/// ```
/// use weave_sql_core::schema::Table;
///
/// let mut persons = Table::builder("persons");
/// let lastname = persons.varchar_column("lastname").build();
/// let age = persons.int_column("age").build();
/// let persons = persons.build();
///
/// assert_eq!(persons.columns().len(), 2);
/// assert_eq!(lastname.table().name(), "persons");
/// # let _ = age;
/// ```
#[derive(Debug)]
pub struct TableBuilder {
    ident: TableRef,
    remark: Option<String>,
    columns: Vec<AnyColumn>,
}

macro_rules! typed_columns {
    ($($(#[$doc:meta])* $method:ident => $domain:ident, $tag:literal, $code:expr;)+) => {
        $(
            $(#[$doc])*
            pub fn $method(&mut self, name: impl Into<String>) -> ColumnBuilder<'_, $domain> {
                self.column::<$domain>(name)
                    .definition(ColumnDefinition::new($tag, $code))
            }
        )+
    };
}

impl TableBuilder {
    fn new(name: String, alias: Option<String>) -> Self {
        Self {
            ident: TableRef::new(name, alias),
            remark: None,
            columns: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn remark(&mut self, remark: impl Into<String>) -> &mut Self {
        self.remark = Some(remark.into());
        self
    }

    /// Starts a column of the domain `D` with the domain's default type tag.
    pub fn column<D: Domain>(&mut self, name: impl Into<String>) -> ColumnBuilder<'_, D> {
        ColumnBuilder {
            table: self,
            name: name.into(),
            alias: None,
            definition: D::default_definition(),
            remark: None,
            _domain: PhantomData,
        }
    }

    typed_columns! {
        /// Starts a `TINYINT` column.
        tiny_int_column => Integer, "TINYINT", type_code::TINYINT;
        /// Starts a `SMALLINT` column.
        small_int_column => Integer, "SMALLINT", type_code::SMALLINT;
        /// Starts a `MEDIUMINT` column.
        medium_int_column => Integer, "MEDIUMINT", type_code::INTEGER;
        /// Starts an `INT` column.
        int_column => Integer, "INT", type_code::INTEGER;
        /// Starts a `BIGINT` column.
        big_int_column => Integer, "BIGINT", type_code::BIGINT;
        /// Starts a `FLOAT` column.
        float_column => Decimal, "FLOAT", type_code::FLOAT;
        /// Starts a `REAL` column.
        real_column => Decimal, "REAL", type_code::REAL;
        /// Starts a `DOUBLE` column.
        double_column => Decimal, "DOUBLE", type_code::DOUBLE;
        /// Starts a `NUMERIC` column.
        numeric_column => Decimal, "NUMERIC", type_code::NUMERIC;
        /// Starts a `DECIMAL` column.
        decimal_column => Decimal, "DECIMAL", type_code::DECIMAL;
        /// Starts a `CHAR` column.
        char_column => Text, "CHAR", type_code::CHAR;
        /// Starts a `VARCHAR` column.
        varchar_column => Text, "VARCHAR", type_code::VARCHAR;
        /// Starts a `TEXT` column.
        text_column => Text, "TEXT", type_code::LONGVARCHAR;
        /// Starts a `DATE` column.
        date_column => Date, "DATE", type_code::DATE;
        /// Starts a `TIME` column.
        time_column => Time, "TIME", type_code::TIME;
        /// Starts a `TIMESTAMP` column.
        timestamp_column => Timestamp, "TIMESTAMP", type_code::TIMESTAMP;
        /// Starts a `DATETIME` column.
        datetime_column => Timestamp, "DATETIME", type_code::TIMESTAMP;
        /// Starts a `BOOLEAN` column.
        boolean_column => Boolean, "BOOLEAN", type_code::BOOLEAN;
        /// Starts a `BIT` column.
        bit_column => Boolean, "BIT", type_code::BIT;
    }

    /// Returns the columns added so far.
    #[must_use]
    pub fn columns(&self) -> &[AnyColumn] {
        &self.columns
    }

    /// Finishes the table.
    #[must_use]
    pub fn build(self) -> Table {
        Table(Arc::new(TableData {
            ident: self.ident,
            remark: self.remark,
            columns: self.columns,
        }))
    }
}

/// Configures one column before adding it to its table.
#[derive(Debug)]
#[must_use = "a column is only added to its table by `build` or `add`"]
pub struct ColumnBuilder<'a, D> {
    table: &'a mut TableBuilder,
    name: String,
    alias: Option<String>,
    definition: ColumnDefinition,
    remark: Option<String>,
    _domain: PhantomData<fn() -> D>,
}

impl<'a, D: Domain> ColumnBuilder<'a, D> {
    /// Sets the logical name.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Overrides the SQL type.
    pub fn definition(mut self, definition: ColumnDefinition) -> Self {
        self.definition = definition;
        self
    }

    /// Sets the description.
    pub fn remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Adds the column to the table and returns its typed handle.
    #[must_use = "use `add` when the handle is not needed"]
    pub fn build(self) -> Column<D> {
        let (table, column) = self.finish();
        table.columns.push(D::wrap(column.clone()));
        column
    }

    /// Adds the column to the table. The column stays reachable through
    /// [`Table::column`].
    pub fn add(self) {
        let (table, column) = self.finish();
        table.columns.push(D::wrap(column));
    }

    fn finish(self) -> (&'a mut TableBuilder, Column<D>) {
        let column = Column::new(
            self.table.ident.clone(),
            self.name,
            self.alias,
            self.definition,
            self.remark,
        );
        (self.table, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DomainKind;
    use crate::{BuildOptions, Dialect};

    #[test]
    fn test_build_table() {
        let mut builder = Table::builder("persons");
        builder.remark("people we know");
        let lastname = builder.varchar_column("lastname").alias("name").build();
        builder.date_column("born").add();
        builder.boolean_column("active").add();
        let table = builder.build();

        assert_eq!(table.name(), "persons");
        assert_eq!(table.alias(), "persons");
        assert_eq!(table.remark(), Some("people we know"));
        assert_eq!(
            table.columns().iter().map(AnyColumn::kind).collect::<Vec<_>>(),
            [DomainKind::Text, DomainKind::Date, DomainKind::Boolean]
        );
        assert_eq!(table.column("name").unwrap().name(), "lastname");
        assert!(table.column("lastname").is_none());
        assert!(lastname.table().same_table(table.reference()));
    }

    #[test]
    fn test_alias_equal_to_name_is_dropped() {
        let table = Table::aliased("persons", "persons").build();
        assert!(!table.reference().has_alias());
        let table = Table::aliased("t_persons", "persons").build();
        assert_eq!(table.alias(), "persons");
        assert!(table.reference().has_alias());
    }

    #[test]
    fn test_render_declaration() {
        let ctx = BuildingContext::new(Dialect::PostgreSql, BuildOptions::new());
        let plain = Table::builder("persons").build();
        assert_eq!(plain.reference().render_declaration(&ctx), "\"persons\"");
        let renamed = Table::aliased("t_persons", "p").build();
        assert_eq!(
            renamed.reference().render_declaration(&ctx),
            "\"t_persons\" AS \"p\""
        );

        let mut dml = BuildingContext::new(Dialect::SqlServer, BuildOptions::new());
        dml.declare_tables_for(crate::query::StatementKind::Delete);
        assert_eq!(renamed.reference().render_declaration(&dml), "[t_persons]");
        assert_eq!(renamed.reference().qualifier(&dml), "t_persons");
        assert_eq!(renamed.reference().qualifier(&ctx), "p");
    }

    #[test]
    fn test_explicit_definition() {
        let mut builder = Table::builder("items");
        let price = builder
            .column::<Decimal>("price")
            .definition(ColumnDefinition::new("MONEY", type_code::DECIMAL))
            .build();
        assert_eq!(price.definition().type_name(), "MONEY");
        assert_eq!(builder.columns().len(), 1);
    }
}
