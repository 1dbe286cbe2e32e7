//! INSERT statements.

use super::{Query, StatementKind};
use crate::building::BuildingContext;
use crate::error::{Result, SqlError};
use crate::expr::{IntoNullableOperand, Operand};
use crate::schema::{AnyColumn, Column, ColumnRef, Domain, Table, TableRef};
use crate::value::SqlValue;

/// An INSERT statement builder for a single row.
#[derive(Debug, Clone)]
pub struct Insert {
    table: TableRef,
    columns: Vec<ColumnRef>,
    /// `None` inserts NULL.
    values: Vec<Option<Operand>>,
}

impl Insert {
    /// Creates an INSERT into `table`.
    #[must_use]
    pub fn new(table: &Table) -> Self {
        Self {
            table: table.reference().clone(),
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Adds a column with its value; `None` inserts NULL.
    #[must_use]
    pub fn value<D: Domain>(
        mut self,
        column: &Column<D>,
        value: impl IntoNullableOperand<D>,
    ) -> Self {
        self.columns.push(column.column_ref().clone());
        self.values.push(value.into_nullable_operand());
        self
    }

    /// Adds a column with a runtime value, checking it against the column's
    /// domain.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::TypeMismatch`] when `value` has another domain.
    pub fn set_value(mut self, column: &AnyColumn, value: SqlValue) -> Result<Self> {
        column.check_value(&value)?;
        self.columns.push(column.column_ref().clone());
        self.values
            .push((!value.is_null()).then_some(Operand::Value(value)));
        Ok(self)
    }

    /// Returns the target table.
    #[must_use]
    pub const fn table(&self) -> &TableRef {
        &self.table
    }

    /// Returns the number of inserted columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

impl Query for Insert {
    fn kind(&self) -> StatementKind {
        StatementKind::Insert
    }

    fn render(&self, ctx: &mut BuildingContext) -> Result<String> {
        if self.columns.is_empty() {
            return Err(SqlError::malformed("INSERT without columns"));
        }
        let ind = ctx.indentation();
        let names: Vec<String> = self
            .columns
            .iter()
            .map(|column| ctx.quote(column.name()))
            .collect();
        let mut values = Vec::with_capacity(self.values.len());
        for value in &self.values {
            values.push(match value {
                Some(operand) => operand.render(ctx)?,
                None => ctx.literal(&SqlValue::Null)?,
            });
        }

        let mut sql = String::from("INSERT INTO");
        sql.push_str(&ind.body_separator());
        sql.push_str(&ctx.quote(self.table.name()));
        sql.push_str(" (");
        sql.push_str(&names.join(", "));
        sql.push(')');
        sql.push_str(ind.delimiter());
        sql.push_str("VALUES");
        sql.push_str(&ind.body_separator());
        sql.push('(');
        sql.push_str(&values.join(", "));
        sql.push(')');
        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::expr::Placeholder;
    use crate::schema::{Date, Integer, Text};
    use crate::{BuildOptions, Dialect, Indentation};

    fn persons() -> (Table, Column<Text>, Column<Integer>, Column<Date>) {
        let mut builder = Table::builder("persons");
        let lastname = builder.varchar_column("lastname").build();
        let age = builder.int_column("age").build();
        let born = builder.date_column("born").build();
        (builder.build(), lastname, age, born)
    }

    #[test]
    fn test_insert() {
        let (table, lastname, age, born) = persons();
        let insert = Insert::new(&table)
            .value(&lastname, "O'Neil")
            .value(&age, None::<i64>)
            .value(&born, NaiveDate::from_ymd_opt(1990, 5, 1).unwrap());
        assert_eq!(
            insert.build(Dialect::MySql).unwrap(),
            "INSERT INTO `persons` (`lastname`, `age`, `born`) VALUES ('O''Neil', NULL, '1990-05-01')"
        );
        assert_eq!(
            insert.build(Dialect::PostgreSql).unwrap(),
            "INSERT INTO \"persons\" (\"lastname\", \"age\", \"born\") \
             VALUES ('O''Neil', NULL, DATE '1990-05-01')"
        );
        assert_eq!(insert.column_count(), 3);
    }

    #[test]
    fn test_empty_insert() {
        let (table, _, _, _) = persons();
        assert!(matches!(
            Insert::new(&table).build(Dialect::MySql),
            Err(SqlError::MalformedStatement(_))
        ));
    }

    #[test]
    fn test_pretty_and_placeholders() {
        let (table, lastname, age, _) = persons();
        let insert = Insert::new(&table)
            .value(&lastname, Placeholder::new("name"))
            .value(&age, Placeholder::new("age"));
        assert_eq!(
            insert
                .build_indented(Dialect::Sqlite, Indentation::enabled())
                .unwrap(),
            "INSERT INTO\n  \"persons\" (\"lastname\", \"age\")\nVALUES\n  (?, ?)"
        );
        let built = insert
            .prepare(Dialect::PostgreSql, &BuildOptions::new())
            .unwrap();
        assert_eq!(built.sql, "INSERT INTO \"persons\" (\"lastname\", \"age\") VALUES ($1, $2)");
        assert_eq!(built.placeholder_names().collect::<Vec<_>>(), ["name", "age"]);
    }

    #[test]
    fn test_set_value() {
        let (table, _, _, _) = persons();
        let lastname = table.column("lastname").unwrap();
        let insert = Insert::new(&table)
            .set_value(lastname, SqlValue::Text(String::from("Nils")))
            .unwrap();
        assert_eq!(
            insert.build(Dialect::Sybase).unwrap(),
            "INSERT INTO `persons` (`lastname`) VALUES ('Nils')"
        );
        assert!(Insert::new(&table)
            .set_value(lastname, SqlValue::Int(1))
            .is_err());
    }
}
