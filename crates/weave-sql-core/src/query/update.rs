//! UPDATE statements.

use super::clause::{self, Limit, OrderBy};
use super::{Query, StatementKind};
use crate::building::BuildingContext;
use crate::condition::Condition;
use crate::error::{Result, SqlError};
use crate::expr::{IntoNullableOperand, Operand};
use crate::schema::{AnyColumn, Column, ColumnRef, Domain, Table, TableRef};
use crate::value::SqlValue;

#[derive(Debug, Clone)]
struct Assignment {
    column: ColumnRef,
    /// `None` assigns NULL.
    value: Option<Operand>,
}

/// An UPDATE statement builder.
///
/// ```
/// use weave_sql_core::prelude::*;
///
/// let mut persons = Table::builder("persons");
/// let lastname = persons.varchar_column("lastname").build();
/// let age = persons.int_column("age").build();
/// let persons = persons.build();
///
/// let sql = update(&persons)
///     .set(&lastname, "Schumacher")
///     .set(&age, None::<i64>)
///     .where_clause(age.lt(0))
///     .build(Dialect::MySql)
///     .unwrap();
/// assert_eq!(
///     sql,
///     "UPDATE `persons` SET `lastname` = 'Schumacher', `age` = NULL WHERE `persons`.`age` < 0"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Update {
    table: TableRef,
    assignments: Vec<Assignment>,
    where_condition: Option<Condition>,
    order_by: Vec<OrderBy>,
    limit: Option<Limit>,
}

impl Update {
    /// Creates an UPDATE on `table`.
    #[must_use]
    pub fn new(table: &Table) -> Self {
        Self {
            table: table.reference().clone(),
            assignments: Vec::new(),
            where_condition: None,
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Adds `column = value`; `None` assigns NULL.
    #[must_use]
    pub fn set<D: Domain>(mut self, column: &Column<D>, value: impl IntoNullableOperand<D>) -> Self {
        self.assignments.push(Assignment {
            column: column.column_ref().clone(),
            value: value.into_nullable_operand(),
        });
        self
    }

    /// Adds `column = value` for a runtime value, checking it against the
    /// column's domain.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::TypeMismatch`] when `value` has another domain.
    pub fn set_value(mut self, column: &AnyColumn, value: SqlValue) -> Result<Self> {
        column.check_value(&value)?;
        self.assignments.push(Assignment {
            column: column.column_ref().clone(),
            value: (!value.is_null()).then_some(Operand::Value(value)),
        });
        Ok(self)
    }

    /// Sets or replaces the WHERE condition.
    #[must_use]
    pub fn where_clause(mut self, condition: Condition) -> Self {
        self.where_condition = Some(condition);
        self
    }

    /// Sets or replaces the WHERE condition with `NOT condition`.
    #[must_use]
    pub fn where_not(self, condition: Condition) -> Self {
        self.where_clause(condition.not())
    }

    /// ANDs `condition` onto the current WHERE condition.
    #[must_use]
    pub fn and_where(mut self, condition: Condition) -> Self {
        self.where_condition = Some(match self.where_condition.take() {
            Some(current) => current.and(condition),
            None => condition,
        });
        self
    }

    /// Adds an ORDER BY item.
    #[must_use]
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by.push(order);
        self
    }

    /// Caps the number of updated rows.
    #[must_use]
    pub const fn limit(mut self, count: u64) -> Self {
        self.limit = Some(Limit::new(count));
        self
    }

    /// Removes the WHERE condition.
    pub fn clear_wheres(&mut self) {
        self.where_condition = None;
    }

    /// Removes the row cap.
    pub fn clear_limit(&mut self) {
        self.limit = None;
    }

    /// Removes all ORDER BY items.
    pub fn clear_order_by(&mut self) {
        self.order_by.clear();
    }

    /// Returns the target table.
    #[must_use]
    pub const fn table(&self) -> &TableRef {
        &self.table
    }

    /// Returns the WHERE condition.
    #[must_use]
    pub const fn where_condition(&self) -> Option<&Condition> {
        self.where_condition.as_ref()
    }

    /// Returns the row cap.
    #[must_use]
    pub const fn limitation(&self) -> Option<&Limit> {
        self.limit.as_ref()
    }
}

impl Query for Update {
    fn kind(&self) -> StatementKind {
        StatementKind::Update
    }

    fn render(&self, ctx: &mut BuildingContext) -> Result<String> {
        if self.assignments.is_empty() {
            return Err(SqlError::malformed("UPDATE without assignments"));
        }
        let ind = ctx.indentation();
        let cap = clause::row_cap(self.limit.as_ref(), ctx, StatementKind::Update)?;
        ctx.declare_tables_for(StatementKind::Update);

        let mut sql = String::from("UPDATE");
        if let Some(top) = &cap.top {
            sql.push(' ');
            sql.push_str(top);
        }
        sql.push_str(&ind.body_separator());
        sql.push_str(&self.table.render_declaration(ctx));

        let mut items = Vec::with_capacity(self.assignments.len());
        for assignment in &self.assignments {
            let value = match &assignment.value {
                Some(operand) => operand.render(ctx)?,
                None => ctx.literal(&SqlValue::Null)?,
            };
            items.push(format!("{} = {value}", ctx.quote(assignment.column.name())));
        }
        sql.push_str(ind.delimiter());
        sql.push_str("SET");
        sql.push_str(&ind.body_separator());
        sql.push_str(&clause::join_list(&items, ind));

        if let Some(condition) = &self.where_condition {
            sql.push_str(ind.delimiter());
            sql.push_str(&clause::condition_clause("WHERE", condition, ctx, ind)?);
        }
        if !self.order_by.is_empty() {
            clause::check_order_by(ctx, StatementKind::Update)?;
            sql.push_str(ind.delimiter());
            sql.push_str(&clause::order_by_clause(&self.order_by, ctx, ind)?);
        }
        if let Some(trailing) = &cap.trailing {
            sql.push_str(ind.delimiter());
            sql.push_str(trailing);
        }
        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Expression;
    use crate::expr::Placeholder;
    use crate::schema::{Integer, Text};
    use crate::{BuildOptions, Dialect, Indentation, Parameter, ParameterStyle};

    fn persons() -> (Table, Column<Text>, Column<Integer>) {
        let mut builder = Table::builder("persons");
        let lastname = builder.varchar_column("lastname").build();
        let age = builder.int_column("age").build();
        (builder.build(), lastname, age)
    }

    #[test]
    fn test_no_assignments() {
        let (table, _, _) = persons();
        assert!(matches!(
            Update::new(&table).build(Dialect::MySql),
            Err(SqlError::MalformedStatement(_))
        ));
    }

    #[test]
    fn test_top_and_limit() {
        let (table, lastname, age) = persons();
        let update = Update::new(&table)
            .set(&age, 1)
            .where_clause(lastname.eq("x"))
            .limit(3);
        assert_eq!(
            update.build(Dialect::Sybase).unwrap(),
            "UPDATE TOP 3 `persons` SET `age` = 1 WHERE `persons`.`lastname` = 'x'"
        );
        assert_eq!(
            update.build(Dialect::MySql).unwrap(),
            "UPDATE `persons` SET `age` = 1 WHERE `persons`.`lastname` = 'x' LIMIT 3"
        );
        assert!(update.build(Dialect::Sqlite).is_err());
    }

    #[test]
    fn test_pretty() {
        let (table, lastname, age) = persons();
        let sql = Update::new(&table)
            .set(&lastname, "a")
            .set(&age, 2)
            .build_indented(Dialect::PostgreSql, Indentation::enabled())
            .unwrap();
        assert_eq!(
            sql,
            "UPDATE\n  \"persons\"\nSET\n  \"lastname\" = 'a',\n  \"age\" = 2"
        );
    }

    #[test]
    fn test_placeholder_and_bound_values() {
        let (table, lastname, age) = persons();
        let update = Update::new(&table)
            .set(&lastname, Placeholder::new("name"))
            .where_clause(age.eq(5));
        let built = update
            .prepare(
                Dialect::PostgreSql,
                &BuildOptions::new().bind_literals(true),
            )
            .unwrap();
        assert_eq!(
            built.sql,
            "UPDATE \"persons\" SET \"lastname\" = $1 WHERE \"persons\".\"age\" = $2"
        );
        assert_eq!(
            built.parameters,
            [
                Parameter::Placeholder(String::from("name")),
                Parameter::Value(SqlValue::Int(5)),
            ]
        );

        let named = update
            .prepare(
                Dialect::MySql,
                &BuildOptions::new().parameter_style(ParameterStyle::Named),
            )
            .unwrap();
        assert_eq!(
            named.sql,
            "UPDATE `persons` SET `lastname` = :name WHERE `persons`.`age` = 5"
        );
    }

    #[test]
    fn test_set_value_checks_domain() {
        let (table, _, _) = persons();
        let age = table.column("age").unwrap();
        let update = Update::new(&table)
            .set_value(age, SqlValue::Null)
            .unwrap();
        assert_eq!(
            update.build(Dialect::MySql).unwrap(),
            "UPDATE `persons` SET `age` = NULL"
        );
        assert!(Update::new(&table)
            .set_value(age, SqlValue::Text(String::from("x")))
            .is_err());
    }
}
