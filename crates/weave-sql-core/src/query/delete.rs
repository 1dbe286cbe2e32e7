//! DELETE statements.

use super::clause::{self, Limit, OrderBy};
use super::{Query, StatementKind};
use crate::building::BuildingContext;
use crate::condition::Condition;
use crate::error::Result;
use crate::schema::{Table, TableRef};

/// A DELETE statement builder.
///
/// Without a WHERE clause every row of the table is deleted.
#[derive(Debug, Clone)]
pub struct Delete {
    table: TableRef,
    where_condition: Option<Condition>,
    order_by: Vec<OrderBy>,
    limit: Option<Limit>,
}

impl Delete {
    /// Creates a DELETE on `table`.
    #[must_use]
    pub fn new(table: &Table) -> Self {
        Self {
            table: table.reference().clone(),
            where_condition: None,
            order_by: Vec::new(),
            limit: None,
        }
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

    /// Caps the number of deleted rows.
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

impl Query for Delete {
    fn kind(&self) -> StatementKind {
        StatementKind::Delete
    }

    fn render(&self, ctx: &mut BuildingContext) -> Result<String> {
        let ind = ctx.indentation();
        let cap = clause::row_cap(self.limit.as_ref(), ctx, StatementKind::Delete)?;
        ctx.declare_tables_for(StatementKind::Delete);

        let mut sql = String::from("DELETE");
        if let Some(top) = &cap.top {
            sql.push(' ');
            sql.push_str(top);
        }
        sql.push_str(" FROM");
        sql.push_str(&ind.body_separator());
        sql.push_str(&self.table.render_declaration(ctx));

        if let Some(condition) = &self.where_condition {
            sql.push_str(ind.delimiter());
            sql.push_str(&clause::condition_clause("WHERE", condition, ctx, ind)?);
        }
        if !self.order_by.is_empty() {
            clause::check_order_by(ctx, StatementKind::Delete)?;
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
    use crate::condition::{Expression, OrderedExpression};
    use crate::error::SqlError;
    use crate::{Dialect, Indentation};

    fn persons() -> (Table, crate::schema::Column<crate::schema::Integer>) {
        let mut builder = Table::builder("persons");
        let age = builder.int_column("age").build();
        (builder.build(), age)
    }

    #[test]
    fn test_delete_all() {
        let (table, _) = persons();
        let sql = Delete::new(&table).build(Dialect::MySql).unwrap();
        assert_eq!(sql, "DELETE FROM `persons`");
    }

    #[test]
    fn test_and_where_without_root() {
        let (table, age) = persons();
        let sql = Delete::new(&table)
            .and_where(age.gt(3))
            .and_where(age.lt(9))
            .build(Dialect::Sqlite)
            .unwrap();
        assert_eq!(
            sql,
            "DELETE FROM \"persons\" WHERE (\"persons\".\"age\" > 3 AND \"persons\".\"age\" < 9)"
        );
    }

    #[test]
    fn test_order_by_mysql_only() {
        let (table, age) = persons();
        let delete = Delete::new(&table).order_by(age.desc()).limit(1);
        assert_eq!(
            delete.build(Dialect::MySql).unwrap(),
            "DELETE FROM `persons` ORDER BY `persons`.`age` DESC LIMIT 1"
        );
        assert!(matches!(
            delete.build(Dialect::Sybase),
            Err(SqlError::UnsupportedFeature { dialect: Dialect::Sybase, .. })
        ));
    }

    #[test]
    fn test_limit_unsupported_on_postgres() {
        let (table, age) = persons();
        let delete = Delete::new(&table).where_clause(age.eq(3)).limit(5);
        let err = delete.build(Dialect::PostgreSql).unwrap_err();
        assert_eq!(
            err.to_string(),
            "PostgreSQL does not support row limit on DELETE"
        );
    }

    #[test]
    fn test_sql_server_top() {
        let (table, age) = persons();
        let sql = Delete::new(&table)
            .where_clause(age.eq(3))
            .limit(5)
            .build(Dialect::SqlServer)
            .unwrap();
        assert_eq!(sql, "DELETE TOP (5) FROM [persons] WHERE [persons].[age] = 3");
    }

    #[test]
    fn test_pretty_leaf_where() {
        let (table, age) = persons();
        let sql = Delete::new(&table)
            .where_clause(age.eq(3))
            .build_indented(Dialect::MySql, Indentation::enabled())
            .unwrap();
        assert_eq!(sql, "DELETE FROM\n  `persons`\nWHERE `persons`.`age` = 3");
    }

    #[test]
    fn test_accessors_and_clear() {
        let (table, age) = persons();
        let mut delete = Delete::new(&table)
            .where_clause(age.eq(3))
            .order_by(age.asc())
            .limit(2);
        assert!(delete.where_condition().is_some());
        assert_eq!(delete.limitation().map(Limit::count), Some(2));
        delete.clear_wheres();
        delete.clear_limit();
        delete.clear_order_by();
        assert!(delete.where_condition().is_none());
        assert_eq!(delete.build(Dialect::PostgreSql).unwrap(), "DELETE FROM \"persons\"");
        assert_eq!(delete.table().name(), "persons");
    }
}
