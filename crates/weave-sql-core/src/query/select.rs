//! SELECT statements.

use super::clause::{self, Limit, OrderBy};
use super::{Query, StatementKind};
use crate::building::BuildingContext;
use crate::condition::{Condition, Expression};
use crate::error::{Result, SqlError};
use crate::expr::ScalarExpr;
use crate::function::Function;
use crate::schema::{AnyColumn, Column, Domain, Table, TableRef};

/// One item of the select list.
#[derive(Debug, Clone)]
pub struct Projection {
    expr: ScalarExpr,
    alias: Option<String>,
}

impl Projection {
    /// Projects `expr` under `alias`.
    #[must_use]
    pub fn aliased(expr: ScalarExpr, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: Some(alias.into()),
        }
    }

    /// Returns the output alias, if any.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    fn render(&self, ctx: &mut BuildingContext) -> Result<String> {
        let expr = self.expr.render(ctx)?;
        Ok(match &self.alias {
            Some(alias) => format!("{expr} AS {}", ctx.quote(alias)),
            None => expr,
        })
    }
}

/// Anything that can appear in a select list.
pub trait Projectable {
    /// Returns the select-list item.
    fn projection(&self) -> Projection;
}

impl<D: Domain> Projectable for Column<D> {
    fn projection(&self) -> Projection {
        Projection {
            expr: self.to_expr(),
            alias: self.has_alias().then(|| self.alias().to_owned()),
        }
    }
}

impl Projectable for AnyColumn {
    fn projection(&self) -> Projection {
        let column = self.column_ref();
        Projection {
            expr: ScalarExpr::Column(column.clone()),
            alias: column
                .explicit_alias()
                .filter(|alias| *alias != column.name())
                .map(str::to_owned),
        }
    }
}

impl<D: Domain> Projectable for Function<D> {
    fn projection(&self) -> Projection {
        Projection {
            expr: self.to_expr(),
            alias: None,
        }
    }
}

impl Projectable for Projection {
    fn projection(&self) -> Projection {
        self.clone()
    }
}

/// The kind of a join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    /// `INNER JOIN`.
    Inner,
    /// `LEFT JOIN`.
    Left,
}

impl JoinKind {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
        }
    }
}

/// A joined table with its ON condition.
#[derive(Debug, Clone)]
pub struct Join {
    kind: JoinKind,
    table: TableRef,
    on: Condition,
}

impl Join {
    /// Returns the join kind.
    #[must_use]
    pub const fn kind(&self) -> JoinKind {
        self.kind
    }

    /// Returns the joined table.
    #[must_use]
    pub const fn table(&self) -> &TableRef {
        &self.table
    }
}

/// A SELECT statement builder.
///
/// ```
/// use weave_sql_core::prelude::*;
///
/// let mut persons = Table::builder("persons");
/// let lastname = persons.varchar_column("lastname").build();
/// let age = persons.int_column("age").build();
/// let persons = persons.build();
///
/// let sql = select(&[&lastname])
///     .from(&persons)
///     .where_clause(age.gt(30))
///     .order_by(lastname.asc())
///     .limit(5)
///     .build(Dialect::PostgreSql)
///     .unwrap();
/// assert_eq!(
///     sql,
///     "SELECT \"persons\".\"lastname\" FROM \"persons\" \
///      WHERE \"persons\".\"age\" > 30 ORDER BY \"persons\".\"lastname\" ASC LIMIT 5"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Select {
    distinct: bool,
    projections: Vec<Projection>,
    from: Vec<TableRef>,
    joins: Vec<Join>,
    where_condition: Option<Condition>,
    group_by: Vec<ScalarExpr>,
    having: Option<Condition>,
    order_by: Vec<OrderBy>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Select {
    /// Creates a SELECT of `projections`. An empty list selects `*`.
    #[must_use]
    pub fn new(projections: &[&dyn Projectable]) -> Self {
        Self {
            distinct: false,
            projections: projections.iter().map(|p| p.projection()).collect(),
            from: Vec::new(),
            joins: Vec::new(),
            where_condition: None,
            group_by: Vec::new(),
            having: None,
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Selects every column of `table`: `SELECT * FROM table`.
    #[must_use]
    pub fn all_from(table: &Table) -> Self {
        Self::new(&[]).from(table)
    }

    /// Adds a select-list item.
    #[must_use]
    pub fn column(mut self, projection: &dyn Projectable) -> Self {
        self.projections.push(projection.projection());
        self
    }

    /// Adds a select-list item under `alias`.
    #[must_use]
    pub fn column_as(mut self, projection: &dyn Projectable, alias: impl Into<String>) -> Self {
        self.projections
            .push(Projection::aliased(projection.projection().expr, alias));
        self
    }

    /// Adds `DISTINCT`.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Adds a table to the FROM list.
    #[must_use]
    pub fn from(mut self, table: &Table) -> Self {
        self.from.push(table.reference().clone());
        self
    }

    /// Adds an `INNER JOIN table ON condition`.
    #[must_use]
    pub fn inner_join(self, table: &Table, on: Condition) -> Self {
        self.join(JoinKind::Inner, table, on)
    }

    /// Adds a `LEFT JOIN table ON condition`.
    #[must_use]
    pub fn left_join(self, table: &Table, on: Condition) -> Self {
        self.join(JoinKind::Left, table, on)
    }

    fn join(mut self, kind: JoinKind, table: &Table, on: Condition) -> Self {
        self.joins.push(Join {
            kind,
            table: table.reference().clone(),
            on,
        });
        self
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

    /// Adds a GROUP BY expression.
    #[must_use]
    pub fn group_by<D: Domain>(mut self, expr: &impl Expression<D>) -> Self {
        self.group_by.push(expr.to_expr());
        self
    }

    /// Sets or replaces the HAVING condition.
    #[must_use]
    pub fn having(mut self, condition: Condition) -> Self {
        self.having = Some(condition);
        self
    }

    /// Adds an ORDER BY item.
    #[must_use]
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by.push(order);
        self
    }

    /// Caps the number of returned rows.
    #[must_use]
    pub const fn limit(mut self, count: u64) -> Self {
        self.limit = Some(count);
        self
    }

    /// Skips `count` rows. Requires a limit.
    #[must_use]
    pub const fn offset(mut self, count: u64) -> Self {
        self.offset = Some(count);
        self
    }

    /// Removes the WHERE condition.
    pub fn clear_wheres(&mut self) {
        self.where_condition = None;
    }

    /// Removes the row cap and the offset.
    pub fn clear_limit(&mut self) {
        self.limit = None;
        self.offset = None;
    }

    /// Removes all ORDER BY items.
    pub fn clear_order_by(&mut self) {
        self.order_by.clear();
    }

    /// Returns the WHERE condition.
    #[must_use]
    pub const fn where_condition(&self) -> Option<&Condition> {
        self.where_condition.as_ref()
    }

    /// Returns the row cap with its offset.
    #[must_use]
    pub fn limitation(&self) -> Option<Limit> {
        self.limit.map(|count| {
            let limit = Limit::new(count);
            match self.offset {
                Some(offset) => limit.with_offset(offset),
                None => limit,
            }
        })
    }

    /// Returns the select-list items.
    #[must_use]
    pub fn projections(&self) -> &[Projection] {
        &self.projections
    }
}

impl Query for Select {
    fn kind(&self) -> StatementKind {
        StatementKind::Select
    }

    fn render(&self, ctx: &mut BuildingContext) -> Result<String> {
        if self.from.is_empty() {
            return Err(SqlError::malformed("SELECT without FROM"));
        }
        if self.offset.is_some() && self.limit.is_none() {
            return Err(SqlError::malformed("OFFSET without LIMIT"));
        }
        let ind = ctx.indentation();
        let limitation = self.limitation();
        let cap = clause::row_cap(limitation.as_ref(), ctx, StatementKind::Select)?;

        let mut sql = String::from("SELECT");
        if self.distinct {
            sql.push_str(" DISTINCT");
        }
        if let Some(top) = &cap.top {
            sql.push(' ');
            sql.push_str(top);
        }
        let mut items = Vec::with_capacity(self.projections.len());
        for projection in &self.projections {
            items.push(projection.render(ctx)?);
        }
        if items.is_empty() {
            items.push(String::from("*"));
        }
        sql.push_str(&ind.body_separator());
        sql.push_str(&clause::join_list(&items, ind));

        let tables: Vec<String> = self
            .from
            .iter()
            .map(|table| table.render_declaration(ctx))
            .collect();
        sql.push_str(ind.delimiter());
        sql.push_str("FROM");
        sql.push_str(&ind.body_separator());
        sql.push_str(&clause::join_list(&tables, ind));

        for join in &self.joins {
            sql.push_str(ind.delimiter());
            sql.push_str(join.kind.keyword());
            sql.push_str(&ind.body_separator());
            sql.push_str(&join.table.render_declaration(ctx));
            sql.push_str(ind.delimiter());
            sql.push_str(&clause::condition_clause("ON", &join.on, ctx, ind)?);
        }

        if let Some(condition) = &self.where_condition {
            sql.push_str(ind.delimiter());
            sql.push_str(&clause::condition_clause("WHERE", condition, ctx, ind)?);
        }
        if !self.group_by.is_empty() {
            let mut exprs = Vec::with_capacity(self.group_by.len());
            for expr in &self.group_by {
                exprs.push(expr.render(ctx)?);
            }
            sql.push_str(ind.delimiter());
            sql.push_str("GROUP BY");
            sql.push_str(&ind.body_separator());
            sql.push_str(&clause::join_list(&exprs, ind));
        }
        if let Some(condition) = &self.having {
            sql.push_str(ind.delimiter());
            sql.push_str(&clause::condition_clause("HAVING", condition, ctx, ind)?);
        }
        if !self.order_by.is_empty() {
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
    use crate::condition::{OrderedExpression, TextExpression};
    use crate::query::select;
    use crate::schema::{Integer, Text};
    use crate::{Dialect, Indentation, LikeType};

    struct Fixture {
        persons: Table,
        id: Column<Integer>,
        lastname: Column<Text>,
        age: Column<Integer>,
        orders: Table,
        person_id: Column<Integer>,
    }

    fn fixture() -> Fixture {
        let mut persons = Table::builder("persons");
        let id = persons.int_column("id").build();
        let lastname = persons.varchar_column("lastname").build();
        let age = persons.int_column("age").build();
        let mut orders = Table::aliased("t_orders", "orders");
        let person_id = orders.int_column("person_id").build();
        Fixture {
            persons: persons.build(),
            id,
            lastname,
            age,
            orders: orders.build(),
            person_id,
        }
    }

    #[test]
    fn test_select_star() {
        let f = fixture();
        let sql = Select::all_from(&f.persons).build(Dialect::MySql).unwrap();
        assert_eq!(sql, "SELECT * FROM `persons`");
    }

    #[test]
    fn test_missing_from() {
        let f = fixture();
        let err = select(&[&f.lastname]).build(Dialect::MySql).unwrap_err();
        assert_eq!(err, SqlError::MalformedStatement(String::from("SELECT without FROM")));
    }

    #[test]
    fn test_distinct_top() {
        let f = fixture();
        let query = select(&[&f.lastname, &f.age])
            .distinct()
            .from(&f.persons)
            .limit(10);
        assert_eq!(
            query.build(Dialect::Sybase).unwrap(),
            "SELECT DISTINCT TOP 10 `persons`.`lastname`, `persons`.`age` FROM `persons`"
        );
        assert_eq!(
            query.build(Dialect::MySql).unwrap(),
            "SELECT DISTINCT `persons`.`lastname`, `persons`.`age` FROM `persons` LIMIT 10"
        );
    }

    #[test]
    fn test_offset() {
        let f = fixture();
        let query = Select::all_from(&f.persons).limit(10).offset(20);
        assert_eq!(
            query.build(Dialect::PostgreSql).unwrap(),
            "SELECT * FROM \"persons\" LIMIT 10 OFFSET 20"
        );
        assert!(matches!(
            query.build(Dialect::SqlServer),
            Err(SqlError::UnsupportedFeature { .. })
        ));
        let no_limit = Select::all_from(&f.persons).offset(3);
        assert!(matches!(
            no_limit.build(Dialect::MySql),
            Err(SqlError::MalformedStatement(_))
        ));
    }

    #[test]
    fn test_aliases() {
        let f = fixture();
        let query = select(&[&f.lastname.aliased("name")])
            .column_as(&Function::count_all(), "total")
            .from(&f.persons)
            .group_by(&f.lastname);
        assert_eq!(
            query.build(Dialect::MySql).unwrap(),
            "SELECT `persons`.`lastname` AS `name`, COUNT(*) AS `total` FROM `persons` \
             GROUP BY `persons`.`lastname`"
        );
        assert_eq!(query.projections()[1].alias(), Some("total"));
    }

    #[test]
    fn test_join() {
        let f = fixture();
        let query = select(&[&f.lastname])
            .from(&f.persons)
            .left_join(&f.orders, f.person_id.eq(&f.id))
            .where_clause(f.person_id.is_null());
        assert_eq!(
            query.build(Dialect::MySql).unwrap(),
            "SELECT `persons`.`lastname` FROM `persons` LEFT JOIN `t_orders` AS `orders` \
             ON `orders`.`person_id` = `persons`.`id` WHERE `orders`.`person_id` IS NULL"
        );
    }

    #[test]
    fn test_group_by_having() {
        let f = fixture();
        let query = select(&[&f.lastname])
            .column(&Function::max(&f.age))
            .from(&f.persons)
            .group_by(&f.lastname)
            .having(Function::count_all().gt(1));
        assert_eq!(
            query.build(Dialect::Sqlite).unwrap(),
            "SELECT \"persons\".\"lastname\", MAX(\"persons\".\"age\") FROM \"persons\" \
             GROUP BY \"persons\".\"lastname\" HAVING COUNT(*) > 1"
        );
    }

    #[test]
    fn test_pretty() {
        let f = fixture();
        let query = select(&[&f.lastname, &f.age])
            .from(&f.persons)
            .where_clause(
                f.lastname
                    .is_like("Nils", LikeType::After)
                    .and(f.age.gt(3)),
            )
            .order_by(f.age.desc())
            .limit(10);
        assert_eq!(
            query
                .build_indented(Dialect::MySql, Indentation::enabled())
                .unwrap(),
            "SELECT\n  `persons`.`lastname`,\n  `persons`.`age`\nFROM\n  `persons`\nWHERE\n(\n  \
             `persons`.`lastname` LIKE 'Nils%'\n  AND `persons`.`age` > 3\n)\n\
             ORDER BY\n  `persons`.`age` DESC\nLIMIT 10"
        );
    }

    #[test]
    fn test_clear_limit_and_limitation() {
        let f = fixture();
        let mut query = Select::all_from(&f.persons).limit(5).offset(10);
        assert_eq!(query.limitation(), Some(Limit::new(5).with_offset(10)));
        query.clear_limit();
        assert!(query.limitation().is_none());
        assert_eq!(query.build(Dialect::MySql).unwrap(), "SELECT * FROM `persons`");
    }
}
