//! Statement builders.
//!
//! Each builder owns its clause state and renders through [`Query::build`],
//! [`Query::build_indented`] or [`Query::prepare`]. Cloning a builder copies
//! the clause state; the referenced tables and columns stay shared.

mod clause;
mod delete;
mod insert;
mod select;
mod update;

use std::fmt;

pub use clause::{Direction, Limit, OrderBy};
pub use delete::Delete;
pub use insert::Insert;
pub use select::{Join, JoinKind, Projectable, Projection, Select};
pub use update::Update;

use crate::building::{BuildOptions, BuildingContext, BuiltStatement, Indentation};
use crate::dialect::Dialect;
use crate::error::Result;
use crate::schema::Table;

/// The statement verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// SELECT.
    Select,
    /// DELETE.
    Delete,
    /// UPDATE.
    Update,
    /// INSERT.
    Insert,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Select => "SELECT",
            Self::Delete => "DELETE",
            Self::Update => "UPDATE",
            Self::Insert => "INSERT",
        })
    }
}

/// A buildable statement.
pub trait Query {
    /// The statement verb.
    fn kind(&self) -> StatementKind;

    /// Renders the statement into `ctx`.
    ///
    /// # Errors
    ///
    /// Fails when a mandatory clause is missing or the dialect cannot
    /// render a clause or value.
    fn render(&self, ctx: &mut BuildingContext) -> Result<String>;

    /// Renders compact SQL for `dialect`.
    ///
    /// # Errors
    ///
    /// Same as [`render`](Self::render).
    fn build(&self, dialect: Dialect) -> Result<String> {
        self.prepare(dialect, &BuildOptions::new())
            .map(|built| built.sql)
    }

    /// Renders SQL for `dialect` with the given indentation.
    ///
    /// # Errors
    ///
    /// Same as [`render`](Self::render).
    fn build_indented(&self, dialect: Dialect, indentation: Indentation) -> Result<String> {
        self.prepare(dialect, &BuildOptions::new().indentation(indentation))
            .map(|built| built.sql)
    }

    /// Renders SQL and collects its parameters.
    ///
    /// # Errors
    ///
    /// Same as [`render`](Self::render).
    fn prepare(&self, dialect: Dialect, options: &BuildOptions) -> Result<BuiltStatement> {
        let mut ctx = BuildingContext::new(dialect, *options);
        let mut sql = self.render(&mut ctx)?;
        if let Some(taken) = ctx.colliding_names() {
            ctx = BuildingContext::with_reserved_names(dialect, *options, taken);
            sql = self.render(&mut ctx)?;
        }
        tracing::debug!(
            dialect = %dialect,
            kind = %self.kind(),
            parameters = ctx.parameters().len(),
            sql = %sql,
            "built statement"
        );
        Ok(ctx.finish(sql))
    }
}

/// Starts a SELECT of the given projections. An empty list selects `*`.
#[must_use]
pub fn select(projections: &[&dyn Projectable]) -> Select {
    Select::new(projections)
}

/// Starts a DELETE on `table`.
#[must_use]
pub fn delete_from(table: &Table) -> Delete {
    Delete::new(table)
}

/// Starts an UPDATE on `table`.
#[must_use]
pub fn update(table: &Table) -> Update {
    Update::new(table)
}

/// Starts an INSERT into `table`.
#[must_use]
pub fn insert_into(table: &Table) -> Insert {
    Insert::new(table)
}
