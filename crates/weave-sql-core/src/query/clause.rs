//! Clause values and renderers shared by the statement builders.

use crate::building::{BuildingContext, Indentation};
use crate::condition::Condition;
use crate::dialect::LimitPlacement;
use crate::error::{Result, SqlError};
use crate::expr::ScalarExpr;

use super::StatementKind;

/// A row cap with an optional number of rows to skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    count: u64,
    offset: Option<u64>,
}

impl Limit {
    /// Caps the result at `count` rows.
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self {
            count,
            offset: None,
        }
    }

    /// Skips `offset` rows before the cap applies.
    #[must_use]
    pub const fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Returns the row cap.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Returns the number of skipped rows.
    #[must_use]
    pub const fn offset(&self) -> Option<u64> {
        self.offset
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl Direction {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One ORDER BY item.
#[derive(Debug, Clone)]
pub struct OrderBy {
    expr: ScalarExpr,
    direction: Direction,
}

impl OrderBy {
    /// Ascending order on `expr`.
    #[must_use]
    pub const fn asc(expr: ScalarExpr) -> Self {
        Self {
            expr,
            direction: Direction::Asc,
        }
    }

    /// Descending order on `expr`.
    #[must_use]
    pub const fn desc(expr: ScalarExpr) -> Self {
        Self {
            expr,
            direction: Direction::Desc,
        }
    }

    /// Returns the direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

/// Joins list items: `a, b` compact, one item per line when pretty.
pub(super) fn join_list(items: &[String], ind: Indentation) -> String {
    if ind.is_enabled() {
        items.join(&format!(",\n{}", ind.indent().prefix()))
    } else {
        items.join(", ")
    }
}

/// `<keyword> <condition>`; a parenthesized block starts on the next line.
pub(super) fn condition_clause(
    keyword: &str,
    condition: &Condition,
    ctx: &mut BuildingContext,
    ind: Indentation,
) -> Result<String> {
    let body = condition.render(ctx, ind)?;
    if ind.is_enabled() && condition.opens_block() {
        Ok(format!("{keyword}\n{}{body}", ind.prefix()))
    } else {
        Ok(format!("{keyword} {body}"))
    }
}

pub(super) fn order_by_clause(
    order: &[OrderBy],
    ctx: &mut BuildingContext,
    ind: Indentation,
) -> Result<String> {
    let mut items = Vec::with_capacity(order.len());
    for item in order {
        let expr = item.expr.render(ctx)?;
        items.push(format!("{expr} {}", item.direction.keyword()));
    }
    Ok(format!(
        "ORDER BY{}{}",
        ind.body_separator(),
        join_list(&items, ind)
    ))
}

/// Checks that the dialect can render ORDER BY on `kind`.
pub(super) fn check_order_by(ctx: &BuildingContext, kind: StatementKind) -> Result<()> {
    if ctx.dialect().supports_order_by(kind) {
        Ok(())
    } else {
        Err(SqlError::unsupported(
            ctx.dialect(),
            format!("ORDER BY on {kind}"),
        ))
    }
}

/// Row cap split by placement: the `TOP` modifier and the trailing clause.
pub(super) struct RowCap {
    pub(super) top: Option<String>,
    pub(super) trailing: Option<String>,
}

pub(super) fn row_cap(
    limit: Option<&Limit>,
    ctx: &BuildingContext,
    kind: StatementKind,
) -> Result<RowCap> {
    let Some(limit) = limit else {
        return Ok(RowCap {
            top: None,
            trailing: None,
        });
    };
    let dialect = ctx.dialect();
    if !dialect.supports_row_cap(kind) {
        return Err(SqlError::unsupported(dialect, format!("row limit on {kind}")));
    }
    let clause = dialect.limit_clause(limit.count, limit.offset)?;
    Ok(match dialect.limit_placement() {
        LimitPlacement::Top => RowCap {
            top: Some(clause),
            trailing: None,
        },
        LimitPlacement::Trailing => RowCap {
            top: None,
            trailing: Some(clause),
        },
    })
}
