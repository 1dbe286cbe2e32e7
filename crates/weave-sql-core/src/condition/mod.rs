//! The condition tree: leaf predicates, raw SQL fragments and AND/OR/NOT.
//!
//! ```
//! use weave_sql_core::prelude::*;
//!
//! let mut persons = Table::builder("persons");
//! let lastname = persons.varchar_column("lastname").build();
//! let age = persons.int_column("age").build();
//!
//! let cond = age
//!     .gt_eq(50)
//!     .and(lastname.eq("Schumacher").or(lastname.eq("Kuenzel")));
//! let sql = cond.to_sql(Dialect::MySql).unwrap();
//! assert_eq!(
//!     sql,
//!     "(`persons`.`age` >= 50 AND (`persons`.`lastname` = 'Schumacher' \
//!      OR `persons`.`lastname` = 'Kuenzel'))"
//! );
//! ```

mod expression;
mod generic;

pub use expression::{Expression, OrderedExpression, TemporalExpression, TextExpression};
pub use generic::{ConditionKind, GenericCondition, LikeType};

use crate::building::{BuildOptions, BuildingContext, Indentation};
use crate::dialect::Dialect;
use crate::error::Result;
use crate::expr::{Operand, ScalarExpr};

/// How the children of a composite are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Junction {
    /// All children hold.
    And,
    /// At least one child holds.
    Or,
    /// The single child does not hold.
    Not,
}

impl Junction {
    const fn token(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }
}

/// A node of the condition tree.
#[derive(Debug, Clone)]
pub enum Condition {
    /// A leaf predicate.
    Generic(GenericCondition),
    /// Raw SQL, rendered verbatim.
    Plain(String),
    /// AND, OR or NOT over child conditions.
    Composite(CompositeCondition),
}

/// An AND, OR or NOT node.
#[derive(Debug, Clone)]
pub struct CompositeCondition {
    junction: Junction,
    children: Vec<Condition>,
}

impl CompositeCondition {
    /// Returns the junction.
    #[must_use]
    pub const fn junction(&self) -> Junction {
        self.junction
    }

    /// Returns the children in order.
    #[must_use]
    pub fn children(&self) -> &[Condition] {
        &self.children
    }
}

impl Condition {
    pub(crate) fn generic(kind: ConditionKind, left: ScalarExpr, operands: Vec<Operand>) -> Self {
        Self::Generic(GenericCondition::new(kind, left, operands))
    }

    /// Raw SQL text. It is neither escaped nor validated.
    #[must_use]
    pub fn plain(sql: impl Into<String>) -> Self {
        Self::Plain(sql.into())
    }

    /// Combines all conditions with AND. Returns `None` for an empty input.
    #[must_use]
    pub fn all(conditions: impl IntoIterator<Item = Self>) -> Option<Self> {
        Self::composite(Junction::And, conditions)
    }

    /// Combines all conditions with OR. Returns `None` for an empty input.
    #[must_use]
    pub fn any(conditions: impl IntoIterator<Item = Self>) -> Option<Self> {
        Self::composite(Junction::Or, conditions)
    }

    fn composite(junction: Junction, conditions: impl IntoIterator<Item = Self>) -> Option<Self> {
        let children: Vec<Self> = conditions.into_iter().collect();
        if children.is_empty() {
            return None;
        }
        Some(Self::Composite(CompositeCondition { junction, children }))
    }

    /// `self AND other`. Chained calls extend the same AND node.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        self.join(Junction::And, other)
    }

    /// `self OR other`. Chained calls extend the same OR node.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        self.join(Junction::Or, other)
    }

    /// `NOT self`.
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(self) -> Self {
        Self::Composite(CompositeCondition {
            junction: Junction::Not,
            children: vec![self],
        })
    }

    fn join(self, junction: Junction, other: Self) -> Self {
        match self {
            Self::Composite(mut node) if node.junction == junction => {
                node.children.push(other);
                Self::Composite(node)
            }
            first => Self::Composite(CompositeCondition {
                junction,
                children: vec![first, other],
            }),
        }
    }

    /// Renders the condition on its own, for debugging and tests.
    ///
    /// # Errors
    ///
    /// Fails when a value cannot be rendered for `dialect`.
    pub fn to_sql(&self, dialect: Dialect) -> Result<String> {
        let mut ctx = BuildingContext::new(dialect, BuildOptions::new());
        self.render(&mut ctx, Indentation::disabled())
    }

    /// Returns whether the pretty rendering opens a parenthesized block.
    pub(crate) fn opens_block(&self) -> bool {
        match self {
            Self::Composite(node) => match node.junction {
                Junction::Not => false,
                Junction::And | Junction::Or => match node.children.as_slice() {
                    [only] => only.opens_block(),
                    _ => true,
                },
            },
            Self::Generic(_) | Self::Plain(_) => false,
        }
    }

    pub(crate) fn render(&self, ctx: &mut BuildingContext, ind: Indentation) -> Result<String> {
        match self {
            Self::Generic(leaf) => leaf.render(ctx),
            Self::Plain(sql) => Ok(sql.clone()),
            Self::Composite(node) => node.render(ctx, ind),
        }
    }
}

impl CompositeCondition {
    fn render(&self, ctx: &mut BuildingContext, ind: Indentation) -> Result<String> {
        if self.junction == Junction::Not {
            let mut out = String::from("NOT");
            for child in &self.children {
                let inner = child.render(ctx, ind)?;
                if ind.is_enabled() && child.opens_block() {
                    out.push('\n');
                    out.push_str(&ind.prefix());
                } else {
                    out.push(' ');
                }
                out.push_str(&inner);
            }
            return Ok(out);
        }

        if let [only] = self.children.as_slice() {
            return only.render(ctx, ind);
        }

        let token = self.junction.token();
        if !ind.is_enabled() {
            let mut parts = Vec::with_capacity(self.children.len());
            for child in &self.children {
                parts.push(child.render(ctx, ind)?);
            }
            return Ok(format!("({})", parts.join(&format!(" {token} "))));
        }

        let inner = ind.indent();
        let prefix = inner.prefix();
        let mut out = String::from("(");
        for (i, child) in self.children.iter().enumerate() {
            let text = child.render(ctx, inner)?;
            out.push('\n');
            out.push_str(&prefix);
            if i > 0 {
                out.push_str(token);
                if child.opens_block() {
                    out.push('\n');
                    out.push_str(&prefix);
                } else {
                    out.push(' ');
                }
            }
            out.push_str(&text);
        }
        out.push('\n');
        out.push_str(&ind.prefix());
        out.push(')');
        Ok(out)
    }
}

impl From<GenericCondition> for Condition {
    fn from(leaf: GenericCondition) -> Self {
        Self::Generic(leaf)
    }
}
