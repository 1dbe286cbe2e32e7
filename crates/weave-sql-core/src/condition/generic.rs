//! Leaf predicates: `<expr> <operator> <operands>`.

use std::fmt;

use crate::building::BuildingContext;
use crate::error::{Result, SqlError};
use crate::expr::{Operand, ScalarExpr};

/// The operator of a leaf predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    /// `=`
    Equal,
    /// `<>` or `!=`
    NotEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEqual,
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `BETWEEN .. AND ..`
    Between,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
    /// `IS NULL`
    IsNull,
    /// `IS NOT NULL`
    IsNotNull,
}

impl ConditionKind {
    /// Number of right-hand operands the operator takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::IsNull | Self::IsNotNull => 0,
            Self::Between => 2,
            Self::Equal
            | Self::NotEqual
            | Self::Greater
            | Self::GreaterOrEqual
            | Self::Less
            | Self::LessOrEqual
            | Self::Like
            | Self::NotLike => 1,
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Equal => "EQUAL",
            Self::NotEqual => "NOT_EQUAL",
            Self::Greater => "GREATER",
            Self::GreaterOrEqual => "GREATER_OR_EQUAL",
            Self::Less => "LESS",
            Self::LessOrEqual => "LESS_OR_EQUAL",
            Self::Between => "BETWEEN",
            Self::Like => "LIKE",
            Self::NotLike => "NOT_LIKE",
            Self::IsNull => "IS_NULL",
            Self::IsNotNull => "IS_NOT_NULL",
        };
        f.write_str(name)
    }
}

/// Where LIKE wildcards are placed around a match value.
///
/// The value is a raw pattern: `%` and `_` inside it stay wildcards and no
/// `ESCAPE` clause is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LikeType {
    /// `%value`
    Before,
    /// `value%`
    After,
    /// `%value%`
    #[default]
    Both,
    /// `value`
    Exact,
}

impl LikeType {
    /// Adds the wildcards to `value`. Wildcards already in `value` are kept.
    #[must_use]
    pub fn wrap(self, value: &str) -> String {
        match self {
            Self::Before => format!("%{value}"),
            Self::After => format!("{value}%"),
            Self::Both => format!("%{value}%"),
            Self::Exact => String::from(value),
        }
    }
}

/// A leaf predicate.
#[derive(Debug, Clone)]
pub struct GenericCondition {
    kind: ConditionKind,
    left: ScalarExpr,
    operands: Vec<Operand>,
}

impl GenericCondition {
    pub(crate) fn new(kind: ConditionKind, left: ScalarExpr, operands: Vec<Operand>) -> Self {
        debug_assert_eq!(operands.len(), kind.arity());
        Self {
            kind,
            left,
            operands,
        }
    }

    /// Returns the operator.
    #[must_use]
    pub const fn kind(&self) -> ConditionKind {
        self.kind
    }

    /// Returns the left-hand expression.
    #[must_use]
    pub const fn left(&self) -> &ScalarExpr {
        &self.left
    }

    /// Returns the right-hand operands.
    #[must_use]
    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    pub(crate) fn render(&self, ctx: &mut BuildingContext) -> Result<String> {
        let left = self.left.render(ctx)?;
        let token = ctx.dialect().operator_token(self.kind);
        let mut rendered = Vec::with_capacity(self.operands.len());
        for operand in &self.operands {
            rendered.push(operand.render(ctx)?);
        }
        match (self.kind, rendered.as_slice()) {
            (ConditionKind::IsNull | ConditionKind::IsNotNull, []) => {
                Ok(format!("{left} {token}"))
            }
            (ConditionKind::Between, [low, high]) => Ok(format!("{left} {token} {low} AND {high}")),
            (_, [right]) if self.kind.arity() == 1 => Ok(format!("{left} {token} {right}")),
            _ => Err(SqlError::malformed(format!(
                "{} takes {} operands, got {}",
                self.kind,
                self.kind.arity(),
                rendered.len()
            ))),
        }
    }
}
