//! Condition factories shared by columns and functions.
//!
//! Which factories are available depends on the domain: every expression
//! gets equality and NULL checks, [`Ordered`] domains get range comparisons,
//! [`Temporal`] domains get `is_after`/`is_before`, and text expressions get
//! LIKE.

use super::{Condition, ConditionKind, LikeType};
use crate::expr::{IntoNullableOperand, IntoOperand, Operand, ScalarExpr};
use crate::query::OrderBy;
use crate::schema::{Column, Domain, Ordered, Temporal, Text};
use crate::value::SqlValue;

/// An expression whose values belong to the domain `D`.
pub trait Expression<D: Domain> {
    /// Returns the untyped expression.
    fn to_expr(&self) -> ScalarExpr;

    /// `<expr> IS NULL`.
    #[must_use]
    fn is_null(&self) -> Condition {
        Condition::generic(ConditionKind::IsNull, self.to_expr(), Vec::new())
    }

    /// `<expr> IS NOT NULL`.
    #[must_use]
    fn is_not_null(&self) -> Condition {
        Condition::generic(ConditionKind::IsNotNull, self.to_expr(), Vec::new())
    }

    /// `<expr> = <value>`; `None` gives `<expr> IS NULL`.
    #[must_use]
    fn is_equal_to(&self, value: impl IntoNullableOperand<D>) -> Condition {
        match value.into_nullable_operand() {
            Some(operand) => Condition::generic(ConditionKind::Equal, self.to_expr(), vec![operand]),
            None => self.is_null(),
        }
    }

    /// `<expr> <> <value>`; `None` gives `<expr> IS NOT NULL`.
    #[must_use]
    fn is_not_equal_to(&self, value: impl IntoNullableOperand<D>) -> Condition {
        match value.into_nullable_operand() {
            Some(operand) => {
                Condition::generic(ConditionKind::NotEqual, self.to_expr(), vec![operand])
            }
            None => self.is_not_null(),
        }
    }

    /// Shorthand for [`is_equal_to`](Self::is_equal_to).
    #[must_use]
    fn eq(&self, value: impl IntoNullableOperand<D>) -> Condition {
        self.is_equal_to(value)
    }

    /// Shorthand for [`is_not_equal_to`](Self::is_not_equal_to).
    #[must_use]
    fn not_eq(&self, value: impl IntoNullableOperand<D>) -> Condition {
        self.is_not_equal_to(value)
    }

    /// Ascending sort on this expression.
    #[must_use]
    fn asc(&self) -> OrderBy {
        OrderBy::asc(self.to_expr())
    }

    /// Descending sort on this expression.
    #[must_use]
    fn desc(&self) -> OrderBy {
        OrderBy::desc(self.to_expr())
    }
}

impl<D: Domain> Expression<D> for Column<D> {
    fn to_expr(&self) -> ScalarExpr {
        ScalarExpr::Column(self.column_ref().clone())
    }
}

fn compare<D: Domain>(
    left: &(impl Expression<D> + ?Sized),
    kind: ConditionKind,
    value: impl IntoOperand<D>,
) -> Condition {
    Condition::generic(kind, left.to_expr(), vec![value.into_operand()])
}

/// Range comparisons.
pub trait OrderedExpression<D: Ordered>: Expression<D> {
    /// `<expr> > <value>`.
    #[must_use]
    fn is_greater_than(&self, value: impl IntoOperand<D>) -> Condition {
        compare(self, ConditionKind::Greater, value)
    }

    /// `<expr> >= <value>`.
    #[must_use]
    fn is_greater_than_or_equal_to(&self, value: impl IntoOperand<D>) -> Condition {
        compare(self, ConditionKind::GreaterOrEqual, value)
    }

    /// `<expr> < <value>`.
    #[must_use]
    fn is_less_than(&self, value: impl IntoOperand<D>) -> Condition {
        compare(self, ConditionKind::Less, value)
    }

    /// `<expr> <= <value>`.
    #[must_use]
    fn is_less_than_or_equal_to(&self, value: impl IntoOperand<D>) -> Condition {
        compare(self, ConditionKind::LessOrEqual, value)
    }

    /// `<expr> BETWEEN <low> AND <high>`.
    #[must_use]
    fn is_between(&self, low: impl IntoOperand<D>, high: impl IntoOperand<D>) -> Condition {
        Condition::generic(
            ConditionKind::Between,
            self.to_expr(),
            vec![low.into_operand(), high.into_operand()],
        )
    }

    /// Shorthand for [`is_greater_than`](Self::is_greater_than).
    #[must_use]
    fn gt(&self, value: impl IntoOperand<D>) -> Condition {
        self.is_greater_than(value)
    }

    /// Shorthand for [`is_greater_than_or_equal_to`](Self::is_greater_than_or_equal_to).
    #[must_use]
    fn gt_eq(&self, value: impl IntoOperand<D>) -> Condition {
        self.is_greater_than_or_equal_to(value)
    }

    /// Shorthand for [`is_less_than`](Self::is_less_than).
    #[must_use]
    fn lt(&self, value: impl IntoOperand<D>) -> Condition {
        self.is_less_than(value)
    }

    /// Shorthand for [`is_less_than_or_equal_to`](Self::is_less_than_or_equal_to).
    #[must_use]
    fn lt_eq(&self, value: impl IntoOperand<D>) -> Condition {
        self.is_less_than_or_equal_to(value)
    }
}

impl<D: Ordered, E: Expression<D> + ?Sized> OrderedExpression<D> for E {}

/// Chronological comparisons on dates and times.
pub trait TemporalExpression<D: Temporal>: Expression<D> {
    /// `<expr> > <value>`.
    #[must_use]
    fn is_after(&self, value: impl IntoOperand<D>) -> Condition {
        compare(self, ConditionKind::Greater, value)
    }

    /// `<expr> >= <value>`.
    #[must_use]
    fn is_after_or_equal_to(&self, value: impl IntoOperand<D>) -> Condition {
        compare(self, ConditionKind::GreaterOrEqual, value)
    }

    /// `<expr> < <value>`.
    #[must_use]
    fn is_before(&self, value: impl IntoOperand<D>) -> Condition {
        compare(self, ConditionKind::Less, value)
    }

    /// `<expr> <= <value>`.
    #[must_use]
    fn is_before_or_equal_to(&self, value: impl IntoOperand<D>) -> Condition {
        compare(self, ConditionKind::LessOrEqual, value)
    }
}

impl<D: Temporal, E: Expression<D> + ?Sized> TemporalExpression<D> for E {}

/// Pattern matching on character data.
pub trait TextExpression: Expression<Text> {
    /// `<expr> LIKE <pattern>`, with wildcards placed per `like`.
    ///
    /// `pattern` is raw: `%` and `_` in it match like wildcards.
    #[must_use]
    fn is_like(&self, pattern: &str, like: LikeType) -> Condition {
        like_condition(self, ConditionKind::Like, pattern, like)
    }

    /// `<expr> NOT LIKE <pattern>`, with wildcards placed per `like`.
    /// `pattern` is raw, as for [`is_like`](Self::is_like).
    #[must_use]
    fn is_not_like(&self, pattern: &str, like: LikeType) -> Condition {
        like_condition(self, ConditionKind::NotLike, pattern, like)
    }
}

impl<E: Expression<Text> + ?Sized> TextExpression for E {}

fn like_condition(
    left: &(impl Expression<Text> + ?Sized),
    kind: ConditionKind,
    pattern: &str,
    like: LikeType,
) -> Condition {
    Condition::generic(
        kind,
        left.to_expr(),
        vec![Operand::Value(SqlValue::Text(like.wrap(pattern)))],
    )
}
