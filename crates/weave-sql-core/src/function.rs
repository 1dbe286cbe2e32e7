//! SQL aggregate and scalar functions.
//!
//! A [`Function`] wraps a column (or another function) and can be used
//! wherever a column can: on either side of a condition, in projections and
//! in ORDER BY. Its domain parameter is the domain of the result.

use std::fmt;
use std::marker::PhantomData;

use crate::building::BuildingContext;
use crate::condition::Expression;
use crate::error::Result;
use crate::expr::ScalarExpr;
use crate::schema::{Decimal, Domain, Integer, Numeric, Ordered, Text};

/// The supported SQL functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlFunction {
    /// `MIN(expr)`.
    Min,
    /// `MAX(expr)`.
    Max,
    /// `COUNT(expr)` or `COUNT(*)`.
    Count,
    /// `SUM(expr)`.
    Sum,
    /// `AVG(expr)`.
    Avg,
    /// `LOWER(expr)`.
    Lower,
    /// `UPPER(expr)`.
    Upper,
}

impl SqlFunction {
    /// Returns the SQL name of the function.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Avg => "AVG",
            Self::Lower => "LOWER",
            Self::Upper => "UPPER",
        }
    }
}

impl fmt::Display for SqlFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An untyped function application.
#[derive(Debug, Clone)]
pub struct FunctionCall {
    function: SqlFunction,
    /// `None` renders `*`.
    argument: Option<ScalarExpr>,
}

impl FunctionCall {
    /// Returns the applied function.
    #[must_use]
    pub const fn function(&self) -> SqlFunction {
        self.function
    }

    /// Returns the argument; `None` stands for `*`.
    #[must_use]
    pub const fn argument(&self) -> Option<&ScalarExpr> {
        self.argument.as_ref()
    }

    pub(crate) fn render(&self, ctx: &mut BuildingContext) -> Result<String> {
        let argument = match &self.argument {
            Some(expr) => expr.render(ctx)?,
            None => String::from("*"),
        };
        Ok(format!("{}({argument})", self.function.name()))
    }
}

/// A function whose result belongs to the domain `D`.
pub struct Function<D> {
    call: FunctionCall,
    _domain: PhantomData<fn() -> D>,
}

impl<D> Clone for Function<D> {
    fn clone(&self) -> Self {
        Self {
            call: self.call.clone(),
            _domain: PhantomData,
        }
    }
}

impl<D: Domain> fmt::Debug for Function<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("call", &self.call)
            .field("domain", &D::KIND)
            .finish()
    }
}

impl<D: Domain> Function<D> {
    fn apply<S: Domain>(function: SqlFunction, argument: &impl Expression<S>) -> Self {
        Self {
            call: FunctionCall {
                function,
                argument: Some(argument.to_expr()),
            },
            _domain: PhantomData,
        }
    }

    /// Returns the untyped call.
    #[must_use]
    pub const fn call(&self) -> &FunctionCall {
        &self.call
    }
}

impl<D: Ordered> Function<D> {
    /// `MIN(expr)`.
    #[must_use]
    pub fn min(expr: &impl Expression<D>) -> Self {
        Self::apply(SqlFunction::Min, expr)
    }

    /// `MAX(expr)`.
    #[must_use]
    pub fn max(expr: &impl Expression<D>) -> Self {
        Self::apply(SqlFunction::Max, expr)
    }
}

impl<D: Numeric> Function<D> {
    /// `SUM(expr)`.
    #[must_use]
    pub fn sum(expr: &impl Expression<D>) -> Self {
        Self::apply(SqlFunction::Sum, expr)
    }
}

impl Function<Integer> {
    /// `COUNT(expr)`.
    #[must_use]
    pub fn count<S: Domain>(expr: &impl Expression<S>) -> Self {
        Self::apply(SqlFunction::Count, expr)
    }

    /// `COUNT(*)`.
    #[must_use]
    pub const fn count_all() -> Self {
        Self {
            call: FunctionCall {
                function: SqlFunction::Count,
                argument: None,
            },
            _domain: PhantomData,
        }
    }
}

impl Function<Decimal> {
    /// `AVG(expr)`.
    #[must_use]
    pub fn avg<S: Numeric>(expr: &impl Expression<S>) -> Self {
        Self::apply(SqlFunction::Avg, expr)
    }
}

impl Function<Text> {
    /// `LOWER(expr)`.
    #[must_use]
    pub fn lower(expr: &impl Expression<Text>) -> Self {
        Self::apply(SqlFunction::Lower, expr)
    }

    /// `UPPER(expr)`.
    #[must_use]
    pub fn upper(expr: &impl Expression<Text>) -> Self {
        Self::apply(SqlFunction::Upper, expr)
    }
}

impl<D: Domain> Expression<D> for Function<D> {
    fn to_expr(&self) -> ScalarExpr {
        ScalarExpr::Function(Box::new(self.call.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{OrderedExpression, TextExpression};
    use crate::schema::{Column, Table};
    use crate::{BuildOptions, Dialect, Indentation, LikeType};

    fn persons() -> (Column<Text>, Column<Integer>, Column<Decimal>) {
        let mut builder = Table::builder("persons");
        let lastname = builder.varchar_column("lastname").build();
        let age = builder.int_column("age").build();
        let income = builder.decimal_column("income").build();
        (lastname, age, income)
    }

    fn render(expr: &ScalarExpr) -> String {
        let mut ctx = BuildingContext::new(Dialect::MySql, BuildOptions::new());
        expr.render(&mut ctx).unwrap()
    }

    #[test]
    fn test_render_functions() {
        let (lastname, age, income) = persons();
        assert_eq!(render(&Function::min(&age).to_expr()), "MIN(`persons`.`age`)");
        assert_eq!(render(&Function::max(&lastname).to_expr()), "MAX(`persons`.`lastname`)");
        assert_eq!(render(&Function::count(&lastname).to_expr()), "COUNT(`persons`.`lastname`)");
        assert_eq!(render(&Function::count_all().to_expr()), "COUNT(*)");
        assert_eq!(render(&Function::sum(&income).to_expr()), "SUM(`persons`.`income`)");
        assert_eq!(render(&Function::avg(&age).to_expr()), "AVG(`persons`.`age`)");
        assert_eq!(
            render(&Function::lower(&Function::upper(&lastname)).to_expr()),
            "LOWER(UPPER(`persons`.`lastname`))"
        );
    }

    #[test]
    fn test_function_conditions() {
        let (lastname, age, _) = persons();
        let mut ctx = BuildingContext::new(Dialect::MySql, BuildOptions::new());
        let cond = Function::min(&age).gt_eq(50);
        assert_eq!(
            cond.render(&mut ctx, Indentation::disabled()).unwrap(),
            "MIN(`persons`.`age`) >= 50"
        );
        let cond = Function::lower(&lastname).is_like("nils", LikeType::Both);
        assert_eq!(
            cond.render(&mut ctx, Indentation::disabled()).unwrap(),
            "LOWER(`persons`.`lastname`) LIKE '%nils%'"
        );
    }

    #[test]
    fn test_call_accessors() {
        let count = Function::count_all();
        assert_eq!(count.call().function(), SqlFunction::Count);
        assert!(count.call().argument().is_none());
        assert_eq!(SqlFunction::Upper.to_string(), "UPPER");
    }
}
