//! Operands of conditions, assignments and projections.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::building::BuildingContext;
use crate::condition::Expression;
use crate::error::Result;
use crate::function::{Function, FunctionCall};
use crate::schema::{Boolean, Column, ColumnRef, Date, Decimal, Domain, Integer, Text, Time, Timestamp};
use crate::value::{SqlValue, ToSqlValue};

/// A column or a function applied to columns.
#[derive(Debug, Clone)]
pub enum ScalarExpr {
    /// A qualified column reference.
    Column(ColumnRef),
    /// A SQL function call.
    Function(Box<FunctionCall>),
}

impl ScalarExpr {
    pub(crate) fn render(&self, ctx: &mut BuildingContext) -> Result<String> {
        match self {
            Self::Column(column) => Ok(column.render(ctx)),
            Self::Function(call) => call.render(ctx),
        }
    }
}

/// A named value bound by the caller after building.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder {
    name: String,
}

impl Placeholder {
    /// Creates a placeholder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the binding name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The right-hand side of a comparison or assignment.
#[derive(Debug, Clone)]
pub enum Operand {
    /// A literal value.
    Value(SqlValue),
    /// Another column or function.
    Expr(ScalarExpr),
    /// A deferred value.
    Placeholder(Placeholder),
}

impl Operand {
    pub(crate) fn render(&self, ctx: &mut BuildingContext) -> Result<String> {
        match self {
            Self::Value(value) => ctx.literal(value),
            Self::Expr(expr) => expr.render(ctx),
            Self::Placeholder(p) => Ok(ctx.placeholder(p.name())),
        }
    }
}

/// Values that can be compared with an expression of the domain `D`.
pub trait IntoOperand<D> {
    /// Converts into an operand.
    fn into_operand(self) -> Operand;
}

/// Like [`IntoOperand`], but also accepting `None`, which turns equality
/// checks into NULL checks and assignments into `NULL`.
pub trait IntoNullableOperand<D> {
    /// Converts into an operand, or `None` for NULL.
    fn into_nullable_operand(self) -> Option<Operand>;
}

macro_rules! value_operand {
    ($domain:ty: $($ty:ty),+) => {
        $(
            impl IntoOperand<$domain> for $ty {
                fn into_operand(self) -> Operand {
                    Operand::Value(self.to_sql_value())
                }
            }

            impl IntoNullableOperand<$domain> for $ty {
                fn into_nullable_operand(self) -> Option<Operand> {
                    Some(Operand::Value(self.to_sql_value()))
                }
            }

            impl IntoNullableOperand<$domain> for Option<$ty> {
                fn into_nullable_operand(self) -> Option<Operand> {
                    self.map(|v| Operand::Value(v.to_sql_value()))
                }
            }
        )+
    };
}

value_operand!(Integer: i64, i32, i16, i8, u32, u16, u8);
value_operand!(Decimal: f64, f32, i64, i32);
value_operand!(Text: &str, String);
value_operand!(Date: NaiveDate);
value_operand!(Time: NaiveTime);
value_operand!(Timestamp: NaiveDateTime);
value_operand!(Boolean: bool);

impl IntoOperand<Text> for &String {
    fn into_operand(self) -> Operand {
        Operand::Value(SqlValue::Text(self.clone()))
    }
}

impl IntoNullableOperand<Text> for &String {
    fn into_nullable_operand(self) -> Option<Operand> {
        Some(self.into_operand())
    }
}

macro_rules! expr_operand {
    ($($ty:ty),+) => {
        $(
            impl<D: Domain> IntoOperand<D> for $ty {
                fn into_operand(self) -> Operand {
                    Operand::Expr(self.to_expr())
                }
            }

            impl<D: Domain> IntoNullableOperand<D> for $ty {
                fn into_nullable_operand(self) -> Option<Operand> {
                    Some(IntoOperand::<D>::into_operand(self))
                }
            }
        )+
    };
}

expr_operand!(Column<D>, &Column<D>, Function<D>, &Function<D>);

impl<D: Domain> IntoOperand<D> for Placeholder {
    fn into_operand(self) -> Operand {
        Operand::Placeholder(self)
    }
}

impl<D: Domain> IntoNullableOperand<D> for Placeholder {
    fn into_nullable_operand(self) -> Option<Operand> {
        Some(Operand::Placeholder(self))
    }
}

impl<D: Domain> IntoOperand<D> for &Placeholder {
    fn into_operand(self) -> Operand {
        Operand::Placeholder(self.clone())
    }
}

impl<D: Domain> IntoNullableOperand<D> for &Placeholder {
    fn into_nullable_operand(self) -> Option<Operand> {
        Some(Operand::Placeholder(self.clone()))
    }
}
