//! Typed and type-erased columns.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::domain::{Domain, DomainKind};
use super::table::TableRef;
use crate::building::BuildingContext;
use crate::condition::{Condition, ConditionKind, LikeType};
use crate::error::{Result, SqlError};
use crate::expr::{Operand, ScalarExpr};
use crate::value::SqlValue;

/// Source type codes, as reported by database metadata drivers.
pub mod type_code {
    pub const BIT: i32 = -7;
    pub const TINYINT: i32 = -6;
    pub const BIGINT: i32 = -5;
    pub const LONGVARCHAR: i32 = -1;
    pub const CHAR: i32 = 1;
    pub const NUMERIC: i32 = 2;
    pub const DECIMAL: i32 = 3;
    pub const INTEGER: i32 = 4;
    pub const SMALLINT: i32 = 5;
    pub const FLOAT: i32 = 6;
    pub const REAL: i32 = 7;
    pub const DOUBLE: i32 = 8;
    pub const VARCHAR: i32 = 12;
    pub const BOOLEAN: i32 = 16;
    pub const DATE: i32 = 91;
    pub const TIME: i32 = 92;
    pub const TIMESTAMP: i32 = 93;
}

/// The SQL type of a column: a type tag such as `VARCHAR` and the source
/// type code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnDefinition {
    type_name: String,
    type_code: i32,
}

impl ColumnDefinition {
    /// Creates a definition.
    #[must_use]
    pub fn new(type_name: impl Into<String>, type_code: i32) -> Self {
        Self {
            type_name: type_name.into(),
            type_code,
        }
    }

    /// Returns the type tag.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the source type code.
    #[must_use]
    pub const fn type_code(&self) -> i32 {
        self.type_code
    }
}

#[derive(Debug, Clone)]
struct ColumnData {
    table: TableRef,
    name: String,
    alias: Option<String>,
    definition: ColumnDefinition,
    remark: Option<String>,
}

/// A domain-less handle on a column, as stored inside expressions.
/// References render the physical column name; aliases only label projections.
#[derive(Debug, Clone)]
pub struct ColumnRef(Arc<ColumnData>);

impl ColumnRef {
    /// Returns the physical column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Returns the explicit alias, if one was given.
    #[must_use]
    pub fn explicit_alias(&self) -> Option<&str> {
        self.0.alias.as_deref()
    }

    /// Returns the owning table.
    #[must_use]
    pub fn table(&self) -> &TableRef {
        &self.0.table
    }

    /// Renders `<table reference>.<column name>`. Column aliases are display
    /// names only and never reach the SQL text.
    pub(crate) fn render(&self, ctx: &BuildingContext) -> String {
        format!(
            "{}.{}",
            ctx.quote(self.0.table.qualifier(ctx)),
            ctx.quote(&self.0.name)
        )
    }
}

/// A column whose values belong to the domain `D`.
///
/// Columns are cheap to clone; the metadata is shared with the owning
/// [`Table`](super::Table).
pub struct Column<D> {
    inner: ColumnRef,
    _domain: PhantomData<fn() -> D>,
}

impl<D> Clone for Column<D> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _domain: PhantomData,
        }
    }
}

impl<D: Domain> fmt::Debug for Column<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("table", &self.inner.0.table.name())
            .field("name", &self.inner.0.name)
            .field("alias", &self.inner.0.alias)
            .field("domain", &D::KIND)
            .finish()
    }
}

impl<D: Domain> Column<D> {
    pub(crate) fn new(
        table: TableRef,
        name: String,
        alias: Option<String>,
        definition: ColumnDefinition,
        remark: Option<String>,
    ) -> Self {
        Self {
            inner: ColumnRef(Arc::new(ColumnData {
                table,
                name,
                alias,
                definition,
                remark,
            })),
            _domain: PhantomData,
        }
    }

    /// Returns the physical column name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Returns the logical name, which defaults to the physical name.
    #[must_use]
    pub fn alias(&self) -> &str {
        self.inner.0.alias.as_deref().unwrap_or(&self.inner.0.name)
    }

    /// Returns whether an alias different from the name is set.
    #[must_use]
    pub fn has_alias(&self) -> bool {
        self.inner.0.alias.as_deref().is_some_and(|a| a != self.inner.0.name)
    }

    /// Returns a copy of this column carrying another alias.
    #[must_use]
    pub fn aliased(&self, alias: impl Into<String>) -> Self {
        let mut data = ColumnData::clone(&self.inner.0);
        data.alias = Some(alias.into());
        Self {
            inner: ColumnRef(Arc::new(data)),
            _domain: PhantomData,
        }
    }

    /// Returns the SQL type.
    #[must_use]
    pub fn definition(&self) -> &ColumnDefinition {
        &self.inner.0.definition
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn remark(&self) -> Option<&str> {
        self.inner.0.remark.as_deref()
    }

    /// Returns the owning table.
    #[must_use]
    pub fn table(&self) -> &TableRef {
        self.inner.table()
    }

    /// Returns the value domain.
    #[must_use]
    pub const fn kind(&self) -> DomainKind {
        D::KIND
    }

    /// Returns the untyped handle used by expressions.
    #[must_use]
    pub const fn column_ref(&self) -> &ColumnRef {
        &self.inner
    }
}

/// A column of any domain.
///
/// Tables store their columns in this form. The condition methods here check
/// operands at runtime and fail with [`SqlError::TypeMismatch`]; use
/// [`AnyColumn::downcast`] to get back the statically typed API.
#[derive(Debug, Clone)]
pub enum AnyColumn {
    /// An integer column.
    Integer(Column<super::Integer>),
    /// A decimal column.
    Decimal(Column<super::Decimal>),
    /// A character column.
    Text(Column<super::Text>),
    /// A date column.
    Date(Column<super::Date>),
    /// A time column.
    Time(Column<super::Time>),
    /// A timestamp column.
    Timestamp(Column<super::Timestamp>),
    /// A boolean column.
    Boolean(Column<super::Boolean>),
}

macro_rules! each_column {
    ($value:expr, $c:ident => $body:expr) => {
        match $value {
            AnyColumn::Integer($c) => $body,
            AnyColumn::Decimal($c) => $body,
            AnyColumn::Text($c) => $body,
            AnyColumn::Date($c) => $body,
            AnyColumn::Time($c) => $body,
            AnyColumn::Timestamp($c) => $body,
            AnyColumn::Boolean($c) => $body,
        }
    };
}

impl AnyColumn {
    /// Returns the value domain.
    #[must_use]
    pub const fn kind(&self) -> DomainKind {
        match self {
            Self::Integer(_) => DomainKind::Integer,
            Self::Decimal(_) => DomainKind::Decimal,
            Self::Text(_) => DomainKind::Text,
            Self::Date(_) => DomainKind::Date,
            Self::Time(_) => DomainKind::Time,
            Self::Timestamp(_) => DomainKind::Timestamp,
            Self::Boolean(_) => DomainKind::Boolean,
        }
    }

    /// Returns the physical column name.
    #[must_use]
    pub fn name(&self) -> &str {
        each_column!(self, c => c.name())
    }

    /// Returns the logical name.
    #[must_use]
    pub fn alias(&self) -> &str {
        each_column!(self, c => c.alias())
    }

    /// Returns the SQL type.
    #[must_use]
    pub fn definition(&self) -> &ColumnDefinition {
        each_column!(self, c => c.definition())
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn remark(&self) -> Option<&str> {
        each_column!(self, c => c.remark())
    }

    /// Returns the untyped handle used by expressions.
    #[must_use]
    pub fn column_ref(&self) -> &ColumnRef {
        each_column!(self, c => c.column_ref())
    }

    /// Returns the typed column if it belongs to the domain `D`.
    #[must_use]
    pub fn downcast<D: Domain>(&self) -> Option<&Column<D>> {
        D::unwrap(self)
    }

    /// Checks that `value` fits the column. NULL fits every column.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::TypeMismatch`] when the value belongs to another
    /// domain.
    pub fn check_value(&self, value: &SqlValue) -> Result<()> {
        if value.is_null() || self.kind().accepts(value) {
            Ok(())
        } else {
            Err(self.mismatch(self.kind().name(), value.kind_name()))
        }
    }

    /// `<column> IS NULL`.
    #[must_use]
    pub fn is_null(&self) -> Condition {
        Condition::generic(ConditionKind::IsNull, self.expr(), Vec::new())
    }

    /// `<column> IS NOT NULL`.
    #[must_use]
    pub fn is_not_null(&self) -> Condition {
        Condition::generic(ConditionKind::IsNotNull, self.expr(), Vec::new())
    }

    /// Builds a single-operand comparison against a runtime value.
    ///
    /// Equality against NULL becomes `IS NULL`, inequality `IS NOT NULL`.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::TypeMismatch`] when `kind` or `value` does not suit
    /// the column, and [`SqlError::MalformedStatement`] for operators that do not take
    /// one operand.
    pub fn compare(&self, kind: ConditionKind, value: SqlValue) -> Result<Condition> {
        match kind {
            ConditionKind::Equal | ConditionKind::NotEqual if value.is_null() => {
                return Ok(if kind == ConditionKind::Equal {
                    self.is_null()
                } else {
                    self.is_not_null()
                });
            }
            ConditionKind::Equal | ConditionKind::NotEqual => {}
            ConditionKind::Greater
            | ConditionKind::GreaterOrEqual
            | ConditionKind::Less
            | ConditionKind::LessOrEqual => {
                if !self.kind().is_ordered() {
                    return Err(self.mismatch("ordered value", self.kind().name()));
                }
            }
            ConditionKind::Like | ConditionKind::NotLike => {
                if self.kind() != DomainKind::Text {
                    return Err(self.mismatch("text", self.kind().name()));
                }
            }
            ConditionKind::Between | ConditionKind::IsNull | ConditionKind::IsNotNull => {
                return Err(SqlError::malformed(format!(
                    "{kind} takes {} operands",
                    kind.arity()
                )));
            }
        }
        self.check_operand(&value)?;
        Ok(Condition::generic(
            kind,
            self.expr(),
            vec![Operand::Value(value)],
        ))
    }

    /// `<column> BETWEEN <low> AND <high>` against runtime values.
    ///
    /// # Errors
    ///
    /// Fails when the column is not ordered or a bound has another domain.
    pub fn between(&self, low: SqlValue, high: SqlValue) -> Result<Condition> {
        if !self.kind().is_ordered() {
            return Err(self.mismatch("ordered value", self.kind().name()));
        }
        self.check_operand(&low)?;
        self.check_operand(&high)?;
        Ok(Condition::generic(
            ConditionKind::Between,
            self.expr(),
            vec![Operand::Value(low), Operand::Value(high)],
        ))
    }

    /// `<column> LIKE <pattern>` with wildcards placed per `like`. `pattern`
    /// is raw: `%` and `_` in it match like wildcards.
    ///
    /// # Errors
    ///
    /// Fails when the column is not a text column.
    pub fn is_like(&self, pattern: &str, like: LikeType) -> Result<Condition> {
        self.compare(ConditionKind::Like, SqlValue::Text(like.wrap(pattern)))
    }

    /// `<column> NOT LIKE <pattern>` with wildcards placed per `like`.
    ///
    /// # Errors
    ///
    /// Fails when the column is not a text column.
    pub fn is_not_like(&self, pattern: &str, like: LikeType) -> Result<Condition> {
        self.compare(ConditionKind::NotLike, SqlValue::Text(like.wrap(pattern)))
    }

    fn check_operand(&self, value: &SqlValue) -> Result<()> {
        if self.kind().accepts(value) {
            Ok(())
        } else {
            Err(self.mismatch(self.kind().name(), value.kind_name()))
        }
    }

    fn mismatch(&self, expected: &'static str, found: &'static str) -> SqlError {
        SqlError::TypeMismatch {
            column: self.alias().to_owned(),
            expected,
            found,
        }
    }

    fn expr(&self) -> ScalarExpr {
        ScalarExpr::Column(self.column_ref().clone())
    }
}

impl<D: Domain> From<Column<D>> for AnyColumn {
    fn from(column: Column<D>) -> Self {
        D::wrap(column)
    }
}
