//! Column value domains.
//!
//! Each domain is a zero-sized marker type used as the type parameter of
//! [`Column`]. Marker traits describe what a domain can do: [`Ordered`]
//! domains get range comparisons, [`Temporal`] domains get `is_after` and
//! friends, [`Numeric`] domains can be summed.

use super::column::{type_code, AnyColumn, Column, ColumnDefinition};
use crate::value::SqlValue;

mod sealed {
    pub trait Sealed {}
}

/// Runtime tag of a value domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainKind {
    /// Whole numbers.
    Integer,
    /// Floating-point and fixed-point numbers.
    Decimal,
    /// Character data.
    Text,
    /// Calendar dates.
    Date,
    /// Times of day.
    Time,
    /// Date and time.
    Timestamp,
    /// Booleans.
    Boolean,
}

impl DomainKind {
    /// Short name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Text => "text",
            Self::Date => "date",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::Boolean => "boolean",
        }
    }

    /// Returns whether a non-null value belongs to this domain.
    #[must_use]
    pub const fn accepts(self, value: &SqlValue) -> bool {
        matches!(
            (self, value),
            (Self::Integer, SqlValue::Int(_))
                | (Self::Decimal, SqlValue::Int(_) | SqlValue::Float(_))
                | (Self::Text, SqlValue::Text(_))
                | (Self::Date, SqlValue::Date(_))
                | (Self::Time, SqlValue::Time(_))
                | (Self::Timestamp, SqlValue::Timestamp(_))
                | (Self::Boolean, SqlValue::Bool(_))
        )
    }

    /// Returns whether values of this domain can be range-compared.
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        !matches!(self, Self::Boolean)
    }

    /// Maps a SQL type tag to its domain.
    ///
    /// Matching ignores case and any length or precision suffix, so
    /// `varchar(255)` and `VARCHAR` both map to [`DomainKind::Text`].
    #[must_use]
    pub fn for_type_name(type_name: &str) -> Option<Self> {
        let base = type_name
            .split('(')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_uppercase();
        let base = base.strip_suffix(" UNSIGNED").unwrap_or(&base);
        match base {
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "INTEGER" | "BIGINT" | "SERIAL"
            | "BIGSERIAL" | "INT2" | "INT4" | "INT8" => Some(Self::Integer),
            "FLOAT" | "DOUBLE" | "DOUBLE PRECISION" | "REAL" | "NUMERIC" | "DECIMAL"
            | "MONEY" => Some(Self::Decimal),
            "CHAR" | "VARCHAR" | "NCHAR" | "NVARCHAR" | "TEXT" | "LONGVARCHAR" | "TINYTEXT"
            | "MEDIUMTEXT" | "LONGTEXT" | "CHARACTER VARYING" | "CHARACTER" | "UNIVARCHAR"
            | "UNICHAR" => Some(Self::Text),
            "DATE" => Some(Self::Date),
            "TIME" => Some(Self::Time),
            "TIMESTAMP" | "DATETIME" | "DATETIME2" | "SMALLDATETIME" => Some(Self::Timestamp),
            "BOOLEAN" | "BOOL" | "BIT" => Some(Self::Boolean),
            _ => None,
        }
    }
}

/// A column value domain.
pub trait Domain: sealed::Sealed + Sized + Send + Sync + 'static {
    /// Runtime tag of the domain.
    const KIND: DomainKind;

    /// Type tag given to columns created without an explicit definition.
    fn default_definition() -> ColumnDefinition;

    /// Erases the domain of a column.
    fn wrap(column: Column<Self>) -> AnyColumn;

    /// Recovers the typed column if `column` belongs to this domain.
    fn unwrap(column: &AnyColumn) -> Option<&Column<Self>>;
}

/// Domains whose values can be compared with `<`, `>` and `BETWEEN`.
pub trait Ordered: Domain {}

/// Date and time domains.
pub trait Temporal: Ordered {}

/// Domains that can be summed.
pub trait Numeric: Ordered {}

macro_rules! domain {
    ($(#[$doc:meta])* $name:ident, $tag:literal, $code:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name;

        impl sealed::Sealed for $name {}

        impl Domain for $name {
            const KIND: DomainKind = DomainKind::$name;

            fn default_definition() -> ColumnDefinition {
                ColumnDefinition::new($tag, $code)
            }

            fn wrap(column: Column<Self>) -> AnyColumn {
                AnyColumn::$name(column)
            }

            fn unwrap(column: &AnyColumn) -> Option<&Column<Self>> {
                match column {
                    AnyColumn::$name(c) => Some(c),
                    _ => None,
                }
            }
        }
    };
}

domain!(
    /// Whole numbers.
    Integer, "INTEGER", type_code::INTEGER
);
domain!(
    /// Floating-point and fixed-point numbers.
    Decimal, "DECIMAL", type_code::DECIMAL
);
domain!(
    /// Character data.
    Text, "VARCHAR", type_code::VARCHAR
);
domain!(
    /// Calendar dates.
    Date, "DATE", type_code::DATE
);
domain!(
    /// Times of day.
    Time, "TIME", type_code::TIME
);
domain!(
    /// Date and time without time zone.
    Timestamp, "TIMESTAMP", type_code::TIMESTAMP
);
domain!(
    /// Booleans.
    Boolean, "BOOLEAN", type_code::BOOLEAN
);

impl Ordered for Integer {}
impl Ordered for Decimal {}
impl Ordered for Text {}
impl Ordered for Date {}
impl Ordered for Time {}
impl Ordered for Timestamp {}

impl Temporal for Date {}
impl Temporal for Time {}
impl Temporal for Timestamp {}

impl Numeric for Integer {}
impl Numeric for Decimal {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_type_name() {
        assert_eq!(DomainKind::for_type_name("varchar(255)"), Some(DomainKind::Text));
        assert_eq!(DomainKind::for_type_name("INT UNSIGNED"), Some(DomainKind::Integer));
        assert_eq!(DomainKind::for_type_name("datetime"), Some(DomainKind::Timestamp));
        assert_eq!(DomainKind::for_type_name("numeric(10,2)"), Some(DomainKind::Decimal));
        assert_eq!(DomainKind::for_type_name("BIT"), Some(DomainKind::Boolean));
        assert_eq!(DomainKind::for_type_name("geometry"), None);
    }

    #[test]
    fn test_accepts() {
        assert!(DomainKind::Decimal.accepts(&SqlValue::Int(3)));
        assert!(!DomainKind::Integer.accepts(&SqlValue::Float(3.0)));
        assert!(!DomainKind::Text.accepts(&SqlValue::Null));
        assert!(!DomainKind::Boolean.is_ordered());
    }
}
