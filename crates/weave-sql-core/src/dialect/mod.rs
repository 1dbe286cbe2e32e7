//! SQL dialect support.
//!
//! Different databases have slightly different SQL syntax. Every supported
//! database is a variant of the closed [`Dialect`] enum and each syntax knob
//! is an exhaustive `match`, so adding a dialect or a clause forces every
//! implementation to be revisited.

mod literal;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::condition::ConditionKind;
use crate::error::{Result, SqlError};
use crate::query::StatementKind;

/// A supported SQL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Dialect {
    /// MySQL and MariaDB.
    MySql,
    /// Sybase Adaptive Server Enterprise.
    Sybase,
    /// PostgreSQL.
    PostgreSql,
    /// SQLite.
    Sqlite,
    /// Microsoft SQL Server.
    SqlServer,
}

/// Where a dialect places the row cap of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitPlacement {
    /// A trailing `LIMIT n [OFFSET m]` clause.
    Trailing,
    /// A `TOP n` modifier right after the statement verb.
    Top,
}

impl Dialect {
    /// All supported dialects.
    pub const ALL: [Self; 5] = [
        Self::MySql,
        Self::Sybase,
        Self::PostgreSql,
        Self::Sqlite,
        Self::SqlServer,
    ];

    /// Returns the short name of the dialect.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Sybase => "sybase",
            Self::PostgreSql => "postgresql",
            Self::Sqlite => "sqlite",
            Self::SqlServer => "sqlserver",
        }
    }

    /// Returns the product name of the dialect.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MySql => "MySQL",
            Self::Sybase => "Sybase",
            Self::PostgreSql => "PostgreSQL",
            Self::Sqlite => "SQLite",
            Self::SqlServer => "SQL Server",
        }
    }

    /// Looks up a dialect by short name or by the product name reported by
    /// database metadata. Matching ignores case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Configuration`] for unknown names.
    pub fn for_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "sybase" | "ase" | "adaptive server enterprise" => Ok(Self::Sybase),
            "postgresql" | "postgres" | "pg" => Ok(Self::PostgreSql),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "sqlserver" | "mssql" | "microsoft sql server" => Ok(Self::SqlServer),
            _ => Err(SqlError::Configuration(format!("unknown dialect '{name}'"))),
        }
    }

    /// Returns the opening and closing identifier quote characters.
    #[must_use]
    pub const fn identifier_quote(self) -> (char, char) {
        match self {
            Self::MySql | Self::Sybase => ('`', '`'),
            Self::PostgreSql | Self::Sqlite => ('"', '"'),
            Self::SqlServer => ('[', ']'),
        }
    }

    /// Quotes an identifier, doubling any embedded closing quote.
    #[must_use]
    pub fn quote_identifier(self, name: &str) -> String {
        let (open, close) = self.identifier_quote();
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(open);
        for c in name.chars() {
            if c == close {
                quoted.push(close);
            }
            quoted.push(c);
        }
        quoted.push(close);
        quoted
    }

    /// Returns the literal used for a boolean value.
    #[must_use]
    pub const fn boolean_literal(self, value: bool) -> &'static str {
        match (self, value) {
            (Self::MySql | Self::PostgreSql, true) => "TRUE",
            (Self::MySql | Self::PostgreSql, false) => "FALSE",
            (Self::Sybase | Self::Sqlite | Self::SqlServer, true) => "1",
            (Self::Sybase | Self::Sqlite | Self::SqlServer, false) => "0",
        }
    }

    /// Returns the positional parameter marker for the 1-based `index`.
    #[must_use]
    pub fn parameter_placeholder(self, index: usize) -> String {
        match self {
            Self::PostgreSql => format!("${index}"),
            Self::MySql | Self::Sybase | Self::Sqlite | Self::SqlServer => String::from("?"),
        }
    }

    /// Returns the operator token of a generic condition kind.
    #[must_use]
    pub const fn operator_token(self, kind: ConditionKind) -> &'static str {
        match kind {
            ConditionKind::Equal => "=",
            ConditionKind::NotEqual => match self {
                Self::MySql => "!=",
                Self::Sybase | Self::PostgreSql | Self::Sqlite | Self::SqlServer => "<>",
            },
            ConditionKind::Greater => ">",
            ConditionKind::GreaterOrEqual => ">=",
            ConditionKind::Less => "<",
            ConditionKind::LessOrEqual => "<=",
            ConditionKind::Between => "BETWEEN",
            ConditionKind::Like => "LIKE",
            ConditionKind::NotLike => "NOT LIKE",
            ConditionKind::IsNull => "IS NULL",
            ConditionKind::IsNotNull => "IS NOT NULL",
        }
    }

    /// Returns where the row cap of a statement is rendered.
    #[must_use]
    pub const fn limit_placement(self) -> LimitPlacement {
        match self {
            Self::MySql | Self::PostgreSql | Self::Sqlite => LimitPlacement::Trailing,
            Self::Sybase | Self::SqlServer => LimitPlacement::Top,
        }
    }

    /// Returns whether the dialect can skip rows with OFFSET.
    #[must_use]
    pub const fn supports_limit_offset(self) -> bool {
        matches!(self.limit_placement(), LimitPlacement::Trailing)
    }

    /// Returns whether a row cap can be rendered on the given statement kind.
    #[must_use]
    pub const fn supports_row_cap(self, kind: StatementKind) -> bool {
        match kind {
            StatementKind::Select => true,
            StatementKind::Delete | StatementKind::Update => {
                matches!(self, Self::MySql | Self::Sybase | Self::SqlServer)
            }
            StatementKind::Insert => false,
        }
    }

    /// Returns whether a table alias can be declared on the given statement
    /// kind. Sybase and SQL Server reject `AS` in single-table DELETE/UPDATE.
    #[must_use]
    pub const fn supports_table_alias(self, kind: StatementKind) -> bool {
        match kind {
            StatementKind::Select => true,
            StatementKind::Delete | StatementKind::Update => {
                matches!(self, Self::MySql | Self::PostgreSql | Self::Sqlite)
            }
            StatementKind::Insert => false,
        }
    }

    /// Returns whether ORDER BY can be rendered on the given statement kind.
    #[must_use]
    pub const fn supports_order_by(self, kind: StatementKind) -> bool {
        match kind {
            StatementKind::Select => true,
            StatementKind::Delete | StatementKind::Update => matches!(self, Self::MySql),
            StatementKind::Insert => false,
        }
    }

    /// Renders the row cap fragment for this dialect: `LIMIT n [OFFSET m]`
    /// for trailing dialects, `TOP n` (or `TOP (n)`) for the others.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::UnsupportedFeature`] for an offset on a `TOP`
    /// dialect.
    pub fn limit_clause(self, count: u64, offset: Option<u64>) -> Result<String> {
        match self.limit_placement() {
            LimitPlacement::Trailing => Ok(offset.map_or_else(
                || format!("LIMIT {count}"),
                |offset| format!("LIMIT {count} OFFSET {offset}"),
            )),
            LimitPlacement::Top => {
                if offset.is_some() {
                    return Err(SqlError::unsupported(self, "OFFSET"));
                }
                Ok(match self {
                    Self::SqlServer => format!("TOP ({count})"),
                    _ => format!("TOP {count}"),
                })
            }
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Dialect {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self> {
        Self::for_name(s)
    }
}

impl TryFrom<String> for Dialect {
    type Error = SqlError;

    fn try_from(value: String) -> Result<Self> {
        Self::for_name(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_name() {
        assert_eq!(Dialect::for_name("MySQL").unwrap(), Dialect::MySql);
        assert_eq!(Dialect::for_name(" mariadb ").unwrap(), Dialect::MySql);
        assert_eq!(
            Dialect::for_name("Adaptive Server Enterprise").unwrap(),
            Dialect::Sybase
        );
        assert_eq!(Dialect::for_name("PostgreSQL").unwrap(), Dialect::PostgreSql);
        assert_eq!(Dialect::for_name("SQLite").unwrap(), Dialect::Sqlite);
        assert_eq!(
            Dialect::for_name("Microsoft SQL Server").unwrap(),
            Dialect::SqlServer
        );
        for dialect in Dialect::ALL {
            assert_eq!(dialect.name().parse::<Dialect>().unwrap(), dialect);
        }
    }

    #[test]
    fn test_unknown_dialect() {
        let err = Dialect::for_name("oracle").unwrap_err();
        assert!(matches!(err, SqlError::Configuration(_)));
        assert_eq!(err.to_string(), "configuration error: unknown dialect 'oracle'");
    }

    #[test]
    fn test_deserialize() {
        let dialect: Dialect = serde_json::from_str(r#""postgres""#).unwrap();
        assert_eq!(dialect, Dialect::PostgreSql);
        assert!(serde_json::from_str::<Dialect>(r#""db2""#).is_err());
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(Dialect::MySql.quote_identifier("persons"), "`persons`");
        assert_eq!(Dialect::Sybase.quote_identifier("persons"), "`persons`");
        assert_eq!(Dialect::PostgreSql.quote_identifier("persons"), "\"persons\"");
        assert_eq!(Dialect::SqlServer.quote_identifier("persons"), "[persons]");
        assert_eq!(Dialect::MySql.quote_identifier("we`ird"), "`we``ird`");
        assert_eq!(Dialect::Sqlite.quote_identifier("a\"b"), "\"a\"\"b\"");
        assert_eq!(Dialect::SqlServer.quote_identifier("a]b"), "[a]]b]");
    }

    #[test]
    fn test_boolean_literal() {
        assert_eq!(Dialect::MySql.boolean_literal(true), "TRUE");
        assert_eq!(Dialect::PostgreSql.boolean_literal(false), "FALSE");
        assert_eq!(Dialect::Sybase.boolean_literal(true), "1");
        assert_eq!(Dialect::Sqlite.boolean_literal(false), "0");
    }

    #[test]
    fn test_parameter_placeholder() {
        assert_eq!(Dialect::MySql.parameter_placeholder(1), "?");
        assert_eq!(Dialect::PostgreSql.parameter_placeholder(3), "$3");
    }

    #[test]
    fn test_limit_clause() {
        assert_eq!(Dialect::MySql.limit_clause(10, None).unwrap(), "LIMIT 10");
        assert_eq!(
            Dialect::PostgreSql.limit_clause(10, Some(20)).unwrap(),
            "LIMIT 10 OFFSET 20"
        );
        assert_eq!(Dialect::Sybase.limit_clause(10, None).unwrap(), "TOP 10");
        assert_eq!(Dialect::SqlServer.limit_clause(10, None).unwrap(), "TOP (10)");
        assert!(matches!(
            Dialect::Sybase.limit_clause(10, Some(5)),
            Err(SqlError::UnsupportedFeature { dialect: Dialect::Sybase, .. })
        ));
    }

    #[test]
    fn test_statement_support() {
        assert!(Dialect::MySql.supports_row_cap(StatementKind::Delete));
        assert!(Dialect::Sybase.supports_row_cap(StatementKind::Delete));
        assert!(!Dialect::PostgreSql.supports_row_cap(StatementKind::Delete));
        assert!(Dialect::Sqlite.supports_row_cap(StatementKind::Select));
        assert!(Dialect::MySql.supports_order_by(StatementKind::Update));
        assert!(!Dialect::Sybase.supports_order_by(StatementKind::Update));
    }

    #[test]
    fn test_not_equal_token() {
        assert_eq!(Dialect::MySql.operator_token(ConditionKind::NotEqual), "!=");
        assert_eq!(Dialect::PostgreSql.operator_token(ConditionKind::NotEqual), "<>");
        assert_eq!(Dialect::Sybase.operator_token(ConditionKind::Like), "LIKE");
    }

    #[test]
    fn test_display() {
        assert_eq!(Dialect::PostgreSql.to_string(), "PostgreSQL");
    }
}
