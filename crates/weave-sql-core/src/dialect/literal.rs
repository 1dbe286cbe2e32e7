//! Literal formatting per dialect.

use super::Dialect;
use crate::error::{Result, SqlError};
use crate::value::SqlValue;

impl Dialect {
    /// Renders a string as a quoted SQL string literal.
    ///
    /// Single quotes are doubled everywhere; MySQL additionally treats the
    /// backslash as an escape character, so it is doubled there too.
    #[must_use]
    pub fn escape_string(self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        for c in value.chars() {
            match c {
                '\'' => out.push_str("''"),
                '\\' if matches!(self, Self::MySql) => out.push_str("\\\\"),
                _ => out.push(c),
            }
        }
        out.push('\'');
        out
    }

    /// Renders a value as an inline SQL literal.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::UnsupportedFeature`] for NaN and infinite floats.
    pub fn escape_literal(self, value: &SqlValue) -> Result<String> {
        Ok(match value {
            SqlValue::Null => String::from("NULL"),
            SqlValue::Bool(b) => String::from(self.boolean_literal(*b)),
            SqlValue::Int(n) => n.to_string(),
            SqlValue::Float(f) => {
                if !f.is_finite() {
                    return Err(SqlError::unsupported(self, format!("float literal {f}")));
                }
                f.to_string()
            }
            SqlValue::Text(s) => self.escape_string(s),
            SqlValue::Date(d) => self.temporal_literal("DATE", &d.to_string()),
            SqlValue::Time(t) => self.temporal_literal("TIME", &t.to_string()),
            SqlValue::Timestamp(ts) => self.temporal_literal("TIMESTAMP", &ts.to_string()),
        })
    }

    fn temporal_literal(self, keyword: &str, text: &str) -> String {
        match self {
            Self::PostgreSql => format!("{keyword} {}", self.escape_string(text)),
            Self::MySql | Self::Sybase | Self::Sqlite | Self::SqlServer => {
                self.escape_string(text)
            }
        }
    }
}
