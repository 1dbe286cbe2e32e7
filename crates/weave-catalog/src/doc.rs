//! Documentation value types for columns.

use std::fmt;

use serde::Serialize;
use weave_sql_core::schema::ColumnDefinition;

/// Value type shown in generated API documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DocType {
    /// Calendar date.
    Date,
    /// Date with time of day, or time of day alone.
    DateTime,
    /// Character data, also the fallback for unknown tags.
    String,
    Boolean,
    /// 64-bit integer.
    Long,
    /// Integer of at most 32 bits.
    Integer,
    /// Single precision float.
    Float,
    /// Double precision float.
    Double,
    /// Exact numeric.
    Decimal,
}

impl DocType {
    /// Name shown in generated documentation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::DateTime => "DateTime",
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Long => "Long",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Decimal => "Decimal",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps a column's type tag to its documentation type. Unknown tags map to
/// [`DocType::String`].
#[must_use]
pub fn doc_type(definition: &ColumnDefinition) -> DocType {
    let tag = definition.type_name();
    let base = tag
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_uppercase();
    let base = base.strip_suffix(" UNSIGNED").unwrap_or(&base);
    match base {
        "DATE" => DocType::Date,
        "TIME" | "TIMESTAMP" | "DATETIME" => DocType::DateTime,
        "CHAR" | "VARCHAR" | "NCHAR" | "NVARCHAR" | "TEXT" => DocType::String,
        "BOOLEAN" | "BOOL" | "BIT" => DocType::Boolean,
        "BIGINT" | "LONG" | "BIGSERIAL" => DocType::Long,
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INTEGER" | "INT" => DocType::Integer,
        "FLOAT" | "REAL" => DocType::Float,
        "DOUBLE" => DocType::Double,
        "NUMERIC" | "DECIMAL" => DocType::Decimal,
        _ => {
            tracing::warn!(type_name = %tag, "Unknown column type, documenting as String");
            DocType::String
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weave_sql_core::schema::type_code;

    fn tag(name: &str) -> DocType {
        doc_type(&ColumnDefinition::new(name, type_code::VARCHAR))
    }

    #[test]
    fn test_known_tags() {
        assert_eq!(tag("DATE"), DocType::Date);
        assert_eq!(tag("datetime"), DocType::DateTime);
        assert_eq!(tag("TIME"), DocType::DateTime);
        assert_eq!(tag("varchar(64)"), DocType::String);
        assert_eq!(tag("BOOL"), DocType::Boolean);
        assert_eq!(tag("BIGINT"), DocType::Long);
        assert_eq!(tag("int(11) unsigned"), DocType::Integer);
        assert_eq!(tag("FLOAT"), DocType::Float);
        assert_eq!(tag("DOUBLE"), DocType::Double);
        assert_eq!(tag("DECIMAL(10,2)"), DocType::Decimal);
    }

    #[test]
    fn test_unknown_tag_is_string() {
        assert_eq!(tag("GEOMETRY"), DocType::String);
        assert_eq!(DocType::String.to_string(), "String");
    }
}
