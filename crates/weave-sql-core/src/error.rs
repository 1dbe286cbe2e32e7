//! Error types for statement construction and rendering.

use thiserror::Error;

use crate::dialect::Dialect;

/// Errors raised while constructing or building SQL statements.
///
/// Type errors surface when a condition is constructed, completeness and
/// dialect errors surface when a statement is built. A failed build never
/// yields a partial string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlError {
    /// The requested dialect is unknown.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An operand does not fit the value domain of the column it is compared with.
    #[error("type mismatch on column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Column the condition was built on.
        column: String,
        /// Value domain of the column.
        expected: &'static str,
        /// Kind of the rejected operand.
        found: &'static str,
    },

    /// A mandatory clause is missing.
    #[error("malformed statement: {0}")]
    MalformedStatement(String),

    /// The active dialect has no rendering rule for a clause or value.
    #[error("{dialect} does not support {feature}")]
    UnsupportedFeature {
        /// Dialect the statement was built for.
        dialect: Dialect,
        /// Human-readable description of the rejected construct.
        feature: String,
    },
}

impl SqlError {
    pub(crate) fn unsupported(dialect: Dialect, feature: impl Into<String>) -> Self {
        let feature = feature.into();
        tracing::debug!(dialect = %dialect, feature = %feature, "unsupported by dialect");
        Self::UnsupportedFeature { dialect, feature }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedStatement(message.into())
    }
}

/// Result type alias for statement building.
pub type Result<T> = std::result::Result<T, SqlError>;
