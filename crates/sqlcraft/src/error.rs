//! Error types for sqlcraft

use crate::dialect::Feature;
use crate::qb::QueryKind;
use thiserror::Error;

/// Result type alias for sqlcraft operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised while constructing or rendering a query.
///
/// Construction errors (`Unsupported`, `IllegalClause`, `Validation`) are
/// returned by the builder call that caused them. Rendering errors
/// (`UnqualifiedField`, `InvalidLiteral`, `Incomplete`) are returned by
/// `to_sql`, which never produces partial SQL.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SqlError {
    /// The active dialect has no syntax for the requested clause
    #[error("{feature} is not supported by the {dialect} dialect")]
    Unsupported {
        dialect: &'static str,
        feature: Feature,
    },

    /// The clause cannot be used with this kind of query
    #[error("Illegal clause for {kind} query: {message}")]
    IllegalClause { kind: QueryKind, message: String },

    /// A field without a table was used where the dialect requires qualification
    #[error("Field \"{0}\" must be qualified with a table when the query joins other tables")]
    UnqualifiedField(String),

    /// A literal value has no SQL representation
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),

    /// The query is missing a clause it needs to be valid SQL
    #[error("Incomplete {kind} query: {message}")]
    Incomplete { kind: QueryKind, message: String },

    /// Validation error (identifiers, row arity, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// No dialect is registered under this name
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    /// Render options could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SqlError {
    /// Create an unsupported-clause error
    pub fn unsupported(dialect: &'static str, feature: Feature) -> Self {
        Self::Unsupported { dialect, feature }
    }

    /// Create an illegal-clause error
    pub fn illegal(kind: QueryKind, message: impl Into<String>) -> Self {
        Self::IllegalClause {
            kind,
            message: message.into(),
        }
    }

    /// Create an incomplete-query error
    pub fn incomplete(kind: QueryKind, message: impl Into<String>) -> Self {
        Self::Incomplete {
            kind,
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this error was raised because the dialect lacks a feature
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Check if this error was raised while rendering (as opposed to construction)
    pub fn is_render_error(&self) -> bool {
        matches!(
            self,
            Self::UnqualifiedField(_) | Self::InvalidLiteral(_) | Self::Incomplete { .. }
        )
    }
}

impl From<serde_json::Error> for SqlError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
