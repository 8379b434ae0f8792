//! Error types for the rowseek crate.

use thiserror::Error;

/// Errors that can occur when compiling or evaluating a query.
///
/// Every variant is a query-level failure: a filtering pass that hits one
/// of these is abandoned as a whole and no row visibility is changed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeekError {
    /// The surface query could not be rewritten (e.g. an unmatched `|`).
    #[error("malformed query `{query}`: {reason}")]
    MalformedQuery { query: String, reason: String },

    /// The rewritten expression does not follow the expression grammar.
    #[error("parse error at offset {position}: {message}")]
    Parse { position: usize, message: String },

    /// A column reference points past the end of the row.
    #[error("column ${column} is out of range (row has {width} columns)")]
    ColumnOutOfRange { column: usize, width: usize },
}

impl SeekError {
    pub(crate) fn malformed(query: &str, reason: impl Into<String>) -> Self {
        SeekError::MalformedQuery {
            query: query.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(position: usize, message: impl Into<String>) -> Self {
        SeekError::Parse {
            position,
            message: message.into(),
        }
    }
}

/// Result type for rowseek operations.
pub type Result<T> = std::result::Result<T, SeekError>;
