//! Error types for pgeasy

use thiserror::Error;

/// Result type alias for pgeasy operations
pub type EasyResult<T> = Result<T, EasyError>;

/// Misuse of the begin/commit/rollback sequence on a [`Session`](crate::Session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// `begin_transaction` while a transaction is already open
    #[error("transaction is already active")]
    AlreadyActive,

    /// `commit_transaction` / `rollback_transaction` without an open transaction
    #[error("no active transaction")]
    NoActiveTransaction,
}

/// Error types for building and executing queries
#[derive(Debug, Error)]
pub enum EasyError {
    /// No usable database connection
    #[error("Connection error: {0}")]
    Connection(String),

    /// The rendered SQL was empty, so there was nothing to submit
    #[error("Empty query: not enough arguments to render a statement")]
    EmptyQuery,

    /// The driver rejected the statement
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Transaction sequencing error (caller misuse, not a driver failure)
    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl EasyError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Check if this is a transaction sequencing error
    pub fn is_transaction_error(&self) -> bool {
        matches!(self, Self::Transaction(_))
    }

    /// Check if this error came from submitting an empty statement
    pub fn is_empty_query(&self) -> bool {
        matches!(self, Self::EmptyQuery)
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Wrap a tokio_postgres error, keeping the driver payload intact.
    ///
    /// Errors raised while the socket is closed are reported as connection errors.
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if err.is_closed() {
            return Self::Connection(err.to_string());
        }
        Self::Query(err)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for EasyError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_errors_are_distinct_from_query_errors() {
        let err = EasyError::from(TransactionError::AlreadyActive);
        assert!(err.is_transaction_error());
        assert!(!err.is_empty_query());
        assert_eq!(
            err.to_string(),
            "Transaction error: transaction is already active"
        );
    }

    #[test]
    fn empty_query_message() {
        let err = EasyError::EmptyQuery;
        assert!(err.is_empty_query());
        assert!(err.to_string().contains("not enough arguments"));
    }

    #[test]
    fn decode_helper_fills_fields() {
        let err = EasyError::decode("age", "bad int");
        assert_eq!(err.to_string(), "Decode error on column 'age': bad int");
    }
}
