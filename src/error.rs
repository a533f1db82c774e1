//! Error types for the users table gateway.
//!
//! Two categories reach callers of the gateway: the provider could not hand
//! out a connection, or the engine failed a statement. A third category is
//! only produced while parsing bootstrap configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Connection failed: {message}")]
    Connection { message: String, suggestion: String },

    #[error("Storage failure: {message}")]
    Storage {
        message: String,
        /// e.g., "42S02" for a missing table on MySQL
        sql_state: Option<String>,
    },

    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

impl DbError {
    /// Create a connection error with a helpful suggestion.
    pub fn connection(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a storage error with optional SQL state.
    pub fn storage(message: impl Into<String>, sql_state: Option<String>) -> Self {
        Self::Storage {
            message: message.into(),
            sql_state,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get the suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Connection { suggestion, .. } => Some(suggestion),
            _ => None,
        }
    }

    /// SQLSTATE reported by the engine, if any.
    pub fn sql_state(&self) -> Option<&str> {
        match self {
            Self::Storage { sql_state, .. } => sql_state.as_deref(),
            _ => None,
        }
    }

    /// Whether the provider failed to supply a connection.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

/// Convert statement-time sqlx errors to `DbError::Storage`.
///
/// Connectivity lost in the middle of a statement is still a storage failure;
/// only the provider produces `Connection` errors.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                DbError::storage(db_err.message(), code)
            }
            sqlx::Error::RowNotFound => DbError::storage("No rows returned", None),
            sqlx::Error::Io(io_err) => DbError::storage(format!("I/O error: {}", io_err), None),
            sqlx::Error::Protocol(msg) => {
                DbError::storage(format!("Protocol error: {}", msg), None)
            }
            sqlx::Error::ColumnNotFound(col) => {
                DbError::storage(format!("Column not found: {}", col), None)
            }
            sqlx::Error::ColumnDecode { index, source } => DbError::storage(
                format!("Failed to decode column {}: {}", index, source),
                None,
            ),
            sqlx::Error::Decode(source) => {
                DbError::storage(format!("Decode error: {}", source), None)
            }
            sqlx::Error::PoolTimedOut => {
                DbError::storage("Timed out waiting for a pooled connection", None)
            }
            sqlx::Error::PoolClosed => DbError::storage("Connection pool is closed", None),
            sqlx::Error::WorkerCrashed => DbError::storage("Database worker crashed", None),
            _ => DbError::storage(format!("Unknown database error: {}", err), None),
        }
    }
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;
