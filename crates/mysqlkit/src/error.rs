//! Error types for mysqlkit

use thiserror::Error;

/// Result type alias for mysqlkit operations
pub type DbResult<T> = Result<T, DbError>;

/// Boxed native driver error carried by [`DbError::QueryExecution`].
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for query building and execution.
///
/// Every variant maps to a stable machine-readable code via [`DbError::code`].
#[derive(Debug, Error)]
pub enum DbError {
    /// A condition or payload value is not a string or a number.
    #[error("Condition type error: {0}")]
    ConditionType(String),

    /// A required table name, payload, delete condition or schema is empty.
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// An operation ran on a facade that has no connection pool yet.
    #[error("Not initialized: no connection pool attached")]
    NotInitialized,

    /// The pool could not hand out a connection (timeout or closed pool).
    #[error("Pool exhausted: {0}")]
    PoolExhausted(String),

    /// A physical connection could not be opened.
    #[error("Network error: {0}")]
    Network(String),

    /// The engine rejected the statement. Wraps the native driver error.
    #[error("Query error: {0}")]
    QueryExecution(#[source] DriverError),

    /// Invalid connection configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },
}

impl DbError {
    /// Stable error code, suitable for logs and API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConditionType(_) => "condition_type_error",
            Self::MissingRequiredField(_) => "missing_required_field",
            Self::NotInitialized => "not_initialized",
            Self::PoolExhausted(_) => "pool_exhausted",
            Self::Network(_) => "network_error",
            Self::QueryExecution(_) => "query_execution_error",
            Self::Config(_) => "config_error",
            Self::Decode { .. } => "decode_error",
        }
    }

    /// Create a condition type error
    pub fn condition_type(message: impl Into<String>) -> Self {
        Self::ConditionType(message.into())
    }

    /// Create a missing required field error
    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::MissingRequiredField(message.into())
    }

    /// Wrap a native driver error as a query execution error
    pub fn query_execution<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::QueryExecution(Box::new(err))
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// True for errors raised before any connection was acquired.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ConditionType(_) | Self::MissingRequiredField(_) | Self::Config(_)
        )
    }

    /// Check if this is a not initialized error
    pub fn is_not_initialized(&self) -> bool {
        matches!(self, Self::NotInitialized)
    }

    /// Check if this is a query execution error
    pub fn is_query_execution(&self) -> bool {
        matches!(self, Self::QueryExecution(_))
    }

    /// Borrow the underlying sqlx error of a [`DbError::QueryExecution`], if any.
    #[cfg(feature = "mysql")]
    pub fn as_sqlx_error(&self) -> Option<&sqlx::Error> {
        match self {
            Self::QueryExecution(inner) => inner.downcast_ref::<sqlx::Error>(),
            _ => None,
        }
    }
}

#[cfg(feature = "mysql")]
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(e) => Self::Config(e.to_string()),
            sqlx::Error::Io(e) => Self::Network(e.to_string()),
            sqlx::Error::Tls(e) => Self::Network(e.to_string()),
            sqlx::Error::ColumnDecode { index, source } => Self::decode(index, source.to_string()),
            sqlx::Error::ColumnNotFound(column) => Self::decode(column, "column not found"),
            other => Self::query_execution(other),
        }
    }
}

#[cfg(feature = "mysql")]
impl From<deadpool::managed::PoolError<sqlx::Error>> for DbError {
    fn from(err: deadpool::managed::PoolError<sqlx::Error>) -> Self {
        use deadpool::managed::PoolError;

        match err {
            PoolError::Timeout(kind) => {
                Self::PoolExhausted(format!("timed out waiting for a connection ({kind:?})"))
            }
            PoolError::Closed => Self::PoolExhausted("pool is closed".to_string()),
            PoolError::NoRuntimeSpecified => {
                Self::Config("acquire timeout requires a tokio runtime".to_string())
            }
            other => Self::Network(other.to_string()),
        }
    }
}
