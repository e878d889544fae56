use thiserror::Error;

pub type DbResult<T> = Result<T, DatabaseError>;

/// Database error type shared by the payments repository and the event store.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("{entity} with id '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("a record with {column} '{value}' already exists")]
    UniqueViolation { column: String, value: String },

    #[error("database query failed: {message}")]
    Query { message: String },

    #[error("database connection error: {message}")]
    Connection { message: String },

    #[error("database connection pool exhausted")]
    PoolExhausted,

    #[error("database configuration error: {message}")]
    Configuration { message: String },

    #[error("unexpected database error: {message}")]
    Unknown { message: String },
}

impl DatabaseError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::PoolExhausted)
    }

    /// Map a sqlx error into our taxonomy. Constraint details beyond the
    /// Postgres error code are not recoverable from sqlx, so the violation
    /// variants carry placeholders.
    pub fn from_sqlx(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::not_found("record", "unknown"),
            sqlx::Error::PoolTimedOut => Self::PoolExhausted,
            sqlx::Error::PoolClosed => Self::Connection {
                message: "connection pool is closed".to_string(),
            },
            sqlx::Error::Configuration(msg) => Self::Configuration {
                message: msg.to_string(),
            },
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some("23505") => Self::UniqueViolation {
                    column: "unknown".to_string(),
                    value: "provided value".to_string(),
                },
                _ => Self::Query {
                    message: db_err.message().to_string(),
                },
            },
            sqlx::Error::Io(io_err) => Self::Connection {
                message: io_err.to_string(),
            },
            _ => Self::Unknown {
                message: error.to_string(),
            },
        }
    }
}
