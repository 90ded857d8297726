/// Core error types for Moon
use thiserror::Error;

/// Result type alias using `MoonError`
pub type Result<T> = std::result::Result<T, MoonError>;

/// Core error type for Moon
#[derive(Error, Debug)]
pub enum MoonError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint hit (e.g. username already taken)
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl MoonError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for MoonError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return Self::Duplicate(db_err.message().to_string());
            }
        }
        Self::Database(err.to_string())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::migrate::MigrateError> for MoonError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Database(format!("migration failed: {err}"))
    }
}
