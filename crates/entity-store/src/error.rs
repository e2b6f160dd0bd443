use thiserror::Error;

/// Errors that can occur when interacting with the entity store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write was rejected by a schema rule (not-null, foreign key, unique).
    #[error("Constraint violation on {table}: {message}")]
    ConstraintViolation {
        table: &'static str,
        message: String,
    },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub(crate) fn constraint(table: &'static str, message: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            table,
            message: message.into(),
        }
    }
}

/// Result type for entity store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
