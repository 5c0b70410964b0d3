//! Database-specific error types and conversions.

use meridian_core::error::CrmError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Invalid stored data: {0}")]
    Data(String),
}

impl From<DbError> for CrmError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => CrmError::NotFound { entity, id },
            other => CrmError::Database(other.to_string()),
        }
    }
}
