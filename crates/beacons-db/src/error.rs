//! Database-specific error types and conversions.

use beacons_core::error::BeaconsError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Malformed stored record: {0}")]
    Decode(String),

    #[error("Could not encode value for storage: {0}")]
    Encode(String),

    /// A unique index rejected the write.
    #[error("Duplicate {entity}")]
    Duplicate { entity: String },

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for BeaconsError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => BeaconsError::NotFound { entity, id },
            DbError::Duplicate { entity } => BeaconsError::AlreadyExists { entity },
            other => BeaconsError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_maps_to_already_exists() {
        let err: BeaconsError = DbError::Duplicate {
            entity: "account_holder".into(),
        }
        .into();
        assert!(matches!(err, BeaconsError::AlreadyExists { entity } if entity == "account_holder"));
    }

    #[test]
    fn encode_failure_is_a_database_error() {
        let err: BeaconsError = DbError::Encode("bad map key".into()).into();
        assert!(matches!(err, BeaconsError::Database(msg) if msg.contains("encode")));
    }
}
