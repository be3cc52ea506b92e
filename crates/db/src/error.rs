use giapha_core::error::CoreError;

/// Errors surfaced by store adapters.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write (e.g. a duplicate handle).
    #[error("Duplicate value violates unique constraint: {0}")]
    Conflict(String),

    /// The adapter refused the request before it reached the database.
    #[error(transparent)]
    Rejected(#[from] CoreError),

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Failure from a non-SQL backend (in-memory fakes, injected faults).
    #[error("Store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    /// PostgreSQL unique violations (SQLSTATE 23505) become
    /// [`StoreError::Conflict`]; everything else is kept as-is.
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return StoreError::Conflict(constraint);
            }
        }
        StoreError::Database(err)
    }
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_stays_a_database_error() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(sqlx::Error::RowNotFound)));
        assert!(!err.is_conflict());
    }

    #[test]
    fn conflict_is_detected() {
        assert!(StoreError::Conflict("uq_people_handle".into()).is_conflict());
    }
}
