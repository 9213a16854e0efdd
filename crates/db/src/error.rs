//! Errors surfaced by the repository layer.

use thiserror::Error;

/// Repository error kinds.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    #[error("{entity} '{key}' already exists")]
    Duplicate { entity: &'static str, key: String },

    #[error("password hashing failed: {0}")]
    Password(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn duplicate(entity: &'static str, key: impl ToString) -> Self {
        Self::Duplicate {
            entity,
            key: key.to_string(),
        }
    }

    /// Map a unique constraint violation to `Duplicate`, anything else to `Database`.
    pub fn from_insert(err: sqlx::Error, entity: &'static str, key: impl ToString) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::duplicate(entity, key)
            }
            _ => Self::Database(err),
        }
    }
}
