use agenda_core::error::ValidationErrors;
use agenda_core::model::{Session, clock};
use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] agenda_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] agenda_core::error::CoreError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(
        "Conflicts with session {} on {} at {}",
        existing.id,
        existing.details.date,
        clock::format(existing.details.start)
    )]
    Conflict { existing: Box<Session> },

    #[error("Session belongs to a series of {group_size}; a scope is required")]
    ScopeRequired { group_size: usize },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{succeeded} of {attempted} writes succeeded")]
    PartialBatch {
        succeeded: usize,
        attempted: usize,
        #[source]
        source: agenda_db::error::DbError,
    },

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl ServiceError {
    #[must_use]
    pub fn conflict(existing: &Session) -> Self {
        Self::Conflict {
            existing: Box::new(existing.clone()),
        }
    }

    #[must_use]
    pub fn session_not_found(id: uuid::Uuid) -> Self {
        Self::NotFound(format!("session {id}"))
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
