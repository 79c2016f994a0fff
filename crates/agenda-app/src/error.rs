use agenda_core::error::{CoreError, ValidationErrors};
use agenda_core::model::clock;
use agenda_service::error::ServiceError;
use salvo::http::StatusCode;
use salvo::prelude::Json;
use serde_json::{Value, json};
use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] agenda_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl AppError {
    /// A request that failed validation at the HTTP boundary.
    #[must_use]
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.push(field, message);
        Self::ServiceError(ServiceError::Validation(errors))
    }

    /// ## Summary
    /// Status code and JSON body reported to the caller.
    ///
    /// Internal failures are logged here and reported without detail.
    #[must_use]
    pub fn response(&self) -> (StatusCode, Value) {
        match self {
            Self::ServiceError(ServiceError::Validation(errors))
            | Self::CoreError(CoreError::ValidationError(errors))
            | Self::ServiceError(ServiceError::CoreError(CoreError::ValidationError(errors))) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": errors.to_string(),
                    "fields": errors.fields(),
                    "details": errors.errors(),
                }),
            ),
            Self::ServiceError(err @ ServiceError::Conflict { existing }) => (
                StatusCode::CONFLICT,
                json!({
                    "error": err.to_string(),
                    "conflict": {
                        "id": existing.id,
                        "date": existing.details.date,
                        "start": clock::format(existing.details.start),
                        "category": existing.details.category,
                    },
                }),
            ),
            Self::ServiceError(err @ ServiceError::ScopeRequired { group_size }) => (
                StatusCode::PRECONDITION_REQUIRED,
                json!({ "error": err.to_string(), "group_size": group_size }),
            ),
            Self::ServiceError(err @ ServiceError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, json!({ "error": err.to_string() }))
            }
            Self::ServiceError(ServiceError::NotAuthenticated) => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Not authenticated" }),
            ),
            Self::ServiceError(
                err @ ServiceError::PartialBatch {
                    succeeded,
                    attempted,
                    ..
                },
            ) => {
                tracing::error!(error = ?err, "Batch partially applied");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": err.to_string(),
                        "succeeded": succeeded,
                        "attempted": attempted,
                    }),
                )
            }
            other => {
                tracing::error!(error = ?other, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error" }),
                )
            }
        }
    }

    pub fn render(&self, res: &mut salvo::Response) {
        let (status, body) = self.response();
        res.status_code(status);
        res.render(Json(body));
    }
}
