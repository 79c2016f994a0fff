use std::sync::Arc;

use agenda_core::model::SessionPayload;
use agenda_service::auth::get_actor_from_depot;
use agenda_service::booking::BookingService;
use serde::de::DeserializeOwned;

use crate::booking_handler::get_booking_from_depot;
use crate::error::{AppError, AppResult};

/// The booking service and the acting user's id.
pub(super) fn context(depot: &salvo::Depot) -> AppResult<(Arc<BookingService>, uuid::Uuid)> {
    let owner_id = get_actor_from_depot(depot)?.id;
    Ok((get_booking_from_depot(depot)?, owner_id))
}

pub(super) fn session_id(req: &salvo::Request) -> AppResult<uuid::Uuid> {
    req.param::<String>("id")
        .and_then(|raw| uuid::Uuid::parse_str(&raw).ok())
        .ok_or_else(|| AppError::invalid("id", "must be a UUID"))
}

/// ## Summary
/// Reads the optional `scope` query parameter as one of the scope enums.
///
/// ## Errors
/// Returns a validation error naming `scope` when the value is not recognised.
pub(super) fn scope<T: DeserializeOwned>(req: &salvo::Request) -> AppResult<Option<T>> {
    let Some(raw) = req.query::<String>("scope") else {
        return Ok(None);
    };
    serde_json::from_value(serde_json::Value::String(raw.clone()))
        .map(Some)
        .map_err(|_err| AppError::invalid("scope", format!("unknown scope '{raw}'")))
}

pub(super) async fn payload(req: &mut salvo::Request) -> AppResult<SessionPayload> {
    req.parse_json::<SessionPayload>().await.map_err(|err| {
        tracing::debug!(error = %err, "Rejected session body");
        AppError::invalid("body", format!("invalid session JSON: {err}"))
    })
}
