use salvo::prelude::Json;
use salvo::{Depot, Response, Router, handler};
use serde::Serialize;

use agenda_core::config::StorageBackend;

use crate::config::get_config_from_depot;

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    storage: StorageBackend,
}

/// ## Summary
/// Liveness check for the booking server, reporting the storage engine it
/// was started with.
#[handler]
async fn healthcheck(depot: &Depot, res: &mut Response) {
    match get_config_from_depot(depot) {
        Ok(settings) => res.render(Json(Health {
            status: "ok",
            storage: settings.storage.backend,
        })),
        Err(err) => err.render(res),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("healthcheck").get(healthcheck)
}
