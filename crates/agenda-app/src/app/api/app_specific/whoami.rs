use salvo::prelude::Json;
use salvo::{Depot, Response, Router, handler};

use agenda_service::auth::get_actor_from_depot;

use crate::error::AppError;

/// ## Summary
/// Returns the authenticated actor as JSON.
/// The actor is stored in the depot by the `AuthMiddleware`.
#[handler]
async fn whoami(depot: &Depot, res: &mut Response) {
    match get_actor_from_depot(depot) {
        Ok(actor) => res.render(Json(actor.clone())),
        Err(err) => AppError::from(err).render(res),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("whoami").get(whoami)
}
