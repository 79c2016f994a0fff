use salvo::Depot;
use salvo::http::StatusCode;
use tracing::error;

use crate::config::get_config_from_depot;
use crate::error::AppError;
use agenda_service::auth::{authenticate, depot::insert_actor};
use agenda_service::error::ServiceError;

/// ## Summary
/// Authentication middleware that resolves the acting user and stores it in the depot.
///
/// ## Side Effects
/// Inserts the `Actor` into the depot for downstream handlers to access.
///
/// ## Errors
/// Returns an HTTP 401 response when no user can be resolved, and 500 when
/// authentication is misconfigured.
#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        tracing::trace!("Authenticating request");

        let config = match get_config_from_depot(depot) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(error = ?e, "Failed to get config from depot");
                res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
                return;
            }
        };

        match authenticate(req, &config) {
            Ok(actor) => {
                tracing::debug!(actor_email = %actor.email, "Actor authenticated");
                insert_actor(depot, actor);
            }
            Err(ServiceError::NotAuthenticated) => {
                tracing::debug!("Request not authenticated");
                AppError::from(ServiceError::NotAuthenticated).render(res);
                ctrl.skip_rest();
            }
            Err(service_err) => {
                error!(error = ?service_err, "Authentication failed with error");
                res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                res.body("Internal Server Error");
                ctrl.skip_rest();
            }
        }
    }
}

/// ## Summary
/// Middleware handler for authentication.
/// Use this as a handler in routes to protect them with authentication.
pub struct AuthMiddleware;
