mod app_specific;
mod sessions;

use salvo::Router;

use crate::middleware::auth::AuthMiddleware;

// Re-export route constants from core
pub use agenda_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, APP_ROUTE_COMPONENT, APP_ROUTE_PREFIX,
    SESSIONS_ROUTE_COMPONENT, SESSIONS_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the main API router.
///
/// Every route sits behind [`AuthMiddleware`], which expects the
/// configuration and booking service to be in the depot already.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .hoop(AuthMiddleware)
        .push(app_specific::routes())
        .push(sessions::routes())
}
