use std::sync::Arc;

pub use agenda_core::config::*;
use salvo::async_trait;

use crate::error::{AppError, AppResult};

/// ## Summary
/// Hoop that hands the loaded [`Settings`] to every booking request.
///
/// One `Arc` is shared by all requests for the life of the server.
pub struct ConfigHandler {
    settings: Arc<Settings>,
}

impl ConfigHandler {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}

#[async_trait]
impl salvo::Handler for ConfigHandler {
    #[tracing::instrument(skip_all)]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.settings));
    }
}

/// ## Summary
/// Settings for the current request, as injected by [`ConfigHandler`].
///
/// ## Errors
/// Returns an invariant violation when the router was built without a
/// [`ConfigHandler`] in front of the booking routes.
pub fn get_config_from_depot(depot: &salvo::Depot) -> AppResult<Arc<Settings>> {
    depot.obtain::<Arc<Settings>>().cloned().map_err(|_err| {
        AppError::CoreError(agenda_core::error::CoreError::InvariantViolation(
            "booking settings missing from depot",
        ))
    })
}
