use std::sync::Arc;

use agenda_core::config::{Settings, StorageBackend};
use agenda_core::error::CoreError;
use agenda_db::db::connection::create_pool;
use agenda_db::db::memory::{MemoryDirectory, MemorySessionStore};
use agenda_db::db::migrate::run_migrations;
use agenda_db::db::pg::{PgDirectory, PgSessionStore};
use agenda_service::booking::BookingService;
use salvo::async_trait;

use crate::error::AppResult;

pub struct BookingHandler {
    pub service: BookingService,
}

#[async_trait]
impl salvo::Handler for BookingHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        let service: Arc<BookingService> = Arc::new(self.service.clone());
        depot.inject(service);
    }
}

/// ## Summary
/// Retrieves the booking service from the depot.
///
/// ## Errors
/// Returns an error if the booking service is not found in the depot.
pub fn get_booking_from_depot(depot: &salvo::Depot) -> AppResult<Arc<BookingService>> {
    depot
        .obtain::<Arc<BookingService>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Booking service not found in depot").into())
}

/// ## Summary
/// Builds the booking service on the configured storage backend.
///
/// The memory backend seeds its registries from the `directory` section.
/// The postgres backend runs pending migrations before opening the pool.
///
/// ## Errors
/// Returns an error if the database URL is missing, migrations fail, or the
/// pool cannot be created.
#[tracing::instrument(skip(settings), fields(backend = ?settings.storage.backend))]
pub async fn build_booking_service(settings: &Settings) -> anyhow::Result<BookingService> {
    match settings.storage.backend {
        StorageBackend::Memory => {
            let directory = Arc::new(MemoryDirectory::from_config(&settings.directory));
            tracing::info!(
                clients = settings.directory.clients.len(),
                photographers = settings.directory.photographers.len(),
                "Using in-memory storage"
            );
            Ok(BookingService::new(
                Arc::new(MemorySessionStore::new()),
                directory.clone(),
                directory,
                settings.booking.clone(),
            ))
        }
        StorageBackend::Postgres => {
            let url = settings.database.require_url()?;
            run_migrations(url).await?;
            let pool = create_pool(url, u32::from(settings.database.max_connections)).await?;
            let directory = Arc::new(PgDirectory::new(pool.clone()));
            Ok(BookingService::new(
                Arc::new(PgSessionStore::new(pool)),
                directory.clone(),
                directory,
                settings.booking.clone(),
            ))
        }
    }
}
