//! Connection pool behind the PostgreSQL booking store.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

use crate::error::{DbError, DbResult};

/// Pool shared by the session store and the registry directory.
pub type DbPool = Pool<AsyncPgConnection>;
pub type DbConnection<'pool> = PooledConnection<'pool, AsyncPgConnection>;

const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// ## Summary
/// Opens up to `size` connections for booking storage, keeping one warm.
///
/// A request that cannot check out a connection within five seconds fails
/// with a pool error instead of queueing behind a stalled database.
///
/// ## Errors
/// Returns `DbError::Unavailable` if the first connection cannot be opened.
#[tracing::instrument(skip(database_url), fields(pool_size = size))]
pub async fn create_pool(database_url: &str, size: u32) -> DbResult<DbPool> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);

    let pool = Pool::builder()
        .max_size(size)
        .min_idle(Some(1))
        .connection_timeout(CHECKOUT_TIMEOUT)
        .test_on_check_out(false)
        .build(manager)
        .await
        .map_err(|err| DbError::Unavailable(format!("cannot open booking database: {err}")))?;

    tracing::info!(pool_size = size, "Booking database pool ready");
    Ok(pool)
}
