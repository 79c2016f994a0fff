//! PostgreSQL engines backed by diesel-async.

use agenda_core::model::{ClientRecord, Session};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::Instrument;

use super::connection::{DbConnection, DbPool};
use super::schema::{booking_session, registry_client, registry_photographer};
use super::{
    BatchReceipt, ClientDirectory, PhotographerDirectory, SessionStore, StoreFuture, WriteBatch,
};
use crate::error::{DbError, DbResult};
use crate::model::registry::ClientRow;
use crate::model::session::SessionRow;

fn map_insert_error(err: DieselError, id: uuid::Uuid) -> DbError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DbError::DuplicateId(id)
        }
        other => DbError::DatabaseError(other),
    }
}

fn rows_into_sessions(rows: Vec<SessionRow>) -> DbResult<Vec<Session>> {
    rows.into_iter().map(Session::try_from).collect()
}

#[derive(Clone)]
pub struct PgSessionStore {
    pool: DbPool,
}

impl PgSessionStore {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn connection(&self) -> DbResult<DbConnection<'_>> {
        Ok(self.pool.get().await?)
    }
}

impl SessionStore for PgSessionStore {
    fn list(&self, owner_id: uuid::Uuid) -> StoreFuture<'_, Vec<Session>> {
        Box::pin(
            async move {
                let mut conn = self.connection().await?;
                let rows = booking_session::table
                    .filter(booking_session::owner_id.eq(owner_id))
                    .order((
                        booking_session::session_date.desc(),
                        booking_session::start_time.desc(),
                        booking_session::id.desc(),
                    ))
                    .select(SessionRow::as_select())
                    .load::<SessionRow>(&mut conn)
                    .await?;
                tracing::trace!(count = rows.len(), "Loaded sessions");
                rows_into_sessions(rows)
            }
            .instrument(tracing::debug_span!("session_list", %owner_id)),
        )
    }

    fn get(&self, owner_id: uuid::Uuid, id: uuid::Uuid) -> StoreFuture<'_, Option<Session>> {
        Box::pin(
            async move {
                let mut conn = self.connection().await?;
                let row = booking_session::table
                    .filter(booking_session::id.eq(id))
                    .filter(booking_session::owner_id.eq(owner_id))
                    .select(SessionRow::as_select())
                    .first::<SessionRow>(&mut conn)
                    .await
                    .optional()?;
                row.map(Session::try_from).transpose()
            }
            .instrument(tracing::debug_span!("session_get", %owner_id, %id)),
        )
    }

    fn insert<'a>(&'a self, session: &'a Session) -> StoreFuture<'a, ()> {
        Box::pin(
            async move {
                let mut conn = self.connection().await?;
                diesel::insert_into(booking_session::table)
                    .values(&SessionRow::from(session))
                    .execute(&mut conn)
                    .await
                    .map_err(|err| map_insert_error(err, session.id))?;
                Ok(())
            }
            .instrument(tracing::debug_span!("session_insert", session_id = %session.id)),
        )
    }

    fn update<'a>(&'a self, session: &'a Session) -> StoreFuture<'a, bool> {
        Box::pin(
            async move {
                let mut conn = self.connection().await?;
                let row = SessionRow::from(session);
                let changed = diesel::update(
                    booking_session::table
                        .filter(booking_session::id.eq(session.id))
                        .filter(booking_session::owner_id.eq(session.owner_id)),
                )
                .set(&row)
                .execute(&mut conn)
                .await?;
                Ok(changed > 0)
            }
            .instrument(tracing::debug_span!("session_update", session_id = %session.id)),
        )
    }

    fn delete(&self, owner_id: uuid::Uuid, id: uuid::Uuid) -> StoreFuture<'_, bool> {
        Box::pin(
            async move {
                let mut conn = self.connection().await?;
                let removed = diesel::delete(
                    booking_session::table
                        .filter(booking_session::id.eq(id))
                        .filter(booking_session::owner_id.eq(owner_id)),
                )
                .execute(&mut conn)
                .await?;
                Ok(removed > 0)
            }
            .instrument(tracing::debug_span!("session_delete", %owner_id, %id)),
        )
    }

    fn commit<'a>(&'a self, batch: &'a WriteBatch) -> StoreFuture<'a, BatchReceipt> {
        Box::pin(
            async move {
                let mut conn = self.connection().await?;
                let rows: Vec<SessionRow> = batch.inserts.iter().map(SessionRow::from).collect();

                let receipt = conn
                    .transaction::<_, DbError, _>(|tx| {
                        async move {
                            let deleted = if batch.deletes.is_empty() {
                                0
                            } else {
                                diesel::delete(
                                    booking_session::table
                                        .filter(booking_session::owner_id.eq(batch.owner_id))
                                        .filter(booking_session::id.eq_any(&batch.deletes)),
                                )
                                .execute(tx)
                                .await?
                            };

                            for row in &rows {
                                diesel::insert_into(booking_session::table)
                                    .values(row)
                                    .execute(tx)
                                    .await
                                    .map_err(|err| map_insert_error(err, row.id))?;
                            }

                            Ok(BatchReceipt {
                                deleted,
                                inserted: rows.len(),
                            })
                        }
                        .scope_boxed()
                    })
                    .await?;

                tracing::debug!(?receipt, "Batch committed");
                Ok(receipt)
            }
            .instrument(tracing::debug_span!(
                "session_commit",
                owner_id = %batch.owner_id,
                deletes = batch.deletes.len(),
                inserts = batch.inserts.len()
            )),
        )
    }
}

/// ## Summary
/// Registry lookups against the `registry_client` and `registry_photographer` tables.
#[derive(Clone)]
pub struct PgDirectory {
    pool: DbPool,
}

impl PgDirectory {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ClientDirectory for PgDirectory {
    fn find_client(&self, id: uuid::Uuid) -> StoreFuture<'_, Option<ClientRecord>> {
        Box::pin(
            async move {
                let mut conn = self.pool.get().await?;
                let row = registry_client::table
                    .find(id)
                    .select(ClientRow::as_select())
                    .first::<ClientRow>(&mut conn)
                    .await
                    .optional()?;
                Ok(row.map(ClientRecord::from))
            }
            .instrument(tracing::debug_span!("client_lookup", %id)),
        )
    }
}

impl PhotographerDirectory for PgDirectory {
    fn photographer_names(&self) -> StoreFuture<'_, Vec<String>> {
        Box::pin(
            async move {
                let mut conn = self.pool.get().await?;
                let names = registry_photographer::table
                    .order(registry_photographer::name.asc())
                    .select(registry_photographer::name)
                    .load::<String>(&mut conn)
                    .await?;
                Ok(names)
            }
            .instrument(tracing::debug_span!("photographer_names")),
        )
    }
}
