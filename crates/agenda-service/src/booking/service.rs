//! Session API over the store and the registries.

use std::sync::Arc;

use agenda_core::config::{BatchMode, BookingConfig};
use agenda_core::error::ValidationErrors;
use agenda_core::model::{ClientRecord, Session, SessionDetails, SessionDraft, SessionPayload};
use agenda_db::db::{ClientDirectory, PhotographerDirectory, SessionStore, WriteBatch};
use serde::Serialize;

use super::conflict::find_conflict;
use super::mutate::{DeleteScope, EditScope, plan_delete, plan_this_and_future};
use super::recurrence::{ExpandOptions, SkippedDate, expand};
use super::series::{SeriesGroup, group_of, group_sessions};
use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Outcome of a write operation.
///
/// `ids` are the sessions created or updated, `removed` the sessions deleted,
/// and `skipped` the generated dates dropped because of a collision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MutationReceipt {
    pub ids: Vec<uuid::Uuid>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<uuid::Uuid>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedDate>,
}

/// ## Summary
/// Orchestrates the session operations for one actor at a time.
///
/// Every operation reads the actor's sessions once and checks conflicts
/// against that snapshot. There is no lock across concurrent requests.
#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn SessionStore>,
    clients: Arc<dyn ClientDirectory>,
    photographers: Arc<dyn PhotographerDirectory>,
    config: BookingConfig,
}

impl BookingService {
    #[must_use]
    pub fn new(
        store: Arc<dyn SessionStore>,
        clients: Arc<dyn ClientDirectory>,
        photographers: Arc<dyn PhotographerDirectory>,
        config: BookingConfig,
    ) -> Self {
        Self {
            store,
            clients,
            photographers,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &BookingConfig {
        &self.config
    }

    fn expand_options(&self) -> ExpandOptions {
        ExpandOptions::from(&self.config)
    }

    /// ## Summary
    /// Books a session, expanding it into a series when it carries a rule.
    ///
    /// The seed is conflict-checked first and a collision is fatal. Generated
    /// dates that collide are skipped and reported in the receipt. Instances of
    /// one request share a fresh series id.
    ///
    /// ## Errors
    /// `Validation` for a rejected payload or unknown client id, `Conflict` when
    /// the seed collides, storage errors from the write.
    #[tracing::instrument(skip(self, payload))]
    pub async fn create(
        &self,
        owner_id: uuid::Uuid,
        payload: SessionPayload,
    ) -> ServiceResult<MutationReceipt> {
        let client = self.resolve_client(payload.client_id).await?;
        let mut draft = payload.into_draft(client.as_ref())?;
        self.check_occurrence_limit(&draft)?;
        self.retain_known_photographers(&mut draft.details).await?;

        let sessions = self.store.list(owner_id).await?;
        if let Some(existing) = find_conflict(&draft.details, &sessions, None) {
            tracing::debug!(existing_id = %existing.id, "Seed collides with an existing session");
            return Err(ServiceError::conflict(existing));
        }

        let expansion = expand(&draft, &sessions, self.expand_options());
        let series_id = (expansion.instances.len() > 1).then(uuid::Uuid::now_v7);
        let mut batch = WriteBatch::new(owner_id);
        batch.inserts = expansion
            .instances
            .into_iter()
            .map(|details| Session::new(owner_id, details, series_id))
            .collect();
        let ids: Vec<uuid::Uuid> = batch.inserts.iter().map(|session| session.id).collect();

        self.write(&batch).await?;
        tracing::info!(
            created = ids.len(),
            skipped = expansion.skipped.len(),
            ?series_id,
            "Sessions created"
        );
        Ok(MutationReceipt {
            ids,
            removed: Vec::new(),
            skipped: expansion.skipped,
        })
    }

    /// ## Summary
    /// Applies a partial update to a session.
    ///
    /// A session whose series has more than one member needs an explicit
    /// scope. Without a scope, an ungrouped session that receives a rule is
    /// expanded as a this-and-future edit; otherwise it is updated in place.
    ///
    /// ## Errors
    /// `NotFound`, `Validation`, `ScopeRequired`, `Conflict`, storage errors.
    #[tracing::instrument(skip(self, payload))]
    pub async fn update(
        &self,
        owner_id: uuid::Uuid,
        id: uuid::Uuid,
        payload: SessionPayload,
        scope: Option<EditScope>,
    ) -> ServiceResult<MutationReceipt> {
        let sessions = self.store.list(owner_id).await?;
        let current = sessions
            .iter()
            .find(|session| session.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::session_not_found(id))?;

        let client = self.resolve_client(payload.client_id).await?;
        let mut draft = payload.merge_into(&current.details, client.as_ref())?;
        self.check_occurrence_limit(&draft)?;
        self.retain_known_photographers(&mut draft.details).await?;

        let group_size = group_of(&sessions, id).map_or(1, |group| group.count);
        let scope = match scope {
            Some(scope) => scope,
            None if group_size > 1 => return Err(ServiceError::ScopeRequired { group_size }),
            None if draft.recurrence.is_some() => EditScope::ThisAndFuture,
            None => EditScope::OnlyThis,
        };
        tracing::debug!(?scope, group_size, "Resolved edit scope");

        match scope {
            EditScope::OnlyThis => self.update_in_place(&current, draft, &sessions).await,
            EditScope::ThisAndFuture => {
                let plan =
                    plan_this_and_future(&current, &draft, &sessions, self.expand_options())?;
                let ids = plan.inserted.iter().map(|session| session.id).collect();
                let batch = WriteBatch {
                    owner_id,
                    deletes: plan.removed.clone(),
                    inserts: plan.inserted,
                };
                self.write(&batch).await?;
                tracing::info!(
                    removed = plan.removed.len(),
                    inserted = batch.inserts.len(),
                    "Series tail rewritten"
                );
                Ok(MutationReceipt {
                    ids,
                    removed: plan.removed,
                    skipped: plan.skipped,
                })
            }
        }
    }

    async fn update_in_place(
        &self,
        current: &Session,
        draft: SessionDraft,
        sessions: &[Session],
    ) -> ServiceResult<MutationReceipt> {
        if let Some(existing) = find_conflict(&draft.details, sessions, Some(current.id)) {
            return Err(ServiceError::conflict(existing));
        }
        if draft.recurrence.is_some() {
            tracing::debug!("Recurrence ignored on a single-occurrence edit");
        }

        let updated = Session {
            details: draft.details,
            updated_at: chrono::Utc::now(),
            ..current.clone()
        };
        if !self.store.update(&updated).await? {
            return Err(ServiceError::session_not_found(updated.id));
        }
        tracing::info!(session_id = %updated.id, "Session updated");
        Ok(MutationReceipt {
            ids: vec![updated.id],
            ..MutationReceipt::default()
        })
    }

    /// ## Summary
    /// Deletes a session, its series' earliest member, or its whole series.
    ///
    /// ## Errors
    /// `NotFound` when `id` is not one of the actor's sessions, storage errors.
    #[tracing::instrument(skip(self))]
    pub async fn delete(
        &self,
        owner_id: uuid::Uuid,
        id: uuid::Uuid,
        scope: DeleteScope,
    ) -> ServiceResult<MutationReceipt> {
        let sessions = self.store.list(owner_id).await?;
        let target = sessions
            .iter()
            .find(|session| session.id == id)
            .ok_or_else(|| ServiceError::session_not_found(id))?;

        let mut batch = WriteBatch::new(owner_id);
        batch.deletes = plan_delete(target, &sessions, scope);
        self.write(&batch).await?;

        tracing::info!(removed = batch.deletes.len(), "Sessions deleted");
        Ok(MutationReceipt {
            removed: batch.deletes,
            ..MutationReceipt::default()
        })
    }

    /// ## Errors
    /// `NotFound` when `id` is not one of the actor's sessions.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, owner_id: uuid::Uuid, id: uuid::Uuid) -> ServiceResult<Session> {
        self.store
            .get(owner_id, id)
            .await?
            .ok_or_else(|| ServiceError::session_not_found(id))
    }

    /// The actor's sessions, latest date first.
    ///
    /// ## Errors
    /// Storage errors.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, owner_id: uuid::Uuid) -> ServiceResult<Vec<Session>> {
        Ok(self.store.list(owner_id).await?)
    }

    /// The actor's sessions grouped into series, earliest series first.
    ///
    /// ## Errors
    /// Storage errors.
    #[tracing::instrument(skip(self))]
    pub async fn list_groups(&self, owner_id: uuid::Uuid) -> ServiceResult<Vec<SeriesGroup>> {
        let sessions = self.store.list(owner_id).await?;
        Ok(group_sessions(&sessions))
    }

    fn check_occurrence_limit(&self, draft: &SessionDraft) -> ServiceResult<()> {
        let mut errors = ValidationErrors::new();
        if let Some(rule) = &draft.recurrence {
            rule.check_limit(self.config.max_occurrences_limit, &mut errors);
        }
        errors.into_result(()).map_err(ServiceError::from)
    }

    async fn resolve_client(
        &self,
        client_id: Option<uuid::Uuid>,
    ) -> ServiceResult<Option<ClientRecord>> {
        let Some(id) = client_id else {
            return Ok(None);
        };
        if let Some(record) = self.clients.find_client(id).await? {
            return Ok(Some(record));
        }
        let mut errors = ValidationErrors::new();
        errors.push("client_id", format!("unknown client {id}"));
        Err(errors.into())
    }

    /// Drops photographer names the registry does not know. An empty registry
    /// leaves the names untouched.
    async fn retain_known_photographers(&self, details: &mut SessionDetails) -> ServiceResult<()> {
        if details.photographers.is_empty() {
            return Ok(());
        }
        let known = self.photographers.photographer_names().await?;
        if known.is_empty() {
            return Ok(());
        }
        details.photographers.retain(|name| {
            let keep = known.contains(name);
            if !keep {
                tracing::warn!(photographer = %name, "Dropping photographer missing from registry");
            }
            keep
        });
        Ok(())
    }

    async fn write(&self, batch: &WriteBatch) -> ServiceResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        match self.config.batch_mode {
            BatchMode::Atomic => {
                let receipt = self.store.commit(batch).await?;
                tracing::debug!(?receipt, "Batch committed");
                Ok(())
            }
            BatchMode::Sequential => self.write_sequential(batch).await,
        }
    }

    async fn write_sequential(&self, batch: &WriteBatch) -> ServiceResult<()> {
        let attempted = batch.deletes.len() + batch.inserts.len();
        let mut succeeded = 0;
        let partial = |succeeded, source| {
            tracing::error!(succeeded, attempted, error = ?source, "Sequential write stopped");
            ServiceError::PartialBatch {
                succeeded,
                attempted,
                source,
            }
        };

        for id in &batch.deletes {
            if let Err(source) = self.store.delete(batch.owner_id, *id).await {
                return Err(partial(succeeded, source));
            }
            succeeded += 1;
        }
        for session in &batch.inserts {
            if let Err(source) = self.store.insert(session).await {
                return Err(partial(succeeded, source));
            }
            succeeded += 1;
        }
        Ok(())
    }
}
