//! In-process engines for the session store and the registries.

use std::collections::HashMap;
use std::sync::Arc;

use agenda_core::config::DirectoryConfig;
use agenda_core::model::{ClientRecord, Session};
use tokio::sync::RwLock;

use super::{
    BatchReceipt, ClientDirectory, PhotographerDirectory, SessionStore, StoreFuture, WriteBatch,
};
use crate::error::DbError;

/// ## Summary
/// Session store backed by a map behind an async `RwLock`.
///
/// Batches are applied under a single write guard and validated before any
/// change is made, which gives them the same all-or-nothing behavior as a
/// database transaction.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<uuid::Uuid, Session>>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sessions(sessions: impl IntoIterator<Item = Session>) -> Self {
        let map = sessions
            .into_iter()
            .map(|session| (session.id, session))
            .collect();
        Self {
            sessions: Arc::new(RwLock::new(map)),
        }
    }

    /// Every stored session regardless of owner, ordered by date then start time.
    pub async fn snapshot(&self) -> Vec<Session> {
        let mut all: Vec<Session> = self.sessions.read().await.values().cloned().collect();
        all.sort_by_key(|session| (session.details.date, session.details.start, session.id));
        all
    }
}

impl SessionStore for MemorySessionStore {
    fn list(&self, owner_id: uuid::Uuid) -> StoreFuture<'_, Vec<Session>> {
        Box::pin(async move {
            let mut owned: Vec<Session> = self
                .sessions
                .read()
                .await
                .values()
                .filter(|session| session.owner_id == owner_id)
                .cloned()
                .collect();
            owned.sort_by_key(|session| {
                std::cmp::Reverse((session.details.date, session.details.start, session.id))
            });
            Ok(owned)
        })
    }

    fn get(&self, owner_id: uuid::Uuid, id: uuid::Uuid) -> StoreFuture<'_, Option<Session>> {
        Box::pin(async move {
            Ok(self
                .sessions
                .read()
                .await
                .get(&id)
                .filter(|session| session.owner_id == owner_id)
                .cloned())
        })
    }

    fn insert<'a>(&'a self, session: &'a Session) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut sessions = self.sessions.write().await;
            if sessions.contains_key(&session.id) {
                return Err(DbError::DuplicateId(session.id));
            }
            sessions.insert(session.id, session.clone());
            Ok(())
        })
    }

    fn update<'a>(&'a self, session: &'a Session) -> StoreFuture<'a, bool> {
        Box::pin(async move {
            let mut sessions = self.sessions.write().await;
            match sessions.get_mut(&session.id) {
                Some(stored) if stored.owner_id == session.owner_id => {
                    *stored = session.clone();
                    Ok(true)
                }
                _ => Ok(false),
            }
        })
    }

    fn delete(&self, owner_id: uuid::Uuid, id: uuid::Uuid) -> StoreFuture<'_, bool> {
        Box::pin(async move {
            let mut sessions = self.sessions.write().await;
            if sessions
                .get(&id)
                .is_some_and(|session| session.owner_id == owner_id)
            {
                sessions.remove(&id);
                return Ok(true);
            }
            Ok(false)
        })
    }

    fn commit<'a>(&'a self, batch: &'a WriteBatch) -> StoreFuture<'a, BatchReceipt> {
        Box::pin(async move {
            let mut sessions = self.sessions.write().await;

            let deletable: Vec<uuid::Uuid> = batch
                .deletes
                .iter()
                .copied()
                .filter(|id| {
                    sessions
                        .get(id)
                        .is_some_and(|session| session.owner_id == batch.owner_id)
                })
                .collect();
            for session in &batch.inserts {
                let survives_deletes = !deletable.contains(&session.id);
                if sessions.contains_key(&session.id) && survives_deletes {
                    return Err(DbError::DuplicateId(session.id));
                }
            }

            for id in &deletable {
                sessions.remove(id);
            }
            for session in &batch.inserts {
                sessions.insert(session.id, session.clone());
            }

            Ok(BatchReceipt {
                deleted: deletable.len(),
                inserted: batch.inserts.len(),
            })
        })
    }
}

/// ## Summary
/// Client and photographer registries held in memory, seeded from configuration.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    clients: Arc<HashMap<uuid::Uuid, ClientRecord>>,
    photographers: Arc<Vec<String>>,
}

impl MemoryDirectory {
    #[must_use]
    pub fn new(
        clients: impl IntoIterator<Item = ClientRecord>,
        photographers: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            clients: Arc::new(
                clients
                    .into_iter()
                    .map(|client| (client.id, client))
                    .collect(),
            ),
            photographers: Arc::new(photographers.into_iter().collect()),
        }
    }

    #[must_use]
    pub fn from_config(config: &DirectoryConfig) -> Self {
        Self::new(config.clients.clone(), config.photographers.clone())
    }
}

impl ClientDirectory for MemoryDirectory {
    fn find_client(&self, id: uuid::Uuid) -> StoreFuture<'_, Option<ClientRecord>> {
        Box::pin(async move { Ok(self.clients.get(&id).cloned()) })
    }
}

impl PhotographerDirectory for MemoryDirectory {
    fn photographer_names(&self) -> StoreFuture<'_, Vec<String>> {
        Box::pin(async move { Ok(self.photographers.as_ref().clone()) })
    }
}
