//! Storage traits and their engines.
//!
//! ## Summary
//! `SessionStore` is the persistence boundary of the booking core. It is
//! object safe so the HTTP layer can hold an `Arc<dyn SessionStore>` and swap
//! the in-memory engine for PostgreSQL through configuration alone.

use agenda_core::model::{ClientRecord, Session};
use futures::future::BoxFuture;

use crate::error::DbResult;

pub mod connection;
pub mod enums;
pub mod memory;
pub mod migrate;
pub mod pg;
pub mod schema;

pub type StoreFuture<'a, T> = BoxFuture<'a, DbResult<T>>;

/// ## Summary
/// Writes that must land together: every delete, then every insert.
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    pub owner_id: uuid::Uuid,
    pub deletes: Vec<uuid::Uuid>,
    pub inserts: Vec<Session>,
}

impl WriteBatch {
    #[must_use]
    pub const fn new(owner_id: uuid::Uuid) -> Self {
        Self {
            owner_id,
            deletes: Vec::new(),
            inserts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty() && self.inserts.is_empty()
    }
}

/// Outcome of a committed batch. Deletes of ids that no longer exist are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReceipt {
    pub deleted: usize,
    pub inserted: usize,
}

pub trait SessionStore: Send + Sync {
    /// All sessions owned by `owner_id`, latest date first.
    fn list(&self, owner_id: uuid::Uuid) -> StoreFuture<'_, Vec<Session>>;

    fn get(&self, owner_id: uuid::Uuid, id: uuid::Uuid) -> StoreFuture<'_, Option<Session>>;

    /// Fails with `DbError::DuplicateId` if the id is taken.
    fn insert<'a>(&'a self, session: &'a Session) -> StoreFuture<'a, ()>;

    /// Replaces the stored record. Returns `false` when it no longer exists.
    fn update<'a>(&'a self, session: &'a Session) -> StoreFuture<'a, bool>;

    /// Returns `false` when there was nothing to delete.
    fn delete(&self, owner_id: uuid::Uuid, id: uuid::Uuid) -> StoreFuture<'_, bool>;

    /// Applies the whole batch or nothing.
    fn commit<'a>(&'a self, batch: &'a WriteBatch) -> StoreFuture<'a, BatchReceipt>;
}

/// Read-only lookup into the client registry.
pub trait ClientDirectory: Send + Sync {
    fn find_client(&self, id: uuid::Uuid) -> StoreFuture<'_, Option<ClientRecord>>;
}

/// Read-only lookup into the photographer registry.
pub trait PhotographerDirectory: Send + Sync {
    fn photographer_names(&self) -> StoreFuture<'_, Vec<String>>;
}
