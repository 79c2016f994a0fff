#![allow(clippy::expect_used, clippy::unwrap_used)]
//! PostgreSQL storage tests.
//!
//! These run against a live database named by `TEST_DATABASE_URL` or
//! `DATABASE_URL` and are skipped when neither is set. Every test books under a
//! fresh owner so runs never see each other's rows.

use chrono::{NaiveDate, NaiveTime};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use agenda_test::component::db::connection::{DbPool, create_pool};
use agenda_test::component::db::migrate::run_migrations;
use agenda_test::component::db::pg::{PgDirectory, PgSessionStore};
use agenda_test::component::db::schema::{registry_client, registry_photographer};
use agenda_test::component::db::{
    BatchReceipt, ClientDirectory, PhotographerDirectory, SessionStore, WriteBatch,
};
use agenda_test::component::model::{
    ClientRef, Contact, Price, Session, SessionCategory, SessionDetails, SessionStatus,
};
use agenda_db::error::DbError;

fn database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL")
        .or_else(|_err| std::env::var("DATABASE_URL"))
        .ok()
}

/// Migrated pool, or `None` when no database is configured.
async fn test_pool() -> Option<DbPool> {
    let Some(url) = database_url() else {
        eprintln!("DATABASE_URL not set, skipping PostgreSQL test");
        return None;
    };
    run_migrations(&url)
        .await
        .expect("migrations should apply");
    Some(create_pool(&url, 2).await.expect("pool should build"))
}

fn session(owner_id: uuid::Uuid, day: u32, hour: u32) -> Session {
    Session::new(
        owner_id,
        SessionDetails {
            client: ClientRef::ByName("Ana Souza".to_string()),
            client_name: "Ana Souza".to_string(),
            contact: Contact {
                email: "ana@example.com".to_string(),
                phone: "555-0199".to_string(),
            },
            category: SessionCategory::Maternity,
            date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            start: NaiveTime::from_hms_opt(hour, 30, 0).unwrap(),
            end: NaiveTime::from_hms_opt(hour + 1, 30, 0),
            location: "Parque Ibirapuera".to_string(),
            city: "São Paulo".to_string(),
            description: "Outdoor shoot".to_string(),
            price: Price::from_cents(180_050),
            photographers: vec!["Bia".to_string(), "Caio".to_string()],
            status: SessionStatus::Pending,
            external_link: Some("https://gallery.example.com/ana".to_string()),
        },
        None,
    )
}

#[test_log::test(tokio::test)]
async fn test_pg_insert_list_get_round_trip() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PgSessionStore::new(pool);
    let owner = uuid::Uuid::now_v7();

    let early = session(owner, 2, 9);
    let late = session(owner, 20, 14);
    let mut registered = session(owner, 20, 14);
    registered.details.client = ClientRef::ById(uuid::Uuid::now_v7());
    registered.details.photographers = Vec::new();
    registered.series_id = Some(uuid::Uuid::now_v7());

    store.insert(&early).await.unwrap();
    store.insert(&late).await.unwrap();
    store.insert(&registered).await.unwrap();

    let fetched = store.get(owner, late.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, late.id);
    assert_eq!(fetched.owner_id, owner);
    assert_eq!(fetched.details, late.details);
    assert_eq!(fetched.details.photographers, vec!["Bia", "Caio"]);

    let fetched = store.get(owner, registered.id).await.unwrap().unwrap();
    assert_eq!(fetched.details, registered.details);
    assert_eq!(fetched.series_id, registered.series_id);

    let listed: Vec<uuid::Uuid> = store.list(owner).await.unwrap().iter().map(|s| s.id).collect();
    let (tie_first, tie_second) = if late.id > registered.id {
        (late.id, registered.id)
    } else {
        (registered.id, late.id)
    };
    assert_eq!(listed, vec![tie_first, tie_second, early.id]);
}

#[test_log::test(tokio::test)]
async fn test_pg_rows_are_scoped_to_owner() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PgSessionStore::new(pool);
    let owner = uuid::Uuid::now_v7();
    let intruder = uuid::Uuid::now_v7();

    let original = session(owner, 5, 10);
    store.insert(&original).await.unwrap();

    assert!(store.list(intruder).await.unwrap().is_empty());
    assert!(store.get(intruder, original.id).await.unwrap().is_none());
    assert!(!store.delete(intruder, original.id).await.unwrap());

    let mut hijacked = original.clone();
    hijacked.owner_id = intruder;
    hijacked.details.client_name = "Someone Else".to_string();
    hijacked.details.client = ClientRef::ByName("Someone Else".to_string());
    assert!(!store.update(&hijacked).await.unwrap());

    let kept = store.get(owner, original.id).await.unwrap().unwrap();
    assert_eq!(kept.details, original.details);

    let mut edited = original.clone();
    edited.details.status = SessionStatus::Completed;
    edited.details.photographers = vec!["Davi".to_string()];
    assert!(store.update(&edited).await.unwrap());
    let stored = store.get(owner, original.id).await.unwrap().unwrap();
    assert_eq!(stored.details, edited.details);

    assert!(store.delete(owner, original.id).await.unwrap());
    assert!(store.get(owner, original.id).await.unwrap().is_none());
}

#[test_log::test(tokio::test)]
async fn test_pg_insert_rejects_duplicate_id() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PgSessionStore::new(pool);
    let s = session(uuid::Uuid::now_v7(), 8, 11);
    store.insert(&s).await.unwrap();
    assert!(matches!(
        store.insert(&s).await,
        Err(DbError::DuplicateId(id)) if id == s.id
    ));
}

#[test_log::test(tokio::test)]
async fn test_pg_commit_applies_deletes_then_inserts() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PgSessionStore::new(pool);
    let owner = uuid::Uuid::now_v7();

    let old = [session(owner, 3, 9), session(owner, 10, 9)];
    for s in &old {
        store.insert(s).await.unwrap();
    }

    let mut batch = WriteBatch::new(owner);
    batch.deletes = old.iter().map(|s| s.id).collect();
    batch.deletes.push(uuid::Uuid::now_v7());
    batch.inserts = vec![session(owner, 4, 9), session(owner, 11, 9)];

    let receipt = store.commit(&batch).await.unwrap();
    assert_eq!(
        receipt,
        BatchReceipt {
            deleted: 2,
            inserted: 2,
        }
    );

    let mut listed: Vec<uuid::Uuid> = store.list(owner).await.unwrap().iter().map(|s| s.id).collect();
    listed.sort_unstable();
    let mut expected: Vec<uuid::Uuid> = batch.inserts.iter().map(|s| s.id).collect();
    expected.sort_unstable();
    assert_eq!(listed, expected);
}

#[test_log::test(tokio::test)]
async fn test_pg_commit_rolls_back_when_an_insert_fails() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PgSessionStore::new(pool);
    let owner = uuid::Uuid::now_v7();

    let doomed = session(owner, 3, 9);
    let existing = session(owner, 12, 9);
    store.insert(&doomed).await.unwrap();
    store.insert(&existing).await.unwrap();

    let fresh = session(owner, 4, 9);
    let mut batch = WriteBatch::new(owner);
    batch.deletes = vec![doomed.id];
    batch.inserts = vec![fresh.clone(), existing.clone()];

    assert!(matches!(
        store.commit(&batch).await,
        Err(DbError::DuplicateId(id)) if id == existing.id
    ));

    assert!(store.get(owner, doomed.id).await.unwrap().is_some());
    assert!(store.get(owner, fresh.id).await.unwrap().is_none());
    assert_eq!(store.list(owner).await.unwrap().len(), 2);
}

#[test_log::test(tokio::test)]
async fn test_pg_commit_only_deletes_own_rows() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PgSessionStore::new(pool);
    let owner = uuid::Uuid::now_v7();
    let other = uuid::Uuid::now_v7();

    let theirs = session(other, 6, 15);
    store.insert(&theirs).await.unwrap();

    let mut batch = WriteBatch::new(owner);
    batch.deletes = vec![theirs.id];
    let receipt = store.commit(&batch).await.unwrap();

    assert_eq!(receipt.deleted, 0);
    assert!(store.get(other, theirs.id).await.unwrap().is_some());
}

#[test_log::test(tokio::test)]
async fn test_pg_directory_reads_registries() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let client_id = uuid::Uuid::now_v7();
    let photographer = format!("Photographer {}", uuid::Uuid::now_v7());
    {
        let mut conn = pool.get().await.unwrap();
        diesel::insert_into(registry_client::table)
            .values((
                registry_client::id.eq(client_id),
                registry_client::name.eq("Beatriz Lima"),
                registry_client::email.eq("beatriz@example.com"),
                registry_client::phone.eq("555-0101"),
            ))
            .execute(&mut conn)
            .await
            .unwrap();
        diesel::insert_into(registry_photographer::table)
            .values((
                registry_photographer::id.eq(uuid::Uuid::now_v7()),
                registry_photographer::name.eq(&photographer),
            ))
            .execute(&mut conn)
            .await
            .unwrap();
    }

    let directory = PgDirectory::new(pool);
    let client = directory.find_client(client_id).await.unwrap().unwrap();
    assert_eq!(client.name, "Beatriz Lima");
    assert_eq!(client.email, "beatriz@example.com");
    assert_eq!(client.phone, "555-0101");
    assert!(
        directory
            .find_client(uuid::Uuid::now_v7())
            .await
            .unwrap()
            .is_none()
    );

    let names = directory.photographer_names().await.unwrap();
    assert!(names.contains(&photographer));
    assert!(names.is_sorted());
}
