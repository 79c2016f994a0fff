#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Tests for request authentication.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;
use agenda_test::app::api::{APP_ROUTE_PREFIX, SESSIONS_ROUTE_PREFIX};

/// ## Summary
/// The healthcheck names the storage engine the server runs on.
#[test_log::test(tokio::test)]
async fn healthcheck_reports_storage_backend() {
    let service = create_test_service(test_config()).await;

    let response = TestRequest::get(&format!("{APP_ROUTE_PREFIX}/healthcheck"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({ "status": "ok", "storage": "memory" })
    );
}

/// ## Summary
/// In single user mode every request acts as the configured user.
#[test_log::test(tokio::test)]
async fn whoami_single_user() {
    let service = create_test_service(test_config()).await;

    let actor = TestRequest::get(&format!("{APP_ROUTE_PREFIX}/whoami"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(actor["name"], json!("Studio"));
    assert_eq!(actor["email"], json!("studio@example.com"));
}

/// ## Summary
/// Behind a proxy, requests without the user header are rejected.
#[test_log::test(tokio::test)]
async fn proxy_without_header_is_rejected() {
    let service = create_test_service(proxy_config()).await;

    TestRequest::get(SESSIONS_ROUTE_PREFIX)
        .send(&service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

/// ## Summary
/// Each proxy user only sees their own sessions, and the email is matched
/// case-insensitively.
#[test_log::test(tokio::test)]
async fn proxy_users_are_isolated() {
    let service = create_test_service(proxy_config()).await;

    let response = TestRequest::post(SESSIONS_ROUTE_PREFIX)
        .header("X-Remote-User", "Ana@Example.com")
        .json(booking_body("Client", "2025-03-03", "10:00"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);
    let id = response.ids()[0].clone();

    let actor = TestRequest::get(&format!("{APP_ROUTE_PREFIX}/whoami"))
        .header("X-Remote-User", "ana@example.com")
        .send(&service)
        .await
        .json();
    assert_eq!(actor["email"], json!("ana@example.com"));

    let own = TestRequest::get(&session_path(&id, None))
        .header("X-Remote-User", "ANA@example.com")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(own["id"], json!(id));

    TestRequest::get(&session_path(&id, None))
        .header("X-Remote-User", "bruno@example.com")
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let listed = TestRequest::get(SESSIONS_ROUTE_PREFIX)
        .header("X-Remote-User", "bruno@example.com")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(listed, json!([]));
}
