#![allow(clippy::expect_used, dead_code)]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Building settings on the in-memory backend
//! - Creating a test Salvo service wired like `main.rs`
//! - Making JSON requests and asserting on responses

use salvo::http::header::HeaderName;
use salvo::http::{Method, StatusCode};
use salvo::prelude::*;
use salvo::test::{RequestBuilder, ResponseExt, TestClient};
use serde_json::Value;

use agenda_test::app::api::{SESSIONS_ROUTE_PREFIX, routes};
use agenda_test::app::booking_handler::{BookingHandler, build_booking_service};
use agenda_test::component::config::*;
use agenda_test::component::model::ClientRecord;

/// Registered client seeded into every test directory.
pub const REGISTERED_CLIENT_ID: &str = "0195f0a2-7c1e-7d4a-9b52-3f6a8e1c2d40";

/// Settings on the memory backend with a single configured user.
#[must_use]
pub fn test_config() -> Settings {
    let mut settings = Settings::load().expect("default settings should load");
    settings.storage.backend = StorageBackend::Memory;
    settings.auth.method = AuthMethod::SingleUser;
    settings.auth.single_user = Some(SingleUserAuthConfig {
        name: "Studio".to_string(),
        email: "studio@example.com".to_string(),
    });
    settings.booking = BookingConfig::default();
    settings.directory = DirectoryConfig {
        clients: vec![ClientRecord {
            id: REGISTERED_CLIENT_ID.parse().expect("valid client id"),
            name: "Beatriz Lima".to_string(),
            email: "beatriz@example.com".to_string(),
            phone: "555-0101".to_string(),
        }],
        photographers: vec!["Rui".to_string(), "Marta".to_string()],
    };
    settings
}

/// Settings that trust the default proxy header.
#[must_use]
pub fn proxy_config() -> Settings {
    let mut settings = test_config();
    settings.auth.method = AuthMethod::Proxy;
    settings.auth.proxy = Some(ProxyAuthConfig::default());
    settings
}

/// ## Summary
/// Creates a fresh service with its own in-memory store, wired the same way
/// as the server binary.
///
/// ## Panics
/// Panics if the booking service cannot be built.
pub async fn create_test_service(settings: Settings) -> Service {
    let service = build_booking_service(&settings)
        .await
        .expect("memory booking service should build");
    let router = Router::new()
        .hoop(ConfigHandler::new(settings))
        .hoop(BookingHandler { service })
        .push(routes());
    Service::new(router)
}

/// `/api/sessions/{id}`, with an optional scope query.
#[must_use]
pub fn session_path(id: &str, scope: Option<&str>) -> String {
    match scope {
        Some(scope) => format!("{SESSIONS_ROUTE_PREFIX}/{id}?scope={scope}"),
        None => format!("{SESSIONS_ROUTE_PREFIX}/{id}"),
    }
}

/// A single booking body for a name-only client.
#[must_use]
pub fn booking_body(client: &str, date: &str, start: &str) -> Value {
    serde_json::json!({
        "client_name": client,
        "email": "client@example.com",
        "category": "studio",
        "date": date,
        "start": start,
    })
}

/// Test request builder for constructing HTTP requests.
pub struct TestRequest {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Option<Value>,
}

impl TestRequest {
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Adds a header to the request.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Sets a JSON request body.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sends the request to the test service and returns the response.
    ///
    /// ## Panics
    /// Panics if the response body cannot be read.
    pub async fn send(self, service: &Service) -> TestResponse {
        let url = format!("http://127.0.0.1:5800{}", self.path);

        let mut client = match self.method.as_str() {
            "GET" => TestClient::get(&url),
            "POST" => TestClient::post(&url),
            "PUT" => TestClient::put(&url),
            "DELETE" => TestClient::delete(&url),
            _ => RequestBuilder::new(&url, self.method.clone()),
        };

        for (name, value) in self.headers {
            if let Ok(header_name) = HeaderName::try_from(name.to_ascii_lowercase().as_str()) {
                client = client.add_header(header_name, value, true);
            }
        }

        if let Some(body) = &self.body {
            client = client.json(body);
        }

        let mut response = client.send(service).await;
        let status = response
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response
            .take_string()
            .await
            .expect("response body should be readable");

        TestResponse { status, body }
    }
}

/// Represents an HTTP test response for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    /// Asserts that the response status matches the expected code.
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status, expected,
            "Expected status {expected} but got {}: {}",
            self.status, self.body
        );
        self
    }

    /// Parses the body as JSON.
    ///
    /// ## Panics
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body should be JSON")
    }

    /// The `ids` array of a mutation receipt.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.json()["ids"]
            .as_array()
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| id.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Books `body` and returns the created ids.
///
/// ## Panics
/// Panics unless the booking is created.
pub async fn book(service: &Service, body: Value) -> Vec<String> {
    TestRequest::post(SESSIONS_ROUTE_PREFIX)
        .json(body)
        .send(service)
        .await
        .assert_status(StatusCode::CREATED)
        .ids()
}

/// Lists sessions as `(date, start)` pairs, latest first.
pub async fn list_slots(service: &Service) -> Vec<(String, String)> {
    TestRequest::get(SESSIONS_ROUTE_PREFIX)
        .send(service)
        .await
        .assert_status(StatusCode::OK)
        .json()
        .as_array()
        .map(|sessions| {
            sessions
                .iter()
                .map(|session| {
                    (
                        session["date"].as_str().unwrap_or_default().to_string(),
                        session["start"].as_str().unwrap_or_default().to_string(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}
