//! Shared helpers for integration tests
//!
//! Builders for a mock backend and a client/session wired to it. The
//! csrf endpoint is mounted explicitly by each test so call-count
//! expectations stay visible where they matter.

#![allow(dead_code)]

use std::sync::Arc;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use syllachat::api::{ApiClient, Profile};
use syllachat::chat::ChatSession;
use syllachat::config::ApiConfig;
use syllachat::session::SessionStore;

/// Bearer token used by authenticated test sessions
pub const BEARER: &str = "test-bearer-token";

/// Anti-forgery token served by the mock csrf endpoint
pub const CSRF: &str = "test-csrf-token";

/// Roll number of the test profile
pub const ROLL: &str = "22CS101";

/// Mock for `GET /csrf-token`
pub fn csrf_mock() -> Mock {
    Mock::given(method("GET"))
        .and(path("/csrf-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "csrfToken": CSRF })),
        )
}

/// Mock for `GET /api/dashboard/status`, requiring the auth headers
pub fn status_mock(warnings: usize, locked: bool) -> Mock {
    let warnings: Vec<serde_json::Value> = (0..warnings)
        .map(|_| serde_json::json!({ "reason": "Syllabus violation" }))
        .collect();
    Mock::given(method("GET"))
        .and(path("/api/dashboard/status"))
        .and(header("authorization", format!("Bearer {}", BEARER).as_str()))
        .and(header("x-csrf-token", CSRF))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "warnings": warnings,
            "activeLock": locked,
        })))
}

/// API config pointing at the mock server, with a short timeout
pub fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: server.uri(),
        timeout_seconds: 5,
    }
}

/// Authenticated client against the mock server
pub fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(
        &api_config(server),
        Arc::new(SessionStore::authenticated(BEARER)),
    )
    .expect("client construction must not fail")
}

/// Client with no credentials at all
pub fn anonymous_client(server: &MockServer) -> ApiClient {
    ApiClient::new(&api_config(server), Arc::new(SessionStore::anonymous()))
        .expect("client construction must not fail")
}

/// The profile used by chat-flow tests
pub fn test_profile() -> Profile {
    Profile {
        name: "Asha".to_string(),
        roll: ROLL.to_string(),
        dept: "CSE".to_string(),
        cls: "II-A".to_string(),
        bg_color: None,
    }
}

/// A chat session for the test profile against the mock server
pub fn chat_session(server: &MockServer) -> ChatSession {
    ChatSession::new(client(server), test_profile(), true)
}
