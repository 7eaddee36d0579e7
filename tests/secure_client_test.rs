//! Integration tests for the authenticated request layer
//!
//! Verifies the header invariants, the single-flight csrf fetch, the
//! 401 contract (terminal, no further network calls), the fail-fast
//! unauthenticated path, and timeout handling.

mod common;

use std::time::Duration;

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use syllachat::SyllachatError;

use common::{anonymous_client, client, csrf_mock, status_mock, BEARER, CSRF};

#[tokio::test]
async fn test_authenticated_call_carries_bearer_and_csrf_headers() {
    let server = MockServer::start().await;
    csrf_mock().expect(1).mount(&server).await;
    // status_mock itself matches on both auth headers; an unmatched
    // request would 404 and fail the call.
    status_mock(0, false).expect(1).mount(&server).await;

    let client = client(&server);
    let status = client.dashboard_status().await.unwrap();
    assert!(status.warnings.is_empty());
    assert!(!status.active_lock);
}

#[tokio::test]
async fn test_csrf_token_fetched_once_across_requests() {
    let server = MockServer::start().await;
    csrf_mock().expect(1).mount(&server).await;
    status_mock(0, false).expect(3).mount(&server).await;

    let client = client(&server);
    for _ in 0..3 {
        client.dashboard_status().await.unwrap();
    }
    // csrf_mock's expect(1) verifies on drop: one round trip, then cache.
}

#[tokio::test]
async fn test_concurrent_first_requests_share_one_csrf_fetch() {
    let server = MockServer::start().await;
    // The delay keeps the first fetch in flight while the second
    // request arrives; single-flight means it must wait, not re-fetch.
    Mock::given(method("GET"))
        .and(path("/csrf-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "csrfToken": CSRF }))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;
    status_mock(0, false).expect(2).mount(&server).await;

    let client = client(&server);
    let (a, b) = tokio::join!(client.dashboard_status(), client.dashboard_status());
    assert!(a.is_ok());
    assert!(b.is_ok());
}

#[tokio::test]
async fn test_unauthenticated_call_fails_before_any_network() {
    let server = MockServer::start().await;
    csrf_mock().expect(0).mount(&server).await;
    status_mock(0, false).expect(0).mount(&server).await;

    let client = anonymous_client(&server);
    let err = client.dashboard_status().await.unwrap_err();
    assert!(matches!(err, SyllachatError::Unauthenticated));
}

#[tokio::test]
async fn test_401_ends_the_session_and_blocks_further_calls() {
    let server = MockServer::start().await;
    csrf_mock().expect(1).mount(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/status"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);

    let err = client.dashboard_status().await.unwrap_err();
    assert!(matches!(err, SyllachatError::SessionExpired));
    assert!(client.session().is_invalidated());

    // The second attempt fails fast; the expect(1) above verifies the
    // backend never saw another request.
    let err = client.dashboard_status().await.unwrap_err();
    assert!(matches!(err, SyllachatError::SessionExpired));
}

#[tokio::test]
async fn test_timeout_surfaces_as_network_error() {
    let server = MockServer::start().await;
    csrf_mock().mount(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "warnings": [], "activeLock": false }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = syllachat::config::ApiConfig {
        base_url: server.uri(),
        timeout_seconds: 1,
    };
    let client = syllachat::ApiClient::new(
        &config,
        std::sync::Arc::new(syllachat::SessionStore::authenticated(BEARER)),
    )
    .unwrap();

    let err = client.dashboard_status().await.unwrap_err();
    assert!(matches!(err, SyllachatError::Network(_)));
    // A timeout is not a 401; the session stays usable.
    assert!(!client.session().is_invalidated());
}

#[tokio::test]
async fn test_login_exchanges_credentials_for_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_partial_json(serde_json::json!({
            "email": "asha@campus.edu",
            "password": "hunter2",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "token": "tok_xyz" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let token = client.login("asha@campus.edu", "hunter2").await.unwrap();
    assert_eq!(token, "tok_xyz");
}

#[tokio::test]
async fn test_login_failure_reports_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let err = client.login("asha@campus.edu", "wrong").await.unwrap_err();
    assert!(matches!(err, SyllachatError::Api(_)));
}

#[tokio::test]
async fn test_csrf_header_value_matches_fetched_token() {
    let server = MockServer::start().await;
    csrf_mock().expect(1).mount(&server).await;

    // Matching on the exact csrf value proves the cached token is the
    // one the endpoint issued.
    Mock::given(method("POST"))
        .and(path("/api/bgcolor"))
        .and(wiremock::matchers::header("x-csrf-token", CSRF))
        .and(body_partial_json(serde_json::json!({
            "roll": "22CS101",
            "bgColor": "#112233",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client.save_bg_color("22CS101", "#112233").await.unwrap();
}
