//! Integration tests for profile resolution and persistence

mod common;

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use syllachat::chat::session::{ChatSession, ProfileInput};
use syllachat::{ProfileLookup, SyllachatError};

use common::{chat_session, client, csrf_mock, test_profile, ROLL};

fn profile_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Asha",
        "roll": ROLL,
        "dept": "CSE",
        "cls": "II-A",
        "bgColor": "#112233",
    })
}

#[tokio::test]
async fn test_fetch_profile_by_login() {
    let server = MockServer::start().await;
    csrf_mock().mount(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let profile = client.fetch_profile(&ProfileLookup::ByLogin).await.unwrap();
    assert_eq!(profile.roll, ROLL);
    assert_eq!(profile.bg_color.as_deref(), Some("#112233"));
}

#[tokio::test]
async fn test_fetch_profile_by_roll() {
    let server = MockServer::start().await;
    csrf_mock().mount(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/api/student/{}", ROLL)))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let lookup = ProfileLookup::ByRoll(ROLL.to_string());
    let profile = client.fetch_profile(&lookup).await.unwrap();
    assert_eq!(profile.name, "Asha");
}

#[tokio::test]
async fn test_missing_profile_is_an_api_error() {
    let server = MockServer::start().await;
    csrf_mock().mount(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client.fetch_profile(&ProfileLookup::ByLogin).await.unwrap_err();
    assert!(matches!(err, SyllachatError::Api(_)));
}

#[tokio::test]
async fn test_submit_profile_posts_to_backend() {
    let server = MockServer::start().await;
    csrf_mock().mount(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/me"))
        .and(body_partial_json(serde_json::json!({
            "name": "Asha",
            "roll": ROLL,
            "dept": "CSE",
            "cls": "II-A",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let input = ProfileInput {
        name: "Asha".to_string(),
        roll: ROLL.to_string(),
        dept: "CSE".to_string(),
        cls: "II-A".to_string(),
    };
    let profile = ChatSession::submit_profile(&client, input).await.unwrap();
    assert_eq!(profile, test_profile());
}

#[tokio::test]
async fn test_submit_profile_validation_precedes_network() {
    let server = MockServer::start().await;
    csrf_mock().expect(0).mount(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let input = ProfileInput {
        name: "Asha".to_string(),
        roll: String::new(),
        dept: "CSE".to_string(),
        cls: "II-A".to_string(),
    };
    let err = ChatSession::submit_profile(&client, input).await.unwrap_err();
    assert!(matches!(err, SyllachatError::Validation(_)));
}

#[tokio::test]
async fn test_bg_color_save_updates_cached_profile() {
    let server = MockServer::start().await;
    csrf_mock().mount(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/bgcolor"))
        .and(body_partial_json(serde_json::json!({
            "roll": ROLL,
            "bgColor": "#445566",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = chat_session(&server);
    session.set_bg_color("#445566").await.unwrap();
    assert_eq!(session.profile().bg_color.as_deref(), Some("#445566"));
}

#[tokio::test]
async fn test_bg_color_save_failure_is_swallowed() {
    let server = MockServer::start().await;
    csrf_mock().mount(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/bgcolor"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut session = chat_session(&server);
    session.set_bg_color("#445566").await.unwrap();
    // The preference did not take; the cached profile says so.
    assert!(session.profile().bg_color.is_none());
}
