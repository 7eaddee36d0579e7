//! Wire types for the chatbot backend REST API
//!
//! Request and response structures for every endpoint the client
//! consumes. Field names follow the backend's JSON contract; optional
//! fields default so partial responses still deserialize.

use serde::{Deserialize, Serialize};

/// Student profile as stored by the backend
///
/// `roll` is the unique student identifier and the partition key for
/// chat history and warnings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub roll: String,
    pub dept: String,
    pub cls: String,

    /// Saved background color preference, when the student has set one
    #[serde(
        default,
        rename = "bgColor",
        skip_serializing_if = "Option::is_none"
    )]
    pub bg_color: Option<String>,
}

/// Response from `GET /csrf-token`
#[derive(Debug, Deserialize)]
pub struct CsrfTokenResponse {
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
}

/// Request body for `POST /api/login`
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response from `POST /api/login`
///
/// The token field is the only part of the body the client consumes.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// One persisted chat message from `GET /api/chat/{roll}`
///
/// The backend returns history newest-first.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRecord {
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub time: String,
}

/// Request body for `POST /api/chat`
#[derive(Debug, Serialize)]
pub struct AskRequest<'a> {
    pub roll: &'a str,
    pub sender: &'a str,
    pub message: &'a str,
    #[serde(rename = "useGemini")]
    pub use_gemini: bool,
}

/// Response from `POST /api/chat`
///
/// Older backend versions answer with `answer`, newer ones with
/// `assistantReply`; error responses carry `error`.
#[derive(Debug, Default, Deserialize)]
pub struct AskResponse {
    #[serde(default, rename = "assistantReply")]
    pub assistant_reply: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AskResponse {
    /// Extract the reply text, preferring the newer field name
    pub fn into_reply_text(self) -> String {
        self.assistant_reply
            .or(self.answer)
            .unwrap_or_else(|| "No response from AI.".to_string())
    }
}

/// One warning record as returned by the backend
#[derive(Debug, Clone, Deserialize)]
pub struct WarningRecord {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub time: Option<String>,
}

/// Response from `GET /api/dashboard/status`
#[derive(Debug, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub warnings: Vec<WarningRecord>,
    #[serde(default, rename = "activeLock")]
    pub active_lock: bool,
}

/// Request body for `POST /api/warning`
#[derive(Debug, Serialize)]
pub struct WarningRequest<'a> {
    pub roll: &'a str,
    pub reason: &'a str,
}

/// Response from `POST /api/warning`
///
/// `warning` is the full warning list for the student; when absent the
/// client falls back to incrementing its previous count. The lock flag
/// is a sibling boolean, never a property of the list.
#[derive(Debug, Default, Deserialize)]
pub struct WarningResponse {
    #[serde(default)]
    pub warning: Option<Vec<WarningRecord>>,
    #[serde(default)]
    pub locked: bool,
}

/// Request body for `POST /api/bgcolor`
#[derive(Debug, Serialize)]
pub struct BgColorRequest<'a> {
    pub roll: &'a str,
    #[serde(rename = "bgColor")]
    pub bg_color: &'a str,
}
