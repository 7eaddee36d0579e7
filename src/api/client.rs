//! Authenticated request client for the chatbot backend
//!
//! Every outbound call goes through [`ApiClient`], which enforces three
//! invariants: the cookie jar is enabled, the `Authorization: Bearer`
//! header is present, and the cached anti-forgery token rides along in
//! `x-csrf-token`. A 401 from any endpoint invalidates the session and
//! surfaces as [`SyllachatError::SessionExpired`]; there is no automatic
//! retry, so every call is at-most-once from this layer's perspective.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use url::Url;

use crate::api::types::{
    AskRequest, AskResponse, BgColorRequest, ChatRecord, LoginRequest, LoginResponse, Profile,
    StatusResponse, WarningRequest, WarningResponse,
};
use crate::config::ApiConfig;
use crate::error::SyllachatError;
use crate::session::SessionStore;

/// Header carrying the anti-forgery token
const CSRF_HEADER: &str = "x-csrf-token";

/// Profile resolution strategy
///
/// The backend exposes two lookup routes; which one a deployment uses is
/// a configuration choice, not a code fork.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileLookup {
    /// Resolve the profile of the logged-in identity via `/api/me`
    ByLogin,
    /// Resolve a stored roll number via `/api/student/{roll}`
    ByRoll(String),
}

impl ProfileLookup {
    /// Build the lookup from profile configuration
    ///
    /// # Errors
    ///
    /// Returns a config error for an unknown strategy or a `by-roll`
    /// strategy without a roll. `Config::validate` reports the same
    /// problems earlier with more context.
    pub fn from_config(config: &crate::config::ProfileConfig) -> Result<Self, SyllachatError> {
        match config.lookup.as_str() {
            "by-login" => Ok(Self::ByLogin),
            "by-roll" => match config.roll.as_deref().map(str::trim) {
                Some(roll) if !roll.is_empty() => Ok(Self::ByRoll(roll.to_string())),
                _ => Err(SyllachatError::Config(
                    "profile.roll is required when profile.lookup is 'by-roll'".to_string(),
                )),
            },
            other => Err(SyllachatError::Config(format!(
                "unknown profile.lookup '{}'",
                other
            ))),
        }
    }

    fn path(&self) -> String {
        match self {
            Self::ByLogin => "/api/me".to_string(),
            Self::ByRoll(roll) => format!("/api/student/{}", roll),
        }
    }
}

/// HTTP client for the chatbot backend
///
/// Wraps a cookie-enabled `reqwest::Client` with the session's bearer
/// and anti-forgery credentials and offers one typed method per
/// endpoint. Cheap to share; endpoint methods take `&self`.
pub struct ApiClient {
    http: Client,
    base_url: Url,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Create a client for the configured backend
    ///
    /// The underlying HTTP client carries the configured per-request
    /// timeout and a cookie jar so credential-bearing cookies flow on
    /// every call.
    ///
    /// # Errors
    ///
    /// Returns a config error when the base URL is unparseable or HTTP
    /// client initialization fails.
    pub fn new(config: &ApiConfig, session: Arc<SessionStore>) -> Result<Self, SyllachatError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .cookie_store(true)
            .user_agent(concat!("syllachat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                SyllachatError::Config(format!("failed to create HTTP client: {}", e))
            })?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            SyllachatError::Config(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;

        tracing::debug!(base_url = %base_url, timeout = config.timeout_seconds, "initialized API client");

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// The session store backing this client
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn endpoint(&self, path: &str) -> Result<Url, SyllachatError> {
        self.base_url
            .join(path)
            .map_err(|e| SyllachatError::Config(format!("invalid endpoint path '{}': {}", path, e)))
    }

    /// Build an authenticated request with the bearer and csrf headers
    ///
    /// Fails fast with `Unauthenticated` / `SessionExpired` before any
    /// network I/O when the session cannot produce a token. The csrf
    /// fetch itself is the one network call this may trigger, once per
    /// process lifetime.
    async fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, SyllachatError> {
        let token = self.session.token()?;
        let csrf = self.session.csrf_token(&self.http, &self.base_url).await?;
        Ok(self
            .http
            .request(method, self.endpoint(path)?)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(CSRF_HEADER, csrf))
    }

    /// Send a request, mapping transport failures and the 401 contract
    async fn dispatch(&self, request: RequestBuilder) -> Result<Response, SyllachatError> {
        let resp = request
            .send()
            .await
            .map_err(|e| SyllachatError::Network(e.to_string()))?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            self.session.invalidate();
            return Err(SyllachatError::SessionExpired);
        }

        Ok(resp)
    }

    async fn get(&self, path: &str) -> Result<Response, SyllachatError> {
        let req = self.authed(Method::GET, path).await?;
        self.dispatch(req).await
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, SyllachatError> {
        let req = self.authed(Method::POST, path).await?.json(body);
        self.dispatch(req).await
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        resp: Response,
        what: &str,
    ) -> Result<T, SyllachatError> {
        resp.json()
            .await
            .map_err(|e| SyllachatError::Api(format!("failed to parse {} response: {}", what, e)))
    }

    /// Exchange login credentials for a bearer token
    ///
    /// The one deliberately unauthenticated call: no bearer or csrf
    /// headers, and a 401 here means bad credentials rather than an
    /// expired session.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, SyllachatError> {
        let req = self
            .http
            .post(self.endpoint("/api/login")?)
            .json(&LoginRequest { email, password });

        let resp = req
            .send()
            .await
            .map_err(|e| SyllachatError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SyllachatError::Api(format!(
                "login failed: backend returned {}",
                resp.status()
            )));
        }

        let body: LoginResponse = Self::read_json(resp, "login").await?;
        Ok(body.token)
    }

    /// Fetch the student profile using the configured lookup strategy
    pub async fn fetch_profile(&self, lookup: &ProfileLookup) -> Result<Profile, SyllachatError> {
        let resp = self.get(&lookup.path()).await?;
        if !resp.status().is_success() {
            return Err(SyllachatError::Api(format!(
                "profile lookup returned {}",
                resp.status()
            )));
        }
        Self::read_json(resp, "profile").await
    }

    /// Persist the student profile
    pub async fn save_profile(&self, profile: &Profile) -> Result<(), SyllachatError> {
        let resp = self.post("/api/me", profile).await?;
        if !resp.status().is_success() {
            return Err(SyllachatError::Api(format!(
                "profile save returned {}",
                resp.status()
            )));
        }
        Ok(())
    }

    /// Fetch the persisted chat history for a roll, newest-first
    pub async fn chat_history(&self, roll: &str) -> Result<Vec<ChatRecord>, SyllachatError> {
        let resp = self.get(&format!("/api/chat/{}", roll)).await?;
        if !resp.status().is_success() {
            return Err(SyllachatError::Api(format!(
                "chat history returned {}",
                resp.status()
            )));
        }
        Self::read_json(resp, "chat history").await
    }

    /// Send a user message to the chatbot and return the reply text
    ///
    /// # Errors
    ///
    /// A non-success status with an `error` field in the body surfaces
    /// as [`SyllachatError::Api`] carrying the backend's message.
    pub async fn ask(&self, request: &AskRequest<'_>) -> Result<String, SyllachatError> {
        let resp = self.post("/api/chat", request).await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body: AskResponse = resp.json().await.unwrap_or_default();
            let message = body
                .error
                .unwrap_or_else(|| format!("chat endpoint returned {}", status));
            return Err(SyllachatError::Api(message));
        }

        let body: AskResponse = Self::read_json(resp, "chat").await?;
        Ok(body.into_reply_text())
    }

    /// Fetch the current warning list and lock flag
    pub async fn dashboard_status(&self) -> Result<StatusResponse, SyllachatError> {
        let resp = self.get("/api/dashboard/status").await?;
        if !resp.status().is_success() {
            return Err(SyllachatError::Api(format!(
                "dashboard status returned {}",
                resp.status()
            )));
        }
        Self::read_json(resp, "dashboard status").await
    }

    /// Register a policy violation for a roll
    pub async fn post_warning(
        &self,
        roll: &str,
        reason: &str,
    ) -> Result<WarningResponse, SyllachatError> {
        let resp = self.post("/api/warning", &WarningRequest { roll, reason }).await?;
        if !resp.status().is_success() {
            return Err(SyllachatError::Api(format!(
                "warning registration returned {}",
                resp.status()
            )));
        }
        Self::read_json(resp, "warning").await
    }

    /// Persist the background color preference for a roll
    pub async fn save_bg_color(&self, roll: &str, bg_color: &str) -> Result<(), SyllachatError> {
        let resp = self
            .post("/api/bgcolor", &BgColorRequest { roll, bg_color })
            .await?;
        if !resp.status().is_success() {
            return Err(SyllachatError::Api(format!(
                "background color save returned {}",
                resp.status()
            )));
        }
        Ok(())
    }
}
