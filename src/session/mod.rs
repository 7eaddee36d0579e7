//! Session state: bearer token and anti-forgery token cache
//!
//! A [`SessionStore`] owns the credentials for one backend session. The
//! bearer token is set once at construction and is immutable for the
//! session; the anti-forgery (csrf) token is fetched lazily on the first
//! authenticated request and cached for the process lifetime. A 401 from
//! the backend invalidates the store permanently.

pub mod credentials;

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::OnceCell;
use url::Url;

use crate::api::types::CsrfTokenResponse;
use crate::error::SyllachatError;

/// Path of the anti-forgery token endpoint
const CSRF_TOKEN_PATH: &str = "/csrf-token";

/// Credentials and csrf cache for one backend session
///
/// The csrf cell is the only mutable shared resource across calls;
/// `OnceCell` makes its first population single-flight, so concurrent
/// first requests cannot race into duplicate fetches.
pub struct SessionStore {
    token: Option<String>,
    invalidated: AtomicBool,
    csrf: OnceCell<String>,
}

impl SessionStore {
    /// Create a store holding a bearer token
    pub fn authenticated(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            invalidated: AtomicBool::new(false),
            csrf: OnceCell::new(),
        }
    }

    /// Create a store with no credentials
    ///
    /// Every `token()` call on an anonymous store fails with
    /// [`SyllachatError::Unauthenticated`].
    pub fn anonymous() -> Self {
        Self {
            token: None,
            invalidated: AtomicBool::new(false),
            csrf: OnceCell::new(),
        }
    }

    /// Get the bearer token, failing fast when the session is unusable
    ///
    /// # Errors
    ///
    /// Returns [`SyllachatError::SessionExpired`] once the store has been
    /// invalidated by a 401, and [`SyllachatError::Unauthenticated`] when
    /// no token was ever set. Neither case touches the network.
    pub fn token(&self) -> Result<&str, SyllachatError> {
        if self.invalidated.load(Ordering::SeqCst) {
            return Err(SyllachatError::SessionExpired);
        }
        self.token.as_deref().ok_or(SyllachatError::Unauthenticated)
    }

    /// Mark the session as dead after a 401
    ///
    /// Idempotent. All subsequent `token()` calls fail with
    /// [`SyllachatError::SessionExpired`].
    pub fn invalidate(&self) {
        if !self.invalidated.swap(true, Ordering::SeqCst) {
            tracing::info!("session invalidated by backend 401");
        }
    }

    /// Whether the session has been invalidated
    pub fn is_invalidated(&self) -> bool {
        self.invalidated.load(Ordering::SeqCst)
    }

    /// Get the cached anti-forgery token, fetching it on first use
    ///
    /// Performs at most one round trip against `GET /csrf-token` for the
    /// lifetime of the store; every later call returns the cached value.
    ///
    /// # Errors
    ///
    /// Returns [`SyllachatError::Network`] when the fetch fails at the
    /// transport level and [`SyllachatError::Api`] when the endpoint
    /// answers with a non-success status or an unreadable body.
    pub async fn csrf_token(
        &self,
        http: &reqwest::Client,
        base_url: &Url,
    ) -> Result<&str, SyllachatError> {
        let token = self
            .csrf
            .get_or_try_init(|| fetch_csrf_token(http, base_url))
            .await?;
        Ok(token.as_str())
    }
}

async fn fetch_csrf_token(
    http: &reqwest::Client,
    base_url: &Url,
) -> Result<String, SyllachatError> {
    let url = base_url
        .join(CSRF_TOKEN_PATH)
        .map_err(|e| SyllachatError::Config(format!("invalid csrf token URL: {}", e)))?;

    tracing::debug!(url = %url, "fetching anti-forgery token");

    let resp = http
        .get(url)
        .send()
        .await
        .map_err(|e| SyllachatError::Network(format!("csrf token request failed: {}", e)))?;

    if !resp.status().is_success() {
        return Err(SyllachatError::Api(format!(
            "csrf token endpoint returned {}",
            resp.status()
        )));
    }

    let body: CsrfTokenResponse = resp
        .json()
        .await
        .map_err(|e| SyllachatError::Api(format!("failed to parse csrf token response: {}", e)))?;

    Ok(body.csrf_token)
}
