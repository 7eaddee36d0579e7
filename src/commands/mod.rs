//! Command handlers for the Syllachat CLI
//!
//! One module per subcommand, plus shared helpers for building an
//! authenticated client and rendering auth failures as a single
//! redirect-to-login hint.

pub mod chat;
pub mod login;
pub mod profile;
pub mod status;

use std::sync::Arc;

use crate::api::client::ApiClient;
use crate::config::Config;
use crate::error::{Result, SyllachatError};
use crate::session::{credentials, SessionStore};

/// Build an API client with whatever credentials are available
///
/// The token comes from `SYLLACHAT_TOKEN` or the keyring; when neither
/// is present the session is anonymous and the first authenticated call
/// fails fast with `Unauthenticated`.
pub(crate) fn build_client(config: &Config) -> Result<ApiClient> {
    let session = match credentials::resolve_token(&config.api.base_url) {
        Some(token) => SessionStore::authenticated(token),
        None => SessionStore::anonymous(),
    };
    Ok(ApiClient::new(&config.api, Arc::new(session))?)
}

/// Turn an auth failure into the one redirect-to-login signal
///
/// Every command funnels its errors through this so the user sees a
/// single actionable hint instead of a bare error chain.
pub(crate) fn with_login_hint(err: SyllachatError) -> anyhow::Error {
    if err.is_auth_failure() {
        anyhow::anyhow!("{}. Please run `syllachat login` to start a new session.", err)
    } else {
        err.into()
    }
}
