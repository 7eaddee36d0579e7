//! Bearer token persistence between runs
//!
//! The token obtained at login is stored in the operating system's
//! native credential store (Keychain on macOS, Secret Service on Linux,
//! Windows Credential Manager on Windows), serialized to JSON alongside
//! the API URL it was issued for. An environment variable takes priority
//! over the keyring so CI and scripts can inject a token directly.

use serde::{Deserialize, Serialize};

use crate::error::SyllachatError;

/// Environment variable carrying a bearer token directly
pub const TOKEN_ENV_VAR: &str = "SYLLACHAT_TOKEN";

const KEYRING_SERVICE: &str = "syllachat";
const KEYRING_USER: &str = "bearer_token";

/// Stored credentials for the CLI
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub api_url: String,
    pub token: String,
}

/// Resolve a bearer token (priority order):
/// 1. `SYLLACHAT_TOKEN` env var
/// 2. OS keyring entry written by `syllachat login`
/// 3. None — the caller proceeds unauthenticated and fails fast
pub fn resolve_token(api_url: &str) -> Option<String> {
    if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
        if !token.is_empty() {
            tracing::debug!("using bearer token from environment");
            return Some(token);
        }
    }

    let creds = load()?;
    if creds.api_url != api_url {
        tracing::warn!(
            stored = %creds.api_url,
            configured = %api_url,
            "stored credentials were issued for a different backend"
        );
    }
    Some(creds.token)
}

/// Load stored credentials from the keyring
pub fn load() -> Option<StoredCredentials> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER).ok()?;
    let data = entry.get_password().ok()?;
    serde_json::from_str(&data).ok()
}

/// Save credentials to the keyring
///
/// # Errors
///
/// Returns a keyring or serialization error when the credential store
/// is unavailable.
pub fn save(creds: &StoredCredentials) -> Result<(), SyllachatError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER)?;
    let data = serde_json::to_string(creds)?;
    entry.set_password(&data)?;
    tracing::info!(api_url = %creds.api_url, "stored bearer token in keyring");
    Ok(())
}

/// Delete stored credentials, if any
///
/// Deleting an entry that does not exist is not an error.
pub fn clear() -> Result<(), SyllachatError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER)?;
    match entry.delete_password() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
