//! Warning and lock state synchronization
//!
//! The backend owns the authoritative warning record; this tracker
//! mirrors it into local state. Failures on the sync paths are
//! non-fatal and leave the previous state intact, except authentication
//! failures, which always propagate so the presentation layer can
//! redirect.

use crate::api::client::ApiClient;
use crate::api::types::{StatusResponse, WarningResponse};
use crate::error::SyllachatError;

/// Local mirror of the backend's warning record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WarningState {
    pub count: u32,
    pub locked: bool,
}

/// Keeps [`WarningState`] consistent with the backend
///
/// State is mutated only by server responses: a status refresh replaces
/// it wholesale, a warning registration updates it from the returned
/// list. The lock flag is never cleared on the client's own initiative —
/// only a refresh reporting `activeLock: false` unlocks the chat.
#[derive(Debug, Default)]
pub struct WarningTracker {
    state: WarningState,
}

impl WarningTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WarningState {
        self.state
    }

    pub fn count(&self) -> u32 {
        self.state.count
    }

    pub fn locked(&self) -> bool {
        self.state.locked
    }

    /// Replace local state from a status response
    pub fn apply_status(&mut self, status: &StatusResponse) {
        self.state = WarningState {
            count: status.warnings.len() as u32,
            locked: status.active_lock,
        };
    }

    /// Update local state from a warning registration response
    ///
    /// Count comes from the returned list length, falling back to the
    /// previous count plus one when the list is absent. A registration
    /// can set the lock but never clear it; only a refresh does that.
    pub fn apply_warning_response(&mut self, response: &WarningResponse) {
        let count = response
            .warning
            .as_ref()
            .map(|list| list.len() as u32)
            .unwrap_or(self.state.count + 1);
        self.state = WarningState {
            count,
            locked: self.state.locked || response.locked,
        };
    }

    /// Refresh state from the dashboard status endpoint
    ///
    /// Non-2xx and network failures are swallowed with a diagnostic and
    /// leave the previous state intact; authentication failures
    /// propagate.
    pub async fn refresh(&mut self, client: &ApiClient) -> Result<(), SyllachatError> {
        match client.dashboard_status().await {
            Ok(status) => {
                self.apply_status(&status);
                tracing::debug!(
                    count = self.state.count,
                    locked = self.state.locked,
                    "warning state refreshed"
                );
                Ok(())
            }
            Err(e) if e.is_auth_failure() => Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "status refresh failed; keeping previous warning state");
                Ok(())
            }
        }
    }

    /// Register a policy violation and mirror the backend's response
    ///
    /// A failed registration must never crash the chat flow: non-auth
    /// failures are swallowed with a diagnostic and leave state
    /// unchanged.
    pub async fn register(
        &mut self,
        client: &ApiClient,
        roll: &str,
        reason: &str,
    ) -> Result<(), SyllachatError> {
        match client.post_warning(roll, reason).await {
            Ok(response) => {
                self.apply_warning_response(&response);
                tracing::info!(
                    roll = %roll,
                    reason = %reason,
                    count = self.state.count,
                    locked = self.state.locked,
                    "warning registered"
                );
                Ok(())
            }
            Err(e) if e.is_auth_failure() => Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "warning registration failed; keeping previous state");
                Ok(())
            }
        }
    }
}
