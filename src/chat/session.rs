//! Chat session: owned state and command handlers
//!
//! A [`ChatSession`] owns everything one student's chat needs — the API
//! client, the cached profile, the transcript, and the warning tracker —
//! so multiple sessions (and tests) coexist without shared globals. UI
//! callbacks become explicit handlers here: `send`, `submit_profile`,
//! `set_bg_color`, `load_history`, `refresh_status`.

use crate::api::client::ApiClient;
use crate::api::types::{AskRequest, Profile};
use crate::chat::gate::{self, GateDecision};
use crate::chat::transcript::{ChatMessage, Sender, Transcript};
use crate::chat::warnings::{WarningState, WarningTracker};
use crate::error::SyllachatError;

/// Canned bot reply for messages that fail topic classification
pub const OFF_TOPIC_REPLY: &str = "Only syllabus-related questions are allowed.";

/// Bot reply rendered when the chatbot backend is unreachable
pub const UNREACHABLE_REPLY: &str = "Error contacting chatbot server.";

/// Reason recorded with every topic violation
const VIOLATION_REASON: &str = "Syllabus violation";

/// Result of one send attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Message was sent; the bot's reply was appended to the transcript
    Reply(ChatMessage),
    /// Message failed classification; a warning was registered and the
    /// canned rejection appended
    RejectedOffTopic(ChatMessage),
    /// Chat is locked; nothing was sent and nothing was appended
    RejectedLocked,
    /// Empty or whitespace-only; nothing happened at all
    RejectedEmpty,
    /// Another send is still in flight; this one was not started
    Busy,
}

/// Raw profile form input, validated before any network call
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    pub name: String,
    pub roll: String,
    pub dept: String,
    pub cls: String,
}

impl ProfileInput {
    /// Validate required fields and produce a [`Profile`]
    ///
    /// # Errors
    ///
    /// Returns [`SyllachatError::Validation`] naming the first missing
    /// field. No network call is made.
    pub fn into_profile(self) -> Result<Profile, SyllachatError> {
        for (value, field) in [
            (&self.name, "name"),
            (&self.roll, "roll"),
            (&self.dept, "dept"),
            (&self.cls, "class"),
        ] {
            if value.trim().is_empty() {
                return Err(SyllachatError::Validation(format!(
                    "{} is required",
                    field
                )));
            }
        }
        Ok(Profile {
            name: self.name.trim().to_string(),
            roll: self.roll.trim().to_string(),
            dept: self.dept.trim().to_string(),
            cls: self.cls.trim().to_string(),
            bg_color: None,
        })
    }
}

/// One student's chat session
pub struct ChatSession {
    client: ApiClient,
    profile: Profile,
    transcript: Transcript,
    warnings: WarningTracker,
    use_gemini: bool,
    in_flight: bool,
}

impl ChatSession {
    pub fn new(client: ApiClient, profile: Profile, use_gemini: bool) -> Self {
        Self {
            client,
            profile,
            transcript: Transcript::new(),
            warnings: WarningTracker::new(),
            use_gemini,
            in_flight: false,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn warning_state(&self) -> WarningState {
        self.warnings.state()
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Validate and persist a profile
    ///
    /// An associated function rather than a method: the profile is
    /// submitted before a session for it exists.
    pub async fn submit_profile(
        client: &ApiClient,
        input: ProfileInput,
    ) -> Result<Profile, SyllachatError> {
        let profile = input.into_profile()?;
        client.save_profile(&profile).await?;
        tracing::info!(roll = %profile.roll, "profile saved");
        Ok(profile)
    }

    /// Load persisted history into the transcript
    ///
    /// The backend returns newest-first; entries are replayed in
    /// chronological order. A failed load is non-fatal (the chat starts
    /// empty), except authentication failures.
    pub async fn load_history(&mut self) -> Result<usize, SyllachatError> {
        match self.client.chat_history(&self.profile.roll).await {
            Ok(records) => Ok(self.transcript.replay_history(records)),
            Err(e) if e.is_auth_failure() => Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "chat history load failed; starting with empty transcript");
                Ok(0)
            }
        }
    }

    /// Refresh warning count and lock flag from the backend
    pub async fn refresh_status(&mut self) -> Result<WarningState, SyllachatError> {
        self.warnings.refresh(&self.client).await?;
        Ok(self.warnings.state())
    }

    /// Persist the background color preference
    ///
    /// Failure is non-fatal: the preference save must never block the
    /// chat. Authentication failures propagate.
    pub async fn set_bg_color(&mut self, bg_color: &str) -> Result<(), SyllachatError> {
        match self.client.save_bg_color(&self.profile.roll, bg_color).await {
            Ok(()) => {
                self.profile.bg_color = Some(bg_color.to_string());
                Ok(())
            }
            Err(e) if e.is_auth_failure() => Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "background color save failed");
                Ok(())
            }
        }
    }

    /// Handle one outgoing user message
    ///
    /// The full gate sequence: in-flight guard, empty check, local lock
    /// check, server lock refresh, topic classification, and only then
    /// the chat endpoint. Returns what happened so the presentation
    /// layer can render it.
    ///
    /// # Errors
    ///
    /// Only authentication failures surface as errors; every other
    /// failure is rendered into the transcript or the outcome.
    pub async fn send(&mut self, text: &str) -> Result<SendOutcome, SyllachatError> {
        if self.in_flight {
            tracing::debug!("send rejected: another send is in flight");
            return Ok(SendOutcome::Busy);
        }

        self.in_flight = true;
        let result = self.send_inner(text).await;
        self.in_flight = false;
        result
    }

    async fn send_inner(&mut self, text: &str) -> Result<SendOutcome, SyllachatError> {
        let text = text.trim();
        let decision = gate::classify(text);
        if decision == GateDecision::RejectedEmpty {
            return Ok(SendOutcome::RejectedEmpty);
        }

        // Locally cached lock first, then a fresh server check.
        if self.warnings.locked() {
            return Ok(SendOutcome::RejectedLocked);
        }
        self.warnings.refresh(&self.client).await?;
        if self.warnings.locked() {
            return Ok(SendOutcome::RejectedLocked);
        }

        self.transcript.push(Sender::User, text);

        if decision == GateDecision::RejectedOffTopic {
            self.warnings
                .register(&self.client, &self.profile.roll, VIOLATION_REASON)
                .await?;
            let message = self.transcript.push(Sender::Bot, OFF_TOPIC_REPLY).clone();
            return Ok(SendOutcome::RejectedOffTopic(message));
        }

        let request = AskRequest {
            roll: &self.profile.roll,
            sender: Sender::User.as_wire(),
            message: text,
            use_gemini: self.use_gemini,
        };

        let reply = match self.client.ask(&request).await {
            Ok(reply) => reply,
            Err(e) if e.is_auth_failure() => return Err(e),
            Err(SyllachatError::Api(message)) => {
                // The backend put its complaint in the body; show it as
                // the bot's reply, the chat stays usable.
                tracing::warn!(error = %message, "chat endpoint reported an error");
                message
            }
            Err(e) => {
                tracing::warn!(error = %e, "chat request failed");
                UNREACHABLE_REPLY.to_string()
            }
        };

        let message = self.transcript.push(Sender::Bot, reply).clone();
        Ok(SendOutcome::Reply(message))
    }
}
