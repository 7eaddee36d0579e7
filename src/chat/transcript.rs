//! Append-only chat transcript
//!
//! Messages are displayed in the order they are appended locally.
//! History loaded from the backend arrives newest-first and is reversed
//! before replay so the on-screen order is chronological. Once appended,
//! a message is never mutated or deleted.

use std::fmt;

use crate::api::types::ChatRecord;

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Wire name used by the backend
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }

    /// Parse the backend's sender field
    ///
    /// Anything that is not "user" renders as the bot; history records
    /// only ever carry the two known values.
    pub fn from_wire(s: &str) -> Self {
        if s.eq_ignore_ascii_case("user") {
            Self::User
        } else {
            Self::Bot
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "You"),
            Self::Bot => write!(f, "Bot"),
        }
    }
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    /// Display-formatted time of day, e.g. "10:15"
    pub time: String,
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} - {}]: {}", self.sender, self.time, self.text)
    }
}

/// Display-formatted current time of day
pub fn display_time_now() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}

/// Ordered, append-only message list
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message stamped with the current time
    pub fn push(&mut self, sender: Sender, text: impl Into<String>) -> &ChatMessage {
        self.push_at(sender, text, display_time_now())
    }

    /// Append a message with an explicit display time
    pub fn push_at(
        &mut self,
        sender: Sender,
        text: impl Into<String>,
        time: impl Into<String>,
    ) -> &ChatMessage {
        self.messages.push(ChatMessage {
            sender,
            text: text.into(),
            time: time.into(),
        });
        self.messages.last().expect("just pushed")
    }

    /// Replay server history into the transcript
    ///
    /// The backend returns records newest-first; they are reversed here
    /// so the transcript reads chronologically. Returns the number of
    /// messages appended.
    pub fn replay_history(&mut self, records: Vec<ChatRecord>) -> usize {
        let count = records.len();
        for record in records.into_iter().rev() {
            self.push_at(Sender::from_wire(&record.sender), record.message, record.time);
        }
        count
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
