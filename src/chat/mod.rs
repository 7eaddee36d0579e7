//! Chat core: gating, transcript, warning tracking, session handlers
//!
//! The send path runs Gate -> ApiClient -> WarningTracker: every
//! outgoing message is checked against the lock state and the topic
//! allow-list before the chat endpoint is ever invoked, and rejections
//! feed the warning tracker.

pub mod gate;
pub mod session;
pub mod transcript;
pub mod warnings;

pub use gate::{is_valid_syllabus_query, GateDecision};
pub use session::{ChatSession, ProfileInput, SendOutcome};
pub use transcript::{ChatMessage, Sender, Transcript};
pub use warnings::{WarningState, WarningTracker};
