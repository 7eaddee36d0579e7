//! Syllachat - student syllabus chatbot client library
//!
//! This library implements the session-authenticated request layer for
//! a student chatbot dashboard, together with the chat gating and
//! warning/lock synchronization built on top of it.
//!
//! # Architecture
//!
//! - `session`: bearer token and anti-forgery token cache, credential
//!   persistence
//! - `api`: authenticated request client and backend wire types
//! - `chat`: topic gate, transcript, warning tracker, and the session
//!   command handlers
//! - `config`: configuration loading and validation
//! - `error`: error types and result alias
//! - `cli` / `commands`: command-line interface and handlers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use syllachat::api::{ApiClient, Profile};
//! use syllachat::chat::ChatSession;
//! use syllachat::config::Config;
//! use syllachat::session::SessionStore;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load("config.yaml")?;
//! config.validate()?;
//!
//! let session = Arc::new(SessionStore::authenticated("token-from-login"));
//! let client = ApiClient::new(&config.api, session)?;
//!
//! let profile = Profile {
//!     name: "Asha".into(),
//!     roll: "22CS101".into(),
//!     dept: "CSE".into(),
//!     cls: "II-A".into(),
//!     bg_color: None,
//! };
//! let mut chat = ChatSession::new(client, profile, true);
//! let outcome = chat.send("What is the syllabus for unit 2?").await?;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod session;

// Re-export commonly used types
pub use api::{ApiClient, Profile, ProfileLookup};
pub use chat::{ChatSession, SendOutcome, Transcript, WarningState};
pub use config::Config;
pub use error::{Result, SyllachatError};
pub use session::SessionStore;
