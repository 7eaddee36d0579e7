//! Backend API surface for Syllachat
//!
//! This module contains the authenticated request client and the wire
//! types for every endpoint the client consumes.

pub mod client;
pub mod types;

pub use client::{ApiClient, ProfileLookup};
pub use types::{
    AskRequest, AskResponse, BgColorRequest, ChatRecord, LoginRequest, LoginResponse, Profile,
    StatusResponse, WarningRecord, WarningRequest, WarningResponse,
};
