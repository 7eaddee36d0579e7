//! Command-line interface definition for Syllachat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for authentication, the interactive chat,
//! profile management, and status display.

use clap::{Parser, Subcommand};

/// Syllachat - student syllabus chatbot client
///
/// Talk to the campus chatbot from the terminal: manage your profile,
/// ask syllabus questions, and keep an eye on your warning count.
#[derive(Parser, Debug, Clone)]
#[command(name = "syllachat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Syllachat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Log in and store the bearer token in the system keyring
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Password; prompted interactively when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Remove stored credentials
    Logout,

    /// Start an interactive chat with the syllabus bot
    Chat,

    /// View or update the student profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// Show the current warning count and lock state
    Status,

    /// Save the dashboard background color preference
    Bgcolor {
        /// CSS color value, e.g. "#1a2b3c"
        color: String,
    },
}

/// Profile management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommand {
    /// Show the profile as stored by the backend
    Show,

    /// Submit the profile
    Set {
        /// Full name
        #[arg(long)]
        name: String,

        /// Roll number (unique student identifier)
        #[arg(long)]
        roll: String,

        /// Department
        #[arg(long)]
        dept: String,

        /// Class/section
        #[arg(long)]
        class: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
