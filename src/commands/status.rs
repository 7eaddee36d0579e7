//! Warning status command handler

use colored::Colorize;

use crate::commands::{build_client, with_login_hint};
use crate::config::Config;
use crate::error::Result;

/// Fetch and print the warning count and lock state
pub async fn run_status(config: Config) -> Result<()> {
    let client = build_client(&config)?;

    let status = client.dashboard_status().await.map_err(with_login_hint)?;

    println!("Warnings: {}", status.warnings.len());
    for warning in &status.warnings {
        match &warning.time {
            Some(time) => println!("  - {} ({})", warning.reason, time),
            None => println!("  - {}", warning.reason),
        }
    }

    if status.active_lock {
        println!("{}", "Chat is LOCKED.".red().bold());
    } else {
        println!("Chat is unlocked.");
    }
    Ok(())
}
