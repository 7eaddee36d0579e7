//! Profile and background color command handlers

use colored::Colorize;

use crate::api::client::ProfileLookup;
use crate::chat::session::{ChatSession, ProfileInput};
use crate::commands::{build_client, with_login_hint};
use crate::config::Config;
use crate::error::Result;

/// Fetch and print the profile using the configured lookup strategy
pub async fn run_show(config: Config) -> Result<()> {
    let client = build_client(&config)?;
    let lookup = ProfileLookup::from_config(&config.profile)?;

    let profile = client
        .fetch_profile(&lookup)
        .await
        .map_err(with_login_hint)?;

    println!("{}:  {}", "Name".bold(), profile.name);
    println!("{}:  {}", "Roll".bold(), profile.roll);
    println!("{}:  {}", "Dept".bold(), profile.dept);
    println!("{}: {}", "Class".bold(), profile.cls);
    if let Some(bg) = &profile.bg_color {
        println!("{}: {}", "Background".bold(), bg);
    }
    Ok(())
}

/// Validate and submit the profile
pub async fn run_set(
    config: Config,
    name: String,
    roll: String,
    dept: String,
    class: String,
) -> Result<()> {
    let client = build_client(&config)?;
    let input = ProfileInput {
        name,
        roll,
        dept,
        cls: class,
    };

    let profile = ChatSession::submit_profile(&client, input)
        .await
        .map_err(with_login_hint)?;

    println!("Profile saved for {} ({}).", profile.name, profile.roll);
    Ok(())
}

/// Persist the dashboard background color preference
///
/// The roll is resolved from the stored profile first; the save itself
/// is best-effort on the backend side but a local failure to resolve
/// the profile is reported.
pub async fn run_bgcolor(config: Config, color: String) -> Result<()> {
    let client = build_client(&config)?;
    let lookup = ProfileLookup::from_config(&config.profile)?;

    let profile = client
        .fetch_profile(&lookup)
        .await
        .map_err(with_login_hint)?;

    client
        .save_bg_color(&profile.roll, &color)
        .await
        .map_err(with_login_hint)?;

    println!("Background color saved: {}", color);
    Ok(())
}
