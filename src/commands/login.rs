//! Login and logout command handlers

use crate::commands::build_client;
use crate::config::Config;
use crate::error::Result;
use crate::session::credentials::{self, StoredCredentials};

/// Exchange credentials for a bearer token and store it
pub async fn run_login(config: Config, email: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_password()?,
    };

    let client = build_client(&config)?;
    let token = client.login(&email, &password).await?;

    credentials::save(&StoredCredentials {
        api_url: config.api.base_url.clone(),
        token,
    })?;

    println!("Logged in as {}. Token stored in the system keyring.", email);
    Ok(())
}

/// Remove stored credentials
pub fn run_logout() -> Result<()> {
    credentials::clear()?;
    println!("Logged out. Stored credentials removed.");
    Ok(())
}

fn prompt_password() -> Result<String> {
    let mut editor = rustyline::DefaultEditor::new()?;
    let password = editor.readline("password: ")?;
    Ok(password)
}
