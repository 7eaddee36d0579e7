//! Interactive chat command
//!
//! Resolves the profile, replays history, refreshes the warning state,
//! then runs the read/send loop until the user quits or the session
//! ends.

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::api::client::ProfileLookup;
use crate::chat::session::{ChatSession, SendOutcome};
use crate::chat::transcript::{ChatMessage, Sender};
use crate::chat::warnings::WarningState;
use crate::commands::{build_client, with_login_hint};
use crate::config::Config;
use crate::error::Result;

/// Run the interactive chat loop
pub async fn run_chat(config: Config) -> Result<()> {
    let client = build_client(&config)?;
    let lookup = ProfileLookup::from_config(&config.profile)?;

    let profile = match client.fetch_profile(&lookup).await {
        Ok(profile) => profile,
        Err(e) if e.is_auth_failure() => return Err(with_login_hint(e)),
        Err(e) => {
            return Err(anyhow::anyhow!(
                "could not load your profile ({}). Run `syllachat profile set` first.",
                e
            ));
        }
    };

    println!(
        "{} | Roll: {} | Dept: {} | Class: {}",
        profile.name.bold(),
        profile.roll,
        profile.dept,
        profile.cls
    );

    let mut session = ChatSession::new(client, profile, config.chat.use_gemini);

    let replayed = session.load_history().await.map_err(with_login_hint)?;
    for message in session.transcript().messages() {
        render(message);
    }
    if replayed > 0 {
        tracing::debug!(count = replayed, "replayed chat history");
    }

    let state = session.refresh_status().await.map_err(with_login_hint)?;
    render_status(state);

    println!("{}", "Ask a syllabus question, or /quit to leave.".dimmed());

    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("you> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                let _ = editor.add_history_entry(&line);

                match session.send(&line).await {
                    Ok(SendOutcome::Reply(message)) => render(&message),
                    Ok(SendOutcome::RejectedOffTopic(message)) => {
                        render(&message);
                        render_status(session.warning_state());
                    }
                    Ok(SendOutcome::RejectedLocked) => {
                        println!(
                            "{}",
                            "Chat is locked due to repeated violations.".red().bold()
                        );
                    }
                    Ok(SendOutcome::RejectedEmpty) => continue,
                    Ok(SendOutcome::Busy) => {
                        println!("{}", "Still waiting on the previous message.".yellow());
                    }
                    Err(e) if e.is_auth_failure() => {
                        return Err(with_login_hint(e));
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    println!("Bye.");
    Ok(())
}

fn render(message: &ChatMessage) {
    let line = message.to_string();
    match message.sender {
        Sender::User => println!("{}", line.cyan()),
        Sender::Bot => println!("{}", line.green()),
    }
}

fn render_status(state: WarningState) {
    if state.locked {
        println!("{}", "Chat is locked due to repeated violations.".red().bold());
    } else if state.count > 0 {
        println!("{}", format!("Warnings: {}", state.count).yellow());
    }
}
