//! Syllachat - student syllabus chatbot client
//!
//! Main entry point for the Syllachat CLI.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use syllachat::cli::{Cli, Commands, ProfileCommand};
use syllachat::commands;
use syllachat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    let config = Config::load(&cli.config)?;
    config.validate()?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::login::run_login(config, email, password).await
        }
        Commands::Logout => commands::login::run_logout(),
        Commands::Chat => {
            tracing::info!("starting interactive chat");
            commands::chat::run_chat(config).await
        }
        Commands::Profile { command } => match command {
            ProfileCommand::Show => commands::profile::run_show(config).await,
            ProfileCommand::Set {
                name,
                roll,
                dept,
                class,
            } => commands::profile::run_set(config, name, roll, dept, class).await,
        },
        Commands::Status => commands::status::run_status(config).await,
        Commands::Bgcolor { color } => commands::profile::run_bgcolor(config, color).await,
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "syllachat=debug" } else { "syllachat=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
