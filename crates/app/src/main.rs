use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};

use services::{AppServices, Clock};

mod cli;
mod commands;
mod db;
mod desktop;
mod logging;

use cli::{Cli, Command};

async fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings()?;
    debug!(?settings, "resolved settings");

    // Open + migrate SQLite at startup.
    db::prepare_sqlite_file(&settings.db_url)?;
    let services = AppServices::new_sqlite(
        &settings.db_url,
        &settings.api,
        Clock::default_clock(),
        settings.session_id,
    )
    .await
    .with_context(|| format!("failed to open {}", settings.db_url))?;
    info!(
        session = %services.session_id(),
        api = %settings.api.base_url,
        "services ready"
    );

    match cli.command.unwrap_or(Command::Ui) {
        Command::Ui => {
            desktop::launch(services, settings.api.base_url.to_string());
            Ok(())
        }
        command => commands::run(command, &services).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = logging::init_logging(cli.verbose) {
        eprintln!("{err:#}");
        std::process::exit(2);
    }

    if let Err(err) = run(cli).await {
        error!("{err:#}");
        std::process::exit(2);
    }
}
