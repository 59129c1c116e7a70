use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tootfetch::app::AppContext;
use tootfetch::cli::{commands, Cli, Commands, ConfigAction};
use tootfetch::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Some(Commands::Config {
        action: ConfigAction::Path,
    }) = cli.command
    {
        commands::config_path(cli.config)?;
        return Ok(());
    }

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config)?;

    match cli.command {
        Some(Commands::Fetch {
            url,
            count,
            output,
            stdout,
        }) => {
            commands::fetch(&ctx, &url, count, output, stdout).await?;
        }
        Some(Commands::Tui) | None => {
            tootfetch::tui::run(Arc::new(ctx)).await?;
        }
        Some(Commands::Config { .. }) => {}
    }

    Ok(())
}
