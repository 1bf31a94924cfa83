use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mozik_app::App;
use mozik_config::load as load_config;
use mozik_runtime::{shutdown_signal, telemetry, AppServices};
use tracing::info;

mod command;
mod session;

#[derive(Debug, Parser)]
#[command(name = "mozik", version, about = "Drive the Mozik app from a terminal")]
struct Cli {
    /// Configuration file to load instead of ./mozik.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Keep preferences in memory for this session only
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.config {
        std::env::set_var("MOZIK_CONFIG", path);
    }

    telemetry::init_tracing()?;
    info!("starting Mozik");

    let config = load_config().context("failed to load configuration")?;
    let services = if cli.ephemeral {
        AppServices::ephemeral(&config).await?
    } else {
        AppServices::initialise(&config).await?
    };

    let mut app = App::start(services.store, services.auth);
    let mut input = session::spawn_line_reader(std::io::stdin());
    let mut stdout = std::io::stdout();

    tokio::select! {
        result = session::run_session(&mut app, &mut input, &mut stdout) => result?,
        _ = shutdown_signal() => {}
    }

    drop(app);
    info!("Mozik shut down");
    Ok(())
}
