mod alert;
mod catalog;
mod cli;
mod session;
mod ticker;
mod ui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    install_tracing();

    let cli = Cli::parse();

    match cli.command {
        None => {
            cli::handle_play(None, session::DEFAULT_ROUND_MINUTES)?;
        }
        Some(Commands::Play { catalog, minutes }) => {
            cli::handle_play(catalog, minutes)?;
        }
        Some(Commands::Pick { catalog, category }) => {
            cli::handle_pick(catalog, category)?;
        }
        Some(Commands::List { catalog, category }) => {
            cli::handle_list(catalog, category)?;
        }
    }

    Ok(())
}

/// Logging is opt-in via RUST_LOG. The alternate screen owns stdout while a
/// game is running, so diagnostics go to stderr.
fn install_tracing() {
    let filter = EnvFilter::from_default_env();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
