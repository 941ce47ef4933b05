mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;
use config::Config;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trove=warn,trove_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Configure {
            show,
            balance,
            bet,
            seed,
            spin_cost,
        } => {
            let update = commands::configure::Update {
                balance,
                bet,
                seed,
                spin_cost,
            };
            commands::configure::handle(update, show)?;
        }

        Commands::Slots { command } => {
            let config = Config::load()?;
            commands::slots::handle(command, &config)?;
        }

        Commands::Coin { command } => {
            let config = Config::load()?;
            commands::coin::handle(command, &config)?;
        }

        Commands::Rarity { command } => {
            commands::rarity::handle(command)?;
        }

        Commands::Collection { command } => {
            commands::collection::handle(command)?;
        }
    }

    Ok(())
}
