mod args;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use args::{Cli, Command};
use forge_store::{default_store_root, FileStore};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_filter = if cli.quiet {
        EnvFilter::new("off")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("forge_cli=info"))
    };
    tracing_subscriber::fmt().with_env_filter(log_filter).init();

    let store_root = cli.store.clone().unwrap_or_else(default_store_root);
    let mut store = FileStore::open(store_root, &cli.owner);

    let result = run(&mut store, cli.command).await;

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("forge: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(store: &mut FileStore, command: Command) -> anyhow::Result<bool> {
    match command {
        Command::Log { action, from, to } => {
            commands::log(store, &action, from.as_deref(), to.as_deref())?;
            Ok(true)
        }
        Command::Verify => commands::verify(store),
        Command::Seal => {
            commands::seal(store)?;
            Ok(true)
        }
        Command::Witness { bilateral } => {
            commands::witness(store, bilateral.as_deref())?;
            Ok(true)
        }
        Command::Anchor { upgrade } => {
            commands::anchor(store, upgrade).await?;
            Ok(true)
        }
        Command::Status => {
            commands::status(store)?;
            Ok(true)
        }
        Command::Export { out } => {
            commands::export(store, out)?;
            Ok(true)
        }
        Command::History { n } => {
            commands::history(store, n)?;
            Ok(true)
        }
    }
}
