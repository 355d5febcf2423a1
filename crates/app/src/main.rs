//! KindHope Application CLI

use std::process;

use clap::Parser;
use kindhope_app::observability;
use tracing::error;

mod cli;

#[tokio::main]
pub async fn main() {
    _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = observability::init_subscriber(&cli.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    if let Err(message) = cli.run().await {
        error!(error = %message, "command failed");
        eprintln!("{message}");
        process::exit(1);
    }
}
