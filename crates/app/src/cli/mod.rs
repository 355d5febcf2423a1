use clap::{Parser, Subcommand};
use kindhope_app::config::LoggingConfig;

mod cart;
mod embed;

#[derive(Debug, Parser)]
#[command(name = "kindhope", about = "KindHope Mart CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Cart(cart::CartCommand),
    Embed(embed::EmbedArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Cart(command) => cart::run(command).await,
            Commands::Embed(args) => embed::run(args).await,
        }
    }
}
