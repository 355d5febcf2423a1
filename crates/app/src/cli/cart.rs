use std::{io, path::PathBuf, sync::Arc};

use clap::{Args, Subcommand};
use kindhope::{fixtures::CartFixture, report::CartReport};
use kindhope_app::{
    auth::{Identity, UserId},
    domain::carts::{CartSession, MemoryCartStore, TracingNotifier},
};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    Show(ShowCartArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ShowCartArgs {
    /// YAML cart fixture
    #[arg(long)]
    file: PathBuf,

    /// ISO currency code used for totals
    #[arg(long, default_value = "LKR")]
    currency: String,

    /// User whose cart is shown
    #[arg(long, default_value = "local")]
    user: String,
}

pub(crate) async fn run(command: CartCommand) -> Result<(), String> {
    match command.command {
        CartSubcommand::Show(args) => show(args).await,
    }
}

async fn show(args: ShowCartArgs) -> Result<(), String> {
    let currency = rusty_money::iso::find(&args.currency)
        .ok_or_else(|| format!("unknown currency: {}", args.currency))?;

    let fixture = CartFixture::from_path(&args.file)
        .map_err(|error| format!("failed to load {}: {error}", args.file.display()))?;

    let user = UserId::from(args.user.as_str());
    let store = MemoryCartStore::new();

    store.seed(&user, fixture.lines.clone());

    let mut session = CartSession::new(
        Identity::User(user),
        Arc::new(store),
        Arc::new(TracingNotifier),
    );

    session
        .start()
        .await
        .map_err(|error| format!("failed to open cart: {error}"))?;

    session
        .next_snapshot()
        .await
        .map_err(|error| format!("failed to read cart: {error}"))?;

    let deselections = fixture
        .pending_deselections(session.cart())
        .map_err(|error| format!("invalid fixture {}: {error}", args.file.display()))?;

    for id in deselections {
        session
            .toggle_select(id)
            .map_err(|error| format!("failed to deselect {id}: {error}"))?;
    }

    CartReport::new(session.cart(), currency)
        .write_to(io::stdout().lock())
        .map_err(|error| format!("failed to print cart: {error}"))?;

    session.stop();

    Ok(())
}
