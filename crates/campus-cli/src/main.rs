use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod cli;
mod commands;

use crate::cli::{Cli, Command};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "campus=info,campus_core=info,campus_http=info,warn".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let manager = commands::connect(cli.api_url)?;

    match cli.command {
        Command::Login(args) => commands::run_login(&manager, &args).await,
        Command::Logout => commands::run_logout(&manager),
        Command::Whoami => commands::run_whoami(&manager).await,
        Command::List { entity } => commands::run_list(&manager, entity).await,
        Command::Cascade(args) => commands::run_cascade(&manager, &args).await,
        Command::Routine(args) => commands::run_routine(&manager, &args).await,
        Command::Enroll(args) => commands::run_enroll(&manager, &args).await,
    }
}
