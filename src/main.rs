use alert_accounts::cli::{self, Cli, Command};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Register(args) => cli::register::run(args).await,
        Command::Login(args) => cli::login::run(args).await,
        Command::Alerts(args) => cli::alerts::run(args).await,
    }
}
