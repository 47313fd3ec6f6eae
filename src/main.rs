use clap::Parser;
use query_router::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::BuildIndex(args) => cli::index::run(args).await,
        Command::Ask(args) => cli::ask::run(args).await,
    }
}
