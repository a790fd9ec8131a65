use clap::Parser;
use tracing::error;

use inventory::adapter::inbound::cli::command::Cli;
use inventory::adapter::inbound::cli::{dispatch, output};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = dispatch::run(cli).await {
        error!(error = %e, "Fatal error");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
