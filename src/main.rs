use anyhow::Result;
use clap::Parser;
use guard_docker::cli::Cli;
use guard_docker::utils;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first so --verbose reaches the logger
    let cli = Cli::parse();
    utils::logger::init(cli.verbose)?;

    cli.execute().await
}
