use anyhow::Context;
use clap::Parser;
use coord_extractor::cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).await.context("Processing failed")
}
