use anyhow::Context;
use clap::Parser;

use textsum::cli::Cli;
use textsum::server::{init_tracing, AppServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = cli.load_config().context("Failed to load configuration")?;

    let mut server = AppServer::new(&config);
    let addr = server
        .try_bind(&config.server.bind_addr)
        .await
        .context("Failed to bind server")?;

    tracing::info!(
        inference = %config.inference.base_url,
        "Summarization form available at http://{}",
        addr
    );

    server.run().await?;
    Ok(())
}
