use catalog_client::cli::args::CatalogArgs;
use catalog_client::cli::commands::execute_command;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = CatalogArgs::parse();

    if let Err(e) = execute_command(args).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
