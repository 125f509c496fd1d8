use std::io;

use anyhow::Context;
use shop_cli::{app_config::Config, Shell};
use shop_core::CatalogService;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let seed = config
        .catalog
        .seed_products()
        .context("Invalid product in catalog seed")?;
    tracing::info!("Starting shop with {} seed products", seed.len());

    let service = CatalogService::with_layout(seed)?;
    let stdin = io::stdin();
    let mut shell = Shell::new(service, stdin.lock(), io::stdout(), config.shell.clone());
    shell.run()?;

    Ok(())
}
