mod products;
mod render;
mod shop;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use storefront_core::{AppConfig, Catalog, CategoryFilter};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Browse the catalog, fill a cart, and check out from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List catalog products
    Products {
        /// Restrict to a category (electronics, clothing, accessories, all)
        #[arg(long)]
        category: Option<CategoryFilter>,
        /// Case-insensitive match against name and description
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one product with related suggestions
    Product {
        /// Product id, e.g. 3
        id: String,
    },
    /// Start an interactive shopping session (the default)
    Shop,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = storefront_core::load_app_config().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?,
        )
        .with_writer(std::io::stderr)
        .init();

    let catalog = Arc::new(load_catalog(&config)?);
    tracing::debug!(
        env = %config.env,
        products = catalog.len(),
        "storefront starting"
    );

    match cli.command {
        Some(Commands::Products { category, search }) => {
            products::list(&catalog, category, search.as_deref());
        }
        Some(Commands::Product { id }) => {
            products::show(&catalog, &id, config.related_limit);
        }
        Some(Commands::Shop) | None => shop::run_shop(catalog, &config).await?,
    }

    Ok(())
}

fn load_catalog(config: &AppConfig) -> anyhow::Result<Catalog> {
    match &config.catalog_path {
        Some(path) => storefront_core::load_catalog(path)
            .with_context(|| format!("failed to load catalog from {}", path.display())),
        None => Catalog::builtin().context("built-in catalog is invalid"),
    }
}

#[cfg(test)]
mod tests;
