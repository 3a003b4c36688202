//! GoMarketplace CLI - Inspect and edit the local cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! gm-cart list
//!
//! # Add a product (or bump its quantity if already present)
//! gm-cart add --id shoe-42 --title "Running Shoe" --image-url https://cdn/shoe.png --price 199.90
//!
//! # Change quantities
//! gm-cart increment shoe-42
//! gm-cart decrement shoe-42
//! ```
//!
//! # Environment Variables
//!
//! - `CART_STORAGE_DIR` - Directory holding the cart record
//! - `CART_STORAGE_KEY` - Record key (default: `@GoMarketplace:products`)
//! - `RUST_LOG` - Log filter (default: `go_marketplace_cart=info,gm_cart=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use go_marketplace_cart::{CartConfig, CartStore, LoadOutcome, Price, provide};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "gm-cart")]
#[command(author, version, about = "GoMarketplace cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every line item with totals
    List,
    /// Add a product to the cart
    Add {
        /// Product ID
        #[arg(long)]
        id: String,

        /// Display title
        #[arg(long)]
        title: String,

        /// Product image URL
        #[arg(long)]
        image_url: String,

        /// Unit price (e.g. 19.99)
        #[arg(long)]
        price: Price,
    },
    /// Raise a product's quantity by one
    Increment {
        /// Product ID
        id: String,
    },
    /// Lower a product's quantity by one, removing it at zero
    Decrement {
        /// Product ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "go_marketplace_cart=info,gm_cart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    tracing::debug!(dir = %config.storage_dir.display(), key = %config.storage_key, "Opening cart");

    let store = CartStore::from_config(&config);
    if let LoadOutcome::Discarded(e) = store.load().await {
        tracing::warn!("Starting with an empty cart: {e}");
    }

    provide(store, async move {
        match cli.command {
            Commands::List => commands::cart::list()?,
            Commands::Add {
                id,
                title,
                image_url,
                price,
            } => commands::cart::add(id, title, image_url, price).await?,
            Commands::Increment { id } => commands::cart::increment(id).await?,
            Commands::Decrement { id } => commands::cart::decrement(id).await?,
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })
    .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "gm-cart",
            "add",
            "--id",
            "shoe-42",
            "--title",
            "Running Shoe",
            "--image-url",
            "https://cdn/shoe.png",
            "--price",
            "199.90",
        ])
        .unwrap();

        match cli.command {
            Commands::Add { id, price, .. } => {
                assert_eq!(id, "shoe-42");
                assert_eq!(price, Price::from_cents(19990));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_rejects_non_numeric_price() {
        let result = Cli::try_parse_from([
            "gm-cart", "add", "--id", "a", "--title", "A", "--image-url", "", "--price", "cheap",
        ]);
        assert!(result.is_err());
    }
}
