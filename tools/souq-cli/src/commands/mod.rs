//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Category to list.
    #[arg(long)]
    pub category: String,

    /// Only products this store lists, priced at its listing.
    #[arg(short, long)]
    pub store: Option<String>,

    /// Minimum price, inclusive (e.g. 2.50).
    #[arg(long)]
    pub min_price: Option<String>,

    /// Maximum price, inclusive.
    #[arg(long)]
    pub max_price: Option<String>,

    /// Case-insensitive text to find in name or description.
    #[arg(long)]
    pub search: Option<String>,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Text to find in name or description.
    pub query: String,

    /// Only products this store lists.
    #[arg(short, long)]
    pub store: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add a product from a category listing.
    Add {
        /// Product ID.
        product: String,

        /// Category the product is listed in.
        #[arg(long)]
        category: String,

        /// Store to buy from (default: the cart's store, else the first listing).
        #[arg(short, long)]
        store: Option<String>,

        /// Units to add.
        #[arg(short, long, default_value = "1")]
        quantity: i64,

        /// Also add to the server-side cart.
        #[arg(long)]
        server: bool,
    },
    /// Set a line's quantity; zero or less removes it.
    Set {
        /// Product ID.
        product: String,
        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// One more unit.
    Inc {
        /// Product ID.
        product: String,
    },
    /// One fewer unit; the last unit removes the line.
    Dec {
        /// Product ID.
        product: String,
    },
    /// Remove a line.
    Remove {
        /// Product ID.
        product: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the configuration.
    Validate,
}

/// Turn a storefront failure into the message the shopper should see.
pub(crate) fn shopper_error(err: souq_storefront::StorefrontError) -> anyhow::Error {
    tracing::debug!(error = ?err, "storefront call failed");
    anyhow::anyhow!(err.user_message())
}
