//! Souq CLI - Browse the marketplace and manage a cart from the terminal.
//!
//! Commands:
//! - `souq categories` - List categories
//! - `souq stores` - List stores
//! - `souq products` - List a category's products
//! - `souq search` - Search every category
//! - `souq cart` - Show and edit the cart
//! - `souq checkout` - Place an order for the cart
//! - `souq config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CartArgs, CheckoutArgs, ConfigArgs, ProductsArgs, SearchArgs};

/// Souq CLI - Shop one store at a time from the terminal
#[derive(Parser)]
#[command(name = "souq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List product categories
    Categories,

    /// List stores
    Stores,

    /// List the products of a category
    Products(ProductsArgs),

    /// Search products across every category
    Search(SearchArgs),

    /// Show and edit the cart
    Cart(CartArgs),

    /// Place an order for the cart
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Categories => commands::catalog::categories(&ctx).await,
        Commands::Stores => commands::catalog::stores(&ctx).await,
        Commands::Products(args) => commands::catalog::products(args, &ctx).await,
        Commands::Search(args) => commands::catalog::search(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
