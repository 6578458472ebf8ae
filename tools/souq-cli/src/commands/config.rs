//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&redacted(ctx));
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }
    ctx.output.kv("data_dir", &ctx.data_dir().display().to_string());

    let storefront = &ctx.config.storefront;
    ctx.output.info("");
    ctx.output.info("[storefront]");
    ctx.output.kv("api_base_url", &storefront.api_base_url);
    ctx.output.kv("asset_base_url", &storefront.asset_base_url);
    ctx.output.kv("currency", storefront.currency.code());
    ctx.output.kv("cart_key", &storefront.cart_key);
    ctx.output
        .kv("request_timeout_secs", &storefront.request_timeout_secs.to_string());
    ctx.output.kv(
        "auth_token",
        if storefront.auth_token().is_some() { "(set)" } else { "(none)" },
    );

    ctx.output.info("");
    ctx.output.info("[storefront.endpoints]");
    let endpoints = &storefront.endpoints;
    ctx.output.kv("categories", &endpoints.categories);
    ctx.output.kv("category_products", &endpoints.category_products);
    ctx.output.kv("stores", &endpoints.stores);
    ctx.output.kv("cart_add", &endpoints.cart_add);
    ctx.output.kv("order_create", &endpoints.order_create);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    match ctx.config.storefront.validate() {
        Ok(()) => {
            ctx.output.success("Configuration is valid");
            Ok(())
        }
        Err(errors) => {
            for error in &errors {
                ctx.output.error(&format!("Error: {}", error));
            }
            bail!("Configuration has {} error(s)", errors.len())
        }
    }
}

fn redacted(ctx: &Context) -> crate::config::CliConfig {
    let mut config = ctx.config.clone();
    if config.storefront.auth_token.is_some() {
        config.storefront.auth_token = Some("********".to_string());
    }
    config
}
