//! Checkout command.

use anyhow::Result;
use chrono::Local;
use dialoguer::Confirm;
use souq_storefront::StorefrontError;

use super::{shopper_error, CheckoutArgs};
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;
    let snapshot = storefront.cart_view().snapshot().map_err(shopper_error)?;
    if snapshot.is_empty() {
        return Err(shopper_error(StorefrontError::EmptyCart));
    }

    ctx.output.header("Checkout");
    if let Some(banner) = snapshot.store_banner() {
        ctx.output.info(&banner);
    }
    ctx.output.kv("Items", &snapshot.item_count.to_string());
    ctx.output.kv("Total", &snapshot.total.display());

    if !args.yes && !ctx.output.is_json() {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt("Place this order?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Placing order...");
    let result = storefront.checkout().submit(storefront.cart()).await;
    spinner.finish_and_clear();

    let receipt = match result {
        Ok(receipt) => receipt,
        Err(err) => {
            if err.is_retryable() {
                ctx.output
                    .warn("Your cart was kept. Run `souq checkout` again to retry.");
            }
            return Err(shopper_error(err));
        }
    };

    if ctx.output.is_json() {
        ctx.output.json(&receipt);
        return Ok(());
    }

    ctx.output.success(&receipt.message);
    if let Some(order_id) = &receipt.order_id {
        ctx.output.kv("Order", order_id.as_str());
    }
    ctx.output.kv("Total", &receipt.total.display());
    ctx.output.kv(
        "Placed",
        &receipt
            .placed_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
    );
    Ok(())
}
