//! Local cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use souq_commerce::catalog::ProductCard;
use souq_commerce::{CategoryId, ProductId, StoreId};
use souq_storefront::{CartSnapshot, Storefront};

use super::{shopper_error, CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add {
            product,
            category,
            store,
            quantity,
            server,
        } => {
            let product = find_product(
                &storefront,
                &CategoryId::new(category),
                &ProductId::new(product),
                store.map(StoreId::new),
            )
            .await?;
            add_product(ctx, &storefront, &product, quantity, server).await?;
        }
        CartCommand::Set { product, quantity } => {
            let product_id = ProductId::new(product);
            let found = storefront
                .cart_view()
                .set_quantity(&product_id, quantity)
                .map_err(shopper_error)?;
            report_change(ctx, found, &product_id, "Updated");
        }
        CartCommand::Inc { product } => {
            let product_id = ProductId::new(product);
            let found = storefront.cart_view().increment(&product_id).map_err(shopper_error)?;
            report_change(ctx, found, &product_id, "Updated");
        }
        CartCommand::Dec { product } => {
            let product_id = ProductId::new(product);
            let found = storefront.cart_view().decrement(&product_id).map_err(shopper_error)?;
            report_change(ctx, found, &product_id, "Updated");
        }
        CartCommand::Remove { product } => {
            let product_id = ProductId::new(product);
            let found = storefront.cart_view().remove(&product_id).map_err(shopper_error)?;
            report_change(ctx, found, &product_id, "Removed");
        }
        CartCommand::Clear { yes } => {
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt("Remove every item from the cart?")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Cart left unchanged");
                    return Ok(());
                }
            }
            storefront.cart_view().clear().map_err(shopper_error)?;
            ctx.output.success("Cart cleared");
        }
    }

    let snapshot = storefront.cart_view().snapshot().map_err(shopper_error)?;
    render_cart(ctx, &snapshot);
    Ok(())
}

/// Resolve a product for purchase.
///
/// Without an explicit store, the cart's store is preferred so the product
/// is priced where the cart is already buying. A product that store does
/// not list falls back to its first listing, and the add then reports the
/// conflict.
async fn find_product(
    storefront: &Storefront,
    category_id: &CategoryId,
    product_id: &ProductId,
    store: Option<StoreId>,
) -> Result<ProductCard> {
    let explicit = store.is_some();
    let context = store.or_else(|| storefront.cart().store_context().map(|s| s.store_id));

    let catalog = storefront.catalog();
    let products = catalog
        .list_products_for_category(category_id, context.as_ref())
        .await
        .map_err(shopper_error)?;
    if let Some(product) = products.into_iter().find(|p| &p.id == product_id) {
        return Ok(product);
    }

    if context.is_some() && !explicit {
        let products = catalog
            .list_products_for_category(category_id, None)
            .await
            .map_err(shopper_error)?;
        if let Some(product) = products.into_iter().find(|p| &p.id == product_id) {
            return Ok(product);
        }
    }

    match context {
        Some(store) if explicit => {
            bail!("Product {product_id} is not sold by store {store} in category {category_id}")
        }
        _ => bail!("Product {product_id} not found in category {category_id}"),
    }
}

async fn add_product(
    ctx: &Context,
    storefront: &Storefront,
    product: &ProductCard,
    quantity: i64,
    server: bool,
) -> Result<()> {
    let item = product.to_cart_item().map_err(|e| shopper_error(e.into()))?;
    storefront
        .cart()
        .add_item(item.with_quantity(quantity))
        .map_err(shopper_error)?;
    ctx.output.success(&format!(
        "Added {} x {} from {}",
        quantity, product.name, product.store_name
    ));

    if server {
        let message = storefront
            .server_cart()
            .add_product(product, quantity)
            .await
            .map_err(shopper_error)?;
        ctx.output.success(&message);
    }
    Ok(())
}

fn report_change(ctx: &Context, found: bool, product_id: &ProductId, verb: &str) {
    if found {
        ctx.output.success(&format!("{verb} {product_id}"));
    } else {
        ctx.output.warn(&format!("Product {product_id} is not in the cart"));
    }
}

fn render_cart(ctx: &Context, snapshot: &CartSnapshot) {
    if ctx.output.is_json() {
        ctx.output.json(snapshot);
        return;
    }

    ctx.output.header("Cart");
    if snapshot.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }
    if let Some(banner) = snapshot.store_banner() {
        ctx.output.info(&banner);
    }
    for line in &snapshot.lines {
        let quantity = format!("x{}", line.item.quantity);
        let unit = line.item.unit_price.display();
        let total = line.line_total.display();
        ctx.output.table_row(
            &[
                line.item.product_id.as_str(),
                &truncate(&line.item.name, 28),
                &quantity,
                &unit,
                &total,
            ],
            &[6, 28, 6, 10, 10],
        );
    }
    ctx.output.kv("Items", &snapshot.item_count.to_string());
    ctx.output.kv("Total", &snapshot.total.display());
}
