//! Catalog browsing commands.

use anyhow::{anyhow, Result};
use souq_commerce::catalog::{ProductCard, ProductFilter};
use souq_commerce::{CategoryId, Currency, Money};
use souq_storefront::Storefront;

use super::{ProductsArgs, SearchArgs};
use crate::context::Context;
use crate::output::{sale_badge, truncate};

/// List categories.
pub async fn categories(ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;
    let spinner = ctx.output.spinner("Loading categories...");
    let categories = storefront.catalog().list_categories().await;
    spinner.finish_and_clear();
    let categories = categories?;

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header(&format!("Categories ({})", categories.len()));
    for category in &categories {
        ctx.output.table_row(
            &[category.id.as_str(), &category.name, category.icon.as_str()],
            &[6, 28, 12],
        );
    }
    Ok(())
}

/// List stores.
pub async fn stores(ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;
    let spinner = ctx.output.spinner("Loading stores...");
    let stores = storefront.catalog().list_stores().await;
    spinner.finish_and_clear();
    let stores = stores?;

    if ctx.output.is_json() {
        ctx.output.json(&stores);
        return Ok(());
    }

    ctx.output.header(&format!("Stores ({})", stores.len()));
    for store in &stores {
        let rating = format!("{:.1} ({})", store.rating, store.raters_number);
        ctx.output.table_row(
            &[
                store.id.as_str(),
                &truncate(&store.name, 28),
                &truncate(&store.location, 24),
                &rating,
                &store.state,
            ],
            &[6, 28, 24, 12, 8],
        );
    }
    Ok(())
}

/// List a category's products.
pub async fn products(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;
    let filter = build_filter(
        storefront.config().currency,
        args.store,
        args.min_price.as_deref(),
        args.max_price.as_deref(),
        args.search,
    )?;
    let category_id = CategoryId::new(args.category);

    let spinner = ctx.output.spinner("Loading products...");
    let products = storefront.catalog().browse(&category_id, &filter).await;
    spinner.finish_and_clear();
    let products = products?;

    render_products(ctx, &storefront, &format!("Category {category_id}"), &products);
    Ok(())
}

/// Search every category.
pub async fn search(args: SearchArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;
    let filter = build_filter(
        storefront.config().currency,
        args.store,
        None,
        None,
        Some(args.query.clone()),
    )?;

    let spinner = ctx.output.spinner("Searching...");
    let products = storefront.catalog().search_products(&filter).await;
    spinner.finish_and_clear();
    let products = products?;

    render_products(ctx, &storefront, &format!("Results for \"{}\"", args.query), &products);
    Ok(())
}

fn build_filter(
    currency: Currency,
    store: Option<String>,
    min_price: Option<&str>,
    max_price: Option<&str>,
    query: Option<String>,
) -> Result<ProductFilter> {
    let mut filter = ProductFilter::new()
        .with_price_range(parse_price(min_price, currency)?, parse_price(max_price, currency)?);
    if let Some(store) = store {
        filter = filter.with_store(store);
    }
    if let Some(query) = query {
        filter = filter.with_query(query);
    }
    Ok(filter)
}

fn parse_price(input: Option<&str>, currency: Currency) -> Result<Option<Money>> {
    input
        .map(|raw| {
            Money::parse_decimal(raw, currency).ok_or_else(|| anyhow!("Invalid price: {raw}"))
        })
        .transpose()
}

fn render_products(ctx: &Context, storefront: &Storefront, title: &str, products: &[ProductCard]) {
    if ctx.output.is_json() {
        ctx.output.json(&products);
        return;
    }

    ctx.output.header(&format!("{title} ({})", products.len()));
    if let Some(store) = storefront.cart().store_context() {
        ctx.output.debug(&format!("cart is from {}", store.store_name));
    }
    for product in products {
        let price = product.price.display();
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &truncate(&product.name, 28),
                &price,
                &truncate(&product.store_name, 22),
                &sale_badge(product.sale_label()),
            ],
            &[6, 28, 10, 22, 12],
        );
        if let Some(offer) = &product.offer_description {
            ctx.output.kv("offer", offer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter() {
        let filter = build_filter(
            Currency::USD,
            Some("7".into()),
            Some("1.50"),
            None,
            Some("  Tea ".into()),
        )
        .unwrap();
        assert_eq!(filter.store.as_ref().map(|s| s.as_str()), Some("7"));
        assert_eq!(filter.min_price, Some(Money::new(150, Currency::USD)));
        assert_eq!(filter.max_price, None);
        assert_eq!(filter.query.as_deref(), Some("tea"));
    }

    #[test]
    fn test_invalid_price_is_rejected() {
        assert!(parse_price(Some("cheap"), Currency::USD).is_err());
        assert_eq!(parse_price(None, Currency::USD).unwrap(), None);
    }
}
