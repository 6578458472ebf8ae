//! Catalog browsing against the marketplace backend.

use crate::config::StorefrontConfig;
use crate::envelope::{decode_records, normalize_envelope};
use crate::StorefrontError;
use futures::future::join_all;
use serde_json::Value;
use souq_commerce::catalog::{
    resolve_media_url, CatalogProduct, Category, ProductCard, ProductFilter, RawCategory, Store,
};
use souq_commerce::{CategoryId, StoreId};
use souq_data::FetchClient;
use std::collections::HashSet;
use std::sync::Arc;

/// Fetches and normalizes categories, stores and products.
#[derive(Debug, Clone)]
pub struct CatalogBrowser {
    client: FetchClient,
    config: Arc<StorefrontConfig>,
}

impl CatalogBrowser {
    pub fn new(client: FetchClient, config: Arc<StorefrontConfig>) -> Self {
        Self { client, config }
    }

    /// `GET /categories`.
    pub async fn list_categories(&self) -> Result<Vec<Category>, StorefrontError> {
        let body = self.get_json(&self.config.endpoints.categories).await?;
        let raw: Vec<RawCategory> =
            decode_records(normalize_envelope(body, &["categories"]), "category");
        let categories: Vec<Category> = raw
            .into_iter()
            .enumerate()
            .map(|(position, raw)| {
                let mut category = Category::from_raw(raw, position);
                category.image = category
                    .image
                    .map(|image| resolve_media_url(&self.config.asset_base_url, &image));
                category
            })
            .collect();
        tracing::debug!(count = categories.len(), "loaded categories");
        Ok(categories)
    }

    /// `GET /category/{id}/products`, priced for `store_context`.
    ///
    /// With a store context, only products that store lists are returned,
    /// each priced at that store's listing. Without one, every product is
    /// priced at its first listing.
    pub async fn list_products_for_category(
        &self,
        category_id: &CategoryId,
        store_context: Option<&StoreId>,
    ) -> Result<Vec<ProductCard>, StorefrontError> {
        let products = self.fetch_category_products(category_id).await?;
        let cards = self.resolve(products, store_context);
        tracing::debug!(%category_id, store = ?store_context, count = cards.len(), "loaded products");
        Ok(cards)
    }

    /// Products of one category narrowed by `filter`.
    ///
    /// `filter.store` doubles as the pricing context.
    pub async fn browse(
        &self,
        category_id: &CategoryId,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductCard>, StorefrontError> {
        let cards = self
            .list_products_for_category(category_id, filter.store.as_ref())
            .await?;
        Ok(filter.apply(cards))
    }

    /// `GET /stores`.
    pub async fn list_stores(&self) -> Result<Vec<Store>, StorefrontError> {
        let body = self.get_json(&self.config.endpoints.stores).await?;
        let stores: Vec<Store> = decode_records(normalize_envelope(body, &["stores"]), "store");
        tracing::debug!(count = stores.len(), "loaded stores");
        Ok(stores)
    }

    /// Search every category at once.
    ///
    /// Category product lists are fetched concurrently; a product listed in
    /// several categories appears once. A failing category fails the whole
    /// search so the shopper never sees silently partial results.
    pub async fn search_products(&self, filter: &ProductFilter) -> Result<Vec<ProductCard>, StorefrontError> {
        let categories = self.list_categories().await?;
        let fetches = categories
            .iter()
            .map(|category| self.fetch_category_products(&category.id));
        let results = join_all(fetches).await;

        let mut seen = HashSet::new();
        let mut products = Vec::new();
        for result in results {
            for product in result? {
                if seen.insert(product.id.clone()) {
                    products.push(product);
                }
            }
        }

        let cards = filter.apply(self.resolve(products, filter.store.as_ref()));
        tracing::debug!(categories = categories.len(), matches = cards.len(), "search finished");
        Ok(cards)
    }

    async fn fetch_category_products(
        &self,
        category_id: &CategoryId,
    ) -> Result<Vec<CatalogProduct>, StorefrontError> {
        let path = self.config.endpoints.category_products(category_id.as_str());
        let body = self.get_json(&path).await?;
        Ok(decode_records(
            normalize_envelope(body, &["product", "products"]),
            "product",
        ))
    }

    fn resolve(&self, products: Vec<CatalogProduct>, store_context: Option<&StoreId>) -> Vec<ProductCard> {
        products
            .iter()
            .filter(|p| store_context.map_or(true, |store| p.is_listed_by(store)))
            .map(|p| {
                let mut card = p.resolve(store_context, self.config.currency);
                card.image = card
                    .image
                    .map(|image| resolve_media_url(&self.config.asset_base_url, &image));
                card
            })
            .collect()
    }

    async fn get_json(&self, path: &str) -> Result<Value, StorefrontError> {
        let response = self
            .client
            .get(path)
            .maybe_bearer_auth(self.config.auth_token())
            .accept("application/json")
            .send()
            .await?
            .error_for_status()
            .inspect_err(|err| tracing::warn!(path, error = %err, "catalog request rejected"))?;
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(response.json()?)
    }
}
