//! Catalog browsing against a mocked backend.

use serde_json::{json, Value};
use souq_cache::Cache;
use souq_commerce::catalog::ProductFilter;
use souq_commerce::{CategoryId, Currency, Money, StoreId};
use souq_data::{Method, MockTransport};
use souq_storefront::{CatalogRequest, CatalogView, Storefront, StorefrontConfig, StorefrontError};
use std::sync::Arc;

fn storefront(mock: &Arc<MockTransport>) -> Storefront {
    let config = StorefrontConfig {
        api_base_url: "http://shop.test/api".to_string(),
        asset_base_url: "http://shop.test/storage".to_string(),
        ..Default::default()
    };
    Storefront::new(config, mock.clone(), Cache::memory())
}

fn listing(store: u32, name: &str, price: &str, listing_id: u32) -> Value {
    json!({
        "id": store,
        "store_name": name,
        "pivot": { "price": price, "sale_status": "available", "store_product_id": listing_id }
    })
}

fn products() -> Value {
    json!([
        {
            "id": 1, "product_name": "Olive Oil", "desc": "Cold pressed", "prod_image": "products/oil.png",
            "stores": [listing(1, "Idlib Farms", "12.00", 11), listing(2, "Tartus Market", "10.50", 21)]
        },
        {
            "id": 2, "product_name": "Dates",
            "stores": [listing(2, "Tartus Market", "4.25", 22)]
        },
        { "id": 3, "product_name": "Mystery Box", "stores": [] }
    ])
}

#[tokio::test]
async fn data_envelope_is_normalized() {
    let mock = Arc::new(
        MockTransport::new().with_json(Method::Get, "/category/5/products", 200, json!({ "data": products() })),
    );
    let cards = storefront(&mock)
        .catalog()
        .list_products_for_category(&CategoryId::new("5"), None)
        .await
        .unwrap();
    assert_eq!(cards.len(), 3);
}

#[tokio::test]
async fn category_envelopes_are_all_accepted() {
    let rows = json!([{ "id": 1, "name": "Food" }, { "name": "Home & Kitchen", "image": "cats/home.png" }]);
    for body in [
        rows.clone(),
        json!({ "categories": rows.clone() }),
        json!({ "data": rows.clone() }),
        json!({ "items": rows.clone() }),
    ] {
        let mock = Arc::new(MockTransport::new().with_json(Method::Get, "/categories", 200, body));
        let categories = storefront(&mock).catalog().list_categories().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].id.as_str(), "2");
        assert_eq!(categories[1].description, "Explore Home & Kitchen");
        assert_eq!(
            categories[1].image.as_deref(),
            Some("http://shop.test/storage/cats/home.png")
        );
    }
}

#[tokio::test]
async fn price_follows_store_context() {
    let mock = Arc::new(
        MockTransport::new().with_json(Method::Get, "/category/5/products", 200, products()),
    );
    let shop = storefront(&mock);
    let category = CategoryId::new("5");

    let no_context = shop.catalog().list_products_for_category(&category, None).await.unwrap();
    assert_eq!(no_context[0].price, Money::new(1200, Currency::USD));
    assert_eq!(no_context[0].store_name, "Idlib Farms");
    assert!(no_context[2].price.is_zero());
    assert_eq!(no_context[2].store_name, "Unknown Store");
    assert_eq!(
        no_context[0].image.as_deref(),
        Some("http://shop.test/storage/products/oil.png")
    );

    let tartus = StoreId::new("2");
    let in_store = shop
        .catalog()
        .list_products_for_category(&category, Some(&tartus))
        .await
        .unwrap();
    let names: Vec<&str> = in_store.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Olive Oil", "Dates"]);
    assert_eq!(in_store[0].price, Money::new(1050, Currency::USD));
    assert_eq!(in_store[0].store_product_id.as_ref().map(|id| id.as_str()), Some("21"));
}

#[tokio::test]
async fn browse_applies_filter() {
    let mock = Arc::new(
        MockTransport::new().with_json(Method::Get, "/category/5/products", 200, products()),
    );
    let filter = ProductFilter::new()
        .with_store("2")
        .with_price_range(None, Some(Money::new(500, Currency::USD)));
    let cards = storefront(&mock)
        .catalog()
        .browse(&CategoryId::new("5"), &filter)
        .await
        .unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name, "Dates");
}

#[tokio::test]
async fn stores_get_fallbacks() {
    let mock = Arc::new(MockTransport::new().with_json(
        Method::Get,
        "/stores",
        200,
        json!({ "stores": [{ "id": 1, "store_name": "Idlib Farms", "rate": 4 }, { "id": 2 }] }),
    ));
    let stores = storefront(&mock).catalog().list_stores().await.unwrap();
    assert_eq!(stores.len(), 2);
    assert_eq!(stores[0].rating, 4.0);
    assert_eq!(stores[1].location, "Unknown Location");
    assert_eq!(stores[1].open_hours, "Hours not specified");
}

#[tokio::test]
async fn search_spans_categories_without_duplicates() {
    let mock = Arc::new(
        MockTransport::new()
            .with_json(Method::Get, "/categories", 200, json!([{ "id": 5 }, { "id": 6 }]))
            .with_json(Method::Get, "/category/5/products", 200, products())
            .with_json(
                Method::Get,
                "/category/6/products",
                200,
                json!({ "products": [
                    { "id": 1, "product_name": "Olive Oil", "stores": [listing(1, "Idlib Farms", "12.00", 11)] },
                    { "id": 7, "product_name": "Olive Soap", "stores": [listing(3, "Aleppo Soap", "3.00", 31)] }
                ]}),
            ),
    );
    let cards = storefront(&mock)
        .catalog()
        .search_products(&ProductFilter::new().with_query("olive"))
        .await
        .unwrap();
    let names: Vec<&str> = cards.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Olive Oil", "Olive Soap"]);
    assert_eq!(mock.call_count(), 3);
}

#[tokio::test]
async fn failed_fetch_is_retryable_and_keeps_view_data() {
    let mock = Arc::new(
        MockTransport::new().with_json(Method::Get, "/category/5/products", 200, products()),
    );
    let shop = storefront(&mock);
    let category = CategoryId::new("5");
    let mut view = CatalogView::new();

    let ticket = view.begin(CatalogRequest::Products { category_id: category.clone(), store: None });
    view.apply(ticket, shop.catalog().list_products_for_category(&category, None).await);
    assert_eq!(view.data().map(Vec::len), Some(3));

    mock.set_text(Method::Get, "/category/5/products", 500, "Server Error");
    let ticket = view.begin(CatalogRequest::Products { category_id: category.clone(), store: None });
    view.apply(ticket, shop.catalog().list_products_for_category(&category, None).await);

    assert_eq!(
        view.error(),
        Some(&StorefrontError::Http { status: 500, message: "Server Error".to_string() })
    );
    assert_eq!(view.data().map(Vec::len), Some(3));

    mock.set_json(Method::Get, "/category/5/products", 200, json!({ "data": [] }));
    let retry = view.retry_request().unwrap();
    let ticket = view.begin(retry);
    view.apply(ticket, shop.catalog().list_products_for_category(&category, None).await);
    assert!(view.error().is_none());
    assert_eq!(view.data().map(Vec::len), Some(0));
}

#[tokio::test]
async fn network_failure_surfaces_message() {
    let mock = Arc::new(MockTransport::new().with_network_error(Method::Get, "/stores", "connection refused"));
    let err = storefront(&mock).catalog().list_stores().await.unwrap_err();
    assert_eq!(err, StorefrontError::Network("connection refused".to_string()));
    assert!(err.is_retryable());
}
