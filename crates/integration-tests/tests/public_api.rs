//! Public storefront endpoints, driven through the real router.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::http::StatusCode;

use jshop_integration_tests::{
    FixtureLot, get_json, insert_category, insert_lot, test_pool, test_router,
};

async fn storefront() -> Router {
    let pool = test_pool().await;
    let rings = insert_category(&pool, "rings", "Кольца", 0).await;
    let pendants = insert_category(&pool, "pendants", "Кулоны", 1).await;

    insert_lot(&pool, rings, FixtureLot::new("ring-a", "Anthracite", 100)).await;
    insert_lot(&pool, rings, FixtureLot::new("ring-b", "Basalt", 300).sold()).await;
    insert_lot(&pool, rings, FixtureLot::new("ring-c", "Cinder", 200)).await;
    insert_lot(&pool, pendants, FixtureLot::new("pendant-a", "Zircon", 100)).await;
    test_router(pool)
}

#[tokio::test]
async fn health_reports_ok() {
    let router = test_router(test_pool().await);
    let (status, body) = get_json(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn bootstrap_carries_the_whole_storefront() {
    let router = storefront().await;
    let (status, body) = get_json(&router, "/api/v1/bootstrap").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["lots"].as_array().unwrap().len(), 4);
    assert_eq!(body["glitch_backgrounds"][0], "glitch-01.webp");

    // The synthetic "all" entry leads the label map, then persisted
    // categories in sort order.
    let labels = body["category_labels"].as_object().unwrap();
    let keys: Vec<&str> = labels.keys().map(String::as_str).collect();
    assert_eq!(keys, ["all", "rings", "pendants"]);
    assert_eq!(labels["all"], "Все");
    assert_eq!(labels["rings"], "Кольца");
}

#[tokio::test]
async fn lot_listing_defaults_to_featured_sort() {
    let router = storefront().await;
    let (status, body) = get_json(&router, "/api/v1/lots").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["total"], 4);
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 8);
    assert_eq!(body["pages"], 1);
    // No featured lots here, so price ascending with the 100-100 tie
    // broken by sort order insertion.
    assert_eq!(body["items"][0]["price"], 100);
}

#[tokio::test]
async fn lot_listing_applies_query_parameters() {
    let router = storefront().await;
    let (status, body) = get_json(
        &router,
        "/api/v1/lots?category=rings&sort=price-asc&page=1&page_size=2",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["total"], 3);
    assert_eq!(body["pages"], 2);
    let prices: Vec<i64> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["price"].as_i64().unwrap())
        .collect();
    assert_eq!(prices, [100, 200]);
}

#[tokio::test]
async fn only_available_hides_sold_lots() {
    let router = storefront().await;
    let (_, body) = get_json(&router, "/api/v1/lots?category=rings&only_available=true").await;
    assert_eq!(body["total"], 2);
    for item in body["items"].as_array().unwrap() {
        assert_eq!(item["sold"], false);
    }
}

#[tokio::test]
async fn out_of_range_paging_is_clamped() {
    let router = storefront().await;
    let (status, body) = get_json(&router, "/api/v1/lots?page=0&page_size=500").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 100);
}

#[tokio::test]
async fn unknown_sort_falls_back_to_featured() {
    let router = storefront().await;
    let (status, body) = get_json(&router, "/api/v1/lots?sort=sideways").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 4);
}

#[tokio::test]
async fn lot_detail_by_slug() {
    let router = storefront().await;
    let (status, body) = get_json(&router, "/api/v1/lots/ring-b").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Basalt");
    assert_eq!(body["category_code"], "rings");
    assert_eq!(body["category_label"], "Кольца");
    assert_eq!(body["sold"], true);
    // Numeric ids never leave the API.
    assert!(body.get("id").is_none());
}

#[tokio::test]
async fn missing_lot_is_a_detail_error() {
    let router = storefront().await;
    let (status, body) = get_json(&router, "/api/v1/lots/no-such-lot").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Lot 'no-such-lot' not found");
}
