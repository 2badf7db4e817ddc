//! Startup seeding behavior.

#![allow(clippy::unwrap_used)]

use sqlx::Row;

use jshop_integration_tests::test_pool;
use jshop_server::seed::{self, SeedData};

fn small_bundle() -> SeedData {
    serde_json::from_value(serde_json::json!({
        "category_labels": {"all": "Все", "rings": "Кольца", "pendants": "Кулоны"},
        "contacts": [
            {"code": "telegram", "label": "Telegram", "url_template": "https://t.me/x"}
        ],
        "lots": [
            {"slug": "ring-silver", "name": "Кольцо", "category_code": "rings", "price": 3500},
            {"slug": "pendant-moth", "name": "Кулон", "category_code": "pendants", "price": 4200}
        ],
        "glitch_backgrounds": ["glitch-01.webp"]
    }))
    .unwrap()
}

async fn count(pool: &sqlx::SqlitePool, table: &str) -> i64 {
    sqlx::query(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
        .try_get(0)
        .unwrap()
}

#[tokio::test]
async fn first_run_populates_everything() {
    let pool = test_pool().await;
    let summary = seed::run(&pool, &small_bundle()).await.unwrap();

    assert_eq!(summary.metrics, 1);
    assert_eq!(summary.site_texts, 5);
    // "all" is a filter value, not a category row.
    assert_eq!(summary.categories, 2);
    assert_eq!(summary.contacts, 1);
    assert_eq!(summary.lots, 2);
    assert_eq!(summary.lots_skipped, 0);

    assert_eq!(count(&pool, "categories").await, 2);
    assert_eq!(count(&pool, "lots").await, 2);
}

#[tokio::test]
async fn second_run_inserts_nothing() {
    let pool = test_pool().await;
    let bundle = small_bundle();
    seed::run(&pool, &bundle).await.unwrap();
    let second = seed::run(&pool, &bundle).await.unwrap();

    assert_eq!(second.metrics, 0);
    assert_eq!(second.site_texts, 0);
    assert_eq!(second.categories, 0);
    assert_eq!(second.contacts, 0);
    assert_eq!(second.lots, 0);

    assert_eq!(count(&pool, "categories").await, 2);
    assert_eq!(count(&pool, "contact_channels").await, 1);
    assert_eq!(count(&pool, "lots").await, 2);
}

#[tokio::test]
async fn edited_site_text_survives_reseed() {
    let pool = test_pool().await;
    let bundle = small_bundle();
    seed::run(&pool, &bundle).await.unwrap();

    sqlx::query("UPDATE site_texts SET value = ? WHERE key = 'hero_title'")
        .bind("Новый заголовок")
        .execute(&pool)
        .await
        .unwrap();

    seed::run(&pool, &bundle).await.unwrap();

    let value: String = sqlx::query("SELECT value FROM site_texts WHERE key = 'hero_title'")
        .fetch_one(&pool)
        .await
        .unwrap()
        .try_get(0)
        .unwrap();
    assert_eq!(value, "Новый заголовок");
}

#[tokio::test]
async fn visit_metric_starts_at_zero() {
    let pool = test_pool().await;
    seed::run(&pool, &small_bundle()).await.unwrap();

    let value: i64 = sqlx::query("SELECT value FROM site_metrics WHERE key = 'visits'")
        .fetch_one(&pool)
        .await
        .unwrap()
        .try_get(0)
        .unwrap();
    assert_eq!(value, 0);
}

#[tokio::test]
async fn lot_with_unknown_category_is_skipped() {
    let pool = test_pool().await;
    let bundle: SeedData = serde_json::from_value(serde_json::json!({
        "category_labels": {"rings": "Кольца"},
        "lots": [
            {"slug": "ring-ok", "name": "Кольцо", "category_code": "rings", "price": 100},
            {"slug": "lost-lot", "name": "Потерянный", "category_code": "ghosts", "price": 200}
        ]
    }))
    .unwrap();

    let summary = seed::run(&pool, &bundle).await.unwrap();
    assert_eq!(summary.lots, 1);
    assert_eq!(summary.lots_skipped, 1);
    assert_eq!(count(&pool, "lots").await, 1);
}

#[tokio::test]
async fn catalog_restored_after_full_lot_wipe() {
    let pool = test_pool().await;
    let bundle = small_bundle();
    seed::run(&pool, &bundle).await.unwrap();

    sqlx::query("DELETE FROM lots").execute(&pool).await.unwrap();

    let summary = seed::run(&pool, &bundle).await.unwrap();
    assert_eq!(summary.categories, 0);
    assert_eq!(summary.lots, 2);
    assert_eq!(count(&pool, "lots").await, 2);
}

#[test]
fn bundled_seed_document_parses() {
    let bundle = seed::load_bundle().expect("bundled seed document must parse");
    assert!(!bundle.lots.is_empty());
    assert!(bundle.category_labels.contains_key("all"));
    assert!(!bundle.glitch_backgrounds.is_empty());
}
