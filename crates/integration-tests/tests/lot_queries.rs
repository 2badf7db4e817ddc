//! Filtering, sorting, and pagination of the lot listing.

#![allow(clippy::unwrap_used)]

use jshop_core::{LotSort, PageParams, page_count};
use jshop_integration_tests::{
    FixtureLot, insert_category, insert_lot, set_created_at, test_pool,
};
use jshop_server::db::{LotFilter, LotRepository};
use jshop_server::models::Lot;

fn slugs(lots: &[Lot]) -> Vec<&str> {
    lots.iter().map(|l| l.slug.as_str()).collect()
}

/// Two categories, five lots with deliberate price and name collisions.
async fn catalog() -> sqlx::SqlitePool {
    let pool = test_pool().await;
    let rings = insert_category(&pool, "rings", "Кольца", 0).await;
    let pendants = insert_category(&pool, "pendants", "Кулоны", 1).await;

    insert_lot(&pool, rings, FixtureLot::new("ring-a", "Anthracite", 100)).await;
    insert_lot(&pool, rings, FixtureLot::new("ring-b", "Basalt", 300).sold()).await;
    insert_lot(&pool, rings, FixtureLot::new("ring-c", "Cinder", 200)).await;
    // Same price as ring-a; name breaks the tie.
    insert_lot(
        &pool,
        pendants,
        FixtureLot::new("pendant-a", "Zircon", 100).featured(),
    )
    .await;
    insert_lot(&pool, pendants, FixtureLot::new("pendant-b", "Moth", 50)).await;

    set_created_at(&pool, "ring-a", 1_000).await;
    set_created_at(&pool, "ring-b", 5_000).await;
    set_created_at(&pool, "ring-c", 3_000).await;
    set_created_at(&pool, "pendant-a", 2_000).await;
    set_created_at(&pool, "pendant-b", 4_000).await;
    pool
}

#[tokio::test]
async fn category_filter_restricts_to_code() {
    let pool = catalog().await;
    let repo = LotRepository::new(&pool);

    let filter = LotFilter {
        category: Some("rings".to_string()),
        ..LotFilter::default()
    };
    let (items, total) = repo
        .page(&filter, LotSort::NameAsc, PageParams::default())
        .await
        .unwrap();

    assert_eq!(total, 3);
    assert_eq!(slugs(&items), ["ring-a", "ring-b", "ring-c"]);
}

#[tokio::test]
async fn all_pseudo_category_matches_everything() {
    let pool = catalog().await;
    let repo = LotRepository::new(&pool);

    let filter = LotFilter {
        category: Some("all".to_string()),
        ..LotFilter::default()
    };
    let (_, total) = repo
        .page(&filter, LotSort::NameAsc, PageParams::default())
        .await
        .unwrap();
    assert_eq!(total, 5);
}

#[tokio::test]
async fn text_search_is_case_insensitive() {
    let pool = catalog().await;
    let repo = LotRepository::new(&pool);

    let filter = LotFilter {
        q: Some("BASALT".to_string()),
        ..LotFilter::default()
    };
    let (items, total) = repo
        .page(&filter, LotSort::NameAsc, PageParams::default())
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(slugs(&items), ["ring-b"]);
}

#[tokio::test]
async fn text_search_matches_description_too() {
    let pool = catalog().await;
    let repo = LotRepository::new(&pool);

    // Fixtures carry "<name> description" as their description.
    let filter = LotFilter {
        q: Some("cinder desc".to_string()),
        ..LotFilter::default()
    };
    let (items, _) = repo
        .page(&filter, LotSort::NameAsc, PageParams::default())
        .await
        .unwrap();
    assert_eq!(slugs(&items), ["ring-c"]);
}

#[tokio::test]
async fn filters_compose_with_and() {
    let pool = catalog().await;
    let repo = LotRepository::new(&pool);

    // Every fixture description contains "i", so the text filter alone
    // matches all five lots.
    let filter = LotFilter {
        q: Some("i".to_string()),
        category: Some("rings".to_string()),
        only_available: true,
    };
    let (items, total) = repo
        .page(&filter, LotSort::NameAsc, PageParams::default())
        .await
        .unwrap();

    // ring-b matches the text and category filters but is sold.
    assert_eq!(total, 2);
    assert_eq!(slugs(&items), ["ring-a", "ring-c"]);
}

#[tokio::test]
async fn price_asc_breaks_ties_by_name() {
    let pool = catalog().await;
    let (items, _) = LotRepository::new(&pool)
        .page(&LotFilter::default(), LotSort::PriceAsc, PageParams::default())
        .await
        .unwrap();

    // 50, then the 100-100 tie ordered Anthracite before Zircon.
    assert_eq!(
        slugs(&items),
        ["pendant-b", "ring-a", "pendant-a", "ring-c", "ring-b"]
    );
}

#[tokio::test]
async fn price_desc_keeps_name_ascending_in_ties() {
    let pool = catalog().await;
    let (items, _) = LotRepository::new(&pool)
        .page(&LotFilter::default(), LotSort::PriceDesc, PageParams::default())
        .await
        .unwrap();

    assert_eq!(
        slugs(&items),
        ["ring-b", "ring-c", "ring-a", "pendant-a", "pendant-b"]
    );
}

#[tokio::test]
async fn newest_orders_by_creation_time() {
    let pool = catalog().await;
    let (items, _) = LotRepository::new(&pool)
        .page(&LotFilter::default(), LotSort::Newest, PageParams::default())
        .await
        .unwrap();

    assert_eq!(
        slugs(&items),
        ["ring-b", "pendant-b", "ring-c", "pendant-a", "ring-a"]
    );
}

#[tokio::test]
async fn featured_lots_lead_the_default_order() {
    let pool = catalog().await;
    let (items, _) = LotRepository::new(&pool)
        .page(&LotFilter::default(), LotSort::Featured, PageParams::default())
        .await
        .unwrap();

    // The single featured lot first, the rest by price.
    assert_eq!(
        slugs(&items),
        ["pendant-a", "pendant-b", "ring-a", "ring-c", "ring-b"]
    );
}

#[tokio::test]
async fn pagination_slices_after_sorting() {
    let pool = catalog().await;
    let repo = LotRepository::new(&pool);
    let filter = LotFilter {
        category: Some("rings".to_string()),
        ..LotFilter::default()
    };

    let params = PageParams::clamped(1, 2);
    let (items, total) = repo.page(&filter, LotSort::PriceAsc, params).await.unwrap();
    assert_eq!(slugs(&items), ["ring-a", "ring-c"]);
    assert_eq!(total, 3);
    assert_eq!(page_count(total, params.page_size), 2);

    let params = PageParams::clamped(2, 2);
    let (items, _) = repo.page(&filter, LotSort::PriceAsc, params).await.unwrap();
    assert_eq!(slugs(&items), ["ring-b"]);
}

#[tokio::test]
async fn page_past_the_end_is_empty_not_an_error() {
    let pool = catalog().await;
    let (items, total) = LotRepository::new(&pool)
        .page(
            &LotFilter::default(),
            LotSort::NameAsc,
            PageParams::clamped(40, 8),
        )
        .await
        .unwrap();
    assert!(items.is_empty());
    assert_eq!(total, 5);
}

#[tokio::test]
async fn lots_project_their_category() {
    let pool = catalog().await;
    let lot = LotRepository::new(&pool)
        .get_by_slug("ring-a")
        .await
        .unwrap()
        .expect("fixture lot must exist");

    assert_eq!(lot.category_code, "rings");
    assert_eq!(lot.category_label, "Кольца");
    assert_eq!(lot.specs, ["Серебро 925"]);
}
