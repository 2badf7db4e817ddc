//! Integration test harness for the jshop backend.
//!
//! Every test runs against its own in-memory SQLite database with the real
//! migrations applied, and drives the real axum router in-process via
//! `tower::ServiceExt::oneshot` - no sockets, no shared state between
//! tests.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p jshop-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::str::FromStr;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use jshop_server::db::{self, LotRepository, NewLot};
use jshop_server::state::AppState;

/// Create a fresh in-memory database with migrations applied.
///
/// A single connection keeps the `:memory:` database alive and shared for
/// the whole pool.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    db::MIGRATOR.run(&pool).await.unwrap();
    pool
}

/// Build the full application router over the given pool.
pub fn test_router(pool: SqlitePool) -> Router {
    let glitch_backgrounds = vec!["glitch-01.webp".to_string(), "glitch-02.webp".to_string()];
    jshop_server::routes::router(AppState::new(pool, glitch_backgrounds))
}

/// A lot fixture; unspecified columns get neutral defaults.
pub struct FixtureLot {
    pub slug: &'static str,
    pub name: &'static str,
    pub price: i64,
    pub featured: bool,
    pub sold: bool,
    pub sort_order: i64,
}

impl FixtureLot {
    #[must_use]
    pub const fn new(slug: &'static str, name: &'static str, price: i64) -> Self {
        Self {
            slug,
            name,
            price,
            featured: false,
            sold: false,
            sort_order: 0,
        }
    }

    #[must_use]
    pub const fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    #[must_use]
    pub const fn sold(mut self) -> Self {
        self.sold = true;
        self
    }

    #[must_use]
    pub const fn sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }
}

/// Insert a category and return its id.
pub async fn insert_category(pool: &SqlitePool, code: &str, label: &str, sort_order: i64) -> i64 {
    db::CategoryRepository::new(pool)
        .create(code, label, sort_order)
        .await
        .unwrap()
        .id
}

/// Insert a lot fixture into the given category.
pub async fn insert_lot(pool: &SqlitePool, category_id: i64, fixture: FixtureLot) {
    LotRepository::new(pool)
        .create(&NewLot {
            slug: fixture.slug.to_string(),
            name: fixture.name.to_string(),
            category_id,
            price: fixture.price,
            description: format!("{} description", fixture.name),
            specs: vec!["Серебро 925".to_string()],
            images: vec![format!("lots/{}.webp", fixture.slug)],
            featured: fixture.featured,
            sold: fixture.sold,
            glitch_background: String::new(),
            sort_order: fixture.sort_order,
        })
        .await
        .unwrap();
}

/// Overwrite a lot's creation timestamp (unix millis) for `newest` sorting
/// tests; repository-stamped times can collide within a test run.
pub async fn set_created_at(pool: &SqlitePool, slug: &str, millis: i64) {
    sqlx::query("UPDATE lots SET created_at = ? WHERE slug = ?")
        .bind(millis)
        .bind(slug)
        .execute(pool)
        .await
        .unwrap();
}

/// Issue a body-less request and return the response.
pub async fn send(router: &Router, method: &str, uri: &str) -> Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Issue a JSON request and return the response.
pub async fn send_json(
    router: &Router,
    method: &str,
    uri: &str,
    body: &serde_json::Value,
) -> Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Issue a GET and assert-decode the JSON body.
pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = send(router, "GET", uri).await;
    let status = response.status();
    (status, body_json(response).await)
}
