//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Health check
//!
//! # Public API
//! GET  /api/v1/bootstrap                - Initial client hydration payload
//! GET  /api/v1/lots                     - Paginated lot listing
//! GET  /api/v1/lots/{slug}              - Lot detail
//!
//! # Admin API
//! GET    /api/v1/admin/dashboard              - Aggregate counts
//! GET    /api/v1/admin/lots                   - Full lot listing (filterable)
//! POST   /api/v1/admin/lots                   - Create lot
//! POST   /api/v1/admin/lots/bulk              - Bulk create lots
//! GET    /api/v1/admin/lots/{slug}            - Lot detail
//! PATCH  /api/v1/admin/lots/{slug}            - Partial update
//! DELETE /api/v1/admin/lots/{slug}            - Delete lot
//! POST   /api/v1/admin/lots/{slug}/duplicate  - Copy lot under a new slug
//! GET    /api/v1/admin/categories             - List categories
//! POST   /api/v1/admin/categories             - Create category
//! PATCH  /api/v1/admin/categories/{code}      - Partial update
//! DELETE /api/v1/admin/categories/{code}      - Delete (409 while in use)
//! GET    /api/v1/admin/contacts               - List contact channels
//! POST   /api/v1/admin/contacts               - Create contact channel
//! PATCH  /api/v1/admin/contacts/{code}        - Partial update
//! DELETE /api/v1/admin/contacts/{code}        - Delete contact channel
//! ```

pub mod admin;
pub mod public;

use axum::{Json, Router, routing::get};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the complete application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/bootstrap", get(public::bootstrap))
        .route("/lots", get(public::list_lots))
        .route("/lots/{slug}", get(public::show_lot))
        .nest("/admin", admin::routes());

    // The storefront and admin frontends are served from other origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
