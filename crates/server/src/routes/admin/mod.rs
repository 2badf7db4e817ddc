//! Admin route handlers.
//!
//! Mirrors full CRUD for lots, categories, and contacts plus the dashboard
//! aggregation. No authentication: deployment keeps this surface on a
//! private network.

pub mod categories;
pub mod contacts;
pub mod lots;

use axum::extract::State;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use crate::db::{CategoryRepository, ContactRepository, LotRepository};
use crate::error::Result;
use crate::schemas::AdminDashboard;
use crate::state::AppState;

/// Create the admin routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/lots", get(lots::list).post(lots::create))
        .route("/lots/bulk", post(lots::bulk_create))
        .route(
            "/lots/{slug}",
            get(lots::show).patch(lots::update).delete(lots::remove),
        )
        .route("/lots/{slug}/duplicate", post(lots::duplicate))
        .route(
            "/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/categories/{code}",
            patch(categories::update).delete(categories::remove),
        )
        .route("/contacts", get(contacts::list).post(contacts::create))
        .route(
            "/contacts/{code}",
            patch(contacts::update).delete(contacts::remove),
        )
}

/// `GET /api/v1/admin/dashboard` - aggregate counts for the summary view.
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<AdminDashboard>> {
    let pool = state.pool();
    let lots = LotRepository::new(pool);

    let lots_total = lots.count_all().await?;
    let lots_sold = lots.count_sold().await?;
    let categories_total = CategoryRepository::new(pool).count_all().await?;
    let contacts_total = ContactRepository::new(pool).count_all().await?;

    Ok(Json(AdminDashboard {
        lots_total,
        lots_sold,
        lots_available: (lots_total - lots_sold).max(0),
        categories_total,
        contacts_total,
    }))
}
