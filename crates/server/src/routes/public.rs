//! Public storefront route handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::Value;

use jshop_core::{ALL_CATEGORY_CODE, LotSort, PageParams, page_count};

use crate::db::{CategoryRepository, ContactRepository, LotFilter, LotRepository};
use crate::error::{AppError, Result};
use crate::schemas::{BootstrapResponse, LotOut, LotsPage};
use crate::state::AppState;

/// Label of the synthetic "all" category entry in the bootstrap payload.
const ALL_CATEGORY_LABEL: &str = "Все";

/// Query parameters of the public lot listing.
#[derive(Debug, Default, Deserialize)]
pub struct LotListQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub only_available: Option<bool>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl LotListQuery {
    fn filter(&self) -> LotFilter {
        LotFilter {
            q: self.q.clone(),
            category: self.category.clone(),
            only_available: self.only_available.unwrap_or(false),
        }
    }

    fn sort(&self) -> LotSort {
        self.sort.as_deref().map(LotSort::parse).unwrap_or_default()
    }

    fn paging(&self) -> PageParams {
        let defaults = PageParams::default();
        PageParams::clamped(
            self.page.unwrap_or(i64::from(defaults.page)),
            self.page_size.unwrap_or(i64::from(defaults.page_size)),
        )
    }
}

/// `GET /api/v1/bootstrap` - everything the client needs on first load.
pub async fn bootstrap(State(state): State<AppState>) -> Result<Json<BootstrapResponse>> {
    let pool = state.pool();

    let lots = LotRepository::new(pool)
        .list_ordered(&LotFilter::default())
        .await?;
    let categories = CategoryRepository::new(pool).list().await?;
    let contacts = ContactRepository::new(pool).list().await?;

    let mut category_labels = serde_json::Map::new();
    category_labels.insert(
        ALL_CATEGORY_CODE.to_string(),
        Value::String(ALL_CATEGORY_LABEL.to_string()),
    );
    for category in &categories {
        category_labels.insert(category.code.clone(), Value::String(category.label.clone()));
    }

    Ok(Json(BootstrapResponse {
        lots: lots.into_iter().map(LotOut::from).collect(),
        category_labels,
        glitch_backgrounds: state.glitch_backgrounds().to_vec(),
        contacts: contacts.into_iter().map(Into::into).collect(),
    }))
}

/// `GET /api/v1/lots` - the filtered, sorted, paginated listing.
pub async fn list_lots(
    State(state): State<AppState>,
    Query(query): Query<LotListQuery>,
) -> Result<Json<LotsPage>> {
    let params = query.paging();
    let (items, total) = LotRepository::new(state.pool())
        .page(&query.filter(), query.sort(), params)
        .await?;

    Ok(Json(LotsPage {
        items: items.into_iter().map(LotOut::from).collect(),
        total,
        page: params.page,
        page_size: params.page_size,
        pages: page_count(total, params.page_size),
    }))
}

/// `GET /api/v1/lots/{slug}` - a single lot.
pub async fn show_lot(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<LotOut>> {
    let lot = LotRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Lot '{slug}' not found")))?;
    Ok(Json(lot.into()))
}
