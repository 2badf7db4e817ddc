//! Admin lot handlers: CRUD, bulk create, and duplication.

use std::collections::{HashMap, HashSet};

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use crate::db::{CategoryRepository, LotFilter, LotRepository, NewLot};
use crate::error::{AppError, Result};
use crate::schemas::{
    LotBulkCreate, LotBulkCreateError, LotBulkCreateResult, LotCreate, LotDuplicateCreate, LotOut,
    LotUpdate,
};
use crate::state::AppState;

/// Query parameters of the admin lot listing.
#[derive(Debug, Default, Deserialize)]
pub struct AdminLotQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

fn lot_not_found(slug: &str) -> AppError {
    AppError::NotFound(format!("Lot '{slug}' not found"))
}

fn slug_conflict(slug: &str) -> AppError {
    AppError::Conflict(format!("Lot slug '{slug}' already exists"))
}

fn category_not_found(code: &str) -> AppError {
    AppError::NotFound(format!("Category '{code}' not found"))
}

fn new_lot(payload: LotCreate, category_id: i64) -> NewLot {
    NewLot {
        slug: payload.slug,
        name: payload.name,
        category_id,
        price: payload.price,
        description: payload.description,
        specs: payload.specs,
        images: payload.images,
        featured: payload.featured,
        sold: payload.sold,
        glitch_background: payload.glitch_background,
        sort_order: payload.sort_order,
    }
}

/// `GET /api/v1/admin/lots` - full listing, filterable by search text and
/// category, ordered by sort order then name.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AdminLotQuery>,
) -> Result<Json<Vec<LotOut>>> {
    let filter = LotFilter {
        q: query.q,
        category: query.category,
        only_available: false,
    };
    let lots = LotRepository::new(state.pool()).list_ordered(&filter).await?;
    Ok(Json(lots.into_iter().map(LotOut::from).collect()))
}

/// `GET /api/v1/admin/lots/{slug}`.
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<LotOut>> {
    let lot = LotRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| lot_not_found(&slug))?;
    Ok(Json(lot.into()))
}

/// `POST /api/v1/admin/lots`.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<LotCreate>,
) -> Result<(StatusCode, Json<LotOut>)> {
    payload.validate()?;

    let pool = state.pool();
    let lots = LotRepository::new(pool);
    if lots.exists_slug(&payload.slug).await? {
        return Err(slug_conflict(&payload.slug));
    }

    let category = CategoryRepository::new(pool)
        .get_by_code(&payload.category_code)
        .await?
        .ok_or_else(|| category_not_found(&payload.category_code))?;

    let lot = lots.create(&new_lot(payload, category.id)).await?;
    Ok((StatusCode::CREATED, Json(lot.into())))
}

/// `POST /api/v1/admin/lots/bulk`.
///
/// Each item is checked independently against persisted slugs, slugs
/// accepted earlier in the same batch, and category resolvability; rejected
/// items become `{slug, reason}` errors and never abort the rest. All
/// accepted items insert in one transaction.
pub async fn bulk_create(
    State(state): State<AppState>,
    Json(payload): Json<LotBulkCreate>,
) -> Result<Json<LotBulkCreateResult>> {
    for item in &payload.items {
        item.validate()?;
    }

    if payload.items.is_empty() {
        return Ok(Json(LotBulkCreateResult {
            created: Vec::new(),
            errors: Vec::new(),
            total: 0,
        }));
    }

    let pool = state.pool();
    let lots = LotRepository::new(pool);

    let category_ids: HashMap<String, i64> = CategoryRepository::new(pool)
        .list()
        .await?
        .into_iter()
        .map(|c| (c.code, c.id))
        .collect();

    let requested: Vec<String> = payload.items.iter().map(|i| i.slug.clone()).collect();
    let existing = lots.existing_slugs(&requested).await?;

    let total = payload.items.len();
    let mut accepted: Vec<NewLot> = Vec::new();
    let mut errors: Vec<LotBulkCreateError> = Vec::new();
    let mut planned: HashSet<String> = HashSet::new();

    for item in payload.items {
        if existing.contains(&item.slug) {
            errors.push(LotBulkCreateError {
                slug: item.slug,
                reason: "Slug already exists".to_string(),
            });
            continue;
        }
        if planned.contains(&item.slug) {
            errors.push(LotBulkCreateError {
                slug: item.slug,
                reason: "Duplicate slug in payload".to_string(),
            });
            continue;
        }

        let Some(&category_id) = category_ids.get(&item.category_code) else {
            errors.push(LotBulkCreateError {
                slug: item.slug.clone(),
                reason: format!("Category '{}' not found", item.category_code),
            });
            continue;
        };

        planned.insert(item.slug.clone());
        accepted.push(new_lot(item, category_id));
    }

    lots.create_many(&accepted).await?;

    let mut created = Vec::with_capacity(accepted.len());
    for new in &accepted {
        let lot = lots
            .get_by_slug(&new.slug)
            .await?
            .ok_or_else(|| lot_not_found(&new.slug))?;
        created.push(LotOut::from(lot));
    }

    Ok(Json(LotBulkCreateResult {
        created,
        errors,
        total,
    }))
}

/// `POST /api/v1/admin/lots/{slug}/duplicate`.
///
/// Copies the source lot under a new slug. Name, featured, sold, and sort
/// order are individually overridable; `sold` defaults to `false` rather
/// than copying the source's state.
pub async fn duplicate(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<LotDuplicateCreate>,
) -> Result<(StatusCode, Json<LotOut>)> {
    payload.validate()?;

    let lots = LotRepository::new(state.pool());
    let source = lots
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| lot_not_found(&slug))?;

    if lots.exists_slug(&payload.new_slug).await? {
        return Err(slug_conflict(&payload.new_slug));
    }

    let copy = NewLot {
        slug: payload.new_slug,
        name: payload.new_name.unwrap_or(source.name),
        category_id: source.category_id,
        price: source.price,
        description: source.description,
        specs: source.specs,
        images: source.images,
        featured: payload.featured.unwrap_or(source.featured),
        sold: payload.sold.unwrap_or(false),
        glitch_background: source.glitch_background,
        sort_order: payload.sort_order.unwrap_or(source.sort_order),
    };

    let lot = lots.create(&copy).await?;
    Ok((StatusCode::CREATED, Json(lot.into())))
}

/// `PATCH /api/v1/admin/lots/{slug}` - partial update; omitted fields stay
/// untouched.
pub async fn update(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<LotUpdate>,
) -> Result<Json<LotOut>> {
    payload.validate()?;

    let pool = state.pool();
    let lots = LotRepository::new(pool);
    let mut lot = lots
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| lot_not_found(&slug))?;

    if let Some(new_slug) = payload.slug {
        if new_slug != lot.slug && lots.exists_slug(&new_slug).await? {
            return Err(slug_conflict(&new_slug));
        }
        lot.slug = new_slug;
    }
    if let Some(code) = payload.category_code {
        let category = CategoryRepository::new(pool)
            .get_by_code(&code)
            .await?
            .ok_or_else(|| category_not_found(&code))?;
        lot.category_id = category.id;
    }
    if let Some(name) = payload.name {
        lot.name = name;
    }
    if let Some(price) = payload.price {
        lot.price = price;
    }
    if let Some(description) = payload.description {
        lot.description = description;
    }
    if let Some(specs) = payload.specs {
        lot.specs = specs;
    }
    if let Some(images) = payload.images {
        lot.images = images;
    }
    if let Some(featured) = payload.featured {
        lot.featured = featured;
    }
    if let Some(sold) = payload.sold {
        lot.sold = sold;
    }
    if let Some(glitch_background) = payload.glitch_background {
        lot.glitch_background = glitch_background;
    }
    if let Some(sort_order) = payload.sort_order {
        lot.sort_order = sort_order;
    }

    lots.update(&lot).await?;

    let refreshed = lots
        .get_by_slug(&lot.slug)
        .await?
        .ok_or_else(|| lot_not_found(&lot.slug))?;
    Ok(Json(refreshed.into()))
}

/// `DELETE /api/v1/admin/lots/{slug}`.
pub async fn remove(State(state): State<AppState>, Path(slug): Path<String>) -> Result<StatusCode> {
    let deleted = LotRepository::new(state.pool()).delete_by_slug(&slug).await?;
    if !deleted {
        return Err(lot_not_found(&slug));
    }
    Ok(StatusCode::NO_CONTENT)
}
