//! Admin category handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::db::{CategoryRepository, LotRepository};
use crate::error::{AppError, Result};
use crate::schemas::{CategoryCreate, CategoryOut, CategoryUpdate};
use crate::state::AppState;

fn category_not_found(code: &str) -> AppError {
    AppError::NotFound(format!("Category '{code}' not found"))
}

/// `GET /api/v1/admin/categories`.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CategoryOut>>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// `POST /api/v1/admin/categories`.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CategoryCreate>,
) -> Result<(StatusCode, Json<CategoryOut>)> {
    payload.validate()?;

    let categories = CategoryRepository::new(state.pool());
    if categories.get_by_code(&payload.code).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Category '{}' already exists",
            payload.code
        )));
    }

    let category = categories
        .create(&payload.code, &payload.label, payload.sort_order)
        .await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

/// `PATCH /api/v1/admin/categories/{code}` - partial update; omitted fields
/// stay untouched.
pub async fn update(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> Result<Json<CategoryOut>> {
    payload.validate()?;

    let categories = CategoryRepository::new(state.pool());
    let mut category = categories
        .get_by_code(&code)
        .await?
        .ok_or_else(|| category_not_found(&code))?;

    if let Some(label) = payload.label {
        category.label = label;
    }
    if let Some(sort_order) = payload.sort_order {
        category.sort_order = sort_order;
    }

    categories.update(&category).await?;
    Ok(Json(category.into()))
}

/// `DELETE /api/v1/admin/categories/{code}`.
///
/// Refused while any lot still references the category; the restriction is
/// enforced here, not delegated to schema cascade settings.
pub async fn remove(State(state): State<AppState>, Path(code): Path<String>) -> Result<StatusCode> {
    let pool = state.pool();
    let categories = CategoryRepository::new(pool);
    let category = categories
        .get_by_code(&code)
        .await?
        .ok_or_else(|| category_not_found(&code))?;

    let in_use = LotRepository::new(pool).count_in_category(category.id).await?;
    if in_use > 0 {
        return Err(AppError::Conflict(
            "Category is used by lots. Reassign or delete lots first.".to_string(),
        ));
    }

    categories.delete(category.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
