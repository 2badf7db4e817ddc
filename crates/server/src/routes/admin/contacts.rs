//! Admin contact channel handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::db::{ContactRepository, NewContact};
use crate::error::{AppError, Result};
use crate::schemas::{ContactCreate, ContactOut, ContactUpdate};
use crate::state::AppState;

fn contact_not_found(code: &str) -> AppError {
    AppError::NotFound(format!("Contact '{code}' not found"))
}

/// `GET /api/v1/admin/contacts`.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ContactOut>>> {
    let contacts = ContactRepository::new(state.pool()).list().await?;
    Ok(Json(contacts.into_iter().map(Into::into).collect()))
}

/// `POST /api/v1/admin/contacts`.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ContactCreate>,
) -> Result<(StatusCode, Json<ContactOut>)> {
    payload.validate()?;

    let contacts = ContactRepository::new(state.pool());
    if contacts.get_by_code(&payload.code).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Contact '{}' already exists",
            payload.code
        )));
    }

    let contact = contacts
        .create(&NewContact {
            code: payload.code,
            label: payload.label,
            hint: payload.hint,
            url_template: payload.url_template,
            subject_template: payload.subject_template,
            body_template: payload.body_template,
            is_external: payload.is_external,
            icon_svg: payload.icon_svg,
            sort_order: payload.sort_order,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(contact.into())))
}

/// `PATCH /api/v1/admin/contacts/{code}` - partial update; omitted fields
/// stay untouched.
pub async fn update(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(payload): Json<ContactUpdate>,
) -> Result<Json<ContactOut>> {
    payload.validate()?;

    let contacts = ContactRepository::new(state.pool());
    let mut contact = contacts
        .get_by_code(&code)
        .await?
        .ok_or_else(|| contact_not_found(&code))?;

    if let Some(label) = payload.label {
        contact.label = label;
    }
    if let Some(hint) = payload.hint {
        contact.hint = hint;
    }
    if let Some(url_template) = payload.url_template {
        contact.url_template = url_template;
    }
    if let Some(subject_template) = payload.subject_template {
        contact.subject_template = subject_template;
    }
    if let Some(body_template) = payload.body_template {
        contact.body_template = body_template;
    }
    if let Some(is_external) = payload.is_external {
        contact.is_external = is_external;
    }
    if let Some(icon_svg) = payload.icon_svg {
        contact.icon_svg = icon_svg;
    }
    if let Some(sort_order) = payload.sort_order {
        contact.sort_order = sort_order;
    }

    contacts.update(&contact).await?;
    Ok(Json(contact.into()))
}

/// `DELETE /api/v1/admin/contacts/{code}`.
pub async fn remove(State(state): State<AppState>, Path(code): Path<String>) -> Result<StatusCode> {
    let deleted = ContactRepository::new(state.pool())
        .delete_by_code(&code)
        .await?;
    if !deleted {
        return Err(contact_not_found(&code));
    }
    Ok(StatusCode::NO_CONTENT)
}
