//! Domain entities as read from the database.

use chrono::{DateTime, Utc};

/// A sellable catalog item with its owning category resolved.
///
/// `category_code` and `category_label` are projected from the owning
/// category at read time (never stored denormalized); both are empty
/// strings in the degenerate case of an unresolvable category.
#[derive(Debug, Clone)]
pub struct Lot {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub category_id: i64,
    pub category_code: String,
    pub category_label: String,
    pub price: i64,
    pub description: String,
    pub specs: Vec<String>,
    pub images: Vec<String>,
    pub featured: bool,
    pub sold: bool,
    pub glitch_background: String,
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A grouping label for lots, referenced by code.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: i64,
    pub code: String,
    pub label: String,
    pub sort_order: i64,
}

/// A method of contacting the seller.
#[derive(Debug, Clone)]
pub struct ContactChannel {
    pub id: i64,
    pub code: String,
    pub label: String,
    pub hint: String,
    pub url_template: String,
    pub subject_template: String,
    pub body_template: String,
    pub is_external: bool,
    pub icon_svg: String,
    pub sort_order: i64,
}
