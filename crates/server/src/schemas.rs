//! Request and response bodies.
//!
//! Responses never expose numeric ids - lots are addressed by slug,
//! categories and contacts by code. PATCH bodies carry one `Option` per
//! field: an absent field is left untouched, never reset to a default.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jshop_core::{validate_code, validate_label, validate_name, validate_slug};

use crate::error::AppError;
use crate::models::{Category, ContactChannel, Lot};

// =============================================================================
// Lots
// =============================================================================

/// A lot as served to clients, with its category projected at read time.
#[derive(Debug, Clone, Serialize)]
pub struct LotOut {
    pub slug: String,
    pub name: String,
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

impl From<Lot> for LotOut {
    fn from(lot: Lot) -> Self {
        Self {
            slug: lot.slug,
            name: lot.name,
            category_code: lot.category_code,
            category_label: lot.category_label,
            price: lot.price,
            description: lot.description,
            specs: lot.specs,
            images: lot.images,
            featured: lot.featured,
            sold: lot.sold,
            glitch_background: lot.glitch_background,
            sort_order: lot.sort_order,
            created_at: lot.created_at,
            updated_at: lot.updated_at,
        }
    }
}

/// Body for lot creation (single and bulk).
#[derive(Debug, Clone, Deserialize)]
pub struct LotCreate {
    pub slug: String,
    pub name: String,
    pub category_code: String,
    pub price: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub specs: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub sold: bool,
    #[serde(default)]
    pub glitch_background: String,
    #[serde(default)]
    pub sort_order: i64,
}

impl LotCreate {
    /// Reject malformed fields before anything touches persistence.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for empty or over-long keys and a
    /// negative price.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_slug(&self.slug)?;
        validate_name(&self.name)?;
        validate_code(&self.category_code)?;
        validate_price(self.price)
    }
}

/// Body for partial lot update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LotUpdate {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub category_code: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub specs: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub sold: Option<bool>,
    pub glitch_background: Option<String>,
    pub sort_order: Option<i64>,
}

impl LotUpdate {
    /// Validate the supplied fields only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for empty or over-long keys and a
    /// negative price.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(slug) = &self.slug {
            validate_slug(slug)?;
        }
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(code) = &self.category_code {
            validate_code(code)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }
}

/// Body for the bulk lot create operation.
#[derive(Debug, Clone, Deserialize)]
pub struct LotBulkCreate {
    #[serde(default)]
    pub items: Vec<LotCreate>,
}

/// One rejected item of a bulk create.
#[derive(Debug, Clone, Serialize)]
pub struct LotBulkCreateError {
    pub slug: String,
    pub reason: String,
}

/// Outcome of a bulk create: what was inserted, what was rejected, and how
/// many items were attempted.
#[derive(Debug, Clone, Serialize)]
pub struct LotBulkCreateResult {
    pub created: Vec<LotOut>,
    pub errors: Vec<LotBulkCreateError>,
    pub total: usize,
}

/// Body for duplicating a lot under a new slug.
#[derive(Debug, Clone, Deserialize)]
pub struct LotDuplicateCreate {
    pub new_slug: String,
    pub new_name: Option<String>,
    pub featured: Option<bool>,
    pub sold: Option<bool>,
    pub sort_order: Option<i64>,
}

impl LotDuplicateCreate {
    /// Validate the new slug and the optional name override.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for empty or over-long values.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_slug(&self.new_slug)?;
        if let Some(name) = &self.new_name {
            validate_name(name)?;
        }
        Ok(())
    }
}

/// One page of the public lot listing.
#[derive(Debug, Clone, Serialize)]
pub struct LotsPage {
    pub items: Vec<LotOut>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub pages: u64,
}

// =============================================================================
// Categories
// =============================================================================

/// A category as served to clients.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryOut {
    pub code: String,
    pub label: String,
    pub sort_order: i64,
}

impl From<Category> for CategoryOut {
    fn from(category: Category) -> Self {
        Self {
            code: category.code,
            label: category.label,
            sort_order: category.sort_order,
        }
    }
}

/// Body for category creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryCreate {
    pub code: String,
    pub label: String,
    #[serde(default)]
    pub sort_order: i64,
}

impl CategoryCreate {
    /// Reject malformed fields before anything touches persistence.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for empty or over-long values.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_code(&self.code)?;
        validate_label(&self.label)?;
        Ok(())
    }
}

/// Body for partial category update. The code itself is immutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryUpdate {
    pub label: Option<String>,
    pub sort_order: Option<i64>,
}

impl CategoryUpdate {
    /// Validate the supplied fields only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty or over-long label.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(label) = &self.label {
            validate_label(label)?;
        }
        Ok(())
    }
}

// =============================================================================
// Contacts
// =============================================================================

/// A contact channel as served to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ContactOut {
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

impl From<ContactChannel> for ContactOut {
    fn from(contact: ContactChannel) -> Self {
        Self {
            code: contact.code,
            label: contact.label,
            hint: contact.hint,
            url_template: contact.url_template,
            subject_template: contact.subject_template,
            body_template: contact.body_template,
            is_external: contact.is_external,
            icon_svg: contact.icon_svg,
            sort_order: contact.sort_order,
        }
    }
}

/// Body for contact channel creation.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactCreate {
    pub code: String,
    pub label: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub url_template: String,
    #[serde(default)]
    pub subject_template: String,
    #[serde(default)]
    pub body_template: String,
    #[serde(default = "default_true")]
    pub is_external: bool,
    #[serde(default)]
    pub icon_svg: String,
    #[serde(default)]
    pub sort_order: i64,
}

impl ContactCreate {
    /// Reject malformed fields before anything touches persistence.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for empty or over-long values.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_code(&self.code)?;
        validate_label(&self.label)?;
        Ok(())
    }
}

/// Body for partial contact channel update. The code itself is immutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactUpdate {
    pub label: Option<String>,
    pub hint: Option<String>,
    pub url_template: Option<String>,
    pub subject_template: Option<String>,
    pub body_template: Option<String>,
    pub is_external: Option<bool>,
    pub icon_svg: Option<String>,
    pub sort_order: Option<i64>,
}

impl ContactUpdate {
    /// Validate the supplied fields only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty or over-long label.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(label) = &self.label {
            validate_label(label)?;
        }
        Ok(())
    }
}

// =============================================================================
// Aggregates
// =============================================================================

/// Aggregate counts for the admin summary view.
#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub lots_total: i64,
    pub lots_sold: i64,
    pub lots_available: i64,
    pub categories_total: i64,
    pub contacts_total: i64,
}

/// The single payload for initial client hydration.
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapResponse {
    pub lots: Vec<LotOut>,
    /// Category code to label, led by the synthetic `"all"` entry.
    pub category_labels: serde_json::Map<String, serde_json::Value>,
    pub glitch_backgrounds: Vec<String>,
    pub contacts: Vec<ContactOut>,
}

const fn default_true() -> bool {
    true
}

fn validate_price(price: i64) -> Result<(), AppError> {
    if price < 0 {
        return Err(AppError::Validation("price must be non-negative".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lot_create_defaults() {
        let payload: LotCreate = serde_json::from_str(
            r#"{"slug": "ring-1", "name": "Ring", "category_code": "rings", "price": 100}"#,
        )
        .expect("minimal payload must deserialize");

        assert_eq!(payload.description, "");
        assert!(payload.specs.is_empty());
        assert!(!payload.featured);
        assert!(!payload.sold);
        assert_eq!(payload.sort_order, 0);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn lot_create_rejects_negative_price() {
        let payload: LotCreate = serde_json::from_str(
            r#"{"slug": "ring-1", "name": "Ring", "category_code": "rings", "price": -1}"#,
        )
        .expect("payload must deserialize");

        assert!(matches!(
            payload.validate(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn lot_update_absent_fields_stay_none() {
        let payload: LotUpdate =
            serde_json::from_str(r#"{"price": 500}"#).expect("payload must deserialize");

        assert_eq!(payload.price, Some(500));
        assert!(payload.slug.is_none());
        assert!(payload.name.is_none());
        assert!(payload.sold.is_none());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn lot_update_validates_supplied_fields_only() {
        let payload = LotUpdate {
            slug: Some(String::new()),
            ..LotUpdate::default()
        };
        assert!(payload.validate().is_err());

        let payload = LotUpdate {
            price: Some(0),
            ..LotUpdate::default()
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn contact_create_is_external_defaults_to_true() {
        let payload: ContactCreate =
            serde_json::from_str(r#"{"code": "telegram", "label": "Telegram"}"#)
                .expect("payload must deserialize");
        assert!(payload.is_external);
    }
}
