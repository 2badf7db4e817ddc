//! One-time database seeding.
//!
//! Runs at startup after migrations and before serving traffic. Safe to
//! invoke on every start:
//!
//! - the visit-counter metric and the default site texts are inserted only
//!   when their key is absent, so admin-edited values survive restarts;
//! - categories, contacts, and lots are bulk-loaded from the bundled seed
//!   document only while the lot table is empty.
//!
//! Everything commits as a single transaction, so concurrent readers never
//! observe a partially seeded catalog.

use serde::Deserialize;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{info, warn};

use jshop_core::ALL_CATEGORY_CODE;

use crate::db::RepositoryError;

/// The bundled seed document.
const SEED_BUNDLE: &str = include_str!("../data/seed_data.json");

/// Site texts guaranteed to exist after every startup. Only missing keys
/// are inserted; values edited through the admin panel are never
/// overwritten.
const DEFAULT_SITE_TEXTS: &[(&str, &str, &str)] = &[
    ("hero_title", "JSHOP", "Main heading on the landing page"),
    (
        "hero_subtitle",
        "Украшения ручной работы",
        "Subheading under the hero title",
    ),
    (
        "about_text",
        "Каждый лот отливается и дорабатывается вручную, в одном экземпляре.",
        "About section body",
    ),
    ("sold_badge", "Продано", "Badge shown on sold lots"),
    ("footer_note", "© JSHOP", "Footer line"),
];

/// Metric key for the site visit counter.
const VISITS_METRIC: &str = "visits";

/// Parsed form of the bundled seed document.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedData {
    /// Category code to label, in display order. Includes the synthetic
    /// `"all"` entry, which is never persisted as a category.
    #[serde(default)]
    pub category_labels: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub contacts: Vec<SeedContact>,
    #[serde(default)]
    pub lots: Vec<SeedLot>,
    #[serde(default)]
    pub glitch_backgrounds: Vec<String>,
}

/// A contact channel entry of the seed document.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedContact {
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

/// A lot entry of the seed document.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedLot {
    pub slug: String,
    pub name: String,
    pub category_code: String,
    #[serde(default)]
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

const fn default_true() -> bool {
    true
}

/// What one seeding run inserted.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeedSummary {
    pub site_texts: u64,
    pub metrics: u64,
    pub categories: u64,
    pub contacts: u64,
    pub lots: u64,
    pub lots_skipped: u64,
}

/// Parse the bundled seed document.
///
/// # Errors
///
/// Returns `serde_json::Error` if the bundle does not parse; that is a
/// packaging defect and fatal at startup.
pub fn load_bundle() -> Result<SeedData, serde_json::Error> {
    serde_json::from_str(SEED_BUNDLE)
}

/// Run the idempotent seed procedure.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any statement or the final commit
/// fails; nothing is left half-applied in that case.
pub async fn run(pool: &SqlitePool, data: &SeedData) -> Result<SeedSummary, RepositoryError> {
    let mut tx = pool.begin().await?;
    let mut summary = SeedSummary::default();

    summary.metrics = ensure_visit_metric(&mut tx).await?;
    summary.site_texts = ensure_default_texts(&mut tx).await?;

    let has_lots = sqlx::query("SELECT 1 FROM lots LIMIT 1")
        .fetch_optional(&mut *tx)
        .await?
        .is_some();

    if !has_lots {
        seed_catalog(&mut tx, data, &mut summary).await?;
    }

    tx.commit().await?;
    Ok(summary)
}

async fn ensure_visit_metric(tx: &mut Transaction<'_, Sqlite>) -> Result<u64, RepositoryError> {
    let result = sqlx::query("INSERT OR IGNORE INTO site_metrics (key, value) VALUES (?, 0)")
        .bind(VISITS_METRIC)
        .execute(&mut **tx)
        .await?;
    Ok(result.rows_affected())
}

async fn ensure_default_texts(tx: &mut Transaction<'_, Sqlite>) -> Result<u64, RepositoryError> {
    let mut inserted = 0;
    for (key, value, description) in DEFAULT_SITE_TEXTS {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO site_texts (key, value, description) VALUES (?, ?, ?)",
        )
        .bind(key)
        .bind(value)
        .bind(description)
        .execute(&mut **tx)
        .await?;
        inserted += result.rows_affected();
    }
    Ok(inserted)
}

/// Bulk-load categories, contacts, and lots from the bundle. Only called
/// while the lot table is empty; categories and contacts left over from an
/// earlier run (all lots deleted, server restarted) are kept as-is.
async fn seed_catalog(
    tx: &mut Transaction<'_, Sqlite>,
    data: &SeedData,
    summary: &mut SeedSummary,
) -> Result<(), RepositoryError> {
    // Categories keep the bundle's order as their sort order; the synthetic
    // "all" pseudo-category is a filter value, not a row.
    let mut sort_index = 0i64;
    for (code, label) in &data.category_labels {
        if code == ALL_CATEGORY_CODE {
            continue;
        }
        let label = label.as_str().unwrap_or_default();
        let result =
            sqlx::query("INSERT OR IGNORE INTO categories (code, label, sort_order) VALUES (?, ?, ?)")
                .bind(code)
                .bind(label)
                .bind(sort_index)
                .execute(&mut **tx)
                .await?;
        sort_index += 1;
        summary.categories += result.rows_affected();
    }

    for contact in &data.contacts {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO contact_channels (code, label, hint, url_template, subject_template, \
             body_template, is_external, icon_svg, sort_order) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&contact.code)
        .bind(&contact.label)
        .bind(&contact.hint)
        .bind(&contact.url_template)
        .bind(&contact.subject_template)
        .bind(&contact.body_template)
        .bind(contact.is_external)
        .bind(&contact.icon_svg)
        .bind(contact.sort_order)
        .execute(&mut **tx)
        .await?;
        summary.contacts += result.rows_affected();
    }

    let now = chrono::Utc::now().timestamp_millis();
    for lot in &data.lots {
        let category_id: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE code = ?")
            .bind(&lot.category_code)
            .fetch_optional(&mut **tx)
            .await?;

        let Some(category_id) = category_id else {
            // A bad seed row must not abort startup, but it should not
            // vanish silently either.
            warn!(
                slug = %lot.slug,
                category = %lot.category_code,
                "skipping seed lot with unresolvable category"
            );
            summary.lots_skipped += 1;
            continue;
        };

        let specs = serde_json::to_string(&lot.specs)
            .map_err(|e| RepositoryError::DataCorruption(format!("seed specs: {e}")))?;
        let images = serde_json::to_string(&lot.images)
            .map_err(|e| RepositoryError::DataCorruption(format!("seed images: {e}")))?;

        sqlx::query(
            "INSERT INTO lots (slug, name, category_id, price, description, specs, images, \
             featured, sold, glitch_background, sort_order, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&lot.slug)
        .bind(&lot.name)
        .bind(category_id)
        .bind(lot.price)
        .bind(&lot.description)
        .bind(specs)
        .bind(images)
        .bind(lot.featured)
        .bind(lot.sold)
        .bind(&lot.glitch_background)
        .bind(lot.sort_order)
        .bind(now)
        .bind(now)
        .execute(&mut **tx)
        .await?;
        summary.lots += 1;
    }

    info!(
        categories = summary.categories,
        contacts = summary.contacts,
        lots = summary.lots,
        lots_skipped = summary.lots_skipped,
        "seeded empty catalog from bundle"
    );
    Ok(())
}
