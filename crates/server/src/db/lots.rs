//! Lot repository.
//!
//! Home of the listing engine: free-text search, category and availability
//! filters, the five sort modes with their tie-breaks, and pagination. All
//! lot reads LEFT JOIN the owning category so responses can project its
//! code and label without a second query.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use jshop_core::{ALL_CATEGORY_CODE, LotSort, PageParams};

use super::{RepositoryError, conflict_on_unique};
use crate::models::Lot;

/// Shared select list for lot reads.
const LOT_SELECT: &str = "SELECT l.id, l.slug, l.name, l.category_id, l.price, l.description, \
     l.specs, l.images, l.featured, l.sold, l.glitch_background, l.sort_order, \
     l.created_at, l.updated_at, \
     COALESCE(c.code, '') AS category_code, COALESCE(c.label, '') AS category_label \
     FROM lots l LEFT JOIN categories c ON c.id = l.category_id";

/// Filter conditions for lot listings; all present conditions are AND-ed.
#[derive(Debug, Clone, Default)]
pub struct LotFilter {
    /// Case-insensitive substring match against name or description.
    pub q: Option<String>,
    /// Exact category code; `None` or `"all"` means no category filter.
    pub category: Option<String>,
    /// Restrict to unsold lots.
    pub only_available: bool,
}

/// Field values for a lot insert.
#[derive(Debug, Clone)]
pub struct NewLot {
    pub slug: String,
    pub name: String,
    pub category_id: i64,
    pub price: i64,
    pub description: String,
    pub specs: Vec<String>,
    pub images: Vec<String>,
    pub featured: bool,
    pub sold: bool,
    pub glitch_background: String,
    pub sort_order: i64,
}

/// Repository for lot database operations.
pub struct LotRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LotRepository<'a> {
    /// Create a new lot repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a lot by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Lot>, RepositoryError> {
        let mut qb = QueryBuilder::new(LOT_SELECT);
        qb.push(" WHERE l.slug = ").push_bind(slug.to_owned());

        let row = qb.build().fetch_optional(self.pool).await?;
        row.map(|r| lot_from_row(&r)).transpose()
    }

    /// List lots matching `filter`, ordered by sort order then name.
    ///
    /// Used by the bootstrap payload and the admin listing; not paginated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_ordered(&self, filter: &LotFilter) -> Result<Vec<Lot>, RepositoryError> {
        let mut qb = QueryBuilder::new(LOT_SELECT);
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY l.sort_order ASC, l.name ASC");

        let rows = qb.build().fetch_all(self.pool).await?;
        rows.iter().map(lot_from_row).collect()
    }

    /// One page of the filtered, sorted lot listing plus the total count of
    /// the filtered (not paginated) set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    pub async fn page(
        &self,
        filter: &LotFilter,
        sort: LotSort,
        params: PageParams,
    ) -> Result<(Vec<Lot>, u64), RepositoryError> {
        let mut count_qb =
            QueryBuilder::new("SELECT COUNT(*) FROM lots l LEFT JOIN categories c ON c.id = l.category_id");
        push_filters(&mut count_qb, filter);
        let total: i64 = count_qb.build().fetch_one(self.pool).await?.try_get(0)?;

        let mut qb = QueryBuilder::new(LOT_SELECT);
        push_filters(&mut qb, filter);
        qb.push(order_clause(sort));
        qb.push(" LIMIT ")
            .push_bind(i64::from(params.page_size))
            .push(" OFFSET ")
            .push_bind(i64::try_from(params.offset()).unwrap_or(i64::MAX));

        let rows = qb.build().fetch_all(self.pool).await?;
        let items = rows.iter().map(lot_from_row).collect::<Result<_, _>>()?;

        Ok((items, u64::try_from(total).unwrap_or(0)))
    }

    /// Insert a lot and return it with its category resolved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is already taken
    /// (also under a pre-check race) and `RepositoryError::Database` for
    /// other failures.
    pub async fn create(&self, new: &NewLot) -> Result<Lot, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        insert_lot(&mut tx, new, Utc::now()).await?;
        tx.commit().await?;

        self.get_by_slug(&new.slug)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Insert a batch of lots in a single transaction.
    ///
    /// The caller has already resolved categories and de-duplicated slugs;
    /// any remaining unique violation aborts the whole batch as a conflict.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a slug collision and
    /// `RepositoryError::Database` for other failures.
    pub async fn create_many(&self, batch: &[NewLot]) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();
        for new in batch {
            insert_lot(&mut tx, new, now).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Write back every mutable field of `lot` and re-stamp `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the lot no longer exists,
    /// `RepositoryError::Conflict` on a slug collision, and
    /// `RepositoryError::Database` for other failures.
    pub async fn update(&self, lot: &Lot) -> Result<(), RepositoryError> {
        let specs = encode_list(&lot.specs)?;
        let images = encode_list(&lot.images)?;

        let result = sqlx::query(
            "UPDATE lots SET slug = ?, name = ?, category_id = ?, price = ?, description = ?, \
             specs = ?, images = ?, featured = ?, sold = ?, glitch_background = ?, \
             sort_order = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&lot.slug)
        .bind(&lot.name)
        .bind(lot.category_id)
        .bind(lot.price)
        .bind(&lot.description)
        .bind(specs)
        .bind(images)
        .bind(lot.featured)
        .bind(lot.sold)
        .bind(&lot.glitch_background)
        .bind(lot.sort_order)
        .bind(Utc::now().timestamp_millis())
        .bind(lot.id)
        .execute(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "slug already exists"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete a lot by slug.
    ///
    /// # Returns
    ///
    /// `true` if a lot was deleted, `false` if none existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_by_slug(&self, slug: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM lots WHERE slug = ?")
            .bind(slug)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether a lot with this slug exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists_slug(&self, slug: &str) -> Result<bool, RepositoryError> {
        let row = sqlx::query("SELECT 1 FROM lots WHERE slug = ?")
            .bind(slug)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// The subset of `slugs` that is already persisted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn existing_slugs(
        &self,
        slugs: &[String],
    ) -> Result<HashSet<String>, RepositoryError> {
        if slugs.is_empty() {
            return Ok(HashSet::new());
        }

        let mut qb = QueryBuilder::new("SELECT slug FROM lots WHERE slug IN (");
        let mut separated = qb.separated(", ");
        for slug in slugs {
            separated.push_bind(slug.clone());
        }
        qb.push(")");

        let rows = qb.build().fetch_all(self.pool).await?;
        rows.iter()
            .map(|r| r.try_get::<String, _>("slug").map_err(RepositoryError::from))
            .collect()
    }

    /// Total number of lots.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_all(&self) -> Result<i64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) FROM lots")
            .fetch_one(self.pool)
            .await?;
        Ok(row.try_get(0)?)
    }

    /// Number of sold lots.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_sold(&self) -> Result<i64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) FROM lots WHERE sold = 1")
            .fetch_one(self.pool)
            .await?;
        Ok(row.try_get(0)?)
    }

    /// Number of lots owned by the given category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_in_category(&self, category_id: i64) -> Result<i64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) FROM lots WHERE category_id = ?")
            .bind(category_id)
            .fetch_one(self.pool)
            .await?;
        Ok(row.try_get(0)?)
    }
}

async fn insert_lot(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    new: &NewLot,
    now: DateTime<Utc>,
) -> Result<(), RepositoryError> {
    let specs = encode_list(&new.specs)?;
    let images = encode_list(&new.images)?;

    sqlx::query(
        "INSERT INTO lots (slug, name, category_id, price, description, specs, images, \
         featured, sold, glitch_background, sort_order, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&new.slug)
    .bind(&new.name)
    .bind(new.category_id)
    .bind(new.price)
    .bind(&new.description)
    .bind(specs)
    .bind(images)
    .bind(new.featured)
    .bind(new.sold)
    .bind(&new.glitch_background)
    .bind(new.sort_order)
    .bind(now.timestamp_millis())
    .bind(now.timestamp_millis())
    .execute(&mut **tx)
    .await
    .map_err(|e| conflict_on_unique(e, "slug already exists"))?;

    Ok(())
}

/// Append the AND-ed filter conditions to a lot query.
fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &LotFilter) {
    qb.push(" WHERE 1 = 1");

    if let Some(q) = filter.q.as_deref().map(str::trim)
        && !q.is_empty()
    {
        qb.push(" AND (LOWER(l.name) LIKE '%' || LOWER(")
            .push_bind(q.to_owned())
            .push(") || '%' OR LOWER(l.description) LIKE '%' || LOWER(")
            .push_bind(q.to_owned())
            .push(") || '%')");
    }

    if let Some(category) = filter.category.as_deref()
        && !category.is_empty()
        && category != ALL_CATEGORY_CODE
    {
        qb.push(" AND c.code = ").push_bind(category.to_owned());
    }

    if filter.only_available {
        qb.push(" AND l.sold = 0");
    }
}

/// ORDER BY clause for a sort mode, including its tie-breaks.
const fn order_clause(sort: LotSort) -> &'static str {
    match sort {
        LotSort::PriceAsc => " ORDER BY l.price ASC, l.name ASC",
        LotSort::PriceDesc => " ORDER BY l.price DESC, l.name ASC",
        LotSort::NameAsc => " ORDER BY l.name ASC",
        LotSort::Newest => " ORDER BY l.created_at DESC, l.name ASC",
        LotSort::Featured => " ORDER BY l.featured DESC, l.price ASC, l.sort_order ASC",
    }
}

fn lot_from_row(row: &SqliteRow) -> Result<Lot, RepositoryError> {
    Ok(Lot {
        id: row.try_get("id")?,
        slug: row.try_get("slug")?,
        name: row.try_get("name")?,
        category_id: row.try_get("category_id")?,
        category_code: row.try_get("category_code")?,
        category_label: row.try_get("category_label")?,
        price: row.try_get("price")?,
        description: row.try_get("description")?,
        specs: decode_list(&row.try_get::<String, _>("specs")?)?,
        images: decode_list(&row.try_get::<String, _>("images")?)?,
        featured: row.try_get("featured")?,
        sold: row.try_get("sold")?,
        glitch_background: row.try_get("glitch_background")?,
        sort_order: row.try_get("sort_order")?,
        created_at: timestamp_from_millis(row.try_get("created_at")?)?,
        updated_at: timestamp_from_millis(row.try_get("updated_at")?)?,
    })
}

fn timestamp_from_millis(millis: i64) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        RepositoryError::DataCorruption(format!("invalid timestamp in database: {millis}"))
    })
}

fn encode_list(values: &[String]) -> Result<String, RepositoryError> {
    serde_json::to_string(values)
        .map_err(|e| RepositoryError::DataCorruption(format!("failed to serialize list: {e}")))
}

fn decode_list(raw: &str) -> Result<Vec<String>, RepositoryError> {
    serde_json::from_str(raw)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid list in database: {e}")))
}
