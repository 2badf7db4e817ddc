//! Category repository.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::{RepositoryError, conflict_on_unique};
use crate::models::Category;

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all categories ordered by sort order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, code, label, sort_order FROM categories ORDER BY sort_order ASC",
        )
        .fetch_all(self.pool)
        .await?;
        rows.iter().map(category_from_row).collect()
    }

    /// Get a category by its code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_code(&self, code: &str) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query("SELECT id, code, label, sort_order FROM categories WHERE code = ?")
            .bind(code)
            .fetch_optional(self.pool)
            .await?;
        row.map(|r| category_from_row(&r)).transpose()
    }

    /// Insert a category and return it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the code is already taken and
    /// `RepositoryError::Database` for other failures.
    pub async fn create(
        &self,
        code: &str,
        label: &str,
        sort_order: i64,
    ) -> Result<Category, RepositoryError> {
        let result = sqlx::query("INSERT INTO categories (code, label, sort_order) VALUES (?, ?, ?)")
            .bind(code)
            .bind(label)
            .bind(sort_order)
            .execute(self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, "code already exists"))?;

        Ok(Category {
            id: result.last_insert_rowid(),
            code: code.to_owned(),
            label: label.to_owned(),
            sort_order,
        })
    }

    /// Write back the mutable fields of `category`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category no longer exists
    /// and `RepositoryError::Database` for other failures.
    pub async fn update(&self, category: &Category) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE categories SET label = ?, sort_order = ? WHERE id = ?")
            .bind(&category.label)
            .bind(category.sort_order)
            .bind(category.id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete a category by its id.
    ///
    /// The caller has already verified that no lot references it; a racing
    /// insert is still stopped by the RESTRICT foreign key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category no longer exists
    /// and `RepositoryError::Database` for other failures.
    pub async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Total number of categories.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_all(&self) -> Result<i64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) FROM categories")
            .fetch_one(self.pool)
            .await?;
        Ok(row.try_get(0)?)
    }
}

fn category_from_row(row: &SqliteRow) -> Result<Category, RepositoryError> {
    Ok(Category {
        id: row.try_get("id")?,
        code: row.try_get("code")?,
        label: row.try_get("label")?,
        sort_order: row.try_get("sort_order")?,
    })
}
