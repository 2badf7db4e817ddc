//! Contact channel repository.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::{RepositoryError, conflict_on_unique};
use crate::models::ContactChannel;

/// Field values for a contact channel insert.
#[derive(Debug, Clone)]
pub struct NewContact {
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

/// Repository for contact channel database operations.
pub struct ContactRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all contact channels ordered by sort order then code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<ContactChannel>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, code, label, hint, url_template, subject_template, body_template, \
             is_external, icon_svg, sort_order \
             FROM contact_channels ORDER BY sort_order ASC, code ASC",
        )
        .fetch_all(self.pool)
        .await?;
        rows.iter().map(contact_from_row).collect()
    }

    /// Get a contact channel by its code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_code(&self, code: &str) -> Result<Option<ContactChannel>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, code, label, hint, url_template, subject_template, body_template, \
             is_external, icon_svg, sort_order \
             FROM contact_channels WHERE code = ?",
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?;
        row.map(|r| contact_from_row(&r)).transpose()
    }

    /// Insert a contact channel and return it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the code is already taken and
    /// `RepositoryError::Database` for other failures.
    pub async fn create(&self, new: &NewContact) -> Result<ContactChannel, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO contact_channels (code, label, hint, url_template, subject_template, \
             body_template, is_external, icon_svg, sort_order) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.code)
        .bind(&new.label)
        .bind(&new.hint)
        .bind(&new.url_template)
        .bind(&new.subject_template)
        .bind(&new.body_template)
        .bind(new.is_external)
        .bind(&new.icon_svg)
        .bind(new.sort_order)
        .execute(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "code already exists"))?;

        Ok(ContactChannel {
            id: result.last_insert_rowid(),
            code: new.code.clone(),
            label: new.label.clone(),
            hint: new.hint.clone(),
            url_template: new.url_template.clone(),
            subject_template: new.subject_template.clone(),
            body_template: new.body_template.clone(),
            is_external: new.is_external,
            icon_svg: new.icon_svg.clone(),
            sort_order: new.sort_order,
        })
    }

    /// Write back the mutable fields of `contact`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the contact no longer exists
    /// and `RepositoryError::Database` for other failures.
    pub async fn update(&self, contact: &ContactChannel) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE contact_channels SET label = ?, hint = ?, url_template = ?, \
             subject_template = ?, body_template = ?, is_external = ?, icon_svg = ?, \
             sort_order = ? WHERE id = ?",
        )
        .bind(&contact.label)
        .bind(&contact.hint)
        .bind(&contact.url_template)
        .bind(&contact.subject_template)
        .bind(&contact.body_template)
        .bind(contact.is_external)
        .bind(&contact.icon_svg)
        .bind(contact.sort_order)
        .bind(contact.id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete a contact channel by its code.
    ///
    /// # Returns
    ///
    /// `true` if a contact was deleted, `false` if none existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_by_code(&self, code: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM contact_channels WHERE code = ?")
            .bind(code)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of contact channels.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_all(&self) -> Result<i64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) FROM contact_channels")
            .fetch_one(self.pool)
            .await?;
        Ok(row.try_get(0)?)
    }
}

fn contact_from_row(row: &SqliteRow) -> Result<ContactChannel, RepositoryError> {
    Ok(ContactChannel {
        id: row.try_get("id")?,
        code: row.try_get("code")?,
        label: row.try_get("label")?,
        hint: row.try_get("hint")?,
        url_template: row.try_get("url_template")?,
        subject_template: row.try_get("subject_template")?,
        body_template: row.try_get("body_template")?,
        is_external: row.try_get("is_external")?,
        icon_svg: row.try_get("icon_svg")?,
        sort_order: row.try_get("sort_order")?,
    })
}
