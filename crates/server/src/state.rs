//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the database pool and
/// the decorative background assets from the bundled seed document.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: SqlitePool,
    glitch_backgrounds: Vec<String>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(pool: SqlitePool, glitch_backgrounds: Vec<String>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                pool,
                glitch_backgrounds,
            }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Decorative background asset names served in the bootstrap payload.
    #[must_use]
    pub fn glitch_backgrounds(&self) -> &[String] {
        &self.inner.glitch_backgrounds
    }
}
