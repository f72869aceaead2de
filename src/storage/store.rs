//! Narrow persistence interface used by the Telegram handlers.
//!
//! Handlers only need five operations, so they depend on [`Store`] rather than on
//! the pool. [`SqliteStore`] is the production implementation; tests inject an
//! in-memory one.

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::{AppError, AppResult};
use crate::storage::db::{self, DbPool, Sponsor, StatsRecord};

#[async_trait]
pub trait Store: Send + Sync {
    /// Persist one measurement.
    async fn record(&self, stats: &StatsRecord) -> AppResult<()>;

    /// All-time average size for a user, `None` without history.
    async fn average_for(&self, user_id: i64) -> AppResult<Option<i64>>;

    async fn list_sponsors(&self) -> AppResult<Vec<Sponsor>>;

    /// Adds a sponsor, replacing the URL if the name already exists.
    async fn add_sponsor(&self, name: &str, url: &str) -> AppResult<()>;

    /// Returns `false` if no sponsor had that name.
    async fn remove_sponsor(&self, name: &str) -> AppResult<bool>;
}

/// SQLite-backed store. Queries run on the blocking pool so the dispatcher's
/// workers never wait on disk.
#[derive(Clone)]
pub struct SqliteStore {
    pool: Arc<DbPool>,
}

impl SqliteStore {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    async fn with_conn<T, F>(&self, f: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&db::DbConnection) -> rusqlite::Result<T> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || -> AppResult<T> {
            let conn = db::get_connection(&pool)?;
            f(&conn).map_err(AppError::from)
        })
        .await?
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn record(&self, stats: &StatsRecord) -> AppResult<()> {
        let stats = stats.clone();
        self.with_conn(move |conn| db::insert_stats(conn, &stats)).await
    }

    async fn average_for(&self, user_id: i64) -> AppResult<Option<i64>> {
        self.with_conn(move |conn| db::average_size_for_user(conn, user_id)).await
    }

    async fn list_sponsors(&self) -> AppResult<Vec<Sponsor>> {
        self.with_conn(|conn| db::get_all_sponsors(conn)).await
    }

    async fn add_sponsor(&self, name: &str, url: &str) -> AppResult<()> {
        let (name, url) = (name.to_string(), url.to_string());
        self.with_conn(move |conn| db::upsert_sponsor(conn, &name, &url)).await
    }

    async fn remove_sponsor(&self, name: &str) -> AppResult<bool> {
        let name = name.to_string();
        self.with_conn(move |conn| db::delete_sponsor(conn, &name)).await
    }
}
