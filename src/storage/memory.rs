//! In-memory [`Store`] for tests and dry runs.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::core::error::{AppError, AppResult};
use crate::storage::db::{Sponsor, StatsRecord};
use crate::storage::store::Store;

#[derive(Default)]
pub struct MemoryStore {
    stats: Mutex<Vec<StatsRecord>>,
    sponsors: Mutex<BTreeMap<String, Sponsor>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail, simulating a database outage.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of recorded measurements.
    pub fn records(&self) -> Vec<StatsRecord> {
        self.stats.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn check(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Io(std::io::Error::other("store is unavailable")));
        }
        Ok(())
    }
}

fn poisoned() -> AppError {
    AppError::Io(std::io::Error::other("store lock poisoned"))
}

#[async_trait]
impl Store for MemoryStore {
    async fn record(&self, stats: &StatsRecord) -> AppResult<()> {
        self.check()?;
        self.stats.lock().map_err(|_| poisoned())?.push(stats.clone());
        Ok(())
    }

    async fn average_for(&self, user_id: i64) -> AppResult<Option<i64>> {
        self.check()?;
        let stats = self.stats.lock().map_err(|_| poisoned())?;
        let sizes: Vec<i64> = stats.iter().filter(|s| s.user_id == user_id).map(|s| s.size).collect();
        if sizes.is_empty() {
            return Ok(None);
        }
        let mean = sizes.iter().sum::<i64>() as f64 / sizes.len() as f64;
        Ok(Some((mean + 0.5).floor() as i64))
    }

    async fn list_sponsors(&self) -> AppResult<Vec<Sponsor>> {
        self.check()?;
        let sponsors = self.sponsors.lock().map_err(|_| poisoned())?;
        Ok(sponsors.values().cloned().collect())
    }

    async fn add_sponsor(&self, name: &str, url: &str) -> AppResult<()> {
        self.check()?;
        let mut sponsors = self.sponsors.lock().map_err(|_| poisoned())?;
        sponsors
            .entry(name.to_string())
            .and_modify(|s| s.url = url.to_string())
            .or_insert_with(|| Sponsor {
                name: name.to_string(),
                url: url.to_string(),
                created_at: Utc::now(),
            });
        Ok(())
    }

    async fn remove_sponsor(&self, name: &str) -> AppResult<bool> {
        self.check()?;
        Ok(self.sponsors.lock().map_err(|_| poisoned())?.remove(name).is_some())
    }
}
