//! In-memory pilot hours cache
//!
//! Values are the full [`RatingsData`] for a CID, so controller time rides
//! along with the pilot hours the report is sorted by.
//! One cache lives for one run of the tool and may be shared by any number of
//! concurrent lookups. Each CID gets its own `OnceCell`, so concurrent misses
//! for the same CID collapse into a single fetch while different CIDs proceed
//! independently. Entries are never evicted.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

use crate::api::RatingsData;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct HoursCache {
    entries: Mutex<HashMap<u64, Arc<OnceCell<RatingsData>>>>,
}

impl HoursCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache that already knows some pilots. Plain `f64` values are
    /// taken as pilot hours.
    pub fn with_entries<R>(entries: impl IntoIterator<Item = (u64, R)>) -> Self
    where
        R: Into<RatingsData>,
    {
        let entries = entries
            .into_iter()
            .map(|(cid, ratings)| (cid, Arc::new(OnceCell::new_with(Some(ratings.into())))))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Cached ratings for `cid`, without fetching.
    pub async fn get(&self, cid: u64) -> Option<RatingsData> {
        let entries = self.entries.lock().await;
        entries.get(&cid).and_then(|cell| cell.get().copied())
    }

    /// Number of pilots with a resolved value.
    pub async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.values().filter(|cell| cell.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Return the cached ratings for `cid`, running `fetch` on a miss.
    ///
    /// Callers racing on the same CID wait for the first fetch instead of
    /// issuing their own. A failed fetch leaves the entry empty so a later
    /// call can try again.
    pub async fn get_or_fetch<F, Fut>(&self, cid: u64, fetch: F) -> Result<RatingsData>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<RatingsData>>,
    {
        let cell = self.cell(cid).await;
        if let Some(ratings) = cell.get() {
            tracing::trace!("Cache hit for CID {}", cid);
            return Ok(*ratings);
        }

        let ratings = cell
            .get_or_try_init(move || async move {
                tracing::debug!("Cache miss for CID {}, fetching", cid);
                fetch().await
            })
            .await?;
        Ok(*ratings)
    }

    /// The cell for `cid`, created empty if absent. The map lock is released
    /// before the caller awaits on the cell.
    async fn cell(&self, cid: u64) -> Arc<OnceCell<RatingsData>> {
        let mut entries = self.entries.lock().await;
        entries.entry(cid).or_default().clone()
    }
}
