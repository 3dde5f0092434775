//! Pilot hours enrichment
//!
//! Turns flight records into report entries by resolving each pilot's
//! cumulative hours through a [`HoursCache`]. Lookups for one batch run
//! concurrently and are joined before returning.

mod cache;
pub use cache::HoursCache;

use async_trait::async_trait;
use futures::future::{join_all, try_join_all};

use crate::api::{FlightRecord, RatingsData};
use crate::error::{Error, Result};
use crate::report::ReportEntry;

/// Where rating times come from on a cache miss.
#[async_trait]
pub trait HoursSource: Send + Sync {
    async fn rating_times(&self, cid: u64) -> Result<RatingsData>;
}

/// What to do when one lookup in a batch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnrichPolicy {
    /// Abort the whole batch on the first error
    #[default]
    FailFast,
    /// Log the error and leave the pilot out of the result
    SkipFailed,
}

/// Resolve hours for every record, fail-fast.
///
/// Entries come back unordered; sorting happens at presentation time.
pub async fn enrich<S>(
    records: &[FlightRecord],
    cache: &HoursCache,
    source: &S,
) -> Result<Vec<ReportEntry>>
where
    S: HoursSource + ?Sized,
{
    enrich_with_policy(records, cache, source, EnrichPolicy::FailFast).await
}

pub async fn enrich_with_policy<S>(
    records: &[FlightRecord],
    cache: &HoursCache,
    source: &S,
    policy: EnrichPolicy,
) -> Result<Vec<ReportEntry>>
where
    S: HoursSource + ?Sized,
{
    let lookups = records.iter().map(|record| async move {
        let cid = record.cid;
        let ratings = cache
            .get_or_fetch(cid, move || source.rating_times(cid))
            .await?;
        Ok::<_, Error>(ReportEntry::new(record, ratings))
    });

    let entries = match policy {
        EnrichPolicy::FailFast => try_join_all(lookups).await?,
        EnrichPolicy::SkipFailed => join_all(lookups)
            .await
            .into_iter()
            .zip(records)
            .filter_map(|(result, record)| match result {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(
                        "Skipping {} (CID {}): {}",
                        record.callsign,
                        record.cid,
                        e
                    );
                    None
                }
            })
            .collect(),
    };

    tracing::debug!("Enriched {} of {} pilots", entries.len(), records.len());
    Ok(entries)
}
