//! One end-to-end run: discover, fetch, filter, enrich, sort.

use crate::api::VatsimClient;
use crate::config::AppConfig;
use crate::enrich::{enrich_with_policy, EnrichPolicy, HoursCache};
use crate::error::Result;
use crate::geo::{self, Airport};
use crate::report::Report;

#[derive(Debug, Clone)]
pub struct Pipeline {
    client: VatsimClient,
    airport: &'static Airport,
    max_distance: u32,
    data_url: Option<String>,
    policy: EnrichPolicy,
}

impl Pipeline {
    /// Fails with `UnsupportedAirport` before any request is made.
    pub fn new(client: VatsimClient, config: &AppConfig, airport: &str) -> Result<Self> {
        let airport = Airport::lookup(airport)?;
        let policy = if config.skip_failed_lookups {
            EnrichPolicy::SkipFailed
        } else {
            EnrichPolicy::FailFast
        };

        Ok(Self {
            client,
            airport,
            max_distance: config.max_distance,
            data_url: config.data_url.clone(),
            policy,
        })
    }

    pub fn with_max_distance(mut self, max_distance: u32) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn airport(&self) -> &'static Airport {
        self.airport
    }

    /// Run the pipeline once. `cache` may be reused across runs.
    pub async fn run(&self, cache: &HoursCache) -> Result<Report> {
        let url = match &self.data_url {
            Some(url) => url.clone(),
            None => self.client.discover_endpoint().await?,
        };

        let records = self.client.fetch_online_records(&url).await?;
        let total = records.len();
        let in_range = geo::filter_by_range(records, self.airport.code, self.max_distance)?;

        tracing::info!(
            "{} of {} pilots within {} of {}: {}",
            in_range.len(),
            total,
            self.max_distance,
            self.airport.code,
            in_range
                .iter()
                .map(|pilot| pilot.callsign.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let entries = enrich_with_policy(&in_range, cache, &self.client, self.policy).await?;
        Ok(Report::new(self.airport.code, self.max_distance, entries))
    }
}
