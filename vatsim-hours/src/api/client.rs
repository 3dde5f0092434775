//! HTTP client for the VATSIM status, data and ratings endpoints

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::types::{FlightRecord, RatingsData, StatusManifest, V3ResponseData};
use crate::config::AppConfig;
use crate::enrich::HoursSource;
use crate::error::{Error, Result};

/// Placeholder substituted with the pilot CID in the ratings URL template
pub const CID_PLACEHOLDER: &str = "{cid}";

/// VATSIM API client. Owns one pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct VatsimClient {
    client: Client,
    status_url: String,
    ratings_url: String,
}

impl VatsimClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|source| Error::Request {
                url: config.status_url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            status_url: config.status_url.clone(),
            ratings_url: config.ratings_url.clone(),
        })
    }

    /// Query the status manifest and pick one of its V3 endpoints at random.
    pub async fn discover_endpoint(&self) -> Result<String> {
        tracing::debug!("Fetching status manifest from {}", self.status_url);
        let manifest: StatusManifest = self.get_json(&self.status_url).await?;

        let url = select_endpoint(&manifest.data.v3).ok_or_else(|| Error::MalformedResponse {
            url: self.status_url.clone(),
            reason: "no V3 URLs returned".to_string(),
        })?;

        tracing::debug!(
            "Selected V3 endpoint {} out of {} candidates",
            url,
            manifest.data.v3.len()
        );
        Ok(url.clone())
    }

    /// Fetch the online pilots, sorted by case-insensitive callsign.
    pub async fn fetch_online_records(&self, url: &str) -> Result<Vec<FlightRecord>> {
        let data: V3ResponseData = self.get_json(url).await?;
        let mut pilots = data.pilots;
        sort_by_callsign(&mut pilots);

        tracing::info!("Fetched {} online pilots from {}", pilots.len(), url);
        Ok(pilots)
    }

    /// Total time the user has spent as a pilot on the network, in hours.
    pub async fn fetch_cumulative_hours(&self, cid: u64) -> Result<f64> {
        Ok(self.fetch_rating_times(cid).await?.pilot)
    }

    /// Pilot and controller hours for `cid`.
    pub async fn fetch_rating_times(&self, cid: u64) -> Result<RatingsData> {
        let url = self.ratings_url_for(cid);
        let data: RatingsData = self.get_json(&url).await?;
        tracing::debug!(
            "CID {} has {} pilot hours, {:?} ATC hours",
            cid,
            data.pilot,
            data.atc
        );
        Ok(data)
    }

    fn ratings_url_for(&self, cid: u64) -> String {
        self.ratings_url.replace(CID_PLACEHOLDER, &cid.to_string())
    }

    /// GET `url`, require a 200 and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| Error::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("Got status {} from {}", status, url);
            return Err(Error::UpstreamStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| Error::Request {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_str(&body).map_err(|e| Error::MalformedResponse {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl HoursSource for VatsimClient {
    async fn rating_times(&self, cid: u64) -> Result<RatingsData> {
        self.fetch_rating_times(cid).await
    }
}

/// Uniformly random pick among the candidate endpoints.
pub fn select_endpoint(candidates: &[String]) -> Option<&String> {
    candidates.choose(&mut rand::rng())
}

/// Stable sort by lowercased callsign.
pub fn sort_by_callsign(records: &mut [FlightRecord]) {
    records.sort_by_cached_key(|record| record.callsign.to_lowercase());
}
