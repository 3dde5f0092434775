use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    /// Well-known status manifest
    #[serde(default = "default_status_url")]
    pub status_url: String,

    /// Ratings endpoint, `{cid}` is replaced by the pilot CID
    #[serde(default = "default_ratings_url")]
    pub ratings_url: String,

    /// Fixed V3 data URL; skips manifest discovery when set
    #[serde(default)]
    pub data_url: Option<String>,

    /// Range around the airport, in reporting units
    #[serde(default = "default_max_distance")]
    pub max_distance: u32,

    /// Pilots below this many hours are flagged in the report
    #[serde(default = "default_alert_hours")]
    pub alert_hours: f64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Delay between refreshes in watch mode
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Drop pilots whose hours lookup fails instead of aborting the run
    #[serde(default)]
    pub skip_failed_lookups: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_status_url() -> String {
    "https://status.vatsim.net/status.json".to_string()
}

fn default_ratings_url() -> String {
    "https://api.vatsim.net/api/ratings/{cid}/rating_times".to_string()
}

fn default_max_distance() -> u32 {
    30
}

fn default_alert_hours() -> f64 {
    30.0
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("vatsim-hours/{}", env!("CARGO_PKG_VERSION"))
}

fn default_refresh_interval_secs() -> u64 {
    15
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            status_url: default_status_url(),
            ratings_url: default_ratings_url(),
            data_url: None,
            max_distance: default_max_distance(),
            alert_hours: default_alert_hours(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            refresh_interval_secs: default_refresh_interval_secs(),
            skip_failed_lookups: false,
        }
    }
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}
