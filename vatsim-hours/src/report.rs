//! Report entries and text rendering

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;

use crate::api::{FlightRecord, RatingsData};

const STATS_URL_BASE: &str = "https://stats.vatsim.net/stats";

/// Public stats page for a pilot
pub fn stats_url(cid: u64) -> String {
    format!("{}/{}", STATS_URL_BASE, cid)
}

/// One pilot's line in the report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub callsign: String,
    pub cid: u64,
    /// Cumulative pilot hours
    pub hours: f64,
    /// Cumulative controller hours, when the ratings endpoint reports them
    pub atc_hours: Option<f64>,
    pub aircraft: Option<String>,
}

impl ReportEntry {
    pub fn new(record: &FlightRecord, ratings: RatingsData) -> Self {
        Self {
            callsign: record.callsign.clone(),
            cid: record.cid,
            hours: ratings.pilot,
            atc_hours: ratings.atc,
            aircraft: record.aircraft().map(str::to_string),
        }
    }
}

/// Pilots in range of an airport, ascending by hours
#[derive(Debug, Clone)]
pub struct Report {
    pub airport: String,
    pub max_distance: u32,
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<ReportEntry>,
}

impl Report {
    pub fn new(airport: &str, max_distance: u32, mut entries: Vec<ReportEntry>) -> Self {
        sort_by_hours(&mut entries);
        Self {
            airport: airport.to_string(),
            max_distance,
            generated_at: Utc::now(),
            entries,
        }
    }

    /// Plain-text table. Pilots under `alert_hours` are marked with `*`.
    pub fn render(&self, alert_hours: f64) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Pilots within {} of {} ({} online, updated {})",
            self.max_distance,
            self.airport,
            self.entries.len(),
            self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        );

        if self.entries.is_empty() {
            out.push_str("  (none)\n");
            return out;
        }

        let _ = writeln!(
            out,
            "  {:<12} {:<10} {:>10} {:>10}  {}",
            "Callsign", "Aircraft", "Pilot hrs", "ATC hrs", "Stats"
        );
        for entry in &self.entries {
            let flag = if entry.hours < alert_hours { '*' } else { ' ' };
            let atc = entry
                .atc_hours
                .map_or_else(|| "-".to_string(), |hours| format!("{:.1}", hours));
            let _ = writeln!(
                out,
                "{} {:<12} {:<10} {:>10.1} {:>10}  {}",
                flag,
                entry.callsign,
                entry.aircraft.as_deref().unwrap_or("???"),
                entry.hours,
                atc,
                stats_url(entry.cid)
            );
        }
        out
    }
}

/// Ascending by hours; NaN sorts last.
pub fn sort_by_hours(entries: &mut [ReportEntry]) {
    entries.sort_by(|a, b| a.hours.total_cmp(&b.hours));
}
