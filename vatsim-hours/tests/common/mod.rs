//! Local stand-in for the VATSIM endpoints, served with axum.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use vatsim_hours::config::AppConfig;

/// Bind an ephemeral port, build the router for that base URL and serve it.
pub async fn serve(build: impl FnOnce(&str) -> Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let app = build(&base);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    base
}

/// A URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/status.json", addr)
}

pub fn config_for(base: &str) -> AppConfig {
    AppConfig {
        status_url: format!("{}/status.json", base),
        ratings_url: format!("{}/api/ratings/{{cid}}/rating_times", base),
        request_timeout_secs: 5,
        ..AppConfig::default()
    }
}

pub fn pilot(cid: u64, callsign: &str, latitude: f64, longitude: f64) -> Value {
    json!({
        "cid": cid,
        "name": format!("Pilot {}", cid),
        "callsign": callsign,
        "server": "USA-WEST",
        "pilot_rating": 0,
        "latitude": latitude,
        "longitude": longitude,
        "altitude": 2500,
        "groundspeed": 120,
        "transponder": "1200",
        "heading": 90,
        "flight_plan": null,
        "logon_time": "2024-05-01T18:00:00.0000000Z",
        "last_updated": "2024-05-01T19:00:00.0000000Z"
    })
}

pub fn manifest(urls: &[String]) -> Value {
    json!({
        "data": {
            "v3": urls,
            "servers": [],
            "servers_sweatbox": []
        },
        "user": ["https://stats.vatsim.net/"],
        "metar": ["https://metar.vatsim.net/metar.php"]
    })
}

/// Ratings endpoint answering from `hours`, 404 for unknown CIDs.
#[derive(Clone, Default)]
pub struct Ratings {
    pub hours: Arc<HashMap<u64, f64>>,
    pub hits: Arc<AtomicUsize>,
}

impl Ratings {
    pub fn new(hours: impl IntoIterator<Item = (u64, f64)>) -> Self {
        Self {
            hours: Arc::new(hours.into_iter().collect()),
            hits: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/ratings/{cid}/rating_times", get(rating_times))
            .with_state(self.clone())
    }
}

async fn rating_times(State(ratings): State<Ratings>, Path(cid): Path<u64>) -> impl IntoResponse {
    ratings.hits.fetch_add(1, Ordering::SeqCst);
    match ratings.hours.get(&cid) {
        Some(hours) => (
            StatusCode::OK,
            Json(json!({
                "id": cid.to_string(),
                "atc": 0.0,
                "pilot": hours,
                "s1": 0.0
            })),
        ),
        None => (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." }))),
    }
}
