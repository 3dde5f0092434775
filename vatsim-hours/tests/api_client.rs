mod common;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use common::{config_for, dead_url, manifest, pilot, serve, Ratings};
use vatsim_hours::api::VatsimClient;
use vatsim_hours::Error;

#[tokio::test]
async fn test_discover_endpoint_picks_listed_url() {
    let base = serve(|base| {
        let body = manifest(&[format!("{}/v3/vatsim-data.json", base)]);
        Router::new().route("/status.json", get(move || async move { Json(body) }))
    })
    .await;

    let client = VatsimClient::new(&config_for(&base)).unwrap();
    let url = client.discover_endpoint().await.unwrap();
    assert_eq!(url, format!("{}/v3/vatsim-data.json", base));
}

#[tokio::test]
async fn test_discover_endpoint_picks_among_candidates() {
    let candidates: Vec<String> = (1..=3).map(|i| format!("https://data{}.example/v3", i)).collect();
    let body = manifest(&candidates);
    let base = serve(move |_| {
        Router::new().route("/status.json", get(move || async move { Json(body) }))
    })
    .await;

    let client = VatsimClient::new(&config_for(&base)).unwrap();
    for _ in 0..10 {
        let url = client.discover_endpoint().await.unwrap();
        assert!(candidates.contains(&url), "unexpected endpoint {}", url);
    }
}

#[tokio::test]
async fn test_discover_endpoint_empty_manifest_is_malformed() {
    let base = serve(|_| {
        Router::new().route("/status.json", get(|| async { Json(manifest(&[])) }))
    })
    .await;

    let client = VatsimClient::new(&config_for(&base)).unwrap();
    match client.discover_endpoint().await {
        Err(Error::MalformedResponse { url, .. }) => {
            assert_eq!(url, format!("{}/status.json", base))
        }
        other => panic!("expected MalformedResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_discover_endpoint_missing_data_is_malformed() {
    let base = serve(|_| {
        Router::new().route("/status.json", get(|| async { Json(json!({ "v3": [] })) }))
    })
    .await;

    let client = VatsimClient::new(&config_for(&base)).unwrap();
    let err = client.discover_endpoint().await.unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }), "{:?}", err);
}

#[tokio::test]
async fn test_discover_endpoint_non_200_status() {
    let base = serve(|_| {
        Router::new().route(
            "/status.json",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        )
    })
    .await;

    let client = VatsimClient::new(&config_for(&base)).unwrap();
    match client.discover_endpoint().await {
        Err(Error::UpstreamStatus { url, status }) => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE.as_u16());
            assert_eq!(url, format!("{}/status.json", base));
        }
        other => panic!("expected UpstreamStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_failure_is_request_error() {
    let url = dead_url().await;
    let config = vatsim_hours::config::AppConfig {
        status_url: url.clone(),
        ..config_for("http://127.0.0.1:9")
    };
    let client = VatsimClient::new(&config).unwrap();

    let err = client.discover_endpoint().await.unwrap_err();
    assert!(matches!(err, Error::Request { .. }), "{:?}", err);
    assert_eq!(err.url(), Some(url.as_str()));
}

#[tokio::test]
async fn test_fetch_online_records_sorted_by_callsign() {
    let body = json!({
        "general": { "version": 3, "update_timestamp": "2024-05-01T19:00:00Z" },
        "pilots": [
            pilot(5, "swa1", 32.7, -117.2),
            pilot(1, "AAL20", 33.9, -118.4),
            pilot(2, "SWA1", 32.8, -117.1),
            pilot(3, "n172sp", 32.6, -117.0),
            pilot(4, "aal100", 0.0, 0.0),
        ],
        "controllers": [],
        "atis": []
    });
    let base = serve(move |_| {
        Router::new().route("/v3/vatsim-data.json", get(move || async move { Json(body) }))
    })
    .await;

    let client = VatsimClient::new(&config_for(&base)).unwrap();
    let records = client
        .fetch_online_records(&format!("{}/v3/vatsim-data.json", base))
        .await
        .unwrap();

    let callsigns: Vec<&str> = records.iter().map(|r| r.callsign.as_str()).collect();
    assert_eq!(callsigns, vec!["aal100", "AAL20", "n172sp", "swa1", "SWA1"]);
    assert_eq!(records[3].cid, 5);
    assert_eq!(records[4].cid, 2);
    assert_eq!(records[0].transponder, "1200");
    assert_eq!(records[0].altitude, 2500);
}

#[tokio::test]
async fn test_fetch_online_records_errors() {
    let base = serve(|_| {
        Router::new()
            .route("/gone", get(|| async { StatusCode::GONE }))
            .route("/garbage", get(|| async { "<html>not json</html>" }))
    })
    .await;
    let client = VatsimClient::new(&config_for(&base)).unwrap();

    let err = client.fetch_online_records(&format!("{}/gone", base)).await.unwrap_err();
    assert!(
        matches!(err, Error::UpstreamStatus { status, .. } if status == StatusCode::GONE.as_u16())
    );

    let err = client.fetch_online_records(&format!("{}/garbage", base)).await.unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }), "{:?}", err);
}

#[tokio::test]
async fn test_fetch_cumulative_hours() {
    let ratings = Ratings::new([(810_000, 1234.5)]);
    let router = ratings.router();
    let base = serve(move |_| router).await;
    let client = VatsimClient::new(&config_for(&base)).unwrap();

    assert_eq!(client.fetch_cumulative_hours(810_000).await.unwrap(), 1234.5);
    let ratings_data = client.fetch_rating_times(810_000).await.unwrap();
    assert_eq!(ratings_data.pilot, 1234.5);
    assert_eq!(ratings_data.atc, Some(0.0));

    match client.fetch_cumulative_hours(1).await {
        Err(Error::UpstreamStatus { url, status }) => {
            assert_eq!(status, StatusCode::NOT_FOUND.as_u16());
            assert_eq!(url, format!("{}/api/ratings/1/rating_times", base));
        }
        other => panic!("expected UpstreamStatus, got {:?}", other),
    }
    assert_eq!(ratings.hits(), 3);
}
