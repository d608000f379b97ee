//! Tests for the periodic polling helpers.
//!
//! Run with: cargo test --test poll_test
//!
//! Intervals use real time with wide margins: a 200ms period is asserted
//! after 100ms (immediate callback only) and after 700ms (at least three
//! interval boundaries passed).

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use roomsense::api::SensorApiClient;
use roomsense::config::{Config, Deployment};
use roomsense::fetcher::SensorFetcher;
use roomsense::poll;

fn test_config(api_base_url: String) -> Config {
    Config {
        api_base_url,
        http_timeout_seconds: 5,
        poll_sensors_interval_seconds: 10,
        poll_sensor_types_interval_seconds: 300,
        room_cache_ttl_seconds: 300,
        room_cache_max_entries: 64,
        deployment: Deployment::Local,
    }
}

async fn backend_fetcher() -> Arc<SensorFetcher> {
    let app = Router::new()
        .route(
            "/api/sensors",
            get(|| async {
                Json(json!({ "lab": { "sensors": [ { "field": "temperature", "value": 21 } ] } }))
            }),
        )
        .route(
            "/api/sensors/{room_id}",
            get(|| async { Json(json!({ "sensors": [ { "field": "humidity", "value": 40 } ] })) }),
        )
        .route(
            "/api/sensors_types",
            get(|| async { Json(json!({ "dht22": ["temperature", "humidity"] })) }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock backend");
    });

    let config = test_config(format!("http://{addr}/api"));
    Arc::new(SensorFetcher::new(&config, SensorApiClient::new(&config)))
}

#[tokio::test]
async fn poller_fires_immediately_then_per_interval() {
    let fetcher = backend_fetcher().await;
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = calls.clone();
    let handle = poll::poll_all_sensors(fetcher, Duration::from_millis(200), move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    sleep(Duration::from_millis(100)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1, "immediate callback only");

    sleep(Duration::from_millis(600)).await;
    assert!(
        calls.load(Ordering::SeqCst) >= 3,
        "interval boundaries should have fired"
    );

    handle.cancel();
}

#[tokio::test]
async fn immediate_callback_reports_current_cache() {
    let fetcher = backend_fetcher().await;

    // Bootstrap the cache the way page load does
    fetcher.fetch_all_sensors().await;

    let (tx, rx) = std::sync::mpsc::channel();
    let handle = poll::poll_all_sensors(fetcher, Duration::from_secs(60), move |snapshot| {
        let _ = tx.send(snapshot.len());
    });

    let rooms = tokio::task::spawn_blocking(move || rx.recv().expect("first callback"))
        .await
        .expect("join");
    assert_eq!(rooms, 1);

    handle.cancel();
}

#[tokio::test]
async fn room_poller_fetches_on_first_invocation() {
    let fetcher = backend_fetcher().await;

    let (tx, rx) = std::sync::mpsc::channel();
    let handle = poll::poll_room_sensors(
        fetcher.clone(),
        "b204".to_string(),
        Duration::from_secs(60),
        move |snapshot| {
            let _ = tx.send(snapshot);
        },
    );

    let snapshot = tokio::task::spawn_blocking(move || rx.recv().expect("first callback"))
        .await
        .expect("join");
    assert_eq!(snapshot.sensors.len(), 1);
    assert_eq!(snapshot.sensors[0].field, "humidity");

    // The lazy per-room cache was populated by the poller
    assert!(fetcher.cached_room("b204").await.is_some());

    handle.cancel();
}

#[tokio::test]
async fn zero_period_does_not_panic() {
    let fetcher = backend_fetcher().await;
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = calls.clone();
    let handle = poll::poll_all_sensors(fetcher, Duration::ZERO, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    sleep(Duration::from_millis(100)).await;
    assert!(calls.load(Ordering::SeqCst) >= 1);

    handle.cancel();
}

#[tokio::test]
async fn cancel_stops_further_callbacks() {
    let fetcher = backend_fetcher().await;
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = calls.clone();
    let handle = poll::poll_sensor_types(fetcher, Duration::from_millis(100), move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    sleep(Duration::from_millis(50)).await;
    handle.cancel();
    let at_cancel = calls.load(Ordering::SeqCst);

    sleep(Duration::from_millis(400)).await;
    assert_eq!(calls.load(Ordering::SeqCst), at_cancel);
}
