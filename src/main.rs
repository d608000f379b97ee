use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roomsense::api::SensorApiClient;
use roomsense::config::Config;
use roomsense::fetcher::SensorFetcher;
use roomsense::poll;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,roomsense=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting roomsense...");

    let config = Config::from_env();
    tracing::info!(
        deployment = ?config.deployment,
        api_base_url = %config.api_base_url,
        "Configuration loaded"
    );

    // Create sensor API client and cache-owning fetcher
    let client = SensorApiClient::new(&config);
    let fetcher = Arc::new(SensorFetcher::new(&config, client));
    tracing::info!("Sensor API client initialized");

    // Bootstrap the caches before any poller reports
    fetcher.fetch_all_sensors().await;
    fetcher.fetch_sensor_types().await;

    // Start pollers with logging callbacks
    let sensors_poll = poll::poll_all_sensors(
        fetcher.clone(),
        Duration::from_secs(config.poll_sensors_interval_seconds),
        |snapshot| {
            tracing::info!(rooms = snapshot.len(), "Sensor snapshot updated");
        },
    );
    let types_poll = poll::poll_sensor_types(
        fetcher.clone(),
        Duration::from_secs(config.poll_sensor_types_interval_seconds),
        |catalog| {
            let types = catalog.as_object().map_or(0, serde_json::Map::len);
            tracing::info!(types, "Sensor-type catalog updated");
        },
    );

    shutdown_signal().await;

    sensors_poll.cancel();
    types_poll.cancel();
    tracing::info!("Pollers stopped, shutting down");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        },
    }
}
