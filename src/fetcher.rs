//! Cached access to the sensor API.
//!
//! `SensorFetcher` owns one cache per endpoint:
//!
//! - **All sensors**: the full per-room snapshot, replaced wholesale on each
//!   successful fetch.
//! - **Sensor types**: the opaque catalog payload, replaced wholesale.
//! - **Per room**: lazily populated on first request, with TTL eviction.
//!
//! Fetch failures are absorbed here: the error is logged, the relevant cache
//! is left untouched, and the caller gets an empty value. Nothing above this
//! layer sees a transport or parse error.

use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::api::models::{AllSensors, RoomQuery, RoomSnapshot};
use crate::api::SensorApiClient;
use crate::config::Config;

pub struct SensorFetcher {
    client: SensorApiClient,
    all_sensors: RwLock<Arc<AllSensors>>,
    sensor_types: RwLock<Arc<serde_json::Value>>,
    room_cache: Cache<String, RoomSnapshot>,
}

impl SensorFetcher {
    #[must_use]
    pub fn new(config: &Config, client: SensorApiClient) -> Self {
        let room_cache = Cache::builder()
            .max_capacity(config.room_cache_max_entries)
            .time_to_live(Duration::from_secs(config.room_cache_ttl_seconds))
            .build();

        Self {
            client,
            all_sensors: RwLock::new(Arc::new(AllSensors::new())),
            sensor_types: RwLock::new(Arc::new(serde_json::json!({}))),
            room_cache,
        }
    }

    /// Fetch the latest readings for every room and replace the snapshot
    /// cache. On failure the cache keeps its previous value and an empty
    /// snapshot is returned.
    pub async fn fetch_all_sensors(&self) -> Arc<AllSensors> {
        match self.client.get_all_sensors().await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                *self.all_sensors.write().await = snapshot.clone();
                tracing::debug!(rooms = snapshot.len(), "Refreshed all-sensors snapshot");
                snapshot
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch all sensors");
                Arc::new(AllSensors::new())
            }
        }
    }

    /// Fetch readings for one room and store them in the per-room cache. On
    /// failure the cache entry (if any) keeps its previous value and an
    /// empty snapshot is returned.
    pub async fn fetch_room_sensors(&self, room_id: &str, query: &RoomQuery) -> RoomSnapshot {
        match self.client.get_room_sensors(room_id, query).await {
            Ok(snapshot) => {
                self.room_cache
                    .insert(room_id.to_string(), snapshot.clone())
                    .await;
                tracing::debug!(room_id, readings = snapshot.sensors.len(), "Refreshed room sensors");
                snapshot
            }
            Err(e) => {
                tracing::error!(error = %e, room_id, "Failed to fetch room sensors");
                RoomSnapshot::default()
            }
        }
    }

    /// Fetch the sensor-type catalog and replace the catalog cache. On
    /// failure the cache keeps its previous value and `{}` is returned.
    pub async fn fetch_sensor_types(&self) -> Arc<serde_json::Value> {
        match self.client.get_sensor_types().await {
            Ok(catalog) => {
                let catalog = Arc::new(catalog);
                *self.sensor_types.write().await = catalog.clone();
                tracing::debug!("Refreshed sensor-type catalog");
                catalog
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch sensor types");
                Arc::new(serde_json::json!({}))
            }
        }
    }

    /// Last successfully fetched all-sensors snapshot. Empty until the first
    /// successful fetch; never triggers a request.
    pub async fn all_sensors(&self) -> Arc<AllSensors> {
        self.all_sensors.read().await.clone()
    }

    /// Readings for one room, fetched on demand. The per-room cache is
    /// updated as a side effect.
    pub async fn room_sensors(&self, room_id: &str, query: &RoomQuery) -> RoomSnapshot {
        self.fetch_room_sensors(room_id, query).await
    }

    /// Last cached value for a room, if one was ever fetched and has not
    /// expired.
    pub async fn cached_room(&self, room_id: &str) -> Option<RoomSnapshot> {
        self.room_cache.get(room_id).await
    }

    /// Last successfully fetched sensor-type catalog. `{}` until the first
    /// successful fetch; never triggers a request.
    pub async fn sensor_types(&self) -> Arc<serde_json::Value> {
        self.sensor_types.read().await.clone()
    }
}
