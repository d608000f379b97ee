use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

use crate::api::models::{AllSensors, RoomQuery, RoomSnapshot};
use crate::fetcher::SensorFetcher;

/// Handle to a running poll task.
///
/// Dropping the handle detaches the task, which then runs until process
/// exit; call [`cancel`](Self::cancel) to stop it.
pub struct PollHandle {
    task: tokio::task::JoinHandle<()>,
}

impl PollHandle {
    pub fn cancel(self) {
        self.task.abort();
    }
}

// `tokio::time::interval` panics on a zero period
fn floor_period(period: Duration) -> Duration {
    period.max(Duration::from_millis(1))
}

/// Poll the all-sensors endpoint on a fixed interval.
///
/// The callback fires immediately with the current cached snapshot, then
/// once per interval with the cache as refreshed by that cycle. A failed
/// refresh leaves the cache untouched, so the callback sees the last good
/// snapshot.
pub fn poll_all_sensors<F>(
    fetcher: Arc<SensorFetcher>,
    period: Duration,
    mut callback: F,
) -> PollHandle
where
    F: FnMut(Arc<AllSensors>) + Send + 'static,
{
    let period = floor_period(period);
    tracing::info!(period_secs = period.as_secs(), "Starting all-sensors poller");

    let task = tokio::spawn(async move {
        let mut ticker = interval(period);

        // First tick completes immediately: report the cache as-is
        ticker.tick().await;
        callback(fetcher.all_sensors().await);

        loop {
            ticker.tick().await;
            fetcher.fetch_all_sensors().await;
            callback(fetcher.all_sensors().await);
        }
    });

    PollHandle { task }
}

/// Poll one room's sensors on a fixed interval.
///
/// Unlike [`poll_all_sensors`], the first invocation also fetches, since the
/// per-room cache is populated lazily. The callback receives the cached
/// entry for the room, or an empty snapshot when no fetch ever succeeded.
pub fn poll_room_sensors<F>(
    fetcher: Arc<SensorFetcher>,
    room_id: String,
    period: Duration,
    mut callback: F,
) -> PollHandle
where
    F: FnMut(RoomSnapshot) + Send + 'static,
{
    let period = floor_period(period);
    tracing::info!(%room_id, period_secs = period.as_secs(), "Starting room poller");

    let task = tokio::spawn(async move {
        let query = RoomQuery::default();
        let mut ticker = interval(period);

        ticker.tick().await;
        fetcher.room_sensors(&room_id, &query).await;
        callback(fetcher.cached_room(&room_id).await.unwrap_or_default());

        loop {
            ticker.tick().await;
            fetcher.fetch_room_sensors(&room_id, &query).await;
            callback(fetcher.cached_room(&room_id).await.unwrap_or_default());
        }
    });

    PollHandle { task }
}

/// Poll the sensor-type catalog on a fixed interval. Same shape as
/// [`poll_all_sensors`]; the catalog changes rarely, so the default period
/// is much longer.
pub fn poll_sensor_types<F>(
    fetcher: Arc<SensorFetcher>,
    period: Duration,
    mut callback: F,
) -> PollHandle
where
    F: FnMut(Arc<serde_json::Value>) + Send + 'static,
{
    let period = floor_period(period);
    tracing::info!(period_secs = period.as_secs(), "Starting sensor-types poller");

    let task = tokio::spawn(async move {
        let mut ticker = interval(period);

        ticker.tick().await;
        callback(fetcher.sensor_types().await);

        loop {
            ticker.tick().await;
            fetcher.fetch_sensor_types().await;
            callback(fetcher.sensor_types().await);
        }
    });

    PollHandle { task }
}
