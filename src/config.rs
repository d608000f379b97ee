use std::env;

#[derive(Debug, Clone)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Sensor API
    pub api_base_url: String,
    pub http_timeout_seconds: u64,

    // Polling cadence
    pub poll_sensors_interval_seconds: u64,
    pub poll_sensor_types_interval_seconds: u64,

    // Per-room caching
    pub room_cache_ttl_seconds: u64,
    pub room_cache_max_entries: u64,

    // Application metadata
    pub deployment: Deployment,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable has a default and malformed values fall back to it,
    /// so a bare environment yields a working local configuration pointed
    /// at `http://localhost:8000/api`.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            // Sensor API
            api_base_url: env::var("SENSOR_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".to_string()),
            http_timeout_seconds: env::var("HTTP_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),

            // Polling cadence, clamped to 1s: tokio's interval rejects a
            // zero period
            poll_sensors_interval_seconds: env::var("POLL_SENSORS_INTERVAL_SECONDS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10)
                .max(1),
            poll_sensor_types_interval_seconds: env::var("POLL_SENSOR_TYPES_INTERVAL_SECONDS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .unwrap_or(300) // 5 minutes default
                .max(1),

            // Per-room caching
            room_cache_ttl_seconds: env::var("ROOM_CACHE_TTL_SECONDS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .unwrap_or(300),
            room_cache_max_entries: env::var("ROOM_CACHE_MAX_ENTRIES")
                .unwrap_or_else(|_| "256".to_string())
                .parse()
                .unwrap_or(256),

            // Application metadata
            deployment: Deployment::from_str(
                &env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            ),
        }
    }
}
