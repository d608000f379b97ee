#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Sensor API error: {0}")]
    SensorApi(String),
}

pub type AppResult<T> = Result<T, AppError>;
