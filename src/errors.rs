use thiserror::Error;

/// Error type that captures dataset, engine, and persistence failures.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("malformed period `{0}`")]
    MalformedPeriod(String),
    #[error("cycle day {0} is outside 1-31")]
    InvalidCycleDay(u32),
    #[error("missing reference: {0}")]
    MissingRef(String),
    #[error("storage error: {0}")]
    Storage(String),
}
