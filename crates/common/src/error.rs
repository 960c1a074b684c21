use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Order total {supplied} does not match line sum {computed}")]
    TotalMismatch { supplied: f64, computed: f64 },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing authentication")]
    Unauthorized,

    #[error("Insufficient privileges")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(String),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
