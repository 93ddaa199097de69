use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompanionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Hour out of range: {0} (expected 0-23)")]
    InvalidHour(u32),

    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CompanionError>;
