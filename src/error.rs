use thiserror::Error;

#[derive(Error, Debug)]
pub enum RainmapError {
    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Invalid input row at line {line}: {message}")]
    InvalidRow { line: u64, message: String },

    #[error("Reference dataset error: {0}")]
    Reference(String),
}

pub type Result<T> = std::result::Result<T, RainmapError>;
