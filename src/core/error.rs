use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupplyError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown supply source type: {0}")]
    UnknownSourceType(String),

    #[error("Unknown supply status: {0}")]
    UnknownStatus(String),

    #[error("Unsupported scenario format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SupplyError>;
