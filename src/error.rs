use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Report not found: {0}")]
    NotFound(String),

    #[error("Report id prefix is ambiguous: {0}")]
    AmbiguousId(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for ReportError {
    fn from(err: anyhow::Error) -> Self {
        ReportError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
