use thiserror::Error;

#[derive(Error, Debug)]
pub enum GleanerError {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Surface error: {0}")]
    Surface(String),

    #[error("Invalid post URL: {0}")]
    InvalidPostUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GleanerError>;
