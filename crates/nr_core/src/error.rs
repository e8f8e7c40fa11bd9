use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Search provider unreachable, non-2xx or malformed. Fatal for a request.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// A single article page could not be fetched. Callers skip the article.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Text generation failed. Fatal for a request.
    #[error("Generation error: {0}")]
    Generation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
