use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    /// Remote posts service failures (network or non-2xx status)
    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Session check failed: {0}")]
    SessionCheck(String),

    #[error("Post not found: {0}")]
    PostNotFound(i64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FeedResult<T> = Result<T, FeedError>;
