use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Request to {url} failed: {message}")]
    Http { url: String, message: String },
    #[error("{url} returned HTTP status {status}")]
    Status { url: String, status: u16 },
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Cache error: {0}")]
    Cache(#[from] std::io::Error),
    #[error("Invalid symbol '{0}'")]
    InvalidSymbol(String),
    #[error("Unknown symbol '{0}'")]
    UnknownSymbol(String),
}
