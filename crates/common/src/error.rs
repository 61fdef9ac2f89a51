use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No data found for symbol '{symbol}'")]
    NoDataFound { symbol: String },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),

    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
