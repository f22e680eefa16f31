use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid target '{input}': {reason}")]
    InvalidTarget { input: String, reason: String },

    #[error("concurrency must be at least 1, got {0}")]
    InvalidConcurrency(usize),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("cannot resolve redirect target '{location}': {source}")]
    Location {
        location: String,
        #[source]
        source: url::ParseError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("concurrency limiter closed")]
    SemaphoreClosed,

    #[error("result writer stopped unexpectedly")]
    WriterGone,
}

pub type Result<T> = std::result::Result<T, ScanError>;
