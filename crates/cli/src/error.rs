#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("{0}")]
    Generic(String),
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("Inspect error: {0}")]
    InspectError(#[from] deltascope_inspect::error::Error),
    #[error("Config error: {0}")]
    ConfigError(#[from] deltascope_config::error::Error),
    #[error("Cache error: {0}")]
    CacheError(#[from] deltascope_cache::error::Error),
}
