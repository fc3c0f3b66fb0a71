use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TickerError {
    #[error("missing config: {}", path.display())]
    ConfigMissing { path: PathBuf },

    #[error("cannot read config {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    ConfigInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("api credentials are not valid header values: {0}")]
    InvalidCredentials(#[from] reqwest::header::InvalidHeaderValue),

    /// Connection failure, timeout, non-2xx status or an undecodable body.
    #[error("forum request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("state file {}: {source}", path.display())]
    StateIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt state file {}: {source}", path.display())]
    StateCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T, E = TickerError> = std::result::Result<T, E>;
