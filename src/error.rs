use std::{path::PathBuf, result::Result as StdResult};

use thiserror::Error;

pub type Result<T> = StdResult<T, Error>;

/// An enum for describing and handling various errors encountered while
/// gathering commits or writing changelogs.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to convert date/time to string format")]
    TimeFormat(#[from] time::error::Format),

    #[error("git exited with {status}: {stderr}")]
    Git { status: String, stderr: String },

    #[error("not a commit reference: {0:?}")]
    BadRevision(String),
}
