use crate::sample::perfdata::PerfdataError;

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config file: {0}")]
    Config(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid request: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid perfdata: {0}")]
    Perfdata(#[from] PerfdataError),
    #[error("no template registered for check: {0}")]
    UnknownCheck(String),
}
