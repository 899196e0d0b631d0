// src/recruit/error.rs
use thiserror::Error;

use crate::config::ConfigError;
use crate::core::net::FetchError;

#[derive(Debug, Error)]
pub enum RecruitError {
    #[error("the recruitment feed could not be fetched: {0}")]
    SourceUnavailable(#[from] FetchError),

    #[error("the tag '{0}' does not exist")]
    UnknownTag(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
