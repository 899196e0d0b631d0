// src/operator/error.rs
use thiserror::Error;

use crate::core::net::FetchError;

#[derive(Debug, Error)]
pub enum DetailError {
    #[error("could not find operator '{0}'; either the server is down, or the spelling is off")]
    NotFound(String),

    #[error("operator data could not be fetched: {0}")]
    SourceUnavailable(#[from] FetchError),
}
