// src/core/net.rs
// Blocking HTTP GET (reqwest) behind a tiny trait so specs can be fed
// captured fixtures offline.

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    #[error("malformed response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

pub trait Fetch {
    fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

pub fn get_json<T: DeserializeOwned>(fetcher: &dyn Fetch, url: &str) -> Result<T, FetchError> {
    let body = fetcher.get_text(url)?;
    serde_json::from_str(&body).map_err(|e| FetchError::Decode {
        url: s!(url),
        reason: e.to_string(),
    })
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Transport {
                url: s!(),
                reason: format!("http client: {e}"),
            })?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        log::debug!("GET {url}");
        let resp = self.client.get(url).send().map_err(|e| FetchError::Transport {
            url: s!(url),
            reason: e.to_string(),
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: s!(url), status: status.as_u16() });
        }
        resp.text().map_err(|e| FetchError::Decode { url: s!(url), reason: e.to_string() })
    }
}

/// Canned responses keyed by URL; anything else is a 404.
#[derive(Default)]
pub struct FixtureFetcher {
    pages: HashMap<String, String>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(s!(url), body.into());
        self
    }
}

impl Fetch for FixtureFetcher {
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status { url: s!(url), status: 404 })
    }
}
