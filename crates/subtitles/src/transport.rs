//! Blocking HTTP seam.
//!
//! Providers only see [`HttpTransport`]; the production implementation wraps
//! a `reqwest::blocking::Client`. Each `get` reads the whole body and drops the
//! response before returning, so the connection goes back to the pool
//! whatever the outcome.

use std::time::Duration;

use tracing::debug;

use crate::{FetchError, FetcherConfig};

/// Status and body text of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Option<String>,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: Some(body.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait HttpTransport {
    /// Issue a blocking GET and read the body as text.
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        (**self).get(url)
    }
}

pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        debug!(url = %url, "subtitle request");

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            return Ok(HttpResponse { status, body: None });
        }

        let body = resp
            .text()
            .map_err(|e| FetchError::Transport(format!("read body: {e}")))?;

        Ok(HttpResponse {
            status,
            body: Some(body),
        })
    }
}
