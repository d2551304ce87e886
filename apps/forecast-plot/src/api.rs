//! Forecast transport
//!
//! The loader talks to a [`ForecastSource`] so tests can swap the network
//! for canned responses. Interpreting the body is the loader's job; a source
//! only reports what came back.

use std::future::Future;

use crate::error::LoadError;

/// Status and body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait ForecastSource: Send + Sync + 'static {
    /// Issue one GET for `url`. Errors only when no response was received.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<RawResponse, LoadError>> + Send;
}

/// [`ForecastSource`] backed by a shared `reqwest::Client`.
#[derive(Clone, Debug, Default)]
pub struct HttpForecastSource {
    client: reqwest::Client,
}

impl HttpForecastSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ForecastSource for HttpForecastSource {
    async fn fetch(&self, url: &str) -> Result<RawResponse, LoadError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}
