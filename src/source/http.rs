use crate::source::error::SourceError;
use std::time::Duration;
use tracing::debug;

//response envelope returned by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        HttpResponse {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

//blocking transport used by the data source; swapped for a stub in tests
pub trait HttpClient: Send + Sync {
    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, SourceError>;
}

//production transport backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::blocking::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        ReqwestHttpClient {
            client: reqwest::blocking::Client::builder()
                .user_agent(concat!("tickerboard/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_else(|_| reqwest::blocking::Client::new()),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestHttpClient {
    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, SourceError> {
        debug!(url, timeout_ms = timeout.as_millis() as u64, "sending request");

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .map_err(|e| {
                let message = if e.is_timeout() {
                    format!("request timeout: {}", e)
                } else if e.is_connect() {
                    format!("connection failed: {}", e)
                } else {
                    format!("request failed: {}", e)
                };
                SourceError::Http {
                    url: url.to_string(),
                    message,
                }
            })?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| SourceError::Http {
            url: url.to_string(),
            message: format!("failed to read response body: {}", e),
        })?;

        Ok(HttpResponse { status, body })
    }
}
