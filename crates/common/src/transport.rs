//! HTTP transport seam.
//!
//! Business logic never talks to `reqwest` directly: everything outbound goes
//! through [`Transport`], so the real client and the test double are swapped
//! by construction, not by conditional compilation.

use std::time::Duration;

use serde_json::Value;

use crate::error::HeraldError;

/// Outbound HTTP operations the pipeline needs.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// GET a URL and parse the response body as JSON.
    /// Non-2xx statuses and body parse failures are `Transport` errors.
    async fn get_json(&self, url: &str) -> Result<Value, HeraldError>;

    /// POST a JSON body to a URL. Non-2xx statuses are `Transport` errors.
    async fn post_json(&self, url: &str, body: &Value) -> Result<(), HeraldError>;
}

/// Production transport backed by a shared `reqwest` client.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, HeraldError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.json::<Value>().await?;
        Ok(body)
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<(), HeraldError> {
        self.client
            .post(url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
