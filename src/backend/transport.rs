use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// One network round trip.
///
/// Implementations return the parsed response body, or `None` for any
/// transport-level failure: connection errors, timeouts, non-success status,
/// or a non-JSON envelope. The retry loop treats a missing body the same as
/// an unusable one, so nothing at this layer raises.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, url: &str, api_key: &str, body: &Value) -> Option<Value>;
}

/// reqwest-backed transport: POST with bearer-token authorization and a JSON
/// body.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Transport with a per-request timeout applied to every call made
    /// through it. A timed-out call surfaces as a failed attempt, not a
    /// distinct error.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build HTTP client with timeout, using default");
                reqwest::Client::new()
            });
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, url: &str, api_key: &str, body: &Value) -> Option<Value> {
        debug!(url, "sending completion request");

        let response = match self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "HTTP request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "endpoint returned error status");
            return None;
        }

        match response.json::<Value>().await {
            Ok(parsed) => {
                debug!("received JSON response body");
                Some(parsed)
            }
            Err(e) => {
                warn!(error = %e, "response body was not valid JSON");
                None
            }
        }
    }
}
