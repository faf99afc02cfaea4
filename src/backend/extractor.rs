use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::error::{ExtructorError, Result};
use crate::schema::{Schema, validate};

use super::params::{Adapter, ClientParams};
use super::recover::recover_json;
use super::transport::{HttpTransport, Transport};

/// Why an attempt produced nothing usable. The retry loop treats every
/// variant identically; the distinction exists for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    Transport,
    Extraction,
    Validation,
}

impl Failure {
    fn as_str(self) -> &'static str {
        match self {
            Failure::Transport => "transport",
            Failure::Extraction => "extraction",
            Failure::Validation => "validation",
        }
    }
}

/// Outcome of one full attempt.
enum Outcome {
    Valid(Value),
    Retryable(Failure),
}

/// Structured-extraction client.
///
/// Builds the endpoint payload from the configured parameters, performs the
/// network call, recovers a JSON value from the response text, validates it
/// against the configured schema, and retries the whole round trip up to
/// `max_retries` times. Attempts run strictly sequentially and immediately;
/// no state survives an attempt except the retry counter.
pub struct Extractor {
    params: ClientParams,
    adapter: Adapter,
    schema: Option<Schema>,
    transport: Arc<dyn Transport>,
}

impl Extractor {
    /// Create an extractor targeting the default OpenAI-compatible
    /// chat-completions endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        let params = ClientParams {
            api_key: api_key.into(),
            ..ClientParams::default()
        };
        info!(model = %params.model, "Creating new extractor");

        Self {
            adapter: Adapter::for_endpoint(&params.endpoint_url),
            params,
            schema: None,
            transport: Arc::new(HttpTransport::new()),
        }
    }

    /// Create an extractor from a fully specified parameter record. The
    /// payload shape is fixed here from the endpoint identity.
    pub fn from_params(params: ClientParams) -> Self {
        Self {
            adapter: Adapter::for_endpoint(&params.endpoint_url),
            params,
            schema: None,
            transport: Arc::new(HttpTransport::new()),
        }
    }

    /// Set the target endpoint. Selecting a non-default endpoint switches
    /// the request to the generic payload shape.
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.params.endpoint_url = url.into();
        let adapter = Adapter::for_endpoint(&self.params.endpoint_url);
        debug!(endpoint = %self.params.endpoint_url, ?adapter, "Setting endpoint");
        self.adapter = adapter;
        self
    }

    /// Set the model to use
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.params.model = model.into();
        debug!(model = %self.params.model, "Setting model");
        self
    }

    /// Set the temperature (0.0 to 1.0, lower = more deterministic)
    pub fn temperature(mut self, temp: f32) -> Self {
        debug!(
            previous_temp = self.params.temperature,
            new_temp = temp,
            "Setting temperature"
        );
        self.params.temperature = temp;
        self
    }

    /// Set the maximum tokens to generate
    pub fn max_tokens(mut self, max: u32) -> Self {
        debug!(
            previous_max = self.params.max_tokens,
            new_max = max,
            "Setting max_tokens"
        );
        self.params.max_tokens = max;
        self
    }

    /// Set the retry budget: `max_retries` failed attempts are retried, so
    /// at most `max_retries + 1` attempts run (0 = single attempt).
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        debug!(
            previous_max_retries = self.params.max_retries,
            new_max_retries = max_retries,
            "Setting max_retries"
        );
        self.params.max_retries = max_retries;
        self
    }

    /// Add a provider-specific option, merged into generic-shape payloads
    /// after the computed fields. A colliding key overrides the computed
    /// value. Not used by the default chat endpoint.
    pub fn custom_opt(mut self, key: impl Into<String>, value: Value) -> Self {
        self.params.custom_opts.insert(key.into(), value);
        self
    }

    /// Set the schema the response must conform to.
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Set the timeout for HTTP requests, applied to every call made by
    /// this extractor. A timed-out call is a failed attempt eligible for
    /// retry, not a distinct error.
    ///
    /// Rebuilds the transport, so any transport installed earlier with
    /// [`with_transport`](Self::with_transport) is replaced.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        debug!(?timeout, "Setting timeout");
        self.transport = Arc::new(HttpTransport::with_timeout(timeout));
        self
    }

    /// Replace the HTTP transport entirely, e.g. with a test double.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Run the full round trip and return the first schema-conforming value.
    ///
    /// Any failed attempt (transport, extraction, or validation) consumes
    /// one unit of the retry budget; exhausting the budget yields `Ok(None)`,
    /// never an error. Only configuration mistakes are `Err`: calling this
    /// without a schema, or with a schema that cannot be rendered.
    #[instrument(
        name = "extract",
        skip(self, prompt),
        fields(
            prompt_len = prompt.len(),
            max_retries = self.params.max_retries,
            adapter = ?self.adapter,
        )
    )]
    pub async fn extract(&self, prompt: &str) -> Result<Option<Value>> {
        let Some(schema) = &self.schema else {
            return Err(ExtructorError::Schema(
                "no schema configured for extraction".to_string(),
            ));
        };
        let instruction = schema.describe()?;

        let mut budget = self.params.max_retries;
        loop {
            match self.attempt(prompt, &instruction, schema).await {
                Outcome::Valid(value) => {
                    info!("extracted schema-conforming value");
                    return Ok(Some(value));
                }
                Outcome::Retryable(failure) if budget > 0 => {
                    budget -= 1;
                    debug!(
                        failure = failure.as_str(),
                        remaining = budget,
                        "attempt failed, retrying"
                    );
                }
                Outcome::Retryable(failure) => {
                    warn!(
                        failure = failure.as_str(),
                        attempts = self.params.max_retries + 1,
                        "no conforming response within retry budget"
                    );
                    return Ok(None);
                }
            }
        }
    }

    /// Like [`extract`](Self::extract), deserializing the conforming value
    /// into `T`. A serde failure after structural validation means `T` and
    /// the configured schema disagree; that is a caller error and propagates.
    pub async fn extract_as<T: DeserializeOwned>(&self, prompt: &str) -> Result<Option<T>> {
        match self.extract(prompt).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Schema-less raw completion: a single attempt returning the message
    /// text as it came back, with no extraction or validation. Transport
    /// failure yields `Ok(None)`.
    #[instrument(name = "generate", skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn generate(&self, prompt: &str) -> Result<Option<String>> {
        let payload = self.adapter.build_payload(&self.params, prompt, None);
        let Some(body) = self
            .transport
            .send(&self.params.endpoint_url, &self.params.api_key, &payload)
            .await
        else {
            return Ok(None);
        };
        Ok(self.adapter.content_of(&body).map(str::to_string))
    }

    /// One atomic attempt: build, send, recover, validate.
    async fn attempt(&self, prompt: &str, instruction: &str, schema: &Schema) -> Outcome {
        let payload = self
            .adapter
            .build_payload(&self.params, prompt, Some(instruction));

        let Some(body) = self
            .transport
            .send(&self.params.endpoint_url, &self.params.api_key, &payload)
            .await
        else {
            return Outcome::Retryable(Failure::Transport);
        };

        let Some(content) = self.adapter.content_of(&body) else {
            return Outcome::Retryable(Failure::Extraction);
        };
        let Some(value) = recover_json(content) else {
            return Outcome::Retryable(Failure::Extraction);
        };

        if validate(Some(&value), schema) {
            Outcome::Valid(value)
        } else {
            Outcome::Retryable(Failure::Validation)
        }
    }
}
