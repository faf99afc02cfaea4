use serde_json::{Map, Value, json};

use super::params::{Adapter, ClientParams};

impl Adapter {
    /// Build the transport payload for one attempt. The system instruction is
    /// present only when a schema was configured; schema-less raw completion
    /// works on both shapes.
    pub(crate) fn build_payload(
        self,
        params: &ClientParams,
        prompt: &str,
        instruction: Option<&str>,
    ) -> Value {
        match self {
            Adapter::Chat => chat_payload(params, prompt, instruction),
            Adapter::Generic => generic_payload(params, prompt, instruction),
        }
    }

    /// Pull the message text out of a response body for this payload shape.
    pub(crate) fn content_of(self, body: &Value) -> Option<&str> {
        match self {
            Adapter::Chat => body["choices"][0]["message"]["content"].as_str(),
            Adapter::Generic => body["response"].as_str(),
        }
    }
}

fn chat_payload(params: &ClientParams, prompt: &str, instruction: Option<&str>) -> Value {
    let mut messages = Vec::with_capacity(2);
    if let Some(instruction) = instruction {
        messages.push(json!({"role": "system", "content": instruction}));
    }
    messages.push(json!({"role": "user", "content": prompt}));

    json!({
        "model": params.model,
        "messages": messages,
        "temperature": params.temperature,
        "max_tokens": params.max_tokens,
    })
}

fn generic_payload(params: &ClientParams, prompt: &str, instruction: Option<&str>) -> Value {
    let mut payload = Map::new();
    payload.insert("stream".to_string(), Value::Bool(false));
    payload.insert("prompt".to_string(), json!(prompt));
    if let Some(instruction) = instruction {
        payload.insert("system".to_string(), json!(instruction));
    }
    payload.insert("eval_count".to_string(), json!(params.max_tokens));
    payload.insert(
        "options".to_string(),
        json!({"temperature": params.temperature}),
    );

    // custom_opts merge last: a caller-supplied key overrides the computed
    // default of the same name
    for (key, value) in &params.custom_opts {
        payload.insert(key.clone(), value.clone());
    }

    Value::Object(payload)
}
