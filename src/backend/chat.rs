use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

use crate::error::{ExtructorError, Result};
use crate::schema::{Schema, validate};

use super::recover::recover_json;

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Parameter bundle for [`extract_chat`].
#[derive(Debug, Clone)]
pub struct ChatParams {
    pub messages: Vec<Message>,
    pub model: String,
    pub response_schema: Option<Schema>,
    /// Free-form provider options merged into the request after the computed
    /// fields; a colliding key overrides them.
    pub options: Map<String, Value>,
}

/// Result of [`extract_chat`]: a schema-conforming value, or the raw
/// response body when no conforming value could be recovered. Unlike the
/// primary [`Extractor`](super::Extractor) path, a non-conforming response
/// here falls back to the raw body instead of absent, so callers keep the
/// full completion to inspect or post-process.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatExtraction {
    Valid(Value),
    Raw(Value),
}

/// Run one structured-extraction round trip through a caller-supplied chat
/// completion callable, substituting for the built-in request/transport pair.
///
/// When `response_schema` is set, its instruction is prepended as a system
/// message and the response content is recovered and validated. The callable
/// receives the fully built request payload and returns the parsed response
/// body; its own errors propagate unchanged. A body with no message content
/// is an API error: the callable is broken, not the model.
pub async fn extract_chat<F, Fut>(complete: F, params: ChatParams) -> Result<ChatExtraction>
where
    F: FnOnce(Value) -> Fut,
    Fut: Future<Output = Result<Value>>,
{
    let schema = params.response_schema.as_ref();

    let mut messages = Vec::with_capacity(params.messages.len() + 1);
    if let Some(schema) = schema {
        messages.push(Message::system(schema.describe()?));
    }
    messages.extend(params.messages.iter().cloned());

    let mut request = Map::new();
    request.insert("model".to_string(), json!(params.model));
    request.insert("messages".to_string(), serde_json::to_value(&messages)?);
    for (key, value) in &params.options {
        request.insert(key.clone(), value.clone());
    }

    debug!(
        model = %params.model,
        messages = messages.len(),
        "sending chat completion request"
    );
    let body = complete(Value::Object(request)).await?;

    let Some(schema) = schema else {
        return Ok(ChatExtraction::Raw(body));
    };

    let Some(content) = body["choices"][0]["message"]["content"].as_str() else {
        return Err(ExtructorError::Api(
            "no message content in completion response".to_string(),
        ));
    };

    match recover_json(content) {
        Some(value) if validate(Some(&value), schema) => {
            info!("chat completion produced a schema-conforming value");
            Ok(ChatExtraction::Valid(value))
        }
        _ => {
            warn!("chat completion did not conform to the schema, returning raw body");
            Ok(ChatExtraction::Raw(body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn review_schema() -> Schema {
        Schema::builder()
            .property("title", json!({"type": "string"}), true)
            .property("rating", json!({"type": "integer"}), true)
            .build()
    }

    fn chat_body(content: &str) -> Value {
        json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
    }

    fn params(schema: Option<Schema>) -> ChatParams {
        ChatParams {
            messages: vec![Message::user("review Inception")],
            model: "gpt-3.5-turbo".to_string(),
            response_schema: schema,
            options: Map::new(),
        }
    }

    #[tokio::test]
    async fn conforming_content_yields_valid() {
        let body = chat_body(r#"{"title":"Inception","rating":9}"#);
        let result = extract_chat(|_| async move { Ok(body) }, params(Some(review_schema())))
            .await
            .expect("extract_chat should succeed");

        assert_eq!(
            result,
            ChatExtraction::Valid(json!({"title": "Inception", "rating": 9}))
        );
    }

    #[tokio::test]
    async fn nonconforming_content_falls_back_to_raw_body() {
        let body = chat_body(r#"{"title":"Inception"}"#);
        let expected = body.clone();
        let result = extract_chat(|_| async move { Ok(body) }, params(Some(review_schema())))
            .await
            .expect("extract_chat should succeed");

        assert_eq!(result, ChatExtraction::Raw(expected));
    }

    #[tokio::test]
    async fn unparseable_content_falls_back_to_raw_body() {
        let body = chat_body("I'd rate it a solid nine out of ten.");
        let expected = body.clone();
        let result = extract_chat(|_| async move { Ok(body) }, params(Some(review_schema())))
            .await
            .expect("extract_chat should succeed");

        assert_eq!(result, ChatExtraction::Raw(expected));
    }

    #[tokio::test]
    async fn schema_prepends_system_instruction_to_request() {
        let seen = Arc::new(Mutex::new(None));
        let capture = seen.clone();

        let _ = extract_chat(
            move |request| async move {
                *capture.lock().expect("lock") = Some(request);
                Ok(chat_body(r#"{"title":"Inception","rating":9}"#))
            },
            params(Some(review_schema())),
        )
        .await
        .expect("extract_chat should succeed");

        let request = seen.lock().expect("lock").take().expect("request captured");
        let messages = request["messages"].as_array().expect("messages array");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert!(
            messages[0]["content"]
                .as_str()
                .expect("system content")
                .contains("JSON Schema")
        );
        assert_eq!(messages[1]["role"], "user");
    }

    #[tokio::test]
    async fn without_schema_returns_raw_body_and_no_system_message() {
        let seen = Arc::new(Mutex::new(None));
        let capture = seen.clone();
        let body = chat_body("plain text answer");
        let expected = body.clone();

        let result = extract_chat(
            move |request| async move {
                *capture.lock().expect("lock") = Some(request);
                Ok(body)
            },
            params(None),
        )
        .await
        .expect("extract_chat should succeed");

        assert_eq!(result, ChatExtraction::Raw(expected));
        let request = seen.lock().expect("lock").take().expect("request captured");
        assert_eq!(request["messages"].as_array().expect("messages").len(), 1);
    }

    #[tokio::test]
    async fn options_merge_last_and_override() {
        let seen = Arc::new(Mutex::new(None));
        let capture = seen.clone();
        let mut p = params(Some(review_schema()));
        p.options.insert("temperature".to_string(), json!(0.0));
        p.options.insert("model".to_string(), json!("gpt-4"));

        let _ = extract_chat(
            move |request| async move {
                *capture.lock().expect("lock") = Some(request);
                Ok(chat_body(r#"{"title":"Inception","rating":9}"#))
            },
            p,
        )
        .await
        .expect("extract_chat should succeed");

        let request = seen.lock().expect("lock").take().expect("request captured");
        assert_eq!(request["temperature"], json!(0.0));
        assert_eq!(request["model"], "gpt-4");
    }

    #[tokio::test]
    async fn missing_content_is_an_api_error() {
        let result = extract_chat(
            |_| async move { Ok(json!({"choices": []})) },
            params(Some(review_schema())),
        )
        .await;

        assert!(matches!(result, Err(ExtructorError::Api(_))));
    }

    #[tokio::test]
    async fn callable_errors_propagate() {
        let result = extract_chat(
            |_| async move { Err(ExtructorError::Api("upstream down".to_string())) },
            params(Some(review_schema())),
        )
        .await;

        assert_eq!(result, Err(ExtructorError::Api("upstream down".to_string())));
    }
}
