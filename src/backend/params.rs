use serde_json::{Map, Value};

/// OpenAI-compatible chat-completions endpoint used when no override is given.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Normalized request parameters shared by both payload shapes.
#[derive(Debug, Clone)]
pub struct ClientParams {
    pub endpoint_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub max_retries: u32,
    /// Open option mapping merged into generic-shape payloads after the
    /// computed fields. A colliding key overrides the computed value.
    pub custom_opts: Map<String, Value>,
}

impl Default for ClientParams {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 4096,
            max_retries: 0,
            custom_opts: Map::new(),
        }
    }
}

/// Payload shape, fixed once from the endpoint identity at configuration
/// time. Providers diverge here: the default endpoint speaks structured
/// messages, everything else gets the flat prompt shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adapter {
    /// Default endpoint: a messages array with flat sampling fields.
    Chat,
    /// Any non-default endpoint: flat prompt plus provider-specific options.
    Generic,
}

impl Adapter {
    pub fn for_endpoint(url: &str) -> Self {
        if url == DEFAULT_ENDPOINT {
            Adapter::Chat
        } else {
            Adapter::Generic
        }
    }
}
