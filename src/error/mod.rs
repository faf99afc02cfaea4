use thiserror::Error;

/// Error types for the Extructor library.
///
/// Only caller mistakes surface as errors: a schema that cannot be rendered,
/// a completion body with no usable content, a type that disagrees with its
/// schema. Transport, extraction, and validation failures are expected
/// LLM-fidelity problems and are absorbed by the retry loop instead.
#[derive(Error, Debug)]
pub enum ExtructorError {
    /// The schema is malformed or missing where one is required
    #[error("Schema error: {0}")]
    Schema(String),

    /// A completion body that cannot be interpreted at all (e.g. a
    /// caller-supplied client returned a body with no message content)
    #[error("API error: {0}")]
    Api(String),

    /// Error serializing or deserializing data (from serde_json)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// Manual implementation of PartialEq for ExtructorError.
// Note: Json variants are considered unequal because serde_json::Error
// doesn't implement PartialEq.
impl PartialEq for ExtructorError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Schema(a), Self::Schema(b)) => a == b,
            (Self::Api(a), Self::Api(b)) => a == b,
            (Self::Json(_), Self::Json(_)) => false,
            _ => false,
        }
    }
}

/// A specialized Result type for Extructor operations.
pub type Result<T> = std::result::Result<T, ExtructorError>;
