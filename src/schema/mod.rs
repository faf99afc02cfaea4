mod builder;
mod validate;

pub use builder::SchemaBuilder;
pub use validate::validate;

use serde_json::Value;

use crate::error::{ExtructorError, Result};

/// Schema is a representation of a JSON Schema that describes the structure
/// an LLM should return. It drives both the instruction embedded in the
/// prompt and the validation of the recovered value.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    schema: Value,
}

impl Schema {
    pub fn new(schema: Value) -> Self {
        Self { schema }
    }

    pub fn as_json(&self) -> &Value {
        &self.schema
    }

    /// Create a schema builder for an object type
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::object()
    }

    /// Render the system instruction for this schema: the schema itself in
    /// JSON Schema form, followed by the fixed directive to answer with a
    /// single conforming instance. Deterministic for a given schema.
    ///
    /// A schema that cannot be rendered is a caller error and propagates,
    /// never a retryable condition.
    pub fn describe(&self) -> Result<String> {
        let rendered = serde_json::to_string_pretty(&self.schema)
            .map_err(|e| ExtructorError::Schema(format!("schema cannot be rendered: {e}")))?;
        Ok(format!(
            "Respond with a JSON instance that conforms to the following JSON Schema:\n\n\
             {rendered}\n\n\
             Return ONLY the instance. Do not restate the schema. \
             Do not add explanatory text."
        ))
    }
}

#[cfg(test)]
mod tests;
