//! Extructor: schema-validated JSON out of free-text LLM completions
//!
//! # Overview
//!
//! Extructor gets validated, structured values out of Large Language Model
//! completions. Given a schema and a prompt, it instructs the model to emit
//! a conforming JSON instance, recovers a JSON value from the raw response
//! text (tolerating markdown code fences), validates it against the schema,
//! and retries the whole round trip up to a configured budget when an
//! attempt fails.
//!
//! Key pieces:
//! - [`Schema`] / [`SchemaBuilder`]: describe the expected shape and render
//!   the system instruction sent to the model
//! - [`Extractor`]: configurable client running the request/recover/validate
//!   retry loop against a chat-style or generic completion endpoint
//! - [`extract_chat`]: the same extraction flow over a caller-supplied chat
//!   completion callable, falling back to the raw body when validation fails
//!
//! # Quick Start
//!
//! ```no_run
//! use extructor::{Extractor, Schema};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let schema = Schema::builder()
//!         .title("Person")
//!         .property("name", json!({"type": "string"}), true)
//!         .property("age", json!({"type": "integer"}), true)
//!         .build();
//!
//!     let extractor = Extractor::new("your-api-key")
//!         .model("gpt-4o")
//!         .schema(schema)
//!         .max_retries(2);
//!
//!     match extractor.extract("Describe a fictional person.").await? {
//!         Some(person) => println!("{person}"),
//!         None => println!("no conforming response within the retry budget"),
//!     }
//!     Ok(())
//! }
//! ```
mod backend;
mod error;
pub mod schema;
#[cfg(feature = "logging")]
pub mod logging;

// Re-exports for convenience
pub use error::{ExtructorError, Result};
pub use schema::{Schema, SchemaBuilder, validate};

pub use backend::{
    Adapter, ChatExtraction, ChatParams, ClientParams, DEFAULT_ENDPOINT, Extractor, HttpTransport,
    Message, Transport, extract_chat, recover_json,
};
