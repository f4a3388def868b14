//! # shapechat
//!
//! Schema-constrained structured output generation over chat LLM
//! backends.
//!
//! A caller declares an input shape and an output shape; a
//! [`StructuredGenerator`] drives a multi-turn conversation with a
//! chat-capable backend, extracts the JSON payload from each free-form
//! reply, validates it against the output shape, and repairs the
//! conversation with validation diagnostics when the reply does not
//! conform. The caller receives either a fully schema-valid value or a
//! single structured error.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use serde_json::json;
//! use shapechat::{
//!     Field, GeneratorOptions, OllamaBackend, Shape, StructuredGenerator,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = Arc::new(OllamaBackend::new(None, "llama3"));
//!     let input_shape = Shape::object(vec![Field::new("introduction", Shape::String)]);
//!     let output_shape = Shape::object(vec![
//!         Field::new("name", Shape::String),
//!         Field::new("age", Shape::Number),
//!     ]);
//!
//!     let mut generator = StructuredGenerator::new(
//!         backend,
//!         input_shape,
//!         output_shape,
//!         GeneratorOptions::new().with_conversion_help("Ages are in years."),
//!     );
//!
//!     let person = generator
//!         .generate(json!({"introduction": "Bob just turned thirty."}))
//!         .await?;
//!     println!("{}", person);
//!     Ok(())
//! }
//! ```

pub mod generator;
pub mod llms;
pub mod schema;
pub mod types;
pub mod utilities;

// Re-exports forming the public surface
pub use generator::options::{Example, GeneratorOptions, Provided};
pub use generator::StructuredGenerator;
pub use llms::base_backend::{BackendError, ChatBackend};
pub use llms::providers::ollama::OllamaBackend;
pub use llms::providers::openai::OpenAiBackend;
pub use schema::{Field, Shape, ValueKind};
pub use types::messages::{ChatMessage, HistoryEntry, MessageRole};
pub use utilities::errors::GenerateError;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
