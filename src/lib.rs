//! Product Assistant: describe a product, pick a Groq-hosted model, get back
//! a structured record with the product's name and estimated price.
//!
//! # Overview
//!
//! A single form page collects a free-text description and a model choice.
//! On submit, a fixed system + human prompt is expanded with the description
//! and sent to Groq's chat completions API together with the [`Product`]
//! JSON schema as a forced tool call. The returned arguments are parsed,
//! validated (rating must lie in `[0, 5]`) and rendered.
//!
//! Pieces, in the order a submission passes through them:
//! - [`config`]: the API key and runtime settings, read once at startup
//! - [`prompt`]: the two-message template with its `{input}` slot
//! - [`backend`]: the Groq client and the [`LLMClient`] trait
//! - [`pipeline`]: template expansion composed with a structured-output client
//! - [`bridge`]: one submission in, one [`Outcome`] out
//! - [`web`]: the axum router and HTML rendering
//!
//! # Quick Start
//!
//! ```no_run
//! use product_assistant::{Bridge, Credentials, Outcome, Settings, Submission};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bridge = Bridge::new(Credentials::load(), Settings::from_env()?);
//!
//!     let submission = Submission::new("llama-3.1-8b-instant", "wireless mouse");
//!     match bridge.submit(&submission).await {
//!         Outcome::Success(product) => println!("{:?}", product.product_name),
//!         Outcome::Error(e) => eprintln!("Error: {e}"),
//!         Outcome::Warning(msg) => eprintln!("{msg}"),
//!     }
//!     Ok(())
//! }
//! ```
pub mod backend;
pub mod bridge;
pub mod config;
mod error;
#[cfg(feature = "logging")]
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod product;
pub mod prompt;
pub mod schema;
pub mod web;

// Re-exports for convenience
pub use backend::{ChatMessage, ChatRole, GroqClient, GroqModel, LLMClient};
pub use bridge::{Bridge, MISSING_INPUT_WARNING, Outcome, Submission};
pub use config::{Credentials, Settings};
pub use error::{ApiErrorKind, AssistantError, Result};
pub use model::Instructor;
pub use pipeline::{Pipeline, StructuredOutput, WithStructuredOutput};
pub use product::Product;
pub use prompt::{ChatPromptTemplate, PromptInput};
pub use schema::{Schema, SchemaBuilder, SchemaType};
