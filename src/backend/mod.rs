pub mod client;
pub mod groq;
pub mod messages;
pub mod usage;
pub mod utils;

pub use client::LLMClient;
pub use groq::{GroqClient, GroqConfig, Model as GroqModel};
pub use messages::{ChatMessage, ChatRole};
pub use usage::{MaterializeResult, TokenUsage};
pub use utils::{
    check_response_status, extract_json_from_markdown, handle_http_error, parse_and_validate,
};
