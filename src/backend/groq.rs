use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::backend::{
    ChatMessage, LLMClient, MaterializeResult, TokenUsage, check_response_status,
    handle_http_error, parse_and_validate,
};
use crate::config::Credentials;
use crate::error::{ApiErrorKind, AssistantError, Result};
use crate::model::Instructor;

const PROVIDER: &str = "Groq";

/// Default endpoint for Groq's OpenAI-compatible API.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Models offered by the product form.
///
/// Identifiers are passed to the API untouched. Some of these may not be
/// served by Groq; an unknown identifier is rejected by the remote API, not
/// locally. Any other identifier can be used through `Custom` or `FromStr`:
///
/// ```rust
/// use product_assistant::GroqModel;
/// use std::str::FromStr;
///
/// assert_eq!(GroqModel::from_str("llama-3.1-8b-instant").unwrap(), GroqModel::Llama31_8bInstant);
/// assert_eq!(
///     GroqModel::from_string("mixtral-8x7b-32768"),
///     GroqModel::Custom("mixtral-8x7b-32768".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Model {
    DeepseekR1DistillLlama70b,
    QwenQwq32b,
    Llama31_8bInstant,
    GroqLlama65bV1,
    GroqLlama70bV2,
    GroqQwen14b,
    GroqLlama2_70bChat,
    GroqLlama13bChat,
    /// Any other model identifier
    Custom(String),
}

impl Model {
    pub fn as_str(&self) -> &str {
        match self {
            Model::DeepseekR1DistillLlama70b => "deepseek-r1-distill-llama-70b",
            Model::QwenQwq32b => "qwen-qwq-32b",
            Model::Llama31_8bInstant => "llama-3.1-8b-instant",
            Model::GroqLlama65bV1 => "groq-llama-65b-v1",
            Model::GroqLlama70bV2 => "groq-llama-70b-v2",
            Model::GroqQwen14b => "groq-qwen-14b",
            Model::GroqLlama2_70bChat => "groq-llama-2-70b-chat",
            Model::GroqLlama13bChat => "groq-llama-13b-chat",
            Model::Custom(name) => name,
        }
    }

    /// The named models, in the order the form lists them.
    pub fn all() -> [Model; 8] {
        [
            Model::DeepseekR1DistillLlama70b,
            Model::QwenQwq32b,
            Model::Llama31_8bInstant,
            Model::GroqLlama65bV1,
            Model::GroqLlama70bV2,
            Model::GroqQwen14b,
            Model::GroqLlama2_70bChat,
            Model::GroqLlama13bChat,
        ]
    }

    /// Create a model from a string. Always succeeds; unknown names become `Custom`.
    pub fn from_string(name: impl Into<String>) -> Self {
        let name = name.into();
        Model::all()
            .into_iter()
            .find(|m| m.as_str() == name)
            .unwrap_or(Model::Custom(name))
    }
}

impl FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from_string(s))
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::from_string(s)
    }
}

impl From<String> for Model {
    fn from(s: String) -> Self {
        Model::from_string(s)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the Groq client
#[derive(Clone)]
pub struct GroqConfig {
    pub api_key: Option<String>,
    pub model: Model,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    /// Base URL without trailing slash. Defaults to [`DEFAULT_BASE_URL`].
    pub base_url: Option<String>,
}

impl std::fmt::Debug for GroqConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Groq client for structured completions
pub struct GroqClient {
    config: GroqConfig,
    client: reqwest::Client,
}

// Groq API request and response structures (OpenAI-compatible)
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    tools: Vec<ToolDef>,
    tool_choice: ToolChoice,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ToolDef {
    #[serde(rename = "type")]
    kind: &'static str,
    function: FunctionDef,
}

#[derive(Debug, Serialize)]
struct FunctionDef {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Serialize)]
struct ToolChoice {
    #[serde(rename = "type")]
    kind: &'static str,
    function: ToolChoiceFunction,
}

#[derive(Debug, Serialize)]
struct ToolChoiceFunction {
    name: String,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageInfo {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
    #[serde(default)]
    usage: Option<UsageInfo>,
    model: Option<String>,
}

impl GroqClient {
    /// Create a new Groq client with the provided API key.
    ///
    /// A blank key is accepted and treated as absent: the request is sent
    /// without credentials and the API's rejection surfaces at call time.
    #[instrument(name = "groq_client_new", skip(api_key))]
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self::with_key(Some(api_key).filter(|k| !k.trim().is_empty()))
    }

    /// Create a client from credentials loaded at startup.
    #[instrument(name = "groq_client_from_credentials", skip(credentials))]
    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self::with_key(credentials.api_key().map(str::to_string))
    }

    fn with_key(api_key: Option<String>) -> Self {
        info!("Creating new Groq client");
        if api_key.is_none() {
            warn!("No Groq API key configured; requests will be sent unauthenticated");
        }

        let config = GroqConfig {
            api_key,
            model: Model::Llama31_8bInstant,
            temperature: 0.7,
            max_tokens: None,
            base_url: None,
        };

        debug!("Groq client created with default configuration");
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Set the model to use
    #[instrument(skip(self))]
    pub fn model(mut self, model: impl Into<Model> + std::fmt::Debug) -> Self {
        let model = model.into();
        debug!(previous_model = ?self.config.model, new_model = ?model, "Setting Groq model");
        self.config.model = model;
        self
    }

    /// Set the sampling temperature
    #[instrument(skip(self))]
    pub fn temperature(mut self, temp: f32) -> Self {
        debug!(
            previous_temp = self.config.temperature,
            new_temp = temp,
            "Setting temperature"
        );
        self.config.temperature = temp;
        self
    }

    /// Set the maximum tokens to generate
    #[instrument(skip(self))]
    pub fn max_tokens(mut self, max: u32) -> Self {
        debug!(previous_max = ?self.config.max_tokens, new_max = max, "Setting max_tokens");
        // The API rejects zero
        self.config.max_tokens = Some(max.max(1));
        self
    }

    /// Set a custom base URL (proxy endpoints, local mocks).
    ///
    /// `base_url` has no trailing slash, e.g. `"http://localhost:1234/v1"`.
    #[instrument(skip(self, base_url))]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        debug!(
            previous_base_url = ?self.config.base_url,
            new_base_url = %base_url,
            "Setting custom base URL"
        );
        self.config.base_url = Some(base_url.trim_end_matches('/').to_string());
        self
    }

    pub fn config(&self) -> &GroqConfig {
        &self.config
    }

    fn completions_url(&self) -> String {
        let base_url = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        format!("{}/chat/completions", base_url)
    }
}

#[async_trait]
impl LLMClient for GroqClient {
    #[instrument(
        name = "groq_materialize",
        skip(self, messages),
        fields(
            type_name = std::any::type_name::<T>(),
            model = %self.config.model.as_str(),
            message_count = messages.len()
        )
    )]
    async fn materialize_with_metadata<T>(
        &self,
        messages: &[ChatMessage],
    ) -> Result<MaterializeResult<T>>
    where
        T: Instructor + Send + 'static,
    {
        info!("Generating structured response with Groq (tool calling)");

        let schema = T::schema();
        let schema_name = T::schema_name().unwrap_or_else(|| "output".to_string());
        trace!(schema_name = schema_name, "Retrieved JSON schema for type");

        let description = T::schema_description()
            .unwrap_or_else(|| format!("Return the {schema_name} as structured output"));

        let request = ChatCompletionRequest {
            model: self.config.model.as_str(),
            messages,
            tools: vec![ToolDef {
                kind: "function",
                function: FunctionDef {
                    name: schema_name.clone(),
                    description,
                    parameters: schema.schema,
                },
            }],
            tool_choice: ToolChoice {
                kind: "function",
                function: ToolChoiceFunction { name: schema_name },
            },
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = self.completions_url();
        debug!(url = %url, "Sending request to Groq API");
        let mut builder = self.client.post(&url).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }
        let response = builder
            .send()
            .await
            .map_err(|e| handle_http_error(e, PROVIDER))?;

        let response = check_response_status(response, PROVIDER).await?;

        debug!("Successfully received response from Groq API");
        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse JSON response from Groq API");
            handle_http_error(e, PROVIDER)
        })?;

        let model_name = completion
            .model
            .clone()
            .unwrap_or_else(|| self.config.model.as_str().to_string());
        let usage = completion
            .usage
            .as_ref()
            .map(|u| TokenUsage::new(model_name, u.prompt_tokens, u.completion_tokens));

        let Some(choice) = completion.choices.into_iter().next() else {
            error!("Groq API returned empty choices array");
            return Err(AssistantError::api_error(
                PROVIDER,
                ApiErrorKind::UnexpectedResponse {
                    details: "No completion choices returned".to_string(),
                },
            ));
        };
        trace!(finish_reason = ?choice.finish_reason, "Completion finish reason");

        let raw = if let Some(call) = choice.message.tool_calls.into_iter().next() {
            debug!(
                function_name = %call.function.name,
                args_len = call.function.arguments.len(),
                "Tool call received from Groq"
            );
            call.function.arguments
        } else if let Some(content) = choice.message.content {
            warn!(
                content_len = content.len(),
                "No tool call in response, attempting to parse content as JSON"
            );
            content
        } else {
            error!("No tool call or content in Groq API response");
            return Err(AssistantError::api_error(
                PROVIDER,
                ApiErrorKind::UnexpectedResponse {
                    details: "No tool call or content in response".to_string(),
                },
            ));
        };

        let data = parse_and_validate::<T>(&raw)?;
        info!("Successfully generated and validated structured data");
        Ok(MaterializeResult::new(data, usage))
    }

    fn model_name(&self) -> &str {
        self.config.model.as_str()
    }
}
