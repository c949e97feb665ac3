/// Token usage information from an LLM API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenUsage {
    /// The model used for this request
    pub model: String,
    /// Number of tokens in the input/prompt
    pub input_tokens: u64,
    /// Number of tokens in the output/completion
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn new(model: impl Into<String>, input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            model: model.into(),
            input_tokens,
            output_tokens,
        }
    }

    /// Total tokens used (input + output)
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Result of a materialize call: the validated data plus usage, when the provider reports it.
#[derive(Debug, Clone)]
pub struct MaterializeResult<T> {
    pub data: T,
    pub usage: Option<TokenUsage>,
}

impl<T> MaterializeResult<T> {
    pub fn new(data: T, usage: Option<TokenUsage>) -> Self {
        Self { data, usage }
    }
}
