//! Prompt expansion composed with a structured-output model call.

use std::marker::PhantomData;

use tracing::{debug, info, instrument};

use crate::backend::{ChatMessage, LLMClient, MaterializeResult};
use crate::error::Result;
use crate::model::Instructor;
use crate::prompt::{ChatPromptTemplate, PromptInput};

/// A client whose output is coerced into `T` instead of returned as text.
pub struct StructuredOutput<C, T> {
    client: C,
    _target: PhantomData<fn() -> T>,
}

impl<C, T> StructuredOutput<C, T>
where
    C: LLMClient,
    T: Instructor + Send + 'static,
{
    pub fn new(client: C) -> Self {
        Self {
            client,
            _target: PhantomData,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn invoke(&self, messages: &[ChatMessage]) -> Result<MaterializeResult<T>> {
        self.client.materialize_with_metadata::<T>(messages).await
    }
}

/// Adds `with_structured_output` to every [`LLMClient`].
pub trait WithStructuredOutput: LLMClient + Sized {
    fn with_structured_output<T>(self) -> StructuredOutput<Self, T>
    where
        T: Instructor + Send + 'static,
    {
        StructuredOutput::new(self)
    }
}

impl<C: LLMClient> WithStructuredOutput for C {}

/// Template expansion feeding straight into one structured model call.
pub struct Pipeline<C, T> {
    template: ChatPromptTemplate,
    model: StructuredOutput<C, T>,
}

impl<C, T> Pipeline<C, T>
where
    C: LLMClient,
    T: Instructor + Send + 'static,
{
    pub fn new(template: ChatPromptTemplate, model: StructuredOutput<C, T>) -> Self {
        Self { template, model }
    }

    /// Expand the template with `input` and make exactly one model call.
    #[instrument(
        name = "pipeline_invoke",
        skip(self, input),
        fields(model = %self.model.client().model_name())
    )]
    pub async fn invoke(&self, input: &PromptInput) -> Result<T> {
        let messages = self.template.format(input)?;
        debug!(message_count = messages.len(), "Invoking structured model");

        let result = self.model.invoke(&messages).await?;
        if let Some(usage) = &result.usage {
            info!(
                model = %usage.model,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                total_tokens = usage.total_tokens(),
                "Pipeline completed"
            );
        }
        Ok(result.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TokenUsage;
    use crate::error::AssistantError;
    use crate::product::Product;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns a canned JSON answer and records the messages it was sent.
    struct CannedClient {
        answer: serde_json::Value,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    #[async_trait]
    impl LLMClient for CannedClient {
        async fn materialize_with_metadata<T>(
            &self,
            messages: &[ChatMessage],
        ) -> Result<MaterializeResult<T>>
        where
            T: Instructor + Send + 'static,
        {
            self.seen.lock().unwrap().push(messages.to_vec());
            let data = T::from_value(self.answer.clone())?;
            Ok(MaterializeResult::new(
                data,
                Some(TokenUsage::new("canned", 10, 5)),
            ))
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    fn canned(answer: serde_json::Value) -> CannedClient {
        CannedClient {
            answer,
            seen: Mutex::new(Vec::new()),
        }
    }

    #[tokio::test]
    async fn test_pipeline_expands_template_before_calling_model() {
        let pipeline = ChatPromptTemplate::product_assistant().pipe(
            canned(serde_json::json!({ "product_name": "Kettle", "tentative_price_in_usd": "30" }))
                .with_structured_output::<Product>(),
        );

        let product = pipeline
            .invoke(&PromptInput::input("electric kettle"))
            .await
            .unwrap();
        assert_eq!(product.product_name.as_deref(), Some("Kettle"));

        let seen = pipeline.model.client().seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].len(), 2);
        assert_eq!(seen[0][1], ChatMessage::user("electric kettle"));
    }

    #[tokio::test]
    async fn test_materialize_drops_metadata() {
        let client = canned(serde_json::json!({ "category": "kitchen" }));
        let product: Product = client
            .materialize(&[ChatMessage::user("toaster")])
            .await
            .unwrap();
        assert_eq!(product.category.as_deref(), Some("kitchen"));
    }

    #[tokio::test]
    async fn test_template_error_skips_model_call() {
        let pipeline = ChatPromptTemplate::product_assistant()
            .pipe(canned(serde_json::json!({})).with_structured_output::<Product>());

        let err = pipeline.invoke(&PromptInput::new()).await.unwrap_err();
        assert!(matches!(err, AssistantError::TemplateError(_)));
        assert!(pipeline.model.client().seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_validation_failure_propagates() {
        let pipeline = ChatPromptTemplate::product_assistant()
            .pipe(canned(serde_json::json!({ "rating": 9.0 })).with_structured_output::<Product>());

        let err = pipeline
            .invoke(&PromptInput::input("anything"))
            .await
            .unwrap_err();
        assert!(matches!(err, AssistantError::ValidationError(_)));
    }
}
