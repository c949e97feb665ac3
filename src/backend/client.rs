use async_trait::async_trait;

use crate::backend::{ChatMessage, MaterializeResult};
use crate::error::Result;
use crate::model::Instructor;

/// LLMClient defines the interface to a hosted chat-completion provider.
///
/// Implementations send one request per call. They do not retry, cache or
/// queue: a failed call is returned to the caller as-is.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use product_assistant::{ChatMessage, GroqClient, GroqModel, LLMClient, Product};
///
/// let client = GroqClient::new("gsk-your-key").model(GroqModel::Llama31_8bInstant);
/// let product: Product = client
///     .materialize(&[ChatMessage::user("A compact mechanical keyboard")])
///     .await?;
///
/// println!("{:?}", product.product_name);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Ask the provider for a value of type `T` and return it with usage metadata.
    ///
    /// The provider is given `T`'s JSON schema. Its output is deserialized and
    /// validated; any mismatch is a `ValidationError`.
    async fn materialize_with_metadata<T>(
        &self,
        messages: &[ChatMessage],
    ) -> Result<MaterializeResult<T>>
    where
        T: Instructor + Send + 'static;

    /// Like [`materialize_with_metadata`](Self::materialize_with_metadata), without the metadata.
    async fn materialize<T>(&self, messages: &[ChatMessage]) -> Result<T>
    where
        T: Instructor + Send + 'static,
    {
        Ok(self.materialize_with_metadata::<T>(messages).await?.data)
    }

    /// Identifier of the model this client is bound to.
    fn model_name(&self) -> &str;
}
