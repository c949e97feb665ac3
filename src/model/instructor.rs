use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::schema::SchemaType;

/// The `Instructor` trait combines JSON schema generation, serialization, and validation.
///
/// A type that implements `Instructor` can be the target of structured output:
/// its schema is sent to the provider, the returned arguments are deserialized
/// into it, and `validate` runs before the value is handed back.
///
/// # Validation
///
/// Override `validate` to enforce constraints the type system can't express,
/// such as numeric bounds. Return `AssistantError::ValidationError` on failure.
///
/// ```
/// use product_assistant::{AssistantError, Instructor, Schema, SchemaBuilder, SchemaType};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, Debug)]
/// struct Stock {
///     quantity: i64,
/// }
///
/// impl SchemaType for Stock {
///     fn schema() -> Schema {
///         SchemaBuilder::object()
///             .property("quantity", serde_json::json!({ "type": "integer" }), true)
///             .build()
///     }
/// }
///
/// impl Instructor for Stock {
///     fn validate(&self) -> product_assistant::Result<()> {
///         if self.quantity < 0 {
///             return Err(AssistantError::ValidationError(format!(
///                 "quantity must not be negative, got {}",
///                 self.quantity
///             )));
///         }
///         Ok(())
///     }
/// }
///
/// assert!(Stock { quantity: -1 }.validate().is_err());
/// ```
pub trait Instructor: SchemaType + DeserializeOwned + Serialize {
    /// Optional validation logic beyond type checking
    ///
    /// Called automatically after the provider's output has been deserialized.
    /// The default implementation accepts every value.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Deserialize from a JSON value and validate in one step.
    ///
    /// Deserialization failures are reported as `ValidationError` so that every
    /// coercion failure takes the same path.
    fn from_value(value: serde_json::Value) -> Result<Self>
    where
        Self: Sized,
    {
        let parsed: Self = serde_json::from_value(value).map_err(|e| {
            crate::error::AssistantError::ValidationError(format!(
                "Failed to parse response: {e}"
            ))
        })?;
        parsed.validate()?;
        Ok(parsed)
    }
}
