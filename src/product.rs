//! The structured result the assistant extracts from a product description.

use serde::{Deserialize, Serialize};

use crate::error::{AssistantError, Result};
use crate::model::Instructor;
use crate::schema::{Schema, SchemaType};

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

/// A product as described by the model. Every field is optional.
///
/// Built fresh for each submission and dropped once the result is rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub tentative_price_in_usd: Option<String>,
    pub category: Option<String>,
    pub rating: Option<f64>,
}

impl Product {
    pub fn builder() -> ProductBuilder {
        ProductBuilder::default()
    }
}

impl SchemaType for Product {
    fn schema() -> Schema {
        Schema::builder()
            .title("Product")
            .description("Structured details about a product")
            .optional_string(
                "product_id",
                "Unique identifier for the product (product number)",
            )
            .optional_string("product_name", "The name of the product")
            .optional_string(
                "description",
                "Brief description or key features of the product",
            )
            .optional_string("tentative_price_in_usd", "Price of the product in USD")
            .optional_string(
                "category",
                "Product category such as electronics, clothing, etc.",
            )
            .optional_bounded_number(
                "rating",
                "Average customer rating (0 to 5)",
                MIN_RATING,
                MAX_RATING,
            )
            .build()
    }

    fn schema_name() -> Option<String> {
        Some("Product".to_string())
    }

    fn schema_description() -> Option<String> {
        Some("Structured details about a product".to_string())
    }
}

impl Instructor for Product {
    fn validate(&self) -> Result<()> {
        if let Some(rating) = self.rating {
            if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
                return Err(AssistantError::ValidationError(format!(
                    "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
                )));
            }
        }
        Ok(())
    }
}

/// Builds a [`Product`], rejecting out-of-range ratings at `build` time.
#[derive(Debug, Default)]
pub struct ProductBuilder {
    product: Product,
}

impl ProductBuilder {
    pub fn product_id(mut self, id: impl Into<String>) -> Self {
        self.product.product_id = Some(id.into());
        self
    }

    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.product.product_name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.product.description = Some(description.into());
        self
    }

    pub fn tentative_price_in_usd(mut self, price: impl Into<String>) -> Self {
        self.product.tentative_price_in_usd = Some(price.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.product.category = Some(category.into());
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.product.rating = Some(rating);
        self
    }

    pub fn build(self) -> Result<Product> {
        self.product.validate()?;
        Ok(self.product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_has_six_optional_fields() {
        let schema = Product::schema();
        let json = schema.to_json();

        let props = json["properties"].as_object().unwrap();
        let names: Vec<&str> = props.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec![
                "product_id",
                "product_name",
                "description",
                "tentative_price_in_usd",
                "category",
                "rating"
            ]
        );
        assert!(json.get("required").is_none());
        assert_eq!(json["properties"]["rating"]["type"], "number");
        assert_eq!(json["properties"]["rating"]["minimum"], 0.0);
        assert_eq!(json["properties"]["rating"]["maximum"], 5.0);
    }

    #[test]
    fn test_empty_object_is_a_valid_product() {
        let product = Product::from_value(json!({})).unwrap();
        assert_eq!(product, Product::default());
    }

    #[test]
    fn test_from_value_rejects_out_of_range_rating() {
        let err = Product::from_value(json!({ "product_name": "Mouse", "rating": 6.2 }))
            .unwrap_err();
        match err {
            AssistantError::ValidationError(msg) => assert!(msg.contains("6.2")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_from_value_rejects_wrong_types() {
        let err = Product::from_value(json!({ "rating": "five" })).unwrap_err();
        assert!(matches!(err, AssistantError::ValidationError(_)));
    }

    #[test]
    fn test_builder_rejects_nan() {
        assert!(Product::builder().rating(f64::NAN).build().is_err());
    }
}
