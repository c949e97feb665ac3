use serde_json::{Map, Value, json};

use super::Schema;

/// SchemaBuilder helps construct an object JSON Schema incrementally.
///
/// Properties and required names keep insertion order so the schema sent to
/// the provider lists fields the way the record declares them.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    title: Option<String>,
    description: Option<String>,
    properties: Vec<(String, Value)>,
    required: Vec<String>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object() -> Self {
        Self::new()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a property. Re-adding a name replaces the earlier schema in place.
    pub fn property(
        mut self,
        name: impl Into<String>,
        property_schema: Value,
        required: bool,
    ) -> Self {
        let name = name.into();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = property_schema,
            None => self.properties.push((name.clone(), property_schema)),
        }
        if required && !self.required.contains(&name) {
            self.required.push(name);
        }
        self
    }

    /// Optional string property with a description
    pub fn optional_string(self, name: impl Into<String>, description: &str) -> Self {
        self.property(
            name,
            json!({ "type": "string", "description": description }),
            false,
        )
    }

    /// Optional number property bounded to `[minimum, maximum]`
    pub fn optional_bounded_number(
        self,
        name: impl Into<String>,
        description: &str,
        minimum: f64,
        maximum: f64,
    ) -> Self {
        self.property(
            name,
            json!({
                "type": "number",
                "description": description,
                "minimum": minimum,
                "maximum": maximum
            }),
            false,
        )
    }

    pub fn build(self) -> Schema {
        let mut schema = json!({ "type": "object" });

        if let Some(title) = self.title {
            schema["title"] = json!(title);
        }

        if let Some(description) = self.description {
            schema["description"] = json!(description);
        }

        let properties: Map<String, Value> = self.properties.into_iter().collect();
        schema["properties"] = Value::Object(properties);

        if !self.required.is_empty() {
            schema["required"] = json!(self.required);
        }

        Schema::new(schema)
    }
}
