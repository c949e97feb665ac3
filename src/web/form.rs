use serde::Deserialize;

use crate::backend::GroqModel;
use crate::bridge::Submission;

pub const DESCRIPTION_LABEL: &str = "Describe the product below:";
pub const DESCRIPTION_PLACEHOLDER: &str =
    "e.g., A lightweight wireless headphone with noise cancellation";
pub const MODEL_LABEL: &str = "Choose a Groq-hosted model:";
pub const SUBMIT_LABEL: &str = "🎯 Get Product Info";

/// Model identifiers offered by the selector, in display order.
pub fn model_options() -> Vec<String> {
    GroqModel::all()
        .iter()
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Body of the form post. Absent fields deserialize as empty strings so a
/// partial post reaches the bridge and gets the missing-input warning.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormInput {
    pub model: String,
    pub description: String,
}

impl From<FormInput> for Submission {
    fn from(input: FormInput) -> Self {
        Submission::new(input.model, input.description)
    }
}
