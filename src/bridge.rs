//! Turns one form submission into at most one provider call.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::backend::GroqClient;
use crate::config::{Credentials, Settings};
use crate::error::{AssistantError, Result};
use crate::pipeline::WithStructuredOutput;
use crate::product::Product;
use crate::prompt::{ChatPromptTemplate, PromptInput};

pub const MISSING_INPUT_WARNING: &str = "Please provide both product description and model.";

/// The values of the form at the moment the user pressed submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub model: String,
    pub description: String,
}

impl Submission {
    pub fn new(model: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            description: description.into(),
        }
    }

    /// Both fields are non-empty after trimming.
    pub fn is_complete(&self) -> bool {
        !self.model.trim().is_empty() && !self.description.trim().is_empty()
    }
}

/// Terminal state of one submission.
#[derive(Debug)]
pub enum Outcome {
    Success(Product),
    Error(AssistantError),
    /// Required input was missing; nothing was sent.
    Warning(&'static str),
}

/// Builds a client per submission from the startup credentials and settings.
#[derive(Debug, Clone)]
pub struct Bridge {
    credentials: Arc<Credentials>,
    settings: Arc<Settings>,
    template: ChatPromptTemplate,
}

impl Bridge {
    pub fn new(credentials: Credentials, settings: Settings) -> Self {
        Self {
            credentials: Arc::new(credentials),
            settings: Arc::new(settings),
            template: ChatPromptTemplate::product_assistant(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Handle a submission. Never fails: errors become [`Outcome::Error`].
    #[instrument(
        name = "bridge_submit",
        skip(self, submission),
        fields(model = %submission.model, description_len = submission.description.len())
    )]
    pub async fn submit(&self, submission: &Submission) -> Outcome {
        if !submission.is_complete() {
            warn!("Submission is missing description or model; not invoking");
            return Outcome::Warning(MISSING_INPUT_WARNING);
        }

        match self
            .invoke(submission.model.trim(), &submission.description)
            .await
        {
            Ok(product) => {
                info!("Submission succeeded");
                Outcome::Success(product)
            }
            Err(e) => {
                warn!(error = %e, "Submission failed");
                Outcome::Error(e)
            }
        }
    }

    /// Compose template and structured client for `model`, then call it once.
    pub async fn invoke(&self, model: &str, description: &str) -> Result<Product> {
        let client = GroqClient::from_credentials(&self.credentials)
            .model(model)
            .temperature(self.settings.temperature)
            .base_url(self.settings.base_url.as_str());

        let pipeline = self
            .template
            .clone()
            .pipe(client.with_structured_output::<Product>());

        pipeline.invoke(&PromptInput::input(description)).await
    }
}
