//! Chat prompt templates with named `{slot}` placeholders.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::backend::{ChatMessage, ChatRole, LLMClient};
use crate::error::{AssistantError, Result};
use crate::model::Instructor;
use crate::pipeline::{Pipeline, StructuredOutput};

/// Instruction establishing the assistant's role for product extraction.
pub const PRODUCT_SYSTEM_PROMPT: &str = "You are a helpful assistant with deep domain knowledge in \
product analysis and pricing. When the user gives about any product details, provide\n\
1. The **Product Name** \n2. The **Tentative Product Price in USD**.\n\n\
Only return valid and structured information.";

/// Values for the slots of a [`ChatPromptTemplate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptInput {
    values: BTreeMap<String, String>,
}

impl PromptInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input with only the `input` slot filled.
    pub fn input(text: impl Into<String>) -> Self {
        Self::new().with("input", text)
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// An ordered sequence of role-tagged message templates.
///
/// Expansion is pure: the same input always yields the same messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPromptTemplate {
    messages: Vec<(ChatRole, String)>,
}

impl ChatPromptTemplate {
    pub fn from_messages<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = (ChatRole, S)>,
        S: Into<String>,
    {
        Self {
            messages: messages
                .into_iter()
                .map(|(role, template)| (role, template.into()))
                .collect(),
        }
    }

    /// The system + human template used for product extraction.
    pub fn product_assistant() -> Self {
        Self::from_messages([
            (ChatRole::System, PRODUCT_SYSTEM_PROMPT),
            (ChatRole::User, "{input}"),
        ])
    }

    /// Names of all slots, in order of first appearance.
    pub fn variables(&self) -> Vec<String> {
        let mut names = Vec::new();
        for (_, template) in &self.messages {
            for name in slot_names(template) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Expand every slot and return the messages ready to send.
    pub fn format(&self, input: &PromptInput) -> Result<Vec<ChatMessage>> {
        let messages = self
            .messages
            .iter()
            .map(|(role, template)| Ok(ChatMessage::new(*role, expand(template, input)?)))
            .collect::<Result<Vec<_>>>()?;
        debug!(message_count = messages.len(), "Expanded prompt template");
        Ok(messages)
    }

    /// Compose with a structured-output model into a [`Pipeline`].
    pub fn pipe<C, T>(self, model: StructuredOutput<C, T>) -> Pipeline<C, T>
    where
        C: LLMClient,
        T: Instructor + Send + 'static,
    {
        Pipeline::new(self, model)
    }
}

fn expand(template: &str, input: &PromptInput) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for n in chars.by_ref() {
                    if n == '}' {
                        closed = true;
                        break;
                    }
                    name.push(n);
                }
                if !closed {
                    return Err(AssistantError::TemplateError(format!(
                        "unterminated slot `{{{name}`"
                    )));
                }
                let value = input.get(name.trim()).ok_or_else(|| {
                    AssistantError::TemplateError(format!("missing value for slot `{name}`"))
                })?;
                trace!(slot = %name, value_len = value.len(), "Filled template slot");
                out.push_str(value);
            }
            '}' => {
                return Err(AssistantError::TemplateError(
                    "unmatched `}` in template".to_string(),
                ));
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

fn slot_names(template: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
            }
            '{' => {
                let name: String = chars.by_ref().take_while(|&n| n != '}').collect();
                names.push(name.trim().to_string());
            }
            _ => {}
        }
    }
    names
}
