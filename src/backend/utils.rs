use reqwest::Response;
use tracing::{error, trace};

use crate::error::{ApiErrorKind, AssistantError, Result};
use crate::model::Instructor;

/// Extract JSON from markdown code blocks if present, otherwise return the content as-is.
///
/// Some models wrap JSON answers in ```json ... ``` or ``` ... ``` fences.
pub fn extract_json_from_markdown(content: &str) -> String {
    let trimmed = content.trim();

    if trimmed.starts_with("```") {
        if let Some(start_idx) = trimmed.find('\n') {
            let after_start = &trimmed[start_idx + 1..];
            if let Some(end_idx) = after_start.rfind("```") {
                return after_start[..end_idx].trim().to_string();
            }
        }
    }

    trimmed.to_string()
}

/// Convert a reqwest error to an AssistantError, handling timeout errors specially.
pub fn handle_http_error(e: reqwest::Error, provider_name: &str) -> AssistantError {
    error!(error = %e, "HTTP request to {} failed", provider_name);
    if e.is_timeout() {
        AssistantError::Timeout
    } else {
        AssistantError::HttpError(e)
    }
}

/// Check HTTP response status and classify the failure if unsuccessful.
pub async fn check_response_status(response: Response, provider_name: &str) -> Result<Response> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await?;
        error!(
            status = %status,
            error = %error_text,
            "{} API returned error response", provider_name
        );
        return Err(AssistantError::api_error(
            provider_name,
            ApiErrorKind::from_status(status.as_u16(), provider_error_message(&error_text)),
        ));
    }
    Ok(response)
}

/// Pull `error.message` out of an OpenAI-style error body, falling back to the raw text.
fn provider_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

/// Parse raw model output into `T` and run its validation.
///
/// Any parse or validation failure becomes `ValidationError`.
pub fn parse_and_validate<T: Instructor>(raw: &str) -> Result<T> {
    let json_text = extract_json_from_markdown(raw);
    trace!(json = %json_text, "Parsing structured output");

    let value: serde_json::Value = serde_json::from_str(&json_text).map_err(|e| {
        error!(error = %e, partial_json = %json_text, "JSON parsing error");
        AssistantError::ValidationError(format!(
            "Failed to parse response: {e}\nPartial JSON: {json_text}"
        ))
    })?;

    T::from_value(value).inspect_err(|e| error!(error = ?e, "Structured output rejected"))
}
