//! The completion gateway.
//!
//! Exactly one POST per request, no retries. A single parse function
//! classifies the provider's response so every call site sees the same
//! taxonomy instead of re-walking the nested body.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::PipelineError;
use crate::types::{CompletionRequest, CompletionResult};

/// Client for the completion service's chat endpoint.
pub struct CompletionClient {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl CompletionClient {
    pub fn new(api_key: Option<String>, base_url: String) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent(format!("copydesk/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                PipelineError::Configuration(format!("Failed to build reqwest client: {e}"))
            })?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Send the composed request and extract the first choice's content.
    ///
    /// Fails before any network traffic when the credential is absent.
    #[tracing::instrument(name = "completion_call", skip(self, request), err)]
    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, PipelineError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            PipelineError::Configuration("API key is missing.".to_string())
        })?;

        let url = format!("{}/chat/completions", self.base_url);
        let res = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(request)
            .send()
            .await
            .map_err(|e| PipelineError::Provider {
                message: format!("Failed to reach completion service: {e}"),
                status: None,
                body: None,
            })?;

        let status = res.status();
        if !status.is_success() {
            let body = res
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = %status, "completion service rejected the request");
            return Err(PipelineError::Provider {
                message: format!("completion service returned {status}"),
                status: Some(status.as_u16()),
                body: Some(body),
            });
        }

        let text = res.text().await.map_err(|e| PipelineError::Provider {
            message: format!("Failed to read completion response body: {e}"),
            status: None,
            body: None,
        })?;

        let body: Value = serde_json::from_str(&text).map_err(|e| PipelineError::Provider {
            message: format!("Failed to parse completion response as JSON: {e}"),
            status: None,
            body: Some(text),
        })?;

        debug!("completion call succeeded");
        extract_result(body)
    }
}

/// Classify a success-status response body.
///
/// A provider error payload wins over any content; a missing or empty
/// `choices[0].message.content` path is reported with the whole body
/// attached so schema drift can be diagnosed offline.
pub fn extract_result(body: Value) -> Result<CompletionResult, PipelineError> {
    if let Some(error) = body.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(PipelineError::Provider {
            message,
            status: None,
            body: None,
        });
    }

    let content = body
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str);

    match content {
        Some(text) if !text.is_empty() => Ok(CompletionResult {
            text: text.to_string(),
        }),
        _ => Err(PipelineError::EmptyResponse { raw: body }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_is_returned_verbatim() {
        let body = json!({ "choices": [{ "message": { "content": "  Shine on!  " } }] });
        let result = extract_result(body).unwrap();
        assert_eq!(result.text, "  Shine on!  ");
    }

    #[test]
    fn error_payload_wins_over_content() {
        let body = json!({
            "error": { "message": "model overloaded" },
            "choices": [{ "message": { "content": "ignored" } }]
        });
        match extract_result(body).unwrap_err() {
            PipelineError::Provider { message, .. } => assert_eq!(message, "model overloaded"),
            other => panic!("expected Provider error, got {other:?}"),
        }
    }

    #[test]
    fn error_payload_without_message_is_still_surfaced() {
        let body = json!({ "error": { "code": 42 } });
        match extract_result(body).unwrap_err() {
            PipelineError::Provider { message, .. } => assert!(message.contains("42")),
            other => panic!("expected Provider error, got {other:?}"),
        }
    }

    #[test]
    fn missing_content_path_keeps_raw_body() {
        let body = json!({ "choices": [{ "message": {} }] });
        match extract_result(body.clone()).unwrap_err() {
            PipelineError::EmptyResponse { raw } => assert_eq!(raw, body),
            other => panic!("expected EmptyResponse error, got {other:?}"),
        }
    }

    #[test]
    fn empty_content_string_counts_as_missing() {
        let body = json!({ "choices": [{ "message": { "content": "" } }] });
        assert!(matches!(
            extract_result(body),
            Err(PipelineError::EmptyResponse { .. })
        ));
    }

    #[test]
    fn empty_choices_list_counts_as_missing() {
        let body = json!({ "choices": [] });
        assert!(matches!(
            extract_result(body),
            Err(PipelineError::EmptyResponse { .. })
        ));
    }
}
