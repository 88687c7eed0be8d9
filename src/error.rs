use serde_json::{Value, json};
use thiserror::Error;

/// Everything that can go wrong between receiving a request and returning a
/// JSON body. All variants are terminal; nothing in the pipeline retries.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A required credential or setting is absent. No network call was made.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The caller omitted input a stricter handler variant requires.
    #[error("validation error: {0}")]
    Validation(String),

    /// A reference-record fetch failed. The request fails closed; no
    /// completion call is attempted with partial context.
    #[error("reference store error: {0}")]
    DataSource(String),

    /// The completion service rejected the call, either at the transport
    /// level (non-success status, `status`/`body` captured) or via an
    /// explicit error payload (`message` taken verbatim from the provider).
    #[error("completion provider error: {message}")]
    Provider {
        message: String,
        status: Option<u16>,
        body: Option<String>,
    },

    /// Success status, but `choices[0].message.content` was absent or empty.
    /// The full parsed body is retained for offline diagnosis of schema
    /// drift.
    #[error("completion service returned no content")]
    EmptyResponse { raw: Value },
}

impl PipelineError {
    /// HTTP status for the caller-visible response. Transport-level provider
    /// rejections pass the upstream status through; everything else maps to
    /// 400 or 500.
    pub fn status_code(&self) -> u16 {
        match self {
            PipelineError::Validation(_) => 400,
            PipelineError::Provider {
                status: Some(status),
                ..
            } if *status >= 400 => *status,
            _ => 500,
        }
    }

    /// JSON body for the caller-visible response, with diagnostic fields
    /// where the failure carried a raw payload.
    pub fn to_body(&self) -> Value {
        match self {
            PipelineError::Configuration(msg)
            | PipelineError::Validation(msg)
            | PipelineError::DataSource(msg) => json!({ "error": msg }),
            PipelineError::Provider { message, body, .. } => match body {
                Some(body) => json!({ "error": message, "body": body }),
                None => json!({ "error": message }),
            },
            PipelineError::EmptyResponse { raw } => json!({
                "error": "No content returned from the completion service.",
                "response": raw,
            }),
        }
    }
}
