//! The request pipeline: optional reference fetch, composition, one
//! completion call, and the JSON envelope returned to the caller.

use serde_json::{Value, json};
use tracing::{debug, error};

use crate::compose::Composer;
use crate::error::PipelineError;
use crate::gateway::CompletionClient;
use crate::reference::ReferenceSource;
use crate::types::CompletionResult;

/// Per-deployment switches. `require_subject` reproduces the stricter
/// handler variant that rejects calls without a caller-supplied prompt.
#[derive(Debug, Clone, Default)]
pub struct HandlerOptions {
    pub require_subject: bool,
}

/// What the invoking transport sends back: a status code and a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: Value,
}

/// One configured handler. Stateless across requests; every invocation runs
/// the same strict sequence and shares nothing with its neighbours.
pub struct CopyPipeline {
    composer: Composer,
    gateway: CompletionClient,
    store: Option<Box<dyn ReferenceSource>>,
    options: HandlerOptions,
}

impl CopyPipeline {
    pub fn new(composer: Composer, gateway: CompletionClient) -> Self {
        Self {
            composer,
            gateway,
            store: None,
            options: HandlerOptions::default(),
        }
    }

    pub fn with_store(mut self, store: Box<dyn ReferenceSource>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_options(mut self, options: HandlerOptions) -> Self {
        self.options = options;
        self
    }

    /// Handle one request. Never panics and never retries; every failure is
    /// logged and mapped to one JSON error response.
    pub async fn handle(&self, override_prompt: Option<&str>) -> HandlerResponse {
        match self.run(override_prompt).await {
            Ok(result) => HandlerResponse {
                status: 200,
                body: json!({ "result": result.text }),
            },
            Err(err) => {
                error!(error = %err, "request failed");
                HandlerResponse {
                    status: err.status_code(),
                    body: err.to_body(),
                }
            }
        }
    }

    async fn run(&self, override_prompt: Option<&str>) -> Result<CompletionResult, PipelineError> {
        let override_prompt = override_prompt
            .map(str::trim)
            .filter(|text| !text.is_empty());

        if self.options.require_subject && override_prompt.is_none() {
            return Err(PipelineError::Validation("Prompt is required.".to_string()));
        }

        // Fetch only the collections the frame will actually use. A failed
        // fetch fails the whole request; no completion call goes out with
        // partial context.
        let faqs = match &self.store {
            Some(store) if self.composer.needs_faqs(override_prompt) => {
                Some(store.fetch_faqs().await?)
            }
            _ => None,
        };
        let pricing = match &self.store {
            Some(store) if self.composer.needs_pricing(override_prompt) => {
                Some(store.fetch_pricing().await?)
            }
            _ => None,
        };

        let request =
            self.composer
                .compose(override_prompt, faqs.as_deref(), pricing.as_deref())?;
        debug!(
            model = %request.model,
            with_faqs = faqs.is_some(),
            with_pricing = pricing.is_some(),
            "composed completion request"
        );

        self.gateway.complete(&request).await
    }
}
