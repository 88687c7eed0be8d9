//! # copydesk
//!
//! Prompt assembly and completion gateway for LLM-backed marketing copy
//! handlers. One configured [`CopyPipeline`] replaces a family of
//! near-identical serverless handlers: it merges a named template, an
//! optional caller override, and keyword-gated reference records (FAQs,
//! pricing) into a single completion request, then defensively unwraps the
//! provider's response into either text or a classified error.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use copydesk::{
//!     ComposeOptions, Composer, CompletionClient, Config, CopyPipeline, TemplateRegistry,
//!     template::{DEFAULT_BRIEF, default_contact},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let registry = TemplateRegistry::builtin();
//!     let template = registry.get(DEFAULT_BRIEF).expect("builtin brief").clone();
//!
//!     let composer = Composer::new(
//!         template,
//!         ComposeOptions::new(config.model.clone(), default_contact()),
//!     );
//!     let gateway = CompletionClient::new(config.api_key, config.completion_base_url)?;
//!     let pipeline = CopyPipeline::new(composer, gateway);
//!
//!     let response = pipeline.handle(Some("How much does a clean cost?")).await;
//!     println!("{} {}", response.status, response.body);
//!     Ok(())
//! }
//! ```

pub mod compose;
pub mod config;
pub mod error;
pub mod gateway;
pub mod handler;
pub mod reference;
pub mod template;
pub mod types;

pub use compose::{ComposeOptions, Composer, SectionGating};
pub use config::Config;
pub use error::PipelineError;
pub use gateway::CompletionClient;
pub use handler::{CopyPipeline, HandlerOptions, HandlerResponse};
pub use reference::{FaqEntry, PriceItem, ReferenceSource, RestReferenceStore};
pub use template::{ContactBlock, PromptTemplate, TemplateRegistry};
pub use types::{ChatRole, CompletionRequest, CompletionResult, Message};
