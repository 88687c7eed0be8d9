//! The prompt composer.
//!
//! Builds the outbound [`CompletionRequest`] from the operator template, an
//! optional caller override, and whatever reference records the handler
//! fetched. The override fully replaces the template as the subject; the
//! instructional frame (role line, formatting rules, contact block) is
//! layered back in regardless of which subject won.

use crate::error::PipelineError;
use crate::reference::{FaqEntry, PriceItem};
use crate::template::{ContactBlock, PromptTemplate};
use crate::types::{ChatRole, CompletionRequest, Message};

/// Role line for the `system` message.
pub const DEFAULT_SYSTEM_ROLE: &str = "You are a helpful assistant providing sales and service \
information for a solar panel cleaning business.";

/// Trigger vocabulary for the pricing section, drawn from the savings
/// questions customers actually ask.
pub const PRICING_TRIGGERS: &[&str] = &["price", "pricing", "cost", "quote", "save", "saving", "kw"];

/// Trigger vocabulary for the FAQ section.
pub const FAQ_TRIGGERS: &[&str] = &["faq", "question", "how much", "how often"];

/// Whether a reference collection is injected unconditionally or only when
/// the subject mentions one of its trigger words. Gating is a payload-size
/// heuristic; a gated-out collection is omitted, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionGating {
    Always,
    OnKeyword,
}

#[derive(Debug, Clone)]
pub struct ComposeOptions {
    pub model: String,
    pub system_role: String,
    pub contact: ContactBlock,
    pub faq_gating: SectionGating,
    pub pricing_gating: SectionGating,
    pub faq_triggers: Vec<String>,
    pub pricing_triggers: Vec<String>,
}

impl ComposeOptions {
    pub fn new(model: impl Into<String>, contact: ContactBlock) -> Self {
        Self {
            model: model.into(),
            system_role: DEFAULT_SYSTEM_ROLE.to_string(),
            contact,
            faq_gating: SectionGating::OnKeyword,
            pricing_gating: SectionGating::OnKeyword,
            faq_triggers: FAQ_TRIGGERS.iter().map(|t| t.to_string()).collect(),
            pricing_triggers: PRICING_TRIGGERS.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn with_system_role(mut self, role: impl Into<String>) -> Self {
        self.system_role = role.into();
        self
    }

    pub fn with_faq_gating(mut self, gating: SectionGating) -> Self {
        self.faq_gating = gating;
        self
    }

    pub fn with_pricing_gating(mut self, gating: SectionGating) -> Self {
        self.pricing_gating = gating;
        self
    }
}

pub struct Composer {
    template: PromptTemplate,
    options: ComposeOptions,
}

impl Composer {
    pub fn new(template: PromptTemplate, options: ComposeOptions) -> Self {
        Self { template, options }
    }

    /// The text the model is asked to respond to: a non-empty override wins
    /// outright, otherwise the configured template.
    pub fn effective_subject<'a>(&'a self, override_text: Option<&'a str>) -> &'a str {
        match override_text {
            Some(text) if !text.trim().is_empty() => text,
            _ => self.template.text(),
        }
    }

    /// Whether the FAQ section would be included for this override. The
    /// handler uses this to skip the fetch entirely when gated out.
    pub fn needs_faqs(&self, override_text: Option<&str>) -> bool {
        section_wanted(
            self.options.faq_gating,
            &self.options.faq_triggers,
            self.effective_subject(override_text),
        )
    }

    /// Whether the pricing section would be included for this override.
    pub fn needs_pricing(&self, override_text: Option<&str>) -> bool {
        section_wanted(
            self.options.pricing_gating,
            &self.options.pricing_triggers,
            self.effective_subject(override_text),
        )
    }

    /// Assemble the outbound request: a `system` role message and a `user`
    /// message carrying the full instructional frame. Fails fast if either
    /// message would be empty.
    pub fn compose(
        &self,
        override_text: Option<&str>,
        faqs: Option<&[FaqEntry]>,
        pricing: Option<&[PriceItem]>,
    ) -> Result<CompletionRequest, PipelineError> {
        if self.options.system_role.trim().is_empty() {
            return Err(PipelineError::Configuration(
                "system role text is empty".to_string(),
            ));
        }

        let subject = self.effective_subject(override_text);
        if subject.trim().is_empty() {
            return Err(PipelineError::Validation(
                "prompt subject is empty".to_string(),
            ));
        }

        let mut frame = String::new();
        frame.push_str(
            "Respond to the request below on behalf of the business. Use structured text \
with clear headings, short paragraphs, and bullet points.\n\nRequest:\n",
        );
        frame.push_str(subject);

        if self.needs_faqs(override_text) {
            if let Some(faqs) = faqs.filter(|f| !f.is_empty()) {
                frame.push_str("\n\nFrequently asked questions you can draw on:\n");
                for faq in faqs {
                    frame.push_str(&format!("Q: {}\nA: {}\n", faq.question, faq.answer));
                }
            }
        }

        if self.needs_pricing(override_text) {
            if let Some(pricing) = pricing.filter(|p| !p.is_empty()) {
                frame.push_str("\n\nCurrent pricing:\n");
                for item in pricing {
                    frame.push_str(&format!(
                        "- {}: ${:.2} per {}. {}\n",
                        item.name, item.base_price, item.unit_type, item.description
                    ));
                }
            }
        }

        frame.push_str("\n\n");
        frame.push_str(&self.options.contact.render());

        Ok(CompletionRequest {
            model: self.options.model.clone(),
            messages: vec![
                Message {
                    role: ChatRole::System,
                    content: self.options.system_role.clone(),
                },
                Message {
                    role: ChatRole::User,
                    content: frame,
                },
            ],
        })
    }
}

fn section_wanted(gating: SectionGating, triggers: &[String], subject: &str) -> bool {
    match gating {
        SectionGating::Always => true,
        SectionGating::OnKeyword => {
            let subject = subject.to_lowercase();
            triggers
                .iter()
                .any(|trigger| subject.contains(&trigger.to_lowercase()))
        }
    }
}
