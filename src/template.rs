//! Named, versioned prompt templates and the contact block.
//!
//! Templates are data, not code: the registry is populated once at startup
//! and handed to composers by reference. Nothing mutates a template after
//! registration.

use std::collections::HashMap;

/// A static, operator-authored instruction string describing the desired
/// marketing copy. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptTemplate {
    name: String,
    version: u32,
    text: String,
}

impl PromptTemplate {
    pub fn new(name: impl Into<String>, version: u32, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version,
            text: text.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Contact details appended to every outbound prompt, whether or not the
/// subject asks for them. Supplied as instruction text; the pipeline does
/// not verify the model's output retains them.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactBlock {
    pub phone: String,
    pub email: String,
}

impl ContactBlock {
    pub fn new(phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            email: email.into(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "📞 Book Your Cleaning Today\nPhone: {}\nEmail: {}",
            self.phone, self.email
        )
    }
}

/// Lookup of templates by name. Built once at process start.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, PromptTemplate>,
}

pub const DEFAULT_BRIEF: &str = "solar-cleaning-brief";

impl TemplateRegistry {
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Registry pre-loaded with the operator default brief.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(PromptTemplate::new(DEFAULT_BRIEF, 1, default_brief_text()));
        registry
    }

    pub fn register(&mut self, template: PromptTemplate) {
        self.templates.insert(template.name().to_string(), template);
    }

    pub fn get(&self, name: &str) -> Option<&PromptTemplate> {
        self.templates.get(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Default contact details for the cleaning service.
pub fn default_contact() -> ContactBlock {
    ContactBlock::new("0466545251", "s.r.lamont@proton.me")
}

fn default_brief_text() -> &'static str {
    "Write a persuasive and well-formatted \"business card\" to give to homeowners \
in the Bega Valley encouraging them to request professional solar panel cleaning \
services. Include the following:

- A short intro explaining the importance of solar panel cleanliness.
- A heading: \"📉 Why Dirty Panels Cost You Money\"
  - Explain how dirt, pollen, bird droppings, and grime reduce efficiency.
  - Mention that in the Bega Valley, a typical 5kW system generates around 6,600 kWh annually.
  - Point out that dirty panels can lose up to 15-20% efficiency (roughly 1,000-1,300 kWh lost annually).
  - Estimate lost savings at $0.25/kWh, roughly $250-$325 per year.
- A heading: \"💰 Long-Term Financial Benefits\"
  - Highlight how cleaning can recover that lost energy and save about $1,625 over 5 years.
  - Mention improved system lifespan and warranty protection."
}
