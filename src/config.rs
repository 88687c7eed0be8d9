//! Process configuration, read once at startup.
//!
//! The credential stays optional here; the gateway is the component that
//! refuses to run without it, so a misconfigured deployment fails per
//! request with a clear `Configuration` error instead of at load time.

use std::env;

use tracing::debug;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const MODEL_VAR: &str = "OPENAI_MODEL";
pub const COMPLETION_BASE_URL_VAR: &str = "OPENAI_BASE_URL";
pub const STORE_URL_VAR: &str = "SUPABASE_URL";
pub const STORE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_COMPLETION_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub completion_base_url: String,
    pub store_url: Option<String>,
    pub store_key: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            completion_base_url: DEFAULT_COMPLETION_BASE_URL.to_string(),
            store_url: None,
            store_key: None,
        }
    }

    /// Read settings from the process environment. Empty values are treated
    /// as absent.
    pub fn from_env() -> Self {
        let config = Self {
            api_key: non_empty_var(API_KEY_VAR),
            model: non_empty_var(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            completion_base_url: non_empty_var(COMPLETION_BASE_URL_VAR)
                .unwrap_or_else(|| DEFAULT_COMPLETION_BASE_URL.to_string()),
            store_url: non_empty_var(STORE_URL_VAR),
            store_key: non_empty_var(STORE_KEY_VAR),
        };

        debug!(
            model = %config.model,
            has_api_key = config.api_key.is_some(),
            has_store = config.store_url.is_some(),
            "loaded configuration from environment"
        );

        config
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_completion_base_url(mut self, base_url: String) -> Self {
        self.completion_base_url = base_url;
        self
    }

    pub fn with_store(mut self, url: String, service_key: String) -> Self {
        self.store_url = Some(url);
        self.store_key = Some(service_key);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
