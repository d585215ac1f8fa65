//! CLI Commands

pub mod config;
pub mod draft;
pub mod forms;

use std::sync::Arc;

use formsmith_core::{FormService, HttpFormGateway, Validator};

use crate::config::{Config, DEFAULT_API_URL};
use crate::output::OutputFormat;

/// Everything a command needs to talk to the form service
pub struct Context {
    pub api_url: String,
    pub format: OutputFormat,
    pub strict: bool,
    pub service: FormService,
}

impl Context {
    /// Flags win over the profile config, which wins over built-in defaults
    pub fn new(config: &Config, api_url: Option<&str>, format: Option<OutputFormat>, strict: bool) -> Self {
        let api_url = api_url
            .map(String::from)
            .or_else(|| config.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let format = format
            .or_else(|| config.default_format.as_deref().and_then(|f| f.parse().ok()))
            .unwrap_or_default();
        let strict = strict || config.strict_validation.unwrap_or(false);
        let service = FormService::new(Arc::new(HttpFormGateway::new(&api_url)));
        Self { api_url, format, strict, service }
    }

    pub fn validator(&self) -> Validator {
        if self.strict {
            Validator::strict()
        } else {
            Validator::default()
        }
    }
}
