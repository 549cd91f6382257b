//! Persisted configuration document and provider entries

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Highest document version this build can read
pub const DOCUMENT_VERSION: u32 = 1;

/// Provider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Provider name (e.g., 'openai', 'anthropic', 'openrouter'); unique, case-insensitive
    pub name: String,
    /// Whether this provider is enabled (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Custom API base URL (optional, uses provider default if not set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// List of model names to expose
    #[serde(default)]
    pub models: Vec<String>,
    /// Settings written to the live file while this provider is current
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub settings: Value,
}

fn default_enabled() -> bool {
    true
}

impl ProviderConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            api_base: None,
            models: vec![],
            settings: Value::Null,
        }
    }

    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.models = models;
        self
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    pub fn with_settings(mut self, settings: Value) -> Self {
        self.settings = settings;
        self
    }

    /// Payload for the live settings file: explicit settings when present,
    /// otherwise the provider entry itself
    pub fn live_settings(&self) -> Value {
        if self.settings.is_null() {
            serde_json::json!({
                "provider": self.name,
                "apiBase": self.api_base,
                "models": self.models,
            })
        } else {
            self.settings.clone()
        }
    }
}

/// The whole persisted configuration, and the shape of a backup file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Name of the currently selected provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

fn default_version() -> u32 {
    DOCUMENT_VERSION
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            current: None,
            providers: Vec::new(),
        }
    }
}

impl ConfigDocument {
    pub fn with_providers(providers: Vec<ProviderConfig>) -> Self {
        Self { providers, ..Self::default() }
    }

    pub fn with_current(mut self, name: impl Into<String>) -> Self {
        self.current = Some(name.into());
        self
    }

    /// Look up a provider by name, case-insensitively
    pub fn find_provider(&self, name: &str) -> Option<&ProviderConfig> {
        let name_lower = name.to_lowercase();
        self.providers.iter().find(|p| p.name.to_lowercase() == name_lower)
    }

    /// The provider named by `current`, if any
    pub fn current_provider(&self) -> Option<&ProviderConfig> {
        self.current.as_deref().and_then(|name| self.find_provider(name))
    }

    /// Check that the document can be applied as-is
    ///
    /// Returns a user-facing description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.version == 0 || self.version > DOCUMENT_VERSION {
            return Err(format!(
                "Unsupported configuration version {} (expected 1..={})",
                self.version, DOCUMENT_VERSION
            ));
        }

        let mut seen = HashSet::new();
        for provider in &self.providers {
            let name = provider.name.trim();
            if name.is_empty() {
                return Err("Provider with an empty name".to_string());
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(format!("Duplicate provider: {}", provider.name));
            }
        }

        if let Some(current) = &self.current {
            if self.find_provider(current).is_none() {
                return Err(format!("Current provider not found: {}", current));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConfigDocument {
        ConfigDocument::with_providers(vec![
            ProviderConfig::new("openai").with_models(vec!["gpt-4o".to_string()]),
            ProviderConfig::new("anthropic")
                .with_settings(serde_json::json!({ "env": { "ANTHROPIC_BASE_URL": "https://api.anthropic.com" } })),
        ])
        .with_current("Anthropic")
    }

    #[test]
    fn test_valid_document() {
        let doc = sample();
        assert!(doc.validate().is_ok());
        assert_eq!(doc.current_provider().map(|p| p.name.as_str()), Some("anthropic"));
    }

    #[test]
    fn test_duplicate_provider_rejected() {
        let mut doc = sample();
        doc.providers.push(ProviderConfig::new("OpenAI"));
        let err = doc.validate().unwrap_err();
        assert!(err.contains("Duplicate provider"));
    }

    #[test]
    fn test_dangling_current_rejected() {
        let doc = sample().with_current("gemini");
        assert_eq!(doc.validate().unwrap_err(), "Current provider not found: gemini");
    }

    #[test]
    fn test_future_version_rejected() {
        let mut doc = sample();
        doc.version = DOCUMENT_VERSION + 1;
        assert!(doc.validate().unwrap_err().contains("Unsupported configuration version"));
    }

    #[test]
    fn test_defaults_when_fields_missing() {
        let doc: ConfigDocument = serde_json::from_str(r#"{"providers":[{"name":"openai"}]}"#).unwrap();
        assert_eq!(doc.version, DOCUMENT_VERSION);
        assert!(doc.providers[0].enabled);
        assert!(doc.current.is_none());
    }

    #[test]
    fn test_live_settings_fallback() {
        let doc = sample();
        let openai = doc.find_provider("openai").unwrap();
        assert_eq!(openai.live_settings()["provider"], "openai");

        let anthropic = doc.find_provider("anthropic").unwrap();
        assert!(anthropic.live_settings().get("env").is_some());

        let local = ProviderConfig::new("local")
            .with_api_base("http://localhost:11434")
            .with_models(vec!["llama3".to_string()]);
        let live = local.live_settings();
        assert_eq!(live["apiBase"], "http://localhost:11434");
        assert_eq!(live["models"][0], "llama3");
    }
}
