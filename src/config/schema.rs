use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::units::{HeightUnit, WeightUnit};

/// Application configuration.
///
/// Example YAML:
/// ```yaml
/// units:
///   height: ftin
///   weight: lb
/// history:
///   enabled: true
/// webhook:
///   url: "https://script.example.com/macros/s/abc/exec"
///   timeout_secs: 10
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub units: UnitsConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    /// Remote submission endpoint. Results are only stored locally when unset.
    #[serde(default)]
    pub webhook: Option<WebhookConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UnitsConfig {
    #[serde(default)]
    pub height: HeightUnit,
    #[serde(default)]
    pub weight: WeightUnit,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// History file location (default: ~/.config/metabolic-age/history.json)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WebhookConfig {
    pub url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra attempts after the first failed request.
    #[serde(default = "default_retries")]
    pub retries: usize,
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_retries() -> usize {
    3
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref webhook) = config.webhook {
        match reqwest::Url::parse(&webhook.url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(format!(
                "webhook.url: unsupported scheme '{}' (use http or https)",
                url.scheme()
            )),
            Err(e) => errors.push(format!("webhook.url: invalid '{}' - {}", webhook.url, e)),
        }
        if webhook.timeout_secs == 0 {
            errors.push("webhook.timeout_secs: must be greater than zero".to_string());
        }
        if webhook.retries > 10 {
            errors.push("webhook.retries: must be at most 10".to_string());
        }
    }

    if let Some(ref path) = config.history.path {
        if path.as_os_str().is_empty() {
            errors.push("history.path: must not be empty".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
