//! TOML configuration.
//!
//! ```toml
//! [backend]
//! base_url = "http://127.0.0.1:7420"
//! timeout_secs = 30
//!
//! [repl]
//! prompt = "Risp > "
//! context_id = ""
//!
//! [ui]
//! close_modal_on_error = true
//! export_filename = "context(s).yaml"
//! ```
//!
//! `RISP_BACKEND_URL` and `RISP_CONTEXT_ID` override the file after it is
//! parsed and before validation.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

pub const BACKEND_URL_ENV: &str = "RISP_BACKEND_URL";
pub const CONTEXT_ID_ENV: &str = "RISP_CONTEXT_ID";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub backend: BackendConfig,
    #[serde(default)]
    pub repl: ReplConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplConfig {
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Sent with every context-scoped call. Empty means the backend default.
    #[serde(default)]
    pub context_id: String,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            context_id: String::new(),
        }
    }
}

fn default_prompt() -> String {
    "Risp > ".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    /// Close create/index dialogs when the backend rejects a submit.
    #[serde(default = "default_true")]
    pub close_modal_on_error: bool,
    #[serde(default = "default_export_filename")]
    pub export_filename: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            close_modal_on_error: true,
            export_filename: default_export_filename(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_export_filename() -> String {
    "context(s).yaml".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate(&config)?;

    Ok(config)
}

/// Applies `RISP_*` overrides using `lookup` to read variables.
pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(BACKEND_URL_ENV).filter(|v| !v.trim().is_empty()) {
        config.backend.base_url = url;
    }
    if let Some(id) = lookup(CONTEXT_ID_ENV) {
        config.repl.context_id = id;
    }
}

pub fn validate(config: &Config) -> Result<()> {
    let url = config.backend.base_url.trim();
    if url.is_empty() {
        bail!("backend.base_url must not be empty");
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!(
            "backend.base_url must start with http:// or https:// (got '{}')",
            url
        );
    }

    if config.backend.timeout_secs == 0 {
        bail!("backend.timeout_secs must be > 0");
    }

    if config.ui.export_filename.trim().is_empty() {
        bail!("ui.export_filename must not be empty");
    }

    Ok(())
}
