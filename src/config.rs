//! Client configuration — service endpoints and animation tuning.
//!
//! Loaded from `{data_dir}/config.json`; every field falls back to its
//! default when the file is absent or partial. The two service URLs can
//! also be overridden via CODELEAP_API_URL / CODELEAP_AUTH_URL.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_AUTH_BASE_URL, DEFAULT_REDIRECT_URL, DELETE_STAGE_MS,
    HIGHLIGHT_WINDOW_MS, HTTP_TIMEOUT_SECS,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_auth_base_url")]
    pub auth_base_url: String,
    #[serde(default = "default_redirect_url")]
    pub redirect_url: String,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    #[serde(default = "default_highlight_window_ms")]
    pub highlight_window_ms: u64,
    #[serde(default = "default_delete_stage_ms")]
    pub delete_stage_ms: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}
fn default_auth_base_url() -> String {
    DEFAULT_AUTH_BASE_URL.to_string()
}
fn default_redirect_url() -> String {
    DEFAULT_REDIRECT_URL.to_string()
}
fn default_http_timeout_secs() -> u64 {
    HTTP_TIMEOUT_SECS
}
fn default_highlight_window_ms() -> u64 {
    HIGHLIGHT_WINDOW_MS
}
fn default_delete_stage_ms() -> u64 {
    DELETE_STAGE_MS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            auth_base_url: default_auth_base_url(),
            redirect_url: default_redirect_url(),
            http_timeout_secs: default_http_timeout_secs(),
            highlight_window_ms: default_highlight_window_ms(),
            delete_stage_ms: default_delete_stage_ms(),
        }
    }
}

impl ClientConfig {
    /// Load from the standard location with env overrides applied.
    pub fn load() -> Self {
        let mut config = Self::load_from(&crate::paths::config_path());
        if let Ok(url) = std::env::var("CODELEAP_API_URL") {
            if !url.is_empty() {
                config.api_base_url = url;
            }
        }
        if let Ok(url) = std::env::var("CODELEAP_AUTH_URL") {
            if !url.is_empty() {
                config.auth_base_url = url;
            }
        }
        config
    }

    /// Load from an explicit path, or defaults if absent/corrupted.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Invalid config.json, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Best-effort save.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| e.to_string())
    }

    pub fn http_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.http_timeout_secs)
    }
}
