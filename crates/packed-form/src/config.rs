// File: src/config.rs
// Purpose: Configuration parsing from packed-form.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// How a form is rendered to HTML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Form `action` attribute; empty posts back to the current URL
    #[serde(default)]
    pub action: String,

    #[serde(default = "default_method")]
    pub method: String,

    #[serde(default = "default_submit_label")]
    pub submit_label: String,

    #[serde(default = "default_form_class")]
    pub form_class: String,

    #[serde(default = "default_field_class")]
    pub field_class: String,

    #[serde(default = "default_error_class")]
    pub error_class: String,
}

/// Server configuration for `packed-form serve`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

// Default values
fn default_method() -> String {
    "post".to_string()
}

fn default_submit_label() -> String {
    "Submit".to_string()
}

fn default_form_class() -> String {
    "packed-form".to_string()
}

fn default_field_class() -> String {
    "form-item".to_string()
}

fn default_error_class() -> String {
    "field-error".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            action: String::new(),
            method: default_method(),
            submit_label: default_submit_label(),
            form_class: default_form_class(),
            field_class: default_field_class(),
            error_class: default_error_class(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./packed-form.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("packed-form.toml")
    }
}
