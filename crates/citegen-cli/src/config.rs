//! Optional YAML configuration for CLI defaults.
//!
//! ```yaml
//! dialect: bibtex
//! encoding: html
//! ```
//!
//! Command-line flags take precedence over the file; missing values fall back
//! to [`GenerationOptions::default`].

use anyhow::{Context, Result};
use citegen::{Dialect, Encoding, GenerationOptions};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub dialect: Option<Dialect>,
    pub encoding: Option<Encoding>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(text)
    }

    /// Merge flags over this configuration.
    pub fn options(&self, dialect: Option<Dialect>, encoding: Option<Encoding>) -> GenerationOptions {
        let defaults = GenerationOptions::default();
        GenerationOptions {
            dialect: dialect.or(self.dialect).unwrap_or(defaults.dialect),
            encoding: encoding.or(self.encoding).unwrap_or(defaults.encoding),
        }
    }
}
