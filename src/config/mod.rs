//! Configuration management for browserselect
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use browserselect::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Unshortening enabled: {}", config.resolver.unshorten);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `BROWSERSELECT__<section>__<key>`
//!
//! Examples:
//! - `BROWSERSELECT__RESOLVER__UNSHORTEN=true`
//! - `BROWSERSELECT__RESOLVER__APPEND_TEXT=corp`
//! - `BROWSERSELECT__RESOLVER__TIMEOUT_SECS=5`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/browserselect.toml`.
//! This can be overridden using the `BROWSERSELECT_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{BrowserConfig, Config, ResolverConfig};
pub use sources::config_path;
pub use validation::ValidationError;

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::coordinator::ResolveOptions;
use crate::handlers::{HandlerId, HandlerRegistries};
use crate::unshorten::HttpConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or
    /// validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Read-only registry snapshot for resolutions
    pub fn registries(&self) -> Arc<HandlerRegistries> {
        Arc::new(HandlerRegistries::new(
            self.protocols.clone(),
            self.file_types.clone(),
        ))
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            canonicalize: self.resolver.canonicalize,
            append_text: self.resolver.append_text.clone(),
            unshorten: self.resolver.unshorten,
            user_agent: self.resolver.user_agent.clone(),
        }
    }

    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            request_timeout: Duration::from_secs(self.resolver.timeout_secs),
            max_redirects: self.resolver.max_redirects,
        }
    }

    /// Display name for a handler id, when the browser catalogue has one
    pub fn browser_name(&self, id: &HandlerId) -> Option<&str> {
        self.browsers
            .iter()
            .find(|browser| &browser.id == id)
            .map(|browser| browser.name.as_str())
    }
}
