use serde::{Deserialize, Serialize};

use crate::handlers::{FileTypeHandler, HandlerId, ProtocolHandler};

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Optional catalogue of known handler ids (display names only)
    #[serde(default)]
    pub browsers: Vec<BrowserConfig>,
    #[serde(default)]
    pub protocols: Vec<ProtocolHandler>,
    #[serde(default)]
    pub file_types: Vec<FileTypeHandler>,
}

/// Resolution options
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub canonicalize: bool,
    #[serde(default = "default_append_text")]
    pub append_text: String,
    #[serde(default)]
    pub unshorten: bool,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Bound on each HEAD/GET attempt while expanding
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            canonicalize: false,
            append_text: default_append_text(),
            unshorten: false,
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
        }
    }
}

fn default_append_text() -> String {
    "com".to_string()
}

fn default_user_agent() -> String {
    concat!("browserselect/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_redirects() -> usize {
    10
}

/// Known application
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BrowserConfig {
    pub id: HandlerId,
    pub name: String,
}
