use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::{Path, PathBuf};

const CONFIG_ENV_VAR: &str = "BROWSERSELECT_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/browserselect.toml";
const ENV_PREFIX: &str = "BROWSERSELECT";
const ENV_SEPARATOR: &str = "__";

/// Path of the configuration file, from the environment or the default
pub fn config_path() -> PathBuf {
    env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
pub fn load() -> Result<Config, ConfigError> {
    // .env may name the config file itself
    let _ = dotenvy::dotenv();

    load_from_sources(config_path())
}

/// Load `.env` from the working directory and next to the config file.
/// Variables already set in the environment win.
fn load_dotenv(config_path: &Path) {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    if let Some(dir) = config_path.parent() {
        let _ = dotenvy::from_path(dir.join(".env"));
    }
}

/// Load configuration from a specific path and environment
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    load_dotenv(&config_path);

    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::warn!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // BROWSERSELECT__RESOLVER__UNSHORTEN=true -> resolver.unshorten
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    let config = builder.build()?;
    config.try_deserialize()
}
