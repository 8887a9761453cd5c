use super::models::Config;
use crate::handlers::HandlerId;
use crate::input::SCHEME_SEPARATOR;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Protocol entry #{index} has an empty token")]
    EmptyProtocolToken { index: usize },

    #[error("Protocol token '{token}' must not contain '://'")]
    InvalidProtocolToken { token: String },

    #[error("File type entry #{index} has an empty extension")]
    EmptyExtension { index: usize },

    #[error("Extension '{extension}' must not contain '.'")]
    InvalidExtension { extension: String },

    #[error("Browser id '{id}' is declared more than once")]
    DuplicateBrowser { id: String },

    #[error("'{entry}' references unknown handler '{handler}'")]
    UnknownHandler { entry: String, handler: String },

    #[error("Request timeout must be positive")]
    InvalidTimeout,

    #[error("User agent must not be empty when unshortening is enabled")]
    EmptyUserAgent,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_protocols(config)?;
    validate_file_types(config)?;
    validate_handler_references(config)?;
    validate_resolver(config)?;
    Ok(())
}

fn validate_protocols(config: &Config) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();

    for (index, entry) in config.protocols.iter().enumerate() {
        if entry.token.is_empty() {
            return Err(ValidationError::EmptyProtocolToken { index });
        }
        if entry.token.contains(SCHEME_SEPARATOR) {
            return Err(ValidationError::InvalidProtocolToken {
                token: entry.token.clone(),
            });
        }
        // Only the first entry is ever matched
        if !seen.insert(entry.token.to_ascii_lowercase()) {
            tracing::warn!(token = %entry.token, "Duplicate protocol entry will never match");
        }
    }

    Ok(())
}

fn validate_file_types(config: &Config) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();

    for (index, entry) in config.file_types.iter().enumerate() {
        if entry.extension.is_empty() {
            return Err(ValidationError::EmptyExtension { index });
        }
        if entry.extension.contains('.') {
            return Err(ValidationError::InvalidExtension {
                extension: entry.extension.clone(),
            });
        }
        if !seen.insert(entry.extension.to_ascii_lowercase()) {
            tracing::warn!(
                extension = %entry.extension,
                "Duplicate file type entry will never match"
            );
        }
    }

    Ok(())
}

/// With a browser catalogue present, every referenced id must be in it
fn validate_handler_references(config: &Config) -> Result<(), ValidationError> {
    if config.browsers.is_empty() {
        return Ok(());
    }

    let mut known: HashSet<&HandlerId> = HashSet::new();
    for browser in &config.browsers {
        if !known.insert(&browser.id) {
            return Err(ValidationError::DuplicateBrowser {
                id: browser.id.to_string(),
            });
        }
    }

    let protocol_refs = config
        .protocols
        .iter()
        .flat_map(|p| p.supporting_handler_ids.iter().map(move |id| (&p.token, id)));
    let file_type_refs = config
        .file_types
        .iter()
        .flat_map(|f| f.supporting_handler_ids.iter().map(move |id| (&f.extension, id)));

    for (entry, id) in protocol_refs.chain(file_type_refs) {
        if !known.contains(id) {
            return Err(ValidationError::UnknownHandler {
                entry: entry.clone(),
                handler: id.to_string(),
            });
        }
    }

    Ok(())
}

fn validate_resolver(config: &Config) -> Result<(), ValidationError> {
    if config.resolver.timeout_secs == 0 {
        return Err(ValidationError::InvalidTimeout);
    }
    if config.resolver.unshorten && config.resolver.user_agent.trim().is_empty() {
        return Err(ValidationError::EmptyUserAgent);
    }
    Ok(())
}
