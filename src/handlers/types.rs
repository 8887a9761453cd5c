use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of an installed application able to open references
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandlerId(pub String);

impl HandlerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HandlerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Applications registered for a URI scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolHandler {
    pub token: String,
    #[serde(rename = "handlers", default)]
    pub supporting_handler_ids: Vec<HandlerId>,
}

/// Applications registered for a file extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTypeHandler {
    pub extension: String,
    #[serde(rename = "handlers", default)]
    pub supporting_handler_ids: Vec<HandlerId>,
}

impl ProtocolHandler {
    pub fn new<I, H>(token: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<HandlerId>,
    {
        Self {
            token: token.into(),
            supporting_handler_ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl FileTypeHandler {
    pub fn new<I, H>(extension: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<HandlerId>,
    {
        Self {
            extension: extension.into(),
            supporting_handler_ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Read-only snapshot of both registries for one resolution.
///
/// Entry order is significant: lookups stop at the first matching entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerRegistries {
    pub protocols: Vec<ProtocolHandler>,
    pub file_types: Vec<FileTypeHandler>,
}

impl HandlerRegistries {
    pub fn new(protocols: Vec<ProtocolHandler>, file_types: Vec<FileTypeHandler>) -> Self {
        Self {
            protocols,
            file_types,
        }
    }
}
