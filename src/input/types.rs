use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheme separator recognised by the classifier
pub const SCHEME_SEPARATOR: &str = "://";

/// Scheme assumed for protocol-less network references such as `host/path`
pub const DEFAULT_SCHEME: &str = "https";

/// Tri-state result of input triage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    ProtocolReference,
    FileReference,
    Indeterminate,
}

/// Structured view of a raw URL or path.
///
/// Exactly one of `scheme`/`extension` is non-empty for the two reference
/// kinds; both are empty for [`InputKind::Indeterminate`], in which case
/// `remainder` carries the raw input untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedInput {
    pub kind: InputKind,
    pub scheme: String,
    pub extension: String,
    pub remainder: String,
}

impl ClassifiedInput {
    pub fn protocol(scheme: impl Into<String>, remainder: impl Into<String>) -> Self {
        Self {
            kind: InputKind::ProtocolReference,
            scheme: scheme.into(),
            extension: String::new(),
            remainder: remainder.into(),
        }
    }

    pub fn file(remainder: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            kind: InputKind::FileReference,
            scheme: String::new(),
            extension: extension.into(),
            remainder: remainder.into(),
        }
    }

    pub fn indeterminate(raw: impl Into<String>) -> Self {
        Self {
            kind: InputKind::Indeterminate,
            scheme: String::new(),
            extension: String::new(),
            remainder: raw.into(),
        }
    }

    pub fn is_protocol(&self) -> bool {
        self.kind == InputKind::ProtocolReference
    }

    /// Whether the scheme is eligible for redirect expansion (`http`/`https`)
    pub fn is_web(&self) -> bool {
        self.is_protocol()
            && (self.scheme.eq_ignore_ascii_case("http")
                || self.scheme.eq_ignore_ascii_case("https"))
    }

    /// Reassemble a launchable string from the parts
    pub fn render(&self) -> String {
        match self.kind {
            InputKind::ProtocolReference => {
                format!("{}{}{}", self.scheme, SCHEME_SEPARATOR, self.remainder)
            }
            InputKind::FileReference => format!("{}.{}", self.remainder, self.extension),
            InputKind::Indeterminate => self.remainder.clone(),
        }
    }
}

impl fmt::Display for ClassifiedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
