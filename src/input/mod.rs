//! Input triage: classification and canonicalization of raw URLs and paths.
//!
//! - [`classify`] splits a raw string into scheme/remainder or
//!   remainder/extension
//! - [`canonicalize`] optionally augments the host part of a protocol
//!   reference with configured text
//!
//! Both are pure functions and safe to call from any thread.

mod canonicalize;
mod classify;
mod types;

pub use canonicalize::{
    CANONICALIZE_RULES, CanonicalizeRule, Delimiters, Insertion, canonicalize, select_rule,
};
pub use classify::classify;
pub use types::{ClassifiedInput, DEFAULT_SCHEME, InputKind, SCHEME_SEPARATOR};
