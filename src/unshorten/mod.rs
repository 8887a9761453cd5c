//! Short-URL expansion.
//!
//! [`HttpExpander`] resolves redirects over HTTP (HEAD, then GET);
//! [`Unshortener`] runs expansions in the background with single-flight
//! supersession.

pub mod http;
mod job;

pub use http::{Expander, HttpConfig, HttpExpander, UnshortenError};
pub use job::{DeliveryGate, Rewrite, Unshortener};
