//! Handler registries and matching.
//!
//! - [`ProtocolHandler`] / [`FileTypeHandler`] - configured registry entries
//! - [`HandlerRegistries`] - immutable snapshot passed into each resolution
//! - [`match_handlers`] - candidate lookup for a classified input

mod registry;
mod types;

pub use registry::match_handlers;
pub use types::{FileTypeHandler, HandlerId, HandlerRegistries, ProtocolHandler};
