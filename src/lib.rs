pub mod config;
pub mod coordinator;
pub mod handlers;
pub mod input;
pub mod observability;
pub mod unshorten;

pub use coordinator::{Coordinator, PendingResolution, ResolutionResult, ResolveOptions};
