//! Resolution pipeline: classify, canonicalize, match, and optionally
//! expand in the background.
//!
//! The synchronous part of [`Coordinator::resolve`] always reflects the
//! input as given. When expansion applies, the final answer arrives later
//! through the callback (or [`PendingResolution::wait`]) and only for the
//! most recent request made on the same coordinator.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::debug;

use crate::handlers::{HandlerId, HandlerRegistries, match_handlers};
use crate::input::{ClassifiedInput, canonicalize, classify};
use crate::observability::{Metrics, MetricsSnapshot};
use crate::unshorten::{
    DeliveryGate, Expander, HttpConfig, HttpExpander, Rewrite, UnshortenError, Unshortener,
};

/// Per-request options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    pub canonicalize: bool,
    pub append_text: String,
    pub unshorten: bool,
    pub user_agent: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            canonicalize: false,
            append_text: String::new(),
            unshorten: false,
            user_agent: concat!("browserselect/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ResolveOptions {
    fn rewrite(&self) -> Rewrite {
        Rewrite {
            enabled: self.canonicalize,
            append_text: self.append_text.clone(),
        }
    }
}

/// What to launch and who can launch it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub final_string: String,
    pub candidate_handler_ids: Vec<HandlerId>,
    pub was_unshortened: bool,
}

/// Background completion of a single [`Coordinator::resolve_pending`] call
#[derive(Debug)]
pub struct PendingResolution {
    rx: oneshot::Receiver<ResolutionResult>,
}

impl PendingResolution {
    /// Expanded result, or `None` if a newer request superseded this one
    pub async fn wait(self) -> Option<ResolutionResult> {
        self.rx.await.ok()
    }
}

pub struct Coordinator {
    unshortener: Unshortener,
    metrics: Arc<Metrics>,
}

impl Coordinator {
    pub fn new(expander: Arc<dyn Expander>) -> Self {
        let metrics = Arc::new(Metrics::new());
        Self {
            unshortener: Unshortener::new(expander, Arc::clone(&metrics)),
            metrics,
        }
    }

    /// Coordinator expanding over HTTP
    pub fn with_http(config: HttpConfig) -> Result<Self, UnshortenError> {
        Ok(Self::new(Arc::new(HttpExpander::new(config)?)))
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Resolve `raw` against the registries.
    ///
    /// Returns the un-expanded result immediately. If `opts.unshorten` is
    /// set and the input is an http/https reference, a background expansion
    /// starts and `on_final` is called at most once with the expanded
    /// result; otherwise `on_final` is never called.
    ///
    /// On a multi-threaded runtime `on_final` may run on another worker as
    /// soon as the result is built, possibly before the caller has looked
    /// at it. Use [`resolve_held`](Self::resolve_held) when the callback
    /// must wait for the caller.
    pub fn resolve<F>(
        &self,
        raw: &str,
        opts: &ResolveOptions,
        registries: Arc<HandlerRegistries>,
        on_final: F,
    ) -> ResolutionResult
    where
        F: FnOnce(ResolutionResult) + Send + 'static,
    {
        let (immediate, _gate) = self.resolve_held(raw, opts, registries, on_final);
        immediate
    }

    /// [`resolve`](Self::resolve), but `on_final` cannot run until the
    /// returned gate is dropped.
    pub fn resolve_held<F>(
        &self,
        raw: &str,
        opts: &ResolveOptions,
        registries: Arc<HandlerRegistries>,
        on_final: F,
    ) -> (ResolutionResult, Option<DeliveryGate>)
    where
        F: FnOnce(ResolutionResult) + Send + 'static,
    {
        self.metrics.resolution();

        let input = canonicalize(classify(raw), opts.canonicalize, &opts.append_text);
        let immediate = build_result(&input, &registries, false);

        if !(opts.unshorten && input.is_web()) {
            return (immediate, None);
        }

        let sync_string = immediate.final_string.clone();
        let metrics = Arc::clone(&self.metrics);
        let gate = self.unshortener.begin(
            &immediate.final_string,
            &opts.user_agent,
            opts.rewrite(),
            move |final_string| {
                let was_unshortened = !same_reference(&final_string, &sync_string);
                let final_string = if was_unshortened {
                    metrics.unshorten_expanded();
                    final_string
                } else {
                    sync_string
                };
                let expanded = classify(&final_string);
                on_final(build_result(&expanded, &registries, was_unshortened));
            },
        );

        debug!(
            raw,
            final_string = %immediate.final_string,
            expanding = gate.is_some(),
            "Resolved"
        );

        (immediate, gate)
    }

    /// [`resolve`](Self::resolve) with the completion exposed as a future.
    ///
    /// The pending half is `None` when no background expansion started.
    pub fn resolve_pending(
        &self,
        raw: &str,
        opts: &ResolveOptions,
        registries: Arc<HandlerRegistries>,
    ) -> (ResolutionResult, Option<PendingResolution>) {
        let (tx, rx) = oneshot::channel();

        let (immediate, gate) = self.resolve_held(raw, opts, registries, move |result| {
            let _ = tx.send(result);
        });

        let pending = gate.is_some().then_some(PendingResolution { rx });
        (immediate, pending)
    }
}

/// Equal strings, or equal once parsed as URLs (`HTTP://a` vs `http://a/`)
fn same_reference(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    match (Url::parse(a), Url::parse(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn build_result(
    input: &ClassifiedInput,
    registries: &HandlerRegistries,
    was_unshortened: bool,
) -> ResolutionResult {
    ResolutionResult {
        final_string: input.render(),
        candidate_handler_ids: match_handlers(input, &registries.protocols, &registries.file_types),
        was_unshortened,
    }
}
