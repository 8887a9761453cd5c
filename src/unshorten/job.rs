//! Single-flight background expansion.
//!
//! An [`Unshortener`] owns at most one in-flight job. Beginning a new job
//! bumps the generation counter and aborts the previous task; a job whose
//! generation is no longer current when it finishes drops its result
//! without calling back. Each job settles exactly once: delivered, or
//! counted as superseded by whichever side gets there first.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::http::Expander;
use crate::input::{canonicalize, classify};
use crate::observability::Metrics;

/// Holds back delivery of a job's result until dropped.
///
/// Lets a caller finish its synchronous work before the completion
/// callback can run on another worker thread.
#[derive(Debug)]
pub struct DeliveryGate {
    _tx: oneshot::Sender<()>,
}

/// Rewrite applied to the expanded string before it is delivered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewrite {
    pub enabled: bool,
    pub append_text: String,
}

/// In-flight job
struct Job {
    handle: JoinHandle<()>,
    /// Set once the job has been delivered or written off
    settled: Arc<AtomicBool>,
}

pub struct Unshortener {
    expander: Arc<dyn Expander>,
    generation: Arc<AtomicU64>,
    slot: Mutex<Option<Job>>,
    metrics: Arc<Metrics>,
}

impl Unshortener {
    pub fn new(expander: Arc<dyn Expander>, metrics: Arc<Metrics>) -> Self {
        Self {
            expander,
            generation: Arc::new(AtomicU64::new(0)),
            slot: Mutex::new(None),
            metrics,
        }
    }

    /// Generation of the most recently started job (0 before any job)
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether a job is still running
    pub fn is_busy(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|job| !job.handle.is_finished())
    }

    /// Start expanding `url` in the background, superseding any earlier job.
    ///
    /// `on_complete` receives the expanded, re-classified and rewritten
    /// string exactly once, unless a newer job starts first. Returns `None`
    /// (and never calls back) when `url` is not an http/https reference or
    /// no Tokio runtime is available.
    pub fn begin<F>(
        &self,
        url: &str,
        user_agent: &str,
        rewrite: Rewrite,
        on_complete: F,
    ) -> Option<DeliveryGate>
    where
        F: FnOnce(String) + Send + 'static,
    {
        if !classify(url).is_web() {
            warn!(url, "Refusing to expand non-web reference");
            return None;
        }

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!(url, error = %e, "No async runtime, skipping expansion");
                return None;
            }
        };

        let (gate_tx, gate_rx) = oneshot::channel::<()>();
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        let job_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = slot.take() {
            if !previous.settled.swap(true, Ordering::SeqCst) {
                previous.handle.abort();
                self.metrics.unshorten_superseded();
                debug!(generation = job_generation - 1, "Aborted superseded job");
            }
        }

        let settled = Arc::new(AtomicBool::new(false));
        let job_settled = Arc::clone(&settled);

        let expander = Arc::clone(&self.expander);
        let generation = Arc::clone(&self.generation);
        let metrics = Arc::clone(&self.metrics);
        let url = url.to_string();
        let user_agent = user_agent.to_string();

        info!(%url, generation = job_generation, "Starting expansion");
        self.metrics.unshorten_started();

        let handle = runtime.spawn(async move {
            let expanded = expander.expand(&url, &user_agent).await;
            let final_string =
                canonicalize(classify(&expanded), rewrite.enabled, &rewrite.append_text).render();

            // Dropped gate means the caller is done; either outcome releases us
            let _ = gate_rx.await;

            // Already written off by a newer job
            if job_settled.swap(true, Ordering::SeqCst) {
                return;
            }

            if generation.load(Ordering::SeqCst) != job_generation {
                metrics.unshorten_superseded();
                debug!(%url, generation = job_generation, "Discarding stale expansion");
                return;
            }

            info!(%url, %final_string, generation = job_generation, "Expansion finished");
            on_complete(final_string);
        });
        *slot = Some(Job { handle, settled });

        Some(DeliveryGate { _tx: gate_tx })
    }
}

impl Drop for Unshortener {
    fn drop(&mut self) {
        let slot = self.slot.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(job) = slot.take() {
            job.handle.abort();
        }
    }
}
