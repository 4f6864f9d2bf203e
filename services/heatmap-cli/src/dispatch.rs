//! Off-thread engine dispatch with stale-result suppression.
//!
//! Each submission takes the next generation number and runs `densify` on
//! the blocking pool. When the result comes back, it is only handed out if
//! no newer submission has been made in the meantime; otherwise the caller
//! gets [`Dispatch::Stale`] and should drop it, the way a map view drops a
//! heatmap computed for a zoom level it has already left.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use aqi_common::{PointCollection, RawSample, SkipCounts};
use anyhow::{Context, Result};
use densify::{densify, normalize_all, DensificationConfig, DensifyOutcome};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// What a finished computation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// The engine ran successfully.
    Densified(DensifyOutcome),
    /// The engine failed; these are the normalized input points, to be
    /// drawn as they are.
    Fallback {
        collection: PointCollection,
        skipped: SkipCounts,
        error: String,
    },
}

impl Rendered {
    pub fn collection(&self) -> &PointCollection {
        match self {
            Self::Densified(outcome) => &outcome.collection,
            Self::Fallback { collection, .. } => collection,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Result of waiting on a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Newest submission; safe to display.
    Fresh(Rendered),
    /// Superseded by a later submission.
    Stale { generation: u64, latest: u64 },
}

/// Runs densification off the caller's thread.
///
/// Cloning shares the generation counter, so clones supersede each other.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: Arc<DensificationConfig>,
    generation: Arc<AtomicU64>,
}

impl Dispatcher {
    pub fn new(config: DensificationConfig) -> Self {
        Self {
            config: Arc::new(config),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn config(&self) -> &DensificationConfig {
        &self.config
    }

    /// Generation of the most recent submission (0 before any).
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Start a computation and supersede any still in flight.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, samples: Vec<RawSample>, zoom: f64) -> PendingDispatch {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let config = Arc::clone(&self.config);

        debug!(generation, samples = samples.len(), zoom, "Submitting densification");

        let handle = tokio::task::spawn_blocking(move || run_engine(&samples, zoom, &config));

        PendingDispatch {
            generation,
            latest: Arc::clone(&self.generation),
            handle,
        }
    }

    /// Submit and wait in one step.
    pub async fn run(&self, samples: Vec<RawSample>, zoom: f64) -> Result<Dispatch> {
        self.submit(samples, zoom).wait().await
    }
}

/// A computation started by [`Dispatcher::submit`].
#[derive(Debug)]
pub struct PendingDispatch {
    generation: u64,
    latest: Arc<AtomicU64>,
    handle: JoinHandle<Rendered>,
}

impl PendingDispatch {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while no newer submission has been made.
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }

    /// Wait for the computation; errors only if the worker task panicked.
    pub async fn wait(self) -> Result<Dispatch> {
        let rendered = self
            .handle
            .await
            .context("Densification task failed to complete")?;

        let latest = self.latest.load(Ordering::SeqCst);
        if latest != self.generation {
            debug!(
                generation = self.generation,
                latest, "Discarding stale densification result"
            );
            return Ok(Dispatch::Stale {
                generation: self.generation,
                latest,
            });
        }

        Ok(Dispatch::Fresh(rendered))
    }
}

fn run_engine(samples: &[RawSample], zoom: f64, config: &DensificationConfig) -> Rendered {
    match densify(samples, zoom, config) {
        Ok(outcome) => Rendered::Densified(outcome),
        Err(e) => {
            warn!(error = %e, "Densification failed, falling back to raw points");
            let (collection, skipped) = normalize_all(samples);
            Rendered::Fallback {
                collection,
                skipped,
                error: e.to_string(),
            }
        }
    }
}
