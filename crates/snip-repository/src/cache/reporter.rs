//! Periodic cache statistics reporting.

use super::CacheStatsSnapshot;
use crate::metrics::record_snapshot;
use async_trait::async_trait;
use parking_lot::Mutex;
use snip_core::{SnipError, SnipResult};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::info;

/// Anything that can produce a statistics snapshot.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Name used to label reports.
    fn name(&self) -> &str;

    /// Current statistics.
    async fn snapshot(&self) -> CacheStatsSnapshot;
}

/// Background task logging a source's statistics on a fixed schedule.
///
/// The first report fires `initial_delay` after [`start`](Self::start),
/// then every `interval` until [`stop`](Self::stop). Dropping the reporter
/// aborts the task.
pub struct StatsReporter {
    source: Arc<dyn StatsSource>,
    initial_delay: Duration,
    interval: Duration,
    shutdown_tx: broadcast::Sender<()>,
    running: Arc<AtomicBool>,
    reports: Arc<AtomicU64>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl StatsReporter {
    /// Creates a stopped reporter.
    pub fn new(source: Arc<dyn StatsSource>, initial_delay: Duration, interval: Duration) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            source,
            initial_delay,
            interval,
            shutdown_tx,
            running: Arc::new(AtomicBool::new(false)),
            reports: Arc::new(AtomicU64::new(0)),
            task: Mutex::new(None),
        }
    }

    /// Spawns the reporting task.
    ///
    /// # Errors
    ///
    /// Returns [`SnipError::Configuration`] if the reporter is already running.
    pub fn start(&self) -> SnipResult<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(SnipError::configuration(format!(
                "Statistics reporter for {} already running",
                self.source.name()
            )));
        }

        info!(
            cache = %self.source.name(),
            initial_delay_secs = self.initial_delay.as_secs(),
            interval_secs = self.interval.as_secs(),
            "Starting statistics reporter"
        );

        let source = Arc::clone(&self.source);
        let running = Arc::clone(&self.running);
        let reports = Arc::clone(&self.reports);
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let period = self.interval.max(Duration::from_millis(1));
        let mut ticker = interval_at(Instant::now() + self.initial_delay, period);

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    _ = ticker.tick() => {
                        let snapshot = source.snapshot().await;
                        info!(
                            cache = %snapshot.name,
                            hits = snapshot.hits,
                            misses = snapshot.misses,
                            hit_ratio = snapshot.hit_ratio(),
                            load_failures = snapshot.load_failures,
                            evictions = snapshot.evictions,
                            entries = snapshot.entry_count,
                            "Cache statistics"
                        );
                        record_snapshot(&snapshot);
                        reports.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
            running.store(false, Ordering::SeqCst);
        });

        *self.task.lock() = Some(handle);
        Ok(())
    }

    /// Stops the reporting task and waits for it to finish.
    pub async fn stop(&self) {
        let handle = self.task.lock().take();
        let Some(handle) = handle else {
            return;
        };
        info!(cache = %self.source.name(), "Stopping statistics reporter");
        let _ = self.shutdown_tx.send(());
        let _ = handle.await;
        self.running.store(false, Ordering::SeqCst);
    }

    /// Returns true while the reporting task is alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Number of reports emitted so far.
    #[must_use]
    pub fn reports(&self) -> u64 {
        self.reports.load(Ordering::Relaxed)
    }
}

impl Drop for StatsReporter {
    fn drop(&mut self) {
        if let Some(handle) = self.task.get_mut().take() {
            handle.abort();
        }
    }
}
