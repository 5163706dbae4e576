//! Periodic sweeps of expired store entries
//!
//! Stores expire entries passively when they are read; sweeps only reclaim
//! memory held by keys nobody touches again.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::errors::DomainResult;
use crate::services::rate_limit::RateLimiter;
use crate::services::verification::VerificationStore;

/// Shortest period a sweep may run at
pub const MIN_PERIOD: Duration = Duration::from_secs(1);

/// Handle to a running sweep task
#[derive(Debug)]
pub struct CleanupTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl CleanupTask {
    /// Run `sweep` every `period`, starting one period from now
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, sweep: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = DomainResult<usize>> + Send + 'static,
    {
        let period = if period < MIN_PERIOD {
            warn!(
                task = name,
                period_ms = period.as_millis() as u64,
                "Cleanup period too short, using minimum"
            );
            MIN_PERIOD
        } else {
            period
        };

        let handle = tokio::spawn(async move {
            info!(task = name, period_secs = period.as_secs(), "Cleanup task started");

            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                timer.tick().await;

                match sweep().await {
                    Ok(0) => {}
                    Ok(removed) => debug!(task = name, removed, "Removed expired entries"),
                    Err(e) => error!(task = name, error = %e, "Cleanup cycle failed"),
                }
            }
        });

        Self { name, handle }
    }

    /// Sweep expired rate-limit windows
    pub fn for_rate_limiter(limiter: Arc<dyn RateLimiter>, period: Duration) -> Self {
        Self::spawn("rate_limit_sweep", period, move || {
            let limiter = Arc::clone(&limiter);
            async move { limiter.purge_expired().await }
        })
    }

    /// Sweep expired verification entries
    pub fn for_verification_store(store: Arc<dyn VerificationStore>, period: Duration) -> Self {
        Self::spawn("verification_sweep", period, move || {
            let store = Arc::clone(&store);
            async move { store.purge_expired().await }
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop the task; a sweep in progress is cancelled at its next await point
    pub fn shutdown(self) {
        self.handle.abort();
        info!(task = self.name, "Cleanup task stopped");
    }
}
