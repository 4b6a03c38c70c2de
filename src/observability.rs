// SPDX-License-Identifier: MIT
//! Observability utilities — tracing setup and latency tracking.

use std::time::Instant;
use tracing::{debug, info};

/// Initialise a compact stdout tracing subscriber with env-filter support.
///
/// Intended for hosts and tests that don't install their own subscriber.
/// `default_level` is used when `RUST_LOG` is unset (e.g. `"info"`).
/// Calling this twice is harmless — the second init is ignored.
pub fn init_tracing(default_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init();
}

/// Track latency of an async operation and emit a structured log event.
pub struct LatencyTracker {
    operation: String,
    start: Instant,
}

impl LatencyTracker {
    /// Start tracking latency for an operation.
    ///
    /// Examples:
    ///   let tracker = LatencyTracker::start("router.process");
    pub fn start(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            start: Instant::now(),
        }
    }

    /// Finish tracking and emit a log event with the elapsed time.
    pub fn finish(self) {
        let elapsed_ms = self.start.elapsed().as_millis();
        if elapsed_ms > 1000 {
            // Slow operation — log at info level
            info!(
                operation = %self.operation,
                elapsed_ms = elapsed_ms,
                "slow operation"
            );
        } else {
            debug!(
                operation = %self.operation,
                elapsed_ms = elapsed_ms,
                "operation complete"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_finishes_without_panic() {
        let tracker = LatencyTracker::start("test.op");
        tracker.finish();
    }

    #[test]
    fn init_twice_is_harmless() {
        init_tracing("debug");
        init_tracing("info");
    }
}
