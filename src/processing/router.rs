//! Multi-strategy processing router.
//!
//! Validates the request, dispatches it to the strategy's capability, and
//! normalizes the outcome. The hybrid path is an explicit ordered attempt
//! list folded through one helper, so the local-first order and the
//! single-shot remote fallback are enforced structurally. Every failure is
//! caught and returned as a [`ProcessingResult`] value — nothing is raised
//! across the boundary.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::observability::LatencyTracker;

use super::capability::{LocalCapability, RemoteCapability};
use super::{ProcessError, ProcessingRequest, ProcessingResult, ProcessingStrategy};

/// One step in an attempt chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Local,
    Remote,
}

/// Strategy router over the injected processing capabilities.
///
/// Holds no per-request state — independent requests share nothing but the
/// capabilities themselves, so no locking discipline applies here.
pub struct Router {
    local: Arc<dyn LocalCapability>,
    remote: Arc<dyn RemoteCapability>,
}

impl Router {
    pub fn new(local: Arc<dyn LocalCapability>, remote: Arc<dyn RemoteCapability>) -> Self {
        Self { local, remote }
    }

    /// Execute `request` and return its normalized outcome.
    ///
    /// Entitlement is the caller's responsibility — a blocked tool must
    /// never reach this method. This never panics and never returns an
    /// error type; every failure path ends in a `success=false` result.
    pub async fn process(&self, request: &ProcessingRequest) -> ProcessingResult {
        // Validation happens before any strategy dispatch.
        if request.input.trim().is_empty() {
            debug!(category = %request.tool_category, "rejecting empty input");
            return ProcessError::EmptyInput.into();
        }

        let tracker = LatencyTracker::start("router.process");
        debug!(
            strategy = %request.strategy,
            category = %request.tool_category,
            "dispatching tool request"
        );

        let outcome = match request.strategy {
            ProcessingStrategy::OpenSource => self.attempt(Attempt::Local, request).await,
            ProcessingStrategy::Api => self.attempt(Attempt::Remote, request).await,
            ProcessingStrategy::Hybrid => {
                // Local first; exactly one remote fallback on any local failure.
                self.attempt_chain(&[Attempt::Local, Attempt::Remote], request)
                    .await
            }
            ProcessingStrategy::Platform => match request.tool_id.as_deref() {
                Some(tool_id) => {
                    self.remote
                        .run_tool(&request.input, &request.tool_category, tool_id)
                        .await
                }
                // Caller contract violation — fail explicitly, never fall back.
                None => Err(ProcessError::ContractViolation(
                    "platform strategy requires a tool id".to_string(),
                )),
            },
        };
        tracker.finish();

        match outcome {
            Ok(output) => ProcessingResult::ok(output),
            Err(err) => {
                warn!(
                    strategy = %request.strategy,
                    category = %request.tool_category,
                    error = %err,
                    "processing failed"
                );
                err.into()
            }
        }
    }

    /// Run a single attempt against its capability.
    async fn attempt(
        &self,
        which: Attempt,
        request: &ProcessingRequest,
    ) -> Result<String, ProcessError> {
        match which {
            Attempt::Local => {
                self.local
                    .run(&request.input, &request.tool_category)
                    .await
            }
            Attempt::Remote => {
                self.remote
                    .run(&request.input, &request.tool_category)
                    .await
            }
        }
    }

    /// Try each attempt in order; the first success wins and later attempts
    /// are never made. The last error is terminal — there is no re-retry.
    async fn attempt_chain(
        &self,
        order: &[Attempt],
        request: &ProcessingRequest,
    ) -> Result<String, ProcessError> {
        let mut last_err: Option<ProcessError> = None;
        for (i, which) in order.iter().enumerate() {
            match self.attempt(*which, request).await {
                Ok(output) => {
                    if i > 0 {
                        info!(attempt = ?which, "fallback attempt succeeded");
                    }
                    return Ok(output);
                }
                Err(err) => {
                    if i + 1 < order.len() {
                        warn!(attempt = ?which, error = %err, "attempt failed — trying next");
                    }
                    last_err = Some(err);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| {
            ProcessError::ContractViolation("empty attempt chain".to_string())
        }))
    }
}
