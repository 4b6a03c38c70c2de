// SPDX-License-Identifier: MIT
//! Tool request processing — strategy types, capability seams, and the
//! multi-strategy router.
//!
//! A [`ProcessingRequest`] names an input, a tool category, and a
//! [`ProcessingStrategy`]; [`router::Router::process`] executes it and
//! always returns a normalized [`ProcessingResult`] — no error ever crosses
//! this boundary as anything but a value.

pub mod capability;
pub mod router;
pub mod shaping;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Strategies ───────────────────────────────────────────────────────────────

/// How a tool request is serviced. Chosen per request by the caller or its
/// stored connection config, never by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessingStrategy {
    /// Local in-process model.
    OpenSource,
    /// Remote generic processing service.
    Api,
    /// Try local first; on any failure, fall back to the remote path once.
    Hybrid,
    /// A specific named platform backend endpoint (requires a tool id).
    Platform,
}

impl ProcessingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenSource => "open-source",
            Self::Api => "api",
            Self::Hybrid => "hybrid",
            Self::Platform => "platform",
        }
    }

    /// Parse a strategy from its wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open-source" => Some(Self::OpenSource),
            "api" => Some(Self::Api),
            "hybrid" => Some(Self::Hybrid),
            "platform" => Some(Self::Platform),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProcessingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Request / Result ─────────────────────────────────────────────────────────

/// One tool invocation. Created per user action, discarded after the
/// response is delivered.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessingRequest {
    /// Text payload. Must be non-empty after trimming.
    pub input: String,
    /// Drives strategy-specific and shaping behavior.
    #[serde(rename = "toolCategory")]
    pub tool_category: String,
    pub strategy: ProcessingStrategy,
    /// Required when `strategy` is `platform`.
    #[serde(rename = "toolId", default)]
    pub tool_id: Option<String>,
}

impl ProcessingRequest {
    pub fn new(
        input: impl Into<String>,
        tool_category: impl Into<String>,
        strategy: ProcessingStrategy,
    ) -> Self {
        Self {
            input: input.into(),
            tool_category: tool_category.into(),
            strategy,
            tool_id: None,
        }
    }

    pub fn with_tool_id(mut self, tool_id: impl Into<String>) -> Self {
        self.tool_id = Some(tool_id.into());
        self
    }
}

/// Normalized outcome of a processing request.
///
/// Invariants (enforced by the constructors): `success` exactly when
/// `error_message` is absent, and a failed result always has empty output.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingResult {
    pub success: bool,
    pub output: String,
    #[serde(rename = "errorMessage", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ProcessingResult {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error_message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output: String::new(),
            error_message: Some(message.into()),
        }
    }
}

// ─── Error taxonomy ───────────────────────────────────────────────────────────

/// Internal failure taxonomy for the processing paths. Normalized into a
/// [`ProcessingResult`] at the router boundary — callers never see it raised.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Caller/user error — surfaced as a validation message, no retry.
    #[error("empty input")]
    EmptyInput,
    /// Local capability not initialised or not usable right now.
    #[error("local capability unavailable: {0}")]
    CapabilityUnavailable(String),
    /// Network or backend error on the remote path.
    #[error("remote processing failed: {0}")]
    RemoteFailure(String),
    /// Programming error in the caller (e.g. platform strategy without a
    /// tool id). Surfaced as a generic failure rather than a crash.
    #[error("contract violation: {0}")]
    ContractViolation(String),
}

impl From<ProcessError> for ProcessingResult {
    fn from(err: ProcessError) -> Self {
        ProcessingResult::failed(err.to_string())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
