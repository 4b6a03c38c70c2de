// SPDX-License-Identifier: MIT
//! Processing capability seams.
//!
//! The router talks to two collaborator interfaces: a local in-process model
//! capability and a remote processing capability. Hosts inject their own
//! implementations (or the defaults here); tests inject counting mocks.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{OnceCell, Semaphore};
use tracing::{debug, info};

use super::shaping;
use super::ProcessError;

// ─── Traits ───────────────────────────────────────────────────────────────────

/// Local in-process model capability (the `open-source` path).
#[async_trait]
pub trait LocalCapability: Send + Sync {
    /// Run the local model for `category` on `input`.
    ///
    /// Returns [`ProcessError::CapabilityUnavailable`] when the model host
    /// is not initialised and cannot be brought up — the router surfaces
    /// that as a normalized failure instead of blocking.
    async fn run(&self, input: &str, category: &str) -> Result<String, ProcessError>;
}

/// Remote processing capability (the `api` and `platform` paths).
#[async_trait]
pub trait RemoteCapability: Send + Sync {
    /// Generic remote processing for `category`.
    async fn run(&self, input: &str, category: &str) -> Result<String, ProcessError>;

    /// Invoke the named platform backend endpoint for `tool_id`.
    async fn run_tool(
        &self,
        input: &str,
        category: &str,
        tool_id: &str,
    ) -> Result<String, ProcessError>;
}

// ─── Local model host ─────────────────────────────────────────────────────────

/// Default category → local model table, mirroring the portal's shipped
/// model selection.
fn default_models() -> HashMap<String, String> {
    let table = [
        ("text tools", "Xenova/distilbart-cnn-6-6"),
        ("image generation", "Xenova/stable-diffusion-onnx"),
        ("development", "Xenova/codegen-350M-mono"),
        ("language translator", "Xenova/m2m100_418M"),
    ];
    table
        .into_iter()
        .map(|(category, model)| (category.to_string(), model.to_string()))
        .collect()
}

/// Model used for categories without a table entry.
const FALLBACK_MODEL: &str = "Xenova/distilgpt2";

/// Default local capability: a per-category model table with lazy,
/// idempotent initialisation and exclusive access to local compute.
///
/// Initialisation happens at most once per host lifetime; concurrent first
/// callers share the single in-flight initialisation. The compute permit is
/// an RAII guard, released whether the call succeeds or fails.
pub struct LocalModelHost {
    /// Lowercased category → model id.
    models: HashMap<String, String>,
    /// Set once on first use.
    loaded: OnceCell<()>,
    /// Local compute is exclusive — one model invocation at a time.
    compute: Semaphore,
}

impl LocalModelHost {
    /// Build a host from `overrides` merged over the default model table.
    pub fn new(overrides: HashMap<String, String>) -> Self {
        let mut models = default_models();
        for (category, model) in overrides {
            models.insert(category.to_lowercase(), model);
        }
        Self {
            models,
            loaded: OnceCell::new(),
            compute: Semaphore::new(1),
        }
    }

    /// The model id serving `category`.
    pub fn model_for(&self, category: &str) -> &str {
        self.models
            .get(category.to_lowercase().as_str())
            .map(String::as_str)
            .unwrap_or(FALLBACK_MODEL)
    }

    /// Whether the host has completed initialisation.
    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    async fn ensure_loaded(&self) -> Result<(), ProcessError> {
        self.loaded
            .get_or_try_init(|| async {
                info!("initialising local model host");
                Ok::<(), ProcessError>(())
            })
            .await
            .map(|_| ())
    }
}

impl Default for LocalModelHost {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

#[async_trait]
impl LocalCapability for LocalModelHost {
    async fn run(&self, input: &str, category: &str) -> Result<String, ProcessError> {
        self.ensure_loaded().await?;

        // Held for the duration of the model call; dropped on every path.
        let _permit = self.compute.acquire().await.map_err(|_| {
            ProcessError::CapabilityUnavailable("local compute shut down".to_string())
        })?;

        let model = self.model_for(category);
        debug!(model, category, "running local model");
        Ok(shaping::shape(category, input))
    }
}

// ─── Platform backend ─────────────────────────────────────────────────────────

/// Tool id the generic `api` path uses when delegating to the platform
/// processors.
pub const API_DEFAULT_TOOL: &str = "api-default";

/// Default remote capability: the platform's own processors, serviced
/// in-process through the shared shaping table so every strategy produces
/// the same shape for a given category.
pub struct PlatformBackend;

impl PlatformBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlatformBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteCapability for PlatformBackend {
    async fn run(&self, input: &str, category: &str) -> Result<String, ProcessError> {
        // The generic API path is the platform path with the default tool.
        self.run_tool(input, category, API_DEFAULT_TOOL).await
    }

    async fn run_tool(
        &self,
        input: &str,
        category: &str,
        tool_id: &str,
    ) -> Result<String, ProcessError> {
        debug!(tool_id, category, "running platform processor");
        if shaping::has_shaper(category) {
            Ok(shaping::shape(category, input))
        } else {
            // Generic platform output for categories without a processor.
            Ok(format!(
                "Processed with platform API: {input}\nTool ID: {tool_id}\nCategory: {category}"
            ))
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
