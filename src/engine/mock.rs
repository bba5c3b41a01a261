//! Deterministic in-process engine for tests and `--mock` runs.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use mathpipe_protocol::ConversionRequest;

use super::{Engine, EngineError};

/// Mock engine. Renders a deterministic SVG shell around the markup;
/// individual markup strings can be scripted to delay or fail.
#[derive(Debug, Default)]
pub struct MockEngine {
    delays: HashMap<String, Duration>,
    conversion_failures: HashMap<String, String>,
    internal_failures: HashSet<String>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep before completing conversions of this markup. Used to force
    /// out-of-order completion in tests.
    pub fn with_delay(mut self, markup: &str, delay: Duration) -> Self {
        self.delays.insert(markup.to_string(), delay);
        self
    }

    /// Fail conversions of this markup with the given engine message.
    pub fn with_conversion_failure(mut self, markup: &str, message: &str) -> Self {
        self.conversion_failures
            .insert(markup.to_string(), message.to_string());
        self
    }

    /// Fail conversions of this markup with an internal engine error.
    pub fn with_internal_failure(mut self, markup: &str) -> Self {
        self.internal_failures.insert(markup.to_string());
        self
    }
}

#[async_trait]
impl Engine for MockEngine {
    async fn convert(&self, request: &ConversionRequest) -> Result<String, EngineError> {
        if let Some(delay) = self.delays.get(&request.markup) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(message) = self.conversion_failures.get(&request.markup) {
            return Err(EngineError::Conversion(message.clone()));
        }
        if self.internal_failures.contains(&request.markup) {
            return Err(EngineError::Internal("scripted internal failure".to_string()));
        }
        Ok(format!(
            "<svg data-conversion=\"{}\" data-display=\"{}\"><desc>{}</desc></svg>",
            request.conversion_name(),
            request.display,
            request.markup
        ))
    }
}
