//! Typesetting engine capability
//!
//! The engine is an opaque collaborator: initialized once with the
//! assembled configuration, then asked to convert markup asynchronously.
//! Conversions from different requests may complete in any order.

mod command;
mod mock;

pub use command::CommandEngine;
pub use mock::MockEngine;

use async_trait::async_trait;
use mathpipe_protocol::ConversionRequest;

/// Engine-side failure for one conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    /// The engine rejected the markup (malformed input, unsupported
    /// construct). The text is surfaced verbatim to the caller.
    #[error("{0}")]
    Conversion(String),

    /// The engine itself failed (could not spawn, crashed, produced
    /// unreadable output). Reported to the caller as a generic unknown
    /// error.
    #[error("engine failure: {0}")]
    Internal(String),
}

/// A ready typesetting engine.
///
/// Implementations must be safe to share across in-flight conversions;
/// the serve loop holds one handle behind an `Arc` and never serializes
/// calls.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Convert one request's markup to rendered SVG.
    async fn convert(&self, request: &ConversionRequest) -> Result<String, EngineError>;
}
