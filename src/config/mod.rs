//! Engine configuration assembly
//!
//! Builds the typesetting engine's configuration at process start:
//! 1. Built-in defaults (sections `loader`, `tex`, `svg`, `startup`)
//! 2. Process-argument overrides, applied in order (later arguments win)
//!
//! Override processing never aborts startup; every failure degrades to a
//! warning plus continuation. The assembled value is immutable afterwards
//! and handed to engine initialization exactly once.

mod defaults;
mod overrides;

pub use defaults::{engine_defaults, package_defaults};
pub use overrides::apply_overrides;

use serde_json::Value;

/// Assemble the effective engine configuration from defaults plus
/// JSON-encoded override arguments.
pub fn assemble(args: &[String]) -> Value {
    let mut config = engine_defaults();
    apply_overrides(&mut config, args);
    config
}
