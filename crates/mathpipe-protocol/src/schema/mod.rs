//! Versioned request schemas.
//!
//! Three generations of the request schema exist. Each is strict: required
//! fields must be present with the right types, unknown keys reject, and a
//! `version` field (where defined) must equal the generation's constant.
//! Validation of any generation yields the same normalized
//! [`ConversionRequest`].

pub mod v1;
pub mod v3;
pub mod v4;

use serde_json::{Number, Value};

use crate::error::{BridgeError, SCHEMA_MISMATCH_CURRENT, SCHEMA_MISMATCH_LEGACY};
use crate::request::ConversionRequest;

/// A protocol schema generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    V1,
    V3,
    V4,
}

impl Generation {
    /// The generation served by default.
    pub const CURRENT: Self = Self::V4;

    /// Look up a generation by its protocol version number.
    pub fn from_number(version: u32) -> Option<Self> {
        match version {
            1 => Some(Self::V1),
            3 => Some(Self::V3),
            4 => Some(Self::V4),
            _ => None,
        }
    }

    /// Protocol version number of this generation.
    pub fn number(self) -> u32 {
        match self {
            Self::V1 => 1,
            Self::V3 => 3,
            Self::V4 => 4,
        }
    }

    /// Schema-mismatch response text, matching each generation's
    /// historical wording.
    pub fn mismatch_message(self) -> &'static str {
        match self {
            Self::V1 | Self::V3 => SCHEMA_MISMATCH_LEGACY,
            Self::V4 => SCHEMA_MISMATCH_CURRENT,
        }
    }

    /// Validate a parsed object against this generation's schema.
    ///
    /// Rejects non-objects, missing or mistyped fields, unknown keys, and a
    /// `version` value other than this generation's constant. On rejection
    /// no conversion is attempted.
    pub fn validate(self, value: Value) -> Result<ConversionRequest, BridgeError> {
        match self {
            Self::V1 => v1::validate(value),
            Self::V3 => v3::validate(value),
            Self::V4 => v4::validate(value),
        }
    }

    pub(crate) fn schema_error(self, source: Option<serde_json::Error>) -> BridgeError {
        BridgeError::Schema {
            message: self.mismatch_message(),
            source,
        }
    }
}

/// Pull the correlation id out of a parsed object.
///
/// Returns the id only when the field is present and numeric; an id of any
/// other type is treated as absent. Used to echo the id on requests that
/// fail validation for other reasons.
pub fn extract_id(value: &Value) -> Option<Number> {
    match value.get("id") {
        Some(Value::Number(id)) => Some(id.clone()),
        _ => None,
    }
}
