//! Response envelope.
//!
//! One response object per input line, serialized as a single JSON line on
//! stdout. Correlation is by `id` only; emission order is completion order.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::BridgeError;

/// Sentinel id used when no id could be extracted from the input line.
pub fn sentinel_id() -> Number {
    Number::from(-1)
}

/// Discriminant for the response payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// `payload` is rendered SVG markup.
    Svg,
    /// `payload` is a human-readable error message.
    Error,
}

/// Response envelope, one per input line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Request id echoed verbatim, or -1 when it could not be determined.
    pub id: Number,
    /// Payload discriminant.
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    /// Rendered markup or error message.
    pub payload: String,
}

impl Response {
    /// Create a success response carrying rendered markup.
    pub fn svg(id: Number, payload: String) -> Self {
        Self {
            id,
            kind: ResponseKind::Svg,
            payload,
        }
    }

    /// Create an error response. A missing id falls back to the sentinel.
    pub fn failure(id: Option<Number>, error: &BridgeError) -> Self {
        Self {
            id: id.unwrap_or_else(sentinel_id),
            kind: ResponseKind::Error,
            payload: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SCHEMA_MISMATCH_CURRENT;

    #[test]
    fn success_serializes_with_type_discriminant() {
        let response = Response::svg(Number::from(7), "<svg/>".to_string());
        let line = serde_json::to_string(&response).unwrap();
        assert_eq!(line, r#"{"id":7,"type":"svg","payload":"<svg/>"}"#);
    }

    #[test]
    fn failure_without_id_uses_sentinel() {
        let error = BridgeError::Schema {
            message: SCHEMA_MISMATCH_CURRENT,
            source: None,
        };
        let response = Response::failure(None, &error);
        let line = serde_json::to_string(&response).unwrap();
        assert_eq!(
            line,
            r#"{"id":-1,"type":"error","payload":"JSON schema mismatch. Check version compatibility"}"#
        );
    }

    #[test]
    fn failure_echoes_id_when_known() {
        let response = Response::failure(
            Some(Number::from(42)),
            &BridgeError::Conversion("bad markup".to_string()),
        );
        assert_eq!(response.id, Number::from(42));
        assert_eq!(response.kind, ResponseKind::Error);
        assert_eq!(response.payload, "bad markup");
    }
}
