//! Generation 1 request schema.
//!
//! TeX-only: `{id, version, data, inline}`. `version` is required and must
//! equal 1.

use serde::Deserialize;
use serde_json::{Number, Value};

use super::Generation;
use crate::error::BridgeError;
use crate::request::{ConversionRequest, LayoutHints, SourceFormat, TargetFormat};

const VERSION: f64 = 1.0;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RequestV1 {
    id: Number,
    version: f64,
    data: String,
    inline: bool,
}

pub(super) fn validate(value: Value) -> Result<ConversionRequest, BridgeError> {
    let request: RequestV1 = serde_json::from_value(value)
        .map_err(|e| Generation::V1.schema_error(Some(e)))?;
    if request.version != VERSION {
        return Err(Generation::V1.schema_error(None));
    }
    Ok(ConversionRequest {
        id: request.id,
        from: SourceFormat::Tex,
        to: TargetFormat::Svg,
        markup: request.data,
        display: !request.inline,
        layout: LayoutHints::default(),
    })
}
