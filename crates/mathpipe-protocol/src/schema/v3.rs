//! Generation 3 request schema.
//!
//! `{id, ex, width, cjk, data, type}` with `type` selecting both the source
//! language and display mode. `version` is optional; if present it must
//! equal 3.

use serde::Deserialize;
use serde_json::{Number, Value};

use super::Generation;
use crate::error::BridgeError;
use crate::request::{ConversionRequest, LayoutHints, SourceFormat, TargetFormat};

const VERSION: f64 = 3.0;

#[derive(Debug, Clone, Copy, Deserialize)]
enum MarkupType {
    #[serde(rename = "TeX")]
    Tex,
    #[serde(rename = "inline-TeX")]
    InlineTex,
    #[serde(rename = "MathML")]
    Mathml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RequestV3 {
    id: Number,
    #[serde(default)]
    version: Option<f64>,
    ex: f64,
    width: f64,
    cjk: f64,
    data: String,
    #[serde(rename = "type")]
    markup_type: MarkupType,
}

pub(super) fn validate(value: Value) -> Result<ConversionRequest, BridgeError> {
    let request: RequestV3 = serde_json::from_value(value)
        .map_err(|e| Generation::V3.schema_error(Some(e)))?;
    if request.version.is_some_and(|v| v != VERSION) {
        return Err(Generation::V3.schema_error(None));
    }
    let (from, display) = match request.markup_type {
        MarkupType::Tex => (SourceFormat::Tex, true),
        MarkupType::InlineTex => (SourceFormat::Tex, false),
        MarkupType::Mathml => (SourceFormat::Mathml, true),
    };
    Ok(ConversionRequest {
        id: request.id,
        from,
        to: TargetFormat::Svg,
        markup: request.data,
        display,
        layout: LayoutHints {
            em: None,
            ex: Some(request.ex),
            container_width: Some(request.width),
            line_width: Some(request.width),
            cjk_width: Some(request.cjk),
        },
    })
}
