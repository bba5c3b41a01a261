//! Generation 4 request schema, the current one.
//!
//! `{id, em, ex, containerWidth, lineWidth, payload, inline, from, to}` with
//! explicit source and target format enums. `version` is optional; if
//! present it must equal 4.

use serde::Deserialize;
use serde_json::{Number, Value};

use super::Generation;
use crate::error::BridgeError;
use crate::request::{ConversionRequest, LayoutHints, SourceFormat, TargetFormat};

const VERSION: f64 = 4.0;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RequestV4 {
    id: Number,
    #[serde(default)]
    version: Option<f64>,
    em: f64,
    ex: f64,
    #[serde(rename = "containerWidth")]
    container_width: f64,
    #[serde(rename = "lineWidth")]
    line_width: f64,
    payload: String,
    inline: bool,
    from: SourceFormat,
    to: TargetFormat,
}

pub(super) fn validate(value: Value) -> Result<ConversionRequest, BridgeError> {
    let request: RequestV4 = serde_json::from_value(value)
        .map_err(|e| Generation::V4.schema_error(Some(e)))?;
    if request.version.is_some_and(|v| v != VERSION) {
        return Err(Generation::V4.schema_error(None));
    }
    Ok(ConversionRequest {
        id: request.id,
        from: request.from,
        to: request.to,
        markup: request.payload,
        display: !request.inline,
        layout: LayoutHints {
            em: Some(request.em),
            ex: Some(request.ex),
            container_width: Some(request.container_width),
            line_width: Some(request.line_width),
            cjk_width: None,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Value {
        json!({
            "version": 4, "id": 7, "em": 16, "ex": 8,
            "containerWidth": 500, "lineWidth": 500,
            "payload": "x^2", "inline": false, "from": "tex", "to": "svg"
        })
    }

    #[test]
    fn accepts_reference_request() {
        let request = validate(base()).unwrap();
        assert_eq!(request.id, Number::from(7));
        assert_eq!(request.from, SourceFormat::Tex);
        assert_eq!(request.to, TargetFormat::Svg);
        assert_eq!(request.markup, "x^2");
        assert!(request.display);
        assert_eq!(request.layout.em, Some(16.0));
        assert_eq!(request.layout.line_width, Some(500.0));
        assert_eq!(request.layout.cjk_width, None);
    }

    #[test]
    fn version_may_be_omitted() {
        let mut value = base();
        value.as_object_mut().unwrap().remove("version");
        assert!(validate(value).is_ok());
    }

    #[test]
    fn wrong_version_rejects() {
        let mut value = base();
        value["version"] = json!(3);
        assert!(validate(value).is_err());
    }

    #[test]
    fn missing_required_field_rejects() {
        for field in [
            "id",
            "em",
            "ex",
            "containerWidth",
            "lineWidth",
            "payload",
            "inline",
            "from",
            "to",
        ] {
            let mut value = base();
            value.as_object_mut().unwrap().remove(field);
            assert!(validate(value).is_err(), "missing {} accepted", field);
        }
    }

    #[test]
    fn extra_field_rejects() {
        let mut value = base();
        value["scale"] = json!(2);
        assert!(validate(value).is_err());
    }

    #[test]
    fn format_enums_are_exact() {
        let mut value = base();
        value["from"] = json!("TeX");
        assert!(validate(value.clone()).is_err());
        value["from"] = json!("mathml");
        value["to"] = json!("png");
        assert!(validate(value).is_err());
    }

    #[test]
    fn non_integer_id_is_preserved() {
        let mut value = base();
        value["id"] = json!(7.5);
        let request = validate(value).unwrap();
        assert_eq!(request.id.as_f64(), Some(7.5));
    }
}
