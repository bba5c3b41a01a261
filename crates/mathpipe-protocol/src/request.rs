//! Normalized conversion request.
//!
//! All three schema generations validate into this one shape; the engine
//! never sees generation-specific field names.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Source markup language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Tex,
    Mathml,
    Asciimath,
}

impl SourceFormat {
    /// Wire name, also used to pick the engine conversion function.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tex => "tex",
            Self::Mathml => "mathml",
            Self::Asciimath => "asciimath",
        }
    }
}

/// Target output format. Only SVG is defined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    #[default]
    Svg,
}

impl TargetFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
        }
    }
}

/// Layout hints forwarded to the engine. Generations differ in which
/// hints they carry, so every hint is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutHints {
    /// Em size in pixels.
    pub em: Option<f64>,
    /// Ex size in pixels.
    pub ex: Option<f64>,
    /// Width of the surrounding container in pixels.
    pub container_width: Option<f64>,
    /// Line-breaking width in pixels.
    pub line_width: Option<f64>,
    /// CJK character width (generation 3 only).
    pub cjk_width: Option<f64>,
}

/// A validated request, normalized across generations.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    /// Caller-assigned correlation token, echoed verbatim in the response.
    pub id: Number,
    /// Source markup language.
    pub from: SourceFormat,
    /// Target output format.
    pub to: TargetFormat,
    /// The markup to convert.
    pub markup: String,
    /// Display-style (block) rendering, as opposed to inline.
    pub display: bool,
    /// Layout hints for the engine.
    pub layout: LayoutHints,
}

impl ConversionRequest {
    /// Conversion function name for this request's format pair,
    /// e.g. `tex2svg` or `mathml2svg`.
    pub fn conversion_name(&self) -> String {
        format!("{}2{}", self.from.as_str(), self.to.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_name_follows_format_pair() {
        let request = ConversionRequest {
            id: Number::from(1),
            from: SourceFormat::Mathml,
            to: TargetFormat::Svg,
            markup: "<math/>".to_string(),
            display: true,
            layout: LayoutHints::default(),
        };
        assert_eq!(request.conversion_name(), "mathml2svg");
    }

    #[test]
    fn source_format_parses_wire_names() {
        let from: SourceFormat = serde_json::from_str("\"asciimath\"").unwrap();
        assert_eq!(from, SourceFormat::Asciimath);
        // Wire names are case-sensitive.
        assert!(serde_json::from_str::<SourceFormat>("\"TeX\"").is_err());
    }
}
