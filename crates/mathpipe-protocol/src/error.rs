//! Error taxonomy for the line protocol.
//!
//! Every failure a single input line can produce maps to exactly one of
//! these variants; the response payload text is the variant's `Display`
//! output. All variants are non-fatal to the process.

use std::fmt;

/// Schema-mismatch message used by generations 1 and 3.
pub const SCHEMA_MISMATCH_LEGACY: &str = "Schema mismatch";

/// Schema-mismatch message used by generation 4.
pub const SCHEMA_MISMATCH_CURRENT: &str =
    "JSON schema mismatch. Check version compatibility";

/// Coarse error kind, one per failure class.
///
/// Produced explicitly by the parser, validator, and dispatcher. Never
/// inferred from a caught error's identity after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input line was not valid JSON.
    Parse,
    /// Parsed object does not match the active schema.
    Schema,
    /// The engine rejected the markup.
    Conversion,
    /// Anything else raised while handling the line.
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "parse"),
            Self::Schema => write!(f, "schema"),
            Self::Conversion => write!(f, "conversion"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A failed request, carrying the exact payload text the response reports.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The line could not be parsed as JSON at all.
    #[error("JSON parse error")]
    Parse(#[source] serde_json::Error),

    /// The object parsed but failed the active generation's schema.
    /// `message` is the generation's historical mismatch wording.
    #[error("{message}")]
    Schema {
        message: &'static str,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The engine reported a rendering failure; its text is surfaced verbatim.
    #[error("{0}")]
    Conversion(String),

    /// Unanticipated failure. Reported generically, never propagated.
    #[error("Unknown error")]
    Unknown,
}

impl BridgeError {
    /// Returns the kind for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) => ErrorKind::Parse,
            Self::Schema { .. } => ErrorKind::Schema,
            Self::Conversion(_) => ErrorKind::Conversion,
            Self::Unknown => ErrorKind::Unknown,
        }
    }
}
