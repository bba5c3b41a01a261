//! Mathpipe Protocol Types
//!
//! Defines the line-oriented JSON request/response protocol spoken over
//! stdin/stdout, including the three schema generations that have existed
//! over the protocol's history.

pub mod error;
pub mod request;
pub mod response;
pub mod schema;

pub use error::{BridgeError, ErrorKind};
pub use request::{ConversionRequest, LayoutHints, SourceFormat, TargetFormat};
pub use response::{sentinel_id, Response, ResponseKind};
pub use schema::Generation;

/// Protocol generation served by default.
pub const PROTOCOL_CURRENT: u32 = 4;
